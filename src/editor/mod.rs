//! Immediate-mode UI shell.
//!
//! Layout follows the three-column window:
//! - Left panel: device pickers (audio input, MIDI in, MIDI out)
//! - Center: stream controls, status and test note
//! - Right panel: waveform (upper) and MIDI log (lower)
//!
//! Drawing only reads [`AppState`] and records [`UiCommand`]s; the caller
//! applies them to the hardware session after the frame.

pub mod layout;
pub mod visualizer;

use crate::session::UiCommand;
use crate::state::{AppState, StreamStatus};

/// Catppuccin Mocha palette.
pub mod colors {
    use egui::Color32;

    pub const BASE: Color32 = Color32::from_rgb(30, 30, 46);
    pub const MANTLE: Color32 = Color32::from_rgb(24, 24, 37);
    pub const CRUST: Color32 = Color32::from_rgb(17, 17, 27);
    pub const SURFACE0: Color32 = Color32::from_rgb(49, 50, 68);
    pub const SURFACE1: Color32 = Color32::from_rgb(69, 71, 90);
    pub const TEXT: Color32 = Color32::from_rgb(205, 214, 244);
    pub const SUBTEXT0: Color32 = Color32::from_rgb(166, 173, 200);
    pub const BLUE: Color32 = Color32::from_rgb(137, 180, 250);
    pub const GREEN: Color32 = Color32::from_rgb(166, 227, 161);
    pub const RED: Color32 = Color32::from_rgb(243, 139, 168);
    pub const TEAL: Color32 = Color32::from_rgb(148, 226, 213);
    pub const OVERLAY0: Color32 = Color32::from_rgb(108, 112, 134);
}

/// Per-frame UI scratch state.
#[derive(Default)]
pub struct EditorState {
    /// Waveform copy, refreshed each frame so no lock is held while painting.
    waveform: Vec<f32>,
    /// Commands recorded during the current frame.
    commands: Vec<UiCommand>,
}

impl EditorState {
    pub fn take_commands(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push(&mut self, command: UiCommand) {
        self.commands.push(command);
    }
}

/// Apply the dark theme.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = colors::BASE;
    style.visuals.window_fill = colors::MANTLE;
    style.visuals.extreme_bg_color = colors::CRUST;

    let widgets = &mut style.visuals.widgets;
    widgets.noninteractive.bg_fill = colors::SURFACE0;
    widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT);
    widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, colors::SURFACE0);
    widgets.inactive.bg_fill = colors::MANTLE;
    widgets.inactive.weak_bg_fill = colors::MANTLE;
    widgets.inactive.bg_stroke = egui::Stroke::new(1.0, colors::SURFACE0);
    widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors::SUBTEXT0);
    widgets.hovered.bg_fill = colors::SURFACE0;
    widgets.hovered.weak_bg_fill = colors::SURFACE0;
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, colors::TEXT);
    widgets.active.bg_fill = colors::SURFACE1;
    widgets.active.weak_bg_fill = colors::SURFACE1;
    widgets.active.fg_stroke = egui::Stroke::new(1.0, colors::TEXT);

    style.visuals.selection.bg_fill = colors::BLUE.linear_multiply(0.3);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, colors::BLUE);

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);

    ctx.set_style(style);
}

fn pane_frame(fill: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(fill)
        .inner_margin(egui::Margin::same(8))
        .stroke(egui::Stroke::new(1.0, colors::SURFACE0))
}

fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(colors::BLUE).strong());
    ui.separator();
}

/// Draw the full window.
pub fn draw(ctx: &egui::Context, state: &AppState, editor: &mut EditorState) {
    state.samples.snapshot_into(&mut editor.waveform);
    let log_entries = state.midi_log.entries();

    let [left_width, _, right_width] = layout::split_three(ctx.screen_rect().width());

    // --- Left: device pickers ---
    egui::SidePanel::left("left_pane")
        .resizable(true)
        .default_width(left_width)
        .min_width(140.0)
        .frame(pane_frame(colors::MANTLE))
        .show(ctx, |ui| {
            draw_device_pickers(ui, state, editor);
        });

    // --- Right: waveform over MIDI log ---
    egui::SidePanel::right("right_pane")
        .resizable(true)
        .default_width(right_width)
        .min_width(160.0)
        .frame(egui::Frame::NONE.fill(colors::BASE))
        .show(ctx, |ui| {
            let upper_height = layout::split_half(ui.available_height());
            egui::TopBottomPanel::top("right_upper_pane")
                .resizable(true)
                .default_height(upper_height)
                .min_height(60.0)
                .frame(pane_frame(colors::BASE))
                .show_inside(ui, |ui| {
                    heading(ui, "Waveform");
                    visualizer::draw(ui, &editor.waveform);
                });
            egui::CentralPanel::default()
                .frame(pane_frame(colors::BASE))
                .show_inside(ui, |ui| {
                    draw_midi_log(ui, &log_entries, editor);
                });
        });

    // --- Center: stream controls ---
    egui::CentralPanel::default()
        .frame(pane_frame(colors::BASE))
        .show(ctx, |ui| {
            draw_controls(ui, state, editor);
        });
}

/// Combo box over `names`; records `on_select(index)` when the user picks one.
fn picker(
    ui: &mut egui::Ui,
    id: &str,
    names: &[&str],
    selected: Option<usize>,
    editor: &mut EditorState,
    on_select: impl Fn(usize) -> UiCommand,
) {
    let selected_text = selected
        .and_then(|i| names.get(i).copied())
        .unwrap_or("None");

    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for (i, name) in names.iter().enumerate() {
                if ui.selectable_label(selected == Some(i), *name).clicked() {
                    editor.push(on_select(i));
                }
            }
        });
}

fn draw_device_pickers(ui: &mut egui::Ui, state: &AppState, editor: &mut EditorState) {
    heading(ui, "Devices");

    ui.label("Audio input:");
    let audio: Vec<&str> = state.devices.audio_inputs.iter().map(|d| d.name.as_str()).collect();
    picker(ui, "audio_input", &audio, state.selection.audio_input, editor, UiCommand::SelectAudio);
    if audio.is_empty() {
        ui.label(egui::RichText::new("No input devices").color(colors::OVERLAY0));
    }
    ui.add_space(8.0);

    ui.label("MIDI input:");
    let midi_in: Vec<&str> = state.devices.midi_inputs.iter().map(|p| p.name.as_str()).collect();
    picker(ui, "midi_input", &midi_in, state.selection.midi_input, editor, UiCommand::SelectMidiInput);
    ui.add_space(8.0);

    ui.label("MIDI output:");
    let midi_out: Vec<&str> = state.devices.midi_outputs.iter().map(|p| p.name.as_str()).collect();
    picker(ui, "midi_output", &midi_out, state.selection.midi_output, editor, UiCommand::SelectMidiOutput);
    ui.add_space(12.0);

    if ui.button("⟳ Refresh").clicked() {
        editor.push(UiCommand::RefreshDevices);
    }
}

fn draw_controls(ui: &mut egui::Ui, state: &AppState, editor: &mut EditorState) {
    heading(ui, "Stream");

    ui.horizontal(|ui| {
        let running = state.status == StreamStatus::Running;
        let can_start = !running && !state.devices.audio_inputs.is_empty();
        if ui.add_enabled(can_start, egui::Button::new("▶ Start")).clicked() {
            let index = state.selection.audio_input.unwrap_or(0);
            editor.push(UiCommand::SelectAudio(index));
        }
        if ui.add_enabled(running, egui::Button::new("■ Stop")).clicked() {
            editor.push(UiCommand::StopAudio);
        }
    });

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Status:").color(colors::SUBTEXT0));
        let color = match state.status {
            StreamStatus::Running => colors::GREEN,
            StreamStatus::Stopped => colors::SUBTEXT0,
        };
        ui.label(egui::RichText::new(state.status.to_string()).color(color));
    });
    if let Some(name) = state.selected_audio_name() {
        ui.label(egui::RichText::new(name).color(colors::OVERLAY0).small());
    }
    ui.label(
        egui::RichText::new(format!(
            "{} Hz · mono · {} frames",
            state.config.sample_rate, state.config.frames_per_callback
        ))
        .color(colors::OVERLAY0)
        .small(),
    );

    ui.add_space(12.0);
    heading(ui, "MIDI");

    for (label, name) in [
        ("In:", state.selected_midi_input_name()),
        ("Out:", state.selected_midi_output_name()),
    ] {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(label).color(colors::SUBTEXT0));
            ui.label(egui::RichText::new(name.unwrap_or("None")).color(colors::OVERLAY0));
        });
    }

    let has_output = state.selection.midi_output.is_some();
    if ui
        .add_enabled(has_output, egui::Button::new("♪ Send test note"))
        .on_disabled_hover_text("No MIDI output open")
        .clicked()
    {
        editor.push(UiCommand::SendTestNote);
    }

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Last:").color(colors::SUBTEXT0));
        let last = state.midi_log.last_message().unwrap_or_else(|| "—".to_string());
        ui.label(egui::RichText::new(last).monospace());
    });

    if let Some(ref notice) = state.notice {
        ui.add_space(12.0);
        ui.label(egui::RichText::new(format!("⚠ {notice}")).color(colors::RED));
    }
}

fn draw_midi_log(ui: &mut egui::Ui, entries: &[String], editor: &mut EditorState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("MIDI log").color(colors::BLUE).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Clear").clicked() {
                editor.push(UiCommand::ClearMidiLog);
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        if entries.is_empty() {
            ui.label(egui::RichText::new("No messages").color(colors::OVERLAY0));
        }
        for entry in entries {
            ui.label(egui::RichText::new(entry).monospace().color(colors::TEXT));
        }
    });
}
