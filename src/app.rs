//! eframe application — the entry point for the binary.
//!
//! Creates the hardware session (cpal + midir) and the window, wiring both
//! to a single [`AppState`].

use eframe::egui;

use crate::backend::{CpalHost, MidirBackend};
use crate::config::AppConfig;
use crate::editor::{self, EditorState};
use crate::session::HardwareSession;
use crate::state::AppState;

/// Run the application until the window closes.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("panescope"),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "panescope",
        options,
        Box::new(|cc| {
            editor::apply_theme(&cc.egui_ctx);
            Ok(Box::new(PanescopeApp::new(config)))
        }),
    )
}

struct PanescopeApp {
    editor: EditorState,
    /// Owns the stream and ports; dropping the app closes them.
    session: HardwareSession<CpalHost, MidirBackend>,
    state: AppState,
    /// Whether the first frame has run.
    initialized: bool,
}

impl PanescopeApp {
    fn new(config: AppConfig) -> Self {
        let midi_backend = MidirBackend::new(config.midi_client_name.clone());
        let mut state = AppState::new(config);
        let session = HardwareSession::new(CpalHost::new(), midi_backend, &mut state);

        Self {
            editor: EditorState::default(),
            session,
            state,
            initialized: false,
        }
    }
}

impl eframe::App for PanescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initialized {
            self.initialized = true;
            self.session.open_default_output(&mut self.state);
        }

        self.session.poll(&mut self.state);

        editor::draw(ctx, &self.state, &mut self.editor);

        // Apply user actions after drawing
        for command in self.editor.take_commands() {
            self.session.apply(&mut self.state, command);
        }

        // Waveform and MIDI log change without user input.
        ctx.request_repaint();
    }
}
