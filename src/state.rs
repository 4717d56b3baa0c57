use std::fmt;
use std::sync::Arc;

use crate::buffers::{MidiLog, SampleBuffer};
use crate::config::AppConfig;
use crate::devices::DeviceLists;

/// Whether the audio input stream is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    Running,
    #[default]
    Stopped,
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamStatus::Running => f.write_str("Running"),
            StreamStatus::Stopped => f.write_str("Stopped"),
        }
    }
}

/// Index into each device list, or `None` when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub audio_input: Option<usize>,
    pub midi_input: Option<usize>,
    pub midi_output: Option<usize>,
}

impl Selection {
    /// Keep each selection only if the same name sits at the same index in
    /// the refreshed lists.
    pub fn retain_matching(&mut self, old: &DeviceLists, new: &DeviceLists) {
        self.audio_input = self.audio_input.filter(|&i| {
            names_match(
                old.audio_inputs.get(i).map(|d| d.name.as_str()),
                new.audio_inputs.get(i).map(|d| d.name.as_str()),
            )
        });
        self.midi_input = self.midi_input.filter(|&i| {
            names_match(
                old.midi_inputs.get(i).map(|p| p.name.as_str()),
                new.midi_inputs.get(i).map(|p| p.name.as_str()),
            )
        });
        self.midi_output = self.midi_output.filter(|&i| {
            names_match(
                old.midi_outputs.get(i).map(|p| p.name.as_str()),
                new.midi_outputs.get(i).map(|p| p.name.as_str()),
            )
        });
    }
}

fn names_match(old: Option<&str>, new: Option<&str>) -> bool {
    matches!((old, new), (Some(a), Some(b)) if a == b)
}

/// All application state shared between the UI shell and the hardware session.
pub struct AppState {
    pub config: AppConfig,
    pub devices: DeviceLists,
    pub selection: Selection,
    /// Waveform samples, written by the audio callback.
    pub samples: Arc<SampleBuffer>,
    /// Formatted incoming MIDI messages, written by the MIDI callback.
    pub midi_log: Arc<MidiLog>,
    pub status: StreamStatus,
    /// Last error shown to the user, cleared on the next successful action.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let samples = Arc::new(SampleBuffer::new(config.sample_buffer_len));
        let midi_log = Arc::new(MidiLog::new(config.midi_log_capacity));
        Self {
            config,
            devices: DeviceLists::default(),
            selection: Selection::default(),
            samples,
            midi_log,
            status: StreamStatus::Stopped,
            notice: None,
        }
    }

    pub fn selected_audio_name(&self) -> Option<&str> {
        self.selection
            .audio_input
            .and_then(|i| self.devices.audio_inputs.get(i))
            .map(|d| d.name.as_str())
    }

    pub fn selected_midi_input_name(&self) -> Option<&str> {
        self.selection
            .midi_input
            .and_then(|i| self.devices.midi_inputs.get(i))
            .map(|p| p.name.as_str())
    }

    pub fn selected_midi_output_name(&self) -> Option<&str> {
        self.selection
            .midi_output
            .and_then(|i| self.devices.midi_outputs.get(i))
            .map(|p| p.name.as_str())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
