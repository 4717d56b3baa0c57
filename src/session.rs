//! Hardware session: exclusive owner of the audio stream and MIDI ports.
//!
//! The UI shell never touches the managers directly. It records
//! [`UiCommand`]s while drawing and the session applies them afterwards.

use crate::audio::{AudioHost, AudioStreamManager, StreamSettings};
use crate::devices::DeviceLists;
use crate::error::Error;
use crate::midi::{MidiBackend, MidiPortManager};
use crate::state::{AppState, StreamStatus};

/// User actions recorded by the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Open the audio stream on the audio input at this index.
    SelectAudio(usize),
    StopAudio,
    SelectMidiInput(usize),
    SelectMidiOutput(usize),
    SendTestNote,
    RefreshDevices,
    ClearMidiLog,
}

pub struct HardwareSession<H: AudioHost, B: MidiBackend> {
    audio: AudioStreamManager<H>,
    midi: MidiPortManager<B>,
}

impl<H: AudioHost, B: MidiBackend> HardwareSession<H, B> {
    /// Create the session around the state's shared buffers and enumerate devices.
    pub fn new(audio_host: H, midi_backend: B, state: &mut AppState) -> Self {
        let settings = StreamSettings::mono(&state.config);
        let audio = AudioStreamManager::new(audio_host, settings, state.samples.clone());
        let midi = MidiPortManager::new(midi_backend, state.midi_log.clone(), &state.config);

        state.devices = DeviceLists::enumerate(audio.host(), midi.backend());
        Self { audio, midi }
    }

    pub fn audio(&self) -> &AudioStreamManager<H> {
        &self.audio
    }

    pub fn midi(&self) -> &MidiPortManager<B> {
        &self.midi
    }

    /// Open the first MIDI output, if any. Called once at startup.
    pub fn open_default_output(&mut self, state: &mut AppState) {
        if state.devices.midi_outputs.is_empty() {
            log::info!("[Session] No MIDI output ports available");
            return;
        }
        self.select_midi_output(state, 0);
    }

    pub fn apply(&mut self, state: &mut AppState, command: UiCommand) {
        log::debug!("[Session] {command:?}");
        match command {
            UiCommand::SelectAudio(index) => self.select_audio(state, index),
            UiCommand::StopAudio => self.stop_audio(state),
            UiCommand::SelectMidiInput(index) => self.select_midi_input(state, index),
            UiCommand::SelectMidiOutput(index) => self.select_midi_output(state, index),
            UiCommand::SendTestNote => self.send_test_note(state),
            UiCommand::RefreshDevices => self.refresh_devices(state),
            UiCommand::ClearMidiLog => state.midi_log.clear(),
        }
    }

    pub fn select_audio(&mut self, state: &mut AppState, index: usize) {
        let len = state.devices.audio_inputs.len();
        let Some(device) = state.devices.audio_inputs.get(index).cloned() else {
            report(state, invalid("audio input", index, len));
            return;
        };

        match self.audio.open(&device) {
            Ok(()) => {
                state.selection.audio_input = Some(index);
                state.status = StreamStatus::Running;
                state.notice = None;
            }
            Err(e) => {
                state.selection.audio_input = None;
                state.status = StreamStatus::Stopped;
                report(state, e);
            }
        }
    }

    /// Close the stream but keep the selected device.
    pub fn stop_audio(&mut self, state: &mut AppState) {
        self.audio.close();
        state.status = StreamStatus::Stopped;
    }

    pub fn select_midi_input(&mut self, state: &mut AppState, index: usize) {
        let len = state.devices.midi_inputs.len();
        if index >= len {
            report(state, invalid("MIDI input", index, len));
            return;
        }
        match self.midi.open_input(index) {
            Ok(()) => {
                state.selection.midi_input = Some(index);
                state.notice = None;
            }
            Err(e) => {
                state.selection.midi_input = None;
                report(state, e);
            }
        }
    }

    pub fn select_midi_output(&mut self, state: &mut AppState, index: usize) {
        let len = state.devices.midi_outputs.len();
        if index >= len {
            report(state, invalid("MIDI output", index, len));
            return;
        }
        match self.midi.open_output(index) {
            Ok(()) => {
                state.selection.midi_output = Some(index);
                state.notice = None;
            }
            Err(e) => {
                state.selection.midi_output = None;
                report(state, e);
            }
        }
    }

    pub fn send_test_note(&mut self, state: &mut AppState) {
        if let Err(e) = self.midi.send_test_message() {
            report(state, e);
        }
    }

    /// Re-enumerate devices. Handles whose entry disappeared are closed.
    pub fn refresh_devices(&mut self, state: &mut AppState) {
        let devices = DeviceLists::enumerate(self.audio.host(), self.midi.backend());
        state.selection.retain_matching(&state.devices, &devices);
        state.devices = devices;

        if state.selection.audio_input.is_none() && self.audio.is_running() {
            self.stop_audio(state);
        }
        if state.selection.midi_input.is_none() {
            self.midi.close_input();
        }
        if state.selection.midi_output.is_none() {
            self.midi.close_output();
        }
    }

    /// Per-frame housekeeping: surface asynchronous stream errors.
    pub fn poll(&mut self, state: &mut AppState) {
        if let Some(message) = self.audio.drain_errors().pop() {
            report(state, Error::Stream(message));
        }
        state.status = if self.audio.is_running() {
            StreamStatus::Running
        } else {
            StreamStatus::Stopped
        };
    }

    /// Close all handles. Also runs on drop.
    pub fn shutdown(&mut self) {
        self.audio.close();
        self.midi.close_input();
        self.midi.close_output();
    }
}

impl<H: AudioHost, B: MidiBackend> Drop for HardwareSession<H, B> {
    fn drop(&mut self) {
        self.shutdown();
        log::info!("[Session] Shut down");
    }
}

fn invalid(kind: &'static str, index: usize, len: usize) -> Error {
    Error::InvalidIndex { kind, index, len }
}

fn report(state: &mut AppState, error: Error) {
    log::error!("[Session] {error}");
    state.notice = Some(error.to_string());
}
