//! Device and port enumeration.
//!
//! Enumeration never fails outward: a broken subsystem is logged and yields
//! an empty list.

use crate::audio::{AudioDeviceInfo, AudioHost};
use crate::midi::MidiBackend;

/// A MIDI port as shown in the pickers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MidiPortInfo {
    pub index: usize,
    pub name: String,
}

/// Everything the pickers can choose from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceLists {
    pub audio_inputs: Vec<AudioDeviceInfo>,
    pub midi_inputs: Vec<MidiPortInfo>,
    pub midi_outputs: Vec<MidiPortInfo>,
}

impl DeviceLists {
    /// Probe both subsystems.
    pub fn enumerate<H: AudioHost, B: MidiBackend>(audio: &H, midi: &B) -> Self {
        let lists = Self {
            audio_inputs: enumerate_audio_inputs(audio),
            midi_inputs: to_port_list("input", midi.input_ports()),
            midi_outputs: to_port_list("output", midi.output_ports()),
        };
        log::info!(
            "[Devices] {} audio input(s), {} MIDI input(s), {} MIDI output(s)",
            lists.audio_inputs.len(),
            lists.midi_inputs.len(),
            lists.midi_outputs.len()
        );
        lists
    }
}

/// Audio devices with at least one input channel and a non-empty name.
pub fn enumerate_audio_inputs<H: AudioHost>(host: &H) -> Vec<AudioDeviceInfo> {
    match host.input_devices() {
        Ok(devices) => devices
            .into_iter()
            .filter(|d| d.max_input_channels > 0 && !d.name.trim().is_empty())
            .collect(),
        Err(e) => {
            log::error!("[Devices] {e}");
            Vec::new()
        }
    }
}

fn to_port_list(kind: &str, ports: crate::error::Result<Vec<String>>) -> Vec<MidiPortInfo> {
    match ports {
        Ok(names) => names
            .into_iter()
            .enumerate()
            .map(|(index, name)| MidiPortInfo { index, name })
            .collect(),
        Err(e) => {
            log::error!("[Devices] MIDI {kind} enumeration failed: {e}");
            Vec::new()
        }
    }
}
