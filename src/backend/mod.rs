//! Hardware backends: cpal for audio input, midir for MIDI ports.

pub mod audio_backend;
pub mod midi_backend;

pub use audio_backend::CpalHost;
pub use midi_backend::MidirBackend;
