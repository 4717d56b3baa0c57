//! panescope — a three-pane egui demo.
//!
//! Streams one channel of audio input into a fixed buffer for waveform
//! display and logs incoming MIDI messages. Hardware access goes through the
//! [`audio::AudioHost`] and [`midi::MidiBackend`] traits, implemented for
//! cpal and midir in [`backend`].

pub mod app;
pub mod audio;
pub mod backend;
pub mod buffers;
pub mod config;
pub mod devices;
pub mod editor;
pub mod error;
pub mod midi;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
