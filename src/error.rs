//! Error types for the audio and MIDI hardware layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Audio device '{0}' not found")]
    DeviceNotFound(String),

    #[error("Failed to enumerate audio devices: {0}")]
    DeviceEnumeration(String),

    #[error("Failed to build input stream: {0}")]
    StreamBuild(String),

    #[error("Failed to start input stream: {0}")]
    StreamPlay(String),

    #[error("Failed to stop input stream: {0}")]
    StreamPause(String),

    #[error("Input stream error: {0}")]
    Stream(String),

    #[error("Failed to create MIDI client: {0}")]
    MidiInit(String),

    #[error("Failed to connect MIDI port: {0}")]
    MidiConnect(String),

    #[error("Failed to send MIDI message: {0}")]
    MidiSend(String),

    #[error("{kind} index {index} out of range ({len} available)")]
    InvalidIndex {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

impl From<cpal::DevicesError> for Error {
    fn from(e: cpal::DevicesError) -> Self {
        Error::DeviceEnumeration(e.to_string())
    }
}

impl From<cpal::BuildStreamError> for Error {
    fn from(e: cpal::BuildStreamError) -> Self {
        Error::StreamBuild(e.to_string())
    }
}

impl From<cpal::PlayStreamError> for Error {
    fn from(e: cpal::PlayStreamError) -> Self {
        Error::StreamPlay(e.to_string())
    }
}

impl From<cpal::PauseStreamError> for Error {
    fn from(e: cpal::PauseStreamError) -> Self {
        Error::StreamPause(e.to_string())
    }
}

impl From<cpal::StreamError> for Error {
    fn from(e: cpal::StreamError) -> Self {
        Error::Stream(e.to_string())
    }
}

impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiInit(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiConnect(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiConnect(e.to_string())
    }
}

impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::MidiSend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
