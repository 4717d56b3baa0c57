//! Application configuration — compiled-in defaults, no config file.

/// Runtime settings shared by the session and the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Input stream sample rate in Hz.
    pub sample_rate: u32,
    /// Fixed number of frames requested per hardware callback.
    pub frames_per_callback: u32,
    /// Length of the shared waveform sample buffer.
    pub sample_buffer_len: usize,
    /// Maximum number of entries kept in the MIDI log.
    pub midi_log_capacity: usize,
    /// Note number used by the test-note button (60 = C4).
    pub test_note: u8,
    /// Note-on velocity used by the test-note button.
    pub test_velocity: u8,
    /// Client name registered with the MIDI subsystem.
    pub midi_client_name: String,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    /// Minimum window size in logical pixels.
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            frames_per_callback: 256,
            sample_buffer_len: 1024,
            midi_log_capacity: 10,
            test_note: 60,
            test_velocity: 100,
            midi_client_name: "panescope".to_string(),
            window_size: [960.0, 600.0],
            min_window_size: [480.0, 300.0],
        }
    }
}
