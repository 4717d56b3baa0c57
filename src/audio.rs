//! Single-channel audio input stream lifecycle.
//!
//! The manager owns at most one open stream. Every hardware callback copies
//! its frames into the shared [`SampleBuffer`] through an [`InputSink`].

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::buffers::SampleBuffer;
use crate::config::AppConfig;
use crate::error::Result;

/// Information about an audio device as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioDeviceInfo {
    /// Position in the host's device enumeration.
    pub index: usize,
    pub name: String,
    pub max_input_channels: u16,
}

/// Parameters for opening an input stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamSettings {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames_per_callback: u32,
}

impl StreamSettings {
    pub fn mono(config: &AppConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: 1,
            frames_per_callback: config.frames_per_callback,
        }
    }
}

/// Write side handed to the audio callback thread.
#[derive(Clone)]
pub struct InputSink {
    buffer: Arc<SampleBuffer>,
    errors: Sender<String>,
}

impl InputSink {
    /// Copy one callback's worth of mono frames into the shared buffer.
    pub fn deliver(&self, frames: &[f32]) -> usize {
        self.buffer.write_frames(frames)
    }

    /// Forward an asynchronous stream error to the UI thread.
    pub fn report_error(&self, message: String) {
        // A full queue means the UI already has errors pending.
        let _ = self.errors.try_send(message);
    }
}

/// An open input stream. Dropping it closes the stream.
pub trait InputStream {
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
}

/// Audio subsystem seam: device probing and stream construction.
pub trait AudioHost {
    type Stream: InputStream;

    /// Probe all input-capable devices. Devices that fail to report a name
    /// are skipped.
    fn input_devices(&self) -> Result<Vec<AudioDeviceInfo>>;

    /// Build (but do not start) an input stream on `device`.
    ///
    /// The device is located by its enumeration index when the name there
    /// still matches, otherwise by name.
    fn build_input_stream(
        &self,
        device: &AudioDeviceInfo,
        settings: &StreamSettings,
        sink: InputSink,
    ) -> Result<Self::Stream>;
}

struct ActiveStream<S> {
    stream: S,
    device: AudioDeviceInfo,
}

/// Manages the single audio input stream.
pub struct AudioStreamManager<H: AudioHost> {
    host: H,
    settings: StreamSettings,
    buffer: Arc<SampleBuffer>,
    /// Errors from the current stream only; replaced on every open.
    error_rx: Receiver<String>,
    stream: Option<ActiveStream<H::Stream>>,
}

impl<H: AudioHost> AudioStreamManager<H> {
    pub fn new(host: H, settings: StreamSettings, buffer: Arc<SampleBuffer>) -> Self {
        let (_, error_rx) = error_channel();
        Self {
            host,
            settings,
            buffer,
            error_rx,
            stream: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn buffer(&self) -> &Arc<SampleBuffer> {
        &self.buffer
    }

    /// Close any open stream, then open and start one on `device`.
    ///
    /// On error the manager is left with no stream.
    pub fn open(&mut self, device: &AudioDeviceInfo) -> Result<()> {
        self.close();

        let (error_tx, error_rx) = error_channel();
        self.error_rx = error_rx;
        let sink = InputSink {
            buffer: self.buffer.clone(),
            errors: error_tx,
        };
        let stream = self.host.build_input_stream(device, &self.settings, sink)?;
        stream.play()?;

        log::info!(
            "[AudioStream] Started on '{}' (#{}): {}Hz, {} channel(s), {} frames/callback",
            device.name,
            device.index,
            self.settings.sample_rate,
            self.settings.channels,
            self.settings.frames_per_callback
        );

        self.stream = Some(ActiveStream {
            stream,
            device: device.clone(),
        });
        Ok(())
    }

    /// Stop and close the stream if one is open.
    pub fn close(&mut self) {
        let Some(active) = self.stream.take() else { return };
        if let Err(e) = active.stream.pause() {
            log::warn!("[AudioStream] {e}");
        }
        drop(active.stream);

        let stale = self.error_rx.try_iter().count();
        if stale > 0 {
            log::debug!("[AudioStream] Discarded {stale} error(s) from closed stream");
        }
        log::info!("[AudioStream] Closed '{}'", active.device.name);
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    pub fn device(&self) -> Option<&AudioDeviceInfo> {
        self.stream.as_ref().map(|s| &s.device)
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device().map(|d| d.name.as_str())
    }

    /// Errors reported by the stream since the last call.
    pub fn drain_errors(&self) -> Vec<String> {
        self.error_rx.try_iter().collect()
    }
}

fn error_channel() -> (Sender<String>, Receiver<String>) {
    crossbeam_channel::bounded(16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAudioHost;

    fn manager(host: FakeAudioHost) -> AudioStreamManager<FakeAudioHost> {
        let settings = StreamSettings::mono(&AppConfig::default());
        AudioStreamManager::new(host, settings, Arc::new(SampleBuffer::new(1024)))
    }

    fn device(index: usize, name: &str) -> AudioDeviceInfo {
        AudioDeviceInfo {
            index,
            name: name.to_string(),
            max_input_channels: 1,
        }
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["Mic"]));
        mgr.close();
        mgr.close();
        assert!(!mgr.is_running());
        assert_eq!(mgr.host().live_streams(), 0);
    }

    #[test]
    fn test_open_starts_mono_stream() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["Mic"]));
        mgr.open(&device(0, "Mic")).unwrap();
        assert!(mgr.is_running());
        assert_eq!(mgr.device_name(), Some("Mic"));
        assert_eq!(mgr.host().live_streams(), 1);
        assert!(mgr.host().all_playing());

        let settings = mgr.host().last_settings().unwrap();
        assert_eq!(settings.channels, 1);
        assert_eq!(settings.sample_rate, 44_100);
        assert_eq!(settings.frames_per_callback, 256);
    }

    #[test]
    fn test_switching_devices_keeps_one_stream() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A", "B"]));
        mgr.open(&device(0, "A")).unwrap();
        mgr.open(&device(1, "B")).unwrap();
        assert_eq!(mgr.host().live_streams(), 1);
        assert_eq!(mgr.device_name(), Some("B"));
        assert_eq!(mgr.host().opened(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_reopen_same_device_is_stable() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A"]));
        mgr.open(&device(0, "A")).unwrap();
        mgr.open(&device(0, "A")).unwrap();
        assert_eq!(mgr.host().live_streams(), 1);
        assert_eq!(mgr.device_name(), Some("A"));
        assert!(mgr.is_running());
    }

    #[test]
    fn test_failed_open_leaves_stopped() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A"]));
        mgr.open(&device(0, "A")).unwrap();
        assert!(mgr.open(&device(5, "Missing")).is_err());
        assert!(!mgr.is_running());
        assert_eq!(mgr.host().live_streams(), 0);
    }

    #[test]
    fn test_play_failure_drops_stream() {
        let host = FakeAudioHost::with_devices(&["A"]);
        host.fail_play(true);
        let mut mgr = manager(host);
        assert!(mgr.open(&device(0, "A")).is_err());
        assert!(!mgr.is_running());
        assert_eq!(mgr.host().live_streams(), 0);
    }

    #[test]
    fn test_callback_writes_into_shared_buffer() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A"]));
        mgr.open(&device(0, "A")).unwrap();

        mgr.buffer().write_frames(&[9.0; 1024]);
        let written = mgr.host().deliver(&[0.1, 0.2, 0.3]);
        assert_eq!(written, 3);

        let snap = mgr.buffer().snapshot();
        assert_eq!(&snap[..3], &[0.1, 0.2, 0.3]);
        assert!(snap[3..].iter().all(|&s| s == 9.0));
    }

    #[test]
    fn test_stream_errors_are_drained() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A"]));
        mgr.open(&device(0, "A")).unwrap();
        mgr.host().report_error("device unplugged");
        assert_eq!(mgr.drain_errors(), vec!["device unplugged".to_string()]);
        assert!(mgr.drain_errors().is_empty());
    }

    #[test]
    fn test_duplicate_names_open_by_index() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["Mic", "Mic"]));
        mgr.open(&device(1, "Mic")).unwrap();
        assert_eq!(mgr.host().opened_indices(), vec![1]);
        assert_eq!(mgr.device().map(|d| d.index), Some(1));

        mgr.open(&device(0, "Mic")).unwrap();
        assert_eq!(mgr.host().opened_indices(), vec![1, 0]);
    }

    #[test]
    fn test_moved_device_found_by_name() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A", "B"]));
        mgr.open(&device(0, "B")).unwrap();
        assert_eq!(mgr.host().opened_indices(), vec![1]);
        assert_eq!(mgr.device_name(), Some("B"));
    }

    #[test]
    fn test_close_discards_pending_errors() {
        let mut mgr = manager(FakeAudioHost::with_devices(&["A", "B"]));
        mgr.open(&device(0, "A")).unwrap();
        mgr.host().report_error("A unplugged");
        mgr.close();
        assert!(mgr.drain_errors().is_empty());

        mgr.open(&device(0, "A")).unwrap();
        mgr.host().report_error("A unplugged");
        mgr.open(&device(1, "B")).unwrap();
        assert!(mgr.drain_errors().is_empty());
    }
}
