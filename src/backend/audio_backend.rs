//! Audio host using cpal — input device probing and mono input streams.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio::{AudioDeviceInfo, AudioHost, InputSink, InputStream, StreamSettings};
use crate::error::{Error, Result};

/// The platform's default cpal host.
pub struct CpalHost {
    host: cpal::Host,
}

impl CpalHost {
    pub fn new() -> Self {
        let host = cpal::default_host();
        log::info!("[AudioBackend] Using host: {:?}", host.id());
        Self { host }
    }

    /// The device at `device.index` if its name still matches, otherwise
    /// the first device with that name.
    fn find_input_device(&self, device: &AudioDeviceInfo) -> Result<cpal::Device> {
        let has_name = |d: &cpal::Device| d.name().map(|n| n == device.name).unwrap_or(false);

        if let Some(found) = self.host.input_devices()?.nth(device.index).filter(has_name) {
            return Ok(found);
        }
        log::debug!(
            "[AudioBackend] '{}' not at #{}, searching by name",
            device.name,
            device.index
        );
        self.host
            .input_devices()?
            .find(has_name)
            .ok_or_else(|| Error::DeviceNotFound(device.name.clone()))
    }
}

impl Default for CpalHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest channel count across the device's supported input configs.
fn max_input_channels(device: &cpal::Device) -> u16 {
    device
        .supported_input_configs()
        .map(|configs| configs.map(|c| c.channels()).max().unwrap_or(0))
        .unwrap_or(0)
}

impl InputStream for cpal::Stream {
    fn play(&self) -> Result<()> {
        StreamTrait::play(self)?;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        StreamTrait::pause(self)?;
        Ok(())
    }
}

impl AudioHost for CpalHost {
    type Stream = cpal::Stream;

    fn input_devices(&self) -> Result<Vec<AudioDeviceInfo>> {
        let mut devices = Vec::new();
        for (index, device) in self.host.input_devices()?.enumerate() {
            let Ok(name) = device.name() else { continue };
            devices.push(AudioDeviceInfo {
                index,
                max_input_channels: max_input_channels(&device),
                name,
            });
        }
        Ok(devices)
    }

    fn build_input_stream(
        &self,
        device: &AudioDeviceInfo,
        settings: &StreamSettings,
        sink: InputSink,
    ) -> Result<cpal::Stream> {
        let device = self.find_input_device(device)?;

        let config = cpal::StreamConfig {
            channels: settings.channels,
            sample_rate: cpal::SampleRate(settings.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(settings.frames_per_callback),
        };
        let error_sink = sink.clone();

        let stream = device.build_input_stream(
            &config,
            move |data: &[f32], _info: &cpal::InputCallbackInfo| {
                // Mono stream: one sample per frame.
                sink.deliver(data);
            },
            move |err| {
                log::error!("[AudioBackend] Stream error: {err}");
                error_sink.report_error(err.to_string());
            },
            None, // no timeout
        )?;

        Ok(stream)
    }
}
