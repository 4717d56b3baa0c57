//! In-memory audio host and MIDI backend used by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::audio::{AudioDeviceInfo, AudioHost, InputSink, InputStream, StreamSettings};
use crate::error::{Error, Result};
use crate::midi::{MidiBackend, MidiConnection, MidiHandler, MidiSender};

/// Fake audio host. Streams count themselves live until dropped.
#[derive(Default)]
pub struct FakeAudioHost {
    devices: Vec<AudioDeviceInfo>,
    fail_enumeration: AtomicBool,
    fail_play: AtomicBool,
    live: Arc<AtomicUsize>,
    opened: Mutex<Vec<AudioDeviceInfo>>,
    sinks: Mutex<Vec<InputSink>>,
    last_settings: Mutex<Option<StreamSettings>>,
    playing: Arc<Mutex<Vec<Arc<AtomicBool>>>>,
}

impl FakeAudioHost {
    /// Mono input devices with the given names.
    pub fn with_devices(names: &[&str]) -> Self {
        let devices = names
            .iter()
            .enumerate()
            .map(|(index, name)| AudioDeviceInfo {
                index,
                name: name.to_string(),
                max_input_channels: 1,
            })
            .collect();
        Self::with_device_infos(devices)
    }

    pub fn with_device_infos(devices: Vec<AudioDeviceInfo>) -> Self {
        Self {
            devices,
            ..Self::default()
        }
    }

    pub fn fail_enumeration(&self, fail: bool) {
        self.fail_enumeration.store(fail, Ordering::SeqCst);
    }

    pub fn fail_play(&self, fail: bool) {
        self.fail_play.store(fail, Ordering::SeqCst);
    }

    pub fn live_streams(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Live stream counter that outlives the host.
    pub fn live_counter(&self) -> Arc<AtomicUsize> {
        self.live.clone()
    }

    /// Whether every stream ever built is currently playing.
    pub fn all_playing(&self) -> bool {
        self.playing.lock().iter().all(|p| p.load(Ordering::SeqCst))
    }

    /// Names of the devices streams were built on, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().iter().map(|d| d.name.clone()).collect()
    }

    /// Enumeration indices of the devices streams were built on, in order.
    pub fn opened_indices(&self) -> Vec<usize> {
        self.opened.lock().iter().map(|d| d.index).collect()
    }

    pub fn last_settings(&self) -> Option<StreamSettings> {
        *self.last_settings.lock()
    }

    /// Simulate a hardware callback on the most recently built stream.
    pub fn deliver(&self, frames: &[f32]) -> usize {
        self.sinks.lock().last().map(|s| s.deliver(frames)).unwrap_or(0)
    }

    pub fn report_error(&self, message: &str) {
        if let Some(sink) = self.sinks.lock().last() {
            sink.report_error(message.to_string());
        }
    }
}

pub struct FakeStream {
    live: Arc<AtomicUsize>,
    playing: Arc<AtomicBool>,
    fail_play: bool,
}

impl InputStream for FakeStream {
    fn play(&self) -> Result<()> {
        if self.fail_play {
            return Err(Error::StreamPlay("device busy".into()));
        }
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AudioHost for FakeAudioHost {
    type Stream = FakeStream;

    fn input_devices(&self) -> Result<Vec<AudioDeviceInfo>> {
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(Error::DeviceEnumeration("backend unavailable".into()));
        }
        Ok(self.devices.clone())
    }

    fn build_input_stream(
        &self,
        device: &AudioDeviceInfo,
        settings: &StreamSettings,
        sink: InputSink,
    ) -> Result<FakeStream> {
        let found = self
            .devices
            .iter()
            .find(|d| d.index == device.index && d.name == device.name)
            .or_else(|| self.devices.iter().find(|d| d.name == device.name))
            .ok_or_else(|| Error::DeviceNotFound(device.name.clone()))?;
        self.live.fetch_add(1, Ordering::SeqCst);
        self.opened.lock().push(found.clone());
        self.sinks.lock().push(sink);
        *self.last_settings.lock() = Some(*settings);

        let playing = Arc::new(AtomicBool::new(false));
        self.playing.lock().push(playing.clone());
        Ok(FakeStream {
            live: self.live.clone(),
            playing,
            fail_play: self.fail_play.load(Ordering::SeqCst),
        })
    }
}

type HandlerList = Arc<Mutex<Vec<(u64, MidiHandler)>>>;

/// Fake MIDI backend. Records sent bytes and routes injected messages to
/// every live input handler.
#[derive(Default)]
pub struct FakeMidiBackend {
    inputs: Vec<String>,
    outputs: Vec<String>,
    fail_enumeration: AtomicBool,
    handlers: HandlerList,
    next_id: AtomicU64,
    live_outputs: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeMidiBackend {
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn fail_enumeration(&self, fail: bool) {
        self.fail_enumeration.store(fail, Ordering::SeqCst);
    }

    /// Simulate an incoming message.
    pub fn deliver(&self, bytes: &[u8]) {
        for (_, handler) in self.handlers.lock().iter_mut() {
            handler(0, bytes);
        }
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().clone()
    }

    pub fn live_inputs(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn live_outputs(&self) -> usize {
        self.live_outputs.load(Ordering::SeqCst)
    }

    /// Live connection counts that outlive the backend.
    pub fn live_ports(&self) -> LivePorts {
        LivePorts {
            handlers: self.handlers.clone(),
            outputs: self.live_outputs.clone(),
        }
    }
}

pub struct LivePorts {
    handlers: HandlerList,
    outputs: Arc<AtomicUsize>,
}

impl LivePorts {
    pub fn inputs(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn outputs(&self) -> usize {
        self.outputs.load(Ordering::SeqCst)
    }
}

pub struct FakeMidiInput {
    id: u64,
    handlers: HandlerList,
}

impl MidiConnection for FakeMidiInput {
    fn close(self) {}
}

impl Drop for FakeMidiInput {
    fn drop(&mut self) {
        self.handlers.lock().retain(|(id, _)| *id != self.id);
    }
}

pub struct FakeMidiOutput {
    live: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MidiConnection for FakeMidiOutput {
    fn close(self) {}
}

impl MidiSender for FakeMidiOutput {
    fn send(&mut self, message: &[u8]) -> Result<()> {
        self.sent.lock().push(message.to_vec());
        Ok(())
    }
}

impl Drop for FakeMidiOutput {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MidiBackend for FakeMidiBackend {
    type Input = FakeMidiInput;
    type Output = FakeMidiOutput;

    fn input_ports(&self) -> Result<Vec<String>> {
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(Error::MidiInit("no MIDI subsystem".into()));
        }
        Ok(self.inputs.clone())
    }

    fn output_ports(&self) -> Result<Vec<String>> {
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(Error::MidiInit("no MIDI subsystem".into()));
        }
        Ok(self.outputs.clone())
    }

    fn connect_input(&self, index: usize, handler: MidiHandler) -> Result<(FakeMidiInput, String)> {
        let name = self.inputs.get(index).cloned().ok_or(Error::InvalidIndex {
            kind: "MIDI input",
            index,
            len: self.inputs.len(),
        })?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.handlers.lock().push((id, handler));
        Ok((FakeMidiInput { id, handlers: self.handlers.clone() }, name))
    }

    fn connect_output(&self, index: usize) -> Result<(FakeMidiOutput, String)> {
        let name = self.outputs.get(index).cloned().ok_or(Error::InvalidIndex {
            kind: "MIDI output",
            index,
            len: self.outputs.len(),
        })?;
        self.live_outputs.fetch_add(1, Ordering::SeqCst);
        Ok((
            FakeMidiOutput {
                live: self.live_outputs.clone(),
                sent: self.sent.clone(),
            },
            name,
        ))
    }
}
