//! MIDI input/output port lifecycle and message formatting.

use std::sync::Arc;

use crate::buffers::MidiLog;
use crate::config::AppConfig;
use crate::error::Result;

/// Prefix for messages received on the input port.
pub const INPUT_TAG: &str = "IN:";

/// Callback invoked on the MIDI thread with `(timestamp_us, bytes)`.
pub type MidiHandler = Box<dyn FnMut(u64, &[u8]) + Send + 'static>;

/// An open port connection. Dropping it also closes the port.
pub trait MidiConnection {
    fn close(self);
}

/// An open output connection.
pub trait MidiSender: MidiConnection {
    fn send(&mut self, message: &[u8]) -> Result<()>;
}

/// MIDI subsystem seam: port listing and connection.
pub trait MidiBackend {
    type Input: MidiConnection;
    type Output: MidiSender;

    /// Input port names, in port index order.
    fn input_ports(&self) -> Result<Vec<String>>;

    /// Output port names, in port index order.
    fn output_ports(&self) -> Result<Vec<String>>;

    /// Connect to input port `index` with every message type enabled.
    /// Returns the connection and the port's name.
    fn connect_input(&self, index: usize, handler: MidiHandler) -> Result<(Self::Input, String)>;

    fn connect_output(&self, index: usize) -> Result<(Self::Output, String)>;
}

/// Format raw bytes as `"IN: 144 60 100"`.
pub fn format_message(data: &[u8]) -> String {
    let mut out = String::from(INPUT_TAG);
    for byte in data {
        out.push(' ');
        out.push_str(&byte.to_string());
    }
    out
}

/// Note-on message for a 1-based MIDI channel.
#[inline]
fn note_on(channel: u8, note: u8, velocity: u8) -> [u8; 3] {
    [0x90 | (channel.saturating_sub(1) & 0x0F), note & 0x7F, velocity & 0x7F]
}

#[inline]
fn note_off(channel: u8, note: u8) -> [u8; 3] {
    [0x80 | (channel.saturating_sub(1) & 0x0F), note & 0x7F, 0]
}

struct OpenPort<C> {
    conn: C,
    name: String,
}

/// Manages one MIDI input port and one MIDI output port.
pub struct MidiPortManager<B: MidiBackend> {
    backend: B,
    log: Arc<MidiLog>,
    input: Option<OpenPort<B::Input>>,
    output: Option<OpenPort<B::Output>>,
    test_note: u8,
    test_velocity: u8,
}

impl<B: MidiBackend> MidiPortManager<B> {
    pub fn new(backend: B, log: Arc<MidiLog>, config: &AppConfig) -> Self {
        Self {
            backend,
            log,
            input: None,
            output: None,
            test_note: config.test_note,
            test_velocity: config.test_velocity,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn log(&self) -> &Arc<MidiLog> {
        &self.log
    }

    /// Close any open input, then connect to input port `index`.
    ///
    /// Each received message is formatted and pushed onto the log.
    pub fn open_input(&mut self, index: usize) -> Result<()> {
        self.close_input();

        let log = self.log.clone();
        let handler: MidiHandler = Box::new(move |_timestamp, data| {
            log.push(format_message(data));
        });
        let (conn, name) = self.backend.connect_input(index, handler)?;

        log::info!("[MidiPorts] Input connected: {name} (#{index})");
        self.input = Some(OpenPort { conn, name });
        Ok(())
    }

    /// Close any open output, then connect to output port `index`.
    pub fn open_output(&mut self, index: usize) -> Result<()> {
        self.close_output();

        let (conn, name) = self.backend.connect_output(index)?;

        log::info!("[MidiPorts] Output connected: {name} (#{index})");
        self.output = Some(OpenPort { conn, name });
        Ok(())
    }

    pub fn close_input(&mut self) {
        if let Some(port) = self.input.take() {
            port.conn.close();
            log::info!("[MidiPorts] Input closed: {}", port.name);
        }
    }

    pub fn close_output(&mut self) {
        if let Some(port) = self.output.take() {
            port.conn.close();
            log::info!("[MidiPorts] Output closed: {}", port.name);
        }
    }

    /// Send note-on then note-off on channel 1 to the open output.
    ///
    /// Returns `Ok(false)` without sending when no output is open.
    pub fn send_test_message(&mut self) -> Result<bool> {
        let Some(port) = self.output.as_mut() else {
            log::debug!("[MidiPorts] No output port open; test note skipped");
            return Ok(false);
        };
        port.conn.send(&note_on(1, self.test_note, self.test_velocity))?;
        port.conn.send(&note_off(1, self.test_note))?;
        log::debug!("[MidiPorts] Test note {} sent to {}", self.test_note, port.name);
        Ok(true)
    }
}
