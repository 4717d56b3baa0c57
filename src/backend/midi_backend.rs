//! MIDI backend using midir — port enumeration, input and output connections.

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use crate::error::{Error, Result};
use crate::midi::{MidiBackend, MidiConnection, MidiHandler, MidiSender};

/// Creates a fresh midir client per probe or connection.
pub struct MidirBackend {
    client_name: String,
}

impl MidirBackend {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

/// Open midir input connection.
pub struct MidirInput(MidiInputConnection<()>);

impl MidiConnection for MidirInput {
    fn close(self) {
        let _ = self.0.close();
    }
}

/// Open midir output connection.
pub struct MidirOutput(MidiOutputConnection);

impl MidiConnection for MidirOutput {
    fn close(self) {
        let _ = self.0.close();
    }
}

impl MidiSender for MidirOutput {
    fn send(&mut self, message: &[u8]) -> Result<()> {
        self.0.send(message)?;
        Ok(())
    }
}

/// Port names by index. Unnamed ports get a placeholder so indices stay aligned.
fn port_names<P>(ports: &[P], name_of: impl Fn(&P) -> Option<String>) -> Vec<String> {
    ports
        .iter()
        .enumerate()
        .map(|(i, p)| name_of(p).unwrap_or_else(|| format!("Port {i}")))
        .collect()
}

impl MidiBackend for MidirBackend {
    type Input = MidirInput;
    type Output = MidirOutput;

    fn input_ports(&self) -> Result<Vec<String>> {
        let midi_in = MidiInput::new(&format!("{} probe", self.client_name))?;
        Ok(port_names(&midi_in.ports(), |p| midi_in.port_name(p).ok()))
    }

    fn output_ports(&self) -> Result<Vec<String>> {
        let midi_out = MidiOutput::new(&format!("{} probe", self.client_name))?;
        Ok(port_names(&midi_out.ports(), |p| midi_out.port_name(p).ok()))
    }

    fn connect_input(&self, index: usize, mut handler: MidiHandler) -> Result<(MidirInput, String)> {
        let mut midi_in = MidiInput::new(&self.client_name)?;
        // Deliver sysex, timing and active sensing too.
        midi_in.ignore(Ignore::None);

        let ports = midi_in.ports();
        let port = ports.get(index).ok_or(Error::InvalidIndex {
            kind: "MIDI input",
            index,
            len: ports.len(),
        })?;
        let name = midi_in
            .port_name(port)
            .unwrap_or_else(|_| format!("Port {index}"));

        let connection = midi_in.connect(
            port,
            &format!("{} input", self.client_name),
            move |timestamp, data, _| handler(timestamp, data),
            (),
        )?;
        Ok((MidirInput(connection), name))
    }

    fn connect_output(&self, index: usize) -> Result<(MidirOutput, String)> {
        let midi_out = MidiOutput::new(&self.client_name)?;

        let ports = midi_out.ports();
        let port = ports.get(index).ok_or(Error::InvalidIndex {
            kind: "MIDI output",
            index,
            len: ports.len(),
        })?;
        let name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| format!("Port {index}"));

        let connection = midi_out.connect(port, &format!("{} output", self.client_name))?;
        Ok((MidirOutput(connection), name))
    }
}
