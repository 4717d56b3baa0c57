//! Shared buffers written from hardware callback threads and read by the UI.
//!
//! Each buffer carries its own lock, held only for the copy or push.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Fixed-length waveform buffer, overwritten from the head on every callback.
pub struct SampleBuffer {
    samples: Mutex<Box<[f32]>>,
}

impl SampleBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            samples: Mutex::new(vec![0.0; len].into_boxed_slice()),
        }
    }

    /// Number of samples held. Never changes after construction.
    pub fn capacity(&self) -> usize {
        self.samples.lock().len()
    }

    /// Copy `min(frames.len(), capacity)` samples to the start of the buffer.
    ///
    /// Samples past the written range keep their previous values.
    /// Returns the number of samples written.
    pub fn write_frames(&self, frames: &[f32]) -> usize {
        let mut samples = self.samples.lock();
        let n = frames.len().min(samples.len());
        samples[..n].copy_from_slice(&frames[..n]);
        n
    }

    /// Copy the current contents into `out`, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut Vec<f32>) {
        let samples = self.samples.lock();
        out.clear();
        out.extend_from_slice(&samples);
    }

    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.snapshot_into(&mut out);
        out
    }
}

/// Capped newest-first log of formatted MIDI messages, plus the last message seen.
pub struct MidiLog {
    entries: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    capacity: usize,
}

impl MidiLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            last: Mutex::new(None),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a message to the front, evicting the oldest entry when full.
    pub fn push(&self, message: String) {
        {
            let mut entries = self.entries.lock();
            if entries.len() == self.capacity {
                entries.pop_back();
            }
            if self.capacity > 0 {
                entries.push_front(message.clone());
            }
        }
        *self.last.lock() = Some(message);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn last_message(&self) -> Option<String> {
        self.last.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        *self.last.lock() = None;
    }
}
