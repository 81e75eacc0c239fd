//! `StateBuffer` — the bounded internal-state byte buffer.
//!
//! Append is sliding-window FIFO: when an append would exceed capacity, the
//! oldest bytes are dropped from the front.  The buffer doubles as the skill
//! vector (leading bytes) and as the substrate for all information transfer.

/// A bounded byte buffer with sliding-window append semantics.
///
/// Invariant: `len() <= capacity()` at all times.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StateBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl StateBuffer {
    /// An empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        StateBuffer { data: Vec::new(), capacity }
    }

    /// A buffer holding `bytes`, truncated to `capacity` if oversize.
    pub fn from_bytes(bytes: Vec<u8>, capacity: usize) -> Self {
        let mut buf = StateBuffer { data: bytes, capacity };
        buf.data.truncate(capacity);
        buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view, for in-place entropy (byte nudges, bit flips).
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte at `index`, if present.
    #[inline]
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Append `bytes`, dropping the oldest bytes if the total would exceed
    /// capacity (sliding window).  Appending more than a full capacity keeps
    /// only the trailing `capacity` bytes of the input.
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        if self.data.len() > self.capacity {
            let excess = self.data.len() - self.capacity;
            self.data.drain(..excess);
        }
    }

    /// Replace the contents, truncating to capacity if oversize.
    pub fn set_data(&mut self, bytes: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(&bytes[..bytes.len().min(self.capacity)]);
    }

    /// Fraction of capacity in use, in `[0, 1]`.
    pub fn fill_rate(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.data.len() as f64 / self.capacity as f64
        }
    }

    /// Mean byte value normalized to `[0, 1]`; 0 for an empty buffer.
    pub fn mean_byte(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&b| b as u64).sum();
        sum as f64 / self.data.len() as f64 / 255.0
    }
}
