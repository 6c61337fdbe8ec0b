use super::{AggregateRecorder, Record};

/// Buffered recorder.
///
/// Keeps every stored record in memory. Used for inspecting the
/// per-episode records of a run, e.g., in tests.
#[derive(Debug, Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    n_flushes: usize,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been stored.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// How many times [`AggregateRecorder::flush`] was called.
    pub fn n_flushes(&self) -> usize {
        self.n_flushes
    }
}

impl AggregateRecorder for BufferedRecorder {
    fn store(&mut self, record: Record) {
        self.buf.push(record);
    }

    /// Records are kept, only the number of flushes is counted.
    fn flush(&mut self, _step: i64) {
        self.n_flushes += 1;
    }
}
