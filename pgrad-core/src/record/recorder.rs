use super::Record;

/// A recorder that stores records and writes aggregated values on flush.
pub trait AggregateRecorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `step` is the x-coordinate of the aggregated values, the number of
    /// completed episodes in [`Trainer`](crate::Trainer).
    fn flush(&mut self, step: i64);
}
