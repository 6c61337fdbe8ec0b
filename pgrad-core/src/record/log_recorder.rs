use super::{AggregateRecorder, Record, RecordStorage, RecordValue};
use log::info;

/// Writes aggregated records through [`log::info!`].
///
/// Records passed to [`AggregateRecorder::store`] are kept in a
/// [`RecordStorage`] until the next flush, then summarized in a single line
/// with keys sorted alphabetically.
#[derive(Debug, Default)]
pub struct LogRecorder {
    storage: RecordStorage,
}

impl LogRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn format(record: &Record) -> String {
        let mut items: Vec<_> = record
            .iter()
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}={:.4}", k, v),
                RecordValue::Array1(v) => format!("{}={:?}", k, v),
                RecordValue::String(s) => format!("{}={}", k, s),
            })
            .collect();
        items.sort();
        items.join(", ")
    }
}

impl AggregateRecorder for LogRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let record = self.storage.aggregate();
        info!("episode {}: {}", step, Self::format(&record));
    }
}
