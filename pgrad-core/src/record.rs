//! Types and traits for recording training metrics.
//!
//! * [`Record`] - A container of key-value pairs
//! * [`RecordValue`] - Types of values that can be stored in a record
//! * [`AggregateRecorder`] - Destination of records
//! * [`RecordStorage`] - Aggregation of scalar values into statistics
//! * [`BufferedRecorder`] - Keeps records in memory
//! * [`LogRecorder`] - Writes aggregated records through the `log` facade
//! * [`NullRecorder`] - Discards all records
//!
//! ```rust
//! use pgrad_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(3.0));
//! record.insert("performance", RecordValue::Scalar(4.5));
//! assert_eq!(record.get_scalar("performance").unwrap(), 4.5);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::AggregateRecorder;
pub use storage::RecordStorage;
