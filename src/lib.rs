pub mod data;
pub mod network;
pub mod snapshot;
pub mod train;

// Convenience re-exports
pub use data::csv::{load_csv, parse_csv, CsvParseError};
pub use data::source::{MemorySource, RecordSource, TrainingRecord};
pub use network::network::Network;
pub use network::unit::{SizeMismatch, Unit, Weight, LEARNING_RATE};
pub use snapshot::sink::{JsonDirSink, MemorySink, SnapshotSink};
pub use train::evaluate::{evaluate_network, EvalStats};
pub use train::trainer::{train_network, TrainError};
