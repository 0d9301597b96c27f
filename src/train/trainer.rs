use std::fmt;
use std::io;

use crate::data::source::RecordSource;
use crate::network::network::Network;
use crate::network::unit::SizeMismatch;
use crate::snapshot::sink::SnapshotSink;

/// Errors that abort a training run. Any error is fatal to the run; no
/// record is skipped or retried.
#[derive(Debug)]
pub enum TrainError {
    /// An input vector did not match a unit's weight count.
    Shape(SizeMismatch),
    /// The snapshot sink failed to record an iteration.
    Snapshot(io::Error),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Shape(e) => write!(f, "shape mismatch: {}", e),
            TrainError::Snapshot(e) => write!(f, "snapshot sink error: {}", e),
        }
    }
}

impl std::error::Error for TrainError {}

impl From<SizeMismatch> for TrainError {
    fn from(e: SizeMismatch) -> TrainError {
        TrainError::Shape(e)
    }
}

impl From<io::Error> for TrainError {
    fn from(e: io::Error) -> TrainError {
        TrainError::Snapshot(e)
    }
}

/// Trains `network` online over every record the source yields, one weight
/// update per sample, and returns the number of iterations run.
///
/// Per record: forward pass, error computation, snapshot, weight update.
/// The snapshot is a clone taken *before* the update and stamped with the
/// 1-based iteration number and the sample it was computed from, so it
/// records the state the gradients belong to.
pub fn train_network<S, K>(
    network: &mut Network,
    source: &mut S,
    sink: &mut K,
) -> Result<usize, TrainError>
where
    S: RecordSource,
    K: SnapshotSink,
{
    let mut iteration = 0;

    while let Some(record) = source.next_record() {
        iteration += 1;

        network.calculate_outputs(&record.inputs)?;
        network.calculate_error(&record.inputs, &record.expected);

        let mut snapshot = network.clone();
        snapshot.iteration = iteration;
        snapshot.inputs = record.inputs;
        snapshot.expected_outputs = record.expected;
        sink.record(snapshot)?;

        network.update_weights_based_on_error();
    }

    Ok(iteration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::{MemorySource, TrainingRecord};
    use crate::network::network::tests::fixed_3_2_1;
    use crate::snapshot::sink::MemorySink;

    fn three_records() -> MemorySource {
        MemorySource::new(vec![
            TrainingRecord::new(vec![1.0, 0.5, 0.0], vec![1.0]),
            TrainingRecord::new(vec![0.0, 0.5, 1.0], vec![0.0]),
            TrainingRecord::new(vec![0.2, 0.2, 0.2], vec![0.5]),
        ])
    }

    #[test]
    fn runs_once_per_record_and_snapshots_each_iteration() {
        let mut network = fixed_3_2_1();
        let mut source = three_records();
        let mut sink = MemorySink::new();

        let iterations = train_network(&mut network, &mut source, &mut sink).unwrap();

        assert_eq!(iterations, 3);
        assert_eq!(sink.snapshots.len(), 3);
        for (i, snapshot) in sink.snapshots.iter().enumerate() {
            assert_eq!(snapshot.iteration, i + 1);
        }
        assert_eq!(sink.snapshots[0].inputs, vec![1.0, 0.5, 0.0]);
        assert_eq!(sink.snapshots[1].expected_outputs, vec![0.0]);
    }

    #[test]
    fn snapshot_precedes_weight_update() {
        let mut network = fixed_3_2_1();
        let mut source = MemorySource::new(vec![
            TrainingRecord::new(vec![1.0, 0.5, 0.0], vec![1.0]),
        ]);
        let mut sink = MemorySink::new();

        train_network(&mut network, &mut source, &mut sink).unwrap();

        // The first snapshot still holds the initial weights.
        let snapshot = &sink.snapshots[0];
        assert_eq!(snapshot.hidden_units[0].weights[0].value, 0.1);
        assert_eq!(snapshot.output_units[0].weights[0].value, 0.4);
        // But carries the gradients computed for this sample.
        assert!(snapshot.output_units[0].error_gradient > 0.0);
        // The live network has moved on.
        assert!(network.hidden_units[0].weights[0].value > 0.1);
    }

    #[test]
    fn trained_network_keeps_no_iteration_metadata() {
        let mut network = fixed_3_2_1();
        let mut source = three_records();
        let mut sink = MemorySink::new();

        train_network(&mut network, &mut source, &mut sink).unwrap();

        // Iteration stamping is snapshot-only; the live network is untouched.
        assert_eq!(network.iteration, 0);
        assert!(network.inputs.is_empty());
        assert!(network.expected_outputs.is_empty());
    }

    #[test]
    fn empty_source_trains_zero_iterations() {
        let mut network = fixed_3_2_1();
        let mut source = MemorySource::new(Vec::new());
        let mut sink = MemorySink::new();

        let iterations = train_network(&mut network, &mut source, &mut sink).unwrap();
        assert_eq!(iterations, 0);
        assert!(sink.snapshots.is_empty());
    }

    #[test]
    fn bad_record_aborts_the_run() {
        let mut network = fixed_3_2_1();
        let mut source = MemorySource::new(vec![
            TrainingRecord::new(vec![1.0, 0.5], vec![1.0]),
        ]);
        let mut sink = MemorySink::new();

        let err = train_network(&mut network, &mut source, &mut sink).unwrap_err();
        assert!(matches!(err, TrainError::Shape(SizeMismatch { expected: 3, got: 2 })));
        assert!(sink.snapshots.is_empty());
    }
}
