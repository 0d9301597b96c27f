//! Per-iteration network snapshots.
//!
//! The training driver hands a fully stamped network clone (iteration,
//! inputs, expected outputs, and all per-unit transient state) to a sink
//! after error computation and before the weight update, so each snapshot
//! captures the exact state the gradients were derived from.

use std::io;
use std::path::{Path, PathBuf};

use crate::network::network::Network;

/// Receives one network snapshot per training iteration.
pub trait SnapshotSink {
    fn record(&mut self, snapshot: Network) -> io::Result<()>;
}

/// Collects every snapshot in memory, in iteration order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<Network>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink { snapshots: Vec::new() }
    }
}

impl SnapshotSink for MemorySink {
    fn record(&mut self, snapshot: Network) -> io::Result<()> {
        self.snapshots.push(snapshot);
        Ok(())
    }
}

/// Writes every `stride`-th snapshot as a pretty-printed JSON file
/// `iteration_<n>.json` under `dir`. A stride of 1 keeps everything;
/// larger strides thin out long training runs.
pub struct JsonDirSink {
    dir: PathBuf,
    stride: usize,
}

impl JsonDirSink {
    /// Creates the sink, creating `dir` if needed. `stride` of 0 is treated
    /// as 1.
    pub fn new(dir: impl AsRef<Path>, stride: usize) -> io::Result<JsonDirSink> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(JsonDirSink { dir, stride: stride.max(1) })
    }
}

impl SnapshotSink for JsonDirSink {
    fn record(&mut self, snapshot: Network) -> io::Result<()> {
        if snapshot.iteration % self.stride != 0 {
            return Ok(());
        }
        let path = self.dir.join(format!("iteration_{}.json", snapshot.iteration));
        let file = std::fs::File::create(path)?;
        let writer = io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::network::tests::fixed_3_2_1;

    #[test]
    fn memory_sink_keeps_iteration_order() {
        let mut sink = MemorySink::new();
        for i in 1..=3 {
            let mut snapshot = fixed_3_2_1();
            snapshot.iteration = i;
            sink.record(snapshot).unwrap();
        }
        let iterations: Vec<usize> = sink.snapshots.iter().map(|n| n.iteration).collect();
        assert_eq!(iterations, vec![1, 2, 3]);
    }

    #[test]
    fn json_dir_sink_honors_stride() {
        let dir = std::env::temp_dir().join("shallow_nn_sink_stride_test");
        let _ = std::fs::remove_dir_all(&dir);
        let mut sink = JsonDirSink::new(&dir, 2).unwrap();

        for i in 1..=4 {
            let mut snapshot = fixed_3_2_1();
            snapshot.iteration = i;
            sink.record(snapshot).unwrap();
        }

        assert!(!dir.join("iteration_1.json").exists());
        assert!(dir.join("iteration_2.json").exists());
        assert!(!dir.join("iteration_3.json").exists());
        assert!(dir.join("iteration_4.json").exists());

        let written = Network::load_json(dir.join("iteration_2.json").to_str().unwrap()).unwrap();
        assert_eq!(written.iteration, 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
