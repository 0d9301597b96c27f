/// One training or test example: an input vector and its expected outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub inputs: Vec<f64>,
    pub expected: Vec<f64>,
}

impl TrainingRecord {
    pub fn new(inputs: Vec<f64>, expected: Vec<f64>) -> TrainingRecord {
        TrainingRecord { inputs, expected }
    }
}

/// An ordered, finite sequence of records consumed one at a time. The
/// training driver is agnostic to where records come from; it calls
/// `next_record` until `None`.
pub trait RecordSource {
    fn next_record(&mut self) -> Option<TrainingRecord>;
}

/// In-memory record source. Restartable via `rewind`, which the concrete
/// type offers rather than the trait since not every source can replay.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<TrainingRecord>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(records: Vec<TrainingRecord>) -> MemorySource {
        MemorySource { records, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Restarts iteration from the first record.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl RecordSource for MemorySource {
    fn next_record(&mut self) -> Option<TrainingRecord> {
        let record = self.records.get(self.cursor).cloned();
        if record.is_some() {
            self.cursor += 1;
        }
        record
    }
}
