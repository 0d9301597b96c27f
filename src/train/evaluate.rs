use crate::data::source::RecordSource;
use crate::network::network::Network;
use crate::network::unit::SizeMismatch;

/// Aggregate prediction error over a test set. Differences are expressed as
/// `(expected − output) · 100`, so a positive value means the network
/// undershot and a negative one that it overshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalStats {
    /// Number of test records evaluated.
    pub samples: usize,
    /// Largest positive difference seen (worst underestimate by the network).
    pub max_underestimate: f64,
    /// Most negative difference seen (worst overestimate by the network).
    pub max_overestimate: f64,
    /// Mean absolute difference across all records and output units.
    pub average_error: f64,
}

/// Runs the network forward over every record the source yields, without
/// touching weights, and accumulates error statistics.
///
/// An exhausted-from-the-start source produces zeroed stats with
/// `samples == 0` rather than a division by zero.
pub fn evaluate_network<S: RecordSource>(
    network: &mut Network,
    source: &mut S,
) -> Result<EvalStats, SizeMismatch> {
    let mut stats = EvalStats::default();
    let mut total_abs_diff = 0.0;

    while let Some(record) = source.next_record() {
        stats.samples += 1;
        network.calculate_outputs(&record.inputs)?;

        for (unit, expected) in network.output_units.iter().zip(record.expected.iter()) {
            let diff = (expected - unit.output) * 100.0;
            if diff > stats.max_underestimate {
                stats.max_underestimate = diff;
            }
            if diff < stats.max_overestimate {
                stats.max_overestimate = diff;
            }
            total_abs_diff += diff.abs();
        }
    }

    if stats.samples > 0 {
        stats.average_error = total_abs_diff / stats.samples as f64;
    }
    Ok(stats)
}
