//! Probe-length statistics for a `ProbingMap`

use std::fmt;

/// Summary of how far stored keys sit from their ideal slot.
///
/// A probe length of 1 means the key occupies its ideal slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStats {
    /// Number of stored entries
    pub entries: usize,
    /// Average number of slots inspected per successful lookup
    pub mean_probe_length: f64,
    /// Largest number of slots inspected by any successful lookup
    pub max_probe_length: usize,
    /// Ratio of occupied slots to capacity
    pub load: f64,
}

impl ProbeStats {
    /// Folds per-key probe lengths into a summary
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub(crate) fn collect<I>(probe_lengths: I, load: f64) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let (entries, total, max_probe_length) = probe_lengths
            .into_iter()
            .fold((0_usize, 0_usize, 0_usize), |(entries, total, max), length| {
                (entries.saturating_add(1), total.saturating_add(length), max.max(length))
            });
        let mean_probe_length = if entries == 0 { 0.0 } else { total as f64 / entries as f64 };

        Self { entries, mean_probe_length, max_probe_length, load }
    }
}

impl fmt::Display for ProbeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries, load {:.2}, mean probes {:.2}, worst {}",
            self.entries, self.load, self.mean_probe_length, self.max_probe_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_empty() {
        let stats = ProbeStats::collect(Vec::new(), 0.0);
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.max_probe_length, 0);
        assert!(stats.mean_probe_length.abs() < f64::EPSILON);
    }

    #[test]
    fn test_collect_lengths() {
        let stats = ProbeStats::collect(vec![1, 1, 4], 0.5);
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.max_probe_length, 4);
        assert!((stats.mean_probe_length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let stats = ProbeStats::collect(vec![1, 2], 0.25);
        assert_eq!(stats.to_string(), "2 entries, load 0.25, mean probes 1.50, worst 2");
    }
}
