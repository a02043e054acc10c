//! Baseline growth-rate estimation from a noisy historical series
//!
//! Pairwise log-growth rates over a lookback window, combined with
//! exponentially recency-weighted averaging. Sparse series fall back to a
//! two-point calculation.

use crate::factors::PopulationRecord;

/// Estimates the annual baseline growth rate from historical observations
#[derive(Debug, Clone)]
pub struct GrowthRateEstimator {
    /// Years of history considered, counted back from the base year
    pub lookback_years: u32,
}

impl Default for GrowthRateEstimator {
    fn default() -> Self {
        Self { lookback_years: 30 }
    }
}

impl GrowthRateEstimator {
    pub fn new(lookback_years: u32) -> Self {
        Self { lookback_years }
    }

    /// Estimate the annual growth rate as of `base_year`
    ///
    /// The series may arrive unsorted. The result can still be non-finite for
    /// pathological inputs; the caller guards against that.
    pub fn estimate(&self, records: &[PopulationRecord], base_year: i32) -> f64 {
        let mut sorted: Vec<PopulationRecord> = records.to_vec();
        sorted.sort_by_key(|r| r.year);

        let earliest = base_year - self.lookback_years as i32;
        let window: Vec<&PopulationRecord> = sorted
            .iter()
            .filter(|r| r.year >= earliest && r.year <= base_year)
            .collect();

        if window.len() >= 3 {
            let rates: Vec<f64> = window
                .windows(2)
                .map(|pair| pairwise_rate(pair[0], pair[1]))
                .filter(|r| r.is_finite())
                .collect();

            if rates.len() >= 3 {
                return recency_weighted_mean(&rates);
            }
        }

        two_point_rate(&sorted, base_year)
    }
}

/// Annualized log growth between two consecutive observations
///
/// Values are floored at 1 before taking logs to avoid domain errors.
fn pairwise_rate(from: &PopulationRecord, to: &PopulationRecord) -> f64 {
    let years = (to.year - from.year).max(1) as f64;
    (to.value.max(1.0) / from.value.max(1.0)).ln() / years
}

/// Weighted mean where the k-th rate (1-indexed from oldest) weighs exp(k/n)
fn recency_weighted_mean(rates: &[f64]) -> f64 {
    let n = rates.len() as f64;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for (i, rate) in rates.iter().enumerate() {
        let weight = ((i + 1) as f64 / n).exp();
        weighted_sum += weight * rate;
        weight_sum += weight;
    }

    weighted_sum / weight_sum
}

/// Two-point fallback for sparse series
///
/// Base point: latest observation at or before `base_year`. Comparison point:
/// the nearest later observation, or the second-to-last one if nothing is
/// later, or the base point itself for a single-record series.
fn two_point_rate(sorted: &[PopulationRecord], base_year: i32) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return 0.0;
    }

    let base_idx = sorted
        .iter()
        .rposition(|r| r.year <= base_year)
        .unwrap_or(0);

    let cmp_idx = if base_idx + 1 < sorted.len() {
        base_idx + 1
    } else {
        sorted.len() - 2
    };

    let base = &sorted[base_idx];
    let comparison = &sorted[cmp_idx];

    let delta = comparison.year - base.year;
    if delta == 0 {
        return 0.0;
    }

    (comparison.value.max(1.0) / base.value.max(1.0)).ln() / delta as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(year: i32, value: f64) -> PopulationRecord {
        PopulationRecord { year, value }
    }

    #[test]
    fn test_two_point_estimate_matches_log_growth() {
        let records = vec![record(2010, 40_000_000.0), record(2020, 44_000_000.0)];
        let estimator = GrowthRateEstimator::default();

        let rate = estimator.estimate(&records, 2020);
        let expected = (44.0_f64 / 40.0).ln() / 10.0;
        assert_relative_eq!(rate, expected, epsilon = 1e-10);
        assert_relative_eq!(rate, 0.00953, epsilon = 1e-5);
    }

    #[test]
    fn test_weighted_mean_favors_recent_rates() {
        // Old decline, recent growth; the weighted mean leans positive
        let records = vec![
            record(2000, 50_000_000.0),
            record(2005, 48_000_000.0),
            record(2010, 47_000_000.0),
            record(2015, 47_500_000.0),
            record(2020, 48_500_000.0),
        ];
        let estimator = GrowthRateEstimator::default();
        let weighted = estimator.estimate(&records, 2020);

        let rates: Vec<f64> = records
            .windows(2)
            .map(|p| pairwise_rate(&p[0], &p[1]))
            .collect();
        let unweighted: f64 = rates.iter().sum::<f64>() / rates.len() as f64;

        assert!(weighted > unweighted);
    }

    #[test]
    fn test_unsorted_input_is_tolerated() {
        let records = vec![record(2020, 44_000_000.0), record(2010, 40_000_000.0)];
        let estimator = GrowthRateEstimator::default();
        let rate = estimator.estimate(&records, 2020);
        assert_relative_eq!(rate, (44.0_f64 / 40.0).ln() / 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lookback_window_excludes_old_points() {
        // Points before base_year - lookback never enter the weighted path
        let records = vec![
            record(1950, 35_000_000.0),
            record(1960, 38_000_000.0),
            record(2010, 40_000_000.0),
            record(2020, 44_000_000.0),
        ];
        let estimator = GrowthRateEstimator::new(30);
        let rate = estimator.estimate(&records, 2020);
        assert_relative_eq!(rate, (44.0_f64 / 40.0).ln() / 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_single_point_yields_zero() {
        let records = vec![record(2020, 41_000_000.0)];
        let estimator = GrowthRateEstimator::default();
        assert_eq!(estimator.estimate(&records, 2020), 0.0);
    }

    #[test]
    fn test_empty_series_yields_zero() {
        let estimator = GrowthRateEstimator::default();
        assert_eq!(estimator.estimate(&[], 2020), 0.0);
    }

    #[test]
    fn test_base_point_beyond_series_uses_trailing_pair() {
        // Base year after the last record: base point is the last record,
        // comparison is the second-to-last
        let records = vec![
            record(2000, 49_000_000.0),
            record(2010, 46_000_000.0),
        ];
        let estimator = GrowthRateEstimator::default();
        let rate = estimator.estimate(&records, 2030);
        let expected = (49.0_f64 / 46.0).ln() / -10.0;
        assert_relative_eq!(rate, expected, epsilon = 1e-10);
    }
}
