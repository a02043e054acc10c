//! Historical population series and the frozen fallback
//!
//! The live source (a statistics API) may fail or return nothing; the runner
//! then substitutes the frozen series below so a forecast is always produced.
//! Values are non-sex-segmented country totals.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// One historical observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub year: i32,
    pub value: f64,
}

/// Source of the historical series, fetched once before computation
pub trait HistoricalDataSource {
    fn fetch(&self) -> Result<Vec<PopulationRecord>>;
}

/// In-memory source backed by a fixed series
#[derive(Debug, Clone)]
pub struct StaticHistory {
    records: Vec<PopulationRecord>,
}

impl StaticHistory {
    pub fn new(records: Vec<PopulationRecord>) -> Self {
        Self { records }
    }
}

impl HistoricalDataSource for StaticHistory {
    fn fetch(&self) -> Result<Vec<PopulationRecord>> {
        if self.records.is_empty() {
            return Err(ForecastError::DataUnavailable(
                "static history holds no records".to_string(),
            ));
        }
        Ok(self.records.clone())
    }
}

/// Frozen Ukraine totals used when the live source degrades
pub fn fallback_series() -> Vec<PopulationRecord> {
    const SERIES: [(i32, f64); 13] = [
        (1990, 51_892_000.0),
        (1995, 51_300_400.0),
        (2000, 49_176_500.0),
        (2005, 47_105_150.0),
        (2010, 45_870_700.0),
        (2013, 45_553_000.0),
        (2014, 45_245_900.0),
        (2015, 42_844_900.0),
        (2018, 42_153_200.0),
        (2020, 41_732_800.0),
        (2021, 41_418_700.0),
        (2022, 41_167_300.0),
        (2023, 41_100_000.0),
    ];

    SERIES
        .iter()
        .map(|&(year, value)| PopulationRecord { year, value })
        .collect()
}

/// Latest observation at or before `base_year`, else the last record
///
/// Tolerates unsorted input; returns None only for an empty series.
pub fn base_population(records: &[PopulationRecord], base_year: i32) -> Option<f64> {
    let mut sorted: Vec<&PopulationRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.year);

    sorted
        .iter()
        .rev()
        .find(|r| r.year <= base_year)
        .or_else(|| sorted.last())
        .map(|r| r.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_series_is_sorted_and_nonempty() {
        let series = fallback_series();
        assert!(!series.is_empty());
        assert!(series.windows(2).all(|w| w[0].year < w[1].year));
    }

    #[test]
    fn test_base_population_picks_latest_at_or_before() {
        let series = fallback_series();
        assert_eq!(base_population(&series, 2023), Some(41_100_000.0));
        assert_eq!(base_population(&series, 2016), Some(42_844_900.0));
    }

    #[test]
    fn test_base_population_before_series_uses_last() {
        let series = fallback_series();
        // No record at or before 1980; fall back to the most recent one
        assert_eq!(base_population(&series, 1980), Some(41_100_000.0));
    }

    #[test]
    fn test_empty_static_history_reports_unavailable() {
        let source = StaticHistory::new(Vec::new());
        assert!(matches!(
            source.fetch(),
            Err(ForecastError::DataUnavailable(_))
        ));
    }
}
