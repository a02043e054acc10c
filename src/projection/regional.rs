//! Regional distribution of a total population figure

use serde::{Deserialize, Serialize};

use crate::factors::{GenderRatioTable, RegionCoefficientTable};

/// Forecast slice for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionForecast {
    pub code: String,
    pub region: String,
    pub label: String,
    pub population: f64,
    pub male: f64,
    pub female: f64,
    pub percent: f64,
    pub year: i32,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Splits a country total across the static region table
pub struct RegionalDistributor<'a> {
    coefficients: &'a RegionCoefficientTable,
    gender_ratios: &'a GenderRatioTable,
}

impl<'a> RegionalDistributor<'a> {
    pub fn new(
        coefficients: &'a RegionCoefficientTable,
        gender_ratios: &'a GenderRatioTable,
    ) -> Self {
        Self {
            coefficients,
            gender_ratios,
        }
    }

    /// Distribute `total` across all configured regions for `year`
    ///
    /// Region bounds scale proportionally from the overall bounds when given,
    /// otherwise each region gets a ±3% band of its own share.
    pub fn distribute(
        &self,
        total: f64,
        year: i32,
        bounds: Option<(f64, f64)>,
    ) -> Vec<RegionForecast> {
        let total_coefficient = self.coefficients.total_coefficient();
        if self.coefficients.is_empty() || total_coefficient <= 0.0 {
            return Vec::new();
        }

        self.coefficients
            .entries()
            .iter()
            .map(|entry| {
                let share = entry.coefficient / total_coefficient;
                let population = (total * share).round();

                let male_share = self.gender_ratios.male_share(&entry.code);
                let male = (population * male_share).round();
                let female = population - male;

                let (lower, upper) = match bounds {
                    Some((lo, hi)) => ((lo * share).round(), (hi * share).round()),
                    None => (
                        (population * 0.97).round(),
                        (population * 1.03).round(),
                    ),
                };

                RegionForecast {
                    code: entry.code.clone(),
                    region: entry.region.clone(),
                    label: entry.label.clone(),
                    population,
                    male,
                    female,
                    percent: (share * 10_000.0).round() / 100.0,
                    year,
                    lower_bound: lower,
                    upper_bound: upper,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> (RegionCoefficientTable, GenderRatioTable) {
        (
            RegionCoefficientTable::default_ukraine(),
            GenderRatioTable::default_ukraine(),
        )
    }

    #[test]
    fn test_population_sum_within_rounding_tolerance() {
        let (coefficients, ratios) = tables();
        let distributor = RegionalDistributor::new(&coefficients, &ratios);

        let total = 41_100_000.0;
        let regions = distributor.distribute(total, 2030, None);

        let sum: f64 = regions.iter().map(|r| r.population).sum();
        let tolerance = regions.len() as f64;
        assert!(
            (sum - total).abs() <= tolerance,
            "sum {sum} deviates from {total} by more than {tolerance}"
        );
    }

    #[test]
    fn test_percent_sum_near_hundred() {
        let (coefficients, ratios) = tables();
        let distributor = RegionalDistributor::new(&coefficients, &ratios);

        let regions = distributor.distribute(41_100_000.0, 2030, None);
        let percent_sum: f64 = regions.iter().map(|r| r.percent).sum();
        assert!((percent_sum - 100.0).abs() <= 0.1, "percent sum {percent_sum}");
    }

    #[test]
    fn test_gender_split_preserves_population() {
        let (coefficients, ratios) = tables();
        let distributor = RegionalDistributor::new(&coefficients, &ratios);

        for region in distributor.distribute(41_100_000.0, 2030, None) {
            assert_eq!(region.male + region.female, region.population);
            assert!(region.male < region.female, "{}", region.code);
        }
    }

    #[test]
    fn test_bounds_scale_from_overall_bounds() {
        let (coefficients, ratios) = tables();
        let distributor = RegionalDistributor::new(&coefficients, &ratios);

        let total = 41_100_000.0;
        let regions = distributor.distribute(total, 2030, Some((total * 0.95, total * 1.05)));

        for region in &regions {
            assert!(region.lower_bound < region.population);
            assert!(region.upper_bound > region.population);
            // A 5% overall band stays a 5% regional band
            let ratio = region.lower_bound / region.population;
            assert!((ratio - 0.95).abs() < 0.001, "{}", region.code);
        }
    }

    #[test]
    fn test_empty_table_distributes_nothing() {
        let coefficients = RegionCoefficientTable::new(Vec::new());
        let ratios = GenderRatioTable::default_ukraine();
        let distributor = RegionalDistributor::new(&coefficients, &ratios);

        assert!(distributor.distribute(41_100_000.0, 2030, None).is_empty());
    }
}
