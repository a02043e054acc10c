//! External factor data: macro indicators, historical series and region tables

mod history;
mod indicators;
pub mod loader;
mod regions;

pub use history::{
    base_population, fallback_series, HistoricalDataSource, PopulationRecord, StaticHistory,
};
pub use indicators::{MacroFactorsProvider, MacroIndicators, StaticMacroFactors};
pub use loader::LoadedFactors;
pub use regions::{GenderRatioTable, RegionCoefficientTable, RegionEntry};

use std::path::Path;

/// Container for all forecast factor data
#[derive(Debug, Clone)]
pub struct Factors {
    pub macros: MacroIndicators,
    pub regions: RegionCoefficientTable,
    pub gender_ratios: GenderRatioTable,
    pub history: Vec<PopulationRecord>,
}

impl Factors {
    /// Built-in factor data matching the published reference tables
    pub fn default_reference() -> Self {
        Self {
            macros: MacroIndicators::default(),
            regions: RegionCoefficientTable::default_ukraine(),
            gender_ratios: GenderRatioTable::default_ukraine(),
            history: fallback_series(),
        }
    }

    /// Load factor data from CSV files in the default location (data/factors/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_FACTORS_PATH))
    }

    /// Load factor data from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedFactors::load_from(path)?;

        Ok(Self {
            macros: MacroIndicators::default(),
            regions: RegionCoefficientTable::from_loaded(&loaded),
            gender_ratios: GenderRatioTable::from_loaded(&loaded),
            history: loaded.historical_population,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_factors_match_builtin_tables() {
        let from_csv = Factors::from_csv().expect("Failed to load factors from CSV");
        let builtin = Factors::default_reference();

        assert_eq!(
            from_csv.regions.entries().len(),
            builtin.regions.entries().len()
        );
        assert_eq!(from_csv.history.len(), builtin.history.len());
        assert_eq!(
            from_csv.gender_ratios.male_share("UA-30"),
            builtin.gender_ratios.male_share("UA-30")
        );
    }
}
