//! CSV-based factor loader
//!
//! Loads region weights, gender ratios and the historical series from CSV
//! files in data/factors/

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::history::PopulationRecord;
use super::regions::RegionEntry;

/// Default path to the factors directory
pub const DEFAULT_FACTORS_PATH: &str = "data/factors";

/// Load region coefficients from CSV
/// Columns: code, region, label, coefficient
pub fn load_region_coefficients(path: &Path) -> Result<Vec<RegionEntry>, Box<dyn Error>> {
    let file = File::open(path.join("region_coefficients.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result?;
        entries.push(RegionEntry {
            code: record[0].to_string(),
            region: record[1].to_string(),
            label: record[2].to_string(),
            coefficient: record[3].parse()?,
        });
    }

    Ok(entries)
}

/// Load gender ratios from CSV
/// Columns: code, male_share
pub fn load_gender_ratios(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path.join("gender_ratios.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut ratios = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let code = record[0].to_string();
        let share: f64 = record[1].parse()?;
        ratios.insert(code, share);
    }

    Ok(ratios)
}

/// Load the historical population series from CSV
/// Columns: year, value
pub fn load_historical_population(path: &Path) -> Result<Vec<PopulationRecord>, Box<dyn Error>> {
    let file = File::open(path.join("historical_population.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;
        records.push(PopulationRecord {
            year: record[0].parse()?,
            value: record[1].parse()?,
        });
    }

    Ok(records)
}

/// All factor data loaded from one directory
pub struct LoadedFactors {
    pub region_coefficients: Vec<RegionEntry>,
    pub gender_ratios: HashMap<String, f64>,
    pub historical_population: Vec<PopulationRecord>,
}

impl LoadedFactors {
    /// Load all factor files from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_FACTORS_PATH))
    }

    /// Load all factor files from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            region_coefficients: load_region_coefficients(path)?,
            gender_ratios: load_gender_ratios(path)?,
            historical_population: load_historical_population(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_factors() {
        let result = LoadedFactors::load_default();
        assert!(
            result.is_ok(),
            "Failed to load factors: {:?}",
            result.as_ref().err()
        );

        let factors = result.unwrap();

        assert_eq!(factors.region_coefficients.len(), 25);
        assert!(!factors.gender_ratios.is_empty());
        assert!(factors.historical_population.len() >= 10);
        assert!(factors
            .historical_population
            .iter()
            .any(|r| r.year == 2023 && r.value > 40_000_000.0));
    }
}
