//! Static per-region weight and gender-ratio tables

use std::collections::HashMap;

use super::loader::LoadedFactors;

/// Relative demographic/economic weight of one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry {
    /// ISO 3166-2 style code, e.g. "UA-30"
    pub code: String,

    /// Machine-friendly slug, e.g. "kyiv-city"
    pub region: String,

    /// Display label
    pub label: String,

    /// Relative weight within the country total
    pub coefficient: f64,
}

/// Static region weighting table
#[derive(Debug, Clone, Default)]
pub struct RegionCoefficientTable {
    entries: Vec<RegionEntry>,
}

/// Oblast-level weights, roughly proportional to pre-2022 population (millions)
const UKRAINE_REGIONS: [(&str, &str, &str, f64); 25] = [
    ("UA-05", "vinnytsia", "Вінницька область", 1.50),
    ("UA-07", "volyn", "Волинська область", 1.02),
    ("UA-09", "luhansk", "Луганська область", 2.10),
    ("UA-12", "dnipro", "Дніпропетровська область", 3.10),
    ("UA-14", "donetsk", "Донецька область", 4.06),
    ("UA-18", "zhytomyr", "Житомирська область", 1.19),
    ("UA-21", "zakarpattia", "Закарпатська область", 1.25),
    ("UA-23", "zaporizhzhia", "Запорізька область", 1.64),
    ("UA-26", "ivano-frankivsk", "Івано-Франківська область", 1.35),
    ("UA-30", "kyiv-city", "м. Київ", 2.95),
    ("UA-32", "kyiv", "Київська область", 1.80),
    ("UA-35", "kirovohrad", "Кіровоградська область", 0.90),
    ("UA-46", "lviv", "Львівська область", 2.48),
    ("UA-48", "mykolaiv", "Миколаївська область", 1.09),
    ("UA-51", "odesa", "Одеська область", 2.35),
    ("UA-53", "poltava", "Полтавська область", 1.35),
    ("UA-56", "rivne", "Рівненська область", 1.15),
    ("UA-59", "sumy", "Сумська область", 1.04),
    ("UA-61", "ternopil", "Тернопільська область", 1.02),
    ("UA-63", "kharkiv", "Харківська область", 2.60),
    ("UA-65", "kherson", "Херсонська область", 1.00),
    ("UA-68", "khmelnytskyi", "Хмельницька область", 1.24),
    ("UA-71", "cherkasy", "Черкаська область", 1.16),
    ("UA-74", "chernihiv", "Чернігівська область", 0.97),
    ("UA-77", "chernivtsi", "Чернівецька область", 0.89),
];

impl RegionCoefficientTable {
    pub fn new(entries: Vec<RegionEntry>) -> Self {
        Self { entries }
    }

    /// Built-in Ukrainian oblast table
    pub fn default_ukraine() -> Self {
        Self {
            entries: UKRAINE_REGIONS
                .iter()
                .map(|&(code, region, label, coefficient)| RegionEntry {
                    code: code.to_string(),
                    region: region.to_string(),
                    label: label.to_string(),
                    coefficient,
                })
                .collect(),
        }
    }

    /// Build from loaded CSV factor data
    pub fn from_loaded(loaded: &LoadedFactors) -> Self {
        Self {
            entries: loaded.region_coefficients.clone(),
        }
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all region coefficients
    pub fn total_coefficient(&self) -> f64 {
        self.entries.iter().map(|e| e.coefficient).sum()
    }

    /// Share of the total weight held by the named regions
    ///
    /// Unknown codes contribute nothing; the caller decides the fallback.
    pub fn weight_of(&self, codes: &[String]) -> f64 {
        let total = self.total_coefficient();
        if total <= 0.0 {
            return 0.0;
        }
        let matched: f64 = self
            .entries
            .iter()
            .filter(|e| codes.iter().any(|c| c == &e.code || c == &e.region))
            .map(|e| e.coefficient)
            .sum();
        matched / total
    }
}

/// Per-region male/female split
#[derive(Debug, Clone)]
pub struct GenderRatioTable {
    male_share: HashMap<String, f64>,
    default_male_share: f64,
}

impl GenderRatioTable {
    /// Built-in Ukrainian ratios; most oblasts sit near the national split
    pub fn default_ukraine() -> Self {
        let mut male_share = HashMap::new();
        // Oblasts that deviate visibly from the national male share
        male_share.insert("UA-30".to_string(), 0.455);
        male_share.insert("UA-14".to_string(), 0.458);
        male_share.insert("UA-09".to_string(), 0.457);
        male_share.insert("UA-21".to_string(), 0.478);
        male_share.insert("UA-56".to_string(), 0.477);

        Self {
            male_share,
            default_male_share: 0.463,
        }
    }

    /// Build from loaded CSV factor data
    pub fn from_loaded(loaded: &LoadedFactors) -> Self {
        Self {
            male_share: loaded.gender_ratios.clone(),
            default_male_share: 0.463,
        }
    }

    /// Male population share for a region, falling back to the default ratio
    pub fn male_share(&self, code: &str) -> f64 {
        self.male_share
            .get(code)
            .copied()
            .unwrap_or(self.default_male_share)
    }
}

impl Default for GenderRatioTable {
    fn default() -> Self {
        Self::default_ukraine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_table_covers_all_oblasts() {
        let table = RegionCoefficientTable::default_ukraine();
        assert_eq!(table.entries().len(), 25);
        assert!(table.total_coefficient() > 40.0);
    }

    #[test]
    fn test_weight_of_known_regions() {
        let table = RegionCoefficientTable::default_ukraine();
        let weight = table.weight_of(&["UA-30".to_string(), "UA-14".to_string()]);
        let expected = (2.95 + 4.06) / table.total_coefficient();
        assert_relative_eq!(weight, expected);
    }

    #[test]
    fn test_weight_of_unknown_regions_is_zero() {
        let table = RegionCoefficientTable::default_ukraine();
        assert_eq!(table.weight_of(&["XX-99".to_string()]), 0.0);
    }

    #[test]
    fn test_gender_fallback_ratio() {
        let ratios = GenderRatioTable::default_ukraine();
        assert_eq!(ratios.male_share("UA-05"), 0.463);
        assert_eq!(ratios.male_share("UA-30"), 0.455);
    }
}
