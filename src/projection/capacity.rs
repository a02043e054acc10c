//! Dynamic carrying-capacity model
//!
//! Computes the logistic ceiling from macro indicators. The ceiling is never
//! allowed below 101% of the current population so a logistic step always has
//! headroom.

use crate::factors::MacroIndicators;

/// Carrying capacity `K` for the logistic growth model
pub fn carrying_capacity(population: f64, macros: &MacroIndicators) -> f64 {
    let base_k = population * 1.3;

    // GDP contraction below -100% has no meaning; keep the log argument positive
    let gdp_term = (1.0 + macros.gdp_growth / 100.0).max(1e-6);
    let econ_effect = 1.0 + 0.05 * gdp_term.ln();

    let conflict_penalty = (macros.conflict_index * 0.1).exp();
    let support_boost = 1.0 + macros.sentiment * 0.05;

    (base_k * econ_effect * support_boost / conflict_penalty).max(population * 1.01)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_capacity_never_below_floor() {
        // Hostile macro setting: deep contraction, full conflict, worst sentiment
        let macros = MacroIndicators {
            gdp_growth: -40.0,
            conflict_index: 1.0,
            sentiment: -1.0,
        };
        let population = 41_100_000.0;
        assert!(carrying_capacity(population, &macros) >= population * 1.01);
    }

    #[test]
    fn test_neutral_macros_give_base_headroom() {
        let macros = MacroIndicators {
            gdp_growth: 0.0,
            conflict_index: 0.0,
            sentiment: 0.0,
        };
        assert_relative_eq!(
            carrying_capacity(40_000_000.0, &macros),
            52_000_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_growth_raises_capacity_and_conflict_lowers_it() {
        let neutral = MacroIndicators {
            gdp_growth: 0.0,
            conflict_index: 0.0,
            sentiment: 0.0,
        };
        let booming = MacroIndicators {
            gdp_growth: 6.0,
            ..neutral
        };
        let conflicted = MacroIndicators {
            conflict_index: 0.9,
            ..neutral
        };

        let population = 41_100_000.0;
        assert!(carrying_capacity(population, &booming) > carrying_capacity(population, &neutral));
        assert!(
            carrying_capacity(population, &conflicted) < carrying_capacity(population, &neutral)
        );
    }
}
