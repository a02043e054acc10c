//! Sweep the categorical scenario grid in parallel
//!
//! Usage: cargo run --bin scenario_sweep

use anyhow::Result;
use rayon::prelude::*;

use population_forecast::scenario::{ConflictIntensity, EconomicSituation, FamilySupport};
use population_forecast::{ForecastRunner, PredictionInput};

const NOISE_SEED: u64 = 42;

fn main() -> Result<()> {
    env_logger::init();

    let runner = ForecastRunner::new();

    let economies = [
        EconomicSituation::Weak,
        EconomicSituation::Stable,
        EconomicSituation::Growing,
    ];
    let conflicts = [
        ConflictIntensity::Peace,
        ConflictIntensity::Tension,
        ConflictIntensity::War,
    ];

    let mut grid = Vec::new();
    for economy in economies {
        for conflict in conflicts {
            grid.push((economy, conflict));
        }
    }

    println!("Sweeping {} scenarios (2023 -> 2040)...\n", grid.len());

    let results: Vec<_> = grid
        .par_iter()
        .map(|&(economy, conflict)| {
            let input = PredictionInput {
                base_year: 2023,
                target_year: 2040,
                birth_rate_change: 0.0,
                death_rate_change: 0.0,
                migration_change: 0.0,
                economic_situation: economy,
                conflict_intensity: conflict,
                family_support: FamilySupport::Medium,
                swing_inputs: None,
            };
            runner
                .run(&input, NOISE_SEED)
                .map(|response| (economy, conflict, response))
        })
        .collect::<Result<Vec<_>, _>>()?;

    println!(
        "{:<10} {:<9} {:>16} {:>16} {:>10} {:>10}",
        "Economy", "Conflict", "Predicted", "Final swing", "AdjRate", "VolRange"
    );
    println!("{}", "-".repeat(78));

    for (economy, conflict, response) in &results {
        let final_swing = response
            .data
            .last()
            .and_then(|p| p.swing_value)
            .unwrap_or(0.0);
        println!(
            "{:<10} {:<9} {:>16.0} {:>16.0} {:>10.5} {:>10.5}",
            format!("{economy:?}"),
            format!("{conflict:?}"),
            response.predicted_population,
            final_swing,
            response.adjusted_rate,
            response.swing_metadata.volatility_range,
        );
    }

    // Quick spread summary across the grid
    let predictions: Vec<f64> = results
        .iter()
        .map(|(_, _, r)| r.predicted_population)
        .collect();
    let best = predictions.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let worst = predictions.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    println!(
        "\nScenario spread: best {best:.0}, worst {worst:.0}, gap {:.0}",
        best - worst
    );

    Ok(())
}
