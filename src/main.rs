//! Population Forecast CLI
//!
//! Runs a single scenario forecast, prints the yearly trajectory and writes
//! the full series to CSV.

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use clap::Parser;

use population_forecast::scenario::{
    ConflictIntensity, EconomicSituation, FamilySupport, ShockEvent, SwingInputs,
};
use population_forecast::{ForecastRunner, PredictionInput};

#[derive(Debug, Parser)]
#[command(name = "population_forecast", about = "Scenario-driven population forecast")]
struct Args {
    /// Last historical year the projection starts from
    #[arg(long, default_value_t = 2023)]
    base_year: i32,

    /// Final forecast year
    #[arg(long, default_value_t = 2040)]
    target_year: i32,

    /// Birth rate delta in percent
    #[arg(long, default_value_t = 0.0)]
    birth_change: f64,

    /// Death rate delta in percent
    #[arg(long, default_value_t = 0.0)]
    death_change: f64,

    /// Net migration delta in percent
    #[arg(long, default_value_t = 0.0)]
    migration_change: f64,

    /// Assumed economic regime
    #[arg(long, value_enum, default_value = "stable")]
    economic: EconomicSituation,

    /// Assumed conflict level
    #[arg(long, value_enum, default_value = "tension")]
    conflict: ConflictIntensity,

    /// Family-support policy level
    #[arg(long, value_enum, default_value = "medium")]
    family_support: FamilySupport,

    /// International support level in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    international_support: f64,

    /// Stochastic volatility in [0, 1]
    #[arg(long, default_value_t = 0.2)]
    volatility: f64,

    /// Add a shock event: year of impact
    #[arg(long)]
    shock_year: Option<i32>,

    /// Shock severity in [-1, 1]
    #[arg(long, default_value_t = -0.9, allow_hyphen_values = true)]
    shock_severity: f64,

    /// Shock recovery length in years
    #[arg(long, default_value_t = 5)]
    shock_recovery: u32,

    /// Noise seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV path
    #[arg(long, default_value = "forecast_output.csv")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let shock_events = match args.shock_year {
        Some(year) => vec![ShockEvent {
            year,
            severity: args.shock_severity,
            recovery_years: args.shock_recovery,
            regions_affected: None,
        }],
        None => Vec::new(),
    };

    let input = PredictionInput {
        base_year: args.base_year,
        target_year: args.target_year,
        birth_rate_change: args.birth_change,
        death_rate_change: args.death_change,
        migration_change: args.migration_change,
        economic_situation: args.economic,
        conflict_intensity: args.conflict,
        family_support: args.family_support,
        swing_inputs: Some(SwingInputs {
            geopolitical_index: None,
            economic_cycle_position: 0.0,
            international_support: args.international_support,
            volatility: args.volatility,
            shock_events,
        }),
    };

    let runner = ForecastRunner::new();
    let response = runner.run(&input, args.seed).context("forecast failed")?;

    println!("Population Forecast v0.1.0");
    println!("==========================\n");
    println!(
        "Horizon: {} -> {}  (base rate {:.5}, adjusted {:.5}, K {:.0})",
        args.base_year,
        args.target_year,
        response.growth_rate,
        response.adjusted_rate,
        response.carrying_capacity,
    );
    println!();

    println!(
        "{:>5} {:>14} {:>14} {:>14} {:>10} {:>10} {:>8}",
        "Year", "Static", "Swing", "Baseline", "Growth", "Shock", "Phase"
    );
    println!("{}", "-".repeat(82));

    for point in &response.data {
        println!(
            "{:>5} {:>14.0} {:>14.0} {:>14.0} {:>10.5} {:>10.4} {:>8.3}",
            point.year,
            point.value,
            point.swing_value.unwrap_or(0.0),
            point.baseline_value.unwrap_or(0.0),
            point.growth_rate.unwrap_or(0.0),
            point.shock_impact.unwrap_or(0.0),
            point.cycle_phase.unwrap_or(0.0),
        );
    }

    println!(
        "\nPredicted {} population: {:.0}  [{:.0}, {:.0}]",
        args.target_year, response.predicted_population, response.lower_bound, response.upper_bound
    );

    if !response.swing_metadata.applied_policies.is_empty() {
        println!(
            "Policy response: {}",
            response.swing_metadata.applied_policies.join(", ")
        );
    }
    println!(
        "Volatility range: {:.5}, avg cycle amplitude: {:.5}",
        response.swing_metadata.volatility_range,
        response.swing_metadata.average_cycle_amplitude
    );

    println!("\nTop regions ({}):", args.target_year);
    let mut regions = response.regions.clone();
    regions.sort_by(|a, b| b.population.total_cmp(&a.population));
    for region in regions.iter().take(8) {
        println!(
            "  {:<8} {:<28} {:>12.0} ({:>5.2}%)",
            region.code, region.label, region.population, region.percent
        );
    }

    println!("\nSensitivity (final-year population per axis):");
    for variation in &response.sensitivity.variations {
        println!(
            "  {:<24} {:>+4.1} -> {:>12.0} (range {:.5})",
            variation.parameter,
            variation.delta,
            variation.predicted_population,
            variation.volatility_range,
        );
    }

    // Full series to CSV for charting
    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output))?;
    writeln!(
        file,
        "Year,Static,Lower,Upper,Swing,Baseline,GrowthRate,ShockImpact,CyclePhase,PolicyModifier"
    )?;
    for point in &response.data {
        writeln!(
            file,
            "{},{:.0},{:.0},{:.0},{:.0},{:.0},{:.8},{:.8},{:.6},{:.6}",
            point.year,
            point.value,
            point.lower_bound.unwrap_or(0.0),
            point.upper_bound.unwrap_or(0.0),
            point.swing_value.unwrap_or(0.0),
            point.baseline_value.unwrap_or(0.0),
            point.growth_rate.unwrap_or(0.0),
            point.shock_impact.unwrap_or(0.0),
            point.cycle_phase.unwrap_or(0.0),
            point.policy_modifier.unwrap_or(0.0),
        )?;
    }

    println!("\nFull series written to: {}", args.output);

    Ok(())
}
