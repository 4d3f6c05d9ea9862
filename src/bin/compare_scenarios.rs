//! Run every scenario preset over the same year range and print a
//! side-by-side comparison of terminal-year outcomes
//!
//! Scenario runs are independent, so they parallelize across the preset set.

use anyhow::Context;
use clap::Parser;
use fiscal_system::simulation::RunSummary;
use fiscal_system::{simulate_range, ReferenceData, ScenarioConfig};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "compare_scenarios", about = "Compare all scenario presets")]
struct Args {
    #[arg(long, default_value_t = 2025)]
    start: u32,

    #[arg(long, default_value_t = 2060)]
    end: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let reference = ReferenceData::builtin();
    let scenarios = ScenarioConfig::presets();

    println!(
        "Comparing {} scenarios over {}..={}",
        scenarios.len(),
        args.start,
        args.end
    );

    let started = Instant::now();
    let summaries: Vec<RunSummary> = scenarios
        .par_iter()
        .map(|scenario| {
            simulate_range(args.start, args.end, scenario, &reference, false)
                .map(|outcome| outcome.summary)
                .with_context(|| format!("scenario '{}'", scenario.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    println!("Completed in {:?}\n", started.elapsed());

    println!(
        "{:<18} {:>12} {:>12} {:>14} {:>12}",
        "Scenario", "Population", "Debt/GDP", "Cum.Balance(M)", "1st Deficit"
    );
    println!("{}", "-".repeat(74));

    for summary in &summaries {
        println!(
            "{:<18} {:>12.0} {:>11.1}% {:>14.0} {:>12}",
            summary.scenario,
            summary.final_population,
            summary.final_debt_to_gdp,
            summary.cumulative_balance,
            summary
                .first_deficit_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "none".to_string()),
        );
    }

    Ok(())
}
