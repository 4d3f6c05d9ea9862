//! Fiscal System CLI
//!
//! Runs a population and public-finance projection for a year range under a
//! named scenario, prints an annual summary table, and optionally writes the
//! full timeline to CSV (legacy flat rows) or JSON.

use anyhow::Context;
use clap::Parser;
use fiscal_system::simulation::to_legacy_row;
use fiscal_system::{simulate_range, EngineError, ReferenceData, ScenarioConfig};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fiscal_system",
    version,
    about = "Population and public-finance projection engine"
)]
struct Args {
    /// First simulated year
    #[arg(long, default_value_t = 2025)]
    start: u32,

    /// Last simulated year
    #[arg(long, default_value_t = 2060)]
    end: u32,

    /// Scenario preset name (see --list-scenarios)
    #[arg(long, default_value = "baseline")]
    scenario: String,

    /// List available scenario presets and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Directory with CSV reference-table overrides
    #[arg(long)]
    reference_dir: Option<PathBuf>,

    /// Write the timeline as legacy flat rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the timeline and summary as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Run the advisory validators on every year
    #[arg(long)]
    validate: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for scenario in ScenarioConfig::presets() {
            println!("{}", scenario.name);
        }
        return Ok(());
    }

    let reference = match &args.reference_dir {
        Some(dir) => ReferenceData::from_csv_path(dir)
            .with_context(|| format!("loading reference data from {}", dir.display()))?,
        None => ReferenceData::builtin(),
    };

    let scenario = ScenarioConfig::preset(&args.scenario)
        .ok_or_else(|| EngineError::UnknownScenario(args.scenario.clone()))?;

    let started = std::time::Instant::now();
    let outcome = simulate_range(args.start, args.end, &scenario, &reference, args.validate)?;
    let elapsed = started.elapsed();

    println!(
        "Fiscal System - {} to {} under '{}' ({} years in {:?})",
        args.start,
        args.end,
        scenario.name,
        outcome.annual_results.len(),
        elapsed
    );
    println!("Run date: {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
    println!();
    println!(
        "{:>5} {:>12} {:>8} {:>8} {:>9} {:>8} {:>9} {:>10} {:>8}",
        "Year", "Population", "Births", "Deaths", "GDP(B)", "Debt(B)", "Debt/GDP", "Balance(M)", "Dep.%"
    );
    println!("{}", "-".repeat(88));

    for result in &outcome.annual_results {
        println!(
            "{:>5} {:>12.0} {:>8.0} {:>8.0} {:>9.1} {:>8.1} {:>8.1}% {:>10.0} {:>8.1}",
            result.year,
            result.total_population,
            result.births,
            result.deaths,
            result.gdp,
            result.debt,
            result.debt_to_gdp,
            result.adjusted_fiscal.balance,
            result.fiscal.dependency_ratio,
        );
    }

    let summary = &outcome.summary;
    println!();
    println!("Summary:");
    if let Some((year, surplus)) = summary.peak_surplus {
        println!("  Peak surplus:     {:.0} M in {}", surplus, year);
    }
    if let Some(year) = summary.first_deficit_year {
        println!("  First deficit:    {}", year);
    }
    if let Some((year, ratio)) = summary.peak_debt_to_gdp {
        println!("  Peak debt/GDP:    {:.1}% in {}", ratio, year);
    }
    println!("  Cumulative balance: {:.0} M", summary.cumulative_balance);
    println!("  Final population:   {:.0}", summary.final_population);

    if let Some(path) = &args.csv {
        write_csv(path, &outcome.annual_results)?;
        println!("\nWrote {} rows to {}", outcome.annual_results.len(), path.display());
    }

    if let Some(path) = &args.json {
        let payload = serde_json::json!({
            "summary": summary,
            "annual_results": outcome.annual_results,
        });
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &payload)?;
        println!("Wrote JSON to {}", path.display());
    }

    Ok(())
}

fn write_csv(
    path: &PathBuf,
    results: &[fiscal_system::YearResult],
) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(
        file,
        "Year,IsProjection,Population,ImmigrantPopulation,Births,Deaths,NetMigration,DependencyRatio,GDP,GDPGrowth,Debt,DebtToGDP,Revenue,Cost,Interest,Balance,DeficitShare"
    )?;
    for result in results {
        let row = to_legacy_row(result);
        writeln!(
            file,
            "{},{},{:.0},{:.0},{:.0},{:.0},{:.0},{:.2},{:.2},{:.4},{:.2},{:.2},{:.1},{:.1},{:.1},{:.1},{:.2}",
            row.year,
            row.is_projection,
            row.population,
            row.immigrant_population,
            row.births,
            row.deaths,
            row.net_migration,
            row.dependency_ratio,
            row.gdp,
            row.gdp_growth,
            row.debt,
            row.debt_to_gdp,
            row.revenue_total,
            row.cost_total,
            row.interest_expense,
            row.balance,
            row.deficit_share_of_gdp,
        )?;
    }
    Ok(())
}
