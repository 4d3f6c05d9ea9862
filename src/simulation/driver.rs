//! Simulation driver
//!
//! Runs the year-advance engine across a range, accumulates the annual
//! timeline, and computes run-level summary statistics.

use super::init::{initialize_state, InitOptions};
use super::step::{Engine, YearResult};
use super::validate::validate_year_result;
use super::SimulationState;
use crate::reference::ReferenceData;
use crate::scenario::ScenarioConfig;
use crate::EngineError;
use serde::{Deserialize, Serialize};

/// Run-level summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_year: u32,
    pub end_year: u32,
    pub scenario: String,
    /// Largest annual surplus (year, millions), if any year ran one
    pub peak_surplus: Option<(u32, f64)>,
    /// First year with a negative balance
    pub first_deficit_year: Option<u32>,
    /// Highest debt-to-GDP ratio over the run (year, percent)
    pub peak_debt_to_gdp: Option<(u32, f64)>,
    /// Sum of annual balances over the run, millions
    pub cumulative_balance: f64,
    pub final_population: f64,
    pub final_debt_to_gdp: f64,
}

impl RunSummary {
    fn from_results(results: &[YearResult], scenario: &ScenarioConfig) -> Self {
        let mut peak_surplus: Option<(u32, f64)> = None;
        let mut first_deficit_year = None;
        let mut peak_debt_to_gdp: Option<(u32, f64)> = None;
        let mut cumulative_balance = 0.0;

        for result in results {
            let balance = result.adjusted_fiscal.balance;
            cumulative_balance += balance;

            if balance > 0.0 && peak_surplus.map_or(true, |(_, best)| balance > best) {
                peak_surplus = Some((result.year, balance));
            }
            if balance < 0.0 && first_deficit_year.is_none() {
                first_deficit_year = Some(result.year);
            }
            if peak_debt_to_gdp.map_or(true, |(_, best)| result.debt_to_gdp > best) {
                peak_debt_to_gdp = Some((result.year, result.debt_to_gdp));
            }
        }

        let last = results.last();
        Self {
            start_year: results.first().map(|r| r.year).unwrap_or(0),
            end_year: last.map(|r| r.year).unwrap_or(0),
            scenario: scenario.name.clone(),
            peak_surplus,
            first_deficit_year,
            peak_debt_to_gdp,
            cumulative_balance,
            final_population: last.map(|r| r.total_population).unwrap_or(0.0),
            final_debt_to_gdp: last.map(|r| r.debt_to_gdp).unwrap_or(0.0),
        }
    }
}

/// Everything a simulation run produces
#[derive(Debug)]
pub struct SimulationOutcome {
    /// Ordered, append-only annual timeline
    pub annual_results: Vec<YearResult>,
    pub summary: RunSummary,
    pub final_state: SimulationState,
}

/// Simulate `start..=end` under a scenario
///
/// Initialization reconstructs the state for `start - 1`; each year's output
/// state feeds the next transition. With `validate_steps` set, each annual
/// result runs through the advisory validators and findings are logged; the
/// run itself is never aborted by validation.
pub fn simulate_range(
    start: u32,
    end: u32,
    scenario: &ScenarioConfig,
    reference: &ReferenceData,
    validate_steps: bool,
) -> Result<SimulationOutcome, EngineError> {
    if start == 0 || start > end {
        return Err(EngineError::InvalidRange { start, end });
    }
    reference.validate()?;

    let initial = initialize_state(start - 1, &InitOptions::default(), reference);
    let mut engine = Engine::new(reference, scenario);

    let mut annual_results: Vec<YearResult> = Vec::with_capacity((end - start + 1) as usize);
    let mut state = initial;

    for _ in start..=end {
        let (result, next_state) = engine.advance_year(&state);

        if validate_steps {
            let report = validate_year_result(&result, annual_results.last());
            for error in &report.errors {
                log::error!("year {}: {}", result.year, error);
            }
            for warning in &report.warnings {
                log::warn!("year {}: {}", result.year, warning);
            }
        }

        annual_results.push(result);
        state = next_state;
    }

    let summary = RunSummary::from_results(&annual_results, scenario);
    log::info!(
        "simulated {}..={} under '{}': final population {:.0}, debt/GDP {:.1}%",
        start,
        end,
        scenario.name,
        summary.final_population,
        summary.final_debt_to_gdp
    );

    Ok(SimulationOutcome {
        annual_results,
        summary,
        final_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_rejected() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        assert!(simulate_range(2040, 2030, &scenario, &reference, false).is_err());
    }

    #[test]
    fn test_timeline_is_ordered_and_complete() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let outcome = simulate_range(2025, 2035, &scenario, &reference, false).unwrap();

        assert_eq!(outcome.annual_results.len(), 11);
        for (i, result) in outcome.annual_results.iter().enumerate() {
            assert_eq!(result.year, 2025 + i as u32);
        }
        assert_eq!(outcome.final_state.year, 2035);
    }

    #[test]
    fn test_seventy_year_run_stays_finite() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let outcome = simulate_range(1990, 2060, &scenario, &reference, true).unwrap();

        let mut previous_population: Option<f64> = None;
        for result in &outcome.annual_results {
            assert!(result.total_population.is_finite() && result.total_population > 0.0);
            assert!(result.gdp.is_finite() && result.gdp > 0.0);
            assert!(result.debt.is_finite() && result.debt >= 0.0);
            assert!(result.adjusted_fiscal.balance.is_finite());
            assert!(result.cofog.total().is_finite());

            if let Some(previous) = previous_population {
                let change = (result.total_population - previous).abs() / previous;
                assert!(
                    change < 0.05,
                    "year {}: population changed {:.1}%",
                    result.year,
                    change * 100.0
                );
            }
            previous_population = Some(result.total_population);
        }
    }

    #[test]
    fn test_higher_fertility_grows_population() {
        let reference = ReferenceData::builtin();
        let low = simulate_range(2025, 2060, &ScenarioConfig::low_fertility(), &reference, false)
            .unwrap();
        let high =
            simulate_range(2025, 2060, &ScenarioConfig::recovery(), &reference, false).unwrap();
        assert!(high.summary.final_population > low.summary.final_population);
    }

    #[test]
    fn test_higher_immigration_grows_immigrant_stock() {
        let reference = ReferenceData::builtin();
        let low = simulate_range(
            2025,
            2060,
            &ScenarioConfig::low_immigration(),
            &reference,
            false,
        )
        .unwrap();
        let high = simulate_range(
            2025,
            2060,
            &ScenarioConfig::high_immigration(),
            &reference,
            false,
        )
        .unwrap();

        let low_stock = low.annual_results.last().unwrap().immigrant_population;
        let high_stock = high.annual_results.last().unwrap().immigrant_population;
        assert!(high_stock > low_stock);
    }

    #[test]
    fn test_summary_statistics() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let outcome = simulate_range(2025, 2050, &scenario, &reference, false).unwrap();
        let summary = &outcome.summary;

        assert_eq!(summary.start_year, 2025);
        assert_eq!(summary.end_year, 2050);
        let manual_total: f64 = outcome
            .annual_results
            .iter()
            .map(|r| r.adjusted_fiscal.balance)
            .sum();
        assert!((summary.cumulative_balance - manual_total).abs() < 1e-6);
        assert!(summary.peak_debt_to_gdp.is_some());

        if let Some(first_deficit) = summary.first_deficit_year {
            let result = outcome
                .annual_results
                .iter()
                .find(|r| r.year == first_deficit)
                .unwrap();
            assert!(result.adjusted_fiscal.balance < 0.0);
        }
    }
}
