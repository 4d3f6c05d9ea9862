//! Advisory validation of states and annual results
//!
//! Validators report; they never halt a simulation. Only structurally
//! impossible results (non-finite population, non-positive GDP) count as
//! errors — the caller decides whether to abort on them. Everything else is
//! a warning.

use super::state::SimulationState;
use super::step::YearResult;
use serde::{Deserialize, Serialize};

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn finish(mut self) -> Self {
        self.valid = self.errors.is_empty();
        self
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Validate a simulation state
pub fn validate_state(state: &SimulationState) -> ValidationReport {
    let mut report = ValidationReport::default();

    let total = state.population.total();
    if !total.is_finite() {
        report.error(format!("population total is not finite: {}", total));
    } else if total <= 0.0 {
        report.warn("population is empty".to_string());
    }

    if !state.economy.gdp.is_finite() || state.economy.gdp <= 0.0 {
        report.error(format!("GDP must be positive, got {}", state.economy.gdp));
    }
    if !state.economy.debt.is_finite() {
        report.error(format!("debt stock is not finite: {}", state.economy.debt));
    } else if state.economy.debt < 0.0 {
        report.warn(format!(
            "negative debt stock {:.1} should have been floored",
            state.economy.debt
        ));
    }

    let dependency = state.population.age_bands().dependency_ratio();
    if dependency > 150.0 {
        report.warn(format!("dependency ratio unusually high: {:.0}", dependency));
    }

    report.finish()
}

/// Validate an annual result, optionally against the preceding year
pub fn validate_year_result(
    result: &YearResult,
    previous: Option<&YearResult>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !result.total_population.is_finite() || result.total_population <= 0.0 {
        report.error(format!(
            "population must be positive and finite, got {}",
            result.total_population
        ));
    }
    if !result.gdp.is_finite() || result.gdp <= 0.0 {
        report.error(format!("GDP must be positive and finite, got {}", result.gdp));
    }
    for (label, value) in [
        ("revenue", result.adjusted_fiscal.revenue.total()),
        ("cost", result.adjusted_fiscal.total_cost()),
        ("balance", result.adjusted_fiscal.balance),
    ] {
        if !value.is_finite() {
            report.error(format!("fiscal {} is not finite", label));
        }
    }

    if result.debt < 0.0 {
        report.warn(format!("negative debt stock {:.1}", result.debt));
    }
    if result.fiscal.dependency_ratio > 150.0 {
        report.warn(format!(
            "dependency ratio unusually high: {:.0}",
            result.fiscal.dependency_ratio
        ));
    }
    if result.deficit_share_of_gdp > 10.0 {
        report.warn(format!(
            "deficit at {:.1}% of GDP",
            result.deficit_share_of_gdp
        ));
    }

    if let Some(previous) = previous {
        if previous.total_population > 0.0 {
            let change = (result.total_population - previous.total_population).abs()
                / previous.total_population;
            if change > 0.05 {
                report.warn(format!(
                    "population changed {:.1}% in one year",
                    change * 100.0
                ));
            }
        }
    }

    report.finish()
}
