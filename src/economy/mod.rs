//! GDP and government-debt projection
//!
//! Historical years read GDP, debt, and the interest rate straight from the
//! reference series. Projected years compound GDP under the scenario's growth
//! regime and accumulate the fiscal balance into the debt stock, with
//! interest charged on the average of the previous and new stock.

use crate::reference::{EconomySeries, ReferenceData, HISTORICAL_CUTOFF};
use crate::scenario::ScenarioConfig;
use serde::{Deserialize, Serialize};

/// Macro-economic state for one simulated year
///
/// GDP and debt are billions of euros. The multiplier is cumulative growth
/// relative to the base year and scales wage-dependent amounts; it stays at
/// 1.0 through the historical period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicState {
    pub gdp: f64,
    pub gdp_multiplier: f64,
    pub debt: f64,
    pub interest_rate: f64,
}

impl EconomicState {
    /// State for a historical year, read from the series
    pub fn historical(year: u32, series: &EconomySeries) -> Option<Self> {
        series.get(year).map(|record| Self {
            gdp: record.gdp,
            gdp_multiplier: 1.0,
            debt: record.debt,
            interest_rate: record.interest_rate,
        })
    }

    /// Debt stock as a share of GDP, percent
    pub fn debt_to_gdp(&self) -> f64 {
        if self.gdp <= 0.0 {
            return 0.0;
        }
        self.debt / self.gdp * 100.0
    }
}

/// Result of one economy year-step
#[derive(Debug, Clone, Copy)]
pub struct EconomyOutcome {
    pub economy: EconomicState,
    pub gdp_growth: f64,
    /// Interest expense on the debt stock, millions
    pub interest_expense: f64,
}

/// Update the debt stock with one year's fiscal balance
///
/// A surplus reduces debt, a deficit increases it, and the stock never goes
/// negative. Interest is charged on the average of the previous and new
/// stock. Balance and debt are both billions; returns (new debt, interest).
pub fn project_debt(previous_debt: f64, balance: f64, interest_rate: f64) -> (f64, f64) {
    let new_debt = (previous_debt - balance).max(0.0);
    let interest = (previous_debt + new_debt) / 2.0 * interest_rate;
    (new_debt, interest)
}

/// Run the economy step for `year`
///
/// `base_balance` is the pre-interest fiscal balance in millions;
/// `working_age` / `previous_working_age` feed the workforce-adjusted growth
/// scenario. The interest expense returned here is layered into the fiscal
/// flows by the orchestrator; any government metrics derived before that
/// restatement are discarded.
pub fn advance(
    previous: &EconomicState,
    year: u32,
    working_age: f64,
    previous_working_age: f64,
    base_balance: f64,
    scenario: &ScenarioConfig,
    reference: &ReferenceData,
) -> EconomyOutcome {
    if year <= HISTORICAL_CUTOFF {
        let economy = match reference.economy.get_or_nearest(year) {
            Some(record) => EconomicState {
                gdp: record.gdp,
                gdp_multiplier: 1.0,
                debt: record.debt,
                interest_rate: record.interest_rate,
            },
            None => {
                log::warn!("no economy record near {}, carrying previous state", year);
                *previous
            }
        };
        let gdp_growth = if previous.gdp > 0.0 {
            economy.gdp / previous.gdp - 1.0
        } else {
            0.0
        };
        return EconomyOutcome {
            economy,
            gdp_growth,
            interest_expense: economy.debt * economy.interest_rate * 1_000.0,
        };
    }

    let workforce_change = if previous_working_age > 0.0 {
        (working_age - previous_working_age) / previous_working_age
    } else {
        0.0
    };
    let gdp_growth = scenario.gdp.growth_rate(workforce_change);
    let interest_rate = scenario.interest.rate();

    let (debt, interest_billions) =
        project_debt(previous.debt, base_balance / 1_000.0, interest_rate);

    let economy = EconomicState {
        gdp: previous.gdp * (1.0 + gdp_growth),
        gdp_multiplier: previous.gdp_multiplier * (1.0 + gdp_growth),
        debt,
        interest_rate,
    };

    EconomyOutcome {
        economy,
        gdp_growth,
        interest_expense: interest_billions * 1_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surplus_reduces_debt() {
        let (debt, _) = project_debt(100.0, 5.0, 0.02);
        assert_relative_eq!(debt, 95.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deficit_increases_debt() {
        let (debt, _) = project_debt(100.0, -5.0, 0.02);
        assert_relative_eq!(debt, 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_debt_never_negative() {
        let (debt, interest) = project_debt(3.0, 10.0, 0.02);
        assert_eq!(debt, 0.0);
        // Interest on the average of 3 and 0
        assert_relative_eq!(interest, 1.5 * 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_interest_on_average_stock() {
        let (debt, interest) = project_debt(100.0, -10.0, 0.03);
        assert_relative_eq!(interest, (100.0 + debt) / 2.0 * 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_debt_to_gdp_ratio() {
        let state = EconomicState {
            gdp: 250.0,
            gdp_multiplier: 1.0,
            debt: 150.0,
            interest_rate: 0.02,
        };
        assert_relative_eq!(state.debt_to_gdp(), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_historical_year_reads_series() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let previous = EconomicState::historical(2019, &reference.economy).unwrap();

        let outcome = advance(&previous, 2020, 0.0, 0.0, 0.0, &scenario, &reference);
        let record = reference.economy.get(2020).unwrap();
        assert_eq!(outcome.economy.gdp, record.gdp);
        assert_eq!(outcome.economy.debt, record.debt);
        assert_eq!(outcome.economy.gdp_multiplier, 1.0);
    }

    #[test]
    fn test_projected_year_compounds_gdp() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline(); // fixed 1.5% growth
        let previous = EconomicState::historical(2024, &reference.economy).unwrap();

        let outcome = advance(&previous, 2025, 3.4e6, 3.4e6, 0.0, &scenario, &reference);
        assert_relative_eq!(outcome.gdp_growth, 0.015, epsilon = 1e-12);
        assert_relative_eq!(
            outcome.economy.gdp,
            previous.gdp * 1.015,
            epsilon = 1e-9
        );
        assert_relative_eq!(outcome.economy.gdp_multiplier, 1.015, epsilon = 1e-12);
    }

    #[test]
    fn test_workforce_adjusted_growth_responds_to_shrinkage() {
        let reference = ReferenceData::builtin();
        let mut scenario = ScenarioConfig::baseline();
        scenario.gdp = crate::scenario::GdpScenario::WorkforceAdjusted;
        let previous = EconomicState::historical(2024, &reference.economy).unwrap();

        let shrinking = advance(&previous, 2025, 3.3e6, 3.4e6, 0.0, &scenario, &reference);
        let stable = advance(&previous, 2025, 3.4e6, 3.4e6, 0.0, &scenario, &reference);
        assert!(shrinking.gdp_growth < stable.gdp_growth);
    }
}
