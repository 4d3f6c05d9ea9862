//! Legacy flat result shape
//!
//! Older consumers expect one flat row per year instead of the nested
//! `YearResult`. This adapter only reshapes; it adds no logic.

use super::step::YearResult;
use serde::{Deserialize, Serialize};

/// Flat per-year row in the historical output shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyYearRow {
    pub year: u32,
    pub is_projection: bool,
    pub population: f64,
    pub immigrant_population: f64,
    pub births: f64,
    pub deaths: f64,
    pub net_migration: f64,
    pub dependency_ratio: f64,
    /// Billions
    pub gdp: f64,
    pub gdp_growth: f64,
    /// Billions
    pub debt: f64,
    pub debt_to_gdp: f64,
    /// Millions
    pub revenue_total: f64,
    /// Millions, interest included
    pub cost_total: f64,
    /// Millions
    pub interest_expense: f64,
    /// Millions
    pub balance: f64,
    pub deficit_share_of_gdp: f64,
}

/// Flatten a `YearResult` into the legacy row shape
pub fn to_legacy_row(result: &YearResult) -> LegacyYearRow {
    LegacyYearRow {
        year: result.year,
        is_projection: !result.is_historical,
        population: result.total_population,
        immigrant_population: result.immigrant_population,
        births: result.births,
        deaths: result.deaths,
        net_migration: result.arrivals.total() - result.departures,
        dependency_ratio: result.fiscal.dependency_ratio,
        gdp: result.gdp,
        gdp_growth: result.gdp_growth,
        debt: result.debt,
        debt_to_gdp: result.debt_to_gdp,
        revenue_total: result.adjusted_fiscal.revenue.total(),
        cost_total: result.adjusted_fiscal.total_cost(),
        interest_expense: result.interest_expense,
        balance: result.adjusted_fiscal.balance,
        deficit_share_of_gdp: result.deficit_share_of_gdp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use crate::scenario::ScenarioConfig;
    use crate::simulation::init::{initialize_state, InitOptions};
    use crate::simulation::step::Engine;

    #[test]
    fn test_flattening_preserves_values() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = initialize_state(2024, &InitOptions::default(), &reference);

        let (result, _) = engine.advance_year(&state);
        let row = to_legacy_row(&result);

        assert_eq!(row.year, result.year);
        assert!(row.is_projection);
        assert_eq!(row.population, result.total_population);
        assert_eq!(row.balance, result.adjusted_fiscal.balance);
        assert_eq!(
            row.net_migration,
            result.arrivals.total() - result.departures
        );
        assert_eq!(row.cost_total, result.adjusted_fiscal.total_cost());
    }
}
