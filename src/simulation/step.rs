//! Year-advance orchestrator
//!
//! One state per simulated year; a transition composes the component steps
//! in a fixed sequence:
//!
//! 1. demographics for the new year against the previous population
//! 2. immigration against the post-demographics population
//! 3. base fiscal aggregation using the previous year's GDP multiplier and
//!    zero interest
//! 4. economy step, fed the current working-age population and the base
//!    (pre-interest) fiscal balance; interest derives from the previous
//!    year's debt stock, which is what breaks the apparent circularity
//!    between this step and the next
//! 5. fiscal flows restated with interest in costs and out of the balance
//! 6. growth adjustment of the interest-inclusive flows
//! 7. assembly of the YearResult and the new state, with government metrics
//!    recomputed from the post-interest totals
//!
//! No step may be skipped or reordered.

use super::state::SimulationState;
use crate::demographics;
use crate::economy;
use crate::fiscal::{self, AnnualFiscalFlows, FiscalEngine};
use crate::immigration;
use crate::population::AgeBandCounts;
use crate::reference::{ArrivalsByType, ReferenceData, BASE_YEAR, HISTORICAL_CUTOFF};
use crate::scenario::ScenarioConfig;
use crate::spending::{SpendingBreakdown, SpendingInputs, SpendingProjector};
use serde::{Deserialize, Serialize};

/// Externally visible snapshot of one simulated year
///
/// Appended to an ordered, append-only timeline by the driver; never mutated
/// after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearResult {
    pub year: u32,
    pub is_historical: bool,

    // Demographic flows
    pub births: f64,
    pub deaths: f64,
    pub tfr: f64,
    pub arrivals: ArrivalsByType,
    pub departures: f64,

    // Population
    pub total_population: f64,
    pub native_population: f64,
    pub immigrant_population: f64,
    pub immigrants_by_type: ArrivalsByType,
    pub working_age_population: f64,
    pub age_bands: AgeBandCounts,

    // Fiscal flows at base-year prices (interest included)
    pub fiscal: AnnualFiscalFlows,
    // Growth-adjusted flows (interest included)
    pub adjusted_fiscal: AnnualFiscalFlows,

    // Economy
    pub gdp: f64,
    pub gdp_growth: f64,
    pub gdp_multiplier: f64,
    pub debt: f64,
    pub debt_to_gdp: f64,
    pub interest_rate: f64,
    pub interest_expense: f64,
    pub spending_share_of_gdp: f64,
    pub deficit_share_of_gdp: f64,

    // Parallel COFOG costing
    pub cofog: SpendingBreakdown,
}

/// Year-advance engine binding reference data, a scenario, and the stateful
/// fiscal and spending components
pub struct Engine<'a> {
    reference: &'a ReferenceData,
    scenario: &'a ScenarioConfig,
    fiscal: FiscalEngine,
    spending: SpendingProjector,
    spending_base_set: bool,
}

impl<'a> Engine<'a> {
    pub fn new(reference: &'a ReferenceData, scenario: &'a ScenarioConfig) -> Self {
        Self {
            reference,
            scenario,
            fiscal: FiscalEngine::new(),
            spending: SpendingProjector::new(reference.spending.clone()),
            spending_base_set: false,
        }
    }

    pub fn fiscal(&mut self) -> &mut FiscalEngine {
        &mut self.fiscal
    }

    /// Advance the simulation by one year
    pub fn advance_year(&mut self, state: &SimulationState) -> (YearResult, SimulationState) {
        let year = state.year + 1;
        let previous_working_age = state.population.working_age_total();

        // The spending projector measures change relative to the base year;
        // record base inputs the first time the simulation reaches it
        if !self.spending_base_set && state.year >= BASE_YEAR {
            self.spending.set_base_inputs(spending_inputs(state.year, &state.population, &state.economy));
            self.spending_base_set = true;
        }

        // (1) demographics
        let demo = demographics::advance(
            &state.population,
            year,
            &self.scenario.fertility,
            self.reference,
        );

        // (2) immigration
        let migration = immigration::advance(&demo.state, year, self.scenario, self.reference);
        let population = migration.state;
        let working_age = population.working_age_total();

        // (3) base fiscal aggregation, previous multiplier, zero interest
        let base_flows =
            self.fiscal
                .aggregate_year(&population, year, state.economy.gdp_multiplier);

        // (4) economy
        let econ = economy::advance(
            &state.economy,
            year,
            working_age,
            previous_working_age,
            base_flows.balance,
            self.scenario,
            self.reference,
        );

        // (5) restate with interest
        let flows = base_flows.with_interest(econ.interest_expense);

        // (6) growth adjustment of the interest-inclusive flows
        let adjusted =
            fiscal::apply_growth_adjustment(&flows, year, econ.economy.gdp_multiplier);

        // Parallel COFOG costing for the same year
        let cofog = self.spending.project_year(
            &spending_inputs(year, &population, &econ.economy),
            self.scenario.spending,
        );

        // (7) assemble; government metrics from the post-interest totals
        let gdp_millions = econ.economy.gdp * 1_000.0;
        let spending_share_of_gdp = if gdp_millions > 0.0 {
            adjusted.total_cost() / gdp_millions * 100.0
        } else {
            0.0
        };
        let deficit_share_of_gdp = if gdp_millions > 0.0 {
            -adjusted.balance / gdp_millions * 100.0
        } else {
            0.0
        };

        let result = YearResult {
            year,
            is_historical: year <= HISTORICAL_CUTOFF,
            births: demo.births,
            deaths: demo.deaths,
            tfr: demo.tfr,
            arrivals: migration.arrivals,
            departures: migration.departures,
            total_population: population.total(),
            native_population: population.native_total(),
            immigrant_population: population.immigrant_total(),
            immigrants_by_type: ArrivalsByType::new(
                population.immigrant_total_of(crate::population::ImmigrantType::Work),
                population.immigrant_total_of(crate::population::ImmigrantType::Family),
                population.immigrant_total_of(crate::population::ImmigrantType::Humanitarian),
            ),
            working_age_population: working_age,
            age_bands: population.age_bands(),
            fiscal: flows,
            adjusted_fiscal: adjusted,
            gdp: econ.economy.gdp,
            gdp_growth: econ.gdp_growth,
            gdp_multiplier: econ.economy.gdp_multiplier,
            debt: econ.economy.debt,
            debt_to_gdp: econ.economy.debt_to_gdp(),
            interest_rate: econ.economy.interest_rate,
            interest_expense: econ.interest_expense,
            spending_share_of_gdp,
            deficit_share_of_gdp,
            cofog,
        };

        let next_state = SimulationState::new(year, population, econ.economy);
        (result, next_state)
    }
}

fn spending_inputs(
    year: u32,
    population: &crate::population::PopulationState,
    economy: &crate::economy::EconomicState,
) -> SpendingInputs {
    SpendingInputs {
        year,
        age_bands: population.age_bands(),
        population: population.total(),
        gdp: economy.gdp,
        debt: economy.debt,
        interest_rate: economy.interest_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::init::{initialize_state, InitOptions};

    fn start_state(reference: &ReferenceData, year: u32) -> SimulationState {
        initialize_state(year, &InitOptions::default(), reference)
    }

    #[test]
    fn test_advance_produces_next_year() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = start_state(&reference, 2024);

        let (result, next) = engine.advance_year(&state);
        assert_eq!(result.year, 2025);
        assert_eq!(next.year, 2025);
        assert!(!result.is_historical);
        assert!(result.total_population > 0.0);
        assert!(result.gdp > 0.0);
    }

    #[test]
    fn test_interest_accounting_identity() {
        // primary balance - interest = total balance
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = start_state(&reference, 2024);

        let (result, _) = engine.advance_year(&state);
        let primary = result.fiscal.revenue.total() - result.fiscal.costs.total();
        assert!(
            (primary - result.fiscal.interest_expense - result.fiscal.balance).abs() < 1e-9
        );
        assert!(result.fiscal.interest_expense > 0.0);
        assert!(
            (result.fiscal.total_cost()
                - result.fiscal.costs.total()
                - result.fiscal.interest_expense)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_interest_uses_previous_debt_stock() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = start_state(&reference, 2024);

        let (result, next) = engine.advance_year(&state);
        // Interest bounded by rate * max(prev, new) and rate * min(prev, new)
        let hi = state.economy.debt.max(next.economy.debt) * result.interest_rate * 1_000.0;
        let lo = state.economy.debt.min(next.economy.debt) * result.interest_rate * 1_000.0;
        assert!(result.interest_expense >= lo - 1e-6 && result.interest_expense <= hi + 1e-6);
    }

    #[test]
    fn test_historical_transition_follows_series() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = start_state(&reference, 2009);

        let (result, _) = engine.advance_year(&state);
        assert!(result.is_historical);
        let record = reference.economy.get(2010).unwrap();
        assert_eq!(result.gdp, record.gdp);
        assert_eq!(result.debt, record.debt);
        assert_eq!(result.births, reference.births.get(2010).unwrap());
    }

    #[test]
    fn test_population_flows_are_consistent() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let mut engine = Engine::new(&reference, &scenario);
        let state = start_state(&reference, 2024);

        let (result, next) = engine.advance_year(&state);
        let expected = state.population.total() + result.births - result.deaths
            + result.arrivals.total()
            - result.departures;
        assert!(
            (next.population.total() - expected).abs() < 1.0,
            "population accounting drifted: {} vs {}",
            next.population.total(),
            expected
        );
    }
}
