//! Starting-state reconstruction
//!
//! Builds a population for an arbitrary start year from birth-cohort history
//! and cumulative survival, and replays past immigration arrival years with
//! retention and mortality decay. A sanity check compares the reconstructed
//! total against the reference population figure and logs (never fails) when
//! it lands outside tolerance.

use super::state::SimulationState;
use crate::economy::EconomicState;
use crate::immigration::{expected_distribution, historical_arrivals, ImmigrantProfile};
use crate::population::{CohortKey, ImmigrantType, PopulationState};
use crate::reference::{ReferenceData, MAX_AGE};

/// Yearly probability that a settled immigrant has left again
const RETENTION_DECAY: f64 = 0.02;

/// Yearly mortality approximation applied to replayed arrival cohorts
const MORTALITY_APPROX: f64 = 0.005;

/// Relative deviation from the reference total that triggers a warning
const SANITY_TOLERANCE: f64 = 0.10;

/// Options for state reconstruction
#[derive(Debug, Clone, Copy)]
pub struct InitOptions {
    /// How many past arrival years to replay into the immigrant stock
    pub arrival_replay_years: u32,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            arrival_replay_years: 40,
        }
    }
}

/// Reconstruct the simulation state at the end of `year`
pub fn initialize_state(
    year: u32,
    options: &InitOptions,
    reference: &ReferenceData,
) -> SimulationState {
    let mut population = PopulationState::new();

    // Native cohorts: survivors of each historical birth year
    for age in 0..=MAX_AGE {
        let Some(birth_year) = year.checked_sub(age as u32) else {
            continue;
        };
        let Some(births) = reference.births.get(birth_year) else {
            // Cohorts born before the record starts are simply absent
            continue;
        };
        let survivors = births * reference.survival.cumulative(age);
        population.add_native(age, survivors.round());
    }

    // Immigrant stock: replay past arrival years with retention decay and a
    // flat mortality approximation compounded by years in country
    let replay_from = year.saturating_sub(options.arrival_replay_years.saturating_sub(1));
    for arrival_year in replay_from..=year {
        let arrivals = historical_arrivals(arrival_year, reference);
        let years_in = (year - arrival_year) as f64;
        let survival_factor =
            (1.0 - RETENTION_DECAY).powf(years_in) * (1.0 - MORTALITY_APPROX).powf(years_in);

        for kind in ImmigrantType::ALL {
            let profile = ImmigrantProfile::for_type(kind);
            for (arrival_age, persons) in expected_distribution(arrivals.get(kind), profile) {
                let age = (arrival_age as u32 + years_in as u32).min(MAX_AGE as u32) as u8;
                let survivors = (persons * survival_factor).round();
                population.add_immigrants(CohortKey::new(age, kind, arrival_year), survivors);
            }
        }
    }

    sanity_check(year, &population, reference);

    let economy = match reference.economy.get_or_nearest(year) {
        Some(record) => {
            if reference.economy.get(year).is_none() {
                log::warn!(
                    "no economy record for {}, initializing from the nearest covered year",
                    year
                );
            }
            EconomicState {
                gdp: record.gdp,
                gdp_multiplier: 1.0,
                debt: record.debt,
                interest_rate: record.interest_rate,
            }
        }
        None => EconomicState {
            gdp: 1.0,
            gdp_multiplier: 1.0,
            debt: 0.0,
            interest_rate: 0.0,
        },
    };

    SimulationState::new(year, population, economy)
}

/// Compare the reconstructed total against the reference figure
fn sanity_check(year: u32, population: &PopulationState, reference: &ReferenceData) {
    let Some(record) = reference.economy.get(year) else {
        return;
    };
    let total = population.total();
    let deviation = (total - record.population).abs() / record.population;
    if deviation > SANITY_TOLERANCE {
        log::warn!(
            "reconstructed population for {} is {:.0}, reference {:.0} ({:.1}% off)",
            year,
            total,
            record.population,
            deviation * 100.0
        );
    } else {
        log::debug!(
            "reconstructed population for {}: {:.0} vs reference {:.0}",
            year,
            total,
            record.population
        );
    }
}
