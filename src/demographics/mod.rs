//! Demographic transition: aging, mortality, births
//!
//! The combined step runs in a fixed order: age everyone by one year, apply
//! mortality, then compute and inject births using the post-aging, pre-birth
//! count of women of childbearing age. Reordering changes results.

mod fertility;
mod mortality;

pub use fertility::{effective_tfr, project_births, BirthsOutcome, CHILDBEARING_SPAN};
pub use mortality::apply_mortality;

use crate::population::{CohortKey, PopulationState};
use crate::reference::{ReferenceData, MAX_AGE};
use crate::scenario::FertilityAssumption;

/// Result of one demographic year-step
#[derive(Debug, Clone)]
pub struct DemographicsOutcome {
    pub state: PopulationState,
    pub births: f64,
    pub deaths: f64,
    pub tfr: f64,
}

/// Age every cohort by one year
///
/// Ages cap at 100; cohorts colliding at the cap are summed. Immigrant
/// cohorts keep their category and arrival year. Total population is
/// unchanged.
pub fn age_population(state: &PopulationState) -> PopulationState {
    let mut next = PopulationState::new();
    for (age, count) in state.native_cohorts() {
        next.add_native(age.saturating_add(1).min(MAX_AGE), count);
    }
    for (key, count) in state.immigrant_cohorts() {
        let aged = CohortKey::new(
            key.age.saturating_add(1).min(MAX_AGE),
            key.kind,
            key.arrival_year,
        );
        next.add_immigrants(aged, count);
    }
    next
}

/// Run the full demographic step for `year`
pub fn advance(
    state: &PopulationState,
    year: u32,
    fertility: &FertilityAssumption,
    reference: &ReferenceData,
) -> DemographicsOutcome {
    let aged = age_population(state);
    let (mut survived, deaths) = apply_mortality(&aged, &reference.survival);

    // Women counted after aging and mortality, before the new cohort exists
    let women = survived.women_of_childbearing_age();
    let outcome = project_births(year, women, fertility, &reference.births);
    survived.add_native(0, outcome.births);

    DemographicsOutcome {
        state: survived,
        births: outcome.births,
        deaths,
        tfr: outcome.tfr,
    }
}
