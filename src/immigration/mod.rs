//! Immigration transition: arrivals, age placement, emigration
//!
//! The combined step places this year's arrivals into the population by the
//! category age distribution, then applies emigration to the post-arrival
//! stock, so cohorts arriving this year already carry emigration risk.

mod arrivals;
mod integration;
mod placement;

pub use arrivals::{arrivals_for_year, historical_arrivals};
pub use integration::{ImmigrantProfile, WELFARE_DECAY_YEARS};
pub use placement::{expected_distribution, sample_ages};

use crate::population::{CohortKey, PopulationState};
use crate::reference::{ArrivalsByType, ReferenceData};
use crate::scenario::ScenarioConfig;

/// Result of one immigration year-step
#[derive(Debug, Clone)]
pub struct ImmigrationOutcome {
    pub state: PopulationState,
    pub arrivals: ArrivalsByType,
    pub departures: f64,
}

/// Place arrivals for `year` into the state
pub fn place_arrivals(
    state: &PopulationState,
    year: u32,
    arrivals: ArrivalsByType,
) -> PopulationState {
    let mut next = state.clone();
    for kind in crate::population::ImmigrantType::ALL {
        let profile = ImmigrantProfile::for_type(kind);
        for (age, persons) in expected_distribution(arrivals.get(kind), profile) {
            next.add_immigrants(CohortKey::new(age, kind, year), persons);
        }
    }
    next
}

/// Apply one year of emigration to the immigrant table
///
/// Natives are never subject to emigration in this model. Removal rounds to
/// whole persons like the mortality step.
pub fn apply_emigration(state: &PopulationState, year: u32) -> (PopulationState, f64) {
    let mut next = state.clone();
    let mut departures = 0.0;

    next.retain_map_immigrants(|key, count| {
        let profile = ImmigrantProfile::for_type(key.kind);
        let rate = profile.emigration_rate(key.years_in_country(year));
        let removed = (count * rate).round().min(count);
        departures += removed;
        count - removed
    });

    (next, departures)
}

/// Run the full immigration step for `year`
pub fn advance(
    state: &PopulationState,
    year: u32,
    scenario: &ScenarioConfig,
    reference: &ReferenceData,
) -> ImmigrationOutcome {
    let arrivals = arrivals_for_year(year, scenario, reference);
    let arrived = place_arrivals(state, year, arrivals);
    let (settled, departures) = apply_emigration(&arrived, year);

    ImmigrationOutcome {
        state: settled,
        arrivals,
        departures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::ImmigrantType;

    #[test]
    fn test_arrivals_land_with_arrival_year() {
        let state = PopulationState::new();
        let arrivals = ArrivalsByType::new(1_000.0, 0.0, 0.0);
        let placed = place_arrivals(&state, 2030, arrivals);

        assert_eq!(placed.immigrant_total(), 1_000.0);
        for (key, _) in placed.immigrant_cohorts() {
            assert_eq!(key.arrival_year, 2030);
            assert_eq!(key.kind, ImmigrantType::Work);
        }
    }

    #[test]
    fn test_new_arrivals_face_emigration() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let state = PopulationState::new();

        let outcome = advance(&state, 2030, &scenario, &reference);
        // Stock is strictly below arrivals because year-0 emigration applies
        assert!(outcome.departures > 0.0);
        assert!(
            outcome.state.immigrant_total() < outcome.arrivals.total(),
            "stock {} arrivals {}",
            outcome.state.immigrant_total(),
            outcome.arrivals.total()
        );
    }

    #[test]
    fn test_emigration_never_touches_natives() {
        let mut state = PopulationState::new();
        state.add_native(30, 10_000.0);
        state.add_immigrants(CohortKey::new(30, ImmigrantType::Work, 2020), 1_000.0);

        let (next, departures) = apply_emigration(&state, 2025);
        assert_eq!(next.native_total(), 10_000.0);
        assert!(departures > 0.0);
    }

    #[test]
    fn test_settled_cohorts_emigrate_less() {
        let mut fresh = PopulationState::new();
        fresh.add_immigrants(CohortKey::new(30, ImmigrantType::Work, 2025), 10_000.0);
        let (_, fresh_departures) = apply_emigration(&fresh, 2025);

        let mut settled = PopulationState::new();
        settled.add_immigrants(CohortKey::new(30, ImmigrantType::Work, 2005), 10_000.0);
        let (_, settled_departures) = apply_emigration(&settled, 2025);

        assert!(settled_departures < fresh_departures);
    }
}
