//! Mortality application over a population state

use crate::population::PopulationState;
use crate::reference::SurvivalTable;

/// Apply one year of age-specific mortality to every cohort
///
/// Removes `round(count * rate)` from each cohort; cohorts that reach zero
/// are deleted. Returns the new state and the total death count.
pub fn apply_mortality(state: &PopulationState, survival: &SurvivalTable) -> (PopulationState, f64) {
    let mut next = state.clone();
    let mut deaths = 0.0;

    next.retain_map_native(|age, count| {
        let removed = (count * survival.mortality_rate(age)).round().min(count);
        deaths += removed;
        count - removed
    });

    next.retain_map_immigrants(|key, count| {
        let removed = (count * survival.mortality_rate(key.age)).round().min(count);
        deaths += removed;
        count - removed
    });

    (next, deaths)
}
