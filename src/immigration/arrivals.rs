//! Yearly arrival volumes by category
//!
//! Three regimes: recorded history, a scaled-down estimate for years before
//! the earliest record, and scenario volumes for projected years.

use crate::reference::{ArrivalsByType, ReferenceData, HISTORICAL_CUTOFF};
use crate::scenario::ScenarioConfig;

/// Years over which the pre-record estimate scales down to its floor
const PRE_RECORD_RAMP_YEARS: f64 = 40.0;

/// Floor on the pre-record scaling factor
const PRE_RECORD_FLOOR: f64 = 0.2;

/// Arrivals for a year under a scenario
pub fn arrivals_for_year(
    year: u32,
    scenario: &ScenarioConfig,
    reference: &ReferenceData,
) -> ArrivalsByType {
    if year > HISTORICAL_CUTOFF {
        return scenario.immigration;
    }
    historical_arrivals(year, reference)
}

/// Scenario-independent arrival estimate for a historical year
///
/// Recorded years read the table; years before the earliest record scale the
/// earliest year down linearly with distance, to a floor; years past the
/// record (only reachable when initializing beyond the cutoff) hold the last
/// recorded values.
pub fn historical_arrivals(year: u32, reference: &ReferenceData) -> ArrivalsByType {
    if let Some(recorded) = reference.immigration.get(year) {
        return recorded;
    }

    let last_year = reference.immigration.last_year();
    if year > last_year {
        return reference.immigration.get(last_year).unwrap_or_default();
    }

    let earliest_year = reference.immigration.first_year();
    let earliest = reference
        .immigration
        .get(earliest_year)
        .unwrap_or_default();
    let distance = earliest_year.saturating_sub(year) as f64;
    let factor = (1.0 - distance / PRE_RECORD_RAMP_YEARS).max(PRE_RECORD_FLOOR);
    earliest.scaled(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_year_uses_record() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let arrivals = arrivals_for_year(2015, &scenario, &reference);
        assert_eq!(arrivals, reference.immigration.get(2015).unwrap());
    }

    #[test]
    fn test_future_year_uses_scenario() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let arrivals = arrivals_for_year(2030, &scenario, &reference);
        assert_eq!(arrivals, scenario.immigration);
    }

    #[test]
    fn test_pre_record_estimate_scales_down() {
        let reference = ReferenceData::builtin();
        let scenario = ScenarioConfig::baseline();
        let earliest = reference.immigration.get(1990).unwrap();

        let close = arrivals_for_year(1986, &scenario, &reference);
        assert!((close.total() - earliest.total() * 0.9).abs() < 1.0);

        // Far enough back the floor binds
        let distant = arrivals_for_year(1930, &scenario, &reference);
        assert!((distant.total() - earliest.total() * 0.2).abs() < 1.0);
    }
}
