//! Birth projection
//!
//! Historical years return the recorded birth count and its implied total
//! fertility rate. Projected years interpolate the TFR linearly from the
//! base-year value toward the scenario target until the transition year,
//! then hold it constant.

use crate::reference::{BirthHistory, BASE_TFR, HISTORICAL_CUTOFF};
use crate::scenario::FertilityAssumption;

/// Assumed span of childbearing years behind the births formula
pub const CHILDBEARING_SPAN: f64 = 35.0;

/// Births for one year and the TFR they imply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthsOutcome {
    pub births: f64,
    pub tfr: f64,
}

/// Effective TFR for a projected year under a fertility assumption
pub fn effective_tfr(year: u32, fertility: &FertilityAssumption) -> f64 {
    if year <= HISTORICAL_CUTOFF {
        return BASE_TFR;
    }
    if year >= fertility.transition_year {
        return fertility.target_tfr;
    }
    let span = (fertility.transition_year - HISTORICAL_CUTOFF) as f64;
    let elapsed = (year - HISTORICAL_CUTOFF) as f64;
    BASE_TFR + (fertility.target_tfr - BASE_TFR) * elapsed / span
}

/// Project births for a year
///
/// `women` is the count of women of childbearing age in the population the
/// births are drawn from (post-aging, pre-birth).
pub fn project_births(
    year: u32,
    women: f64,
    fertility: &FertilityAssumption,
    history: &BirthHistory,
) -> BirthsOutcome {
    if year <= HISTORICAL_CUTOFF {
        if let Some(births) = history.get(year) {
            let tfr = if women > 0.0 {
                births * CHILDBEARING_SPAN / women
            } else {
                0.0
            };
            return BirthsOutcome { births, tfr };
        }
        // Historical year without a record: fall back to the base-year rate
        log::warn!("no birth record for historical year {}, using base TFR", year);
    }

    let tfr = effective_tfr(year, fertility);
    let births = (tfr * women / CHILDBEARING_SPAN).round();
    BirthsOutcome { births, tfr }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assumption(target: f64, transition: u32) -> FertilityAssumption {
        FertilityAssumption {
            target_tfr: target,
            transition_year: transition,
        }
    }

    #[test]
    fn test_historical_year_uses_record() {
        let history = BirthHistory::builtin();
        let outcome = project_births(2020, 1_200_000.0, &assumption(1.8, 2040), &history);
        assert_eq!(outcome.births, 46_500.0);
        assert_relative_eq!(outcome.tfr, 46_500.0 * 35.0 / 1_200_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tfr_interpolation() {
        let fertility = assumption(1.85, 2040);
        // 2032 is halfway from the 2024 cutoff to the 2040 transition
        let halfway = effective_tfr(2032, &fertility);
        assert_relative_eq!(halfway, (BASE_TFR + 1.85) / 2.0, epsilon = 1e-9);
        // Held at target after transition
        assert_eq!(effective_tfr(2045, &fertility), 1.85);
        assert_eq!(effective_tfr(2040, &fertility), 1.85);
    }

    #[test]
    fn test_births_scale_linearly_with_tfr() {
        let history = BirthHistory::builtin();
        let women = 1_000_000.0;
        // Past the transition year both scenarios sit at their targets
        let single = project_births(2050, women, &assumption(0.9, 2030), &history);
        let double = project_births(2050, women, &assumption(1.8, 2030), &history);
        assert_relative_eq!(double.births, single.births * 2.0, max_relative = 1e-3);
    }

    #[test]
    fn test_births_formula() {
        let history = BirthHistory::builtin();
        let outcome = project_births(2050, 1_050_000.0, &assumption(1.4, 2030), &history);
        assert_eq!(outcome.births, (1.4 * 1_050_000.0 / 35.0_f64).round());
    }
}
