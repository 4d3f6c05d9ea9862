//! Integration and emigration profiles per immigrant category
//!
//! Employment rate and income decile move linearly from an initial to a
//! target value over a category-specific number of years, then hold. Welfare
//! dependency decays from its initial value toward a floor over a fixed
//! ten-year horizon. Emigration propensity starts at a category base rate and
//! falls with tenure.

use crate::population::ImmigrantType;

/// Horizon over which welfare dependency decays toward its floor
pub const WELFARE_DECAY_YEARS: f64 = 10.0;

/// Behavioural profile of one immigrant category
#[derive(Debug, Clone, Copy)]
pub struct ImmigrantProfile {
    pub kind: ImmigrantType,

    /// Employment rate in the arrival year
    pub employment_initial: f64,
    /// Long-run employment rate
    pub employment_target: f64,
    /// Years to reach the employment and income targets
    pub integration_years: f64,

    /// Income decile at arrival (fractional deciles interpolate)
    pub decile_initial: f64,
    /// Long-run income decile
    pub decile_target: f64,

    /// Welfare dependency in the arrival year
    pub welfare_initial: f64,

    /// Annual emigration rate before tenure decay
    pub emigration_base_rate: f64,

    // Target age distribution of arrivals (truncated normal)
    pub age_mean: f64,
    pub age_sd: f64,
    pub age_min: u8,
    pub age_max: u8,
}

impl ImmigrantProfile {
    /// Profile for a category
    pub fn for_type(kind: ImmigrantType) -> &'static ImmigrantProfile {
        match kind {
            ImmigrantType::Work => &WORK_PROFILE,
            ImmigrantType::Family => &FAMILY_PROFILE,
            ImmigrantType::Humanitarian => &HUMANITARIAN_PROFILE,
        }
    }

    fn ramp(&self, initial: f64, target: f64, years_in_country: f64) -> f64 {
        if years_in_country >= self.integration_years {
            return target;
        }
        initial + (target - initial) * years_in_country / self.integration_years
    }

    /// Employment rate after `years_in_country`
    pub fn employment_rate(&self, years_in_country: u32) -> f64 {
        self.ramp(
            self.employment_initial,
            self.employment_target,
            years_in_country as f64,
        )
    }

    /// Income decile after `years_in_country`
    pub fn income_decile(&self, years_in_country: u32) -> f64 {
        self.ramp(
            self.decile_initial,
            self.decile_target,
            years_in_country as f64,
        )
    }

    /// Welfare dependency after `years_in_country`
    ///
    /// Decays linearly toward `max(0.05, initial * 0.2)` over ten years, then
    /// holds at the floor.
    pub fn welfare_dependency(&self, years_in_country: u32) -> f64 {
        let floor = (self.welfare_initial * 0.2).max(0.05);
        let years = years_in_country as f64;
        if years >= WELFARE_DECAY_YEARS {
            return floor;
        }
        self.welfare_initial + (floor - self.welfare_initial) * years / WELFARE_DECAY_YEARS
    }

    /// Annual emigration rate after `years_in_country`
    ///
    /// Base rate times the tenure decay `max(0.3, 1 - years * 0.05)`.
    pub fn emigration_rate(&self, years_in_country: u32) -> f64 {
        let decay = (1.0 - years_in_country as f64 * 0.05).max(0.3);
        self.emigration_base_rate * decay
    }
}

static WORK_PROFILE: ImmigrantProfile = ImmigrantProfile {
    kind: ImmigrantType::Work,
    employment_initial: 0.75,
    employment_target: 0.85,
    integration_years: 5.0,
    decile_initial: 5.0,
    decile_target: 6.0,
    welfare_initial: 0.05,
    emigration_base_rate: 0.06,
    age_mean: 29.0,
    age_sd: 8.0,
    age_min: 18,
    age_max: 55,
};

static FAMILY_PROFILE: ImmigrantProfile = ImmigrantProfile {
    kind: ImmigrantType::Family,
    employment_initial: 0.35,
    employment_target: 0.65,
    integration_years: 10.0,
    decile_initial: 3.0,
    decile_target: 4.5,
    welfare_initial: 0.25,
    emigration_base_rate: 0.03,
    age_mean: 26.0,
    age_sd: 12.0,
    age_min: 0,
    age_max: 65,
};

static HUMANITARIAN_PROFILE: ImmigrantProfile = ImmigrantProfile {
    kind: ImmigrantType::Humanitarian,
    employment_initial: 0.15,
    employment_target: 0.55,
    integration_years: 15.0,
    decile_initial: 2.0,
    decile_target: 4.0,
    welfare_initial: 0.60,
    emigration_base_rate: 0.015,
    age_mean: 24.0,
    age_sd: 10.0,
    age_min: 0,
    age_max: 60,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_employment_ramps_to_target() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Humanitarian);
        assert_eq!(profile.employment_rate(0), 0.15);
        assert_eq!(profile.employment_rate(15), 0.55);
        assert_eq!(profile.employment_rate(30), 0.55);

        let midway = profile.employment_rate(7);
        assert!(midway > 0.15 && midway < 0.55);
    }

    #[test]
    fn test_welfare_decay_floor() {
        let humanitarian = ImmigrantProfile::for_type(ImmigrantType::Humanitarian);
        // Floor is max(0.05, 0.6 * 0.2) = 0.12
        assert_relative_eq!(humanitarian.welfare_dependency(10), 0.12, epsilon = 1e-12);
        assert_relative_eq!(humanitarian.welfare_dependency(25), 0.12, epsilon = 1e-12);

        let work = ImmigrantProfile::for_type(ImmigrantType::Work);
        // 0.05 * 0.2 = 0.01, floored at 0.05
        assert_relative_eq!(work.welfare_dependency(10), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_emigration_tenure_decay() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Work);
        assert_relative_eq!(profile.emigration_rate(0), 0.06, epsilon = 1e-12);
        assert_relative_eq!(profile.emigration_rate(10), 0.06 * 0.5, epsilon = 1e-12);
        // Decay bottoms out at 0.3
        assert_relative_eq!(profile.emigration_rate(20), 0.06 * 0.3, epsilon = 1e-12);
        assert_relative_eq!(profile.emigration_rate(40), 0.06 * 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_category_ordering() {
        let work = ImmigrantProfile::for_type(ImmigrantType::Work);
        let humanitarian = ImmigrantProfile::for_type(ImmigrantType::Humanitarian);
        assert!(work.emigration_base_rate > humanitarian.emigration_base_rate);
        assert!(work.employment_rate(0) > humanitarian.employment_rate(0));
    }
}
