//! Scenario configuration
//!
//! A scenario is an input value, not state: it is supplied once per run and
//! read by every step. Each scenario family is a closed enum so an unknown
//! scenario is unrepresentable; user-supplied rates go through the `Custom`
//! variants.

use crate::reference::ArrivalsByType;
use serde::{Deserialize, Serialize};

/// Annual labour-productivity growth assumed by the workforce-adjusted GDP
/// scenario
pub const PRODUCTIVITY_GROWTH: f64 = 0.012;

/// Birth-rate assumption: where the total fertility rate is heading and when
/// it gets there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FertilityAssumption {
    /// Target total fertility rate
    pub target_tfr: f64,
    /// Year by which the target is fully reached
    pub transition_year: u32,
}

/// Post-cutoff immigration volumes per year, by category
pub type ImmigrationVolumes = ArrivalsByType;

/// GDP growth regime for projected years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GdpScenario {
    /// Fixed 1.5% nominal growth
    Baseline,
    /// Fixed 2.5% growth
    Optimistic,
    /// Fixed 0.5% growth
    Stagnation,
    /// Productivity growth plus the change in the working-age population
    WorkforceAdjusted,
    /// Fixed user-supplied rate
    Custom(f64),
}

impl GdpScenario {
    /// Growth rate for one projected year
    ///
    /// `workforce_change` is (current working-age - previous) / previous; it
    /// only affects the workforce-adjusted variant.
    pub fn growth_rate(&self, workforce_change: f64) -> f64 {
        match self {
            GdpScenario::Baseline => 0.015,
            GdpScenario::Optimistic => 0.025,
            GdpScenario::Stagnation => 0.005,
            GdpScenario::WorkforceAdjusted => PRODUCTIVITY_GROWTH + workforce_change,
            GdpScenario::Custom(rate) => *rate,
        }
    }
}

/// Interest-rate regime for projected years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InterestScenario {
    /// 1% on the debt stock
    Low,
    /// 2%
    Baseline,
    /// 4%
    High,
    /// Fixed user-supplied rate
    Custom(f64),
}

impl InterestScenario {
    pub fn rate(&self) -> f64 {
        match self {
            InterestScenario::Low => 0.01,
            InterestScenario::Baseline => 0.02,
            InterestScenario::High => 0.04,
            InterestScenario::Custom(rate) => *rate,
        }
    }
}

/// Discretionary stance applied to the COFOG spending projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendingScenario {
    Baseline,
    /// Demographically driven groups compressed by 0.5% per year
    Austerity,
    /// Demographically driven groups expanded by 0.5% per year
    Expansion,
}

impl SpendingScenario {
    /// Yearly multiplier compounded onto demographically driven groups
    pub fn demographic_multiplier(&self) -> f64 {
        match self {
            SpendingScenario::Baseline => 1.0,
            SpendingScenario::Austerity => 0.995,
            SpendingScenario::Expansion => 1.005,
        }
    }
}

/// Full scenario supplied to a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub fertility: FertilityAssumption,
    /// Yearly arrivals per category for years after the historical cutoff
    pub immigration: ImmigrationVolumes,
    pub gdp: GdpScenario,
    pub interest: InterestScenario,
    pub spending: SpendingScenario,
}

impl ScenarioConfig {
    /// Middle-of-the-road continuation of current trends
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            fertility: FertilityAssumption {
                target_tfr: 1.45,
                transition_year: 2040,
            },
            immigration: ImmigrationVolumes::new(20_000.0, 15_000.0, 8_000.0),
            gdp: GdpScenario::Baseline,
            interest: InterestScenario::Baseline,
            spending: SpendingScenario::Baseline,
        }
    }

    /// Fertility keeps falling and never recovers
    pub fn low_fertility() -> Self {
        Self {
            name: "low-fertility".to_string(),
            fertility: FertilityAssumption {
                target_tfr: 1.05,
                transition_year: 2035,
            },
            ..Self::baseline()
        }
    }

    /// Fertility recovers toward replacement
    pub fn recovery() -> Self {
        Self {
            name: "recovery".to_string(),
            fertility: FertilityAssumption {
                target_tfr: 1.85,
                transition_year: 2045,
            },
            ..Self::baseline()
        }
    }

    /// Doubled work-based immigration with workforce-linked growth
    pub fn high_immigration() -> Self {
        Self {
            name: "high-immigration".to_string(),
            immigration: ImmigrationVolumes::new(40_000.0, 22_000.0, 10_000.0),
            gdp: GdpScenario::WorkforceAdjusted,
            ..Self::baseline()
        }
    }

    /// Restrictive immigration policy
    pub fn low_immigration() -> Self {
        Self {
            name: "low-immigration".to_string(),
            immigration: ImmigrationVolumes::new(10_000.0, 8_000.0, 3_000.0),
            gdp: GdpScenario::WorkforceAdjusted,
            ..Self::baseline()
        }
    }

    /// High interest rates and spending restraint
    pub fn consolidation() -> Self {
        Self {
            name: "consolidation".to_string(),
            interest: InterestScenario::High,
            spending: SpendingScenario::Austerity,
            gdp: GdpScenario::Stagnation,
            ..Self::baseline()
        }
    }

    /// All builtin presets
    pub fn presets() -> Vec<ScenarioConfig> {
        vec![
            Self::baseline(),
            Self::low_fertility(),
            Self::recovery(),
            Self::high_immigration(),
            Self::low_immigration(),
            Self::consolidation(),
        ]
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<ScenarioConfig> {
        Self::presets().into_iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gdp_growth_rates() {
        assert_eq!(GdpScenario::Baseline.growth_rate(0.0), 0.015);
        assert_eq!(GdpScenario::Custom(0.03).growth_rate(0.0), 0.03);

        // Workforce adjustment: productivity plus workforce change
        let rate = GdpScenario::WorkforceAdjusted.growth_rate(-0.01);
        assert!((rate - (PRODUCTIVITY_GROWTH - 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_preset_lookup() {
        assert!(ScenarioConfig::preset("baseline").is_some());
        assert!(ScenarioConfig::preset("high-immigration").is_some());
        assert!(ScenarioConfig::preset("made-up").is_none());
    }

    #[test]
    fn test_presets_are_distinct() {
        let presets = ScenarioConfig::presets();
        let mut names: Vec<&str> = presets.iter().map(|s| s.name.as_str()).collect();
        names.dedup();
        assert_eq!(names.len(), presets.len());
    }
}
