//! COFOG spending projection
//!
//! A parallel, coarser costing engine: each top-level COFOG group is
//! projected from its base-year level by a declared driver (demographic
//! ratios, population, GDP linkage, discretionary growth, or a mixed
//! government-operations rule). Used for cross-checking the bottom-up fiscal
//! aggregation and for an alternate cost breakdown.

use crate::population::AgeBandCounts;
use crate::reference::{CofogGroup, SpendingHistory};
use crate::scenario::SpendingScenario;
use serde::{Deserialize, Serialize};

/// How a per-capita group follows the population
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerCapitaMode {
    /// Constant real amount per head
    Constant,
    /// Per-head amount growing at a fixed rate
    Growing(f64),
    /// Absolute level frozen at the base year
    Frozen,
}

/// How a GDP-linked group follows output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GdpLinkMode {
    /// Constant share of GDP
    ConstantShare,
    /// Fixed absolute growth, independent of GDP
    AbsoluteGrowth(f64),
    /// GDP share growing at a fixed rate
    GrowingShare(f64),
}

/// How the administrative part of government operations evolves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdminMode {
    FollowsGdp,
    Frozen,
}

/// How the debt-service part of government operations evolves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebtServiceMode {
    /// Follows debt stock times interest rate relative to the base year
    DebtLinked,
    /// Compounding fixed reduction
    OptimisticReduction(f64),
}

/// Projection rule for one spending group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpendingDriver {
    /// Weighted blend of age-band ratios, times the compounding scenario
    /// multiplier
    Demographic {
        child_weight: f64,
        working_weight: f64,
        elderly_weight: f64,
    },
    PerCapita(PerCapitaMode),
    GdpLinked(GdpLinkMode),
    /// Compounding fixed real growth
    Discretionary { real_growth: f64 },
    /// Government operations: an admin portion and a debt-service portion
    GovernmentOperations {
        admin_share: f64,
        admin: AdminMode,
        debt_service: DebtServiceMode,
    },
}

/// Inputs to one projected year
#[derive(Debug, Clone, Copy)]
pub struct SpendingInputs {
    pub year: u32,
    pub age_bands: AgeBandCounts,
    pub population: f64,
    /// Billions
    pub gdp: f64,
    /// Billions
    pub debt: f64,
    pub interest_rate: f64,
}

/// Projected expenditure for one year, millions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingBreakdown {
    pub year: u32,
    /// Per group, in `CofogGroup::ALL` order
    pub by_group: Vec<(CofogGroup, f64)>,
}

impl SpendingBreakdown {
    pub fn total(&self) -> f64 {
        self.by_group.iter().map(|(_, amount)| amount).sum()
    }

    pub fn get(&self, group: CofogGroup) -> f64 {
        self.by_group
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }

    /// Legacy 4-category rollup for cross-checks against the bottom-up
    /// fiscal estimate
    pub fn legacy_rollup(&self) -> LegacyCostRollup {
        let mut rollup = LegacyCostRollup::default();
        for (group, amount) in &self.by_group {
            match group {
                CofogGroup::Education => rollup.education += amount,
                CofogGroup::Health => rollup.healthcare += amount,
                CofogGroup::SocialProtection => {
                    // Social protection splits into pensions and other
                    // transfers at the base-year proportion
                    rollup.pension += amount * 0.6;
                    rollup.benefits += amount * 0.4;
                }
                _ => rollup.other += amount,
            }
        }
        rollup
    }
}

/// The older education/healthcare/pension/benefits/other cost shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyCostRollup {
    pub education: f64,
    pub healthcare: f64,
    pub pension: f64,
    pub benefits: f64,
    pub other: f64,
}

impl LegacyCostRollup {
    pub fn total(&self) -> f64 {
        self.education + self.healthcare + self.pension + self.benefits + self.other
    }
}

/// Spending projection engine
#[derive(Debug, Clone)]
pub struct SpendingProjector {
    history: SpendingHistory,
    base_year: u32,
    base_values: [f64; 10],
    drivers: [SpendingDriver; 10],
    base_inputs: Option<SpendingInputs>,
}

impl SpendingProjector {
    /// Projector over a spending history with the default driver mapping
    pub fn new(history: SpendingHistory) -> Self {
        let (base_year, base_values) = history.base_year_values();
        Self {
            history,
            base_year,
            base_values,
            drivers: Self::default_drivers(),
            base_inputs: None,
        }
    }

    /// Record the base-year demographic and macro inputs
    ///
    /// Projection ratios are taken relative to these; must be called with the
    /// base-year state before projecting future years.
    pub fn set_base_inputs(&mut self, inputs: SpendingInputs) {
        self.base_inputs = Some(inputs);
    }

    pub fn base_year(&self) -> u32 {
        self.base_year
    }

    /// Replace the projection rule for one group
    pub fn set_driver(&mut self, group: CofogGroup, driver: SpendingDriver) {
        if let Some(index) = CofogGroup::ALL.iter().position(|g| *g == group) {
            self.drivers[index] = driver;
        }
    }

    /// The projection rule currently declared for a group
    pub fn driver(&self, group: CofogGroup) -> Option<SpendingDriver> {
        CofogGroup::ALL
            .iter()
            .position(|g| *g == group)
            .map(|index| self.drivers[index])
    }

    /// Driver per group, in `CofogGroup::ALL` order
    fn default_drivers() -> [SpendingDriver; 10] {
        [
            // General public services: admin plus debt service
            SpendingDriver::GovernmentOperations {
                admin_share: 0.6,
                admin: AdminMode::FollowsGdp,
                debt_service: DebtServiceMode::DebtLinked,
            },
            // Defence: constant share of GDP
            SpendingDriver::GdpLinked(GdpLinkMode::ConstantShare),
            // Public order: per-capita constant
            SpendingDriver::PerCapita(PerCapitaMode::Constant),
            // Economic affairs: constant share of GDP
            SpendingDriver::GdpLinked(GdpLinkMode::ConstantShare),
            // Environmental protection: discretionary growth
            SpendingDriver::Discretionary { real_growth: 0.01 },
            // Housing: discretionary growth
            SpendingDriver::Discretionary { real_growth: 0.005 },
            // Health: elderly-weighted demographic
            SpendingDriver::Demographic {
                child_weight: 0.1,
                working_weight: 0.3,
                elderly_weight: 0.6,
            },
            // Recreation and culture: per-capita, slowly growing
            SpendingDriver::PerCapita(PerCapitaMode::Growing(0.005)),
            // Education: child-weighted demographic
            SpendingDriver::Demographic {
                child_weight: 0.75,
                working_weight: 0.25,
                elderly_weight: 0.0,
            },
            // Social protection: heavily elderly-weighted demographic
            SpendingDriver::Demographic {
                child_weight: 0.1,
                working_weight: 0.2,
                elderly_weight: 0.7,
            },
        ]
    }

    /// Expenditure by group for a year
    ///
    /// Historical years read (interpolated) history; projected years apply
    /// each group's driver to its base-year level.
    pub fn project_year(
        &self,
        inputs: &SpendingInputs,
        scenario: SpendingScenario,
    ) -> SpendingBreakdown {
        if inputs.year <= self.base_year {
            if let Some(values) = self.history.get(inputs.year) {
                return SpendingBreakdown {
                    year: inputs.year,
                    by_group: CofogGroup::ALL.iter().copied().zip(values).collect(),
                };
            }
        }

        let base = match &self.base_inputs {
            Some(base) => base,
            None => {
                log::warn!("spending projector has no base inputs, returning base-year levels");
                return SpendingBreakdown {
                    year: inputs.year,
                    by_group: CofogGroup::ALL.iter().copied().zip(self.base_values).collect(),
                };
            }
        };
        let years = (inputs.year.saturating_sub(self.base_year)) as f64;

        let by_group = CofogGroup::ALL
            .iter()
            .enumerate()
            .map(|(i, &group)| {
                let amount =
                    self.project_group(self.base_values[i], self.drivers[i], inputs, base, years, scenario);
                (group, amount)
            })
            .collect();

        SpendingBreakdown {
            year: inputs.year,
            by_group,
        }
    }

    fn project_group(
        &self,
        base_amount: f64,
        driver: SpendingDriver,
        inputs: &SpendingInputs,
        base: &SpendingInputs,
        years: f64,
        scenario: SpendingScenario,
    ) -> f64 {
        match driver {
            SpendingDriver::Demographic {
                child_weight,
                working_weight,
                elderly_weight,
            } => {
                let blend = child_weight * ratio(inputs.age_bands.children, base.age_bands.children)
                    + working_weight
                        * ratio(inputs.age_bands.working_age, base.age_bands.working_age)
                    + elderly_weight * ratio(inputs.age_bands.elderly, base.age_bands.elderly);
                base_amount * blend * scenario.demographic_multiplier().powf(years)
            }
            SpendingDriver::PerCapita(mode) => {
                let population_ratio = ratio(inputs.population, base.population);
                match mode {
                    PerCapitaMode::Constant => base_amount * population_ratio,
                    PerCapitaMode::Growing(rate) => {
                        base_amount * population_ratio * (1.0 + rate).powf(years)
                    }
                    PerCapitaMode::Frozen => base_amount,
                }
            }
            SpendingDriver::GdpLinked(mode) => match mode {
                GdpLinkMode::ConstantShare => base_amount * ratio(inputs.gdp, base.gdp),
                GdpLinkMode::AbsoluteGrowth(rate) => base_amount * (1.0 + rate).powf(years),
                GdpLinkMode::GrowingShare(rate) => {
                    base_amount * ratio(inputs.gdp, base.gdp) * (1.0 + rate).powf(years)
                }
            },
            SpendingDriver::Discretionary { real_growth } => {
                base_amount * (1.0 + real_growth).powf(years)
            }
            SpendingDriver::GovernmentOperations {
                admin_share,
                admin,
                debt_service,
            } => {
                let admin_base = base_amount * admin_share;
                let admin_part = match admin {
                    AdminMode::FollowsGdp => admin_base * ratio(inputs.gdp, base.gdp),
                    AdminMode::Frozen => admin_base,
                };
                let service_base = base_amount * (1.0 - admin_share);
                let service_part = match debt_service {
                    DebtServiceMode::DebtLinked => {
                        let base_service = base.debt * base.interest_rate;
                        let current_service = inputs.debt * inputs.interest_rate;
                        service_base * ratio(current_service, base_service)
                    }
                    DebtServiceMode::OptimisticReduction(rate) => {
                        service_base * (1.0 - rate).powf(years)
                    }
                };
                admin_part + service_part
            }
        }
    }
}

/// Guarded ratio; 1.0 when the base is zero
fn ratio(current: f64, base: f64) -> f64 {
    if base <= 0.0 {
        1.0
    } else {
        current / base
    }
}
