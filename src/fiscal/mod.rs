//! Fiscal component: per-person calculation, memoization, aggregation, and
//! growth adjustment

mod adjust;
mod aggregate;
mod cache;
mod person;
pub mod tax;

pub use adjust::{
    apply_growth_adjustment, HEALTHCARE_COST_PREMIUM, PENSION_COST_PREMIUM,
    REVENUE_ELASTICITY_PREMIUM,
};
pub use aggregate::{
    aggregate, AnnualFiscalFlows, BalanceByGroup, CostByCategory, RevenueBySource,
};
pub use cache::{FiscalCache, FiscalCacheKey, DEFAULT_CACHE_CEILING};
pub use person::{person_year, PersonOptions, PersonYearFiscal};

use crate::population::PopulationState;

/// Fiscal engine owning the memo cache
///
/// One engine per simulation run; independent runs never share cache state.
#[derive(Debug, Default)]
pub struct FiscalEngine {
    cache: FiscalCache,
}

impl FiscalEngine {
    pub fn new() -> Self {
        Self {
            cache: FiscalCache::new(),
        }
    }

    pub fn with_cache_ceiling(ceiling: usize) -> Self {
        Self {
            cache: FiscalCache::with_ceiling(ceiling),
        }
    }

    /// Memoized per-person-year calculation
    pub fn person_year(&mut self, age: u8, decile: u8, opts: &PersonOptions) -> PersonYearFiscal {
        let key = FiscalCacheKey::new(age, decile, opts);
        if let Some(result) = self.cache.get(&key) {
            return result;
        }
        let result = person::person_year(age, decile, opts);
        self.cache.insert(key, result);
        result
    }

    /// Aggregate a population snapshot into annual flows
    pub fn aggregate_year(
        &mut self,
        population: &PopulationState,
        year: u32,
        wage_multiplier: f64,
    ) -> AnnualFiscalFlows {
        aggregate(self, population, year, wage_multiplier)
    }

    /// Drop all memoized results; outputs are unaffected, only cost
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &FiscalCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::immigration::ImmigrantProfile;
    use crate::population::{CohortKey, ImmigrantType};

    /// Per-person result for an immigrant with the profile overrides applied
    fn immigrant_person(
        engine: &mut FiscalEngine,
        kind: ImmigrantType,
        age: u8,
        years_in: u32,
    ) -> PersonYearFiscal {
        let profile = ImmigrantProfile::for_type(kind);
        let opts = PersonOptions {
            employment_rate: Some(profile.employment_rate(years_in)),
            income_decile: Some(profile.income_decile(years_in)),
            welfare_multiplier: 1.0 + profile.welfare_dependency(years_in),
            ..Default::default()
        };
        engine.person_year(age, 5, &opts)
    }

    #[test]
    fn test_cache_returns_identical_results() {
        let mut engine = FiscalEngine::new();
        let opts = PersonOptions::default();
        let first = engine.person_year(42, 6, &opts);
        let second = engine.person_year(42, 6, &opts);
        assert_eq!(first, second);
        assert_eq!(engine.cache().hits, 1);
    }

    #[test]
    fn test_clearing_cache_does_not_change_results() {
        let mut engine = FiscalEngine::new();
        let opts = PersonOptions {
            wage_multiplier: 1.23,
            ..Default::default()
        };
        let before = engine.person_year(55, 3, &opts);
        engine.clear_cache();
        let after = engine.person_year(55, 3, &opts);
        assert_eq!(before, after);
    }

    #[test]
    fn test_disabled_cache_matches_cached_results() {
        let mut cached = FiscalEngine::new();
        let mut uncached = FiscalEngine::with_cache_ceiling(0);
        let opts = PersonOptions::default();
        for age in [10u8, 40, 70] {
            for decile in 1..=10u8 {
                assert_eq!(
                    cached.person_year(age, decile, &opts),
                    uncached.person_year(age, decile, &opts)
                );
            }
        }
        assert!(uncached.cache().is_empty());
    }

    #[test]
    fn test_work_arrival_out_contributes_humanitarian_arrival() {
        let mut engine = FiscalEngine::new();
        let work = immigrant_person(&mut engine, ImmigrantType::Work, 30, 0);
        let humanitarian = immigrant_person(&mut engine, ImmigrantType::Humanitarian, 30, 0);
        assert!(work.net_balance() > humanitarian.net_balance());
    }

    #[test]
    fn test_integration_improves_balance_with_tenure() {
        let mut engine = FiscalEngine::new();
        for kind in [ImmigrantType::Work, ImmigrantType::Humanitarian] {
            let fresh = immigrant_person(&mut engine, kind, 30, 0);
            let settled = immigrant_person(&mut engine, kind, 30, 10);
            assert!(
                settled.net_balance() > fresh.net_balance(),
                "{:?} did not improve",
                kind
            );
        }
    }

    #[test]
    fn test_aggregate_cache_reuse_across_years() {
        let mut engine = FiscalEngine::new();
        let mut population = PopulationState::new();
        for age in 20..=60u8 {
            population.add_native(age, 10_000.0);
        }
        population.add_immigrants(CohortKey::new(30, ImmigrantType::Work, 2020), 1_000.0);

        let first = engine.aggregate_year(&population, 2024, 1.0);
        let hits_before = engine.cache().hits;
        let second = engine.aggregate_year(&population, 2024, 1.0);
        assert_eq!(first, second);
        assert!(engine.cache().hits > hits_before);
    }
}
