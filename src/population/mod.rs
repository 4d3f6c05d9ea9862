//! Canonical population state
//!
//! The population is partitioned into a native table keyed by single year of
//! age and an immigrant table keyed by (age, category, arrival year). Arrival
//! year is kept for the lifetime of a cohort because integration curves and
//! emigration propensity depend on years since arrival, not calendar age.
//!
//! States are never mutated in place by transition functions: demographics and
//! immigration steps clone, transform, and return a new state.

use crate::reference::MAX_AGE;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Share of the population assumed female when counting potential mothers
pub const FEMALE_SHARE: f64 = 0.51;

/// Childbearing ages, inclusive
pub const CHILDBEARING_AGE_RANGE: (u8, u8) = (15, 49);

/// Working ages, inclusive
pub const WORKING_AGE_RANGE: (u8, u8) = (15, 64);

/// Residence-permit category of an immigrant cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImmigrantType {
    /// Work-based residence permits
    Work,
    /// Family reunification
    Family,
    /// Humanitarian protection
    Humanitarian,
}

impl ImmigrantType {
    pub const ALL: [ImmigrantType; 3] = [
        ImmigrantType::Work,
        ImmigrantType::Family,
        ImmigrantType::Humanitarian,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImmigrantType::Work => "work",
            ImmigrantType::Family => "family",
            ImmigrantType::Humanitarian => "humanitarian",
        }
    }
}

/// Key identifying one immigrant cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CohortKey {
    pub age: u8,
    pub kind: ImmigrantType,
    pub arrival_year: u32,
}

impl CohortKey {
    pub fn new(age: u8, kind: ImmigrantType, arrival_year: u32) -> Self {
        Self {
            age: age.min(MAX_AGE),
            kind,
            arrival_year,
        }
    }

    /// Completed years since arrival as of `year`
    pub fn years_in_country(&self, year: u32) -> u32 {
        year.saturating_sub(self.arrival_year)
    }
}

/// Who is alive: native cohorts by age, immigrant cohorts by key
///
/// All counts are non-negative; entries that reach zero are removed rather
/// than kept as zeros.
#[derive(Debug, Clone, Default)]
pub struct PopulationState {
    native: BTreeMap<u8, f64>,
    immigrants: HashMap<CohortKey, f64>,
}

/// Population totals by broad age band
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeBandCounts {
    /// Ages 0-14
    pub children: f64,
    /// Ages 15-64
    pub working_age: f64,
    /// Ages 65+
    pub elderly: f64,
}

impl AgeBandCounts {
    pub fn total(&self) -> f64 {
        self.children + self.working_age + self.elderly
    }

    /// (children + elderly) / working-age, as a percentage
    pub fn dependency_ratio(&self) -> f64 {
        if self.working_age <= 0.0 {
            return 0.0;
        }
        (self.children + self.elderly) / self.working_age * 100.0
    }
}

impl PopulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to a native age cohort; same-age additions accumulate
    pub fn add_native(&mut self, age: u8, count: f64) {
        if count <= 0.0 {
            return;
        }
        *self.native.entry(age.min(MAX_AGE)).or_insert(0.0) += count;
    }

    /// Add to an immigrant cohort; same-key additions accumulate
    pub fn add_immigrants(&mut self, key: CohortKey, count: f64) {
        if count <= 0.0 {
            return;
        }
        *self.immigrants.entry(key).or_insert(0.0) += count;
    }

    /// Remove a native cohort entirely, returning its count
    pub fn take_native(&mut self, age: u8) -> f64 {
        self.native.remove(&age).unwrap_or(0.0)
    }

    pub fn native_at(&self, age: u8) -> f64 {
        self.native.get(&age).copied().unwrap_or(0.0)
    }

    /// Iterate native cohorts in age order
    pub fn native_cohorts(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.native.iter().map(|(&age, &count)| (age, count))
    }

    /// Iterate immigrant cohorts (no defined order)
    pub fn immigrant_cohorts(&self) -> impl Iterator<Item = (CohortKey, f64)> + '_ {
        self.immigrants.iter().map(|(&key, &count)| (key, count))
    }

    pub fn native_total(&self) -> f64 {
        self.native.values().sum()
    }

    pub fn immigrant_total(&self) -> f64 {
        self.immigrants.values().sum()
    }

    pub fn immigrant_total_of(&self, kind: ImmigrantType) -> f64 {
        self.immigrants
            .iter()
            .filter(|(key, _)| key.kind == kind)
            .map(|(_, &count)| count)
            .sum()
    }

    pub fn total(&self) -> f64 {
        self.native_total() + self.immigrant_total()
    }

    /// Head count at one age across both partitions
    pub fn count_at_age(&self, age: u8) -> f64 {
        let immigrants: f64 = self
            .immigrants
            .iter()
            .filter(|(key, _)| key.age == age)
            .map(|(_, &count)| count)
            .sum();
        self.native_at(age) + immigrants
    }

    /// Women of childbearing age (15-49) across both partitions
    pub fn women_of_childbearing_age(&self) -> f64 {
        let (lo, hi) = CHILDBEARING_AGE_RANGE;
        let mut total = 0.0;
        for age in lo..=hi {
            total += self.count_at_age(age);
        }
        total * FEMALE_SHARE
    }

    /// Population aged 15-64 across both partitions
    pub fn working_age_total(&self) -> f64 {
        let (lo, hi) = WORKING_AGE_RANGE;
        (lo..=hi).map(|age| self.count_at_age(age)).sum()
    }

    /// Totals by broad age band across both partitions
    pub fn age_bands(&self) -> AgeBandCounts {
        let mut bands = AgeBandCounts::default();
        for age in 0..=MAX_AGE {
            let count = self.count_at_age(age);
            if age < WORKING_AGE_RANGE.0 {
                bands.children += count;
            } else if age <= WORKING_AGE_RANGE.1 {
                bands.working_age += count;
            } else {
                bands.elderly += count;
            }
        }
        bands
    }

    /// Apply a transform to every cohort count, dropping entries that fall to
    /// zero; used by the mortality and emigration steps
    pub fn retain_map_native(&mut self, mut f: impl FnMut(u8, f64) -> f64) {
        let ages: Vec<u8> = self.native.keys().copied().collect();
        for age in ages {
            let count = self.native[&age];
            let next = f(age, count);
            if next > 0.0 {
                self.native.insert(age, next);
            } else {
                self.native.remove(&age);
            }
        }
    }

    /// Immigrant-table counterpart of `retain_map_native`
    pub fn retain_map_immigrants(&mut self, mut f: impl FnMut(CohortKey, f64) -> f64) {
        let keys: Vec<CohortKey> = self.immigrants.keys().copied().collect();
        for key in keys {
            let count = self.immigrants[&key];
            let next = f(key, count);
            if next > 0.0 {
                self.immigrants.insert(key, next);
            } else {
                self.immigrants.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> PopulationState {
        let mut state = PopulationState::new();
        state.add_native(10, 1000.0);
        state.add_native(30, 2000.0);
        state.add_native(70, 500.0);
        state.add_immigrants(CohortKey::new(30, ImmigrantType::Work, 2020), 100.0);
        state.add_immigrants(CohortKey::new(8, ImmigrantType::Humanitarian, 2022), 50.0);
        state
    }

    #[test]
    fn test_totals() {
        let state = sample_state();
        assert_eq!(state.native_total(), 3500.0);
        assert_eq!(state.immigrant_total(), 150.0);
        assert_eq!(state.total(), 3650.0);
        assert_eq!(state.immigrant_total_of(ImmigrantType::Work), 100.0);
        assert_eq!(state.immigrant_total_of(ImmigrantType::Family), 0.0);
    }

    #[test]
    fn test_same_key_accumulates() {
        let mut state = PopulationState::new();
        state.add_native(0, 100.0);
        state.add_native(0, 50.0);
        assert_eq!(state.native_at(0), 150.0);

        let key = CohortKey::new(25, ImmigrantType::Family, 2024);
        state.add_immigrants(key, 10.0);
        state.add_immigrants(key, 5.0);
        assert_eq!(state.immigrant_total(), 15.0);
    }

    #[test]
    fn test_age_bands_and_dependency() {
        let state = sample_state();
        let bands = state.age_bands();
        assert_eq!(bands.children, 1050.0); // age 10 natives + age 8 immigrants
        assert_eq!(bands.working_age, 2100.0);
        assert_eq!(bands.elderly, 500.0);
        let expected = (1050.0 + 500.0) / 2100.0 * 100.0;
        assert!((bands.dependency_ratio() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_women_of_childbearing_age() {
        let state = sample_state();
        // Ages 30 native (2000) + age 30 work cohort (100)
        assert!((state.women_of_childbearing_age() - 2100.0 * FEMALE_SHARE).abs() < 1e-9);
    }

    #[test]
    fn test_retain_map_drops_zeros() {
        let mut state = sample_state();
        state.retain_map_native(|age, count| if age == 10 { 0.0 } else { count });
        assert_eq!(state.native_at(10), 0.0);
        assert_eq!(state.native_cohorts().count(), 2);
    }

    #[test]
    fn test_ages_capped_at_max() {
        let mut state = PopulationState::new();
        state.add_native(120, 10.0);
        assert_eq!(state.native_at(MAX_AGE), 10.0);
    }
}
