//! Memoization of the per-person fiscal calculation
//!
//! Identical (age, decile, quantized multipliers/overrides) tuples produce
//! identical results, so repeated evaluations across deciles, cohorts, and
//! years hit the cache. The cache is purely an optimization: clearing or
//! disabling it never changes any computed output, only cost. It is owned by
//! a `FiscalEngine` instance, so independent runs cannot interfere.

use super::person::{PersonOptions, PersonYearFiscal};
use std::collections::HashMap;

/// Entries are refused (not evicted) once the cache reaches this size
pub const DEFAULT_CACHE_CEILING: usize = 100_000;

/// Structured cache key with multipliers quantized to basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiscalCacheKey {
    age: u8,
    decile: u8,
    wage_multiplier_bp: u32,
    overrides: Option<OverrideKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct OverrideKey {
    employment_bp: u16,
    decile_tenths: u8,
    welfare_bp: u16,
    unemployment_bp: u16,
}

impl FiscalCacheKey {
    pub fn new(age: u8, decile: u8, opts: &PersonOptions) -> Self {
        let overrides = if opts.employment_rate.is_some()
            || opts.income_decile.is_some()
            || opts.welfare_multiplier != 1.0
            || opts.unemployment_multiplier != 1.0
        {
            Some(OverrideKey {
                // u16::MAX marks "no override"; it is outside the encodable range
                employment_bp: opts.employment_rate.map(to_bp16).unwrap_or(u16::MAX),
                decile_tenths: (opts.income_decile.unwrap_or(0.0).clamp(0.0, 10.0) * 10.0).round()
                    as u8,
                welfare_bp: to_bp16(opts.welfare_multiplier),
                unemployment_bp: to_bp16(opts.unemployment_multiplier),
            })
        } else {
            None
        };

        Self {
            age,
            decile,
            wage_multiplier_bp: (opts.wage_multiplier.max(0.0) * 10_000.0).round() as u32,
            overrides,
        }
    }
}

fn to_bp16(value: f64) -> u16 {
    (value.clamp(0.0, 6.0) * 10_000.0).round() as u16
}

/// Bounded memo map for person-year results
#[derive(Debug, Default)]
pub struct FiscalCache {
    entries: HashMap<FiscalCacheKey, PersonYearFiscal>,
    ceiling: usize,
    pub hits: u64,
    pub misses: u64,
}

impl FiscalCache {
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_CACHE_CEILING)
    }

    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ceiling,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &FiscalCacheKey) -> Option<PersonYearFiscal> {
        match self.entries.get(key) {
            Some(result) => {
                self.hits += 1;
                Some(*result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a result unless the cache is full
    pub fn insert(&mut self, key: FiscalCacheKey, result: PersonYearFiscal) {
        if self.entries.len() < self.ceiling {
            self.entries.insert(key, result);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
