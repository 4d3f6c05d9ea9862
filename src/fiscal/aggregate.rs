//! Annual fiscal aggregation over a population snapshot
//!
//! Native cohorts are split into ten equal decile slices per age; immigrant
//! cohorts are evaluated once at the reference decile with profile-derived
//! overrides. Per-person euro amounts are summed and converted once, at the
//! end, to millions.

use super::person::PersonOptions;
use super::FiscalEngine;
use crate::immigration::ImmigrantProfile;
use crate::population::{AgeBandCounts, ImmigrantType, PopulationState};
use serde::{Deserialize, Serialize};

/// Reference decile at which immigrant cohorts are evaluated
const IMMIGRANT_REFERENCE_DECILE: u8 = 5;

/// Annual revenue by source, millions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueBySource {
    pub income_tax: f64,
    pub municipal_tax: f64,
    pub social_insurance: f64,
    pub vat: f64,
}

impl RevenueBySource {
    pub fn total(&self) -> f64 {
        self.income_tax + self.municipal_tax + self.social_insurance + self.vat
    }
}

/// Annual cost by category, millions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostByCategory {
    pub education: f64,
    pub healthcare: f64,
    pub pension: f64,
    pub benefits: f64,
}

impl CostByCategory {
    pub fn total(&self) -> f64 {
        self.education + self.healthcare + self.pension + self.benefits
    }
}

/// Net balance split by population group, millions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceByGroup {
    pub native: f64,
    pub work: f64,
    pub family: f64,
    pub humanitarian: f64,
}

impl BalanceByGroup {
    pub fn immigrant_total(&self) -> f64 {
        self.work + self.family + self.humanitarian
    }

    pub fn of(&self, kind: ImmigrantType) -> f64 {
        match kind {
            ImmigrantType::Work => self.work,
            ImmigrantType::Family => self.family,
            ImmigrantType::Humanitarian => self.humanitarian,
        }
    }
}

/// One year of fiscal flows, recomputed from scratch each year
///
/// Derived from a population snapshot; has no identity across years. All
/// money amounts are millions of euros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualFiscalFlows {
    pub age_bands: AgeBandCounts,
    pub dependency_ratio: f64,
    pub revenue: RevenueBySource,
    pub costs: CostByCategory,
    /// Interest on government debt; zero until the economy step supplies it
    pub interest_expense: f64,
    /// Revenue minus costs minus interest
    pub balance: f64,
    /// Net balance split by group, at base-year prices
    pub balance_by_group: BalanceByGroup,
}

impl AnnualFiscalFlows {
    /// Total cost including interest
    pub fn total_cost(&self) -> f64 {
        self.costs.total() + self.interest_expense
    }

    /// Restate the flows with interest expense layered in
    ///
    /// Interest adds to costs and subtracts from the balance; the underlying
    /// category totals are unchanged.
    pub fn with_interest(&self, interest_expense: f64) -> Self {
        let mut restated = *self;
        restated.interest_expense = interest_expense;
        restated.balance = restated.revenue.total() - restated.costs.total() - interest_expense;
        restated
    }
}

/// Aggregate a population snapshot into annual flows
///
/// `year` drives immigrant years-in-country; `wage_multiplier` is the
/// cumulative growth multiplier applied to incomes (1.0 for historical
/// years).
pub fn aggregate(
    engine: &mut FiscalEngine,
    population: &PopulationState,
    year: u32,
    wage_multiplier: f64,
) -> AnnualFiscalFlows {
    let mut flows = AnnualFiscalFlows::default();
    let mut revenue_eur = RevenueBySource::default();
    let mut costs_eur = CostByCategory::default();
    let mut balance_eur = BalanceByGroup::default();

    // Natives: ten equal decile slices per age cohort
    let native_opts = PersonOptions {
        wage_multiplier,
        ..Default::default()
    };
    for (age, count) in population.native_cohorts() {
        let slice = count / 10.0;
        for decile in 1..=10u8 {
            let person = engine.person_year(age, decile, &native_opts);
            revenue_eur.income_tax += person.income_tax * slice;
            revenue_eur.municipal_tax += person.municipal_tax * slice;
            revenue_eur.social_insurance += person.social_insurance * slice;
            revenue_eur.vat += person.vat * slice;
            costs_eur.education += person.education * slice;
            costs_eur.healthcare += person.healthcare * slice;
            costs_eur.pension += person.pension * slice;
            costs_eur.benefits += person.benefits * slice;
            balance_eur.native += person.net_balance() * slice;
        }
    }

    // Immigrants: one evaluation per cohort with profile-derived overrides
    for (key, count) in population.immigrant_cohorts() {
        let profile = ImmigrantProfile::for_type(key.kind);
        let years_in = key.years_in_country(year);
        let opts = PersonOptions {
            wage_multiplier,
            employment_rate: Some(profile.employment_rate(years_in)),
            income_decile: Some(profile.income_decile(years_in)),
            welfare_multiplier: 1.0 + profile.welfare_dependency(years_in),
            unemployment_multiplier: 1.0,
        };
        let person = engine.person_year(key.age, IMMIGRANT_REFERENCE_DECILE, &opts);
        revenue_eur.income_tax += person.income_tax * count;
        revenue_eur.municipal_tax += person.municipal_tax * count;
        revenue_eur.social_insurance += person.social_insurance * count;
        revenue_eur.vat += person.vat * count;
        costs_eur.education += person.education * count;
        costs_eur.healthcare += person.healthcare * count;
        costs_eur.pension += person.pension * count;
        costs_eur.benefits += person.benefits * count;

        let net = person.net_balance() * count;
        match key.kind {
            ImmigrantType::Work => balance_eur.work += net,
            ImmigrantType::Family => balance_eur.family += net,
            ImmigrantType::Humanitarian => balance_eur.humanitarian += net,
        }
    }

    // Convert once from euros to millions
    const MILLION: f64 = 1_000_000.0;
    flows.revenue = RevenueBySource {
        income_tax: revenue_eur.income_tax / MILLION,
        municipal_tax: revenue_eur.municipal_tax / MILLION,
        social_insurance: revenue_eur.social_insurance / MILLION,
        vat: revenue_eur.vat / MILLION,
    };
    flows.costs = CostByCategory {
        education: costs_eur.education / MILLION,
        healthcare: costs_eur.healthcare / MILLION,
        pension: costs_eur.pension / MILLION,
        benefits: costs_eur.benefits / MILLION,
    };
    flows.balance_by_group = BalanceByGroup {
        native: balance_eur.native / MILLION,
        work: balance_eur.work / MILLION,
        family: balance_eur.family / MILLION,
        humanitarian: balance_eur.humanitarian / MILLION,
    };

    flows.age_bands = population.age_bands();
    flows.dependency_ratio = flows.age_bands.dependency_ratio();
    flows.interest_expense = 0.0;
    flows.balance = flows.revenue.total() - flows.costs.total();
    flows
}
