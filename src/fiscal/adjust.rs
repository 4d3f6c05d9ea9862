//! Growth adjustment of aggregated fiscal flows
//!
//! Restates base-year-price flows to reflect projected economic growth and
//! sector cost premiums. Wage growth itself already flows through the
//! per-person calculation via the wage multiplier; this layer applies what
//! grows on top of (or instead of) wages:
//!
//! - contributions: a compounding revenue-elasticity premium (progressive
//!   brackets capture slightly more than wage growth)
//! - healthcare: the GDP multiplier times a compounding care-cost premium
//! - education: the GDP multiplier
//! - pensions: a compounding pension premium (the accrual base is already
//!   wage-linked)
//! - benefits: unchanged (wage-indexed in the per-person calculation)
//!
//! Historical years are never adjusted.

use super::aggregate::{AnnualFiscalFlows, CostByCategory, RevenueBySource};
use crate::reference::BASE_YEAR;

/// Yearly revenue growth above wage growth
pub const REVENUE_ELASTICITY_PREMIUM: f64 = 0.002;

/// Yearly healthcare cost growth above GDP
pub const HEALTHCARE_COST_PREMIUM: f64 = 0.010;

/// Yearly pension cost growth above the wage-linked accrual
pub const PENSION_COST_PREMIUM: f64 = 0.015;

/// Apply growth adjustment for `year` given the cumulative GDP multiplier
pub fn apply_growth_adjustment(
    flows: &AnnualFiscalFlows,
    year: u32,
    gdp_multiplier: f64,
) -> AnnualFiscalFlows {
    if year <= BASE_YEAR {
        return *flows;
    }
    let years = (year - BASE_YEAR) as f64;

    let revenue_factor = (1.0 + REVENUE_ELASTICITY_PREMIUM).powf(years);
    let healthcare_factor = gdp_multiplier * (1.0 + HEALTHCARE_COST_PREMIUM).powf(years);
    let pension_factor = (1.0 + PENSION_COST_PREMIUM).powf(years);

    let mut adjusted = *flows;
    adjusted.revenue = RevenueBySource {
        income_tax: flows.revenue.income_tax * revenue_factor,
        municipal_tax: flows.revenue.municipal_tax * revenue_factor,
        social_insurance: flows.revenue.social_insurance * revenue_factor,
        vat: flows.revenue.vat * revenue_factor,
    };
    adjusted.costs = CostByCategory {
        education: flows.costs.education * gdp_multiplier,
        healthcare: flows.costs.healthcare * healthcare_factor,
        pension: flows.costs.pension * pension_factor,
        benefits: flows.costs.benefits,
    };
    adjusted.balance =
        adjusted.revenue.total() - adjusted.costs.total() - adjusted.interest_expense;
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_flows() -> AnnualFiscalFlows {
        let mut flows = AnnualFiscalFlows {
            revenue: RevenueBySource {
                income_tax: 30_000.0,
                municipal_tax: 18_000.0,
                social_insurance: 25_000.0,
                vat: 20_000.0,
            },
            costs: CostByCategory {
                education: 14_000.0,
                healthcare: 22_000.0,
                pension: 35_000.0,
                benefits: 12_000.0,
            },
            interest_expense: 2_000.0,
            ..Default::default()
        };
        flows.balance = flows.revenue.total() - flows.costs.total() - flows.interest_expense;
        flows
    }

    #[test]
    fn test_historical_year_is_untouched() {
        let flows = sample_flows();
        let adjusted = apply_growth_adjustment(&flows, 2010, 1.0);
        assert_eq!(adjusted, flows);
    }

    #[test]
    fn test_sector_factors() {
        let flows = sample_flows();
        let multiplier = 1.2;
        let adjusted = apply_growth_adjustment(&flows, BASE_YEAR + 10, multiplier);

        let years = 10.0;
        assert_relative_eq!(
            adjusted.costs.education,
            flows.costs.education * multiplier,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            adjusted.costs.healthcare,
            flows.costs.healthcare * multiplier * 1.01_f64.powf(years),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            adjusted.costs.pension,
            flows.costs.pension * 1.015_f64.powf(years),
            epsilon = 1e-9
        );
        // Benefits are already wage-indexed upstream
        assert_eq!(adjusted.costs.benefits, flows.costs.benefits);
    }

    #[test]
    fn test_balance_recomputed_with_interest() {
        let flows = sample_flows();
        let adjusted = apply_growth_adjustment(&flows, BASE_YEAR + 5, 1.1);
        let expected =
            adjusted.revenue.total() - adjusted.costs.total() - adjusted.interest_expense;
        assert_relative_eq!(adjusted.balance, expected, epsilon = 1e-9);
        assert_eq!(adjusted.interest_expense, flows.interest_expense);
    }
}
