//! Income tax and social-insurance contribution calculation
//!
//! Pure function from (gross monthly income, municipal rate, age) to a
//! contribution breakdown. The bracket scale and contribution rates follow
//! the base-year national rules; the per-person fiscal model treats this as
//! a black box and degrades to fixed approximate rates if it fails.

use serde::{Deserialize, Serialize};

/// Average municipal income-tax rate used when no municipality is given
pub const DEFAULT_MUNICIPAL_RATE: f64 = 0.0746;

/// Standard VAT rate
pub const VAT_RATE: f64 = 0.255;

/// Share of net income assumed to be spent on VAT-liable consumption
pub const VAT_CONSUMPTION_SHARE: f64 = 0.6;

/// Flat earned-income deduction applied to the taxable base (annual)
const EARNED_INCOME_DEDUCTION: f64 = 3_570.0;

/// National income-tax brackets: (lower bound, marginal rate), annual income
const NATIONAL_BRACKETS: [(f64, f64); 6] = [
    (0.0, 0.1264),
    (20_500.0, 0.19),
    (30_500.0, 0.3025),
    (50_400.0, 0.34),
    (88_200.0, 0.42),
    (150_000.0, 0.44),
];

#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("income must be finite and non-negative, got {0}")]
    InvalidIncome(f64),
    #[error("municipal rate must be in [0, 1], got {0}")]
    InvalidRate(f64),
}

/// Monthly tax and contribution breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross_income: f64,
    pub national_tax: f64,
    pub municipal_tax: f64,
    pub pension_contribution: f64,
    pub unemployment_contribution: f64,
    pub health_contribution: f64,
    pub net_income: f64,
}

impl TaxBreakdown {
    pub fn total_tax(&self) -> f64 {
        self.national_tax + self.municipal_tax
    }

    pub fn total_contributions(&self) -> f64 {
        self.pension_contribution + self.unemployment_contribution + self.health_contribution
    }

    /// Effective rate on gross income, clamped to [0, 1]
    pub fn effective_rate(&self) -> f64 {
        if self.gross_income <= 0.0 {
            return 0.0;
        }
        ((self.total_tax() + self.total_contributions()) / self.gross_income).clamp(0.0, 1.0)
    }
}

/// Compute the monthly breakdown for a gross monthly income
pub fn calculate_monthly_tax(
    gross_monthly: f64,
    municipal_rate: f64,
    age: u8,
) -> Result<TaxBreakdown, TaxError> {
    if !gross_monthly.is_finite() || gross_monthly < 0.0 {
        return Err(TaxError::InvalidIncome(gross_monthly));
    }
    if !(0.0..=1.0).contains(&municipal_rate) {
        return Err(TaxError::InvalidRate(municipal_rate));
    }

    let annual_gross = gross_monthly * 12.0;
    let taxable = (annual_gross - EARNED_INCOME_DEDUCTION).max(0.0);

    let national_annual = progressive_tax(taxable);
    let municipal_annual = taxable * municipal_rate;

    let pension_rate = match age {
        53..=62 => 0.0865,
        _ => 0.0715,
    };
    let unemployment_rate = if age < 65 { 0.0079 } else { 0.0 };
    let health_rate = 0.0152;

    let pension_annual = annual_gross * pension_rate;
    let unemployment_annual = annual_gross * unemployment_rate;
    let health_annual = annual_gross * health_rate;

    let net_annual = (annual_gross
        - national_annual
        - municipal_annual
        - pension_annual
        - unemployment_annual
        - health_annual)
        .max(0.0);

    Ok(TaxBreakdown {
        gross_income: gross_monthly,
        national_tax: national_annual / 12.0,
        municipal_tax: municipal_annual / 12.0,
        pension_contribution: pension_annual / 12.0,
        unemployment_contribution: unemployment_annual / 12.0,
        health_contribution: health_annual / 12.0,
        net_income: net_annual / 12.0,
    })
}

/// National tax on an annual taxable income
fn progressive_tax(taxable: f64) -> f64 {
    let mut tax = 0.0;
    for (i, &(lower, rate)) in NATIONAL_BRACKETS.iter().enumerate() {
        if taxable <= lower {
            break;
        }
        let upper = NATIONAL_BRACKETS
            .get(i + 1)
            .map(|&(bound, _)| bound)
            .unwrap_or(f64::INFINITY);
        tax += (taxable.min(upper) - lower) * rate;
    }
    tax
}
