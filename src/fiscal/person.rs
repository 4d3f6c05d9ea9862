//! Per-person-year fiscal calculation
//!
//! Computes one person-year of public costs (education, healthcare, pension,
//! benefits) and contributions (income tax, municipal tax, social insurance,
//! VAT) for a given age and income decile. Overrides parameterize immigrant
//! cohorts and macro scenarios. All amounts are euros per year.

use super::tax::{self, TaxBreakdown, DEFAULT_MUNICIPAL_RATE, VAT_CONSUMPTION_SHARE, VAT_RATE};
use serde::{Deserialize, Serialize};

/// Gross monthly income by decile (index 0 = decile 1)
pub const DECILE_MONTHLY_INCOME: [f64; 10] = [
    1_350.0, 1_900.0, 2_300.0, 2_700.0, 3_100.0, 3_500.0, 3_950.0, 4_500.0, 5_400.0, 8_200.0,
];

/// Baseline employment rate by decile during working age
pub const DECILE_EMPLOYMENT: [f64; 10] = [
    0.52, 0.62, 0.70, 0.76, 0.81, 0.85, 0.88, 0.90, 0.92, 0.94,
];

/// Share of the working year exposed to unemployment, by decile
pub const DECILE_UNEMPLOYMENT: [f64; 10] = [
    0.22, 0.16, 0.12, 0.09, 0.07, 0.055, 0.045, 0.035, 0.025, 0.015,
];

/// Healthcare cost multiplier by decile (worse health in lower deciles)
pub const DECILE_HEALTH_MULTIPLIER: [f64; 10] = [
    1.30, 1.22, 1.15, 1.09, 1.04, 1.00, 0.96, 0.92, 0.88, 0.82,
];

/// Effective retirement age by decile
pub const DECILE_RETIREMENT_AGE: [u8; 10] = [63, 63, 64, 64, 65, 65, 65, 66, 66, 67];

/// Working life assumed to start at this age for pension accrual
const WORKING_LIFE_START: f64 = 23.0;

/// Pension accrual per year of earnings
const PENSION_ACCRUAL_RATE: f64 = 0.015;

/// Statutory minimum annual pension
const GUARANTEE_PENSION: f64 = 11_700.0;

/// Full annual unemployment benefit
const UNEMPLOYMENT_BENEFIT: f64 = 14_800.0;

/// Annual housing allowance for the three lowest deciles
const HOUSING_ALLOWANCE: [f64; 3] = [3_900.0, 3_000.0, 2_100.0];

/// Age below which a person has no market income
const ADULT_AGE: u8 = 18;

/// Approximate flat rates used when the tax routine fails
const FALLBACK_TAX_RATE: f64 = 0.20;
const FALLBACK_CONTRIBUTION_RATE: f64 = 0.12;

/// Overrides applied to the per-person calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonOptions {
    /// Cumulative wage growth relative to the base year; scales incomes and
    /// wage-indexed transfers
    pub wage_multiplier: f64,
    /// Employment-rate override (defaults to the decile baseline)
    pub employment_rate: Option<f64>,
    /// Income-decile override; fractional values interpolate incomes
    pub income_decile: Option<f64>,
    /// Scales benefit amounts (welfare dependency above 1.0)
    pub welfare_multiplier: f64,
    /// Scales unemployment exposure (macro scenarios)
    pub unemployment_multiplier: f64,
}

impl Default for PersonOptions {
    fn default() -> Self {
        Self {
            wage_multiplier: 1.0,
            employment_rate: None,
            income_decile: None,
            welfare_multiplier: 1.0,
            unemployment_multiplier: 1.0,
        }
    }
}

/// One person-year of costs and contributions, euros
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonYearFiscal {
    pub education: f64,
    pub healthcare: f64,
    pub pension: f64,
    pub benefits: f64,
    pub income_tax: f64,
    pub municipal_tax: f64,
    pub social_insurance: f64,
    pub vat: f64,
}

impl PersonYearFiscal {
    pub fn costs_total(&self) -> f64 {
        self.education + self.healthcare + self.pension + self.benefits
    }

    pub fn contributions_total(&self) -> f64 {
        self.income_tax + self.municipal_tax + self.social_insurance + self.vat
    }

    pub fn net_balance(&self) -> f64 {
        self.contributions_total() - self.costs_total()
    }
}

/// Compute one person-year for an age and decile (1-10)
pub fn person_year(age: u8, decile: u8, opts: &PersonOptions) -> PersonYearFiscal {
    let decile_f = opts.income_decile.unwrap_or(decile as f64).clamp(1.0, 10.0);
    let idx = decile_index(decile_f);

    let retirement_age = DECILE_RETIREMENT_AGE[idx];
    let employment = opts
        .employment_rate
        .unwrap_or(DECILE_EMPLOYMENT[idx])
        .clamp(0.0, 1.0);

    let mut result = PersonYearFiscal {
        education: education_cost(age),
        healthcare: base_health_cost(age) * DECILE_HEALTH_MULTIPLIER[idx],
        ..Default::default()
    };

    let is_working_age = (ADULT_AGE..retirement_age).contains(&age);
    let is_retired = age >= retirement_age;

    let annual_wage = interpolated_income(decile_f) * 12.0 * employment * opts.wage_multiplier;

    if is_retired {
        result.pension = pension_amount(annual_wage, retirement_age, opts.wage_multiplier);
    }

    if is_working_age {
        let exposure =
            (DECILE_UNEMPLOYMENT[idx] * opts.unemployment_multiplier).clamp(0.0, 1.0);
        result.benefits =
            UNEMPLOYMENT_BENEFIT * exposure * opts.welfare_multiplier * opts.wage_multiplier;
        if idx < HOUSING_ALLOWANCE.len() {
            result.benefits +=
                HOUSING_ALLOWANCE[idx] * opts.welfare_multiplier * opts.wage_multiplier;
        }
    }

    // Taxable income: wages during working age, the pension in retirement
    let gross_monthly = if is_working_age {
        annual_wage / 12.0
    } else if is_retired {
        result.pension / 12.0
    } else {
        0.0
    };

    if gross_monthly > 0.0 {
        let breakdown = taxed(gross_monthly, age, is_retired);
        result.income_tax = breakdown.national_tax * 12.0;
        result.municipal_tax = breakdown.municipal_tax * 12.0;
        result.social_insurance = breakdown.total_contributions() * 12.0;
        result.vat = breakdown.net_income * 12.0 * VAT_CONSUMPTION_SHARE * VAT_RATE;
    }

    result
}

/// Tax breakdown with graceful degradation to fixed approximate rates
fn taxed(gross_monthly: f64, age: u8, is_retired: bool) -> TaxBreakdown {
    match tax::calculate_monthly_tax(gross_monthly, DEFAULT_MUNICIPAL_RATE, age) {
        Ok(mut breakdown) => {
            if is_retired {
                // Pension income carries no earnings-linked contributions
                breakdown.net_income +=
                    breakdown.pension_contribution + breakdown.unemployment_contribution;
                breakdown.pension_contribution = 0.0;
                breakdown.unemployment_contribution = 0.0;
            }
            breakdown
        }
        Err(e) => {
            log::debug!("tax calculation failed ({}), using approximate rates", e);
            let tax_total = gross_monthly * FALLBACK_TAX_RATE;
            let contributions = if is_retired {
                0.0
            } else {
                gross_monthly * FALLBACK_CONTRIBUTION_RATE
            };
            TaxBreakdown {
                gross_income: gross_monthly,
                national_tax: tax_total * 0.6,
                municipal_tax: tax_total * 0.4,
                pension_contribution: contributions,
                unemployment_contribution: 0.0,
                health_contribution: 0.0,
                net_income: (gross_monthly - tax_total - contributions).max(0.0),
            }
        }
    }
}

/// Education cost by age band: daycare, comprehensive school, upper
/// secondary, and a participation-weighted share of higher education
fn education_cost(age: u8) -> f64 {
    match age {
        1..=6 => 10_300.0,
        7..=15 => 9_100.0,
        16..=18 => 8_400.0,
        19..=24 => 9_800.0 * 0.42,
        _ => 0.0,
    }
}

/// U-shaped healthcare cost by age, before the decile multiplier
fn base_health_cost(age: u8) -> f64 {
    match age {
        0 => 6_000.0,
        1..=6 => 2_400.0,
        7..=17 => 1_500.0,
        18..=29 => 1_900.0,
        30..=44 => 2_300.0,
        45..=54 => 2_900.0,
        55..=64 => 3_800.0,
        65..=74 => 5_600.0,
        75..=84 => 9_500.0,
        85..=94 => 16_000.0,
        _ => 21_000.0,
    }
}

/// Annual pension: the greater of the accrual estimate and the wage-indexed
/// statutory minimum
fn pension_amount(annual_wage: f64, retirement_age: u8, wage_multiplier: f64) -> f64 {
    let working_years = (retirement_age as f64 - WORKING_LIFE_START).max(0.0);
    let accrued = annual_wage * PENSION_ACCRUAL_RATE * working_years;
    accrued.max(GUARANTEE_PENSION * wage_multiplier)
}

/// Monthly income for a fractional decile, interpolating between bands
fn interpolated_income(decile_f: f64) -> f64 {
    let clamped = decile_f.clamp(1.0, 10.0);
    let lower = clamped.floor() as usize - 1;
    let upper = (lower + 1).min(9);
    let t = clamped - clamped.floor();
    DECILE_MONTHLY_INCOME[lower] * (1.0 - t) + DECILE_MONTHLY_INCOME[upper] * t
}

/// Nearest decile index (0-based) for table lookups
fn decile_index(decile_f: f64) -> usize {
    (decile_f.round().clamp(1.0, 10.0) as usize) - 1
}
