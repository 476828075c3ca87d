//! Rate table types.
//!
//! This module contains the strongly-typed rate table structures that are
//! deserialized from YAML configuration files, and the validated
//! [`RateTable`] the engines read from.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CitRate;

/// Metadata about the jurisdiction the rate tables belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Country code (e.g., "PL").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
    /// Where the published rates come from.
    pub source_url: String,
}

/// Reference wages the contribution bases derive from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRates {
    /// Statutory monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Projected monthly average wage.
    pub projected_average_wage: Decimal,
}

/// Self-employed social contribution rates and base shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialRates {
    /// Pension contribution rate.
    pub pension: Decimal,
    /// Disability contribution rate.
    pub disability: Decimal,
    /// Voluntary sickness contribution rate.
    pub sickness: Decimal,
    /// Accident contribution rate.
    pub accident: Decimal,
    /// Labor fund rate.
    pub labor_fund: Decimal,
    /// Standard base as a share of the projected average wage.
    pub standard_base_share: Decimal,
    /// Reduced base as a share of the minimum wage.
    pub reduced_base_share: Decimal,
    /// Income-scaled base as a share of average monthly income.
    pub income_scaled_share: Decimal,
}

/// A lump-sum health contribution tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTier {
    /// Inclusive upper bound of yearly revenue; `None` for the open top tier.
    pub max_yearly_revenue: Option<Decimal>,
    /// Fixed monthly health contribution within the tier.
    pub monthly_amount: Decimal,
}

/// Health contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRates {
    /// Rate on income under the progressive scale.
    pub scale_rate: Decimal,
    /// Rate on income under the flat-rate regime.
    pub linear_rate: Decimal,
    /// Monthly floor as a share of the minimum wage.
    pub minimum_rate: Decimal,
    /// Lump-sum tiers, ordered by revenue bound.
    pub lump_sum_tiers: Vec<HealthTier>,
}

/// Personal income tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxRates {
    /// Yearly tax-free amount.
    pub tax_free_amount: Decimal,
    /// Yearly income at which the upper bracket starts.
    pub threshold: Decimal,
    /// Rate below the threshold.
    pub lower_rate: Decimal,
    /// Rate above the threshold.
    pub upper_rate: Decimal,
    /// Flat-rate regime rate.
    pub flat_rate: Decimal,
    /// Reduced rate on qualifying IP income.
    pub ip_box_rate: Decimal,
    /// Share of revenue deductible as notional costs.
    pub notional_cost_share: Decimal,
    /// Lump-sum rate per activity category.
    pub lump_sum_rates: BTreeMap<String, Decimal>,
    /// Category used when no lump-sum rate is supplied.
    pub default_lump_sum_category: String,
}

/// Company-level taxes and overheads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRates {
    /// Reduced corporate tax rate.
    pub cit_small_rate: Decimal,
    /// Standard corporate tax rate.
    pub cit_standard_rate: Decimal,
    /// Yearly revenue up to which the reduced rate is available.
    pub small_taxpayer_revenue_limit: Decimal,
    /// Dividend tax rate.
    pub dividend_tax_rate: Decimal,
    /// Monthly accounting overhead.
    pub accounting_cost: Decimal,
}

/// Employee-side payroll contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributionRates {
    /// Pension.
    pub pension: Decimal,
    /// Disability.
    pub disability: Decimal,
    /// Sickness.
    pub sickness: Decimal,
}

impl EmployeeContributionRates {
    /// Sum of all employee-side rates.
    pub fn total(&self) -> Decimal {
        self.pension + self.disability + self.sickness
    }
}

/// Employer-side payroll contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributionRates {
    /// Pension.
    pub pension: Decimal,
    /// Disability.
    pub disability: Decimal,
    /// Accident.
    pub accident: Decimal,
    /// Labor fund.
    pub labor_fund: Decimal,
    /// Guaranteed employee benefits fund.
    pub guaranteed_benefits_fund: Decimal,
}

impl EmployerContributionRates {
    /// Sum of all employer-side rates.
    pub fn total(&self) -> Decimal {
        self.pension + self.disability + self.accident + self.labor_fund + self.guaranteed_benefits_fund
    }
}

/// Payroll parameters for an employment contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRates {
    /// Employee-side contributions.
    pub employee: EmployeeContributionRates,
    /// Employer-side contributions.
    pub employer: EmployerContributionRates,
    /// Employee health contribution rate.
    pub health_rate: Decimal,
    /// Flat monthly cost deduction for the employee's PIT.
    pub monthly_cost_deduction: Decimal,
}

/// The raw contents of one rate table file.
///
/// Turned into a [`RateTable`] by [`RateTable::new`], which validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableParts {
    /// Fiscal year.
    pub tax_year: i32,
    /// First day the table applies.
    pub effective_date: NaiveDate,
    /// Reference wages.
    pub wages: WageRates,
    /// Self-employed social contributions.
    pub social: SocialRates,
    /// Health contributions.
    pub health: HealthRates,
    /// Personal income tax.
    pub income_tax: IncomeTaxRates,
    /// Company taxes.
    pub company: CompanyRates,
    /// Payroll.
    pub payroll: PayrollRates,
}

/// A validated, read-only rate table for one fiscal year.
///
/// All rates lie in `[0, 1]` and all thresholds are strictly increasing.
/// Every engine call takes the table explicitly.
///
/// # Example
///
/// ```
/// use pl_tax_engine::config::RateTable;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// assert_eq!(table.tax_year(), 2025);
/// assert_eq!(table.standard_contribution_base(), dec!(5203.80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    parts: RateTableParts,
}

impl RateTable {
    /// Validates the parts and builds a table.
    ///
    /// # Returns
    ///
    /// Returns `InvalidRateTable` naming the first field that breaks an
    /// invariant.
    pub fn new(parts: RateTableParts) -> EngineResult<Self> {
        validate(&parts)?;
        Ok(Self { parts })
    }

    /// The published 2025 rates.
    pub fn pl_2025() -> Self {
        let lump_sum_rates = [
            ("professionals", dec!(0.17)),
            ("services15", dec!(0.15)),
            ("it", dec!(0.12)),
            ("business_services", dec!(0.085)),
            ("manufacturing", dec!(0.055)),
            ("trade", dec!(0.03)),
            ("agriculture", dec!(0.02)),
        ]
        .into_iter()
        .map(|(category, rate)| (category.to_string(), rate))
        .collect();

        Self {
            parts: RateTableParts {
                tax_year: 2025,
                effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
                wages: WageRates {
                    minimum_wage: dec!(4666),
                    projected_average_wage: dec!(8673),
                },
                social: SocialRates {
                    pension: dec!(0.1952),
                    disability: dec!(0.08),
                    sickness: dec!(0.0245),
                    accident: dec!(0.0167),
                    labor_fund: dec!(0.0245),
                    standard_base_share: dec!(0.6),
                    reduced_base_share: dec!(0.3),
                    income_scaled_share: dec!(0.5),
                },
                health: HealthRates {
                    scale_rate: dec!(0.09),
                    linear_rate: dec!(0.049),
                    minimum_rate: dec!(0.09),
                    lump_sum_tiers: vec![
                        HealthTier {
                            max_yearly_revenue: Some(dec!(60000)),
                            monthly_amount: dec!(461.66),
                        },
                        HealthTier {
                            max_yearly_revenue: Some(dec!(300000)),
                            monthly_amount: dec!(769.43),
                        },
                        HealthTier {
                            max_yearly_revenue: None,
                            monthly_amount: dec!(1384.97),
                        },
                    ],
                },
                income_tax: IncomeTaxRates {
                    tax_free_amount: dec!(30000),
                    threshold: dec!(120000),
                    lower_rate: dec!(0.12),
                    upper_rate: dec!(0.32),
                    flat_rate: dec!(0.19),
                    ip_box_rate: dec!(0.05),
                    notional_cost_share: dec!(0.5),
                    lump_sum_rates,
                    default_lump_sum_category: "it".to_string(),
                },
                company: CompanyRates {
                    cit_small_rate: dec!(0.09),
                    cit_standard_rate: dec!(0.19),
                    small_taxpayer_revenue_limit: dec!(9218000),
                    dividend_tax_rate: dec!(0.19),
                    accounting_cost: dec!(800),
                },
                payroll: PayrollRates {
                    employee: EmployeeContributionRates {
                        pension: dec!(0.0976),
                        disability: dec!(0.015),
                        sickness: dec!(0.0245),
                    },
                    employer: EmployerContributionRates {
                        pension: dec!(0.0976),
                        disability: dec!(0.065),
                        accident: dec!(0.0167),
                        labor_fund: dec!(0.0245),
                        guaranteed_benefits_fund: dec!(0.001),
                    },
                    health_rate: dec!(0.09),
                    monthly_cost_deduction: dec!(250),
                },
            },
        }
    }

    /// Returns the underlying parts.
    pub fn parts(&self) -> &RateTableParts {
        &self.parts
    }

    /// Consumes the table, returning its parts.
    pub fn into_parts(self) -> RateTableParts {
        self.parts
    }

    /// Returns the fiscal year.
    pub fn tax_year(&self) -> i32 {
        self.parts.tax_year
    }

    /// Returns the first day the table applies.
    pub fn effective_date(&self) -> NaiveDate {
        self.parts.effective_date
    }

    /// Returns the reference wages.
    pub fn wages(&self) -> &WageRates {
        &self.parts.wages
    }

    /// Returns the social contribution rates.
    pub fn social(&self) -> &SocialRates {
        &self.parts.social
    }

    /// Returns the health contribution rates.
    pub fn health(&self) -> &HealthRates {
        &self.parts.health
    }

    /// Returns the personal income tax parameters.
    pub fn income_tax(&self) -> &IncomeTaxRates {
        &self.parts.income_tax
    }

    /// Returns the company rates.
    pub fn company(&self) -> &CompanyRates {
        &self.parts.company
    }

    /// Returns the payroll rates.
    pub fn payroll(&self) -> &PayrollRates {
        &self.parts.payroll
    }

    /// Monthly base of the standard contribution regime.
    pub fn standard_contribution_base(&self) -> Decimal {
        self.parts.wages.projected_average_wage * self.parts.social.standard_base_share
    }

    /// Monthly base of the reduced contribution regime.
    pub fn reduced_contribution_base(&self) -> Decimal {
        self.parts.wages.minimum_wage * self.parts.social.reduced_base_share
    }

    /// Monthly health contribution floor.
    pub fn health_floor(&self) -> Decimal {
        self.parts.wages.minimum_wage * self.parts.health.minimum_rate
    }

    /// Looks up the lump-sum rate of an activity category.
    pub fn lump_sum_rate(&self, category: &str) -> EngineResult<Decimal> {
        self.parts
            .income_tax
            .lump_sum_rates
            .get(category)
            .copied()
            .ok_or_else(|| EngineError::LumpSumCategoryNotFound {
                category: category.to_string(),
            })
    }

    /// The lump-sum rate used when the caller supplies none.
    pub fn default_lump_sum_rate(&self) -> Decimal {
        let income_tax = &self.parts.income_tax;
        income_tax
            .lump_sum_rates
            .get(&income_tax.default_lump_sum_category)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the corporate tax rate for a selector.
    pub fn cit_rate(&self, selector: CitRate) -> Decimal {
        match selector {
            CitRate::Small => self.parts.company.cit_small_rate,
            CitRate::Standard => self.parts.company.cit_standard_rate,
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRateTable {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_rate(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(invalid(field, format!("rate {} is outside [0, 1]", value)));
    }
    Ok(())
}

fn check_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, format!("must be positive, got {}", value)));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

fn validate(parts: &RateTableParts) -> EngineResult<()> {
    let wages = &parts.wages;
    check_positive("wages.minimum_wage", wages.minimum_wage)?;
    check_positive("wages.projected_average_wage", wages.projected_average_wage)?;

    let social = &parts.social;
    for (field, value) in [
        ("social.pension", social.pension),
        ("social.disability", social.disability),
        ("social.sickness", social.sickness),
        ("social.accident", social.accident),
        ("social.labor_fund", social.labor_fund),
        ("social.standard_base_share", social.standard_base_share),
        ("social.reduced_base_share", social.reduced_base_share),
        ("social.income_scaled_share", social.income_scaled_share),
    ] {
        check_rate(field, value)?;
    }
    if wages.minimum_wage * social.reduced_base_share
        > wages.projected_average_wage * social.standard_base_share
    {
        return Err(invalid(
            "social.reduced_base_share",
            "reduced base exceeds the standard base",
        ));
    }

    let health = &parts.health;
    check_rate("health.scale_rate", health.scale_rate)?;
    check_rate("health.linear_rate", health.linear_rate)?;
    check_rate("health.minimum_rate", health.minimum_rate)?;
    validate_health_tiers(&health.lump_sum_tiers)?;

    let income_tax = &parts.income_tax;
    check_non_negative("income_tax.tax_free_amount", income_tax.tax_free_amount)?;
    if income_tax.threshold <= income_tax.tax_free_amount {
        return Err(invalid(
            "income_tax.threshold",
            format!(
                "threshold {} must exceed the tax-free amount {}",
                income_tax.threshold, income_tax.tax_free_amount
            ),
        ));
    }
    for (field, value) in [
        ("income_tax.lower_rate", income_tax.lower_rate),
        ("income_tax.upper_rate", income_tax.upper_rate),
        ("income_tax.flat_rate", income_tax.flat_rate),
        ("income_tax.ip_box_rate", income_tax.ip_box_rate),
        ("income_tax.notional_cost_share", income_tax.notional_cost_share),
    ] {
        check_rate(field, value)?;
    }
    for (category, rate) in &income_tax.lump_sum_rates {
        check_rate(&format!("income_tax.lump_sum_rates.{}", category), *rate)?;
    }
    if !income_tax
        .lump_sum_rates
        .contains_key(&income_tax.default_lump_sum_category)
    {
        return Err(invalid(
            "income_tax.default_lump_sum_category",
            format!(
                "category '{}' is not in the lump-sum catalog",
                income_tax.default_lump_sum_category
            ),
        ));
    }

    let company = &parts.company;
    check_rate("company.cit_small_rate", company.cit_small_rate)?;
    check_rate("company.cit_standard_rate", company.cit_standard_rate)?;
    check_rate("company.dividend_tax_rate", company.dividend_tax_rate)?;
    check_positive(
        "company.small_taxpayer_revenue_limit",
        company.small_taxpayer_revenue_limit,
    )?;
    check_non_negative("company.accounting_cost", company.accounting_cost)?;

    let payroll = &parts.payroll;
    for (field, value) in [
        ("payroll.employee.pension", payroll.employee.pension),
        ("payroll.employee.disability", payroll.employee.disability),
        ("payroll.employee.sickness", payroll.employee.sickness),
        ("payroll.employer.pension", payroll.employer.pension),
        ("payroll.employer.disability", payroll.employer.disability),
        ("payroll.employer.accident", payroll.employer.accident),
        ("payroll.employer.labor_fund", payroll.employer.labor_fund),
        (
            "payroll.employer.guaranteed_benefits_fund",
            payroll.employer.guaranteed_benefits_fund,
        ),
        ("payroll.health_rate", payroll.health_rate),
    ] {
        check_rate(field, value)?;
    }
    check_non_negative("payroll.monthly_cost_deduction", payroll.monthly_cost_deduction)?;

    Ok(())
}

fn validate_health_tiers(tiers: &[HealthTier]) -> EngineResult<()> {
    const FIELD: &str = "health.lump_sum_tiers";

    let Some((top, bounded)) = tiers.split_last() else {
        return Err(invalid(FIELD, "at least one tier is required"));
    };
    if top.max_yearly_revenue.is_some() {
        return Err(invalid(FIELD, "the last tier must be open-ended"));
    }

    let mut previous: Option<Decimal> = None;
    for tier in bounded {
        let Some(bound) = tier.max_yearly_revenue else {
            return Err(invalid(FIELD, "only the last tier may be open-ended"));
        };
        if previous.is_some_and(|p| bound <= p) {
            return Err(invalid(
                FIELD,
                format!("revenue bounds must be strictly increasing at {}", bound),
            ));
        }
        previous = Some(bound);
    }
    for tier in tiers {
        check_non_negative(FIELD, tier.monthly_amount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> RateTableParts {
        RateTable::pl_2025().into_parts()
    }

    #[test]
    fn test_builtin_table_passes_validation() {
        let table = RateTable::pl_2025();
        assert!(RateTable::new(table.parts().clone()).is_ok());
    }

    #[test]
    fn test_derived_bases_for_2025() {
        let table = RateTable::pl_2025();

        assert_eq!(table.standard_contribution_base(), dec!(5203.80));
        assert_eq!(table.reduced_contribution_base(), dec!(1399.80));
        assert_eq!(table.health_floor(), dec!(419.94));
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let mut parts = parts();
        parts.social.pension = dec!(1.2);

        match RateTable::new(parts) {
            Err(EngineError::InvalidRateTable { field, .. }) => {
                assert_eq!(field, "social.pension")
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_lump_sum_rate_rejected() {
        let mut parts = parts();
        parts
            .income_tax
            .lump_sum_rates
            .insert("trade".to_string(), dec!(-0.03));

        match RateTable::new(parts) {
            Err(EngineError::InvalidRateTable { field, .. }) => {
                assert_eq!(field, "income_tax.lump_sum_rates.trade")
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_threshold_must_exceed_tax_free_amount() {
        let mut parts = parts();
        parts.income_tax.threshold = dec!(30000);

        assert!(matches!(
            RateTable::new(parts),
            Err(EngineError::InvalidRateTable { field, .. }) if field == "income_tax.threshold"
        ));
    }

    #[test]
    fn test_health_tiers_must_increase() {
        let mut parts = parts();
        parts.health.lump_sum_tiers[1].max_yearly_revenue = Some(dec!(60000));

        assert!(matches!(
            RateTable::new(parts),
            Err(EngineError::InvalidRateTable { field, .. }) if field == "health.lump_sum_tiers"
        ));
    }

    #[test]
    fn test_health_tiers_must_end_open() {
        let mut parts = parts();
        parts.health.lump_sum_tiers[2].max_yearly_revenue = Some(dec!(900000));

        assert!(RateTable::new(parts).is_err());
    }

    #[test]
    fn test_unknown_default_category_rejected() {
        let mut parts = parts();
        parts.income_tax.default_lump_sum_category = "space_mining".to_string();

        assert!(RateTable::new(parts).is_err());
    }

    #[test]
    fn test_lump_sum_rate_lookup() {
        let table = RateTable::pl_2025();

        assert_eq!(table.lump_sum_rate("it").unwrap(), dec!(0.12));
        assert_eq!(table.default_lump_sum_rate(), dec!(0.12));
        assert!(matches!(
            table.lump_sum_rate("unknown"),
            Err(EngineError::LumpSumCategoryNotFound { category }) if category == "unknown"
        ));
    }

    #[test]
    fn test_cit_rate_selector() {
        let table = RateTable::pl_2025();

        assert_eq!(table.cit_rate(CitRate::Small), dec!(0.09));
        assert_eq!(table.cit_rate(CitRate::Standard), dec!(0.19));
    }

    #[test]
    fn test_payroll_rate_totals() {
        let table = RateTable::pl_2025();

        assert_eq!(table.payroll().employee.total(), dec!(0.1371));
        assert_eq!(table.payroll().employer.total(), dec!(0.2048));
    }
}
