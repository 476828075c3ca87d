//! Calculation inputs.
//!
//! This module defines the caller-supplied inputs for the sole-proprietorship
//! (JDG) engine and the limited-liability company (Sp. z o.o.) engine, along
//! with the closed selector enumerations they carry.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monthly amount any input may carry, one trillion PLN.
///
/// Keeps every yearly product of an input within `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Selects how the monthly social-contribution base is determined.
///
/// The variants correspond to the contribution regimes available to a
/// sole proprietor over the life of the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionBase {
    /// Base of 60% of the projected average wage. Includes the labor fund.
    Standard,
    /// Base of 30% of the minimum wage, available for the first 24 months.
    ReducedNewEntrant,
    /// Half of average monthly income, clamped between the reduced and the
    /// standard base.
    IncomeScaled,
    /// First 6 months of a new business: no social contributions, health
    /// contribution still due.
    StartupRelief,
    /// No social contributions at all (e.g. covered by an employment
    /// contract elsewhere).
    NotApplicable,
}

/// Preferential tax relief a sole proprietor may claim.
///
/// The reduced IP rate and the notional cost deduction cannot be combined,
/// so the input carries at most one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRelief {
    /// No preferential relief.
    #[default]
    NoRelief,
    /// Qualifying IP income taxed at the reduced rate instead of the flat rate.
    IpBox,
    /// A fixed share of revenue deducted as costs instead of actual costs.
    NotionalCosts,
}

/// Input for the sole-proprietorship regimes.
///
/// Amounts are monthly, in PLN.
///
/// # Example
///
/// ```
/// use pl_tax_engine::models::{CalculationInput, ContributionBase};
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(dec!(15000), dec!(3000))
///     .with_contribution_base(ContributionBase::Standard)
///     .with_lump_sum_rate(dec!(0.12));
/// assert!(input.validate().is_ok());
/// assert!(input.pays_sickness);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Monthly gross revenue.
    pub monthly_revenue: Decimal,
    /// Monthly deductible costs.
    pub monthly_costs: Decimal,
    /// How the social-contribution base is determined.
    pub contribution_base: ContributionBase,
    /// Lump-sum rate of the declared activity category. Only the lump-sum
    /// regime reads it.
    #[serde(default)]
    pub lump_sum_rate: Option<Decimal>,
    /// Whether the voluntary sickness contribution is paid.
    #[serde(default = "default_pays_sickness")]
    pub pays_sickness: bool,
    /// Preferential relief, if any.
    #[serde(default)]
    pub relief: TaxRelief,
}

fn default_pays_sickness() -> bool {
    true
}

impl CalculationInput {
    /// Creates an input with the standard contribution base, sickness
    /// contribution paid and no relief.
    pub fn new(monthly_revenue: Decimal, monthly_costs: Decimal) -> Self {
        Self {
            monthly_revenue,
            monthly_costs,
            contribution_base: ContributionBase::Standard,
            lump_sum_rate: None,
            pays_sickness: true,
            relief: TaxRelief::NoRelief,
        }
    }

    /// Sets the contribution-base selector.
    pub fn with_contribution_base(mut self, contribution_base: ContributionBase) -> Self {
        self.contribution_base = contribution_base;
        self
    }

    /// Sets the lump-sum rate.
    pub fn with_lump_sum_rate(mut self, rate: Decimal) -> Self {
        self.lump_sum_rate = Some(rate);
        self
    }

    /// Sets whether the sickness contribution is paid.
    pub fn with_sickness(mut self, pays_sickness: bool) -> Self {
        self.pays_sickness = pays_sickness;
        self
    }

    /// Sets the preferential relief.
    pub fn with_relief(mut self, relief: TaxRelief) -> Self {
        self.relief = relief;
        self
    }

    /// Checks the input against its domain.
    ///
    /// Revenue and costs must lie in `[0, MAX_AMOUNT]` and a lump-sum rate,
    /// when present, must lie in `[0, 1]`. A zero revenue is valid input; the
    /// engines answer it with an absent result.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("monthly_revenue", self.monthly_revenue)?;
        check_amount("monthly_costs", self.monthly_costs)?;
        if let Some(rate) = self.lump_sum_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: "lump_sum_rate".to_string(),
                    message: format!("rate {} is outside [0, 1]", rate),
                });
            }
        }
        Ok(())
    }
}

/// Corporate income tax rate selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitRate {
    /// Reduced rate for small taxpayers.
    Small,
    /// Standard rate.
    Standard,
}

/// How the owner of a company is paid.
///
/// Declaration order is also the tie-break order when strategies produce
/// the same owner net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStrategy {
    /// No payroll; all post-tax profit paid out as dividend.
    DividendOnly,
    /// Minimum-wage payroll, remainder paid as dividend.
    MinSalaryPlusDividend,
    /// All available funds paid as payroll.
    FullSalary,
}

impl PayoutStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [PayoutStrategy; 3] = [
        PayoutStrategy::DividendOnly,
        PayoutStrategy::MinSalaryPlusDividend,
        PayoutStrategy::FullSalary,
    ];
}

/// Input for the company engine.
///
/// # Example
///
/// ```
/// use pl_tax_engine::models::{CitRate, PayoutStrategy, SpzooCalculationInput};
/// use rust_decimal_macros::dec;
///
/// let input = SpzooCalculationInput::new(dec!(30000), dec!(3000), CitRate::Small);
/// assert_eq!(input.payout_strategy, PayoutStrategy::MinSalaryPlusDividend);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpzooCalculationInput {
    /// Monthly company revenue.
    pub monthly_revenue: Decimal,
    /// Monthly operating costs, excluding any owner payout.
    pub monthly_operating_costs: Decimal,
    /// The corporate tax rate selector.
    pub cit_rate: CitRate,
    /// The owner's payout strategy. The individual strategy calculators
    /// ignore it; it records the caller's preference.
    #[serde(default = "default_payout_strategy")]
    pub payout_strategy: PayoutStrategy,
}

fn default_payout_strategy() -> PayoutStrategy {
    PayoutStrategy::MinSalaryPlusDividend
}

impl SpzooCalculationInput {
    /// Creates an input with the mixed payout strategy selected.
    pub fn new(monthly_revenue: Decimal, monthly_operating_costs: Decimal, cit_rate: CitRate) -> Self {
        Self {
            monthly_revenue,
            monthly_operating_costs,
            cit_rate,
            payout_strategy: default_payout_strategy(),
        }
    }

    /// Checks that revenue and operating costs lie in `[0, MAX_AMOUNT]`.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("monthly_revenue", self.monthly_revenue)?;
        check_amount("monthly_operating_costs", self.monthly_operating_costs)
    }
}

/// Rejects amounts below zero or above [`MAX_AMOUNT`].
pub(crate) fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_input_has_standard_defaults() {
        let input = CalculationInput::new(dec!(10000), dec!(1000));

        assert_eq!(input.contribution_base, ContributionBase::Standard);
        assert_eq!(input.relief, TaxRelief::NoRelief);
        assert!(input.pays_sickness);
        assert_eq!(input.lump_sum_rate, None);
    }

    #[test]
    fn test_negative_costs_rejected() {
        let input = CalculationInput::new(dec!(10000), dec!(-1));

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_costs"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_revenue_above_ceiling_rejected() {
        let input = CalculationInput::new(Decimal::MAX, dec!(0));

        match input.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_revenue");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_revenue_at_ceiling_accepted() {
        let input = CalculationInput::new(MAX_AMOUNT, MAX_AMOUNT);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_zero_revenue_is_valid_input() {
        let input = CalculationInput::new(Decimal::ZERO, Decimal::ZERO);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_lump_sum_rate_above_one_rejected() {
        let input = CalculationInput::new(dec!(10000), dec!(0)).with_lump_sum_rate(dec!(1.5));

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "lump_sum_rate"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let json = r#"{
            "monthly_revenue": "12000",
            "monthly_costs": "500",
            "contribution_base": "reduced_new_entrant"
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.contribution_base, ContributionBase::ReducedNewEntrant);
        assert!(input.pays_sickness);
        assert_eq!(input.relief, TaxRelief::NoRelief);
    }

    #[test]
    fn test_spzoo_input_rejects_oversized_revenue() {
        let input = SpzooCalculationInput::new(MAX_AMOUNT + dec!(1), dec!(0), CitRate::Small);

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_revenue"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_spzoo_input_rejects_negative_operating_costs() {
        let input = SpzooCalculationInput::new(dec!(20000), dec!(-5), CitRate::Small);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_payout_strategies_are_ordered_by_declaration() {
        assert!(PayoutStrategy::DividendOnly < PayoutStrategy::MinSalaryPlusDividend);
        assert!(PayoutStrategy::MinSalaryPlusDividend < PayoutStrategy::FullSalary);
    }
}
