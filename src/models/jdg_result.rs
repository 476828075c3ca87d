//! Sole-proprietorship (JDG) calculation results.
//!
//! A [`YearlyResult`] is produced per tax regime; [`ComparisonResult`]
//! gathers the regimes evaluated for one input and records the best one.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies a JDG tax regime variant.
///
/// Declaration order is the evaluation order in a comparison and decides
/// ties: when two variants carry exactly the same burden, the one declared
/// first wins.
///
/// # Example
///
/// ```
/// use pl_tax_engine::models::TaxForm;
///
/// assert!(TaxForm::Scale < TaxForm::IpBox);
/// assert_eq!(serde_json::to_string(&TaxForm::IpBox).unwrap(), "\"ip_box\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxForm {
    /// Two-bracket progressive scale with a tax-free allowance.
    Scale,
    /// Flat-rate income tax.
    Linear,
    /// Lump-sum tax on revenue.
    Ryczalt,
    /// Flat-rate regime with qualifying IP income taxed at the reduced rate.
    IpBox,
}

/// Per-month figures for one regime, rounded to the grosz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Social contributions.
    pub social_contributions: Decimal,
    /// Health contribution.
    pub health_contribution: Decimal,
    /// Income tax advance.
    pub tax: Decimal,
    /// Sum of contributions and tax.
    pub total_burden: Decimal,
    /// Revenue less actual costs and the total burden.
    pub net_amount: Decimal,
}

/// Yearly figures for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyTotals {
    /// Gross revenue.
    pub revenue: Decimal,
    /// Costs: the deduction basis for the income regimes (actual or
    /// notional), actual costs for the lump-sum regime.
    pub costs: Decimal,
    /// Revenue less deductible costs, unclamped. For the lump-sum regime
    /// this equals revenue.
    pub income: Decimal,
    /// Social contributions.
    pub social_contributions: Decimal,
    /// Health contribution.
    pub health_contribution: Decimal,
    /// Income tax.
    pub tax: Decimal,
    /// Sum of contributions and tax.
    pub total_burden: Decimal,
    /// Revenue less actual costs and the total burden.
    pub net_amount: Decimal,
}

/// The full result of one regime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyResult {
    /// The regime variant this result belongs to.
    pub tax_form: TaxForm,
    /// Monthly figures.
    pub monthly: MonthlyBreakdown,
    /// Yearly figures.
    pub yearly: YearlyTotals,
    /// Total burden divided by revenue.
    pub effective_rate: Decimal,
}

/// The outcome of comparing all JDG regimes for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Every evaluated regime, keyed by variant.
    pub results: BTreeMap<TaxForm, YearlyResult>,
    /// The variant with the lowest yearly total burden.
    pub best: TaxForm,
    /// Yearly net amount of the best variant.
    pub best_yearly_net: Decimal,
    /// For each variant, how much more burden it carries than the best one.
    pub savings: BTreeMap<TaxForm, Decimal>,
}

impl ComparisonResult {
    /// Returns the result for a variant, if it was evaluated.
    pub fn get(&self, form: TaxForm) -> Option<&YearlyResult> {
        self.results.get(&form)
    }

    /// Returns the result of the best variant.
    pub fn best_result(&self) -> Option<&YearlyResult> {
        self.results.get(&self.best)
    }
}
