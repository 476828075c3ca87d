//! Limited-liability company (Sp. z o.o.) calculation results.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CitRate, PayoutStrategy};

/// Per-month company and owner figures for one payout strategy, rounded to
/// the grosz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpzooMonthlyBreakdown {
    /// Company revenue.
    pub company_revenue: Decimal,
    /// Operating costs, excluding the owner payout.
    pub operating_costs: Decimal,
    /// Owner gross salary.
    pub owner_gross_salary: Decimal,
    /// Gross payroll plus employer contributions.
    pub employment_costs: Decimal,
    /// Profit before corporate tax, floored at zero.
    pub profit_before_tax: Decimal,
    /// Corporate income tax.
    pub cit: Decimal,
    /// Profit after corporate tax, floored at zero.
    pub profit_after_tax: Decimal,
    /// Tax withheld on the dividend.
    pub dividend_tax: Decimal,
    /// Owner salary after employee contributions, health and PIT.
    pub owner_net_salary: Decimal,
    /// Dividend after dividend tax.
    pub owner_net_dividend: Decimal,
    /// Everything the owner takes home.
    pub owner_total_net: Decimal,
    /// Contributions the owner pays personally when there is no payroll.
    pub owner_mandatory_contributions: Decimal,
    /// Fixed accounting overhead.
    pub accounting_cost: Decimal,
}

/// Yearly company and owner figures for one payout strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpzooYearlyTotals {
    /// Company revenue.
    pub revenue: Decimal,
    /// Operating costs.
    pub operating_costs: Decimal,
    /// Owner gross salary.
    pub owner_gross_salary: Decimal,
    /// Gross payroll plus employer contributions.
    pub employment_costs: Decimal,
    /// Profit before corporate tax, floored at zero.
    pub profit_before_tax: Decimal,
    /// Corporate income tax.
    pub cit: Decimal,
    /// Profit after corporate tax, floored at zero.
    pub profit_after_tax: Decimal,
    /// Tax withheld on the dividend.
    pub dividend_tax: Decimal,
    /// Owner net salary.
    pub owner_net_salary: Decimal,
    /// Owner net dividend.
    pub owner_net_dividend: Decimal,
    /// Owner take-home total.
    pub owner_total_net: Decimal,
    /// Owner mandatory contributions.
    pub owner_mandatory_contributions: Decimal,
    /// Accounting overhead.
    pub accounting_cost: Decimal,
    /// All taxes, contributions and the accounting overhead.
    pub total_tax_burden: Decimal,
}

/// The full result of one payout strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpzooYearlyResult {
    /// The payout strategy.
    pub payout_strategy: PayoutStrategy,
    /// The corporate tax rate actually applied.
    pub cit_rate: CitRate,
    /// Monthly figures.
    pub monthly: SpzooMonthlyBreakdown,
    /// Yearly figures.
    pub yearly: SpzooYearlyTotals,
    /// Total tax burden divided by revenue.
    pub effective_rate: Decimal,
}

/// The outcome of comparing all payout strategies for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpzooComparisonResult {
    /// Every strategy, keyed by strategy.
    pub results: BTreeMap<PayoutStrategy, SpzooYearlyResult>,
    /// The strategy with the highest yearly owner net.
    pub best: PayoutStrategy,
    /// Yearly owner net of the best strategy.
    pub best_net_amount: Decimal,
}

impl SpzooComparisonResult {
    /// Returns the result for a strategy.
    pub fn get(&self, strategy: PayoutStrategy) -> Option<&SpzooYearlyResult> {
        self.results.get(&strategy)
    }

    /// Returns the result of the best strategy.
    pub fn best_result(&self) -> Option<&SpzooYearlyResult> {
        self.results.get(&self.best)
    }
}
