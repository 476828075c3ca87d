//! Limited-liability company (Sp. z o.o.) payout calculation.
//!
//! Each payout strategy has its own calculator returning `None` when
//! revenue is not positive; [`compare_spzoo_scenarios`] runs all three.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::RateTable;
use crate::models::{
    CitRate, ContributionBase, PayoutStrategy, SpzooCalculationInput, SpzooComparisonResult,
    SpzooMonthlyBreakdown, SpzooYearlyResult, SpzooYearlyTotals,
};

use super::{
    MONTHS_PER_YEAR, PayrollBreakdown, calculate_payroll, calculate_social_contributions, ratio,
    round_money,
};

/// Full-precision monthly figures of one strategy, before rounding.
#[derive(Default)]
struct ScenarioAmounts {
    revenue: Decimal,
    operating_costs: Decimal,
    payroll: PayrollBreakdown,
    profit_before_tax: Decimal,
    cit: Decimal,
    profit_after_tax: Decimal,
    dividend_tax: Decimal,
    net_dividend: Decimal,
    total_net: Decimal,
    mandatory_contributions: Decimal,
    accounting_cost: Decimal,
}

impl ScenarioAmounts {
    fn burden(&self) -> Decimal {
        self.payroll.total_burden()
            + self.cit
            + self.dividend_tax
            + self.mandatory_contributions
            + self.accounting_cost
    }

    fn into_result(self, payout_strategy: PayoutStrategy, cit_rate: CitRate) -> SpzooYearlyResult {
        let yearly = |monthly: Decimal| round_money(monthly * MONTHS_PER_YEAR);
        let yearly_burden = self.burden() * MONTHS_PER_YEAR;
        let yearly_revenue = self.revenue * MONTHS_PER_YEAR;

        SpzooYearlyResult {
            payout_strategy,
            cit_rate,
            monthly: SpzooMonthlyBreakdown {
                company_revenue: round_money(self.revenue),
                operating_costs: round_money(self.operating_costs),
                owner_gross_salary: round_money(self.payroll.gross),
                employment_costs: round_money(self.payroll.total_employment_cost()),
                profit_before_tax: round_money(self.profit_before_tax),
                cit: round_money(self.cit),
                profit_after_tax: round_money(self.profit_after_tax),
                dividend_tax: round_money(self.dividend_tax),
                owner_net_salary: round_money(self.payroll.net),
                owner_net_dividend: round_money(self.net_dividend),
                owner_total_net: round_money(self.total_net),
                owner_mandatory_contributions: round_money(self.mandatory_contributions),
                accounting_cost: round_money(self.accounting_cost),
            },
            yearly: SpzooYearlyTotals {
                revenue: round_money(yearly_revenue),
                operating_costs: yearly(self.operating_costs),
                owner_gross_salary: yearly(self.payroll.gross),
                employment_costs: yearly(self.payroll.total_employment_cost()),
                profit_before_tax: yearly(self.profit_before_tax),
                cit: yearly(self.cit),
                profit_after_tax: yearly(self.profit_after_tax),
                dividend_tax: yearly(self.dividend_tax),
                owner_net_salary: yearly(self.payroll.net),
                owner_net_dividend: yearly(self.net_dividend),
                owner_total_net: yearly(self.total_net),
                owner_mandatory_contributions: yearly(self.mandatory_contributions),
                accounting_cost: yearly(self.accounting_cost),
                total_tax_burden: round_money(yearly_burden),
            },
            effective_rate: ratio(yearly_burden, yearly_revenue),
        }
    }
}

/// Resolves the corporate tax rate actually applicable to the input.
///
/// The reduced rate is only available up to the small-taxpayer revenue
/// limit; above it the standard rate applies.
pub fn applied_cit_rate(input: &SpzooCalculationInput, table: &RateTable) -> CitRate {
    let yearly_revenue = input.monthly_revenue * MONTHS_PER_YEAR;
    let limit = table.company().small_taxpayer_revenue_limit;

    if input.cit_rate == CitRate::Small && yearly_revenue > limit {
        warn!(
            %yearly_revenue,
            %limit,
            "Revenue exceeds the small taxpayer limit, applying the standard CIT rate"
        );
        return CitRate::Standard;
    }
    input.cit_rate
}

/// Monthly contributions a sole shareholder owes without any payroll.
///
/// The full standard social stack, sickness and labor fund included, plus
/// the health floor.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::{owner_mandatory_contributions, round_money};
/// use pl_tax_engine::config::RateTable;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// assert_eq!(round_money(owner_mandatory_contributions(&table)), dec!(2193.92));
/// ```
pub fn owner_mandatory_contributions(table: &RateTable) -> Decimal {
    let social =
        calculate_social_contributions(ContributionBase::Standard, Decimal::ZERO, true, table);
    social.total() + table.health_floor()
}

fn corporate_tax(profit: Decimal, cit_rate: CitRate, table: &RateTable) -> Decimal {
    profit.max(Decimal::ZERO) * table.cit_rate(cit_rate)
}

fn tax_on_dividend(dividend: Decimal, table: &RateTable) -> Decimal {
    dividend.max(Decimal::ZERO) * table.company().dividend_tax_rate
}

/// Calculates the dividend-only strategy.
///
/// All post-tax profit is paid out as dividend; the owner separately pays
/// the mandatory contributions. Owner net is floored at zero.
pub fn calculate_dividend_only(
    input: &SpzooCalculationInput,
    table: &RateTable,
) -> Option<SpzooYearlyResult> {
    if input.monthly_revenue <= Decimal::ZERO {
        return None;
    }
    let cit_rate = applied_cit_rate(input, table);
    let accounting_cost = table.company().accounting_cost;

    let profit = input.monthly_revenue - input.monthly_operating_costs - accounting_cost;
    let cit = corporate_tax(profit, cit_rate, table);
    let profit_after_tax = profit - cit;
    let dividend_tax = tax_on_dividend(profit_after_tax, table);
    let net_dividend = (profit_after_tax - dividend_tax).max(Decimal::ZERO);
    let mandatory_contributions = owner_mandatory_contributions(table);

    Some(
        ScenarioAmounts {
            revenue: input.monthly_revenue,
            operating_costs: input.monthly_operating_costs,
            profit_before_tax: profit.max(Decimal::ZERO),
            cit,
            profit_after_tax: profit_after_tax.max(Decimal::ZERO),
            dividend_tax,
            net_dividend,
            total_net: (net_dividend - mandatory_contributions).max(Decimal::ZERO),
            mandatory_contributions,
            accounting_cost,
            ..ScenarioAmounts::default()
        }
        .into_result(PayoutStrategy::DividendOnly, cit_rate),
    )
}

/// Calculates the minimum-wage payroll plus dividend strategy.
pub fn calculate_min_salary_plus_dividend(
    input: &SpzooCalculationInput,
    table: &RateTable,
) -> Option<SpzooYearlyResult> {
    if input.monthly_revenue <= Decimal::ZERO {
        return None;
    }
    let cit_rate = applied_cit_rate(input, table);
    let accounting_cost = table.company().accounting_cost;

    let payroll = calculate_payroll(table.wages().minimum_wage, table);
    let profit = input.monthly_revenue
        - input.monthly_operating_costs
        - payroll.total_employment_cost()
        - accounting_cost;
    let cit = corporate_tax(profit, cit_rate, table);
    let profit_after_tax = (profit - cit).max(Decimal::ZERO);
    let dividend_tax = tax_on_dividend(profit_after_tax, table);
    let net_dividend = profit_after_tax - dividend_tax;

    Some(
        ScenarioAmounts {
            revenue: input.monthly_revenue,
            operating_costs: input.monthly_operating_costs,
            profit_before_tax: profit.max(Decimal::ZERO),
            cit,
            profit_after_tax,
            dividend_tax,
            net_dividend,
            total_net: payroll.net + net_dividend,
            accounting_cost,
            payroll,
            ..ScenarioAmounts::default()
        }
        .into_result(PayoutStrategy::MinSalaryPlusDividend, cit_rate),
    )
}

/// Calculates the full-salary strategy.
///
/// The gross salary is sized so that salary plus employer contributions
/// absorb all available funds. Any remainder stays in the company and is
/// subject to corporate tax; nothing is distributed as dividend.
pub fn calculate_full_salary(
    input: &SpzooCalculationInput,
    table: &RateTable,
) -> Option<SpzooYearlyResult> {
    if input.monthly_revenue <= Decimal::ZERO {
        return None;
    }
    let cit_rate = applied_cit_rate(input, table);
    let accounting_cost = table.company().accounting_cost;

    let available = input.monthly_revenue - input.monthly_operating_costs - accounting_cost;
    let gross =
        (available / (Decimal::ONE + table.payroll().employer.total())).max(Decimal::ZERO);
    let payroll = calculate_payroll(gross, table);

    let profit = (available - payroll.total_employment_cost()).max(Decimal::ZERO);
    let cit = corporate_tax(profit, cit_rate, table);

    Some(
        ScenarioAmounts {
            revenue: input.monthly_revenue,
            operating_costs: input.monthly_operating_costs,
            profit_before_tax: profit,
            cit,
            profit_after_tax: profit - cit,
            total_net: payroll.net,
            accounting_cost,
            payroll,
            ..ScenarioAmounts::default()
        }
        .into_result(PayoutStrategy::FullSalary, cit_rate),
    )
}

/// Calculates a single payout strategy.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::calculate_strategy;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::{CitRate, PayoutStrategy, SpzooCalculationInput};
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let input = SpzooCalculationInput::new(dec!(30000), dec!(3000), CitRate::Small);
/// let result = calculate_strategy(input.payout_strategy, &input, &table).unwrap();
/// assert_eq!(result.payout_strategy, PayoutStrategy::MinSalaryPlusDividend);
/// ```
pub fn calculate_strategy(
    strategy: PayoutStrategy,
    input: &SpzooCalculationInput,
    table: &RateTable,
) -> Option<SpzooYearlyResult> {
    match strategy {
        PayoutStrategy::DividendOnly => calculate_dividend_only(input, table),
        PayoutStrategy::MinSalaryPlusDividend => calculate_min_salary_plus_dividend(input, table),
        PayoutStrategy::FullSalary => calculate_full_salary(input, table),
    }
}

/// Runs every payout strategy and picks the one with the highest yearly
/// owner net. Ties go to the strategy declared first.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::compare_spzoo_scenarios;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::{CitRate, SpzooCalculationInput};
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let input = SpzooCalculationInput::new(dec!(40000), dec!(3000), CitRate::Small);
/// let comparison = compare_spzoo_scenarios(&input, &table).unwrap();
///
/// assert_eq!(comparison.results.len(), 3);
/// assert_eq!(
///     comparison.best_result().unwrap().yearly.owner_total_net,
///     comparison.best_net_amount
/// );
/// ```
pub fn compare_spzoo_scenarios(
    input: &SpzooCalculationInput,
    table: &RateTable,
) -> Option<SpzooComparisonResult> {
    let results: BTreeMap<PayoutStrategy, SpzooYearlyResult> = PayoutStrategy::ALL
        .into_iter()
        .filter_map(|strategy| calculate_strategy(strategy, input, table))
        .map(|result| (result.payout_strategy, result))
        .collect();

    let (best, best_net_amount) = results.iter().fold(
        None::<(PayoutStrategy, Decimal)>,
        |best, (strategy, result)| {
            let net = result.yearly.owner_total_net;
            match best {
                Some((_, current)) if current >= net => best,
                _ => Some((*strategy, net)),
            }
        },
    )?;

    debug!(?best, %best_net_amount, "Compared company payout strategies");

    Some(SpzooComparisonResult {
        results,
        best,
        best_net_amount,
    })
}
