//! Sole-proprietorship (JDG) regime calculation.
//!
//! This module computes the yearly burden of each JDG tax regime and
//! compares them. Every calculator returns `None` when revenue is not
//! positive.
//!
//! The calculators trust their input; callers validate it with
//! [`CalculationInput::validate`] first.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RateTable;
use crate::models::{
    CalculationInput, ComparisonResult, MonthlyBreakdown, TaxForm, TaxRelief, YearlyResult,
    YearlyTotals,
};

use super::{
    MONTHS_PER_YEAR, calculate_social_contributions, flat_tax, income_health_contribution,
    lump_sum_health_contribution, lump_sum_tax, progressive_tax, ratio, round_money,
};

/// Full-precision figures of one regime, before rounding.
struct RegimeAmounts {
    tax_form: TaxForm,
    monthly_revenue: Decimal,
    monthly_actual_costs: Decimal,
    yearly_reported_costs: Decimal,
    yearly_income: Decimal,
    monthly_social: Decimal,
    monthly_health: Decimal,
    yearly_tax: Decimal,
}

impl RegimeAmounts {
    fn into_result(self) -> YearlyResult {
        let monthly_tax = self.yearly_tax / MONTHS_PER_YEAR;
        let monthly_burden = self.monthly_social + self.monthly_health + monthly_tax;
        let monthly_net = self.monthly_revenue - self.monthly_actual_costs - monthly_burden;

        let yearly_revenue = self.monthly_revenue * MONTHS_PER_YEAR;
        let yearly_social = self.monthly_social * MONTHS_PER_YEAR;
        let yearly_health = self.monthly_health * MONTHS_PER_YEAR;
        let yearly_burden = yearly_social + yearly_health + self.yearly_tax;
        let yearly_net =
            yearly_revenue - self.monthly_actual_costs * MONTHS_PER_YEAR - yearly_burden;

        YearlyResult {
            tax_form: self.tax_form,
            monthly: MonthlyBreakdown {
                social_contributions: round_money(self.monthly_social),
                health_contribution: round_money(self.monthly_health),
                tax: round_money(monthly_tax),
                total_burden: round_money(monthly_burden),
                net_amount: round_money(monthly_net),
            },
            yearly: YearlyTotals {
                revenue: round_money(yearly_revenue),
                costs: round_money(self.yearly_reported_costs),
                income: round_money(self.yearly_income),
                social_contributions: round_money(yearly_social),
                health_contribution: round_money(yearly_health),
                tax: round_money(self.yearly_tax),
                total_burden: round_money(yearly_burden),
                net_amount: round_money(yearly_net),
            },
            effective_rate: ratio(yearly_burden, yearly_revenue),
        }
    }
}

/// Monthly costs deductible under the income regimes.
fn deductible_costs(input: &CalculationInput, table: &RateTable) -> Decimal {
    match input.relief {
        TaxRelief::NotionalCosts => input.monthly_revenue * table.income_tax().notional_cost_share,
        TaxRelief::NoRelief | TaxRelief::IpBox => input.monthly_costs,
    }
}

/// Shared shape of the scale and flat-rate regimes.
fn income_regime(
    input: &CalculationInput,
    table: &RateTable,
    tax_form: TaxForm,
    health_rate: Decimal,
    tax: impl Fn(Decimal) -> Decimal,
) -> Option<YearlyResult> {
    if input.monthly_revenue <= Decimal::ZERO {
        return None;
    }

    let monthly_costs = deductible_costs(input, table);
    let yearly_income = (input.monthly_revenue - monthly_costs) * MONTHS_PER_YEAR;

    let social = calculate_social_contributions(
        input.contribution_base,
        yearly_income,
        input.pays_sickness,
        table,
    )
    .total();

    let income_after_social = yearly_income - social * MONTHS_PER_YEAR;
    let health = income_health_contribution(
        income_after_social / MONTHS_PER_YEAR,
        health_rate,
        table,
    );

    Some(
        RegimeAmounts {
            tax_form,
            monthly_revenue: input.monthly_revenue,
            monthly_actual_costs: input.monthly_costs,
            yearly_reported_costs: monthly_costs * MONTHS_PER_YEAR,
            yearly_income,
            monthly_social: social,
            monthly_health: health,
            yearly_tax: tax(income_after_social.max(Decimal::ZERO)),
        }
        .into_result(),
    )
}

/// Calculates the progressive scale regime.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::calculate_scale;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::{CalculationInput, TaxForm};
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let result = calculate_scale(&CalculationInput::new(dec!(15000), dec!(3000)), &table).unwrap();
/// assert_eq!(result.tax_form, TaxForm::Scale);
/// assert_eq!(result.yearly.income, dec!(144000));
/// ```
pub fn calculate_scale(input: &CalculationInput, table: &RateTable) -> Option<YearlyResult> {
    income_regime(
        input,
        table,
        TaxForm::Scale,
        table.health().scale_rate,
        |income| progressive_tax(income, table),
    )
}

/// Calculates the flat-rate regime.
///
/// When the input claims the IP relief the reduced rate replaces the flat
/// rate and the result is labelled [`TaxForm::IpBox`].
pub fn calculate_linear(input: &CalculationInput, table: &RateTable) -> Option<YearlyResult> {
    let rates = table.income_tax();
    let (tax_form, rate) = match input.relief {
        TaxRelief::IpBox => (TaxForm::IpBox, rates.ip_box_rate),
        TaxRelief::NoRelief | TaxRelief::NotionalCosts => (TaxForm::Linear, rates.flat_rate),
    };

    income_regime(
        input,
        table,
        tax_form,
        table.health().linear_rate,
        |income| flat_tax(income, rate),
    )
}

/// Calculates the lump-sum regime.
///
/// Revenue is the base of the tax and of the income-scaled contribution
/// base; costs only lower the net. Without a supplied rate the table's
/// default category rate applies.
pub fn calculate_ryczalt(input: &CalculationInput, table: &RateTable) -> Option<YearlyResult> {
    if input.monthly_revenue <= Decimal::ZERO {
        return None;
    }

    let yearly_revenue = input.monthly_revenue * MONTHS_PER_YEAR;
    let rate = input
        .lump_sum_rate
        .unwrap_or_else(|| table.default_lump_sum_rate());

    let social = calculate_social_contributions(
        input.contribution_base,
        yearly_revenue,
        input.pays_sickness,
        table,
    )
    .total();

    Some(
        RegimeAmounts {
            tax_form: TaxForm::Ryczalt,
            monthly_revenue: input.monthly_revenue,
            monthly_actual_costs: input.monthly_costs,
            yearly_reported_costs: input.monthly_costs * MONTHS_PER_YEAR,
            yearly_income: yearly_revenue,
            monthly_social: social,
            monthly_health: lump_sum_health_contribution(yearly_revenue, table),
            yearly_tax: lump_sum_tax(yearly_revenue, rate),
        }
        .into_result(),
    )
}

/// Compares every applicable JDG regime for one input.
///
/// Evaluates the scale, the plain flat-rate and the lump-sum regimes, plus
/// the IP variant of the flat-rate regime when the input claims the IP
/// relief. The best variant has the strictly lowest yearly burden; ties go
/// to the variant declared first in [`TaxForm`].
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::compare_all_forms;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::{CalculationInput, TaxForm};
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let input = CalculationInput::new(dec!(15000), dec!(3000)).with_lump_sum_rate(dec!(0.12));
/// let comparison = compare_all_forms(&input, &table).unwrap();
///
/// assert_eq!(comparison.results.len(), 3);
/// assert_eq!(comparison.savings[&comparison.best], dec!(0));
/// assert!(comparison.get(TaxForm::IpBox).is_none());
/// ```
pub fn compare_all_forms(input: &CalculationInput, table: &RateTable) -> Option<ComparisonResult> {
    let plain_linear = CalculationInput {
        relief: match input.relief {
            TaxRelief::IpBox => TaxRelief::NoRelief,
            other => other,
        },
        ..input.clone()
    };

    let mut results = BTreeMap::new();
    for result in [
        calculate_scale(input, table),
        calculate_linear(&plain_linear, table),
        calculate_ryczalt(input, table),
    ]
    .into_iter()
    .flatten()
    {
        results.insert(result.tax_form, result);
    }
    if input.relief == TaxRelief::IpBox {
        if let Some(result) = calculate_linear(input, table) {
            results.insert(result.tax_form, result);
        }
    }

    let (best, best_result) = results
        .iter()
        .fold(None::<(TaxForm, &YearlyResult)>, |best, (form, result)| match best {
            Some((_, current)) if current.yearly.total_burden <= result.yearly.total_burden => best,
            _ => Some((*form, result)),
        })?;
    let best_burden = best_result.yearly.total_burden;
    let best_yearly_net = best_result.yearly.net_amount;

    let savings = results
        .iter()
        .map(|(form, result)| (*form, result.yearly.total_burden - best_burden))
        .collect();

    debug!(?best, %best_burden, "Compared JDG regimes");

    Some(ComparisonResult {
        results,
        best,
        best_yearly_net,
        savings,
    })
}
