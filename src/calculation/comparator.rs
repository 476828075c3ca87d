//! Cross-form comparison.
//!
//! Composes the JDG engine, the company engine and the employment
//! calculator into verdicts between business forms, and produces revenue
//! sweeps for charting.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BusinessForm, BusinessFormComparison, CalculationInput, CitRate, ComparisonResult,
    EmploymentComparison, SpzooCalculationInput, SpzooComparisonResult, SweepPoint, TaxForm,
    check_amount,
};

use super::{
    MONTHS_PER_YEAR, calculate_employment_net, compare_all_forms, compare_spzoo_scenarios,
    find_spzoo_threshold, round_money,
};

/// Largest number of points a single revenue sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 1000;

/// `difference` as a percentage of `base`, zero when `base` is not positive.
fn percent_of(difference: Decimal, base: Decimal) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_money(difference / base * dec!(100))
}

/// Compares the best JDG regime against the best company strategy.
///
/// Both results must come from the same revenue and costs. The break-even
/// search targets the best JDG monthly net with the company's operating
/// costs and applied corporate tax rate.
///
/// # Returns
///
/// Returns `None` if either comparison lacks its best result.
pub fn compare_business_forms(
    jdg: &ComparisonResult,
    spzoo: &SpzooComparisonResult,
    table: &RateTable,
) -> Option<BusinessFormComparison> {
    let jdg_best = jdg.best_result()?;
    let spzoo_best = spzoo.best_result()?;

    let jdg_yearly_net = jdg_best.yearly.net_amount;
    let spzoo_yearly_net = spzoo_best.yearly.owner_total_net;

    let (winner, loser_net) = if spzoo_yearly_net > jdg_yearly_net {
        (BusinessForm::Spzoo, jdg_yearly_net)
    } else {
        (BusinessForm::Jdg, spzoo_yearly_net)
    };
    let yearly_difference = (jdg_yearly_net - spzoo_yearly_net).abs();

    let spzoo_threshold = find_spzoo_threshold(
        jdg_yearly_net / MONTHS_PER_YEAR,
        spzoo_best.monthly.operating_costs,
        spzoo_best.cit_rate,
        table,
    );
    let current_revenue = spzoo_best.monthly.company_revenue;
    let threshold_gap = spzoo_threshold
        .revenue()
        .filter(|threshold| current_revenue < *threshold)
        .map(|threshold| threshold - current_revenue);

    debug!(?winner, %yearly_difference, "Compared business forms");

    Some(BusinessFormComparison {
        jdg_best: jdg.best,
        jdg_yearly_net,
        spzoo_best: spzoo.best,
        spzoo_yearly_net,
        winner,
        yearly_difference,
        percent_difference: percent_of(yearly_difference, loser_net),
        spzoo_threshold,
        threshold_gap,
    })
}

/// Compares self-employment against an employment contract.
///
/// The B2B side is the best JDG regime for `input`. As a second reference
/// it also reports the best JDG net when invoicing exactly the employment
/// gross with no costs.
///
/// # Returns
///
/// Returns `None` if `input` has no positive revenue.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::compare_b2b_vs_employment;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::CalculationInput;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let input = CalculationInput::new(dec!(20000), dec!(1000));
/// let comparison = compare_b2b_vs_employment(&input, dec!(15000), &table).unwrap();
///
/// assert_eq!(
///     comparison.monthly_difference,
///     comparison.b2b_monthly_net - comparison.employment_net
/// );
/// ```
pub fn compare_b2b_vs_employment(
    input: &CalculationInput,
    employment_gross: Decimal,
    table: &RateTable,
) -> Option<EmploymentComparison> {
    let jdg = compare_all_forms(input, table)?;
    let b2b_monthly_net = jdg.best_result()?.monthly.net_amount;
    let employment_net = calculate_employment_net(employment_gross, table);
    let monthly_difference = b2b_monthly_net - employment_net;

    let at_gross = CalculationInput {
        monthly_revenue: employment_gross,
        monthly_costs: Decimal::ZERO,
        ..input.clone()
    };
    let b2b_net_at_employment_gross = compare_all_forms(&at_gross, table)
        .and_then(|comparison| comparison.best_result().map(|best| best.monthly.net_amount));

    Some(EmploymentComparison {
        employment_gross: round_money(employment_gross),
        employment_net,
        b2b_best: jdg.best,
        b2b_monthly_net,
        monthly_difference,
        percent_difference: percent_of(monthly_difference, employment_net),
        b2b_wins: monthly_difference > Decimal::ZERO,
        b2b_net_at_employment_gross,
    })
}

/// Produces monthly nets of every option across a revenue range.
///
/// Revenue runs from `from` to `to` inclusive in increments of `step`.
/// Costs, contribution base, lump-sum rate and relief come from `input`;
/// its revenue is ignored. Points where an engine has no result carry a
/// zero net.
///
/// # Returns
///
/// Returns `InvalidInput` if `from`, `to` or the input's costs fall outside
/// `[0, MAX_AMOUNT]`, `step` is not positive, `from` exceeds `to`, or the
/// range would exceed [`MAX_SWEEP_POINTS`].
pub fn revenue_sweep(
    input: &CalculationInput,
    cit_rate: CitRate,
    from: Decimal,
    to: Decimal,
    step: Decimal,
    table: &RateTable,
) -> EngineResult<Vec<SweepPoint>> {
    check_amount("from", from)?;
    check_amount("to", to)?;
    check_amount("monthly_costs", input.monthly_costs)?;
    if step <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "step".to_string(),
            message: format!("must be positive, got {}", step),
        });
    }
    if from > to {
        return Err(EngineError::InvalidInput {
            field: "to".to_string(),
            message: format!("range end {} is below its start {}", to, from),
        });
    }
    let within_limit = (to - from)
        .checked_div(step)
        .is_some_and(|count| count < Decimal::from(MAX_SWEEP_POINTS));
    if !within_limit {
        return Err(EngineError::InvalidInput {
            field: "step".to_string(),
            message: format!("range would exceed {} points", MAX_SWEEP_POINTS),
        });
    }

    let mut points = Vec::new();
    let mut revenue = from;
    while revenue <= to {
        points.push(sweep_point(input, cit_rate, revenue, table));
        revenue += step;
    }

    debug!(points = points.len(), "Produced revenue sweep");
    Ok(points)
}

fn sweep_point(
    input: &CalculationInput,
    cit_rate: CitRate,
    monthly_revenue: Decimal,
    table: &RateTable,
) -> SweepPoint {
    let jdg = compare_all_forms(
        &CalculationInput {
            monthly_revenue,
            ..input.clone()
        },
        table,
    );
    let net = |form| {
        jdg.as_ref()
            .and_then(|comparison| comparison.get(form))
            .map(|result| result.monthly.net_amount)
            .unwrap_or_default()
    };

    let spzoo_input = SpzooCalculationInput::new(monthly_revenue, input.monthly_costs, cit_rate);
    let spzoo_net = compare_spzoo_scenarios(&spzoo_input, table)
        .map(|comparison| round_money(comparison.best_net_amount / MONTHS_PER_YEAR))
        .unwrap_or_default();

    SweepPoint {
        monthly_revenue,
        scale_net: net(TaxForm::Scale),
        linear_net: net(TaxForm::Linear),
        ryczalt_net: net(TaxForm::Ryczalt),
        spzoo_net,
    }
}
