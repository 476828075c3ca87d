//! Break-even revenue search between business forms.
//!
//! Bisects over monthly company revenue for the point from which the best
//! company payout strategy meets a target monthly net.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::RateTable;
use crate::models::{CitRate, SpzooCalculationInput, ThresholdSearch};

use super::{MONTHS_PER_YEAR, compare_spzoo_scenarios, round_money};

/// Lowest monthly revenue the search considers.
pub const SEARCH_LOWER_BOUND: Decimal = dec!(5000);

/// Highest monthly revenue the search considers.
pub const SEARCH_UPPER_BOUND: Decimal = dec!(100000);

/// The search stops once the interval is narrower than this.
pub const SEARCH_TOLERANCE: Decimal = dec!(100);

/// Hard cap on bisection steps.
pub const MAX_ITERATIONS: u32 = 64;

/// Best monthly owner net of a company at the given revenue.
fn best_monthly_net(
    monthly_revenue: Decimal,
    monthly_costs: Decimal,
    cit_rate: CitRate,
    table: &RateTable,
) -> Decimal {
    let input = SpzooCalculationInput::new(monthly_revenue, monthly_costs, cit_rate);
    compare_spzoo_scenarios(&input, table)
        .map(|comparison| comparison.best_net_amount / MONTHS_PER_YEAR)
        .unwrap_or_default()
}

/// Finds the monthly revenue from which a company nets at least the target.
///
/// Searches `[SEARCH_LOWER_BOUND, SEARCH_UPPER_BOUND]` by bisection. The
/// search never fails: when the bounds already decide the answer, or when
/// the sampled nets turn out not to grow with revenue, a sentinel variant
/// is returned instead of a revenue.
///
/// # Arguments
///
/// * `target_monthly_net` - Monthly net the company has to reach
/// * `monthly_costs` - Company operating costs
/// * `cit_rate` - Corporate tax rate selector
/// * `table` - The rate table
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::find_spzoo_threshold;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::{CitRate, ThresholdSearch};
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let search = find_spzoo_threshold(dec!(15000), dec!(3000), CitRate::Small, &table);
/// assert!(matches!(search, ThresholdSearch::Found { .. }));
///
/// let unreachable = find_spzoo_threshold(dec!(1000000), dec!(3000), CitRate::Small, &table);
/// assert_eq!(unreachable, ThresholdSearch::NotReached { upper_bound: dec!(100000) });
/// ```
pub fn find_spzoo_threshold(
    target_monthly_net: Decimal,
    monthly_costs: Decimal,
    cit_rate: CitRate,
    table: &RateTable,
) -> ThresholdSearch {
    let objective = |revenue| best_monthly_net(revenue, monthly_costs, cit_rate, table);

    let mut low = SEARCH_LOWER_BOUND;
    let mut high = SEARCH_UPPER_BOUND;

    let at_low = objective(low);
    if at_low >= target_monthly_net {
        return ThresholdSearch::AlreadyMet { lower_bound: low };
    }
    let at_high = objective(high);
    if at_high < target_monthly_net {
        return ThresholdSearch::NotReached { upper_bound: high };
    }

    let mut samples = vec![(low, at_low), (high, at_high)];
    let mut iterations = 0;

    while high - low >= SEARCH_TOLERANCE && iterations < MAX_ITERATIONS {
        let mid = (low + high) / dec!(2);
        let value = objective(mid);
        iterations += 1;

        let contradicts = samples.iter().any(|&(revenue, sampled)| {
            (revenue < mid && sampled > value) || (revenue > mid && sampled < value)
        });
        if contradicts {
            debug!(%mid, %value, "Company net is not monotonic in revenue");
            return ThresholdSearch::NonMonotonic {
                near_revenue: round_money(mid),
            };
        }
        samples.push((mid, value));

        if value >= target_monthly_net {
            high = mid;
        } else {
            low = mid;
        }
    }

    let monthly_revenue = round_money((low + high) / dec!(2));
    debug!(%target_monthly_net, %monthly_revenue, iterations, "Located company threshold");

    ThresholdSearch::Found {
        monthly_revenue,
        iterations,
    }
}
