//! Health contribution calculation.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// Calculates the monthly health contribution on income.
///
/// Used by the scale and flat-rate regimes: `rate` applied to the monthly
/// income after social contributions (clamped at zero), never below the
/// health floor.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::income_health_contribution;
/// use pl_tax_engine::config::RateTable;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// assert_eq!(income_health_contribution(dec!(10000), dec!(0.09), &table), dec!(900));
/// // Below the floor of 9% of the minimum wage
/// assert_eq!(income_health_contribution(dec!(1000), dec!(0.09), &table), dec!(419.94));
/// ```
pub fn income_health_contribution(
    monthly_income_after_social: Decimal,
    rate: Decimal,
    table: &RateTable,
) -> Decimal {
    let computed = monthly_income_after_social.max(Decimal::ZERO) * rate;
    computed.max(table.health_floor())
}

/// Selects the fixed monthly health contribution of the lump-sum regime.
///
/// Tier bounds are inclusive: a yearly revenue equal to a bound falls in
/// the lower tier.
pub fn lump_sum_health_contribution(yearly_revenue: Decimal, table: &RateTable) -> Decimal {
    let tiers = &table.health().lump_sum_tiers;
    tiers
        .iter()
        .find(|tier| {
            tier.max_yearly_revenue
                .is_none_or(|bound| yearly_revenue <= bound)
        })
        .or(tiers.last())
        .map(|tier| tier.monthly_amount)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_income_pays_floor() {
        let table = RateTable::pl_2025();
        assert_eq!(
            income_health_contribution(dec!(-5000), dec!(0.049), &table),
            dec!(419.94)
        );
    }

    #[test]
    fn test_linear_rate_above_floor() {
        let table = RateTable::pl_2025();
        // 20000 * 0.049
        assert_eq!(
            income_health_contribution(dec!(20000), dec!(0.049), &table),
            dec!(980)
        );
    }

    #[test]
    fn test_lump_sum_tier_bounds_are_inclusive() {
        let table = RateTable::pl_2025();

        assert_eq!(lump_sum_health_contribution(dec!(60000), &table), dec!(461.66));
        assert_eq!(lump_sum_health_contribution(dec!(60000.01), &table), dec!(769.43));
        assert_eq!(lump_sum_health_contribution(dec!(300000), &table), dec!(769.43));
        assert_eq!(lump_sum_health_contribution(dec!(300000.01), &table), dec!(1384.97));
    }

    #[test]
    fn test_lump_sum_top_tier_is_open() {
        let table = RateTable::pl_2025();
        assert_eq!(lump_sum_health_contribution(dec!(5000000), &table), dec!(1384.97));
    }
}
