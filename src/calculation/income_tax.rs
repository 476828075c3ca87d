//! Personal income tax schedules.
//!
//! All functions take and return yearly amounts at full precision.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// Calculates tax under the two-bracket progressive scale.
///
/// The tax-free amount is removed first; the remainder is taxed at the
/// lower rate up to the threshold and at the upper rate above it.
///
/// # Arguments
///
/// * `yearly_income` - Yearly income after social contributions
/// * `table` - The rate table
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::progressive_tax;
/// use pl_tax_engine::config::RateTable;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// assert_eq!(progressive_tax(dec!(30000), &table), dec!(0));
/// // (100000 - 30000) * 12%
/// assert_eq!(progressive_tax(dec!(100000), &table), dec!(8400));
/// // 90000 * 12% + 30000 * 32%
/// assert_eq!(progressive_tax(dec!(150000), &table), dec!(20400));
/// ```
pub fn progressive_tax(yearly_income: Decimal, table: &RateTable) -> Decimal {
    let rates = table.income_tax();
    let taxable = (yearly_income - rates.tax_free_amount).max(Decimal::ZERO);
    let lower_band = rates.threshold - rates.tax_free_amount;

    if taxable <= lower_band {
        taxable * rates.lower_rate
    } else {
        lower_band * rates.lower_rate + (taxable - lower_band) * rates.upper_rate
    }
}

/// Calculates tax at a single rate, zero for non-positive income.
///
/// Serves both the flat-rate regime and the reduced IP rate.
pub fn flat_tax(yearly_income: Decimal, rate: Decimal) -> Decimal {
    yearly_income.max(Decimal::ZERO) * rate
}

/// Calculates lump-sum tax on revenue.
pub fn lump_sum_tax(yearly_revenue: Decimal, rate: Decimal) -> Decimal {
    yearly_revenue.max(Decimal::ZERO) * rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_progressive_tax_at_threshold() {
        let table = RateTable::pl_2025();
        // 90000 * 12%
        assert_eq!(progressive_tax(dec!(120000), &table), dec!(10800));
    }

    #[test]
    fn test_progressive_tax_negative_income() {
        let table = RateTable::pl_2025();
        assert_eq!(progressive_tax(dec!(-10000), &table), Decimal::ZERO);
    }

    #[test]
    fn test_flat_tax() {
        assert_eq!(flat_tax(dec!(100000), dec!(0.19)), dec!(19000));
        assert_eq!(flat_tax(dec!(-1), dec!(0.19)), Decimal::ZERO);
    }

    #[test]
    fn test_lump_sum_tax() {
        assert_eq!(lump_sum_tax(dec!(180000), dec!(0.12)), dec!(21600));
    }
}
