//! Self-employed social contribution calculation.
//!
//! This module resolves the monthly contribution base from the
//! contribution-base selector and applies the contribution rates to it.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::ContributionBase;

use super::MONTHS_PER_YEAR;

/// Monthly social contributions, split per component, at full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocialContributions {
    /// The monthly contribution base. Zero for exempt selectors.
    pub base: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// Disability contribution.
    pub disability: Decimal,
    /// Sickness contribution, zero unless opted in.
    pub sickness: Decimal,
    /// Accident contribution.
    pub accident: Decimal,
    /// Labor fund, due only on the standard base.
    pub labor_fund: Decimal,
}

impl SocialContributions {
    /// Sum of all components.
    pub fn total(&self) -> Decimal {
        self.pension + self.disability + self.sickness + self.accident + self.labor_fund
    }
}

/// Resolves the monthly contribution base for a selector.
///
/// # Arguments
///
/// * `selector` - The contribution-base selector
/// * `yearly_income` - Yearly income the income-scaled base derives from
/// * `table` - The rate table
///
/// # Returns
///
/// Returns `None` for the exempt selectors.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::contribution_base;
/// use pl_tax_engine::config::RateTable;
/// use pl_tax_engine::models::ContributionBase;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// let base = contribution_base(ContributionBase::IncomeScaled, dec!(120000), &table);
/// // Half of the 10000 average monthly income
/// assert_eq!(base, Some(dec!(5000)));
/// ```
pub fn contribution_base(
    selector: ContributionBase,
    yearly_income: Decimal,
    table: &RateTable,
) -> Option<Decimal> {
    match selector {
        ContributionBase::Standard => Some(table.standard_contribution_base()),
        ContributionBase::ReducedNewEntrant => Some(table.reduced_contribution_base()),
        ContributionBase::IncomeScaled => {
            let scaled = yearly_income / MONTHS_PER_YEAR * table.social().income_scaled_share;
            Some(scaled.clamp(
                table.reduced_contribution_base(),
                table.standard_contribution_base(),
            ))
        }
        ContributionBase::StartupRelief | ContributionBase::NotApplicable => None,
    }
}

/// Calculates the monthly social contributions of a sole proprietor.
///
/// The base stack is pension, disability and accident. Sickness is added
/// when opted in, and the labor fund only on the standard base. Exempt
/// selectors owe nothing.
pub fn calculate_social_contributions(
    selector: ContributionBase,
    yearly_income: Decimal,
    pays_sickness: bool,
    table: &RateTable,
) -> SocialContributions {
    let Some(base) = contribution_base(selector, yearly_income, table) else {
        return SocialContributions::default();
    };
    let rates = table.social();

    SocialContributions {
        base,
        pension: base * rates.pension,
        disability: base * rates.disability,
        sickness: if pays_sickness {
            base * rates.sickness
        } else {
            Decimal::ZERO
        },
        accident: base * rates.accident,
        labor_fund: if selector == ContributionBase::Standard {
            base * rates.labor_fund
        } else {
            Decimal::ZERO
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_base_with_sickness() {
        let table = RateTable::pl_2025();
        let social = calculate_social_contributions(
            ContributionBase::Standard,
            Decimal::ZERO,
            true,
            &table,
        );

        assert_eq!(social.base, dec!(5203.80));
        // 5203.80 * 0.3409
        assert_eq!(round_money(social.total()), dec!(1773.98));
    }

    #[test]
    fn test_standard_base_without_sickness() {
        let table = RateTable::pl_2025();
        let social = calculate_social_contributions(
            ContributionBase::Standard,
            Decimal::ZERO,
            false,
            &table,
        );

        assert_eq!(social.sickness, Decimal::ZERO);
        // 5203.80 * 0.3164
        assert_eq!(round_money(social.total()), dec!(1646.48));
    }

    #[test]
    fn test_reduced_base_has_no_labor_fund() {
        let table = RateTable::pl_2025();
        let social = calculate_social_contributions(
            ContributionBase::ReducedNewEntrant,
            Decimal::ZERO,
            true,
            &table,
        );

        assert_eq!(social.base, dec!(1399.80));
        assert_eq!(social.labor_fund, Decimal::ZERO);
        // 1399.80 * 0.3164
        assert_eq!(round_money(social.total()), dec!(442.90));
    }

    #[test]
    fn test_income_scaled_base_clamps_to_bounds() {
        let table = RateTable::pl_2025();

        let low = contribution_base(ContributionBase::IncomeScaled, dec!(12000), &table);
        assert_eq!(low, Some(dec!(1399.80)));

        let negative = contribution_base(ContributionBase::IncomeScaled, dec!(-50000), &table);
        assert_eq!(negative, Some(dec!(1399.80)));

        let high = contribution_base(ContributionBase::IncomeScaled, dec!(600000), &table);
        assert_eq!(high, Some(dec!(5203.80)));
    }

    #[test]
    fn test_exempt_selectors_owe_nothing() {
        let table = RateTable::pl_2025();

        for selector in [ContributionBase::StartupRelief, ContributionBase::NotApplicable] {
            let social = calculate_social_contributions(selector, dec!(240000), true, &table);
            assert_eq!(social.total(), Decimal::ZERO);
            assert_eq!(social.base, Decimal::ZERO);
        }
    }
}
