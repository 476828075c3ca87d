//! Employment-contract payroll calculation.
//!
//! This module provides the payroll figures of a gross monthly salary. The
//! same helpers serve the owner salary inside a company and the standalone
//! employment reference calculator.

use rust_decimal::Decimal;

use crate::config::RateTable;

use super::{MONTHS_PER_YEAR, progressive_tax, round_money};

/// Monthly payroll figures of one gross salary, at full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollBreakdown {
    /// Gross monthly salary.
    pub gross: Decimal,
    /// Employee-side social contributions.
    pub employee_contributions: Decimal,
    /// Employee health contribution.
    pub health: Decimal,
    /// Monthly income tax advance.
    pub income_tax: Decimal,
    /// Take-home pay, floored at zero.
    pub net: Decimal,
    /// Employer-side social contributions.
    pub employer_contributions: Decimal,
}

impl PayrollBreakdown {
    /// Gross salary plus employer contributions.
    pub fn total_employment_cost(&self) -> Decimal {
        self.gross + self.employer_contributions
    }

    /// Employee and employer contributions, health and income tax.
    pub fn total_burden(&self) -> Decimal {
        self.employee_contributions + self.employer_contributions + self.health + self.income_tax
    }
}

/// Calculates the payroll of a gross monthly salary.
///
/// Income tax is computed by annualising the monthly taxable base (gross
/// less employee contributions and the flat cost deduction) through the
/// progressive scale and dividing by twelve. A non-positive gross yields an
/// all-zero breakdown.
pub fn calculate_payroll(gross: Decimal, table: &RateTable) -> PayrollBreakdown {
    if gross <= Decimal::ZERO {
        return PayrollBreakdown::default();
    }

    let payroll = table.payroll();
    let employee_contributions = gross * payroll.employee.total();
    let after_contributions = gross - employee_contributions;
    let health = after_contributions * payroll.health_rate;

    let monthly_taxable = (after_contributions - payroll.monthly_cost_deduction).max(Decimal::ZERO);
    let income_tax = progressive_tax(monthly_taxable * MONTHS_PER_YEAR, table) / MONTHS_PER_YEAR;

    let net = (gross - employee_contributions - health - income_tax).max(Decimal::ZERO);

    PayrollBreakdown {
        gross,
        employee_contributions,
        health,
        income_tax,
        net,
        employer_contributions: gross * payroll.employer.total(),
    }
}

/// Calculates the net monthly salary of an employment contract.
///
/// # Example
///
/// ```
/// use pl_tax_engine::calculation::calculate_employment_net;
/// use pl_tax_engine::config::RateTable;
/// use rust_decimal_macros::dec;
///
/// let table = RateTable::pl_2025();
/// assert_eq!(calculate_employment_net(dec!(0), &table), dec!(0));
/// assert!(calculate_employment_net(dec!(10000), &table) < dec!(10000));
/// ```
pub fn calculate_employment_net(gross: Decimal, table: &RateTable) -> Decimal {
    round_money(calculate_payroll(gross, table).net)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_minimum_wage_payroll() {
        let table = RateTable::pl_2025();
        let payroll = calculate_payroll(dec("4666"), &table);

        // 4666 * 0.1371
        assert_eq!(round_money(payroll.employee_contributions), dec("639.71"));
        // (4666 - 639.7086) * 0.09
        assert_eq!(round_money(payroll.health), dec("362.37"));
        // ((4026.2914 - 250) * 12 - 30000) * 0.12 / 12
        assert_eq!(round_money(payroll.income_tax), dec("153.15"));
        assert_eq!(round_money(payroll.net), dec("3510.77"));
        // 4666 * 0.2048
        assert_eq!(round_money(payroll.employer_contributions), dec("955.60"));
        assert_eq!(round_money(payroll.total_employment_cost()), dec("5621.60"));
    }

    #[test]
    fn test_low_salary_pays_no_income_tax() {
        let table = RateTable::pl_2025();
        let payroll = calculate_payroll(dec("2000"), &table);

        assert_eq!(payroll.income_tax, Decimal::ZERO);
        assert!(payroll.net > Decimal::ZERO);
    }

    #[test]
    fn test_zero_gross_is_zero_net() {
        let table = RateTable::pl_2025();

        assert_eq!(calculate_employment_net(Decimal::ZERO, &table), Decimal::ZERO);
        assert_eq!(calculate_payroll(dec("-100"), &table), PayrollBreakdown::default());
    }

    #[test]
    fn test_net_grows_with_gross() {
        let table = RateTable::pl_2025();

        let lower = calculate_employment_net(dec("8000"), &table);
        let higher = calculate_employment_net(dec("8100"), &table);
        assert!(higher > lower);
    }

    #[test]
    fn test_high_salary_reaches_upper_bracket() {
        let table = RateTable::pl_2025();
        let payroll = calculate_payroll(dec("20000"), &table);

        // after contributions 17258, taxable 17008 * 12 = 204096
        // (90000 * 0.12 + 84096 * 0.32) / 12
        assert_eq!(round_money(payroll.income_tax), dec("3142.56"));
    }
}
