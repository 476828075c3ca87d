//! Calculation logic for the tax engine.
//!
//! This module contains the contribution and tax building blocks, the
//! sole-proprietorship regime engine, the company payout engine, the
//! employment payroll calculator, the break-even threshold search and the
//! cross-form comparator. Every function is pure and takes the rate table
//! explicitly.

mod comparator;
mod health_contributions;
mod income_tax;
mod jdg;
mod payroll;
mod rounding;
mod social_contributions;
mod spzoo;
mod threshold;

pub use comparator::{
    MAX_SWEEP_POINTS, compare_b2b_vs_employment, compare_business_forms, revenue_sweep,
};
pub use health_contributions::{income_health_contribution, lump_sum_health_contribution};
pub use income_tax::{flat_tax, lump_sum_tax, progressive_tax};
pub use jdg::{calculate_linear, calculate_ryczalt, calculate_scale, compare_all_forms};
pub use payroll::{PayrollBreakdown, calculate_employment_net, calculate_payroll};
pub use rounding::{MONTHS_PER_YEAR, round_money, round_rate};
pub use social_contributions::{
    SocialContributions, calculate_social_contributions, contribution_base,
};
pub use spzoo::{
    applied_cit_rate, calculate_dividend_only, calculate_full_salary,
    calculate_min_salary_plus_dividend, calculate_strategy, compare_spzoo_scenarios,
    owner_mandatory_contributions,
};
pub use threshold::{
    MAX_ITERATIONS, SEARCH_LOWER_BOUND, SEARCH_TOLERANCE, SEARCH_UPPER_BOUND,
    find_spzoo_threshold,
};

pub(crate) use rounding::ratio;
