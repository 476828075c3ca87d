//! Core data models for the tax engine.
//!
//! Every model is an immutable value built fresh for each calculation.

mod comparison;
mod input;
mod jdg_result;
mod spzoo_result;

pub(crate) use input::check_amount;

pub use comparison::{
    BusinessForm, BusinessFormComparison, EmploymentComparison, SweepPoint, ThresholdSearch,
};
pub use input::{
    CalculationInput, CitRate, ContributionBase, MAX_AMOUNT, PayoutStrategy, SpzooCalculationInput,
    TaxRelief,
};
pub use jdg_result::{ComparisonResult, MonthlyBreakdown, TaxForm, YearlyResult, YearlyTotals};
pub use spzoo_result::{
    SpzooComparisonResult, SpzooMonthlyBreakdown, SpzooYearlyResult, SpzooYearlyTotals,
};
