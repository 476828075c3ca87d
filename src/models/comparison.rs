//! Cross-form comparison results.
//!
//! These types carry the output of the comparator: the break-even search
//! between business forms, the JDG versus company verdict, the B2B versus
//! employment verdict, and revenue sweep points for charting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayoutStrategy, TaxForm};

/// Outcome of the break-even revenue search.
///
/// The search never fails; every outcome it can reach is one of these
/// variants.
///
/// # Example
///
/// ```
/// use pl_tax_engine::models::ThresholdSearch;
/// use rust_decimal_macros::dec;
///
/// let found = ThresholdSearch::Found { monthly_revenue: dec!(23500.00), iterations: 10 };
/// assert_eq!(found.revenue(), Some(dec!(23500.00)));
///
/// let missed = ThresholdSearch::NotReached { upper_bound: dec!(100000) };
/// assert_eq!(missed.revenue(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThresholdSearch {
    /// The target is first met around this monthly revenue.
    Found {
        /// Midpoint of the final search interval.
        monthly_revenue: Decimal,
        /// Number of bisection steps taken.
        iterations: u32,
    },
    /// The target is already met at the lower search bound.
    AlreadyMet {
        /// The lower search bound.
        lower_bound: Decimal,
    },
    /// The target is not met at the upper search bound.
    ///
    /// Only the bounds are sampled before this is decided, so a net that
    /// peaks above the target somewhere inside the bounds and falls back
    /// below it by the upper bound is also reported here.
    NotReached {
        /// The upper search bound.
        upper_bound: Decimal,
    },
    /// Sampled objective values were not monotonic in revenue, so no
    /// bisection result can be trusted.
    NonMonotonic {
        /// Revenue of the sample that broke monotonicity.
        near_revenue: Decimal,
    },
}

impl ThresholdSearch {
    /// Returns the monthly revenue from which the target is met, if the
    /// search located one.
    pub fn revenue(&self) -> Option<Decimal> {
        match self {
            ThresholdSearch::Found {
                monthly_revenue, ..
            } => Some(*monthly_revenue),
            ThresholdSearch::AlreadyMet { lower_bound } => Some(*lower_bound),
            ThresholdSearch::NotReached { .. } | ThresholdSearch::NonMonotonic { .. } => None,
        }
    }
}

/// A legal form of business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessForm {
    /// Sole proprietorship.
    Jdg,
    /// Limited-liability company.
    Spzoo,
}

/// Verdict between the best JDG regime and the best company strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessFormComparison {
    /// The best JDG regime.
    pub jdg_best: TaxForm,
    /// Its yearly net amount.
    pub jdg_yearly_net: Decimal,
    /// The best company payout strategy.
    pub spzoo_best: PayoutStrategy,
    /// Its yearly owner net.
    pub spzoo_yearly_net: Decimal,
    /// The form with the higher yearly net. JDG wins ties.
    pub winner: BusinessForm,
    /// Absolute yearly difference between the two nets.
    pub yearly_difference: Decimal,
    /// Winner's advantage as a percentage of the loser's net; zero when the
    /// loser's net is not positive.
    pub percent_difference: Decimal,
    /// Monthly revenue from which the company matches the JDG net.
    pub spzoo_threshold: ThresholdSearch,
    /// How much monthly revenue is missing to reach the threshold, when the
    /// current revenue is below it.
    pub threshold_gap: Option<Decimal>,
}

/// Verdict between self-employment (B2B) and an employment contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentComparison {
    /// Employment gross monthly salary.
    pub employment_gross: Decimal,
    /// Employment net monthly salary.
    pub employment_net: Decimal,
    /// The best JDG regime for the B2B input.
    pub b2b_best: TaxForm,
    /// Monthly net of the best JDG regime.
    pub b2b_monthly_net: Decimal,
    /// B2B net less employment net, per month.
    pub monthly_difference: Decimal,
    /// Monthly difference as a percentage of the employment net; zero when
    /// the employment net is not positive.
    pub percent_difference: Decimal,
    /// Whether B2B pays strictly more.
    pub b2b_wins: bool,
    /// Best JDG monthly net when invoicing exactly the employment gross with
    /// no costs.
    pub b2b_net_at_employment_gross: Option<Decimal>,
}

/// Monthly nets of every option at one revenue level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Monthly revenue of this point.
    pub monthly_revenue: Decimal,
    /// Progressive scale net.
    pub scale_net: Decimal,
    /// Flat-rate net.
    pub linear_net: Decimal,
    /// Lump-sum net.
    pub ryczalt_net: Decimal,
    /// Best company strategy, monthly owner net.
    pub spzoo_net: Decimal,
}
