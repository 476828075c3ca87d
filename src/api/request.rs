//! Request types for the tax engine API.
//!
//! This module defines the JSON request structures for every endpoint and
//! their conversion into engine inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationInput, CitRate, ContributionBase, PayoutStrategy, SpzooCalculationInput, TaxRelief,
    check_amount,
};

fn default_true() -> bool {
    true
}

fn default_cit_rate() -> CitRate {
    CitRate::Small
}

/// Request body for the `/jdg/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdgRequest {
    /// Fiscal year of the rate table; the latest table when omitted.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Monthly gross revenue.
    pub monthly_revenue: Decimal,
    /// Monthly deductible costs.
    pub monthly_costs: Decimal,
    /// How the social-contribution base is determined.
    pub contribution_base: ContributionBase,
    /// Explicit lump-sum rate.
    #[serde(default)]
    pub lump_sum_rate: Option<Decimal>,
    /// Lump-sum activity category, looked up in the rate table.
    #[serde(default)]
    pub lump_sum_category: Option<String>,
    /// Whether the voluntary sickness contribution is paid.
    #[serde(default = "default_true")]
    pub pays_sickness: bool,
    /// Claim the reduced IP rate.
    #[serde(default)]
    pub use_ip_box: bool,
    /// Claim the notional cost deduction.
    #[serde(default)]
    pub use_notional_costs: bool,
}

impl JdgRequest {
    /// Converts the request into a validated engine input.
    ///
    /// # Returns
    ///
    /// Returns an error if:
    /// - Both reliefs are claimed
    /// - Both a lump-sum rate and a category are given
    /// - The category is not in the table's catalog
    /// - Any amount is out of its domain
    pub fn into_input(self, table: &RateTable) -> EngineResult<CalculationInput> {
        let relief = match (self.use_ip_box, self.use_notional_costs) {
            (true, true) => {
                return Err(EngineError::InvalidInput {
                    field: "use_ip_box".to_string(),
                    message: "the IP relief and notional costs cannot be combined".to_string(),
                });
            }
            (true, false) => TaxRelief::IpBox,
            (false, true) => TaxRelief::NotionalCosts,
            (false, false) => TaxRelief::NoRelief,
        };

        let lump_sum_rate = match (self.lump_sum_rate, self.lump_sum_category) {
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidInput {
                    field: "lump_sum_category".to_string(),
                    message: "give either a lump-sum rate or a category, not both".to_string(),
                });
            }
            (Some(rate), None) => Some(rate),
            (None, Some(category)) => Some(table.lump_sum_rate(&category)?),
            (None, None) => None,
        };

        let input = CalculationInput {
            monthly_revenue: self.monthly_revenue,
            monthly_costs: self.monthly_costs,
            contribution_base: self.contribution_base,
            lump_sum_rate,
            pays_sickness: self.pays_sickness,
            relief,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Request body for the `/spzoo/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpzooRequest {
    /// Fiscal year of the rate table.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Monthly company revenue.
    pub monthly_revenue: Decimal,
    /// Monthly operating costs.
    pub monthly_operating_costs: Decimal,
    /// Corporate tax rate selector.
    #[serde(default = "default_cit_rate")]
    pub cit_rate: CitRate,
    /// Preferred payout strategy.
    #[serde(default)]
    pub payout_strategy: Option<PayoutStrategy>,
}

impl SpzooRequest {
    /// Converts the request into a validated engine input.
    pub fn into_input(self) -> EngineResult<SpzooCalculationInput> {
        let mut input =
            SpzooCalculationInput::new(self.monthly_revenue, self.monthly_operating_costs, self.cit_rate);
        if let Some(strategy) = self.payout_strategy {
            input.payout_strategy = strategy;
        }
        input.validate()?;
        Ok(input)
    }
}

/// Request body for the `/spzoo/threshold` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRequest {
    /// Fiscal year of the rate table.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Monthly net the company has to reach.
    pub target_monthly_net: Decimal,
    /// Monthly operating costs.
    pub monthly_costs: Decimal,
    /// Corporate tax rate selector.
    #[serde(default = "default_cit_rate")]
    pub cit_rate: CitRate,
}

impl ThresholdRequest {
    /// Checks that the amounts lie in `[0, MAX_AMOUNT]`.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("target_monthly_net", self.target_monthly_net)?;
        check_amount("monthly_costs", self.monthly_costs)
    }
}

/// Request body for the `/employment/net` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentRequest {
    /// Fiscal year of the rate table.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Gross monthly salary.
    pub gross_salary: Decimal,
}

impl EmploymentRequest {
    /// Checks that the gross salary lies in `[0, MAX_AMOUNT]`.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("gross_salary", self.gross_salary)
    }
}

/// Request body for the `/compare` endpoint.
///
/// Carries the JDG fields at the top level, plus the company and
/// employment parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// The sole-proprietorship side; its revenue and costs also drive the
    /// company side.
    #[serde(flatten)]
    pub jdg: JdgRequest,
    /// Corporate tax rate selector.
    #[serde(default = "default_cit_rate")]
    pub cit_rate: CitRate,
    /// Employment gross salary to compare against, if any.
    #[serde(default)]
    pub employment_gross: Option<Decimal>,
}

impl CompareRequest {
    /// Checks the employment gross, when given. The JDG fields are checked
    /// by [`JdgRequest::into_input`].
    pub fn validate_employment_gross(&self) -> EngineResult<()> {
        match self.employment_gross {
            Some(gross) => check_amount("employment_gross", gross),
            None => Ok(()),
        }
    }
}
