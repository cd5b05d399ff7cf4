//! Rate engine output and error types.

use crewrate_core::ValidationError;
use serde::Serialize;

/// Which branch of the formula set produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayModel {
    /// Workers are paid their hourly wage for every paid hour.
    Hourly,
    /// Workers are paid a share of realized revenue.
    Commission,
}

impl PayModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Commission => "commission",
        }
    }
}

/// Recommended rate and cost breakdown, all in dollars per billable hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateResult {
    pub pay_model: PayModel,

    /// Paid hours per billable hour, `1 / (1 - wastage)`.
    pub wastage_multiplier: f64,

    /// Crew wages for exactly one billable hour.
    pub base_labor_cost: f64,

    /// Wages paid for non-billable time, per billable hour.
    pub wastage_cost: f64,

    pub total_labor_cost: f64,

    /// Average crew commission in percent. Zero in the hourly model.
    pub commission_percent: f64,

    /// Commission paid out of each billed hour. Zero in the hourly model.
    pub estimated_commission_per_hour: f64,

    pub office_staff_cost_per_hour: f64,
    pub overhead_cost_per_hour: f64,
    pub total_cost_per_hour: f64,
    pub profit_per_hour: f64,
    pub recommended_rate: f64,
}

/// Reasons a rate cannot be computed.
///
/// Every variant is recoverable: callers show "rate cannot be computed" and
/// must not persist anything.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("wastage must be at least 0% and below 100% (got {0}%)")]
    WastageOutOfRange(f64),

    #[error("desired margin must be at least 0% and below 100% (got {0}%)")]
    MarginOutOfRange(f64),

    #[error(
        "commission ({commission}%) plus margin ({margin}%) must stay below 100% of revenue"
    )]
    CommissionExceedsRevenue { commission: f64, margin: f64 },

    #[error("the computed rate is not a finite number")]
    NonFinite,
}
