//! Input validation rules for rate configurations.
//!
//! Validation only rejects values that are meaningless on their own
//! (negative wages, commissions above 100 %, non-finite numbers). Range
//! checks that depend on the pay model, such as margin plus commission,
//! belong to the rate engine.

use crate::model::RateConfig;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: String },

    #[error("crew {crew}: worker {worker} has a negative hourly rate ({rate})")]
    NegativeWorkerRate { crew: String, worker: usize, rate: f64 },

    #[error("crew {crew}: worker {worker} commission must be between 0 and 100 (got {commission})")]
    InvalidCommission {
        crew: String,
        worker: usize,
        commission: f64,
    },

    #[error("crew names must not be empty")]
    EmptyCrewName,

    #[error("overhead item {name} has a negative monthly cost ({cost})")]
    NegativeOverhead { name: String, cost: f64 },

    #[error("office staff member {index} has a negative pay amount")]
    NegativeStaffPay { index: usize },

    #[error("monthly billable hours per crew cannot be negative (got {0})")]
    NegativeBillableHours(f64),

    #[error("daily work hours must be between 0 and 24 (got {0})")]
    InvalidDailyHours(f64),
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            field: field.to_owned(),
        })
    }
}

/// Validates a rate configuration.
///
/// Empty crew, overhead, and office staff lists are accepted; they
/// contribute nothing to the rate.
pub fn validate_config(config: &RateConfig) -> Result<(), ValidationError> {
    finite("wastage_percent", config.wastage_percent)?;
    finite("desired_margin", config.desired_margin)?;
    finite(
        "monthly_billable_hours_per_crew",
        config.monthly_billable_hours_per_crew,
    )?;
    finite("daily_work_hours", config.daily_work_hours)?;

    for crew in &config.crews {
        if crew.name.trim().is_empty() {
            return Err(ValidationError::EmptyCrewName);
        }
        for (i, worker) in crew.workers.iter().enumerate() {
            finite("worker.rate", worker.rate)?;
            finite("worker.commission", worker.commission)?;
            if worker.rate < 0.0 {
                return Err(ValidationError::NegativeWorkerRate {
                    crew: crew.name.clone(),
                    worker: i + 1,
                    rate: worker.rate,
                });
            }
            if !(0.0..=100.0).contains(&worker.commission) {
                return Err(ValidationError::InvalidCommission {
                    crew: crew.name.clone(),
                    worker: i + 1,
                    commission: worker.commission,
                });
            }
        }
    }

    for item in &config.overhead_costs {
        finite("overhead.monthly_cost", item.monthly_cost)?;
        if item.monthly_cost < 0.0 {
            return Err(ValidationError::NegativeOverhead {
                name: item.name.clone(),
                cost: item.monthly_cost,
            });
        }
    }

    for (i, member) in config.office_staff.iter().enumerate() {
        finite("office_staff.hourly_rate", member.hourly_rate)?;
        finite("office_staff.monthly_salary", member.monthly_salary)?;
        if member.hourly_rate < 0.0 || member.monthly_salary < 0.0 {
            return Err(ValidationError::NegativeStaffPay { index: i + 1 });
        }
    }

    if config.monthly_billable_hours_per_crew < 0.0 {
        return Err(ValidationError::NegativeBillableHours(
            config.monthly_billable_hours_per_crew,
        ));
    }

    if !(0.0..=24.0).contains(&config.daily_work_hours) {
        return Err(ValidationError::InvalidDailyHours(config.daily_work_hours));
    }

    Ok(())
}
