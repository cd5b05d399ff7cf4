//! The canonical rate formula set.
//!
//! Shared steps:
//! 1. wastage multiplier `1 / (1 - wastage%)` (paid hours per billable hour)
//! 2. average crew hourly rate: all worker rates summed across crews, divided
//!    by the number of crews
//! 3. office staff and overhead cost per hour: monthly totals divided by the
//!    billable hours of every crew in a month
//!
//! The hourly model then pays wages for every paid hour and applies the margin
//! as a multiplicative markup. The commission model carries no fixed labor
//! cost; the rate is whatever covers office staff and overhead after
//! commission and margin are taken out of revenue.

use crewrate_core::model::{Crew, RateConfig};
use crewrate_core::validation::validate_config;

use crate::types::{PayModel, RateError, RateResult};

/// Computes the recommended hourly rate for one crew.
///
/// The same rate applies to every crew of the configured service. The
/// function never returns a non-finite rate; configurations that would
/// produce one are reported as a [`RateError`].
pub fn compute_rate(config: &RateConfig) -> Result<RateResult, RateError> {
    validate_config(config)?;

    if !(0.0..100.0).contains(&config.wastage_percent) {
        return Err(RateError::WastageOutOfRange(config.wastage_percent));
    }
    if !(0.0..100.0).contains(&config.desired_margin) {
        return Err(RateError::MarginOutOfRange(config.desired_margin));
    }

    let costs = SharedCosts::from_config(config);

    let result = if config.commission_enabled {
        commission_model(config, &costs)?
    } else {
        hourly_model(config, &costs)
    };

    ensure_finite(result)
}

/// Intermediate values common to both pay models.
struct SharedCosts {
    wastage_multiplier: f64,
    office_staff_cost_per_hour: f64,
    overhead_cost_per_hour: f64,
}

impl SharedCosts {
    fn from_config(config: &RateConfig) -> Self {
        let billable_hours = config.total_monthly_billable_hours();
        Self {
            wastage_multiplier: 1.0 / (1.0 - config.wastage_percent / 100.0),
            office_staff_cost_per_hour: per_hour(
                config.monthly_office_staff_cost(),
                billable_hours,
            ),
            overhead_cost_per_hour: per_hour(config.monthly_overhead_cost(), billable_hours),
        }
    }

    fn fixed_cost_per_hour(&self) -> f64 {
        self.office_staff_cost_per_hour + self.overhead_cost_per_hour
    }
}

fn hourly_model(config: &RateConfig, costs: &SharedCosts) -> RateResult {
    let crew_rate = average_crew_hourly_rate(&config.crews);

    let base_labor_cost = crew_rate;
    let total_labor_cost = crew_rate * costs.wastage_multiplier;
    let wastage_cost = total_labor_cost - base_labor_cost;

    let total_cost_per_hour = total_labor_cost + costs.fixed_cost_per_hour();
    let margin_multiplier = 1.0 / (1.0 - config.desired_margin / 100.0);
    let recommended_rate = total_cost_per_hour * margin_multiplier;

    RateResult {
        pay_model: PayModel::Hourly,
        wastage_multiplier: costs.wastage_multiplier,
        base_labor_cost,
        wastage_cost,
        total_labor_cost,
        commission_percent: 0.0,
        estimated_commission_per_hour: 0.0,
        office_staff_cost_per_hour: costs.office_staff_cost_per_hour,
        overhead_cost_per_hour: costs.overhead_cost_per_hour,
        total_cost_per_hour,
        profit_per_hour: recommended_rate - total_cost_per_hour,
        recommended_rate,
    }
}

fn commission_model(config: &RateConfig, costs: &SharedCosts) -> Result<RateResult, RateError> {
    let commission = average_crew_commission(&config.crews);
    if commission + config.desired_margin >= 100.0 {
        return Err(RateError::CommissionExceedsRevenue {
            commission,
            margin: config.desired_margin,
        });
    }

    let denominator = 1.0 - commission / 100.0 - config.desired_margin / 100.0;
    let recommended_rate = costs.fixed_cost_per_hour() / denominator;
    let estimated_commission_per_hour = recommended_rate * commission / 100.0;
    let total_cost_per_hour = estimated_commission_per_hour + costs.fixed_cost_per_hour();

    Ok(RateResult {
        pay_model: PayModel::Commission,
        wastage_multiplier: costs.wastage_multiplier,
        base_labor_cost: 0.0,
        wastage_cost: 0.0,
        total_labor_cost: 0.0,
        commission_percent: commission,
        estimated_commission_per_hour,
        office_staff_cost_per_hour: costs.office_staff_cost_per_hour,
        overhead_cost_per_hour: costs.overhead_cost_per_hour,
        total_cost_per_hour,
        profit_per_hour: recommended_rate - total_cost_per_hour,
        recommended_rate,
    })
}

/// Sum of every worker's rate across all crews, divided by the crew count.
///
/// This is a blended figure: with crews of unequal size it matches no single
/// crew's actual wage bill.
fn average_crew_hourly_rate(crews: &[Crew]) -> f64 {
    average(crews.iter().map(Crew::hourly_rate), crews.len())
}

/// Mean commission percent across crews, zero when there are none.
pub fn average_crew_commission(crews: &[Crew]) -> f64 {
    average(crews.iter().map(Crew::commission_percent), crews.len())
}

fn average(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn per_hour(monthly_cost: f64, monthly_hours: f64) -> f64 {
    if monthly_hours > 0.0 {
        monthly_cost / monthly_hours
    } else {
        0.0
    }
}

fn ensure_finite(result: RateResult) -> Result<RateResult, RateError> {
    let fields = [
        result.wastage_multiplier,
        result.base_labor_cost,
        result.wastage_cost,
        result.total_labor_cost,
        result.estimated_commission_per_hour,
        result.office_staff_cost_per_hour,
        result.overhead_cost_per_hour,
        result.total_cost_per_hour,
        result.profit_per_hour,
        result.recommended_rate,
    ];
    if fields.iter().all(|v| v.is_finite()) {
        Ok(result)
    } else {
        Err(RateError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewrate_core::model::{OfficeStaffMember, OverheadLineItem, Worker};
    use crewrate_core::ValidationError;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    /// Two workers at $20 and $22, 37.5% wastage, 30% margin, no fixed costs.
    fn hourly_config() -> RateConfig {
        RateConfig {
            crews: vec![Crew::new(
                "Crew 1",
                vec![Worker::hourly(20.0), Worker::hourly(22.0)],
            )],
            total_crews: 1,
            overhead_costs: Vec::new(),
            office_staff: Vec::new(),
            monthly_billable_hours_per_crew: 100.0,
            wastage_percent: 37.5,
            desired_margin: 30.0,
            commission_enabled: false,
            ..RateConfig::default()
        }
    }

    /// Commissions summing to 20%, 30% margin, $14.38/hr of overhead.
    fn commission_config() -> RateConfig {
        RateConfig {
            crews: vec![Crew::new(
                "Crew 1",
                vec![Worker::on_commission(12.0), Worker::on_commission(8.0)],
            )],
            total_crews: 1,
            overhead_costs: vec![OverheadLineItem::new("Shop", 1438.0)],
            office_staff: Vec::new(),
            monthly_billable_hours_per_crew: 100.0,
            wastage_percent: 25.0,
            desired_margin: 30.0,
            commission_enabled: true,
            ..RateConfig::default()
        }
    }

    // -- Worked examples ------------------------------------------------------

    #[test]
    fn hourly_model_worked_example() {
        let result = compute_rate(&hourly_config()).unwrap();
        assert_eq!(result.pay_model, PayModel::Hourly);
        assert_close(result.wastage_multiplier, 1.6);
        assert_close(result.base_labor_cost, 42.0);
        assert_close(result.total_labor_cost, 67.2);
        assert_close(result.wastage_cost, 25.2);
        assert_close(result.recommended_rate, 96.0);
        assert_close(result.total_cost_per_hour, 67.2);
        assert_close(result.profit_per_hour, 28.8);
        assert_eq!(result.commission_percent, 0.0);
    }

    #[test]
    fn commission_model_worked_example() {
        let result = compute_rate(&commission_config()).unwrap();
        assert_eq!(result.pay_model, PayModel::Commission);
        assert_close(result.commission_percent, 20.0);
        assert_close(result.overhead_cost_per_hour, 14.38);
        assert_close(result.recommended_rate, 28.76);
        assert_close(result.estimated_commission_per_hour, 5.752);
        assert_close(result.total_cost_per_hour, 20.132);
        assert_close(result.profit_per_hour, 8.628);
        assert_eq!(result.total_labor_cost, 0.0);
        assert_eq!(result.base_labor_cost, 0.0);
        assert_eq!(result.wastage_cost, 0.0);
    }

    #[test]
    fn commission_plus_margin_over_revenue_is_rejected() {
        let mut config = commission_config();
        config.crews = vec![Crew::new(
            "Crew 1",
            vec![Worker::on_commission(40.0), Worker::on_commission(20.0)],
        )];
        config.desired_margin = 45.0;

        let err = compute_rate(&config).unwrap_err();
        assert_eq!(
            err,
            RateError::CommissionExceedsRevenue {
                commission: 60.0,
                margin: 45.0
            }
        );
    }

    #[test]
    fn commission_plus_margin_exactly_100_is_rejected() {
        let mut config = commission_config();
        config.crews = vec![Crew::new("Crew 1", vec![Worker::on_commission(70.0)])];
        config.desired_margin = 30.0;
        assert!(matches!(
            compute_rate(&config),
            Err(RateError::CommissionExceedsRevenue { .. })
        ));
    }

    #[test]
    fn empty_fixed_costs_depend_on_labor_and_margin_only() {
        let result = compute_rate(&hourly_config()).unwrap();
        assert_eq!(result.overhead_cost_per_hour, 0.0);
        assert_eq!(result.office_staff_cost_per_hour, 0.0);
        assert_close(result.recommended_rate, result.total_labor_cost / 0.7);
    }

    #[test]
    fn doubling_crews_halves_fixed_costs_per_hour() {
        let mut config = hourly_config();
        config.overhead_costs = vec![OverheadLineItem::new("Rent", 2000.0)];
        config.office_staff = vec![OfficeStaffMember::salaried(3000.0)];

        let one = compute_rate(&config).unwrap();
        config.total_crews = 2;
        let two = compute_rate(&config).unwrap();

        assert_close(one.overhead_cost_per_hour, 20.0);
        assert_close(two.overhead_cost_per_hour, 10.0);
        assert_close(one.office_staff_cost_per_hour, 30.0);
        assert_close(two.office_staff_cost_per_hour, 15.0);
        // 25 dollars of fixed cost per hour removed, marked up by 1/0.7.
        assert_close(one.recommended_rate - two.recommended_rate, 25.0 / 0.7);
    }

    // -- Error and edge cases -------------------------------------------------

    #[test]
    fn margin_of_100_is_rejected() {
        let mut config = hourly_config();
        config.desired_margin = 100.0;
        assert_eq!(
            compute_rate(&config).unwrap_err(),
            RateError::MarginOutOfRange(100.0)
        );
    }

    #[test]
    fn negative_margin_is_rejected() {
        let mut config = hourly_config();
        config.desired_margin = -1.0;
        assert_eq!(
            compute_rate(&config).unwrap_err(),
            RateError::MarginOutOfRange(-1.0)
        );
    }

    #[test]
    fn wastage_of_100_is_rejected() {
        let mut config = hourly_config();
        config.wastage_percent = 100.0;
        assert_eq!(
            compute_rate(&config).unwrap_err(),
            RateError::WastageOutOfRange(100.0)
        );
    }

    #[test]
    fn invalid_input_is_reported() {
        let mut config = hourly_config();
        config.crews[0].workers[0].rate = -5.0;
        assert!(matches!(
            compute_rate(&config).unwrap_err(),
            RateError::Invalid(ValidationError::NegativeWorkerRate { .. })
        ));
    }

    #[test]
    fn empty_crews_contribute_nothing() {
        let mut config = hourly_config();
        config.crews.clear();
        config.overhead_costs = vec![OverheadLineItem::new("Rent", 700.0)];

        let result = compute_rate(&config).unwrap();
        assert_eq!(result.total_labor_cost, 0.0);
        assert_close(result.recommended_rate, 10.0);
    }

    #[test]
    fn zero_billable_hours_allocates_no_fixed_cost() {
        let mut config = hourly_config();
        config.overhead_costs = vec![OverheadLineItem::new("Rent", 700.0)];
        config.monthly_billable_hours_per_crew = 0.0;
        let result = compute_rate(&config).unwrap();
        assert_eq!(result.overhead_cost_per_hour, 0.0);

        config.monthly_billable_hours_per_crew = 100.0;
        config.total_crews = 0;
        let result = compute_rate(&config).unwrap();
        assert_eq!(result.overhead_cost_per_hour, 0.0);
    }

    #[test]
    fn average_rate_is_blended_across_crews() {
        let mut config = hourly_config();
        config.wastage_percent = 0.0;
        config.desired_margin = 0.0;
        config.crews = vec![
            Crew::new("Big", vec![Worker::hourly(20.0), Worker::hourly(20.0), Worker::hourly(20.0)]),
            Crew::new("Solo", vec![Worker::hourly(30.0)]),
        ];
        // (60 + 30) / 2 crews
        let result = compute_rate(&config).unwrap();
        assert_close(result.base_labor_cost, 45.0);
        assert_close(result.recommended_rate, 45.0);
    }

    #[test]
    fn commission_with_zero_commissions_does_not_match_hourly_model() {
        let mut config = hourly_config();
        let hourly = compute_rate(&config).unwrap();

        config.commission_enabled = true;
        let commission = compute_rate(&config).unwrap();

        // Commission mode drops wages entirely, even when nobody earns commission.
        assert_eq!(commission.commission_percent, 0.0);
        assert_eq!(commission.total_labor_cost, 0.0);
        assert_eq!(commission.recommended_rate, 0.0);
        assert!(hourly.recommended_rate > commission.recommended_rate);
    }

    // -- Properties -----------------------------------------------------------

    #[test]
    fn compute_is_deterministic() {
        let config = commission_config();
        let a = compute_rate(&config).unwrap();
        let b = compute_rate(&config).unwrap();
        assert_eq!(a.recommended_rate.to_bits(), b.recommended_rate.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn hourly_rate_never_below_breakeven() {
        for margin in [0.0, 1.0, 15.0, 30.0, 50.0, 75.0, 99.0, 99.9] {
            let mut config = hourly_config();
            config.desired_margin = margin;
            config.overhead_costs = vec![OverheadLineItem::new("Rent", 1234.0)];
            let result = compute_rate(&config).unwrap();
            assert!(result.recommended_rate >= result.total_cost_per_hour);
            assert!(result.profit_per_hour >= 0.0);
        }
    }

    #[test]
    fn wastage_never_reduces_labor_cost() {
        for wastage in [0.0, 5.0, 25.0, 50.0, 90.0] {
            let mut config = hourly_config();
            config.wastage_percent = wastage;
            let result = compute_rate(&config).unwrap();
            assert!(result.total_labor_cost >= result.base_labor_cost);
            if wastage == 0.0 {
                assert_eq!(result.total_labor_cost, result.base_labor_cost);
                assert_eq!(result.wastage_cost, 0.0);
            } else {
                assert!(result.total_labor_cost > result.base_labor_cost);
            }
        }
    }

    #[test]
    fn rate_increases_with_margin() {
        for commission_enabled in [false, true] {
            let mut previous = None;
            for margin in [0.0, 10.0, 20.0, 30.0, 40.0, 60.0] {
                let mut config = if commission_enabled {
                    commission_config()
                } else {
                    hourly_config()
                };
                config.desired_margin = margin;
                let rate = compute_rate(&config).unwrap().recommended_rate;
                if let Some(prev) = previous {
                    assert!(rate > prev, "margin {margin}: {rate} <= {prev}");
                }
                previous = Some(rate);
            }
        }
    }

    #[test]
    fn rate_increases_with_overhead() {
        let mut previous = None;
        for overhead in [0.0, 500.0, 1000.0, 5000.0] {
            let mut config = hourly_config();
            config.overhead_costs = vec![OverheadLineItem::new("Rent", overhead)];
            let rate = compute_rate(&config).unwrap().recommended_rate;
            if let Some(prev) = previous {
                assert!(rate > prev);
            }
            previous = Some(rate);
        }
    }

    #[test]
    fn rate_decreases_with_more_crews() {
        let mut previous: Option<RateResult> = None;
        for crews in 1..=5 {
            let mut config = hourly_config();
            config.overhead_costs = vec![OverheadLineItem::new("Rent", 3000.0)];
            config.total_crews = crews;
            let result = compute_rate(&config).unwrap();
            if let Some(prev) = previous {
                assert!(result.overhead_cost_per_hour < prev.overhead_cost_per_hour);
                assert!(result.recommended_rate < prev.recommended_rate);
            }
            previous = Some(result);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let config = commission_config();
        let before = config.clone();
        let _ = compute_rate(&config);
        assert_eq!(config, before);
    }
}
