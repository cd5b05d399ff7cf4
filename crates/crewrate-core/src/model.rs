//! Rate calculation inputs.
//!
//! A [`RateConfig`] is a snapshot of everything the rate engine needs:
//! crew composition, office payroll, overhead, and the wastage/margin
//! targets. It is assembled fresh for every calculation and never mutated
//! by the engine.

use serde::{Deserialize, Serialize};

use crate::enums::{PayType, ServiceType};
use crate::slug::{crew_slug, slugify};

/// Paid hours per week assumed for hourly office staff.
pub const OFFICE_HOURS_PER_WEEK: f64 = 40.0;

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// One paid individual on a crew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Worker {
    /// Hourly wage in dollars.
    #[serde(default)]
    pub rate: f64,

    /// Share of job revenue paid as commission, in percent.
    #[serde(default)]
    pub commission: f64,
}

impl Worker {
    pub fn hourly(rate: f64) -> Self {
        Self {
            rate,
            commission: 0.0,
        }
    }

    pub fn on_commission(commission: f64) -> Self {
        Self {
            rate: 0.0,
            commission,
        }
    }
}

/// A billable unit: the rate is computed per crew, not per worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub name: String,

    #[serde(default)]
    pub workers: Vec<Worker>,
}

impl Crew {
    pub fn new(name: impl Into<String>, workers: Vec<Worker>) -> Self {
        Self {
            name: name.into(),
            workers,
        }
    }

    /// Stable identifier derived from the crew name, used in persistence keys.
    pub fn slug(&self) -> String {
        crew_slug(&self.name)
    }

    /// Combined hourly wage of every worker on the crew.
    pub fn hourly_rate(&self) -> f64 {
        self.workers.iter().map(|w| w.rate).sum()
    }

    /// Combined commission percentage of every worker on the crew.
    pub fn commission_percent(&self) -> f64 {
        self.workers.iter().map(|w| w.commission).sum()
    }
}

/// An administrative employee whose cost is spread across billable hours.
///
/// Only one of `hourly_rate` / `monthly_salary` is meaningful, selected by
/// `pay_type`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct OfficeStaffMember {
    #[serde(default)]
    pub pay_type: PayType,

    #[serde(default)]
    pub hourly_rate: f64,

    #[serde(default)]
    pub monthly_salary: f64,
}

impl OfficeStaffMember {
    pub fn hourly(hourly_rate: f64) -> Self {
        Self {
            pay_type: PayType::Hourly,
            hourly_rate,
            monthly_salary: 0.0,
        }
    }

    pub fn salaried(monthly_salary: f64) -> Self {
        Self {
            pay_type: PayType::Salary,
            hourly_rate: 0.0,
            monthly_salary,
        }
    }

    /// Monthly payroll cost for this staff member.
    pub fn monthly_cost(&self) -> f64 {
        match self.pay_type {
            PayType::Salary => self.monthly_salary,
            PayType::Hourly => self.hourly_rate * OFFICE_HOURS_PER_WEEK * WEEKS_PER_MONTH,
        }
    }
}

/// A recurring monthly business expense (rent, insurance, vehicles, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadLineItem {
    pub name: String,

    #[serde(default)]
    pub monthly_cost: f64,
}

impl OverheadLineItem {
    pub fn new(name: impl Into<String>, monthly_cost: f64) -> Self {
        Self {
            name: name.into(),
            monthly_cost,
        }
    }
}

/// Input snapshot for one rate calculation.
///
/// Fields missing from a serialized config take their value from
/// `RateConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Display name of the rate (persisted as `rateName`).
    pub name: String,

    pub service_type: ServiceType,

    pub crews: Vec<Crew>,

    /// Number of crews the business runs; the computed rate applies to each.
    pub total_crews: u32,

    pub overhead_costs: Vec<OverheadLineItem>,

    pub office_staff: Vec<OfficeStaffMember>,

    pub monthly_billable_hours_per_crew: f64,

    /// Non-billable share of paid time, in percent. Must be below 100.
    pub wastage_percent: f64,

    /// Target profit share of the rate, in percent. Must be below 100.
    pub desired_margin: f64,

    pub commission_enabled: bool,

    /// Paid hours in a crew's working day.
    pub daily_work_hours: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            name: "Standard Rate".to_string(),
            service_type: ServiceType::default(),
            crews: vec![Crew::new("Crew 1", vec![Worker::hourly(25.0)])],
            total_crews: 1,
            overhead_costs: Vec::new(),
            office_staff: Vec::new(),
            monthly_billable_hours_per_crew: 120.0,
            wastage_percent: 25.0,
            desired_margin: 30.0,
            commission_enabled: false,
            daily_work_hours: 8.0,
        }
    }
}

impl RateConfig {
    /// A fresh default configuration for the given service type.
    pub fn for_service(service_type: ServiceType) -> Self {
        Self {
            service_type,
            ..Self::default()
        }
    }

    /// Billable hours in a working day, after wastage.
    pub fn daily_billable_hours(&self) -> f64 {
        self.daily_work_hours * (1.0 - self.wastage_percent / 100.0)
    }

    /// Sum of every overhead line item's monthly cost.
    pub fn monthly_overhead_cost(&self) -> f64 {
        self.overhead_costs.iter().map(|o| o.monthly_cost).sum()
    }

    /// Sum of every office staff member's monthly cost.
    pub fn monthly_office_staff_cost(&self) -> f64 {
        self.office_staff.iter().map(|s| s.monthly_cost()).sum()
    }

    /// Billable hours across all crews in a month.
    pub fn total_monthly_billable_hours(&self) -> f64 {
        self.monthly_billable_hours_per_crew * f64::from(self.total_crews)
    }

    /// Looks up a crew by display name or slug.
    pub fn find_crew(&self, name_or_slug: &str) -> Option<&Crew> {
        let wanted = slugify(name_or_slug);
        self.crews
            .iter()
            .find(|c| c.name == name_or_slug || c.slug() == wanted)
    }
}

/// Wastage percent implied by a working day of `work_hours` paid hours of
/// which `billable_hours` are billed.
///
/// Returns `None` when `work_hours` is not positive or `billable_hours` falls
/// outside `(0, work_hours]`.
pub fn wastage_from_daily_hours(work_hours: f64, billable_hours: f64) -> Option<f64> {
    if !(work_hours > 0.0) || !(billable_hours > 0.0) || billable_hours > work_hours {
        return None;
    }
    Some((work_hours - billable_hours) / work_hours * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn crew_sums_workers() {
        let crew = Crew::new(
            "North",
            vec![
                Worker { rate: 20.0, commission: 5.0 },
                Worker { rate: 22.0, commission: 7.5 },
            ],
        );
        assert_eq!(crew.hourly_rate(), 42.0);
        assert_eq!(crew.commission_percent(), 12.5);
    }

    #[test]
    fn empty_crew_sums_to_zero() {
        let crew = Crew::new("Empty", Vec::new());
        assert_eq!(crew.hourly_rate(), 0.0);
        assert_eq!(crew.commission_percent(), 0.0);
    }

    #[test]
    fn crew_slug_falls_back() {
        assert_eq!(Crew::new("Crew #1 (North)", vec![]).slug(), "crew-1-north");
        assert_eq!(Crew::new("!!", vec![]).slug(), "crew");
    }

    #[test]
    fn office_staff_monthly_cost() {
        assert_eq!(OfficeStaffMember::salaried(4000.0).monthly_cost(), 4000.0);
        let hourly = OfficeStaffMember::hourly(20.0).monthly_cost();
        assert!((hourly - 3464.0).abs() < 1e-9);
    }

    #[test]
    fn office_staff_ignores_inactive_field() {
        let member = OfficeStaffMember {
            pay_type: PayType::Salary,
            hourly_rate: 99.0,
            monthly_salary: 3000.0,
        };
        assert_eq!(member.monthly_cost(), 3000.0);
    }

    #[test]
    fn config_totals() {
        let config = RateConfig {
            total_crews: 3,
            monthly_billable_hours_per_crew: 100.0,
            overhead_costs: vec![
                OverheadLineItem::new("Rent", 1500.0),
                OverheadLineItem::new("Insurance", 500.0),
            ],
            office_staff: vec![OfficeStaffMember::salaried(3000.0)],
            ..RateConfig::default()
        };
        assert_eq!(config.total_monthly_billable_hours(), 300.0);
        assert_eq!(config.monthly_overhead_cost(), 2000.0);
        assert_eq!(config.monthly_office_staff_cost(), 3000.0);
    }

    #[test]
    fn daily_billable_hours_follows_wastage() {
        let config = RateConfig {
            daily_work_hours: 8.0,
            wastage_percent: 37.5,
            ..RateConfig::default()
        };
        assert_eq!(config.daily_billable_hours(), 5.0);
    }

    #[test]
    fn wastage_from_hours() {
        assert_eq!(wastage_from_daily_hours(8.0, 5.0), Some(37.5));
        assert_eq!(wastage_from_daily_hours(8.0, 8.0), Some(0.0));
        assert_eq!(wastage_from_daily_hours(8.0, 9.0), None);
        assert_eq!(wastage_from_daily_hours(0.0, 0.0), None);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: RateConfig =
            serde_json::from_str(r#"{"crews": [{"name": "A", "workers": [{"rate": 30}]}]}"#)
                .unwrap();
        assert_eq!(config.name, "Standard Rate");
        assert_eq!(config.total_crews, 1);
        assert_eq!(config.daily_work_hours, 8.0);
        assert_eq!(config.monthly_billable_hours_per_crew, 120.0);
        assert_eq!(config.wastage_percent, 25.0);
        assert_eq!(config.desired_margin, 30.0);
        assert_eq!(config.crews[0].workers[0].commission, 0.0);
        assert!(!config.commission_enabled);
    }

    #[test]
    fn omitted_crews_use_default_crew() {
        let config: RateConfig = serde_json::from_str(r#"{"desired_margin": 40}"#).unwrap();
        assert_eq!(config.desired_margin, 40.0);
        assert_eq!(config.crews, RateConfig::default().crews);
    }

    #[test]
    fn find_crew_by_name_or_slug() {
        let config = RateConfig {
            crews: vec![Crew::new("North Crew", vec![]), Crew::new("South", vec![])],
            ..RateConfig::default()
        };
        assert_eq!(config.find_crew("North Crew").unwrap().name, "North Crew");
        assert_eq!(config.find_crew("north-crew").unwrap().name, "North Crew");
        assert!(config.find_crew("east").is_none());
    }
}
