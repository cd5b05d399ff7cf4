//! The persisted rate record.
//!
//! After every successful calculation the recommended rate is stored as a
//! [`RateSnapshot`] under a per-service key and one key per crew, so that the
//! estimate builder can pick up "the last computed rate for service X".
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ServiceType;
use crate::model::{Crew, RateConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    pub rate_name: String,
    pub recommended_rate: f64,
    pub service_type: ServiceType,
    pub wastage_percent: f64,
    pub desired_margin: f64,
    pub commission_enabled: bool,
    pub daily_work_hours: f64,
    pub daily_billable_hours: f64,
    pub last_updated: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_name: Option<String>,
}

impl RateSnapshot {
    /// Builds the service-level record for a computed rate.
    pub fn new(config: &RateConfig, recommended_rate: f64, now: DateTime<Utc>) -> Self {
        Self {
            rate_name: config.name.clone(),
            recommended_rate,
            service_type: config.service_type.clone(),
            wastage_percent: config.wastage_percent,
            desired_margin: config.desired_margin,
            commission_enabled: config.commission_enabled,
            daily_work_hours: config.daily_work_hours,
            daily_billable_hours: config.daily_billable_hours(),
            last_updated: now,
            crew_id: None,
            crew_name: None,
        }
    }

    /// Returns a copy tagged with the given crew's identity.
    pub fn for_crew(&self, crew: &Crew) -> Self {
        Self {
            crew_id: Some(crew.slug()),
            crew_name: Some(crew.name.clone()),
            ..self.clone()
        }
    }

    /// Returns `true` if this record belongs to a specific crew.
    pub fn is_crew_record(&self) -> bool {
        self.crew_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Worker;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let config = RateConfig {
            wastage_percent: 37.5,
            ..RateConfig::default()
        };
        let snap = RateSnapshot::new(&config, 96.0, fixed_now());
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["rateName"], "Standard Rate");
        assert_eq!(json["recommendedRate"], 96.0);
        assert_eq!(json["serviceType"], "plumbing");
        assert_eq!(json["dailyWorkHours"], 8.0);
        assert_eq!(json["dailyBillableHours"], 5.0);
        assert_eq!(json["lastUpdated"], "2024-03-01T12:00:00Z");
        assert!(json.get("crewId").is_none());
        assert!(json.get("crewName").is_none());
    }

    #[test]
    fn crew_snapshot_carries_identity() {
        let config = RateConfig::default();
        let crew = Crew::new("North Crew", vec![Worker::hourly(30.0)]);
        let snap = RateSnapshot::new(&config, 50.0, fixed_now()).for_crew(&crew);

        assert!(snap.is_crew_record());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["crewId"], "north-crew");
        assert_eq!(json["crewName"], "North Crew");

        let back: RateSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
    }
}
