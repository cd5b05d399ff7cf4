//! Best-effort recording and lookup of computed rates.
//!
//! These helpers sit between the pure engine and a [`RateRepository`]. They
//! never return storage errors: failures are logged and reported so that a
//! broken or full store cannot interrupt a calculation.

use chrono::{DateTime, Utc};
use crewrate_core::{RateConfig, RateSnapshot, ServiceType};
use crewrate_engine::RateResult;
use serde::Serialize;
use tracing::{debug, warn};

use crate::keys;
use crate::traits::RateRepository;

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// A record that could not be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub key: String,
    pub reason: String,
}

/// Outcome of [`record_rate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordReport {
    /// Keys written successfully.
    pub written: Vec<String>,
    pub failed: Vec<RecordFailure>,
}

impl RecordReport {
    /// Returns `true` if every record was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Persists the recommended rate of `result` for the configured service and
/// for each of its crews.
///
/// A non-finite rate is never written. Each write is attempted
/// independently, so one failing key does not prevent the others.
pub fn record_rate<R: RateRepository + ?Sized>(
    repo: &R,
    config: &RateConfig,
    result: &RateResult,
    now: DateTime<Utc>,
) -> RecordReport {
    let mut report = RecordReport::default();
    let service = &config.service_type;

    if !result.recommended_rate.is_finite() {
        let key = keys::rate_key(service, None);
        warn!(%key, rate = result.recommended_rate, "refusing to persist non-finite rate");
        report.failed.push(RecordFailure {
            key,
            reason: "rate is not a finite number".to_string(),
        });
        return report;
    }

    let snapshot = RateSnapshot::new(config, result.recommended_rate, now);
    write(repo, &mut report, service, None, &snapshot);

    for crew in &config.crews {
        let slug = crew.slug();
        write(repo, &mut report, service, Some(slug.as_str()), &snapshot.for_crew(crew));
    }

    report
}

fn write<R: RateRepository + ?Sized>(
    repo: &R,
    report: &mut RecordReport,
    service: &ServiceType,
    crew: Option<&str>,
    snapshot: &RateSnapshot,
) {
    let key = keys::rate_key(service, crew);
    match repo.save(service, crew, snapshot) {
        Ok(()) => {
            debug!(%key, rate = snapshot.recommended_rate, "rate recorded");
            report.written.push(key);
        }
        Err(e) => {
            warn!(%key, error = %e, "failed to persist rate");
            report.failed.push(RecordFailure {
                key,
                reason: e.to_string(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Crew,
    Service,
    Fallback,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crew => "crew",
            Self::Service => "service",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRate {
    pub rate: f64,
    pub source: RateSource,
    /// The record the rate was read from; `None` for the fallback.
    pub snapshot: Option<RateSnapshot>,
}

/// Finds the hourly rate to bill for `service`.
///
/// Tries the crew record (when a crew is given), then the service record,
/// then `fallback`. Unreadable or non-finite records are skipped.
pub fn resolve_rate<R: RateRepository + ?Sized>(
    repo: &R,
    service: &ServiceType,
    crew: Option<&str>,
    fallback: f64,
) -> ResolvedRate {
    let candidates = crew
        .map(|c| (Some(c), RateSource::Crew))
        .into_iter()
        .chain(std::iter::once((None, RateSource::Service)));

    for (crew, source) in candidates {
        match repo.load(service, crew) {
            Ok(Some(snapshot)) if snapshot.recommended_rate.is_finite() => {
                return ResolvedRate {
                    rate: snapshot.recommended_rate,
                    source,
                    snapshot: Some(snapshot),
                };
            }
            Ok(Some(_)) => {
                warn!(key = %keys::rate_key(service, crew), "ignoring non-finite stored rate");
            }
            Ok(None) => {}
            Err(e) => {
                warn!(key = %keys::rate_key(service, crew), error = %e, "failed to read stored rate");
            }
        }
    }

    ResolvedRate {
        rate: fallback,
        source: RateSource::Fallback,
        snapshot: None,
    }
}

/// Loads the saved calculator inputs for `service`.
///
/// Missing, unreadable, or corrupt state yields a fresh default
/// configuration for the service.
pub fn load_profile_or_default<R: RateRepository + ?Sized>(
    repo: &R,
    service: &ServiceType,
) -> RateConfig {
    match repo.load_profile(service) {
        Ok(Some(mut config)) => {
            config.service_type = service.clone();
            config
        }
        Ok(None) => RateConfig::for_service(service.clone()),
        Err(e) => {
            warn!(service = %service, error = %e, "saved inputs unreadable, using defaults");
            RateConfig::for_service(service.clone())
        }
    }
}
