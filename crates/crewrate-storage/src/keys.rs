//! Key scheme for persisted rate state.
//!
//! - `rate-state:<service>` holds the last rate computed for a service.
//! - `rate-state:<service>:crew:<crew-slug>` holds the same record per crew.
//! - `rate-config:<service>` holds the last calculator inputs for a service.

use crewrate_core::ServiceType;
use crewrate_core::slug::crew_slug;

/// Prefix shared by every rate record.
pub const RATE_PREFIX: &str = "rate-state:";

/// Prefix shared by every saved calculator profile.
pub const PROFILE_PREFIX: &str = "rate-config:";

const CREW_SEPARATOR: &str = ":crew:";

/// Key of the rate record for `service`, or for one crew of it.
///
/// The crew may be given as a display name or a slug.
pub fn rate_key(service: &ServiceType, crew: Option<&str>) -> String {
    match crew {
        Some(crew) => format!("{RATE_PREFIX}{service}{CREW_SEPARATOR}{}", crew_slug(crew)),
        None => format!("{RATE_PREFIX}{service}"),
    }
}

/// Key of the saved calculator inputs for `service`.
pub fn profile_key(service: &ServiceType) -> String {
    format!("{PROFILE_PREFIX}{service}")
}

/// Splits a rate key into its service and optional crew slug.
pub fn parse_rate_key(key: &str) -> Option<(ServiceType, Option<String>)> {
    let rest = key.strip_prefix(RATE_PREFIX)?;
    match rest.split_once(CREW_SEPARATOR) {
        Some((service, crew)) => Some((ServiceType::from(service), Some(crew.to_string()))),
        None => Some((ServiceType::from(rest), None)),
    }
}
