//! Enum types for the crewrate system.
//!
//! [`ServiceType`] keeps the known trades as variants and accepts any other
//! service name through an `Other(String)` fallback, serialized as a plain
//! string. The remaining enums are closed sets.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::slug::slugify;

/// The line of business a rate is computed for.
///
/// Persisted rates are keyed by [`ServiceType::as_str`], so custom names are
/// normalized to a slug on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ServiceType {
    #[default]
    Plumbing,
    Septic,
    PropertyManagement,
    Other(String),
}

impl ServiceType {
    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plumbing => "plumbing",
            Self::Septic => "septic",
            Self::PropertyManagement => "property-management",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Returns `true` if this is a built-in (non-custom) variant.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Human-readable label used in terminal output.
    pub fn label(&self) -> String {
        match self {
            Self::Plumbing => "Plumbing".to_string(),
            Self::Septic => "Septic".to_string(),
            Self::PropertyManagement => "Property Management".to_string(),
            Self::Other(s) => s.replace('-', " "),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

impl From<&str> for ServiceType {
    fn from(s: &str) -> Self {
        match slugify(s).as_str() {
            "plumbing" => Self::Plumbing,
            "septic" => Self::Septic,
            "property-management" => Self::PropertyManagement,
            "" => Self::Plumbing,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// How an office staff member is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    #[default]
    Hourly,
    Salary,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Salary => "salary",
        }
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an estimate line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    /// Crew time, priced at the estimate's hourly rate.
    #[default]
    Labor,
    Material,
    Equipment,
}

impl LineItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labor => "labor",
            Self::Material => "material",
            Self::Equipment => "equipment",
        }
    }
}

impl fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_type_default_is_plumbing() {
        assert_eq!(ServiceType::default(), ServiceType::Plumbing);
    }

    #[test]
    fn service_type_roundtrip_serde() {
        let s = ServiceType::PropertyManagement;
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#""property-management""#);
        let back: ServiceType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn service_type_normalizes_input() {
        assert_eq!(ServiceType::from("Septic"), ServiceType::Septic);
        assert_eq!(
            ServiceType::from("Property Management"),
            ServiceType::PropertyManagement
        );
        assert_eq!(
            ServiceType::from("Pest Control"),
            ServiceType::Other("pest-control".into())
        );
        assert!(!ServiceType::from("pest control").is_builtin());
    }

    #[test]
    fn service_type_label() {
        assert_eq!(ServiceType::PropertyManagement.label(), "Property Management");
        assert_eq!(ServiceType::from("hvac-repair").label(), "hvac repair");
    }

    #[test]
    fn pay_type_serde() {
        assert_eq!(serde_json::to_string(&PayType::Salary).unwrap(), r#""salary""#);
        let p: PayType = serde_json::from_str(r#""hourly""#).unwrap();
        assert_eq!(p, PayType::Hourly);
    }

    #[test]
    fn line_item_kind_as_str() {
        assert_eq!(LineItemKind::Material.as_str(), "material");
        assert_eq!(LineItemKind::default(), LineItemKind::Labor);
    }
}
