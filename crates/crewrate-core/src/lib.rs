//! Core types for the crewrate system.
//!
//! This crate holds the value types a rate calculation is assembled from
//! (crews, office staff, overhead), the persisted rate record, estimate line
//! items, and the validation rules shared by every consumer.

pub mod enums;
pub mod estimate;
pub mod model;
pub mod slug;
pub mod snapshot;
pub mod validation;

pub use enums::{LineItemKind, PayType, ServiceType};
pub use estimate::{Estimate, EstimateLineItem, EstimateTotals};
pub use model::{Crew, OfficeStaffMember, OverheadLineItem, RateConfig, Worker};
pub use snapshot::RateSnapshot;
pub use validation::ValidationError;
