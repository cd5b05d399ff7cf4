//! Rate engine for the crewrate system.
//!
//! [`compute_rate`](engine::compute_rate) turns a
//! [`RateConfig`](crewrate_core::RateConfig) into a recommended hourly rate
//! and a cost breakdown. It is a pure function: persistence of the result is
//! the caller's concern. Comparison tables re-run the same engine with one
//! input changed at a time, and scenario files are parsed from JSON, TOML or
//! YAML.

pub mod comparisons;
pub mod engine;
pub mod scenario;
pub mod types;

pub use comparisons::{ComparisonRow, ComparisonTable, Variation, compare, default_comparisons};
pub use engine::compute_rate;
pub use types::{PayModel, RateError, RateResult};
