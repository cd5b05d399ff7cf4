//! Terminal rendering for crewrate.
//!
//! Provides colour styling, terminal detection, money and percent formatting,
//! and plain-text tables for rate breakdowns, comparisons, and estimates.

pub mod format;
pub mod report;
pub mod styles;
pub mod table;
pub mod terminal;
