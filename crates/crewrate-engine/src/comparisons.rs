//! What-if tables: the recommended rate recomputed with one input varied.
//!
//! Each table reapplies [`compute_rate`] to a modified copy of the
//! configuration. Variations that make the rate undefined produce rows
//! without a rate instead of failing the whole table.

use crewrate_core::model::{OverheadLineItem, RateConfig};
use serde::Serialize;

use crate::engine::{average_crew_commission, compute_rate};

/// The single input a comparison table varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variation {
    /// Desired margin, in percent.
    Margin,
    /// Total monthly overhead, in dollars.
    Overhead,
    /// Average crew commission, in percent.
    Commission,
    /// Wastage, in percent.
    Wastage,
    /// Total number of crews.
    CrewCount,
}

impl Variation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Overhead => "overhead",
            Self::Commission => "commission",
            Self::Wastage => "wastage",
            Self::CrewCount => "crew-count",
        }
    }

    /// Column heading for the varied value.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Margin => "Desired margin",
            Self::Overhead => "Monthly overhead",
            Self::Commission => "Crew commission",
            Self::Wastage => "Wastage",
            Self::CrewCount => "Crews",
        }
    }

    /// Current value of the varied input in `config`.
    pub fn current_value(&self, config: &RateConfig) -> f64 {
        match self {
            Self::Margin => config.desired_margin,
            Self::Overhead => config.monthly_overhead_cost(),
            Self::Commission => average_crew_commission(&config.crews),
            Self::Wastage => config.wastage_percent,
            Self::CrewCount => f64::from(config.total_crews),
        }
    }

    /// Returns a copy of `config` with this input set to `value`.
    pub fn apply(&self, config: &RateConfig, value: f64) -> RateConfig {
        let mut varied = config.clone();
        match self {
            Self::Margin => varied.desired_margin = value,
            Self::Wastage => varied.wastage_percent = value,
            Self::CrewCount => varied.total_crews = value.max(0.0).round() as u32,
            Self::Overhead => scale_overhead(&mut varied, value),
            Self::Commission => scale_commission(&mut varied, value),
        }
        varied
    }
}

/// One row of a comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub value: f64,
    /// `None` when the rate cannot be computed at this value.
    pub recommended_rate: Option<f64>,
    /// Difference from the baseline rate, when both are defined.
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub variation: Variation,
    pub baseline_value: f64,
    pub baseline_rate: Option<f64>,
    pub rows: Vec<ComparisonRow>,
}

/// Recomputes the rate for each of `values` with `variation` applied.
pub fn compare(config: &RateConfig, variation: Variation, values: &[f64]) -> ComparisonTable {
    let baseline_rate = compute_rate(config).ok().map(|r| r.recommended_rate);
    let rows = values
        .iter()
        .map(|&value| {
            let rate = compute_rate(&variation.apply(config, value))
                .ok()
                .map(|r| r.recommended_rate);
            let delta = match (rate, baseline_rate) {
                (Some(rate), Some(base)) => Some(rate - base),
                _ => None,
            };
            ComparisonRow {
                value,
                recommended_rate: rate,
                delta,
            }
        })
        .collect();

    ComparisonTable {
        variation,
        baseline_value: variation.current_value(config),
        baseline_rate,
        rows,
    }
}

/// The standard set of tables shown next to a calculation.
///
/// Commission is varied in the commission model and wastage in the hourly
/// model, since wastage has no effect on commission pay.
pub fn default_comparisons(config: &RateConfig) -> Vec<ComparisonTable> {
    let pay_variation = if config.commission_enabled {
        Variation::Commission
    } else {
        Variation::Wastage
    };

    [
        Variation::Margin,
        Variation::Overhead,
        pay_variation,
        Variation::CrewCount,
    ]
    .into_iter()
    .map(|variation| compare(config, variation, &default_values(config, variation)))
    .collect()
}

/// Candidate values around the current one, clipped to the input's domain.
fn default_values(config: &RateConfig, variation: Variation) -> Vec<f64> {
    let current = variation.current_value(config);
    match variation {
        Variation::Margin | Variation::Wastage | Variation::Commission => {
            [-10.0, -5.0, 5.0, 10.0]
                .iter()
                .map(|step| current + step)
                .filter(|v| (0.0..100.0).contains(v))
                .collect()
        }
        Variation::Overhead => {
            if current <= 0.0 {
                return Vec::new();
            }
            [0.8, 0.9, 1.1, 1.2].iter().map(|f| current * f).collect()
        }
        Variation::CrewCount => [-1.0, 1.0, 2.0]
            .iter()
            .map(|step| current + step)
            .filter(|v| *v >= 1.0)
            .collect(),
    }
}

/// Scales every overhead item so the monthly total becomes `target`.
fn scale_overhead(config: &mut RateConfig, target: f64) {
    let current = config.monthly_overhead_cost();
    if current > 0.0 {
        let factor = target / current;
        for item in &mut config.overhead_costs {
            item.monthly_cost *= factor;
        }
    } else {
        config.overhead_costs = vec![OverheadLineItem::new("Overhead", target)];
    }
}

/// Sets each crew's combined commission to `target` percent.
///
/// Workers keep their relative shares; a crew with no commission splits the
/// target evenly.
fn scale_commission(config: &mut RateConfig, target: f64) {
    for crew in &mut config.crews {
        if crew.workers.is_empty() {
            continue;
        }
        let current = crew.commission_percent();
        if current > 0.0 {
            let factor = target / current;
            for worker in &mut crew.workers {
                worker.commission *= factor;
            }
        } else {
            let share = target / crew.workers.len() as f64;
            for worker in &mut crew.workers {
                worker.commission = share;
            }
        }
    }
}
