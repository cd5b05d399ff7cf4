//! Plain-text renderings of rate results, comparison tables, and estimates.
//!
//! Every function here returns uncoloured text so the output is stable in
//! pipes and tests; callers add color around whole lines.

use crewrate_core::{Estimate, EstimateTotals, LineItemKind, RateConfig};
use crewrate_engine::{ComparisonTable, PayModel, RateResult, Variation};

use crate::format::{format_money, format_number, format_percent, format_rate, format_signed_money};
use crate::table::{render_pairs, render_table};

// ---------------------------------------------------------------------------
// Rate breakdown
// ---------------------------------------------------------------------------

/// Label/value lines describing how a rate was built up.
pub fn breakdown_pairs(config: &RateConfig, result: &RateResult) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Pay model".to_string(), result.pay_model.as_str().to_string()),
        (
            "Billable day".to_string(),
            format!(
                "{}h of {}h",
                format_number(config.daily_billable_hours()),
                format_number(config.daily_work_hours)
            ),
        ),
    ];

    match result.pay_model {
        PayModel::Hourly => {
            pairs.push(("Crew labor".into(), format_rate(result.base_labor_cost)));
            pairs.push((
                format!("Wastage ({})", format_percent(config.wastage_percent)),
                format_rate(result.wastage_cost),
            ));
            pairs.push(("Total labor".into(), format_rate(result.total_labor_cost)));
        }
        PayModel::Commission => {
            pairs.push((
                format!("Commission ({})", format_percent(result.commission_percent)),
                format_rate(result.estimated_commission_per_hour),
            ));
        }
    }

    pairs.push((
        "Office staff".into(),
        format_rate(result.office_staff_cost_per_hour),
    ));
    pairs.push(("Overhead".into(), format_rate(result.overhead_cost_per_hour)));
    pairs.push(("Total cost".into(), format_rate(result.total_cost_per_hour)));
    pairs.push((
        format!("Profit ({})", format_percent(config.desired_margin)),
        format_rate(result.profit_per_hour),
    ));
    pairs.push(("Recommended rate".into(), format_rate(result.recommended_rate)));
    pairs
}

pub fn render_breakdown(config: &RateConfig, result: &RateResult) -> String {
    render_pairs(&breakdown_pairs(config, result))
}

// ---------------------------------------------------------------------------
// Comparison tables
// ---------------------------------------------------------------------------

/// Formats a varied input in the unit of its variation.
pub fn format_variation_value(variation: Variation, value: f64) -> String {
    match variation {
        Variation::Margin | Variation::Wastage | Variation::Commission => format_percent(value),
        Variation::Overhead => format_money(value),
        Variation::CrewCount => format_number(value),
    }
}

/// Table rows ordered by value, with the current configuration included
/// and marked.
pub fn comparison_rows(table: &ComparisonTable) -> Vec<Vec<String>> {
    let is_baseline = |value: f64| (value - table.baseline_value).abs() < 1e-9;

    let mut entries: Vec<(f64, Option<f64>, Option<f64>)> = table
        .rows
        .iter()
        .map(|row| (row.value, row.recommended_rate, row.delta))
        .collect();
    if !entries.iter().any(|(value, _, _)| is_baseline(*value)) {
        entries.push((table.baseline_value, table.baseline_rate, None));
    }
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));

    entries
        .into_iter()
        .map(|(value, rate, delta)| {
            let mut label = format_variation_value(table.variation, value);
            if is_baseline(value) {
                label.push_str(" (current)");
            }
            vec![
                label,
                rate.map(format_rate).unwrap_or_else(|| "n/a".to_string()),
                match delta {
                    Some(delta) if !is_baseline(value) => format_signed_money(delta),
                    _ => String::new(),
                },
            ]
        })
        .collect()
}

pub fn render_comparison(table: &ComparisonTable) -> String {
    render_table(
        &[table.variation.title(), "Rate", "Change"],
        &comparison_rows(table),
    )
}

// ---------------------------------------------------------------------------
// Estimates
// ---------------------------------------------------------------------------

pub const ESTIMATE_HEADERS: &[&str] = &["Description", "Kind", "Qty", "Unit", "Markup", "Price"];

/// One row per line item, priced at `hourly_rate`.
pub fn estimate_rows(estimate: &Estimate, hourly_rate: f64, default_markup: f64) -> Vec<Vec<String>> {
    estimate
        .line_items
        .iter()
        .map(|item| {
            let (unit, markup) = match item.kind {
                LineItemKind::Labor => (format_rate(hourly_rate), String::new()),
                _ => (
                    format_money(item.unit_cost),
                    format_percent(item.markup_percent.unwrap_or(default_markup)),
                ),
            };
            vec![
                item.description.clone(),
                item.kind.as_str().to_string(),
                format_number(item.quantity),
                unit,
                markup,
                format_money(item.price(hourly_rate, default_markup)),
            ]
        })
        .collect()
}

pub fn estimate_total_pairs(totals: &EstimateTotals) -> Vec<(String, String)> {
    vec![
        ("Labor".to_string(), format_money(totals.labor)),
        ("Materials".to_string(), format_money(totals.materials)),
        ("Equipment".to_string(), format_money(totals.equipment)),
        ("Markup included".to_string(), format_money(totals.markup)),
        ("Total".to_string(), format_money(totals.total)),
    ]
}

/// Line items followed by the totals block.
pub fn render_estimate(estimate: &Estimate, hourly_rate: f64, default_markup: f64) -> String {
    let totals = render_pairs(&estimate_total_pairs(
        &estimate.totals(hourly_rate, default_markup),
    ));
    let items = render_table(
        ESTIMATE_HEADERS,
        &estimate_rows(estimate, hourly_rate, default_markup),
    );
    if items.is_empty() {
        totals
    } else {
        format!("{items}\n\n{totals}")
    }
}
