//! `crewrate compare` -- what-if tables for one input at a time.

use anyhow::{Result, bail};
use crewrate_engine::{ComparisonTable, Variation, compare, default_comparisons};
use crewrate_ui::format::format_rate;
use crewrate_ui::report::render_comparison;
use crewrate_ui::styles::{render_category, render_muted};
use serde::Serialize;

use crate::cli::CompareArgs;
use crate::commands::inputs::load_config;
use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Serialize)]
struct CompareOutput<'a> {
    name: &'a str,
    baseline_rate: Option<f64>,
    tables: &'a [ComparisonTable],
}

/// Execute the `crewrate compare` command.
pub fn run(ctx: &RuntimeContext, args: &CompareArgs) -> Result<()> {
    let project = ctx.project()?;
    let json = ctx.wants_json(&project.settings);
    let repo = project.repository();

    let config = load_config(&args.scenario, &project.settings, repo.store.as_ref())?;

    let tables = match &args.vary {
        Some(name) => vec![compare(&config, parse_variation(name)?, &args.values)],
        None => default_comparisons(&config),
    };
    let baseline_rate = tables.first().and_then(|t| t.baseline_rate);

    if json {
        output_json(&CompareOutput {
            name: &config.name,
            baseline_rate,
            tables: &tables,
        });
        return Ok(());
    }

    let current = match baseline_rate {
        Some(rate) => format_rate(rate),
        None => "cannot be computed".to_string(),
    };
    println!("{}: {}", config.name, current);
    print_tables(&tables);
    Ok(())
}

/// Prints each table under its heading.
pub(crate) fn print_tables(tables: &[ComparisonTable]) {
    for table in tables {
        println!();
        println!("{}", render_category(table.variation.title()));
        let rendered = render_comparison(table);
        if rendered.is_empty() {
            println!("{}", render_muted("(no values)"));
        } else {
            println!("{rendered}");
        }
    }
}

fn parse_variation(name: &str) -> Result<Variation> {
    let variation = match name.trim().to_lowercase().replace('_', "-").as_str() {
        "margin" => Variation::Margin,
        "overhead" => Variation::Overhead,
        "commission" => Variation::Commission,
        "wastage" => Variation::Wastage,
        "crew-count" | "crews" => Variation::CrewCount,
        other => bail!(
            "unknown variation '{}' (expected margin, overhead, commission, wastage, or crew-count)",
            other
        ),
    };
    Ok(variation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variation_names() {
        assert_eq!(parse_variation("margin").unwrap(), Variation::Margin);
        assert_eq!(parse_variation("Crew_Count").unwrap(), Variation::CrewCount);
        assert_eq!(parse_variation("crews").unwrap(), Variation::CrewCount);
        assert!(parse_variation("price").is_err());
    }
}
