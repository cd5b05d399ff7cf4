//! `crewrate calc` -- compute the recommended hourly rate.

use anyhow::{Context, Result};
use chrono::Utc;
use crewrate_core::{RateConfig, ServiceType};
use crewrate_engine::{ComparisonTable, RateResult, compute_rate, default_comparisons};
use crewrate_storage::keys::profile_key;
use crewrate_storage::{RateRepository, RecordFailure, RecordReport, record_rate};
use crewrate_ui::report::render_breakdown;
use crewrate_ui::styles::{
    render_category, render_highlight, render_muted, render_pass_icon, render_warn,
    render_warn_icon,
};
use serde::Serialize;
use tracing::warn;

use crate::cli::CalcArgs;
use crate::commands::compare::print_tables;
use crate::commands::inputs::load_config;
use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Serialize)]
struct CalcOutput<'a> {
    name: &'a str,
    service: &'a ServiceType,
    result: &'a RateResult,
    /// `None` when nothing was saved.
    recorded: Option<&'a RecordReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    comparisons: Vec<ComparisonTable>,
}

/// Execute the `crewrate calc` command.
pub fn run(ctx: &RuntimeContext, args: &CalcArgs) -> Result<()> {
    let project = ctx.project()?;
    let json = ctx.wants_json(&project.settings);
    let repo = project.repository();
    let store = repo.store.as_ref();

    let config = load_config(&args.scenario, &project.settings, store)?;
    let result = compute_rate(&config).context("rate cannot be computed")?;

    let report = if args.no_save || !repo.persistent {
        None
    } else {
        Some(persist(store, &config, &result))
    };

    let comparisons = if args.compare {
        default_comparisons(&config)
    } else {
        Vec::new()
    };

    if json {
        output_json(&CalcOutput {
            name: &config.name,
            service: &config.service_type,
            result: &result,
            recorded: report.as_ref(),
            comparisons,
        });
        return Ok(());
    }

    println!(
        "{}",
        render_category(&format!("{} ({})", config.name, config.service_type.label()))
    );
    for line in render_breakdown(&config, &result).lines() {
        if line.starts_with("Recommended rate") {
            println!("{}", render_highlight(line));
        } else {
            println!("{line}");
        }
    }

    if !comparisons.is_empty() {
        print_tables(&comparisons);
    }

    if !ctx.quiet {
        println!();
        print_save_status(args.no_save, repo.persistent, report.as_ref(), &config);
    }

    Ok(())
}

/// Records the rate and saves the inputs, collecting every outcome.
fn persist<R: RateRepository + ?Sized>(
    repo: &R,
    config: &RateConfig,
    result: &RateResult,
) -> RecordReport {
    let mut report = record_rate(repo, config, result, Utc::now());

    let key = profile_key(&config.service_type);
    match repo.save_profile(&config.service_type, config) {
        Ok(()) => report.written.push(key),
        Err(e) => {
            warn!(%key, error = %e, "failed to save calculator inputs");
            report.failed.push(RecordFailure {
                key,
                reason: e.to_string(),
            });
        }
    }
    report
}

fn print_save_status(
    no_save: bool,
    persistent: bool,
    report: Option<&RecordReport>,
    config: &RateConfig,
) {
    match report {
        _ if no_save => println!("{}", render_muted("Not saved (--no-save).")),
        None if !persistent => println!(
            "{}",
            render_muted("Not saved: no rate database. Run 'crewrate init' to keep results.")
        ),
        None => {}
        Some(report) if report.is_complete() => {
            let crews = config.crews.len();
            println!(
                "{} Saved rate for {} and {} crew{}",
                render_pass_icon(),
                config.service_type,
                crews,
                if crews == 1 { "" } else { "s" }
            );
        }
        Some(report) => {
            for failure in &report.failed {
                println!(
                    "{} {}",
                    render_warn_icon(),
                    render_warn(&format!("could not save {}: {}", failure.key, failure.reason))
                );
            }
        }
    }
}
