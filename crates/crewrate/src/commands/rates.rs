//! `crewrate rates` -- inspect and delete recorded rates.

use anyhow::{Context, Result, bail};
use crewrate_core::{RateSnapshot, ServiceType};
use crewrate_storage::keys::rate_key;
use crewrate_storage::{RateRepository, StoredRate};
use crewrate_ui::format::{format_number, format_percent, format_rate};

use crate::cli::{RateKeyArgs, RatesArgs, RatesCommands};
use crate::context::RuntimeContext;
use crate::output::{output_json, output_pairs, output_table};

const LIST_HEADERS: &[&str] = &["Service", "Crew", "Rate", "Margin", "Pay", "Updated"];

/// Execute the `crewrate rates` command.
pub fn run(ctx: &RuntimeContext, args: &RatesArgs) -> Result<()> {
    let project = ctx.project()?;
    let json = ctx.wants_json(&project.settings);
    let store = project.open_store()?;

    match &args.command {
        RatesCommands::List => {
            let rates = store.list().context("failed to list recorded rates")?;
            if json {
                output_json(&rates);
            } else if rates.is_empty() {
                println!("No rates recorded yet. Run 'crewrate calc' to compute one.");
            } else {
                let rows: Vec<Vec<String>> = rates.iter().map(list_row).collect();
                output_table(LIST_HEADERS, &rows);
            }
        }

        RatesCommands::Show(key_args) => {
            let (service, crew) = target(key_args);
            let key = rate_key(&service, crew);
            let snapshot = store
                .load(&service, crew)
                .with_context(|| format!("failed to read {key}"))?;
            let Some(snapshot) = snapshot else {
                bail!("no rate recorded for {key}");
            };
            if json {
                output_json(&StoredRate { key, snapshot });
            } else {
                output_pairs(&detail_pairs(&snapshot));
            }
        }

        RatesCommands::Delete(key_args) => {
            let (service, crew) = target(key_args);
            let key = rate_key(&service, crew);
            let deleted = store
                .delete(&service, crew)
                .with_context(|| format!("failed to delete {key}"))?;
            if !deleted {
                bail!("no rate recorded for {key}");
            }
            if json {
                output_json(&serde_json::json!({
                    "key": key,
                    "deleted": true,
                }));
            } else if !ctx.quiet {
                println!("Deleted {key}");
            }
        }
    }

    Ok(())
}

fn target(args: &RateKeyArgs) -> (ServiceType, Option<&str>) {
    (ServiceType::from(args.service.as_str()), args.crew.as_deref())
}

fn pay_label(snapshot: &RateSnapshot) -> &'static str {
    if snapshot.commission_enabled {
        "commission"
    } else {
        "hourly"
    }
}

fn list_row(stored: &StoredRate) -> Vec<String> {
    let snapshot = &stored.snapshot;
    vec![
        snapshot.service_type.to_string(),
        snapshot.crew_name.clone().unwrap_or_else(|| "-".to_string()),
        format_rate(snapshot.recommended_rate),
        format_percent(snapshot.desired_margin),
        pay_label(snapshot).to_string(),
        snapshot.last_updated.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

fn detail_pairs(snapshot: &RateSnapshot) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Name".to_string(), snapshot.rate_name.clone()),
        ("Service".to_string(), snapshot.service_type.label()),
    ];
    if let Some(crew) = &snapshot.crew_name {
        pairs.push(("Crew".to_string(), crew.clone()));
    }
    pairs.extend([
        ("Rate".to_string(), format_rate(snapshot.recommended_rate)),
        ("Pay model".to_string(), pay_label(snapshot).to_string()),
        ("Margin".to_string(), format_percent(snapshot.desired_margin)),
        ("Wastage".to_string(), format_percent(snapshot.wastage_percent)),
        (
            "Billable day".to_string(),
            format!(
                "{}h of {}h",
                format_number(snapshot.daily_billable_hours),
                format_number(snapshot.daily_work_hours)
            ),
        ),
        (
            "Updated".to_string(),
            snapshot.last_updated.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    ]);
    pairs
}
