//! `crewrate estimate` -- price a job estimate at the recorded rate.

use anyhow::{Context, Result, bail};
use crewrate_core::{Estimate, EstimateTotals, ServiceType};
use crewrate_engine::scenario::load_document;
use crewrate_storage::{RateRepository, RateSource, ResolvedRate, resolve_rate};
use crewrate_ui::format::format_rate;
use crewrate_ui::report::render_estimate;
use crewrate_ui::styles::{render_category, render_muted};
use serde::Serialize;

use crate::cli::EstimateArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Where the labor rate of an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum LaborRateSource {
    /// `--rate` or the file's `hourly_rate`.
    Explicit,
    Crew,
    Service,
    Fallback,
}

impl LaborRateSource {
    fn describe(&self) -> &'static str {
        match self {
            Self::Explicit => "set explicitly",
            Self::Crew => "recorded crew rate",
            Self::Service => "recorded service rate",
            Self::Fallback => "fallback rate, run 'crewrate calc' to record one",
        }
    }
}

impl From<RateSource> for LaborRateSource {
    fn from(source: RateSource) -> Self {
        match source {
            RateSource::Crew => Self::Crew,
            RateSource::Service => Self::Service,
            RateSource::Fallback => Self::Fallback,
        }
    }
}

#[derive(Serialize)]
struct PricedLine<'a> {
    description: &'a str,
    kind: &'static str,
    quantity: f64,
    price: f64,
}

#[derive(Serialize)]
struct EstimateOutput<'a> {
    name: &'a str,
    service: &'a ServiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    crew: Option<&'a str>,
    hourly_rate: f64,
    rate_source: LaborRateSource,
    default_markup: f64,
    line_items: Vec<PricedLine<'a>>,
    totals: EstimateTotals,
}

/// Execute the `crewrate estimate` command.
pub fn run(ctx: &RuntimeContext, args: &EstimateArgs) -> Result<()> {
    let project = ctx.project()?;
    let json = ctx.wants_json(&project.settings);

    let mut estimate: Estimate = load_document(&args.file)
        .with_context(|| format!("failed to load estimate {}", args.file.display()))?;
    if let Some(service) = &args.service {
        estimate.service_type = ServiceType::from(service.as_str());
    }
    if let Some(crew) = &args.crew {
        estimate.crew = Some(crew.clone());
    }

    let default_markup = args
        .markup
        .unwrap_or(project.settings.estimate.default_markup);
    if !default_markup.is_finite() || default_markup < 0.0 {
        bail!("markup must be a finite, non-negative percentage");
    }

    let (hourly_rate, source) = match args.rate.or(estimate.hourly_rate) {
        Some(rate) => (rate, LaborRateSource::Explicit),
        None => {
            let repo = project.repository();
            let resolved = lookup_rate(
                repo.store.as_ref(),
                &estimate,
                project.settings.fallback_rate,
            );
            (resolved.rate, resolved.source.into())
        }
    };
    if !hourly_rate.is_finite() || hourly_rate < 0.0 {
        bail!("hourly rate must be a finite, non-negative number");
    }

    let totals = estimate.totals(hourly_rate, default_markup);

    if json {
        output_json(&EstimateOutput {
            name: &estimate.name,
            service: &estimate.service_type,
            crew: estimate.crew.as_deref(),
            hourly_rate,
            rate_source: source,
            default_markup,
            line_items: estimate
                .line_items
                .iter()
                .map(|item| PricedLine {
                    description: &item.description,
                    kind: item.kind.as_str(),
                    quantity: item.quantity,
                    price: item.price(hourly_rate, default_markup),
                })
                .collect(),
            totals,
        });
        return Ok(());
    }

    println!(
        "{}",
        render_category(&format!("{} ({})", estimate.name, estimate.service_type.label()))
    );
    println!(
        "Labor rate: {} {}",
        format_rate(hourly_rate),
        render_muted(&format!("({})", source.describe()))
    );
    println!();
    println!("{}", render_estimate(&estimate, hourly_rate, default_markup));
    Ok(())
}

fn lookup_rate<R: RateRepository + ?Sized>(
    repo: &R,
    estimate: &Estimate,
    fallback: f64,
) -> ResolvedRate {
    resolve_rate(repo, &estimate.service_type, estimate.crew.as_deref(), fallback)
}
