//! Assembling a [`RateConfig`] for `calc` and `compare`: a scenario file or
//! the saved inputs, with command-line overrides on top.

use anyhow::{Context, Result};
use crewrate_config::Settings;
use crewrate_core::model::wastage_from_daily_hours;
use crewrate_core::{RateConfig, ServiceType};
use crewrate_engine::scenario::load_scenario;
use crewrate_storage::{RateRepository, load_profile_or_default};

use crate::cli::ScenarioArgs;

/// Loads the inputs named by `args` and applies its overrides.
///
/// Without a scenario file the inputs last saved for the service are used,
/// falling back to a fresh configuration when none are saved or they are
/// unreadable.
pub(crate) fn load_config<R: RateRepository + ?Sized>(
    args: &ScenarioArgs,
    settings: &Settings,
    repo: &R,
) -> Result<RateConfig> {
    let mut config = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => {
            let service = args
                .service
                .as_deref()
                .map(ServiceType::from)
                .unwrap_or_else(|| settings.default_service.clone());
            load_profile_or_default(repo, &service)
        }
    };
    apply_overrides(&mut config, args)?;
    Ok(config)
}

/// Applies the command-line overrides in `args` to `config`.
pub(crate) fn apply_overrides(config: &mut RateConfig, args: &ScenarioArgs) -> Result<()> {
    if let Some(service) = &args.service {
        config.service_type = ServiceType::from(service.as_str());
    }
    if let Some(margin) = args.margin {
        config.desired_margin = margin;
    }
    if let Some(wastage) = args.wastage {
        config.wastage_percent = wastage;
    }
    if let Some(work_hours) = args.work_hours {
        config.daily_work_hours = work_hours;
    }
    if let Some(billable_hours) = args.billable_hours {
        config.wastage_percent = wastage_from_daily_hours(config.daily_work_hours, billable_hours)
            .with_context(|| {
                format!(
                    "billable hours ({billable_hours}) must be above 0 and at most the {} work hours",
                    config.daily_work_hours
                )
            })?;
    }
    if let Some(crews) = args.crews {
        config.total_crews = crews;
    }
    if let Some(hours) = args.monthly_hours {
        config.monthly_billable_hours_per_crew = hours;
    }
    if args.commission {
        config.commission_enabled = true;
    }
    if args.hourly {
        config.commission_enabled = false;
    }
    Ok(())
}
