//! `crewrate config` -- show and edit settings.

use anyhow::{Context, Result, bail};
use crewrate_config::settings::CONFIG_FILE_NAME;
use crewrate_config::{Settings, save_settings};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crewrate config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let project = ctx.project()?;
            let entries = project.settings.entries();
            if ctx.wants_json(&project.settings) {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                output_json(&map);
            } else {
                for (key, value) in &entries {
                    println!("{} = {}", key, value);
                }
            }
        }

        ConfigCommands::Get(get_args) => {
            let project = ctx.project()?;
            let Some(value) = project.settings.get(&get_args.key) else {
                bail!(
                    "unknown key '{}' (expected one of: {})",
                    get_args.key,
                    Settings::KEYS.join(", ")
                );
            };
            if ctx.wants_json(&project.settings) {
                output_json(&serde_json::json!({
                    "key": get_args.key,
                    "value": value,
                }));
            } else {
                println!("{}", value);
            }
        }

        ConfigCommands::Set(set_args) => {
            let dir = ctx.require_crewrate_dir()?;
            let mut settings = read_file_settings(&dir)?;
            settings
                .set(&set_args.key, &set_args.value)
                .with_context(|| format!("failed to set '{}'", set_args.key))?;
            save_settings(&dir, &settings)
                .with_context(|| format!("failed to write {}", dir.join(CONFIG_FILE_NAME).display()))?;

            let value = settings.get(&set_args.key).unwrap_or_default();
            if ctx.json || settings.json {
                output_json(&serde_json::json!({
                    "key": set_args.key,
                    "value": value,
                }));
            } else if !ctx.quiet {
                println!("Set {} = {}", set_args.key, value);
            }
        }
    }

    Ok(())
}

/// Reads `config.yaml` alone, so that environment overrides in effect for
/// this invocation are not written back to the file.
fn read_file_settings(dir: &std::path::Path) -> Result<Settings> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
