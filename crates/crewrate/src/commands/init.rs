//! `crewrate init` -- create a `.crewrate/` project.

use anyhow::{Context, Result, bail};
use crewrate_config::crewrate_dir::ensure_crewrate_dir;
use crewrate_config::settings::CONFIG_FILE_NAME;
use crewrate_config::{Settings, load_settings, save_settings};
use crewrate_storage::SqliteStore;
use tracing::info;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

const GITIGNORE: &str = "*.db\n*.db-wal\n*.db-shm\n";

/// Execute the `crewrate init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let root = ctx.init_root()?;
    let dir = ensure_crewrate_dir(&root)
        .with_context(|| format!("failed to create .crewrate directory in {}", root.display()))?;

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        bail!(
            "already initialized at {}\nHint: use --force to reset config.yaml to defaults",
            dir.display()
        );
    }
    save_settings(&dir, &Settings::default())
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    let gitignore = dir.join(".gitignore");
    if !gitignore.exists() {
        std::fs::write(&gitignore, GITIGNORE)
            .with_context(|| format!("failed to write {}", gitignore.display()))?;
    }

    // Environment overrides may relocate the database.
    let settings = load_settings(Some(&dir)).context("failed to load settings")?;
    let db_path = settings.database_path(&dir);
    SqliteStore::open(&db_path)
        .with_context(|| format!("failed to create rate database: {}", db_path.display()))?;
    info!(dir = %dir.display(), "project initialized");

    if ctx.json {
        output_json(&serde_json::json!({
            "path": dir.display().to_string(),
            "config": config_path.display().to_string(),
            "database": db_path.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!("Initialized crewrate project in {}", dir.display());
        println!("  config:   {}", config_path.display());
        println!("  database: {}", db_path.display());
    }

    Ok(())
}
