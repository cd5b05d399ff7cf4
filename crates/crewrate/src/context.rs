//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the global flags and knows how to find the
//! `.crewrate/` project, its settings, and its rate database.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crewrate_config::crewrate_dir::{CREWRATE_DIR_NAME, find_crewrate_dir};
use crewrate_config::{Settings, load_settings};
use crewrate_storage::{KvStore, MemoryStore, SqliteStore};
use tracing::{debug, warn};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit project directory from `--dir`.
    pub dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

/// A resolved project: where it lives (if anywhere) and its settings.
#[derive(Debug)]
pub struct Project {
    /// The `.crewrate/` directory, or `None` outside a project.
    pub dir: Option<PathBuf>,
    pub settings: Settings,
}

/// The store a command reads and writes rates through.
pub struct Repository {
    pub store: Box<dyn KvStore>,
    /// `false` when results only live for this invocation.
    pub persistent: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            dir: global.dir.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Locates the `.crewrate/` directory.
    ///
    /// `--dir` may name the project root or the `.crewrate/` directory
    /// itself. Without it, `$CREWRATE_DIR` is tried, then the working
    /// directory and its ancestors.
    pub fn crewrate_dir(&self) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) => resolve_explicit_dir(dir),
            None => env::current_dir()
                .ok()
                .and_then(|cwd| find_crewrate_dir(&cwd)),
        }
    }

    /// Like [`crewrate_dir`](Self::crewrate_dir) but fails outside a project.
    pub fn require_crewrate_dir(&self) -> Result<PathBuf> {
        self.crewrate_dir()
            .context("no .crewrate directory found. Run 'crewrate init' to create one.")
    }

    /// Where `init` should create the project.
    pub fn init_root(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().context("failed to determine the current directory"),
        }
    }

    /// Resolves the project directory and loads its settings.
    ///
    /// Outside a project the defaults (plus environment) apply.
    pub fn project(&self) -> Result<Project> {
        let dir = self.crewrate_dir();
        let settings = load_settings(dir.as_deref()).with_context(|| match &dir {
            Some(dir) => format!("failed to load settings from {}", dir.display()),
            None => "failed to load settings".to_string(),
        })?;
        debug!(dir = ?dir, "project resolved");
        Ok(Project { dir, settings })
    }

    /// Whether to print JSON: the flag, or the `json` setting.
    pub fn wants_json(&self, settings: &Settings) -> bool {
        self.json || settings.json
    }
}

impl Project {
    /// Opens the project's rate database.
    pub fn open_store(&self) -> Result<SqliteStore> {
        let dir = self
            .dir
            .as_deref()
            .context("no .crewrate directory found. Run 'crewrate init' to create one.")?;
        let path = self.settings.database_path(dir);
        SqliteStore::open(&path)
            .with_context(|| format!("failed to open rate database: {}", path.display()))
    }

    /// Opens the rate database for best-effort use.
    ///
    /// Outside a project, or when the database cannot be opened, an
    /// in-memory store stands in so the command can still run.
    pub fn repository(&self) -> Repository {
        if self.dir.is_none() {
            debug!("no project directory, results will not be saved");
            return Repository {
                store: Box::new(MemoryStore::new()),
                persistent: false,
            };
        }
        match self.open_store() {
            Ok(store) => Repository {
                store: Box::new(store),
                persistent: true,
            },
            Err(e) => {
                warn!(error = %format!("{e:#}"), "rate database unavailable, results will not be saved");
                Repository {
                    store: Box::new(MemoryStore::new()),
                    persistent: false,
                }
            }
        }
    }
}

fn resolve_explicit_dir(dir: &Path) -> Option<PathBuf> {
    let candidate = if dir.ends_with(CREWRATE_DIR_NAME) {
        dir.to_path_buf()
    } else {
        dir.join(CREWRATE_DIR_NAME)
    };
    candidate.is_dir().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with_dir(dir: Option<PathBuf>) -> RuntimeContext {
        RuntimeContext {
            dir,
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn explicit_dir_accepts_project_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(CREWRATE_DIR_NAME)).unwrap();

        let ctx = ctx_with_dir(Some(tmp.path().to_path_buf()));
        assert_eq!(
            ctx.crewrate_dir(),
            Some(tmp.path().join(CREWRATE_DIR_NAME))
        );
    }

    #[test]
    fn explicit_dir_accepts_crewrate_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join(CREWRATE_DIR_NAME);
        std::fs::create_dir(&project).unwrap();

        let ctx = ctx_with_dir(Some(project.clone()));
        assert_eq!(ctx.crewrate_dir(), Some(project));
    }

    #[test]
    fn explicit_dir_without_project() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ctx_with_dir(Some(tmp.path().to_path_buf()));
        assert_eq!(ctx.crewrate_dir(), None);
        assert!(ctx.require_crewrate_dir().is_err());
    }

    #[test]
    fn repository_outside_project_is_not_persistent() {
        let project = Project {
            dir: None,
            settings: Settings::default(),
        };
        assert!(!project.repository().persistent);
        assert!(project.open_store().is_err());
    }

    #[test]
    fn json_setting_enables_json_output() {
        let ctx = ctx_with_dir(None);
        let settings = Settings {
            json: true,
            ..Settings::default()
        };
        assert!(ctx.wants_json(&settings));
        assert!(!ctx.wants_json(&Settings::default()));
    }
}
