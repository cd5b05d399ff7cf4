//! Discovery and creation of the `.crewrate/` directory.
//!
//! The `.crewrate/` directory holds a project's settings and rate database.

use crate::settings::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the crewrate metadata directory.
pub const CREWRATE_DIR_NAME: &str = ".crewrate";

/// Environment variable that overrides directory discovery.
pub const CREWRATE_DIR_ENV: &str = "CREWRATE_DIR";

/// Walk up the directory tree from `start` looking for a `.crewrate/`
/// directory.
///
/// The `CREWRATE_DIR` environment variable takes priority when it names an
/// existing directory.
///
/// # Examples
///
/// ```no_run
/// use crewrate_config::crewrate_dir::find_crewrate_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_crewrate_dir(Path::new(".")) {
///     println!("Found project at {}", dir.display());
/// }
/// ```
pub fn find_crewrate_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(CREWRATE_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_crewrate_dir_from(start)
}

/// Like [`find_crewrate_dir`] but ignores the environment override.
pub fn find_crewrate_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(CREWRATE_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Walk up looking for `.crewrate/`, returning
/// [`ConfigError::DirNotFound`] if there is none.
pub fn find_crewrate_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_crewrate_dir(start).ok_or(ConfigError::DirNotFound)
}

/// Ensure a `.crewrate/` directory exists at (or under) `path`.
///
/// Returns the path to the `.crewrate/` directory.
pub fn ensure_crewrate_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(CREWRATE_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(CREWRATE_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_dir_in_start() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(CREWRATE_DIR_NAME);
        std::fs::create_dir(&project).unwrap();

        let found = find_crewrate_dir_from(dir.path()).unwrap();
        assert_eq!(found, project.canonicalize().unwrap());
    }

    #[test]
    fn finds_dir_from_child() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(CREWRATE_DIR_NAME);
        std::fs::create_dir(&project).unwrap();
        let child = dir.path().join("jobs").join("2024");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_crewrate_dir_from(&child).unwrap();
        assert_eq!(found, project.canonicalize().unwrap());
    }

    #[test]
    fn missing_start_is_none() {
        assert!(find_crewrate_dir_from(Path::new("/nonexistent/crewrate/start")).is_none());
    }

    #[test]
    fn ensure_creates_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_crewrate_dir(dir.path()).unwrap();
        assert!(first.is_dir());
        assert!(first.ends_with(CREWRATE_DIR_NAME));

        let second = ensure_crewrate_dir(&first).unwrap();
        assert_eq!(first, second);
    }
}
