//! Where rm-episodes keeps its files
//!
//! Config and cache each get an `rm-episodes` directory under the platform
//! locations reported by `dirs`. Log files go to a `logs` directory inside
//! the cache directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "rm-episodes";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";
const LOCAL_SESSION_FILE: &str = ".rm-episodes.session.toml";

/// `base/rm-episodes`, created on first use
fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    let dir = base
        .with_context(|| format!("Could not determine {} directory", kind))?
        .join(APP_NAME);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {} directory: {:?}", kind, dir))?;
    Ok(dir)
}

pub fn config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

pub fn cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}

/// Directory for release-build log files
pub fn log_dir() -> Result<PathBuf> {
    let dir = cache_dir()?.join("logs");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    Ok(dir)
}

pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Session file for a process running in `cwd`
///
/// A `.rm-episodes.session.toml` in `cwd` wins over `session.toml` in
/// `config_dir`, for reads and writes alike.
pub fn session_path_in(cwd: &Path, config_dir: &Path) -> PathBuf {
    let local = cwd.join(LOCAL_SESSION_FILE);
    if local.is_file() {
        local
    } else {
        config_dir.join(SESSION_FILE)
    }
}

pub fn session_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine working directory")?;
    Ok(session_path_in(&cwd, &config_dir()?))
}
