//! Configuration discovery.
//!
//! `--config` wins; otherwise the nearest `sysgen.toml` found by walking up
//! from the current directory is used, and with neither the built-in
//! defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sysgen::GenConfig;
use tracing::debug;

/// Name of the configuration file looked up by directory walk.
pub const CONFIG_FILE: &str = "sysgen.toml";

/// A loaded configuration and the directory its relative paths resolve against.
pub struct Loaded {
    /// Parsed configuration.
    pub config: GenConfig,
    /// Directory containing the config file, or the current directory when
    /// running on defaults.
    pub base: PathBuf,
    /// The file it came from, if any.
    pub path: Option<PathBuf>,
}

impl Loaded {
    /// Resolve a path from the config file against its directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}

/// Load the configuration for this invocation.
pub fn load(explicit: Option<&Path>) -> Result<Loaded> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = match explicit {
        Some(path) => Some(cwd.join(path)),
        None => find_config(&cwd),
    };

    let Some(path) = path else {
        debug!("no {CONFIG_FILE} found, using defaults");
        return Ok(Loaded {
            config: GenConfig::default(),
            base: cwd,
            path: None,
        });
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = GenConfig::from_toml(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let base = path
        .parent()
        .map_or_else(|| cwd.clone(), Path::to_path_buf);
    debug!(path = %path.display(), outputs = config.outputs.len(), "loaded config");

    Ok(Loaded {
        config,
        base,
        path: Some(path),
    })
}

/// Walk up from `start` looking for [`CONFIG_FILE`].
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
