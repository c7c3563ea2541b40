use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FUSION_DATA_DIR";

const APP_DIR_NAME: &str = "fusion-inbox";

/// Resolve the data directory from (in order) an explicit flag, the
/// `FUSION_DATA_DIR` environment variable, and the platform data directory
pub fn get_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    let from_env = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let platform = dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME));
    resolve_data_dir(flag, from_env, platform)
}

pub fn resolve_data_dir(
    flag: Option<&Path>,
    from_env: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = from_env.filter(|dir| !dir.as_os_str().is_empty()) {
        return Ok(dir);
    }

    platform.context("Failed to get platform data directory; set FUSION_DATA_DIR or --data-dir")
}
