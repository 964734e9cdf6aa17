//! Plugin search path assembly for the scanner environment
//!
//! The build writes the directories holding freshly built plugins to a
//! sidecar JSON array. They are appended to the inherited search path so
//! the scanner can resolve inter-plugin dependencies.

use crate::error::{DocCacheError, DocCacheResult};
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Separator used by search-path style variables on this platform
pub const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Read the sidecar list of plugin directories; a missing file lists none
pub async fn read_plugin_dirs(sidecar: &Path) -> DocCacheResult<Vec<String>> {
    let content = match fs::read_to_string(sidecar).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No plugin path list at {}", sidecar.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(DocCacheError::io(
                format!("reading {}", sidecar.display()),
                e,
            ));
        }
    };

    serde_json::from_str(&content).map_err(|e| DocCacheError::PluginPathsInvalid {
        path: sidecar.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Append `extra` directories to the `current` search path
///
/// Returns `None` when there is nothing to add, so the inherited value is
/// left alone. The inherited value is kept byte for byte.
pub fn extend_search_path(current: Option<&OsStr>, extra: &[String]) -> Option<OsString> {
    let separator = PATH_SEPARATOR.to_string();
    let appended = extra.join(separator.as_str());
    if appended.is_empty() {
        return None;
    }

    let mut value = OsString::new();
    if let Some(current) = current.filter(|current| !current.is_empty()) {
        value.push(current);
        value.push(&separator);
    }
    value.push(appended);
    Some(value)
}

/// Compute the search path value for the scanner, if it needs one
pub async fn plugin_search_path(
    build_root: &Path,
    sidecar_name: &str,
    current: Option<&OsStr>,
) -> DocCacheResult<Option<OsString>> {
    let dirs = read_plugin_dirs(&build_root.join(sidecar_name)).await?;
    Ok(extend_search_path(current, &dirs))
}
