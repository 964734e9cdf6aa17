//! Scanner abstraction
//!
//! The plugin scanner is an external program; the reconciler only needs
//! something that turns a list of plugin binaries into scanned metadata.

use crate::cache::PluginCache;
use crate::error::DocCacheResult;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;

/// One scanner invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Where the scanner writes its JSON output
    pub output: PathBuf,

    /// Where the scanner's stderr is captured
    pub stderr_log: PathBuf,

    /// Plugin binaries to introspect
    pub plugins: Vec<PathBuf>,

    /// Variables set on top of the inherited environment
    pub env: Vec<(String, OsString)>,
}

/// Produces fresh plugin metadata
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Scan the requested plugins and return the parsed output
    async fn scan(&self, request: &ScanRequest) -> DocCacheResult<PluginCache>;

    /// Human-readable scanner name for logs
    fn name(&self) -> String;
}
