//! Scan + merge + persist
//!
//! One reconciliation runs the scanner once over every plugin, merges the
//! result into the persisted cache and writes:
//! - the merged view to the output file, always (the docs build reads it)
//! - the cache file, only when the merge wrote something, so that an
//!   unchanged cache does not retrigger cache-dependent build steps

use crate::cache::{self, merge, NormalizeRules};
use crate::config::ScannerConfig;
use crate::error::DocCacheResult;
use crate::scanner::{plugin_search_path, ScanRequest, Scanner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Number of plugin binaries handed to the scanner
    pub plugins: usize,

    /// Number of top-level entries in the merged cache
    pub entries: usize,

    /// Whether the cache file was rewritten
    pub modified: bool,
}

/// Runs the scanner and keeps the persisted cache up to date
pub struct Reconciler<S: Scanner> {
    scanner: S,
    settings: ScannerConfig,
    rules: NormalizeRules,
    build_root: PathBuf,
    search_path: Option<OsString>,
}

impl<S: Scanner> Reconciler<S> {
    /// Create a reconciler; environment inputs are read from the process
    pub fn new(scanner: S, settings: ScannerConfig, rules: NormalizeRules) -> Self {
        let build_root = std::env::var_os(&settings.build_root_var)
            .map(PathBuf::from)
            .unwrap_or_default();
        let search_path = std::env::var_os(&settings.plugin_path_var);

        Self {
            scanner,
            settings,
            rules,
            build_root,
            search_path,
        }
    }

    /// Override the build root holding the plugin path sidecar
    pub fn with_build_root(mut self, build_root: impl Into<PathBuf>) -> Self {
        self.build_root = build_root.into();
        self
    }

    /// Override the inherited plugin search path
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Scan `plugins`, merge into `cache_file` and write `output_file`
    pub async fn run(
        &self,
        cache_file: &Path,
        output_file: &Path,
        plugins: &[PathBuf],
    ) -> DocCacheResult<ReconcileReport> {
        let existing = cache::load_or_empty(cache_file).await?;
        debug!(
            "Loaded {} cached plugins from {}",
            existing.len(),
            cache_file.display()
        );

        let request = self.scan_request(output_file, plugins).await?;
        debug!("Scanning with {}", self.scanner.name());
        let scanned = self.scanner.scan(&request).await?;

        let outcome = merge(&existing, &scanned, &self.rules);

        cache::write_sorted(output_file, &outcome.merged).await?;
        if outcome.modified {
            cache::write_sorted(cache_file, &outcome.merged).await?;
            info!("Updated {}", cache_file.display());
        } else {
            info!("{} is up to date", cache_file.display());
        }

        Ok(ReconcileReport {
            plugins: plugins.len(),
            entries: outcome.merged.len(),
            modified: outcome.modified,
        })
    }

    async fn scan_request(
        &self,
        output_file: &Path,
        plugins: &[PathBuf],
    ) -> DocCacheResult<ScanRequest> {
        let mut env = Vec::new();
        let search_path = plugin_search_path(
            &self.build_root,
            &self.settings.plugin_paths_file,
            self.search_path.as_deref(),
        )
        .await?;
        if let Some(value) = search_path {
            debug!(
                "{}={}",
                self.settings.plugin_path_var,
                value.to_string_lossy()
            );
            env.push((self.settings.plugin_path_var.clone(), value));
        }

        Ok(ScanRequest {
            output: with_suffix(output_file, &self.settings.output_suffix),
            stderr_log: with_suffix(output_file, &self.settings.stderr_suffix),
            plugins: plugins.to_vec(),
            env,
        })
    }
}

/// `path` with `suffix` appended to its final component
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
