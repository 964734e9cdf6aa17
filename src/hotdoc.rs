//! Per-plugin hotdoc configuration files
//!
//! Every plugin listed in the cache gets its own `plugin-<name>.json` in
//! the build directory, consumed later by the documentation build.

use crate::cache::{self, PluginCache};
use crate::error::{DocCacheError, DocCacheResult};
use crate::scanner::PATH_SEPARATOR;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Options shared by every generated configuration
#[derive(Debug, Clone, Default)]
pub struct HotdocOptions {
    /// Directory receiving the generated files
    pub builddir: PathBuf,
    /// Master plugin cache
    pub gst_cache_file: PathBuf,
    pub sitemap: PathBuf,
    pub index: PathBuf,
    pub c_flags: Option<String>,
    /// Accepted for compatibility; records reuse `index`
    pub gst_index: Option<PathBuf>,
    /// Sources used by plugins without an explicit list
    pub gst_c_sources: Vec<String>,
    pub project_version: Option<String>,
    pub include_paths: Vec<String>,
    pub gst_c_source_filters: Vec<String>,
    /// JSON object mapping plugin name to a separator-joined source list
    pub gst_c_source_file: Option<PathBuf>,
}

/// One generated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    pub sitemap: String,
    pub index: String,
    pub gst_index: String,
    pub output: String,
    pub conf: String,
    pub project_name: String,
    pub project_version: Option<String>,
    pub gst_cache_file: String,
    pub gst_plugin_name: String,
    pub c_flags: Option<String>,
    pub gst_smart_index: bool,
    pub gst_c_sources: Vec<String>,
    pub gst_c_source_filters: Vec<String>,
    pub include_paths: Vec<String>,
    pub gst_order_generated_subpages: bool,
}

impl PluginRecord {
    /// Build the record for `plugin`, written to `conf`
    pub fn new(options: &HotdocOptions, plugin: &str, conf: &Path, sources: Vec<String>) -> Self {
        let index = options.index.display().to_string();
        Self {
            sitemap: options.sitemap.display().to_string(),
            gst_index: index.clone(),
            index,
            output: format!("plugin-{plugin}"),
            conf: conf.display().to_string(),
            project_name: plugin.to_string(),
            project_version: options.project_version.clone(),
            gst_cache_file: options.gst_cache_file.display().to_string(),
            gst_plugin_name: plugin.to_string(),
            c_flags: options.c_flags.clone(),
            gst_smart_index: true,
            gst_c_sources: sources,
            gst_c_source_filters: options.gst_c_source_filters.clone(),
            include_paths: options.include_paths.clone(),
            gst_order_generated_subpages: true,
        }
    }
}

/// Path of the configuration generated for `plugin`
pub fn config_path(builddir: &Path, plugin: &str) -> PathBuf {
    builddir.join(format!("plugin-{plugin}.json"))
}

/// Write one configuration per cached plugin, in cache order
pub async fn generate_plugin_configs(options: &HotdocOptions) -> DocCacheResult<Vec<PathBuf>> {
    let source_map = match &options.gst_c_source_file {
        Some(path) => load_source_map(path).await?,
        None => HashMap::new(),
    };

    let plugins: PluginCache = cache::load_ordered(&options.gst_cache_file).await?;
    let mut generated = Vec::with_capacity(plugins.len());

    for plugin in plugins.keys() {
        let conf = config_path(&options.builddir, plugin);
        let sources = match source_map.get(plugin) {
            Some(list) => split_sources(list),
            None => options.gst_c_sources.clone(),
        };

        let record = PluginRecord::new(options, plugin, &conf, sources);
        fs::write(&conf, cache::to_indented_json(&record)?)
            .await
            .map_err(|e| DocCacheError::io(format!("writing {}", conf.display()), e))?;
        debug!("Wrote {}", conf.display());

        generated.push(conf);
    }

    info!("Generated {} plugin configurations", generated.len());
    Ok(generated)
}

/// Join generated paths into the single argument the docs build expects
pub fn join_for_output(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR.to_string().as_str())
}

fn split_sources(list: &str) -> Vec<String> {
    list.split(PATH_SEPARATOR).map(str::to_string).collect()
}

async fn load_source_map(path: &Path) -> DocCacheResult<HashMap<String, String>> {
    let map = cache::load_ordered(path).await?;

    map.into_iter()
        .map(|(plugin, sources)| match sources {
            Value::String(list) => Ok((plugin, list)),
            other => Err(DocCacheError::SourceMapInvalid {
                path: path.to_path_buf(),
                reason: format!("sources for {plugin} must be a string, got {other}"),
            }),
        })
        .collect()
}
