//! CLI argument definitions using clap derive

use crate::hotdoc::HotdocOptions;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate and incrementally merge the GStreamer plugins documentation cache
///
/// Without a subcommand, scans the given plugins and merges the result into
/// the cache file.
#[derive(Parser, Debug)]
#[command(name = "gst-plugins-doc-cache-generator")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Scan and merge arguments
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GST_DOC_CACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one hotdoc configuration file per cached plugin
    #[command(name = "hotdoc-config")]
    HotdocConfig(HotdocConfigArgs),
}

/// Arguments for the default scan + merge mode
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Persisted plugin cache, rewritten only when the scan changes it
    #[arg(required = true)]
    pub cache_file: Option<PathBuf>,

    /// Merged cache for the current build, always written
    #[arg(required = true)]
    pub output_file: Option<PathBuf>,

    /// Plugin binaries to scan
    pub plugins: Vec<PathBuf>,

    /// Scanner program (defaults to the one installed next to this tool)
    #[arg(long, env = "GST_HOTDOC_PLUGINS_SCANNER")]
    pub scanner: Option<PathBuf>,
}

/// Arguments for the hotdoc-config command
#[derive(Args, Debug)]
pub struct HotdocConfigArgs {
    /// Directory receiving the generated files
    #[arg(long)]
    pub builddir: PathBuf,

    /// Master plugin cache listing the plugins to document
    #[arg(long = "gst_cache_file")]
    pub gst_cache_file: PathBuf,

    /// Hotdoc sitemap
    #[arg(long)]
    pub sitemap: PathBuf,

    /// Hotdoc index page
    #[arg(long)]
    pub index: PathBuf,

    /// C flags used to parse the sources
    #[arg(long = "c_flags", allow_hyphen_values = true)]
    pub c_flags: Option<String>,

    /// GStreamer index page
    #[arg(long = "gst_index")]
    pub gst_index: Option<PathBuf>,

    /// Default C sources for plugins without an explicit list
    #[arg(long = "gst_c_sources", num_args = 0..)]
    pub gst_c_sources: Vec<String>,

    /// Project version recorded in every configuration
    #[arg(long = "project_version")]
    pub project_version: Option<String>,

    /// Include paths
    #[arg(long = "include_paths", num_args = 0..)]
    pub include_paths: Vec<String>,

    /// Source filter patterns
    #[arg(long = "gst_c_source_filters", num_args = 0..)]
    pub gst_c_source_filters: Vec<String>,

    /// JSON map from plugin name to its separator-joined C sources
    #[arg(long = "gst_c_source_file")]
    pub gst_c_source_file: Option<PathBuf>,
}

impl From<HotdocConfigArgs> for HotdocOptions {
    fn from(args: HotdocConfigArgs) -> Self {
        Self {
            builddir: args.builddir,
            gst_cache_file: args.gst_cache_file,
            sitemap: args.sitemap,
            index: args.index,
            c_flags: args.c_flags,
            gst_index: args.gst_index,
            gst_c_sources: args.gst_c_sources,
            project_version: args.project_version,
            include_paths: args.include_paths,
            gst_c_source_filters: args.gst_c_source_filters,
            gst_c_source_file: args.gst_c_source_file,
        }
    }
}
