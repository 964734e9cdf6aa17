//! Configuration schema for the documentation cache generator
//!
//! Every section is optional; a missing file yields the defaults below,
//! which match the layout of a GStreamer meson build tree.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner invocation settings
    pub scanner: ScannerConfig,

    /// Value normalization rules applied while merging
    pub normalize: Vec<NormalizeRuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::default(),
            normalize: vec![NormalizeRuleConfig::package()],
        }
    }
}

/// External scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Scanner program; a bare name is looked up next to our own executable
    pub program: PathBuf,

    /// Environment variable holding the plugin search path
    pub plugin_path_var: String,

    /// Environment variable naming the build root
    pub build_root_var: String,

    /// Sidecar file (relative to the build root) listing extra plugin directories
    pub plugin_paths_file: String,

    /// Suffix appended to the output path for the scanner's raw output
    pub output_suffix: String,

    /// Suffix appended to the output path for the captured stderr log
    pub stderr_suffix: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gst-hotdoc-plugins-scanner"),
            plugin_path_var: "GST_PLUGIN_PATH".to_string(),
            build_root_var: "MESON_BUILD_ROOT".to_string(),
            plugin_paths_file: "GstPluginsPath.json".to_string(),
            output_suffix: ".tmp".to_string(),
            stderr_suffix: ".stderr".to_string(),
        }
    }
}

/// A normalization rule: values stored under `key` lose one trailing suffix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeRuleConfig {
    /// Key the rule applies to, at any depth
    pub key: String,

    /// Suffixes stripped from string values, first match wins
    #[serde(default)]
    pub strip_suffixes: Vec<String>,
}

impl NormalizeRuleConfig {
    /// The `package` rule: release channel suffixes name the same package
    pub fn package() -> Self {
        Self {
            key: "package".to_string(),
            strip_suffixes: vec![
                " git".to_string(),
                " source release".to_string(),
                " prerelease".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_meson_layout() {
        let config = Config::default();
        assert_eq!(config.scanner.plugin_path_var, "GST_PLUGIN_PATH");
        assert_eq!(config.scanner.build_root_var, "MESON_BUILD_ROOT");
        assert_eq!(config.scanner.plugin_paths_file, "GstPluginsPath.json");
        assert_eq!(config.normalize, vec![NormalizeRuleConfig::package()]);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scanner]
            program = "/opt/gst/scanner"
            "#,
        )
        .unwrap();

        assert_eq!(config.scanner.program, PathBuf::from("/opt/gst/scanner"));
        assert_eq!(config.scanner.stderr_suffix, ".stderr");
        assert_eq!(config.normalize.len(), 1);
    }

    #[test]
    fn normalize_rules_replace_defaults() {
        let config: Config = toml::from_str(
            r#"
            [[normalize]]
            key = "version"
            strip_suffixes = ["-dirty"]
            "#,
        )
        .unwrap();

        assert_eq!(config.normalize.len(), 1);
        assert_eq!(config.normalize[0].key, "version");
        assert_eq!(config.normalize[0].strip_suffixes, vec!["-dirty"]);
    }
}
