//! Integration tests for the documentation cache generator

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;

    pub fn generator() -> Command {
        let mut cmd = cargo_bin_cmd!("gst-plugins-doc-cache-generator");
        cmd.env_remove("GST_DOC_CACHE_CONFIG")
            .env_remove("GST_HOTDOC_PLUGINS_SCANNER")
            .env_remove("MESON_BUILD_ROOT")
            .env_remove("GST_PLUGIN_PATH");
        cmd
    }

    pub fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn help_displays() {
        generator()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("hotdoc-config"));
    }

    #[test]
    fn version_displays() {
        generator()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gst-plugins-doc-cache-generator"));
    }

    #[test]
    fn missing_arguments_fail() {
        generator().arg("cache.json").assert().failure();
    }

    #[test]
    fn hotdoc_config_writes_one_file_per_plugin() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("gst_plugins_cache.json");
        std::fs::write(&cache, r#"{"a": {}, "b": {}}"#).unwrap();

        let assert = generator()
            .args(["hotdoc-config", "--builddir"])
            .arg(dir.path())
            .arg("--gst_cache_file")
            .arg(&cache)
            .args(["--sitemap", "sitemap.txt", "--index", "index.md"])
            .args(["--gst_c_sources", "a.c", "b.c"])
            .args(["--project_version", "1.24"])
            .assert()
            .success();

        let a = dir.path().join("plugin-a.json");
        let b = dir.path().join("plugin-b.json");
        let sep = if cfg!(windows) { ";" } else { ":" };
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        assert_eq!(
            stdout.trim_end(),
            format!("{}{}{}", a.display(), sep, b.display())
        );

        let record = read_json(&b);
        assert_eq!(record["project_name"], "b");
        assert_eq!(record["output"], "plugin-b");
        assert_eq!(record["gst_c_sources"], json!(["a.c", "b.c"]));
        assert_eq!(record["project_version"], "1.24");
    }

    #[test]
    fn hotdoc_config_missing_cache_fails() {
        let dir = TempDir::new().unwrap();

        generator()
            .args(["hotdoc-config", "--builddir"])
            .arg(dir.path())
            .arg("--gst_cache_file")
            .arg(dir.path().join("absent.json"))
            .args(["--sitemap", "s", "--index", "i"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn missing_scanner_fails_to_spawn() {
        let dir = TempDir::new().unwrap();

        generator()
            .arg("--scanner")
            .arg(dir.path().join("no-such-scanner"))
            .arg(dir.path().join("cache.json"))
            .arg(dir.path().join("out.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to spawn scanner"));
    }
}

#[cfg(unix)]
mod scan_tests {
    use super::cli_tests::{generator, read_json};
    use predicates::prelude::*;
    use serde_json::json;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Fake scanner printing a warning and writing `scan` to its output
    fn fake_scanner(dir: &Path, scan: &str) -> PathBuf {
        let path = dir.join("fake-scanner");
        let body = format!(
            "#!/bin/sh\necho 'GLib-WARNING: plugin still being built' >&2\ncat > \"$1\" <<'JSON'\n{scan}\nJSON\n"
        );
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn failing_scanner(dir: &Path) -> PathBuf {
        let path = dir.join("failing-scanner");
        std::fs::write(
            &path,
            "#!/bin/sh\necho 'could not load libgstbroken.so' >&2\nexit 2\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[serial]
    fn first_scan_creates_cache_and_output() {
        let dir = TempDir::new().unwrap();
        let scanner = fake_scanner(
            dir.path(),
            r#"{"coreelements": {"package": "GStreamer git", "elements": {"queue": {"rank": "none"}}}}"#,
        );
        let cache = dir.path().join("gst_plugins_cache.json");
        let output = dir.path().join("plugins.json");

        generator()
            .env("MESON_BUILD_ROOT", dir.path())
            .arg("--scanner")
            .arg(&scanner)
            .arg(&cache)
            .arg(&output)
            .arg("/build/libgstcoreelements.so")
            .assert()
            .success()
            .stderr(predicate::str::contains("GLib-WARNING").not());

        let expected = json!({
            "coreelements": {"package": "GStreamer", "elements": {"queue": {"rank": "none"}}}
        });
        assert_eq!(read_json(&cache), expected);
        assert_eq!(read_json(&output), expected);
        assert!(std::fs::read_to_string(dir.path().join("plugins.json.stderr"))
            .unwrap()
            .contains("GLib-WARNING"));
    }

    #[test]
    #[serial]
    fn unstable_values_keep_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let scanner = fake_scanner(dir.path(), r#"{"coreelements": {"rank": "secondary"}}"#);
        let cache = dir.path().join("gst_plugins_cache.json");
        let output = dir.path().join("plugins.json");
        let original = r#"{"coreelements": {"rank": "primary", "unstable-values": "rank"}}"#;
        std::fs::write(&cache, original).unwrap();

        generator()
            .arg("--scanner")
            .arg(&scanner)
            .arg(&cache)
            .arg(&output)
            .assert()
            .success();

        assert_eq!(std::fs::read_to_string(&cache).unwrap(), original);
        assert_eq!(read_json(&output)["coreelements"]["rank"], "primary");
    }

    #[test]
    #[serial]
    fn failing_scanner_replays_its_stderr() {
        let dir = TempDir::new().unwrap();
        let scanner = failing_scanner(dir.path());

        generator()
            .arg("--scanner")
            .arg(&scanner)
            .arg(dir.path().join("cache.json"))
            .arg(dir.path().join("out.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not load libgstbroken.so"))
            .stderr(predicate::str::contains("exit code 2"));

        assert!(!dir.path().join("cache.json").exists());
    }

    #[test]
    #[serial]
    fn undecodable_scan_is_reported() {
        let dir = TempDir::new().unwrap();
        let scanner = fake_scanner(dir.path(), "{not json");

        generator()
            .arg("--scanner")
            .arg(&scanner)
            .arg(dir.path().join("cache.json"))
            .arg(dir.path().join("out.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not decode:\n{not json"));
    }

    #[test]
    #[serial]
    fn config_file_selects_scanner() {
        let dir = TempDir::new().unwrap();
        let scanner = fake_scanner(dir.path(), r#"{"a": {"v": 1}}"#);
        let config = dir.path().join("doc-cache.toml");
        std::fs::write(
            &config,
            format!("[scanner]\nprogram = \"{}\"\n", scanner.display()),
        )
        .unwrap();
        let output = dir.path().join("out.json");

        generator()
            .arg("--config")
            .arg(&config)
            .arg(dir.path().join("cache.json"))
            .arg(&output)
            .assert()
            .success();

        assert_eq!(read_json(&output), json!({"a": {"v": 1}}));
    }
}
