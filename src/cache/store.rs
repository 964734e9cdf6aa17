//! Whole-file JSON persistence for plugin caches
//!
//! Reads keep the key order of the file. Writes sort keys at every depth,
//! indent by four spaces and keep non-ASCII text as-is, so that an
//! unchanged cache serializes to identical bytes.

use super::PluginCache;
use crate::error::{DocCacheError, DocCacheResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load a cache, treating a missing file as an empty cache
pub async fn load_or_empty(path: &Path) -> DocCacheResult<PluginCache> {
    match fs::read_to_string(path).await {
        Ok(content) => parse_object(path, &content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No cache at {}, starting empty", path.display());
            Ok(PluginCache::new())
        }
        Err(e) => Err(DocCacheError::io(
            format!("reading cache {}", path.display()),
            e,
        )),
    }
}

/// Load a JSON object that must exist
pub async fn load_ordered(path: &Path) -> DocCacheResult<PluginCache> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| DocCacheError::io(format!("reading {}", path.display()), e))?;

    parse_object(path, &content)
}

/// Parse `content` as a JSON object, keeping key order
///
/// Undecodable content is echoed to stderr before the error is returned.
pub fn parse_object(path: &Path, content: &str) -> DocCacheResult<PluginCache> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DocCacheError::NotAnObject(path.to_path_buf())),
        Err(source) => {
            eprintln!("Could not decode:\n{}", content);
            Err(DocCacheError::JsonDecode {
                path: path.to_path_buf(),
                content: content.to_string(),
                source,
            })
        }
    }
}

/// Serialize `value` with four-space indentation, keeping field order
pub fn to_indented_json<T: Serialize>(value: &T) -> DocCacheResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Serialize `value` with sorted keys and four-space indentation
pub fn to_sorted_json<T: Serialize>(value: &T) -> DocCacheResult<Vec<u8>> {
    to_indented_json(&sort_keys(serde_json::to_value(value)?))
}

/// Write a cache with sorted keys, replacing any existing file
pub async fn write_sorted(path: &Path, cache: &PluginCache) -> DocCacheResult<()> {
    let content = to_sorted_json(cache)?;
    fs::write(path, content)
        .await
        .map_err(|e| DocCacheError::io(format!("writing {}", path.display()), e))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
