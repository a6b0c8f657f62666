use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ioutils::{dev_sidecar_path, read_if_exists, write_file};

use super::MergeOutcome;

/// Recursively merges `source` into `target`.
///
/// - keys missing from `target` are inserted
/// - two objects merge key by key
/// - a sequence in `target` gains the source items it does not already contain
/// - anything else is overwritten by `source`
///
/// Merging the same `source` twice leaves `target` as after the first merge.
pub fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            for item in source_items {
                if !target_items.contains(&item) {
                    target_items.push(item);
                }
            }
        }
        (Value::Array(target_items), item) => {
            if !target_items.contains(&item) {
                target_items.push(item);
            }
        }
        (target, source) => *target = source,
    }
}

fn parse_manifest(path: &Path, content: Option<String>) -> Result<Map<String, Value>> {
    match content {
        Some(content) if !content.trim().is_empty() => serde_json::from_str(&content)
            .map_err(|e| Error::ManifestParseError { path: path.display().to_string(), e }),
        _ => Ok(Map::new()),
    }
}

/// Merges the manifest at `source_path` into the one at `target_path`.
///
/// A missing file on either side counts as an empty object; when both are
/// missing nothing is written. The result is pretty-printed with the target's
/// key order preserved and new keys appended. In dev mode a `.dev` sidecar
/// describing the merge is written next to the target.
///
/// # Arguments
/// * `target_path` - Manifest being written
/// * `source_path` - Manifest whose keys win on conflict
/// * `dev` - Whether to write the diagnostic sidecar
///
/// # Returns
/// * `Result<MergeOutcome>` - `Skipped` when neither file exists, `Merged` otherwise
pub fn merge_manifest(target_path: &Path, source_path: &Path, dev: bool) -> Result<MergeOutcome> {
    let target_content = read_if_exists(target_path)?;
    let source_content = read_if_exists(source_path)?;
    if target_content.is_none() && source_content.is_none() {
        return Ok(MergeOutcome::Skipped);
    }

    let mut merged = Value::Object(parse_manifest(target_path, target_content)?);
    let source = parse_manifest(source_path, source_content)?;
    merge_values(&mut merged, Value::Object(source));

    let formatted = serde_json::to_string_pretty(&merged).map_err(|e| {
        Error::ManifestParseError { path: target_path.display().to_string(), e }
    })?;
    write_file(&format!("{formatted}\n"), target_path)?;
    debug!("Merged '{}' into '{}'", source_path.display(), target_path.display());

    if dev {
        let keys = merged
            .as_object()
            .map(|map| map.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        let sidecar = format!(
            "--- MERGED MANIFEST\n{}\n\n\n--- RESULTING KEYS\n{keys}\n",
            source_path.display()
        );
        write_file(&sidecar, dev_sidecar_path(target_path))?;
    }

    Ok(MergeOutcome::Merged)
}
