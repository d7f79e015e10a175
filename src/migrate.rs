//! Back-fill migration for persisted app data.
//!
//! Older persisted blobs may predate the `accessCount`, `icon`,
//! `lastAccessed` and `aspect` fields. Migration is a pure transform from
//! the raw JSON value to a typed [`AppData`]: it defaults any missing field
//! and never removes or renames one, so applying it twice yields the same
//! result as applying it once. The same transform validates the shape of
//! imported files.

use log::debug;
use serde_json::{json, Value};

use crate::{AppData, HubError, Result, DEFAULT_GROUP_ICON};

/// Parses a raw serialized blob into a back-filled [`AppData`].
pub fn migrate_raw(raw: &str) -> Result<AppData> {
    let value: Value = serde_json::from_str(raw)?;
    migrate_value(value)
}

/// Applies shape validation and field back-fill to a parsed JSON value.
pub fn migrate_value(mut value: Value) -> Result<AppData> {
    let root = value.as_object_mut().ok_or_else(|| HubError::InvalidData {
        message: "root is not an object".to_string(),
    })?;

    for key in ["groups", "items", "stats"] {
        if !root.get(key).map(Value::is_array).unwrap_or(false) {
            return Err(HubError::InvalidData {
                message: format!("missing or non-array field: {}", key),
            });
        }
    }

    let mut backfilled = 0usize;

    if let Some(groups) = root.get_mut("groups").and_then(Value::as_array_mut) {
        for group in groups.iter_mut().filter_map(Value::as_object_mut) {
            backfilled += fill(group, "accessCount", json!(0));
            backfilled += fill(group, "icon", json!(DEFAULT_GROUP_ICON));
        }
    }

    if let Some(items) = root.get_mut("items").and_then(Value::as_array_mut) {
        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            backfilled += fill(item, "accessCount", json!(0));
            backfilled += fill(item, "lastAccessed", Value::Null);
            backfilled += fill(item, "aspect", json!("default"));
        }
    }

    if backfilled > 0 {
        debug!("back-filled {} missing fields during load", backfilled);
    }

    serde_json::from_value(value).map_err(HubError::Serialization)
}

fn fill(obj: &mut serde_json::Map<String, Value>, key: &str, default: Value) -> usize {
    if obj.contains_key(key) {
        0
    } else {
        obj.insert(key.to_string(), default);
        1
    }
}
