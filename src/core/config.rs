//! Hardware/software configuration document.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "hw_configuration_list": [
//!     {
//!       "hw_flags": { "BOARD": "nucleo_f401re" },
//!       "sw_configuration_list": [
//!         { "name": "release", "sw_flags": { "OPT": true } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only the top-level list is mandatory. Entries of the wrong JSON type are
//! skipped without complaint; missing or mistyped flag objects count as empty.

use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};
use crate::flags::{format_number, FlagMap};
use crate::utils::io;

pub const HW_LIST_KEY: &str = "hw_configuration_list";
pub const HW_FLAGS_KEY: &str = "hw_flags";
pub const SW_LIST_KEY: &str = "sw_configuration_list";
pub const SW_FLAGS_KEY: &str = "sw_flags";
pub const SW_NAME_KEY: &str = "name";

#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub hw_entries: Vec<HwEntry>,
    /// Number of items in the hardware list, skipped ones included.
    pub hw_list_len: usize,
}

#[derive(Debug, Clone)]
pub struct HwEntry {
    /// Position in the hardware list.
    pub index: usize,
    pub flags: FlagMap,
    /// `None` when the software list is absent, not a list, or empty.
    pub sw_entries: Option<Vec<SwEntry>>,
}

#[derive(Debug, Clone)]
pub struct SwEntry {
    /// Position in the software list, skipped items included.
    pub index: usize,
    pub name: Option<String>,
    pub flags: FlagMap,
}

/// Read, parse and validate a configuration document.
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let content = io::read_input(path)?;
    let shown = path.display().to_string();
    let value: Value =
        serde_json::from_str(&content).map_err(|e| Error::config_invalid_json(shown.clone(), e))?;

    let doc = ConfigDocument::from_value(&value).map_err(|mut err| {
        if let Some(details) = err.details.as_object_mut() {
            details.insert("path".to_string(), Value::String(shown.clone()));
        }
        err
    })?;

    log_status!(
        "flags",
        "Loaded {} hardware configuration(s) from {}",
        doc.hw_entries.len(),
        shown
    );
    Ok(doc)
}

impl ConfigDocument {
    pub fn from_value(value: &Value) -> Result<Self> {
        let list = match value.get(HW_LIST_KEY) {
            Some(Value::Array(list)) => list,
            Some(other) => {
                return Err(Error::config_invalid_value(
                    HW_LIST_KEY,
                    Some(json_kind(other).to_string()),
                    "not found or is not a list in the input JSON.",
                ))
            }
            None => return Err(Error::config_missing_key(HW_LIST_KEY, None)),
        };

        let hw_entries = list
            .iter()
            .enumerate()
            .filter_map(|(index, item)| HwEntry::from_value(index, item))
            .collect();

        Ok(Self {
            hw_entries,
            hw_list_len: list.len(),
        })
    }
}

impl HwEntry {
    fn from_value(index: usize, value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let sw_entries = match obj.get(SW_LIST_KEY) {
            Some(Value::Array(list)) if !list.is_empty() => Some(
                list.iter()
                    .enumerate()
                    .filter_map(|(sw_index, item)| SwEntry::from_value(sw_index, item))
                    .collect(),
            ),
            _ => None,
        };

        Some(Self {
            index,
            flags: FlagMap::from_json(obj.get(HW_FLAGS_KEY)),
            sw_entries,
        })
    }
}

impl SwEntry {
    fn from_value(index: usize, value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            index,
            name: obj.get(SW_NAME_KEY).and_then(entry_name),
            flags: FlagMap::from_json(obj.get(SW_FLAGS_KEY)),
        })
    }
}

/// String form of a `name` field, or `None` when it is null or blank.
fn entry_name(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_list_is_rejected() {
        let err = ConfigDocument::from_value(&json!({"other": []})).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingKey);
        assert_eq!(
            err.message,
            "'hw_configuration_list' not found or is not a list in the input JSON."
        );
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = ConfigDocument::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingKey);
    }

    #[test]
    fn list_of_wrong_type_is_rejected() {
        let err = ConfigDocument::from_value(&json!({"hw_configuration_list": "not-a-list"}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["value"], "string");
    }

    #[test]
    fn malformed_entries_are_skipped_but_keep_indices() {
        let doc = ConfigDocument::from_value(&json!({
            "hw_configuration_list": [
                "junk",
                {"hw_flags": {"BOARD": "a"}},
                42,
                {"hw_flags": {"BOARD": "b"}, "sw_configuration_list": [null, {"name": "x"}]}
            ]
        }))
        .unwrap();

        assert_eq!(doc.hw_list_len, 4);
        let indices: Vec<usize> = doc.hw_entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 3]);

        let sw = doc.hw_entries[1].sw_entries.as_ref().unwrap();
        assert_eq!(sw.len(), 1);
        assert_eq!(sw[0].index, 1);
        assert_eq!(sw[0].name.as_deref(), Some("x"));
    }

    #[test]
    fn missing_or_mistyped_flags_are_empty() {
        let doc = ConfigDocument::from_value(&json!({
            "hw_configuration_list": [
                {},
                {"hw_flags": [1, 2]},
                {"hw_flags": "BOARD"}
            ]
        }))
        .unwrap();

        assert!(doc.hw_entries.iter().all(|e| e.flags.is_empty()));
    }

    #[test]
    fn empty_or_mistyped_software_list_means_none() {
        let doc = ConfigDocument::from_value(&json!({
            "hw_configuration_list": [
                {"sw_configuration_list": []},
                {"sw_configuration_list": {"name": "x"}},
                {"sw_configuration_list": [1, 2]}
            ]
        }))
        .unwrap();

        assert!(doc.hw_entries[0].sw_entries.is_none());
        assert!(doc.hw_entries[1].sw_entries.is_none());
        assert_eq!(doc.hw_entries[2].sw_entries.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn blank_and_null_names_are_unnamed() {
        assert_eq!(entry_name(&json!(null)), None);
        assert_eq!(entry_name(&json!("  ")), None);
        assert_eq!(entry_name(&json!("")), None);
        assert_eq!(entry_name(&json!("Release")), Some("Release".to_string()));
        assert_eq!(entry_name(&json!(true)), Some("true".to_string()));
        assert_eq!(entry_name(&json!(7)), Some("7".to_string()));
        assert_eq!(entry_name(&json!(2.0)), Some("2.0".to_string()));
    }

    #[test]
    fn load_document_reports_invalid_json_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flags.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
        assert_eq!(err.details["path"], path.display().to_string());
    }

    #[test]
    fn load_document_adds_path_to_validation_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flags.json");
        fs::write(&path, r#"{"hw_configuration_list": {}}"#).unwrap();

        let err = load_document(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["path"], path.display().to_string());
    }

    #[test]
    fn load_document_missing_file() {
        let err = load_document(Path::new("/nonexistent/flags.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InputNotFound);
    }
}
