//! Flag file planning.
//!
//! Every hardware entry produces one file per software entry (hardware flags
//! overlaid with the software flags) or, without a software list, a single
//! file holding the hardware flags alone. File names are derived from the
//! hardware flag values so that boards sort and group naturally on disk.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{ConfigDocument, HwEntry, SwEntry};
use crate::flags::FlagMap;
use crate::utils::slugify::sanitize_filename_token;

pub const FLAG_FILE_EXT: &str = ".txt";

const TOKEN_SEPARATOR: &str = "_";

/// One file to be produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagFile {
    pub file_name: String,
    pub hw_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_index: Option<usize>,
    pub flags: FlagMap,
}

impl FlagFile {
    pub fn content(&self) -> String {
        self.flags.render()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub files: Vec<FlagFile>,
    /// File names produced more than once, in first-seen order. Later files
    /// overwrite earlier ones on disk.
    pub collisions: Vec<String>,
}

/// Filename stem shared by every file of one hardware entry.
///
/// Joins the sanitized non-blank hardware flag values in key order; falls
/// back to `hw{index}` when there are none.
pub fn hw_filename_base(flags: &FlagMap, hw_index: usize) -> String {
    let tokens: Vec<String> = flags
        .values()
        .filter(|v| !v.is_blank())
        .map(|v| sanitize_filename_token(Some(v.to_string().as_str())))
        .collect();

    if tokens.is_empty() {
        format!("hw{}", hw_index)
    } else {
        tokens.join(TOKEN_SEPARATOR)
    }
}

/// File name for one software entry under `hw_base`.
pub fn sw_file_name(hw_base: &str, sw: &SwEntry) -> String {
    match &sw.name {
        Some(name) => format!(
            "{}{}{}{}",
            hw_base,
            TOKEN_SEPARATOR,
            sanitize_filename_token(Some(name.as_str())),
            FLAG_FILE_EXT
        ),
        None if sw.index == 0 => format!("{}{}", hw_base, FLAG_FILE_EXT),
        None => format!(
            "{}{}sw-conf{}{}",
            hw_base, TOKEN_SEPARATOR, sw.index, FLAG_FILE_EXT
        ),
    }
}

fn plan_hw_entry(hw: &HwEntry) -> Vec<FlagFile> {
    let base = hw_filename_base(&hw.flags, hw.index);

    match &hw.sw_entries {
        Some(sw_entries) => sw_entries
            .iter()
            .map(|sw| FlagFile {
                file_name: sw_file_name(&base, sw),
                hw_index: hw.index,
                sw_index: Some(sw.index),
                flags: hw.flags.merged_with(&sw.flags),
            })
            .collect(),
        None => vec![FlagFile {
            file_name: format!("{}{}", base, FLAG_FILE_EXT),
            hw_index: hw.index,
            sw_index: None,
            flags: hw.flags.clone(),
        }],
    }
}

/// Plan every flag file described by the document, in input order.
pub fn plan(doc: &ConfigDocument) -> GenerationPlan {
    let files: Vec<FlagFile> = doc.hw_entries.iter().flat_map(plan_hw_entry).collect();

    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut collisions = Vec::new();
    for file in &files {
        let count = seen.entry(file.file_name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            collisions.push(file.file_name.clone());
        }
    }

    for name in &collisions {
        log_status!(
            "flags",
            "Warning: '{}' is generated more than once; the last one wins",
            name
        );
    }

    let skipped = doc.hw_list_len - doc.hw_entries.len();
    if skipped > 0 {
        log_status!("flags", "Skipped {} non-object hardware entries", skipped);
    }

    GenerationPlan { files, collisions }
}
