//! Public output types for flag file generation.
//!
//! These are what the generator command prints (human or JSON) and what
//! library callers get back from `emit`.

use serde::Serialize;

/// Result of emitting one planned flag file.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmitItem {
    pub path: String,
    pub status: EmitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rendered flag lines (filled for dry runs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmitStatus {
    Written,
    Failed,
    DryRun,
}

/// Summary of one generator run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitReport {
    pub dry_run: bool,
    pub output_dir: String,
    pub written: u32,
    pub failed: u32,
    pub items: Vec<EmitItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<String>,
}

impl EmitReport {
    pub fn new(output_dir: String, dry_run: bool) -> Self {
        Self {
            dry_run,
            output_dir,
            ..Self::default()
        }
    }

    pub fn record_written(&mut self, path: String) {
        self.written += 1;
        self.items.push(EmitItem {
            path,
            status: EmitStatus::Written,
            error: None,
            lines: None,
        });
    }

    pub fn record_failed(&mut self, path: String, error: String) {
        self.failed += 1;
        self.items.push(EmitItem {
            path,
            status: EmitStatus::Failed,
            error: Some(error),
            lines: None,
        });
    }

    pub fn record_dry_run(&mut self, path: String, lines: Vec<String>) {
        self.items.push(EmitItem {
            path,
            status: EmitStatus::DryRun,
            error: None,
            lines: Some(lines),
        });
    }

    /// Paths written successfully, in emission order.
    pub fn written_paths(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.status == EmitStatus::Written)
            .map(|item| item.path.as_str())
    }
}
