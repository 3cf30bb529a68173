//! Writing planned flag files, or previewing them in a dry run.

use std::path::Path;

use crate::error::Result;
use crate::generate::GenerationPlan;
use crate::output::EmitReport;
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    Write,
    DryRun,
}

/// Create the output directory (and parents).
pub fn ensure_output_dir(outdir: &Path) -> Result<()> {
    io::create_dir_all(outdir)
}

/// Emit every planned file into `outdir`.
///
/// Write failures are recorded per file and never stop the remaining files.
/// The output directory must already exist for `EmitMode::Write`.
pub fn emit(plan: &GenerationPlan, outdir: &Path, mode: EmitMode) -> EmitReport {
    let mut report = EmitReport::new(outdir.display().to_string(), mode == EmitMode::DryRun);
    report.collisions = plan.collisions.clone();

    for file in &plan.files {
        let path = outdir.join(&file.file_name);
        let shown = path.display().to_string();

        match mode {
            EmitMode::DryRun => report.record_dry_run(shown, file.flags.to_lines()),
            EmitMode::Write => match io::write_file(&path, &file.content()) {
                Ok(()) => {
                    log_status!("flags", "Wrote {} ({} flags)", shown, file.flags.len());
                    report.record_written(shown);
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    report.record_failed(shown, err.message);
                }
            },
        }
    }

    report
}

/// Dry-run line for one file: `[DRY RUN] <path> -> <lines>`.
pub fn dry_run_line(path: &str, lines: &[String]) -> String {
    let combined = if lines.is_empty() {
        "(no flags)".to_string()
    } else {
        lines.join("\n")
    };
    format!("[DRY RUN] {} -> {}", path, combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigDocument;
    use crate::generate::plan;
    use crate::output::EmitStatus;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample_plan() -> GenerationPlan {
        let doc = ConfigDocument::from_value(&json!({
            "hw_configuration_list": [
                {"hw_flags": {"BOARD": "nucleo", "OPT": true}},
                {"hw_flags": {"BOARD": "disco"}, "sw_configuration_list": [
                    {"sw_flags": {"LOG": 1}},
                    {"name": "lp", "sw_flags": {"LOG": 0}}
                ]}
            ]
        }))
        .unwrap();
        plan(&doc)
    }

    #[test]
    fn writes_every_planned_file() {
        let dir = TempDir::new().unwrap();
        let report = emit(&sample_plan(), dir.path(), EmitMode::Write);

        assert_eq!(report.written, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("nucleo_on.txt")).unwrap(),
            "-DBOARD=nucleo\n-DOPT=ON\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("disco_lp.txt")).unwrap(),
            "-DBOARD=disco\n-DLOG=0\n"
        );
        assert!(dir.path().join("disco.txt").is_file());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let outdir = dir.path().join("never-created");
        let report = emit(&sample_plan(), &outdir, EmitMode::DryRun);

        assert!(report.dry_run);
        assert_eq!(report.written, 0);
        assert_eq!(report.items.len(), 3);
        assert!(report.items.iter().all(|i| i.status == EmitStatus::DryRun));
        assert!(!outdir.exists());
    }

    #[test]
    fn write_failure_does_not_stop_later_files() {
        let dir = TempDir::new().unwrap();
        // A directory squatting on the first file name makes that write fail.
        fs::create_dir(dir.path().join("nucleo_on.txt")).unwrap();

        let report = emit(&sample_plan(), dir.path(), EmitMode::Write);

        assert_eq!(report.failed, 1);
        assert_eq!(report.written, 2);
        assert_eq!(report.items[0].status, EmitStatus::Failed);
        assert!(dir.path().join("disco_lp.txt").is_file());
    }

    #[test]
    fn ensure_output_dir_creates_parents() {
        let dir = TempDir::new().unwrap();
        let outdir = dir.path().join("build").join("flags");
        ensure_output_dir(&outdir).unwrap();
        assert!(outdir.is_dir());
    }

    #[test]
    fn dry_run_line_format() {
        assert_eq!(
            dry_run_line("out/a.txt", &["-DA=1".to_string(), "-DB".to_string()]),
            "[DRY RUN] out/a.txt -> -DA=1\n-DB"
        );
        assert_eq!(dry_run_line("out/e.txt", &[]), "[DRY RUN] out/e.txt -> (no flags)");
    }
}
