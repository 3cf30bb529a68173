use std::process::ExitCode;

use clap::Parser;

use fwflags::cli::{exit_code_for_error, exit_code_to_u8, print_human_error, print_json_result};
use fwflags::config::load_document;
use fwflags::emit::{dry_run_line, emit, ensure_output_dir, EmitMode};
use fwflags::generate::plan;
use fwflags::paths::{expand_tilde, expand_user_path};
use fwflags::{log_status, EmitReport, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "generate-cmake-flags-files")]
#[command(version = VERSION)]
#[command(about = "Generate flag files from hw_flags / sw_flags in JSON.")]
struct Cli {
    /// Input JSON file
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    outdir: String,

    /// Do not write files; print what would be created.
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report instead of human-readable output.
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<EmitReport> {
    let input = expand_user_path(&cli.input, "input")?;
    let outdir = expand_tilde(&cli.outdir);

    let doc = load_document(&input)?;
    let plan = plan(&doc);
    log_status!("flags", "Planned {} flag file(s)", plan.files.len());

    // Created in dry-run mode too; only file writes are previewed.
    ensure_output_dir(&outdir)?;
    let mode = if cli.dry_run {
        EmitMode::DryRun
    } else {
        EmitMode::Write
    };

    Ok(emit(&plan, &outdir, mode))
}

fn print_report(report: &EmitReport) {
    if report.dry_run {
        for item in &report.items {
            let lines = item.lines.as_deref().unwrap_or_default();
            println!("{}", dry_run_line(&item.path, lines));
        }
        println!("Dry run completed.");
        return;
    }

    if report.written == 0 {
        println!("No files were created.");
        return;
    }

    println!("Created files ({}):", report.written);
    for path in report.written_paths() {
        println!(" - {}", path);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(&cli);

    let exit_code = match &result {
        Ok(_) => 0,
        Err(err) => exit_code_for_error(err.code),
    };

    if cli.json {
        if let Err(err) = print_json_result(&result) {
            print_human_error(&err);
            return ExitCode::from(exit_code_to_u8(exit_code_for_error(err.code)));
        }
    } else {
        match &result {
            Ok(report) => print_report(report),
            Err(err) => print_human_error(err),
        }
    }

    if let Ok(report) = &result {
        if report.failed > 0 {
            log_status!(
                "flags",
                "{} file(s) could not be written in {}",
                report.failed,
                report.output_dir
            );
        }
    }

    ExitCode::from(exit_code_to_u8(exit_code))
}
