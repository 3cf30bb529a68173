use clap::Parser;

use fwflags::artifact_name::build_artifact_name;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "build-artifact-name")]
#[command(version = VERSION)]
#[command(about = "Build artifact name")]
struct Cli {
    /// Project name
    #[arg(short, long)]
    project: String,

    /// Configuration name (e.g. hw_board_debug)
    #[arg(short, long)]
    config: String,

    /// GitHub tag name
    #[arg(short, long)]
    tag: String,
}

fn main() {
    let cli = Cli::parse();
    println!("{}", build_artifact_name(&cli.project, &cli.config, &cli.tag));
}
