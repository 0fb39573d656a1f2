use anyhow::Result;
use clap::{Parser, Subcommand};
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for kdct")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// Run fmt, then clippy
    Analyze,
    /// Run the demo matching the detected features
    Demo,
    /// Run the criterion benches in kdct-bench
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    match cli.command {
        Commands::Build => run(build_command(&cfg))?,
        Commands::Test => run(test_command(&cfg))?,
        Commands::Clippy => run(clippy_command())?,
        Commands::Fmt => run(fmt_command())?,
        Commands::Analyze => {
            run(fmt_command())?;
            run(clippy_command())?
        }
        Commands::Demo => run(demo_command(&cfg))?,
        Commands::Bench => run(bench_command(&cfg))?,
    };
    Ok(())
}
