use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{
    CheckArgs, DumpArgs, LocateArgs, LookupArgs, StatsArgs, run_check, run_dump, run_locate,
    run_lookup, run_stats,
};
use crate::config::CliConfig;
use crate::error::Result;
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "tscat",
    about = "Inspect and check Qt Linguist .ts translation catalogs",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Overrides TSCAT_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve one string, falling back to the source text.
    Lookup(LookupArgs),

    /// Translation statistics and coverage per file.
    Stats(StatsArgs),

    /// Lint finished translations; exits 1 on errors.
    Check(CheckArgs),

    /// Print every message as a JSON line.
    Dump(DumpArgs),

    /// Find the catalog file for a locale.
    Locate(LocateArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Dispatch `cli`, writing command output to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Lookup(args) => run_lookup(args, &config, out),
        Commands::Stats(args) => run_stats(args, &config, out),
        Commands::Check(args) => run_check(args, &config, out),
        Commands::Dump(args) => run_dump(args, out),
        Commands::Locate(args) => run_locate(args, out),
    }
}
