use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use onestop::config;
use onestop::desk::PolicyDesk;
use onestop::interview::Interview;
use onestop::session;

#[derive(Parser, Debug)]
#[command(name = "onestop", version, about = "One Stop Insurance policy desk")]
struct Cli {
    /// Pricing constants and the next policy number.
    #[arg(long, env = "ONESTOP_CONSTANTS", default_value = "Const.dat", global = true)]
    constants: PathBuf,

    /// Append-only policy log, one JSON object per line.
    #[arg(long, env = "ONESTOP_POLICIES", default_value = "policies.json", global = true)]
    policies: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive policy entry (the default).
    Run,
    /// Write a starter constants file; refuses to overwrite.
    Init,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Run) {
        Command::Init => {
            config::init(&cli.constants)?;
            println!("Wrote starter constants to {}", cli.constants.display());
        }
        Command::Run => {
            let mut desk = PolicyDesk::open(&cli.constants, &cli.policies)
                .with_context(|| "cannot start without pricing constants")?;
            let stdin = io::stdin();
            let mut interview = Interview::new(stdin.lock(), io::stdout());
            let issued = session::run(&mut desk, &mut interview)?;
            info!(issued, "exiting");
        }
    }
    Ok(())
}
