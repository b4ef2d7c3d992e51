//! # Commands
//!
//! - `warden check` - Verify the credentials in a `.env`-style file

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod envfile;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "warden",
    version,
    about = "Classify and verify API credentials before they bite you in CI",
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

/// Arguments for the `warden check` command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// The `.env`-style file to verify.
    pub env_file: PathBuf,

    /// Classify and format-check only; never touch the network.
    #[arg(long)]
    pub offline: bool,

    /// Emit machine-readable JSON instead of styled output.
    #[arg(long)]
    pub json: bool,

    /// Fail on any invalid verdict, including unrecognised values and
    /// unreachable providers.
    #[arg(long)]
    pub strict: bool,

    /// Per-provider request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

fn main() {
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            std::process::exit(ui::exit::ERROR);
        }
    }
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Check(args) => commands::check::run(&args),
    }
}
