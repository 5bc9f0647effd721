//! Plume CLI - headless driver for the fountain and smoke simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, keys, run};

#[derive(Parser)]
#[command(name = "plume")]
#[command(about = "Fountain and smoke particle simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation without a window and report the final state
    Run {
        /// Path to a simulation config file
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Seed for the random generator (entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Keys to press before a frame, as FRAME:KEYS (e.g. "30:GGw")
        #[arg(long = "input", value_parser = parse_input)]
        inputs: Vec<run::ScheduledInput>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Log live counts every N frames (0 disables)
        #[arg(long, default_value_t = 0)]
        report_every: u64,
    },

    /// Write the default simulation config
    Init {
        /// Path of the config file to create
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List key bindings
    Keys {
        /// Path to a simulation config file with a [keys] table
        #[arg(long)]
        config: Option<String>,
    },
}

fn parse_input(s: &str) -> Result<run::ScheduledInput, String> {
    let (frame, keys) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:KEYS, got '{}'", s))?;
    let frame: u64 = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame: {}", e))?;
    if keys.is_empty() {
        return Err("no keys given".to_string());
    }
    Ok(run::ScheduledInput {
        frame,
        keys: keys.to_string(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run {
            config,
            frames,
            seed,
            inputs,
            format,
            report_every,
        } => run::run(run::RunArgs {
            config,
            frames,
            seed,
            inputs,
            format,
            report_every,
        }),
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Keys { config } => keys::run(config.as_deref()),
    }
}
