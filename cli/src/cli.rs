//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Keep podman's remote connections pointed at a lima VM
#[derive(Parser)]
#[command(
    name = "podbridge",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Colima profile selecting the VM (`default` keeps the configured name)
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every external command to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print commands instead of running them
    #[arg(long, global = true, hide = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add or refresh the podman connections for the VM
    Connect(commands::connect::ConnectArgs),

    /// Show VM, podman and connection status
    Status,

    /// Install podman inside the VM
    Setup(commands::setup::SetupArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            profile,
            json,
            quiet,
            verbose: _,
            no_color,
            dry_run,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags {
                yes: matches!(&command, Command::Setup(args) if args.yes),
                dry_run,
                profile,
            },
        };
        let app = AppContext::new(&flags)?;

        match command {
            Command::Connect(args) => commands::connect::run(&app, &args).await,
            Command::Status => commands::status::run(&app).await,
            Command::Setup(_) => commands::setup::run(&app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
