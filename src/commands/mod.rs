pub mod autostart;
pub mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the application, driving the shell process on stdin/stdout")]
    Run,
    #[command(about = "Manage starting at login", arg_required_else_help = true)]
    Autostart(autostart::AutostartArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Run => run::cmd().await,
            Commands::Autostart(args) => autostart::cmd(args),
        }
    }
}
