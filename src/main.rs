use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;

#[derive(Parser)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: MdpressCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "mdpress.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "mdpress.yaml")]
    config_file: Option<PathBuf>,

    /// Print what would be deleted without deleting anything
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum MdpressCommand {
    /// Initialize a new mdpress project
    Init(InitArgs),

    /// Build the site
    Build(BuildArgs),

    /// Delete the generated output
    Clean(CleanArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        MdpressCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        MdpressCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        MdpressCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
