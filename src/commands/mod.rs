//! Command-line interface for engage.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! entry point. Commands that only touch the local store are synchronous;
//! `serve` is the one async command.

pub mod export;
pub mod import;
pub mod init;
pub mod query;
pub mod seed;
pub mod serve;
pub mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Load the sample engagement records into the database")]
    Seed(seed::SeedArgs),
    #[command(about = "Filter engagement records and print the summary")]
    Query(query::QueryArgs),
    #[command(about = "Export filtered engagement records as CSV")]
    Export(export::ExportArgs),
    #[command(about = "Import engagement records from a CSV file", arg_required_else_help = true)]
    Import(import::ImportArgs),
    #[command(about = "Show a single stored engagement log", arg_required_else_help = true)]
    Show(show::ShowArgs),
    #[command(about = "Run the REST service")]
    Serve(serve::ServeArgs),
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
            Commands::Init(args) => init::cmd(args),
            Commands::Seed(args) => seed::cmd(args),
            Commands::Query(args) => query::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Show(args) => show::cmd(args),
            Commands::Serve(args) => serve::cmd(args).await,
        }
    }
}
