//! inkvault CLI - Excalidraw drawings for markdown vaults.
//!
//! Provides commands for:
//! - `render`: Render a markdown note, transclusions included, to HTML
//! - `embed`: Print the transclusion block for a drawing
//! - `new`: Create a drawing from the template
//! - `show`: Render a single transclusion
//! - `commands`: List what the plugin registers with its host

mod commands;
mod error;
mod host;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommandsArgs, EmbedArgs, NewArgs, RenderArgs, ShowArgs};
use error::CliError;
use output::Output;

/// inkvault - Excalidraw drawings for markdown vaults.
#[derive(Parser)]
#[command(name = "ink", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown note with its drawings to HTML.
    Render(RenderArgs),
    /// Print the transclusion code block for a drawing.
    Embed(EmbedArgs),
    /// Create a new drawing.
    New(NewArgs),
    /// Render one transclusion block body.
    Show(ShowArgs),
    /// List registered commands, views and code block languages.
    Commands(CommandsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Render(args) => args.execute(),
        Commands::Embed(args) => args.execute(),
        Commands::New(args) => args.execute(),
        Commands::Show(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(args.execute())
        }
        Commands::Commands(args) => args.execute(),
    }
}
