mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add_section, drop_element, edit, init, list, new, palette, publish, show, AddSectionArgs, Context, DropArgs,
    EditArgs, InitArgs, ListArgs, NewArgs, PaletteArgs, PublishArgs, ShowArgs,
};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Webara CLI - drag-and-drop website builder
#[derive(Parser, Debug)]
#[command(name = "webara")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of config and RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a webara.config.json in the current directory
    Init(InitArgs),

    /// Create a new project
    New(NewArgs),

    /// List projects, most recently updated first
    List(ListArgs),

    /// Print a project's canvas outline
    Show(ShowArgs),

    /// Append an empty section to a region
    AddSection(AddSectionArgs),

    /// Drop a palette item onto the canvas
    Drop(DropArgs),

    /// Patch an element's label, content or styles
    Edit(EditArgs),

    /// Publish a project under its derived URL
    Publish(PublishArgs),

    /// List draggable elements and premade components
    Palette(PaletteArgs),
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    init_tracing(&config, cli.verbose);

    let mut ctx = Context::new(cwd, config);

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::New(args) => new(args, &mut ctx).await,
        Command::List(args) => list(args, &mut ctx).await,
        Command::Show(args) => show(args, &mut ctx).await,
        Command::AddSection(args) => add_section(args, &mut ctx).await,
        Command::Drop(args) => drop_element(args, &mut ctx).await,
        Command::Edit(args) => edit(args, &mut ctx).await,
        Command::Publish(args) => publish(args, &mut ctx).await,
        Command::Palette(args) => palette(args),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => run(cli, &cwd).await,
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
