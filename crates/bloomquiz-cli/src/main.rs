//! bloomquiz CLI — interactive console for Bloom's Taxonomy quiz questions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod console;

#[derive(Parser)]
#[command(
    name = "bloomquiz",
    version,
    about = "Author and manage quiz questions by Bloom's Taxonomy level"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not clear the screen between menus
    #[arg(long, global = true)]
    no_clear: bool,

    /// Do not wait for Enter after each screen
    #[arg(long, global = true)]
    no_pause: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive question manager (default)
    Interactive,

    /// Create a starter bloomquiz.toml
    Init,
}

fn main() {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "bloomquiz=debug"
    } else {
        "bloomquiz=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("static directive is valid")),
        )
        .init();

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => commands::interactive::execute(
            cli.config,
            commands::interactive::Overrides {
                no_clear: cli.no_clear,
                no_pause: cli.no_pause,
            },
        ),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
