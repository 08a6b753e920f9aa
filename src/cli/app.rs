//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use devbar::output::OutputMode;

/// devbar - Page audits and database virtual modules for dev servers
#[derive(Parser, Debug)]
#[command(
    name = "devbar",
    version,
    about = "Page audits and database virtual modules for dev servers",
    long_about = "Audit captured pages for accessibility and performance issues,\n\
                  and inspect the database virtual modules served to the bundler.\n\n\
                  Settings are read from devbar.toml in the project root."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default devbar.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Audit a page snapshot, or every snapshot under a directory
    Audit {
        /// Snapshot file or directory
        path: PathBuf,
    },

    /// List the effective audit rules
    Rules,

    /// Resolve a module id as the bundler would
    Resolve {
        /// Requested module id
        id: String,

        /// File importing the module
        #[arg(short, long)]
        importer: Option<String>,

        /// Resolve for managed mode
        #[arg(long)]
        managed: bool,
    },

    /// Print the source of a module, seeding the local store when required
    Load {
        /// Module id; virtual ids may be given with or without the NUL prefix
        id: String,

        /// Load for managed mode
        #[arg(long)]
        managed: bool,
    },

    /// Open a source location in the editor of a running dev server
    #[cfg(feature = "editor")]
    Open {
        /// `file[:line:column]`
        location: String,

        /// Dev server address
        #[arg(long, default_value = devbar::adapters::editor::DEFAULT_SERVER)]
        server: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let root = cli.root;

    match cli.command {
        Some(Command::Init { force }) => commands::init(&root, force, output_mode),
        Some(Command::Audit { path }) => commands::audit(&root, &path, output_mode),
        Some(Command::Rules) => commands::rules(&root, output_mode),
        Some(Command::Resolve {
            id,
            importer,
            managed,
        }) => commands::resolve(&root, &id, importer.as_deref(), managed, output_mode),
        Some(Command::Load { id, managed }) => commands::load(&root, &id, managed, output_mode),
        #[cfg(feature = "editor")]
        Some(Command::Open { location, server }) => commands::open(&location, &server, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": devbar::VERSION
                    })
                );
            } else {
                println!("devbar v{}", devbar::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": devbar::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("devbar v{}", devbar::VERSION);
                println!("\nRun 'devbar --help' for usage");
                println!("Run 'devbar init' to get started");
            }
            Ok(())
        },
    }
}
