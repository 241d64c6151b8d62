//! pbm CLI - reorganize a Chromium `Bookmarks` file

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod cmd;

/// pbm - Rearrange browser bookmarks into date folders
#[derive(Parser)]
#[command(name = "pbm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a step sequence over a bookmarks file
    Organize {
        /// Path to the Chromium `Bookmarks` file
        path: PathBuf,

        /// Comma-separated step names (default: from config, else the default sequence)
        #[arg(short, long, value_delimiter = ',')]
        steps: Option<Vec<String>>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Step option override, repeatable (e.g. -o datefolders.mode=merge)
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Write the result here instead of replacing the input
        #[arg(long)]
        output: Option<PathBuf>,

        /// Show the diff without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Number of diff context lines (default: 3)
        #[arg(short = 'U', long, default_value = "3")]
        context: usize,
    },
    /// List links in walk order
    Print {
        /// Path to the Chromium `Bookmarks` file
        path: PathBuf,

        /// Sort by date modified, else date added (undated links first)
        #[arg(short = 'd', long)]
        by_date: bool,

        /// Reverse the listing
        #[arg(short, long)]
        reverse: bool,

        /// Include skipped folders and non-navigable links
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = cmd::print::PrintFormat::Text)]
        format: cmd::print::PrintFormat,
    },
    /// List the Bookmarks files of installed Chrome and Chromium profiles
    Profiles {
        /// Also list backups (every file named Bookmarks*)
        #[arg(short = 'L', long)]
        backups: bool,
    },
    /// List available steps and the default sequence
    Steps,
    /// Show the effective configuration
    Config {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print an annotated example configuration
        #[arg(long)]
        example: bool,
    },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Organize { path, steps, config, options, output, dry_run, yes, context } => {
            cmd::organize::run(cmd::organize::OrganizeArgs {
                path,
                steps,
                config,
                options,
                output,
                dry_run,
                yes,
                context,
            })
        }
        Commands::Print { path, by_date, reverse, all, format } => cmd::print::run(cmd::print::PrintArgs {
            path: &path,
            by_date,
            reverse,
            all,
            format,
        }),
        Commands::Profiles { backups } => cmd::profiles::run(backups),
        Commands::Steps => cmd::steps::run(),
        Commands::Config { config, example } => cmd::config::run(config.as_deref(), example),
    }
}
