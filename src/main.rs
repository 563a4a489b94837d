//! CLI entry point for postdex

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postdex::commands::build::BuildOptions;

#[derive(Parser)]
#[command(name = "postdex")]
#[command(version)]
#[command(about = "Post indexes and related-article recommendations for static blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the indexes and write the JSON snapshot
    #[command(alias = "b")]
    Build {
        /// Seed for related-list padding (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rebuild when posts, data files or config change
        #[arg(short, long)]
        watch: bool,
    },

    /// List indexed content
    List {
        /// What to list (post, author, editor, topic, funnel, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a post and its recommendations
    Show {
        /// Post slug
        slug: String,

        /// Seed for related-list padding
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Delete the written snapshot
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdex=debug,info"
    } else {
        "postdex=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Build {
            seed,
            output,
            watch,
        } => {
            let site = postdex::Site::new(&base_dir)?;
            let options = BuildOptions { seed, output };

            tracing::info!("Building indexes for {:?}", site.base_dir);
            postdex::commands::build::run(&site, &options)?;

            if watch {
                postdex::commands::build::watch(&site, &options)?;
            }
        }

        Commands::List { r#type } => {
            let site = postdex::Site::new(&base_dir)?;
            postdex::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { slug, seed } => {
            let site = postdex::Site::new(&base_dir)?;
            postdex::commands::show::run(&site, &slug, seed)?;
        }

        Commands::Clean => {
            let site = postdex::Site::new(&base_dir)?;
            postdex::commands::clean::run(&site)?;
        }

        Commands::Version => {
            println!("postdex version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
