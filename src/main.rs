//! CLI entry point for quill-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "A markdown blog content engine with course-style post modules", long_about = None)]
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
    /// Initialize a new Quill site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Module to place the post in
        #[arg(short, long)]
        module: Option<String>,

        /// Mark the new post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, module, tag, featured)
        #[arg(default_value = "post")]
        r#type: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Include draft posts in listings
        #[arg(long)]
        drafts: bool,
    },

    /// Show a single post with its module context
    Show {
        /// Slug of the post
        slug: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quill_rs=debug,info"
    } else {
        "quill_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing Quill site in {:?}", target_dir);
            quill_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty Quill site in {:?}", target_dir);
        }

        Commands::New {
            title,
            module,
            draft,
        } => {
            let quill = quill_rs::Quill::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            quill_rs::commands::new::create_post(&quill, &title, module.as_deref(), draft)?;
        }

        Commands::List {
            r#type,
            json,
            drafts,
        } => {
            let mut quill = quill_rs::Quill::new(&base_dir)?;
            if drafts {
                quill.config.include_drafts = true;
            }
            quill_rs::commands::list::run(&quill, &r#type, json)?;
        }

        Commands::Show { slug, json } => {
            let quill = quill_rs::Quill::new(&base_dir)?;
            quill_rs::commands::show::run(&quill, &slug, json)?;
        }
    }

    Ok(())
}
