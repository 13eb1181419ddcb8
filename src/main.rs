//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::content::ContentKind;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Build and serve a portfolio site with per-post like counters", long_about = None)]
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

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Post,
    Project,
}

impl From<Kind> for ContentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Post => ContentKind::Blog,
            Kind::Project => ContentKind::Project,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post or project document
    New {
        /// Kind of document
        #[arg(short, long, value_enum, default_value = "post")]
        kind: Kind,

        /// Title of the new document
        title: String,
    },

    /// Generate the static site
    #[command(alias = "g", alias = "generate")]
    Build,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// List site content (project, post, tag)
    List {
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a blog post
    Show {
        slug: String,

        /// Print rendered HTML instead of markdown
        #[arg(long)]
        html: bool,

        /// Toggle the like on the post after showing it
        #[arg(long)]
        like: bool,
    },

    /// Like or unlike a blog post
    Like {
        slug: String,

        /// Only print the current count and liked state
        #[arg(long)]
        status: bool,
    },

    /// Print a mailto link for a contact message
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        message: String,
    },

    /// Remove the generated site
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio_rs=debug,folio=debug,info"
    } else {
        "folio_rs=info,folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::New { kind, title } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::new::run(&folio, kind.into(), &title)?;
        }

        Commands::Build => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;

            tracing::info!("Generating static files...");
            folio.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, !r#static, open).await?;
        }

        Commands::List { r#type } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type).await?;
        }

        Commands::Show { slug, html, like } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::show::run(&folio, &slug, html, like).await?;
        }

        Commands::Like { slug, status } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::like::run(&folio, &slug, status).await?;
        }

        Commands::Contact {
            name,
            email,
            message,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::contact::run(&folio, &name, &email, &message)?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
