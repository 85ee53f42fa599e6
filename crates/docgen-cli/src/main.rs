use anyhow::Result;
use clap::{Parser, Subcommand};
use docgen_infrastructure::ConfigService;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(about = "DocGen CLI - fill in generated document structures", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/docgen/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the form for a structure file
    Render {
        /// JSON document structure
        structure: PathBuf,
        /// JSON input tree with the current values
        #[arg(long)]
        inputs: Option<PathBuf>,
        /// Print the render tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the empty input tree for a structure file
    Derive {
        /// JSON document structure
        structure: PathBuf,
    },
    /// Append a blank item to an array and print the new structure
    AddItem {
        /// JSON document structure
        structure: PathBuf,
        /// Dotted path of the array, e.g. `sections.0.paragraphs`
        path: String,
        /// Structure used as the item template when the array is empty
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Remove an array item and print the new structure
    DeleteItem {
        /// JSON document structure
        structure: PathBuf,
        /// Dotted path of the array
        path: String,
        /// Zero-based index of the item to remove
        index: usize,
    },
    /// Start an interactive document session
    Chat {
        /// Directory generated documents are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.get_config();
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Render {
            structure,
            inputs,
            json,
        } => commands::structure::render(&structure, inputs.as_deref(), json)?,
        Commands::Derive { structure } => commands::structure::derive(&structure)?,
        Commands::AddItem {
            structure,
            path,
            template,
        } => commands::structure::add_item(&structure, &path, template.as_deref())?,
        Commands::DeleteItem {
            structure,
            path,
            index,
        } => commands::structure::delete_item(&structure, &path, index)?,
        Commands::Chat { output_dir } => commands::chat::run(config, output_dir).await?,
    }

    Ok(())
}
