mod generate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kyjournal", about = "Karma Yoga journal report generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server with the submission form
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate one journal report from the command line
    Generate {
        /// Karma Yoga project name
        #[arg(short, long)]
        project: String,

        /// Date of the field visit (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Objectives, goals and activities of the visit
        #[arg(short, long)]
        activities: String,

        /// Verifying authority question (repeatable; defaults to the
        /// skeleton field-visit questions)
        #[arg(short, long = "question")]
        questions: Vec<String>,

        /// Media file to attach (repeatable; counted, never sent to the model)
        #[arg(short, long = "media")]
        media: Vec<PathBuf>,

        /// Output file (defaults to a name derived from the project)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check configuration health
    Health,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let config = kyjournal_config::load_config().unwrap_or_default();
                kyjournal_server::start_server(config, port)
                    .await
                    .map_err(|e| anyhow::anyhow!("{e}"))
            })?;
        }
        Commands::Generate {
            project,
            date,
            activities,
            questions,
            media,
            output,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(generate::run_generate(
                project, date, activities, questions, media, output,
            ))?;
        }
        Commands::Health => {
            println!("kyjournal is healthy");
            let config = kyjournal_config::load_config().unwrap_or_default();
            println!("  model: {}", config.model.model);
            println!("  server port: {}", config.server.port);
            println!(
                "  api key configured: {}",
                kyjournal_config::api_key_from_env().is_some()
            );
        }
    }

    Ok(())
}
