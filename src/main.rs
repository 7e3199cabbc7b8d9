// Entry point for the image-batch CLI.
// The lib.rs file carries the batch runner; this binary only parses
// arguments, picks a notification sink and reports the outcome.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use image_batch_lib::commands::{TaskTemplate, inspect_files, process_images, tasks_from_files};
use image_batch_lib::core::{BatchRequest, JsonLinesSink, NoopSink, NotificationSink, TracingSink};

#[derive(Parser)]
#[command(name = "image-batch", version, about = "Run image transformation batches on a bounded worker pool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the batch described by a JSON manifest
    Run {
        /// Manifest: {"tasks": [...], "outputPath": "...", "workers": 4}
        manifest: PathBuf,
        /// Override the manifest's output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the manifest's worker count
        #[arg(short, long, allow_negative_numbers = true)]
        workers: Option<i64>,
        #[arg(long, value_enum, default_value_t = EventFormat::Json)]
        events: EventFormat,
    },
    /// Transform a list of files with shared options
    Convert {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        /// Convert to this format (jpeg, png, webp)
        #[arg(short, long)]
        format: Option<String>,
        #[arg(short, long, default_value_t = 0)]
        quality: i32,
        #[arg(long, default_value_t = 0)]
        width: u32,
        #[arg(long, default_value_t = 0)]
        height: u32,
        #[arg(short, long, default_value_t = image_batch_lib::core::DEFAULT_WORKERS, allow_negative_numbers = true)]
        workers: i64,
        #[arg(long, value_enum, default_value_t = EventFormat::Json)]
        events: EventFormat,
    },
    /// Print metadata of the supported images among the given files
    List {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Where batch notifications go.
#[derive(Clone, Copy, ValueEnum)]
enum EventFormat {
    /// JSON lines on stdout
    Json,
    /// Through the log
    Log,
    /// Discard events
    Quiet,
}

impl EventFormat {
    fn sink(self) -> Arc<dyn NotificationSink> {
        match self {
            Self::Json => Arc::new(JsonLinesSink::new(std::io::stdout())),
            Self::Log => Arc::new(TracingSink),
            Self::Quiet => Arc::new(NoopSink),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries event JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run { manifest, output, workers, events } => {
            let raw = std::fs::read_to_string(&manifest)
                .with_context(|| format!("reading manifest {}", manifest.display()))?;
            let mut request: BatchRequest = serde_json::from_str(&raw)
                .with_context(|| format!("parsing manifest {}", manifest.display()))?;
            if let Some(output) = output {
                request.output_path = output;
            }
            if let Some(workers) = workers {
                request.workers = workers;
            }
            execute(request, events).await
        }
        Command::Convert { files, output, format, quality, width, height, workers, events } => {
            let infos = inspect_files(&files);
            if infos.is_empty() {
                bail!("none of the {} given paths is a readable png/jpg/jpeg/webp file", files.len());
            }
            let template = TaskTemplate { output_format: format, quality, width, height };
            let request = BatchRequest::new(tasks_from_files(&infos, &template), output, workers);
            execute(request, events).await
        }
        Command::List { files } => {
            let infos = inspect_files(&files);
            println!("{}", serde_json::to_string_pretty(&infos)?);
            Ok(())
        }
    }
}

async fn execute(request: BatchRequest, events: EventFormat) -> anyhow::Result<()> {
    let task_count = request.tasks.len();
    process_images(request, events.sink())
        .await
        .with_context(|| format!("batch of {task_count} images finished with errors"))?;
    info!("All {} images processed", task_count);
    Ok(())
}
