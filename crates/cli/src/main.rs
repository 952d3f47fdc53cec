use anyhow::Context;
use clap::{Parser, Subcommand};
use plp_core::constants::STORAGE_DIR_ENV;
use plp_core::{
    is_valid_prompt_id, resolve, CoreConfig, ErrorClass, PromptError, PromptId, PromptService,
    WriteStatus,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_NOT_FOUND: u8 = 2;
const EXIT_BAD_REQUEST: u8 = 3;

#[derive(Parser)]
#[command(name = "plp")]
#[command(about = "Prompt Library storage CLI")]
struct Cli {
    /// Storage directory (overrides PLP_STORAGE_DIR)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a prompt; a trailing version segment selects a snapshot
    Get {
        /// Prompt path, e.g. marketing/welcome or marketing/welcome/1.0.0
        path: String,
    },
    /// Create or update a prompt
    Put {
        /// Prompt identifier
        path: String,
        /// JSON payload file with `content` and `meta`
        #[arg(long, conflicts_with_all = ["content", "meta"], required_unless_present = "content")]
        file: Option<PathBuf>,
        /// Plain-text content
        #[arg(long)]
        content: Option<String>,
        /// Metadata as a JSON object
        #[arg(long, default_value = "{}")]
        meta: String,
    },
    /// Delete a prompt and all of its versions
    Delete {
        /// Prompt identifier
        path: String,
    },
    /// Check whether a prompt exists
    Exists {
        /// Prompt identifier
        path: String,
    },
    /// List stored versions of a prompt
    Versions {
        /// Prompt identifier
        path: String,
    },
    /// Show how a raw path splits into identifier and version
    Resolve {
        /// Raw path
        path: String,
    },
    /// Check an identifier against the identifier grammar
    Validate {
        /// Candidate identifier
        id: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done,
    NotFound,
    Rejected,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Error initialising logging: {e}");
    }

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'plp --help' for commands");
        return ExitCode::SUCCESS;
    };

    match run(cli.storage_dir, command) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound) => {
            eprintln!("not found");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Ok(Outcome::Rejected) => ExitCode::from(EXIT_BAD_REQUEST),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            match e.downcast_ref::<PromptError>().map(PromptError::class) {
                Some(ErrorClass::BadRequest) => ExitCode::from(EXIT_BAD_REQUEST),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plp_core=info".parse()?)
                .add_directive("plp_files=info".parse()?)
                .add_directive("plp=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn run(storage_dir: Option<PathBuf>, command: Commands) -> anyhow::Result<Outcome> {
    tracing::debug!(?command, "running command");

    // Commands that never touch storage do not need a store.
    match &command {
        Commands::Resolve { .. } | Commands::Validate { .. } => {
            return execute(None, command, &mut std::io::stdout().lock());
        }
        _ => {}
    }

    let cfg = match storage_dir {
        Some(dir) => CoreConfig::new(dir)?,
        None => CoreConfig::from_env_value(std::env::var(STORAGE_DIR_ENV).ok())?,
    };
    let service = PromptService::new(Arc::new(cfg))?;
    tracing::debug!(root = %service.store().root().display(), "using storage directory");

    execute(Some(&service), command, &mut std::io::stdout().lock())
}

fn execute(
    service: Option<&PromptService>,
    command: Commands,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let service = || service.context("command requires a storage directory");

    match command {
        Commands::Get { path } => match service()?.get(&path)? {
            Some(envelope) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
                Ok(Outcome::Done)
            }
            None => Ok(Outcome::NotFound),
        },
        Commands::Put {
            path,
            file,
            content,
            meta,
        } => {
            let payload = match (file, content) {
                (Some(file), _) => {
                    let raw = std::fs::read_to_string(&file)
                        .with_context(|| format!("failed to read {}", file.display()))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("{} is not valid JSON", file.display()))?
                }
                (None, Some(content)) => {
                    let meta: serde_json::Value =
                        serde_json::from_str(&meta).context("--meta is not valid JSON")?;
                    serde_json::json!({ "content": content, "meta": meta })
                }
                (None, None) => anyhow::bail!("either --file or --content is required"),
            };

            let stored = service()?.put(&path, payload)?;
            let status = match stored.status {
                WriteStatus::Created => "created",
                WriteStatus::Updated => "updated",
            };
            eprintln!("{status}: {}", stored.envelope);
            writeln!(out, "{}", serde_json::to_string_pretty(&stored.envelope)?)?;
            Ok(Outcome::Done)
        }
        Commands::Delete { path } => {
            if service()?.delete(&path)? {
                writeln!(out, "deleted {path}")?;
                Ok(Outcome::Done)
            } else {
                Ok(Outcome::NotFound)
            }
        }
        Commands::Exists { path } => {
            let exists = service()?.exists(&path)?;
            writeln!(out, "{exists}")?;
            Ok(if exists {
                Outcome::Done
            } else {
                Outcome::NotFound
            })
        }
        Commands::Versions { path } => {
            for version in service()?.versions(&path)? {
                writeln!(out, "{version}")?;
            }
            Ok(Outcome::Done)
        }
        Commands::Resolve { path } => {
            let resolved = resolve(&path);
            let report = serde_json::json!({
                "id": resolved.id,
                "version": resolved.version,
                "valid": is_valid_prompt_id(&resolved.id),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            Ok(Outcome::Done)
        }
        Commands::Validate { id } => match PromptId::parse(&id) {
            Ok(_) => {
                writeln!(out, "valid")?;
                Ok(Outcome::Done)
            }
            Err(reason) => {
                writeln!(out, "invalid: {reason}")?;
                Ok(Outcome::Rejected)
            }
        },
    }
}
