use clap::Parser;
use resume_wizard::app::{
    ExitReason, OutcomeSlot, WizardState, build_resume_wizard, gateway_completion,
    offline_completion,
};
use resume_wizard::config::{self, AppConfig};
use resume_wizard::gateway::{GenerationKind, HttpGateway};
use resume_wizard::runtime::Runtime;
use resume_wizard::state::CompletionHandler;
use resume_wizard::terminal::Terminal;
use resume_wizard::{Result, WizardError, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Build a resume step by step and have it generated by the backend.
#[derive(Parser)]
#[command(name = "resume-wizard", version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (defaults to ./resume-wizard.yaml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pre-fill the wizard from a YAML or JSON record.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(long)]
    backend_url: Option<String>,

    /// What to generate from the finished resume.
    #[arg(long, value_enum, default_value_t = GenerationKind::Resume)]
    kind: GenerationKind,

    /// Write the generated text here instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the backend and emit the collected record as JSON.
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }
    config.validate()?;
    logging::init(&config.logging)?;

    let seed = cli.seed.as_deref().map(config::load_seed).transpose()?;
    let slot = OutcomeSlot::new();
    let handler: Box<dyn CompletionHandler> = if cli.offline {
        Box::new(offline_completion(slot.clone()))
    } else {
        let gateway = HttpGateway::new(&config.backend.base_url, config.backend.timeout());
        Box::new(gateway_completion(Arc::new(gateway), cli.kind, slot.clone()))
    };
    tracing::info!(offline = cli.offline, kind = cli.kind.label(), "starting wizard");

    let sequencer = build_resume_wizard(&config, seed, handler)?;
    let mut runtime = Runtime::new(WizardState::new(sequencer), Terminal::new()?);
    runtime.run()?;

    match runtime.into_state().exit_reason() {
        Some(ExitReason::Completed) => {
            let content = slot.take().and_then(|result| result.content).unwrap_or_default();
            match cli.output {
                Some(path) => std::fs::write(&path, content)
                    .map_err(|source| WizardError::Output { path, source })?,
                None => println!("{content}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(ExitReason::Cancelled) | None => {
            eprintln!("Cancelled.");
            Ok(ExitCode::from(130))
        }
    }
}
