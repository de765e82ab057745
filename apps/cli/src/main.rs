mod client;
mod config;
mod export;
mod extractor;
mod models;
mod presenter;
mod quota;
mod workflow;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::GenerationClient;
use crate::config::{Cli, Command, GenerateArgs};
use crate::models::GenerationRequest;
use crate::presenter::{render_view, Tab};
use crate::quota::QuotaTracker;
use crate::workflow::{status, submit, Outcome, LIMIT_REACHED};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Generate(args) => generate(&cli, args).await,
        Command::Extract { file } => {
            let text = extractor::extract_text(file).await?;
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Quota => {
            let quota = QuotaTracker::new(cli.usage_store());
            println!("Free uses left today: {}", quota.remaining(cli.daily_limit));
            Ok(ExitCode::SUCCESS)
        }
        Command::Upgrade => {
            println!("Stripe-powered upgrade coming soon");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn read_input(
    file: Option<&Path>,
    text: Option<&str>,
    label: &str,
) -> Result<String> {
    match file {
        Some(path) => {
            status(&format!("Reading {label}…"));
            let text = extractor::extract_text(path)
                .await
                .with_context(|| format!("could not load {label}"))?;
            status(&format!("{label} loaded ✓"));
            Ok(text)
        }
        None => Ok(text.unwrap_or_default().to_string()),
    }
}

async fn generate(cli: &Cli, args: &GenerateArgs) -> Result<ExitCode> {
    let resume_text = read_input(args.cv_file.as_deref(), args.cv_text.as_deref(), "CV").await?;
    let job_desc = read_input(
        args.job_file.as_deref(),
        args.job_text.as_deref(),
        "Job Description",
    )
    .await?;

    let quota = QuotaTracker::new(cli.usage_store());
    let client = GenerationClient::new(&cli.endpoint)?;
    let request = GenerationRequest {
        resume_text,
        job_desc,
        tone: args.tone.as_prompt().to_string(),
        role: args.role.clone(),
    };

    let result = match submit(&quota, cli.daily_limit, &client, &request).await {
        Outcome::Generated(result) => result,
        Outcome::LimitReached => {
            status(LIMIT_REACHED);
            return Ok(ExitCode::FAILURE);
        }
        Outcome::Failed(e) => {
            status(&format!("Error: {e}"));
            return Ok(ExitCode::FAILURE);
        }
    };

    status(&format!(
        "Free uses left today: {}",
        quota.remaining(cli.daily_limit)
    ));
    status("Done ✓");

    if args.copy {
        print!("{}", args.tab.text(&result));
    } else {
        print!("{}", render_view(args.tab, &result));
    }

    if let Some(dir) = &args.export_dir {
        for tab in Tab::ALL {
            match export::export_docx(dir, tab.export_name(), tab.text(&result)) {
                Ok(path) => status(&format!("Saved {}", path.display())),
                Err(e) => warn!("export of {} failed: {e}", tab.title()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
