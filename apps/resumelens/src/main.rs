use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resumelens::config::{Config, ScoringMode};
use resumelens::report::{render_improvements, render_results};
use resumelens::scoring_client::{AnalysisClient, HttpTransport};
use resumelens::wizard::WizardController;

#[derive(Debug, Parser)]
#[command(
    name = "resumelens",
    version,
    about = "Score a resume against a job description"
)]
#[command(group(ArgGroup::new("job_source").required(true).args(["job_file", "job_text"])))]
struct Cli {
    /// Resume file (.pdf, .docx or .txt)
    #[arg(short, long)]
    resume: PathBuf,
    /// Job description file (plain text)
    #[arg(short = 'j', long = "job")]
    job_file: Option<PathBuf>,
    /// Job description passed inline
    #[arg(long)]
    job_text: Option<String>,
    /// Scoring service base URL (overrides SCORING_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Request shape: json or multipart (overrides SCORING_MODE)
    #[arg(long)]
    mode: Option<ScoringMode>,
    /// Disable remote analysis
    #[arg(long)]
    no_ai: bool,
    /// Also print before/after bullet rewrites
    #[arg(long)]
    improvements: bool,
    /// Print the result views as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resumelens v{}", env!("CARGO_PKG_VERSION"));

    let mut wizard = WizardController::with_mode(config.scoring_mode);
    info!("Workflow {} started", wizard.id());

    let resume_bytes = tokio::fs::read(&cli.resume)
        .await
        .with_context(|| format!("failed to read resume {}", cli.resume.display()))?;
    wizard.set_resume_file(file_name(&cli.resume), resume_bytes)?;

    // Documents cannot travel in a JSON body; upload them unless the mode was forced.
    let is_document = wizard
        .inputs()
        .resume()
        .is_some_and(|resume| resume.as_text().is_none());
    if cli.mode.is_none() && config.scoring_mode == ScoringMode::Json && is_document {
        info!("Resume is a binary document; switching to multipart mode");
        config.scoring_mode = ScoringMode::Multipart;
    }

    let transport = Arc::new(HttpTransport::new(&config)?);
    if config.ai_mode && !transport.health().await {
        warn!(
            "Scoring service at {} did not answer its health check",
            config.scoring_base_url
        );
    }
    let client = AnalysisClient::new(transport, config.scoring_mode).with_ai_mode(config.ai_mode);

    let job_description = match (&cli.job_file, &cli.job_text) {
        (Some(path), _) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read job description {}", path.display()))?,
        (None, Some(text)) => text.clone(),
        (None, None) => return Err(anyhow!("a job description is required")),
    };
    wizard.set_job_description(job_description)?;

    if let Err(e) = wizard.run_analysis(&client).await {
        eprintln!("[{}] {e}", e.category());
        return Err(e.into());
    }

    let results = wizard
        .results_view()
        .ok_or_else(|| anyhow!("analysis finished without a result"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_results(&results));
    }

    if cli.improvements {
        wizard.advance()?;
        let improvements = wizard
            .improvements_view()
            .ok_or_else(|| anyhow!("analysis finished without a result"))??;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&improvements)?);
        } else {
            print!("{}", render_improvements(&improvements));
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.base_url {
        config.scoring_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(mode) = cli.mode {
        config.scoring_mode = mode;
    }
    if cli.no_ai {
        config.ai_mode = false;
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
