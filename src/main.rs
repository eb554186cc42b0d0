use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitwrap::render::{render, OutputFormat};
use gitwrap::{
    Config, ContributionClient, Error, ErrorKind, GitHubClient, PipelineConfig, WrapPipeline,
    YearSelector,
};

#[derive(Parser, Debug)]
#[command(name = "gitwrap")]
#[command(version = "0.1.0")]
#[command(about = "Your year on GitHub: contributions, languages and top repositories")]
struct Args {
    /// GitHub username to wrap
    #[arg(short, long)]
    username: String,

    /// Calendar year to wrap (defaults to WRAP_YEAR or 2025)
    #[arg(short, long, conflicts_with = "last_year")]
    year: Option<i32>,

    /// Use the rolling last twelve months instead of a calendar year
    #[arg(long)]
    last_year: bool,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitwrap=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let github = GitHubClient::new(
        &config.api_url,
        config.github_token.as_deref(),
        config.retry_policy(),
    )?;
    let calendar = ContributionClient::new(&config.contributions_url, config.retry_policy())?;

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(year) = args.year {
        pipeline_config.target_year = year;
    }
    let selector = if args.last_year {
        YearSelector::Last
    } else {
        YearSelector::Year(pipeline_config.target_year)
    };

    let pipeline = WrapPipeline::new(github, calendar, pipeline_config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Wrapping {} for {}", selector, args.username));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.fetch_wrap_for(&args.username, selector).await;
    spinner.finish_and_clear();

    let wrap = match result {
        Ok(wrap) => wrap,
        Err(e) => {
            report_failure(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let output = render(&wrap, OutputFormat::from_name(&args.format))?;
    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(ExitCode::SUCCESS)
}

fn report_failure(error: &Error) {
    tracing::debug!("Wrap failed: {:?}", error);
    eprintln!("{}", error.user_message());
    match error.kind() {
        ErrorKind::RateLimit | ErrorKind::ServerError => {
            eprintln!("Run the same command again to retry.")
        }
        ErrorKind::NotFound => eprintln!("Check the spelling of the username."),
        ErrorKind::Unknown => {}
    }
}
