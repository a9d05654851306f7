use std::time::Duration;

use clap::Parser;
use price_scraper::browser::BrowserSession;
use price_scraper::config::{MalformedRowPolicy, ScrapeConfig, DEFAULT_URL};
use price_scraper::page::CdpPage;
use price_scraper::{parse_keywords, pipeline, Keyword, ResultSet};

/// price-scraper: live coin prices from a searchable price table
#[derive(Parser)]
#[command(name = "price-scraper", version, about)]
struct Cli {
    /// Comma-separated coin names or symbols (default: btc,eth,xrp)
    #[arg(long)]
    keywords: Option<String>,

    /// Page holding the price table
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Run Chrome with a visible window (default: headless)
    #[arg(long)]
    headed: bool,

    /// Seconds to wait for a row to fill in before skipping it
    #[arg(long, default_value_t = 10)]
    row_timeout_secs: u64,

    /// Stop the whole run on a row whose fields cannot be read
    #[arg(long)]
    abort_on_malformed_row: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr only; stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    // Bad keywords must fail before Chrome is ever started.
    let keywords = parse_keywords(cli.keywords.as_deref())?;
    tracing::info!(
        "Resulting keywords are: {:?}",
        keywords.iter().map(Keyword::as_str).collect::<Vec<_>>()
    );

    let mut config = ScrapeConfig {
        url: cli.url,
        headless: !cli.headed,
        ..ScrapeConfig::default()
    };
    config.poll.deadline = Duration::from_secs(cli.row_timeout_secs);
    if cli.abort_on_malformed_row {
        config.malformed_rows = MalformedRowPolicy::Abort;
    }

    let session = BrowserSession::launch(config.headless).await?;

    // Whatever happens below, Chrome gets shut down before we exit
    let outcome = tokio::select! {
        result = run(&session, &config, &keywords) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received interrupt signal, shutting down");
            Ok(None)
        }
    };
    let outcome = keep_run_error(outcome, session.close().await);

    if let Some(results) = outcome? {
        report(&results, keywords.len())?;
    }
    Ok(())
}

async fn run(
    session: &BrowserSession,
    config: &ScrapeConfig,
    keywords: &[Keyword],
) -> anyhow::Result<Option<ResultSet>> {
    let page = session.open(&config.url).await?;
    let results = pipeline::scrape(CdpPage::new(page), config, keywords).await?;
    Ok(Some(results))
}

/// The run's own result wins over a failure to close Chrome.
fn keep_run_error<T>(outcome: anyhow::Result<T>, closed: anyhow::Result<()>) -> anyhow::Result<T> {
    if let Err(e) = closed {
        tracing::warn!("Failed to shut Chrome down: {:#}", e);
    }
    outcome
}

fn report(results: &ResultSet, keyword_count: usize) -> anyhow::Result<()> {
    if results.is_empty() {
        tracing::info!("Sorry, no coins were found");
        return Ok(());
    }
    if results.is_complete(keyword_count) {
        tracing::info!("All coins found!");
    } else {
        tracing::info!(
            "Found {} of {} coins",
            results.len(),
            keyword_count
        );
    }
    println!("{}", results.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_failure_does_not_mask_run_error() {
        let outcome: anyhow::Result<()> = Err(price_scraper::ScrapeError::locator(
            "search input",
            "input[data-slot=\"input\"]",
        )
        .into());

        let err = keep_run_error(outcome, Err(anyhow::anyhow!("Failed to close Chrome"))).unwrap_err();

        assert!(err.to_string().contains("search input not found"));
    }

    #[test]
    fn test_close_failure_keeps_results() {
        let outcome = keep_run_error(Ok(3), Err(anyhow::anyhow!("Failed to close Chrome")));
        assert_eq!(outcome.unwrap(), 3);
    }
}
