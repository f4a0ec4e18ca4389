// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG overrides the default "info" level)
// 3. Crawl from the given URL
// 4. Save every fetched page to the output directory
// 5. Print a summary and exit (0 = done, 2 = error)
//
// Pages that fail to load are logged as warnings while the crawl runs;
// they are not errors for the process as a whole.
// =============================================================================

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use polite_crawler::output::{save_results, CrawlSummary};
use polite_crawler::{CrawlConfig, CrawlReport, Crawler, FetchSettings, HttpFetcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let max_pages = usize::try_from(cli.max_pages).context("--max-pages is too large")?;

    log::info!(
        "Starting crawl of {} (max {} pages, {:.2}s delay)",
        cli.url,
        max_pages,
        cli.delay.as_secs_f64()
    );

    let fetcher =
        HttpFetcher::new(FetchSettings::default()).context("Failed to create HTTP client")?;
    let crawler = Crawler::new(fetcher, CrawlConfig { delay: cli.delay });

    let report = crawler.crawl(&cli.url, max_pages).await?;

    let saved = save_results(&report.results, &cli.output_dir)?;

    if cli.json {
        let summary = CrawlSummary::new(&cli.url, &report, &saved);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&report, &saved);
    }

    Ok(())
}

// Prints the saved files and the final counts for humans
fn print_summary(report: &CrawlReport, saved: &[PathBuf]) {
    for path in saved {
        println!("💾 Saved: {}", path.display());
    }

    println!();
    println!("📊 Crawling complete. Visited {} pages.", report.visited.len());
    println!("   ✅ Saved: {}", saved.len());
    println!("   ❌ Failed: {}", report.failures.len());
    if report.discarded > 0 {
        println!("   ⏭️  Left unvisited (page cap): {}", report.discarded);
    }
}
