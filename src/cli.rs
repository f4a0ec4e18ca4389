// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// polite-crawler <URL> [--max-pages N] [--delay SECS] [--output-dir DIR] [--json]
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "polite-crawler",
    version,
    about = "A polite, bounded web crawler",
    long_about = "polite-crawler starts at a URL, follows the links it finds breadth-first and \
                  saves the HTML of every page it visits. It fetches one page at a time and \
                  waits between requests so it doesn't hammer the server."
)]
pub struct Cli {
    /// URL to start crawling from (http or https)
    pub url: String,

    /// Maximum number of pages to crawl
    ///
    /// Pages that fail to load still count toward this limit.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    /// Delay between requests in seconds (fractions allowed, e.g. 0.5)
    #[arg(long, default_value = "1.0", value_parser = parse_delay)]
    pub delay: Duration,

    /// Directory to save output files (created if it doesn't exist)
    #[arg(long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// Print a JSON summary instead of the human-readable one
    #[arg(long)]
    pub json: bool,
}

// Parses "--delay" into a Duration
//
// clap calls this for us; returning Err makes clap print the message and
// exit with a usage error.
fn parse_delay(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("delay must be a non-negative number of seconds, got '{}'", value))
}
