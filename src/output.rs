// src/output.rs
// =============================================================================
// Writing crawl results to disk, and summarising a crawl.
//
// Each fetched page is saved as its own .html file:
//   {index}_{host}.html   e.g. 1_example_com.html, 2_docs_example_com.html
// where index counts from 1 in the order pages were visited and the dots in
// the host are replaced with underscores.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::crawl::{CrawlReport, CrawlResults};
use crate::page::PageUrl;

// Builds the file name for the index-th page (1-based)
//
// Only the host name is used; the port is left out on purpose, since ':'
// isn't allowed in Windows file names and the index already keeps names
// unique.
pub fn page_file_name(index: usize, url: &PageUrl) -> String {
    format!("{}_{}.html", index, url.host().replace('.', "_"))
}

// Saves every fetched page into output_dir, creating the directory if needed
//
// Returns: the paths written, in visit order
pub fn save_results(results: &CrawlResults, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut saved = Vec::with_capacity(results.len());
    for (i, page) in results.iter().enumerate() {
        let path = output_dir.join(page_file_name(i + 1, &page.url));
        fs::write(&path, &page.html)
            .with_context(|| format!("Failed to write {} to {}", page.url, path.display()))?;
        saved.push(path);
    }

    Ok(saved)
}

/// Machine-readable account of a finished crawl (the CLI's --json output).
#[derive(Debug, Serialize)]
pub struct CrawlSummary {
    pub start_url: String,
    pub pages_visited: usize,
    pub pages_saved: usize,
    pub visited: Vec<String>,
    pub saved: Vec<SavedPage>,
    pub failures: Vec<FailedPage>,
}

#[derive(Debug, Serialize)]
pub struct SavedPage {
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct FailedPage {
    pub url: String,
    pub error: String,
}

impl CrawlSummary {
    // `saved` must be the paths save_results returned for this report
    pub fn new(start_url: &str, report: &CrawlReport, saved: &[PathBuf]) -> Self {
        Self {
            start_url: start_url.to_string(),
            pages_visited: report.visited.len(),
            pages_saved: saved.len(),
            visited: report.visited.iter().map(ToString::to_string).collect(),
            saved: report
                .results
                .urls()
                .zip(saved)
                .map(|(url, path)| SavedPage {
                    url: url.to_string(),
                    path: path.clone(),
                })
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|e| FailedPage {
                    url: e.url.clone(),
                    error: e.kind.to_string(),
                })
                .collect(),
        }
    }
}
