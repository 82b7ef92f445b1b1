use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use tagsift_scanner::browser::SiteVisitor;
use tagsift_scanner::classify::classify_requests;
use tagsift_scanner::error::Result;
use tagsift_scanner::extract::extract_script_urls;
use tagsift_scanner::rules::ExtractionRules;
use tagsift_scanner::util::tag_id;

use crate::download::Downloader;
use crate::snapshot::{self, SiteFileIndex, SiteScriptIndex};

/// Options for one scrape run.
pub struct ScrapeOptions {
    pub sites: Vec<String>,
    pub output_dir: PathBuf,
    pub rules: ExtractionRules,
    pub download: bool,
}

/// Callback for reporting scrape progress.
pub type ScrapeProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Totals for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub sites: usize,
    pub utag_files: usize,
    pub script_urls: usize,
    pub downloaded: usize,
    pub finished_at: String,
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub files: SiteFileIndex,
    pub scripts: SiteScriptIndex,
    pub summary: ScrapeSummary,
}

/// Visit each site and record the utag files its page load pulled in.
///
/// A navigation failure is scoped to its site: the entry is recorded empty
/// and the walk continues.
pub async fn collect_utag_files<V: SiteVisitor>(visitor: &V, sites: &[String]) -> SiteFileIndex {
    let mut index = SiteFileIndex::new();

    for site in sites {
        info!("Visiting {}", site);
        match visitor.observed_requests(site).await {
            Ok(requests) => {
                let files = classify_requests(&requests);
                info!("Found {} utag file(s) on {}", files.len(), site);
                index.insert(site.clone(), files);
            }
            Err(e) => {
                warn!("Error processing {}: {}", site, e);
                index.insert(site.clone(), Vec::new());
            }
        }
    }

    index
}

/// Fetch each site's utag files and extract the script URLs they load,
/// grouped by tag id.
///
/// The tag's entry is seeded empty before the fetch, so a fetch failure
/// leaves an empty list and a later file with the same tag id overwrites an
/// earlier one (last-write-wins).
pub async fn collect_script_urls<V: SiteVisitor>(
    visitor: &V,
    files: &SiteFileIndex,
    rules: &ExtractionRules,
) -> SiteScriptIndex {
    let mut index = SiteScriptIndex::new();

    for (site, file_urls) in files {
        info!("Extracting script URLs for {}", site);
        let tags = index.entry(site.clone()).or_default();

        for file in file_urls {
            let tag = tag_id(file);
            tags.insert(tag.clone(), Vec::new());

            match visitor.fetch_text(file).await {
                Ok(document) => {
                    tags.insert(tag, extract_script_urls(&document, rules));
                }
                Err(e) => warn!("Failed to fetch or parse {}: {}", file, e),
            }
        }
    }

    index
}

/// Execute a full scrape: visit, classify, extract, persist, download.
///
/// Writes `utagFiles.json` and `scriptURLs.json` under the output directory
/// as each stage completes, then streams the resolved scripts to
/// `scripts/<site-without-scheme>/`.
pub async fn run_scrape<V: SiteVisitor>(
    visitor: &V,
    options: &ScrapeOptions,
    progress: Option<ScrapeProgressCallback>,
) -> Result<ScrapeOutcome> {
    let report = |msg: String| {
        if let Some(ref callback) = progress {
            callback(msg);
        }
    };

    report(format!("Visiting {} site(s)", options.sites.len()));
    let files = collect_utag_files(visitor, &options.sites).await;
    snapshot::write_utag_files(&options.output_dir, &files)?;

    report("Extracting script URLs".to_string());
    let scripts = collect_script_urls(visitor, &files, &options.rules).await;
    snapshot::write_script_urls(&options.output_dir, &scripts)?;

    let mut downloaded = 0;
    if options.download {
        let downloader = Downloader::new(options.output_dir.join("scripts"));
        for (site, tags) in &scripts {
            let urls: Vec<String> = tags.values().flatten().cloned().collect();
            if urls.is_empty() {
                continue;
            }
            report(format!("Downloading {} script(s) for {}", urls.len(), site));
            downloaded += downloader.download_all(site, &urls).await;
        }
    }

    let summary = ScrapeSummary {
        sites: options.sites.len(),
        utag_files: files.values().map(Vec::len).sum(),
        script_urls: scripts
            .values()
            .map(|tags| tags.values().map(Vec::len).sum::<usize>())
            .sum(),
        downloaded,
        finished_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    Ok(ScrapeOutcome {
        files,
        scripts,
        summary,
    })
}

/// Generate a plain-text report for a completed run.
pub fn generate_scrape_report(outcome: &ScrapeOutcome) -> String {
    let ScrapeOutcome {
        scripts, summary, ..
    } = outcome;

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Sites visited: {}\n", summary.sites));
    report.push_str(&format!("  Utag files found: {}\n", summary.utag_files));
    report.push_str(&format!("  Script URLs extracted: {}\n", summary.script_urls));
    report.push_str(&format!("  Scripts downloaded: {}\n", summary.downloaded));
    report.push_str(&format!("  Finished at: {}\n", summary.finished_at));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (site, tags) in scripts {
        report.push_str(&format!("## {}\n", site));
        for (tag, urls) in tags {
            report.push_str(&format!("  tag {} ({} script(s))\n", tag, urls.len()));
            for url in urls {
                report.push_str(&format!("    {}\n", url));
            }
        }
        report.push('\n');
    }

    report
}
