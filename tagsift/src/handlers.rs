use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use tagsift_core::pipeline::{
    ScrapeOptions, ScrapeProgressCallback, generate_scrape_report, run_scrape,
};
use tagsift_scanner::HeadlessVisitor;
use tagsift_scanner::extract::extract_script_urls;
use tagsift_scanner::rules::ExtractionRules;

// Helper functions for the scrape handler

/// Load and parse site URLs from a newline-delimited file.
pub fn load_sites_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read site list {}: {}", path.display(), e))?;

    let sites: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_site_line(line.trim()))
        .collect();

    if sites.is_empty() {
        return Err(format!("No valid site URLs found in {}", path.display()));
    }

    Ok(sites)
}

/// Parse a single line as a site URL, trying to add https:// if needed.
pub fn parse_site_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("https://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠️  Skipping invalid site '{}'", line);
    None
}

pub async fn handle_scrape(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let sites_file = sub_matches.get_one::<String>("SITES").unwrap();
    let output = sub_matches.get_one::<String>("output").unwrap();
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&30);
    let network_wait = *sub_matches.get_one::<u64>("network-wait").unwrap_or(&5);
    let no_download = sub_matches.get_flag("no-download");

    let sites_path = PathBuf::from(shellexpand::tilde(sites_file).as_ref());
    let output_dir = PathBuf::from(shellexpand::tilde(output).as_ref());

    // Failure to read the site list aborts the run
    let sites = match load_sites_from_file(&sites_path) {
        Ok(sites) => sites,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!("\n🏷️  Scraping {} site(s)", sites.len());
    println!("Output: {}", output_dir.display());
    println!("Timeout: {}s", timeout);
    println!("Network wait: {}s", network_wait);
    println!(
        "Downloads: {}\n",
        if no_download { "disabled" } else { "enabled" }
    );

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!(
            "{} Failed to create output directory {}: {}",
            "✗".red().bold(),
            output_dir.display(),
            e
        );
        std::process::exit(1);
    }

    // Failure to acquire the browser session aborts the run; everything
    // past this point recovers per site, file or download item.
    let visitor = match HeadlessVisitor::launch(
        Duration::from_secs(timeout),
        Duration::from_secs(network_wait),
    ) {
        Ok(visitor) => visitor,
        Err(e) => {
            eprintln!("{} Failed to start browser session: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Starting scrape...");

    let spinner_clone = spinner.clone();
    let progress: ScrapeProgressCallback = Arc::new(move |msg: String| {
        spinner_clone.set_message(msg);
    });

    let options = ScrapeOptions {
        sites,
        output_dir,
        rules: ExtractionRules::default(),
        download: !no_download,
    };

    let result = run_scrape(&visitor, &options, Some(progress)).await;
    match result {
        Ok(outcome) => {
            spinner.finish_and_clear();
            println!("\n{} Scrape complete!\n", "✓".green().bold());
            print!("{}", generate_scrape_report(&outcome));
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} Scrape failed: {}", "✗".red().bold(), e);
            // Release the browser session before exit skips destructors.
            drop(visitor);
            std::process::exit(1);
        }
    }
}

pub fn handle_extract(sub_matches: &ArgMatches) {
    let files = sub_matches
        .get_many::<PathBuf>("FILE")
        .expect("clap requires at least one FILE");
    let rules = ExtractionRules::default();

    let mut by_file: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in files {
        match fs::read_to_string(file) {
            Ok(document) => {
                by_file.insert(
                    file.display().to_string(),
                    extract_script_urls(&document, &rules),
                );
            }
            Err(e) => {
                eprintln!("{} Failed to read {}: {}", "✗".red().bold(), file.display(), e);
            }
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&by_file).expect("string maps always serialize")
    );
}
