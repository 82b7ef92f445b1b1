// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{load_sites_from_file, parse_site_line};

// Re-export scrape functionality from tagsift-core
pub use tagsift_core::pipeline::{
    ScrapeOptions, ScrapeOutcome, ScrapeProgressCallback, ScrapeSummary, collect_script_urls,
    collect_utag_files, generate_scrape_report, run_scrape,
};
