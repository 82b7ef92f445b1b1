use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tagsift_scanner::error::{Result, ScrapeError};

/// Site URL -> utag file URLs discovered while visiting it.
pub type SiteFileIndex = BTreeMap<String, Vec<String>>;

/// Site URL -> tag id -> resolved script URLs in document order.
pub type SiteScriptIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;

pub const UTAG_FILES_SNAPSHOT: &str = "utagFiles.json";
pub const SCRIPT_URLS_SNAPSHOT: &str = "scriptURLs.json";

/// Write `utagFiles.json` under `dir`.
pub fn write_utag_files(dir: &Path, index: &SiteFileIndex) -> Result<()> {
    write_snapshot(&dir.join(UTAG_FILES_SNAPSHOT), index)
}

/// Write `scriptURLs.json` under `dir`.
pub fn write_script_urls(dir: &Path, index: &SiteScriptIndex) -> Result<()> {
    write_snapshot(&dir.join(SCRIPT_URLS_SNAPSHOT), index)
}

fn write_snapshot<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ScrapeError::Other(format!("Failed to serialize snapshot: {e}")))?;
    fs::write(path, json)?;
    Ok(())
}
