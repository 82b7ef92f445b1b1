use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use tagsift_scanner::error::{Result, ScrapeError};

/// Streams resolved script URLs to site-scoped paths on disk.
pub struct Downloader {
    client: Client,
    root: PathBuf,
}

impl Downloader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let client = Client::builder()
            .user_agent("Tagsift/0.1 (https://github.com/trapdoorsec/tagsift)")
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            root: root.into(),
        }
    }

    /// Directory the scripts for `site` are stored under.
    pub fn site_dir(&self, site: &str) -> PathBuf {
        self.root.join(strip_scheme(site))
    }

    /// Download every URL in `urls` into the site's directory.
    ///
    /// Each item is independent: a failure is logged and the rest of the
    /// batch proceeds. Returns the number of files written.
    pub async fn download_all(&self, site: &str, urls: &[String]) -> usize {
        let dir = self.site_dir(site);
        let mut written = 0;

        for url in urls {
            match self.download_one(&dir, url).await {
                Ok(path) => {
                    debug!("Saved {} to {}", url, path.display());
                    written += 1;
                }
                Err(e) => warn!("Failed to download {}: {}", url, e),
            }
        }

        written
    }

    async fn download_one(&self, dir: &Path, url: &str) -> Result<PathBuf> {
        let filename = script_filename(url)
            .ok_or_else(|| ScrapeError::InvalidUrl(format!("no filename in {url}")))?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(filename);

        let response = self.client.get(url).send().await?.error_for_status()?;

        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(path)
    }
}

/// Filename for a downloaded script: the last segment of the URL path with
/// any query string stripped. `None` when the path has no usable basename.
pub fn script_filename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path_segments()?.next_back()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Site directory name: the site URL without its scheme.
pub fn strip_scheme(site: &str) -> &str {
    site.trim_start_matches("https://")
        .trim_start_matches("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_basename_with_query_stripped() {
        assert_eq!(
            script_filename("https://cdn.example/path/a.js?v=12&x=1"),
            Some("a.js".to_string())
        );
        assert_eq!(
            script_filename("https://cdn.example/b.js"),
            Some("b.js".to_string())
        );
    }

    #[test]
    fn urls_without_a_basename_yield_none() {
        assert_eq!(script_filename("https://cdn.example/"), None);
        assert_eq!(script_filename("https://cdn.example"), None);
        assert_eq!(script_filename("not a url"), None);
    }

    #[test]
    fn site_dirs_drop_the_scheme() {
        assert_eq!(strip_scheme("https://example.com"), "example.com");
        assert_eq!(strip_scheme("http://example.com"), "example.com");
        assert_eq!(strip_scheme("example.com"), "example.com");
    }
}
