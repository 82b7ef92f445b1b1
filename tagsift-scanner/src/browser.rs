use std::sync::{Arc, Mutex};
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use reqwest::Client;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Collaborator that can visit a site and report the network requests the
/// visit triggered, and fetch the text behind a URL.
///
/// The pipeline only ever talks to this seam, which keeps browser plumbing
/// out of the extraction logic and lets tests drive the pipeline with
/// canned visits.
#[allow(async_fn_in_trait)]
pub trait SiteVisitor {
    /// Visit `url` and return the URL of every network request observed
    /// while the page loaded and settled.
    async fn observed_requests(&self, url: &str) -> Result<Vec<String>>;

    /// Fetch the text body behind `url`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Production visitor: one shared headless Chrome session, one tab per
/// visit, plus an HTTP client for plain text fetches.
pub struct HeadlessVisitor {
    browser: Arc<Browser>,
    client: Client,
    timeout: Duration,
    network_wait: Duration,
}

impl HeadlessVisitor {
    /// Launch the shared browser session. Failure here is fatal to the run;
    /// everything downstream recovers per site, file, or download item.
    pub fn launch(timeout: Duration, network_wait: Duration) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| ScrapeError::BrowserError(format!("Browser launch options error: {e}")))?;

        let browser = Browser::new(options)
            .map_err(|e| ScrapeError::BrowserError(format!("Failed to launch Chrome/Chromium: {e}")))?;

        let client = Client::builder()
            .user_agent("Tagsift/0.1 (https://github.com/trapdoorsec/tagsift)")
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            browser: Arc::new(browser),
            client,
            timeout,
            network_wait,
        })
    }
}

impl SiteVisitor for HeadlessVisitor {
    async fn observed_requests(&self, url: &str) -> Result<Vec<String>> {
        let browser = self.browser.clone();
        let url = url.to_string();
        let timeout = self.timeout;
        let settle = self.network_wait;

        // headless_chrome is synchronous; the visit runs on a blocking thread.
        tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let tab = browser
                .new_tab()
                .map_err(|e| ScrapeError::BrowserError(format!("Failed to create tab: {e}")))?;
            tab.set_default_timeout(timeout);

            let captured = Arc::new(Mutex::new(Vec::new()));
            let sink = captured.clone();
            tab.register_response_handling(
                "tagsift-observer",
                Box::new(move |params, _fetch_body| {
                    if let Ok(mut urls) = sink.lock() {
                        urls.push(params.response.url.clone());
                    }
                }),
            )
            .map_err(|e| {
                ScrapeError::BrowserError(format!("Failed to register response handler: {e}"))
            })?;

            tab.navigate_to(&url)
                .map_err(|e| ScrapeError::BrowserError(format!("Navigation failed: {e}")))?;
            tab.wait_until_navigated()
                .map_err(|e| ScrapeError::BrowserError(format!("Page load failed: {e}")))?;

            // Let late-loading tags fire before tearing the tab down.
            std::thread::sleep(settle);

            let _ = tab.deregister_response_handling("tagsift-observer");
            let _ = tab.close(true);

            let urls = captured.lock().map(|u| u.clone()).unwrap_or_default();
            debug!("Observed {} requests on {}", urls.len(), url);
            Ok(urls)
        })
        .await?
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
