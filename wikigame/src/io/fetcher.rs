//! Page fetching abstraction.
//!
//! The [`PageFetcher`] trait decouples the game engine from the backend that
//! actually loads pages. [`HttpFetcher`] loads them over HTTP and parses the
//! markup; tests use a scripted fetcher serving in-memory pages.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument, warn};

use crate::core::styles::{MarkupStyles, StyleSource};
use crate::io::config::GameConfig;
use crate::io::throttle::Throttle;

/// Navigation capability consumed by the validator and the engine.
pub trait PageFetcher: StyleSource {
    /// Navigate to `url`. On failure there is no current page.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Parsed document of the current page.
    fn current_document(&self) -> Result<&Html>;

    /// URL of the current page after redirects.
    fn current_url(&self) -> Option<&str>;
}

struct LoadedPage {
    url: String,
    document: Html,
}

/// Fetcher backed by a blocking `reqwest` client.
///
/// Transport errors and 5xx responses fail the load. Other error statuses
/// keep their body: missing articles are served as 404 pages carrying the
/// missing-article marker.
pub struct HttpFetcher {
    client: Client,
    throttle: Throttle,
    current: Option<LoadedPage>,
}

impl HttpFetcher {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            throttle: Throttle::new(config.step_delay()),
            current: None,
        })
    }
}

impl StyleSource for HttpFetcher {
    fn computed_style(&self, element: ElementRef<'_>, property: &str) -> Option<String> {
        MarkupStyles.computed_style(element, property)
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    fn load(&mut self, url: &str) -> Result<()> {
        self.throttle.wait();
        self.current = None;

        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("load {url}"))?;
        let status = response.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), "server error");
            bail!("load {url}: server responded {status}");
        }
        let final_url = response.url().to_string();
        let body = response
            .text()
            .with_context(|| format!("read body of {final_url}"))?;
        debug!(status = status.as_u16(), url = %final_url, bytes = body.len(), "page loaded");

        self.current = Some(LoadedPage {
            url: final_url,
            document: Html::parse_document(&body),
        });
        Ok(())
    }

    fn current_document(&self) -> Result<&Html> {
        self.current
            .as_ref()
            .map(|page| &page.document)
            .ok_or_else(|| anyhow!("no page loaded"))
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|page| page.url.as_str())
    }
}
