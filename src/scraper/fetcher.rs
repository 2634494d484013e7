// src/scraper/fetcher.rs
use crate::config::ScrapingConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Explicit proxy rotation state. Slot 0 is the direct connection, higher
/// slots walk the configured proxy list round-robin. Owned by the fetcher,
/// never process-wide.
pub struct ProxyRotation {
    proxies: Vec<String>,
    slot: usize,
    pages_since_switch: usize,
    interval: usize,
}

impl ProxyRotation {
    pub fn new(proxies: Vec<String>, interval: usize) -> Self {
        Self {
            proxies,
            slot: 0,
            pages_since_switch: 0,
            interval: interval.max(1),
        }
    }

    pub fn current(&self) -> Option<&str> {
        if self.slot == 0 || self.proxies.is_empty() {
            None
        } else {
            let idx = (self.slot - 1) % self.proxies.len();
            Some(self.proxies[idx].as_str())
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn advance(&mut self) {
        self.slot += 1;
        self.pages_since_switch = 0;
    }

    /// Counts one fetched page; returns true when the interval elapsed and
    /// the rotation moved on.
    pub fn tick_page(&mut self) -> bool {
        self.pages_since_switch += 1;
        if self.pages_since_switch >= self.interval {
            self.advance();
            true
        } else {
            false
        }
    }
}

pub struct PageFetcher {
    config: ScrapingConfig,
    rotation: ProxyRotation,
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        let rotation = ProxyRotation::new(config.proxy_urls.clone(), config.pages_per_proxy);
        let client = Self::build_client(config, None)?;
        Ok(Self {
            config: config.clone(),
            rotation,
            client,
        })
    }

    fn build_client(config: &ScrapingConfig, proxy: Option<&str>) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
            )
            .timeout(Duration::from_secs(config.request_timeout_seconds));
        if let Some(url) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(url)?);
        }
        Ok(builder.build()?)
    }

    /// Moves to the next proxy slot and rebuilds the client against it.
    pub fn rotate(&mut self) -> Result<()> {
        self.rotation.advance();
        self.client = Self::build_client(&self.config, self.rotation.current())?;
        debug!("Switched to proxy slot {}", self.rotation.slot());
        Ok(())
    }

    /// Counts one page against the rotation interval, rotating when due.
    pub fn note_page_done(&mut self) -> Result<()> {
        if self.rotation.tick_page() {
            self.client = Self::build_client(&self.config, self.rotation.current())?;
            debug!(
                "Rotation interval reached, now on proxy slot {}",
                self.rotation.slot()
            );
        }
        Ok(())
    }

    /// Fetches one page with bounded retries. A 429 rotates the proxy and
    /// retries after a short randomized pause.
    pub async fn fetch(&mut self, url: &str) -> Result<String> {
        let attempts = self.config.detail_retry_count.max(1);
        for attempt in 1..=attempts {
            let response = match self
                .client
                .get(url)
                .header(
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header("Referer", "https://www.google.com/")
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!("Attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                    self.rotate()?;
                    continue;
                }
            };

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                warn!(
                    "Too many requests from {} (attempt {}/{}), rotating proxy",
                    url, attempt, attempts
                );
                self.rotate()?;
                tokio::time::sleep(Duration::from_millis(500 + fastrand::u64(0..500))).await;
                continue;
            }

            if !response.status().is_success() {
                return Err(format!("HTTP error: {}", response.status()).into());
            }

            return Ok(response.text().await?);
        }

        Err(format!("all {} attempts failed for {}", attempts, url).into())
    }

    /// Resolves a profile link against the directory site when relative.
    pub fn resolve_link(&self, link: &str) -> String {
        if link.starts_with("http") {
            return link.to_string();
        }
        match Url::parse(&self.config.base_site).and_then(|base| base.join(link)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.config.base_site, link),
        }
    }
}
