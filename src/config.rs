use crate::email_filter::{FallbackPolicy, FilterTables};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filters: FilterTables,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub base_site: String,
    pub page_delay_ms: u64,
    pub request_timeout_seconds: u64,
    pub detail_retry_count: usize,
    /// Pages fetched through one proxy before rotating to the next.
    pub pages_per_proxy: usize,
    #[serde(default)]
    pub proxy_urls: Vec<String>,
    /// Address the directory serves instead of the real one when it is
    /// rate-limiting us. Treated as a failed extraction. Empty disables
    /// the check.
    #[serde(default)]
    pub rate_limit_sentinel: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub progress_interval: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    pub policy: FallbackPolicy,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            policy: FallbackPolicy::Fixed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraping: ScrapingConfig {
                base_site: "https://www.example-directory.com".to_string(),
                page_delay_ms: 100,
                request_timeout_seconds: 10,
                detail_retry_count: 3,
                pages_per_proxy: 20,
                proxy_urls: Vec::new(),
                rate_limit_sentinel: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                progress_interval: 10,
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
            },
            filters: FilterTables::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
