use serde::{Deserialize, Serialize};

/// One country/category section of the directory, with its page range and
/// the per-country `data-event` attribute the listing markup tags company
/// links with.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CountryTarget {
    pub country: String,
    pub customer_type: String,
    pub base_url: String,
    pub start_page: u32,
    pub end_page: u32,
    pub data_event: String,
    /// Optional cap on records scraped for this target. None means all.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetsConfig {
    pub targets: Vec<CountryTarget>,
}

pub async fn load_targets_from_yaml(
    path: &str,
) -> std::result::Result<Vec<CountryTarget>, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: TargetsConfig = serde_yaml::from_str(&content)?;
    Ok(config.targets)
}
