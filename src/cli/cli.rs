use tracing::info;

use crate::config::Config;
use crate::models::CliApp;
use crate::pipeline::BatchProcessor;
use crate::scraper::PageFetcher;
use crate::targets::load_targets_from_yaml;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    ScrapeTargets,
    CleanCsv,
    ExportSpreadsheet,
    ShowTargets,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::ScrapeTargets => {
                write!(f, "🔍 Scrape configured directory targets end to end")
            }
            MenuAction::CleanCsv => {
                write!(f, "🧹 Clean & deduplicate emails in an existing CSV")
            }
            MenuAction::ExportSpreadsheet => {
                write!(f, "📤 Export a cleaned CSV to the final spreadsheet")
            }
            MenuAction::ShowTargets => write!(f, "📊 Show configured targets"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub async fn new(config: Config) -> Result<Self> {
        info!("Loading country targets from configuration...");
        let targets = load_targets_from_yaml("targets.yml").await?;
        info!("Loaded {} targets from configuration", targets.len());

        let fetcher = PageFetcher::new(&config.scraping)?;
        let processor = BatchProcessor::new(&config);

        Ok(Self {
            config,
            targets,
            fetcher,
            processor,
        })
    }
}
