use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};
use tracing::error;

impl CliApp {
    pub async fn run(&mut self) -> Result<()> {
        println!("\n🚀 Welcome to Directory Scraper!");
        println!("═══════════════════════════════════════");

        self.show_targets()?;

        loop {
            let actions = vec![
                MenuAction::ScrapeTargets,
                MenuAction::CleanCsv,
                MenuAction::ExportSpreadsheet,
                MenuAction::ShowTargets,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::ScrapeTargets => {
                    if let Err(e) = self.run_scrape().await {
                        error!("Scrape failed: {}", e);
                    }
                }
                MenuAction::CleanCsv => {
                    if let Err(e) = self.run_clean().await {
                        error!("CSV cleaning failed: {}", e);
                    }
                }
                MenuAction::ExportSpreadsheet => {
                    if let Err(e) = self.run_export().await {
                        error!("Spreadsheet export failed: {}", e);
                    }
                }
                MenuAction::ShowTargets => {
                    if let Err(e) = self.show_targets() {
                        error!("Failed to show targets: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Directory Scraper!");
                    break;
                }
            }
        }

        Ok(())
    }
}
