use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::export;
use crate::models::{Batch, CliApp, DetailPageResult, RawListingRow, Result};
use crate::scraper::{DetailExtractor, ListingExtractor};
use crate::targets::CountryTarget;

impl CliApp {
    /// Runs every configured target through the full pipeline. A failing
    /// target is logged and skipped; the others still run.
    pub async fn run_scrape(&mut self) -> Result<()> {
        let targets = self.targets.clone();
        for target in &targets {
            info!(
                "==== Scraping {} / {} (pages {}-{}) ====",
                target.customer_type, target.country, target.start_page, target.end_page
            );
            if let Err(e) = self.scrape_target(target).await {
                error!(
                    "Target {}/{} failed: {}",
                    target.customer_type, target.country, e
                );
            }
        }
        Ok(())
    }

    async fn scrape_target(&mut self, target: &CountryTarget) -> Result<()> {
        let rows = self.collect_listing_rows(target).await?;
        info!(
            "Collected {} companies for {}",
            rows.len(),
            target.country
        );

        let details = self.collect_details(&rows).await;

        let records = self.processor.assemble(rows, &details);
        let mut batch = Batch::new(&target.country, &target.customer_type, records);

        let out_dir_owned = self.config.output.directory.clone();
        let out_dir = Path::new(&out_dir_owned);
        export::write_company_csv(&batch, out_dir)?;

        let stats = self.processor.process(&mut batch);
        export::write_cleaned_csv(&batch, out_dir)?;
        export::write_final_xlsx(&batch, out_dir)?;
        export::write_stats_json(&batch, &stats, out_dir, self.config.output.pretty_json)?;

        println!(
            "\n📊 {}/{}: {} records, {:.2}% empty emails, {} duplicated addresses ({} records blanked)",
            batch.customer_type,
            batch.country,
            stats.total_records,
            stats.empty_ratio() * 100.0,
            stats.duplicate_addresses,
            stats.records_blanked
        );
        Ok(())
    }

    async fn collect_listing_rows(
        &mut self,
        target: &CountryTarget,
    ) -> Result<Vec<RawListingRow>> {
        let extractor = ListingExtractor::new(&target.data_event);
        let delay = Duration::from_millis(self.config.scraping.page_delay_ms);
        let mut rows = Vec::new();
        let mut sequence = 1u32;

        for page in target.start_page..=target.end_page {
            let url = format!("{}?page={}", target.base_url, page);
            debug!("Fetching listing page {}", url);

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Listing page {} failed: {}", url, e);
                    continue;
                }
            };

            let page_rows = extractor.extract_rows(&html, &mut sequence);
            info!("Page {}: {} companies", page, page_rows.len());
            // an empty page usually means the site is throttling us
            if page_rows.is_empty() {
                self.fetcher.rotate()?;
            }
            rows.extend(page_rows);

            if let Some(limit) = target.limit {
                if rows.len() >= limit {
                    rows.truncate(limit);
                    break;
                }
            }

            self.fetcher.note_page_done()?;
            tokio::time::sleep(delay).await;
        }

        Ok(rows)
    }

    async fn collect_details(
        &mut self,
        rows: &[RawListingRow],
    ) -> HashMap<String, DetailPageResult> {
        let extractor = DetailExtractor::new();
        let delay = Duration::from_millis(self.config.scraping.page_delay_ms);
        let progress_interval = self.config.logging.progress_interval.max(1);
        let sentinel = self.config.scraping.rate_limit_sentinel.clone();
        let mut details = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            let url = self.fetcher.resolve_link(&row.profile_link);
            let result = match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    let mut detail = extractor.extract(&html);
                    if !sentinel.is_empty()
                        && detail.raw_email_text.as_deref() == Some(sentinel.as_str())
                    {
                        warn!(
                            "[{}] got the rate-limit sentinel address, dropping it",
                            row.sequence_number
                        );
                        detail.raw_email_text = None;
                    }
                    detail
                }
                // a failed detail fetch is an empty record, not an error
                Err(e) => {
                    warn!("[{}] detail fetch failed: {}", row.sequence_number, e);
                    DetailPageResult::default()
                }
            };

            if (idx + 1) % progress_interval == 0 {
                info!("Detail progress: {}/{}", idx + 1, rows.len());
            }
            details.insert(row.profile_link.clone(), result);
            tokio::time::sleep(delay).await;
        }

        details
    }
}
