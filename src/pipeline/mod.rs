// src/pipeline/mod.rs
use std::collections::HashMap;

use crate::config::Config;
use crate::email_filter::{DuplicateResolver, EmailNormalizer, FallbackGenerator};
use crate::models::{Batch, BatchStats, CompanyRecord, DetailPageResult, RawListingRow};
use tracing::{debug, info};

/// Drives one country/category batch end to end: listing rows plus detail
/// results in, normalized + deduplicated records and counters out. All
/// data-quality problems resolve to empty fields; nothing here returns an
/// error for a bad record.
pub struct BatchProcessor {
    pub normalizer: EmailNormalizer,
    pub fallback: FallbackGenerator,
    pub resolver: DuplicateResolver,
}

impl BatchProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            normalizer: EmailNormalizer::new(&config.filters),
            fallback: FallbackGenerator::new(config.fallback.policy),
            resolver: DuplicateResolver::new(),
        }
    }

    /// Joins listing rows with their detail-page results, keyed by profile
    /// link. A row whose detail fetch failed keeps empty website/email
    /// fields and proceeds.
    pub fn assemble(
        &self,
        rows: Vec<RawListingRow>,
        details: &HashMap<String, DetailPageResult>,
    ) -> Vec<CompanyRecord> {
        rows.into_iter()
            .map(|row| {
                let mut record = CompanyRecord::from_listing_row(row);
                if let Some(detail) = details.get(&record.profile_link) {
                    record.website_link = detail.website_link.clone();
                    record.raw_email_text = detail.raw_email_text.clone();
                }
                record
            })
            .collect()
    }

    /// Normalization, fallback generation, then duplicate resolution over
    /// the closed batch. The resolver must only run here, after every
    /// record's email is final.
    pub fn process(&mut self, batch: &mut Batch) -> BatchStats {
        for record in &mut batch.records {
            let normalized = record
                .raw_email_text
                .as_deref()
                .map(|text| self.normalizer.normalize(text))
                .unwrap_or_default();

            record.email = if normalized.is_empty() {
                let generated = self.fallback.generate(&record.name);
                if !generated.is_empty() {
                    debug!(
                        "[{}] no valid scraped address, generated {}",
                        record.sequence_number, generated
                    );
                }
                generated
            } else {
                normalized
            };
        }

        let report = self.resolver.resolve(&mut batch.records);

        let total_records = batch.records.len();
        let empty_emails = batch
            .records
            .iter()
            .filter(|r| r.email.is_empty())
            .count();

        let stats = BatchStats {
            total_records,
            empty_emails,
            duplicate_addresses: report.duplicated.len(),
            records_blanked: report.records_affected,
        };

        info!(
            "Processed {}/{}: {} records, {:.2}% empty, {} duplicated addresses",
            batch.customer_type,
            batch.country,
            stats.total_records,
            stats.empty_ratio() * 100.0,
            stats.duplicate_addresses
        );

        stats
    }
}
