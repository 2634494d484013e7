use serde::{Deserialize, Serialize};

use crate::{
    config::Config, pipeline::BatchProcessor, scraper::PageFetcher, targets::CountryTarget,
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One row as parsed from a directory listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListingRow {
    pub sequence_number: u32,
    pub name: String,
    pub address: String,
    pub profile_link: String,
}

/// What a detail-page fetch yields. Both fields may be empty when the
/// fetch failed or the page carries no contact information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailPageResult {
    pub website_link: String,
    pub raw_email_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub sequence_number: u32,
    pub name: String,
    pub address: String,
    pub profile_link: String,
    pub website_link: String,
    pub raw_email_text: Option<String>,
    /// Either empty or a canonical address that survived the full filter
    /// pipeline. Blanked again at batch time when duplicated.
    pub email: String,
}

impl CompanyRecord {
    pub fn from_listing_row(row: RawListingRow) -> Self {
        Self {
            sequence_number: row.sequence_number,
            name: row.name,
            address: row.address,
            profile_link: row.profile_link,
            website_link: String::new(),
            raw_email_text: None,
            email: String::new(),
        }
    }
}

/// An ordered set of records sharing one country/customer-type pair.
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    pub country: String,
    pub customer_type: String,
    pub records: Vec<CompanyRecord>,
}

impl Batch {
    pub fn new(country: &str, customer_type: &str, records: Vec<CompanyRecord>) -> Self {
        Self {
            country: country.to_string(),
            customer_type: customer_type.to_string(),
            records,
        }
    }
}

/// Aggregate counters for one processed batch. Computed at export time,
/// never persisted mid-pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub total_records: usize,
    pub empty_emails: usize,
    pub duplicate_addresses: usize,
    pub records_blanked: usize,
}

impl BatchStats {
    pub fn empty_ratio(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.empty_emails as f64 / self.total_records as f64
        }
    }
}

pub struct CliApp {
    pub config: Config,
    pub targets: Vec<CountryTarget>,
    pub fetcher: PageFetcher,
    pub processor: BatchProcessor,
}
