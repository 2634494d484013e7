// src/scraper/listing.rs
use crate::models::RawListingRow;
use scraper::{Html, Selector};
use tracing::debug;

/// Parses directory listing pages. Company rows are `tr.mkjs-el` elements;
/// the company anchor carries a per-country `data-event` attribute which
/// also filters out ad rows and special pages.
pub struct ListingExtractor {
    row_selector: Selector,
    address_selector: Selector,
    anchor_selector: Selector,
}

impl ListingExtractor {
    pub fn new(data_event: &str) -> Self {
        Self {
            row_selector: Selector::parse("tr.mkjs-el").unwrap(),
            address_selector: Selector::parse("td.no-left-right-padding").unwrap(),
            anchor_selector: Selector::parse(&format!(r#"a[data-event="{}"]"#, data_event))
                .unwrap(),
        }
    }

    /// Extracts listing rows, assigning sequence numbers in scan order.
    /// Rows missing a name or profile link are skipped.
    pub fn extract_rows(&self, html: &str, next_sequence: &mut u32) -> Vec<RawListingRow> {
        let document = Html::parse_document(html);
        let mut rows = Vec::new();

        for row in document.select(&self.row_selector) {
            let address = row
                .select(&self.address_selector)
                .next()
                .map(|td| td.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            let anchor = row.select(&self.anchor_selector).next();
            let name = anchor
                .map(|a| a.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            let profile_link = anchor
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default()
                .to_string();

            if name.is_empty() || profile_link.is_empty() {
                continue;
            }

            rows.push(RawListingRow {
                sequence_number: *next_sequence,
                name,
                address,
                profile_link,
            });
            *next_sequence += 1;
        }

        debug!("Extracted {} listing rows", rows.len());
        rows
    }
}
