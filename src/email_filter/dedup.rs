// src/email_filter/dedup.rs
use crate::models::CompanyRecord;
use std::collections::HashMap;
use tracing::info;

/// Which addresses were duplicated across a batch and how many records
/// were blanked because of it.
#[derive(Debug, Clone, Default)]
pub struct DuplicateReport {
    pub duplicated: Vec<String>,
    pub records_affected: usize,
}

pub struct DuplicateResolver;

impl DuplicateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Blanks the email on every record whose address appears more than
    /// once in the batch. No record wins: the duplicate signal cannot be
    /// resolved from the data we have, so all copies are dropped.
    ///
    /// Requires the batch to be closed; a partial batch could be missing
    /// the record that turns a unique address into a duplicate. Idempotent:
    /// a second run finds nothing to blank.
    pub fn resolve(&self, records: &mut [CompanyRecord]) -> DuplicateReport {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records.iter() {
            if !record.email.is_empty() {
                *counts.entry(record.email.as_str()).or_insert(0) += 1;
            }
        }

        let mut duplicated: Vec<String> = counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(email, _)| email.to_string())
            .collect();
        duplicated.sort();

        let mut records_affected = 0;
        if !duplicated.is_empty() {
            for record in records.iter_mut() {
                if duplicated.iter().any(|d| d == &record.email) {
                    record.email.clear();
                    records_affected += 1;
                }
            }
            info!(
                "Blanked {} records sharing {} duplicated addresses",
                records_affected,
                duplicated.len()
            );
        }

        DuplicateReport {
            duplicated,
            records_affected,
        }
    }
}
