// src/export/csv_export.rs
use crate::models::Batch;
use chrono::Utc;
use csv::Writer;
use std::path::{Path, PathBuf};
use tracing::info;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Raw scrape output, before any email work:
/// `Number, Company Name, Address, Link1, Link2`.
pub fn write_company_csv(batch: &Batch, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}_{}_Company{}.csv",
        batch.customer_type,
        batch.country,
        Utc::now().format("%Y%m%d")
    ));

    let mut wtr = Writer::from_path(&path)?;
    wtr.write_record(["Number", "Company Name", "Address", "Link1", "Link2"])?;
    for record in &batch.records {
        let number = record.sequence_number.to_string();
        wtr.write_record([
            number.as_str(),
            record.name.as_str(),
            record.address.as_str(),
            record.profile_link.as_str(),
            record.website_link.as_str(),
        ])?;
    }
    wtr.flush()?;

    info!(
        "Saved {} company rows to {}",
        batch.records.len(),
        path.display()
    );
    Ok(path)
}

/// Post-pipeline output: `Number, Company Name, Email, Company Website`.
pub fn write_cleaned_csv(batch: &Batch, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}_{}_Cleaned{}.csv",
        batch.customer_type,
        batch.country,
        Utc::now().format("%Y%m%d")
    ));

    let mut wtr = Writer::from_path(&path)?;
    wtr.write_record(["Number", "Company Name", "Email", "Company Website"])?;
    for record in &batch.records {
        let number = record.sequence_number.to_string();
        wtr.write_record([
            number.as_str(),
            record.name.as_str(),
            record.email.as_str(),
            record.website_link.as_str(),
        ])?;
    }
    wtr.flush()?;

    info!(
        "Saved {} cleaned rows to {}",
        batch.records.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyRecord;

    fn sample_batch() -> Batch {
        Batch::new(
            "Spain",
            "Installers",
            vec![CompanyRecord {
                sequence_number: 1,
                name: "Acme Solar".to_string(),
                address: "12 Main St".to_string(),
                profile_link: "/acme-solar".to_string(),
                website_link: "https://acme.test".to_string(),
                raw_email_text: None,
                email: "sales@acme.test".to_string(),
            }],
        )
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "directory-scraper-test-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn company_csv_has_expected_columns() {
        let dir = temp_dir("company-csv");
        let path = write_company_csv(&sample_batch(), &dir).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("Number,Company Name,Address,Link1,Link2"));
        assert!(content.contains("1,Acme Solar,12 Main St,/acme-solar,https://acme.test"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn cleaned_csv_has_expected_columns() {
        let dir = temp_dir("cleaned-csv");
        let path = write_cleaned_csv(&sample_batch(), &dir).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("Number,Company Name,Email,Company Website"));
        assert!(content.contains("1,Acme Solar,sales@acme.test,https://acme.test"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
