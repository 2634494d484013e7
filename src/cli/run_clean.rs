use dialoguer::{theme::ColorfulTheme, Input};
use std::path::Path;
use tracing::info;

use crate::cli::run_export::parse_batch_identity;
use crate::models::{Batch, BatchStats, CliApp, CompanyRecord, Result};

impl CliApp {
    pub async fn run_clean(&mut self) -> Result<()> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("CSV file to clean (must have an Email column)")
            .interact_text()?;

        let stats = self.clean_csv_file(Path::new(&path))?;
        println!(
            "\n📊 Cleaned {} records: {:.2}% empty emails, {} duplicated addresses ({} records blanked)",
            stats.total_records,
            stats.empty_ratio() * 100.0,
            stats.duplicate_addresses,
            stats.records_blanked
        );
        Ok(())
    }

    /// Runs an already-exported CSV through the filter pipeline and writes
    /// a `_cleaned` copy with the Email column replaced. A missing Email
    /// column is a configuration error that aborts this batch only.
    pub fn clean_csv_file(&mut self, path: &Path) -> Result<BatchStats> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let email_idx = headers
            .iter()
            .position(|h| h.trim() == "Email")
            .ok_or_else(|| format!("{}: required column 'Email' not found", path.display()))?;
        let name_idx = headers.iter().position(|h| h.trim() == "Company Name");
        let website_idx = headers
            .iter()
            .position(|h| h.trim() == "Company Website" || h.trim() == "Website");

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>()?;

        let records: Vec<CompanyRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| CompanyRecord {
                sequence_number: i as u32 + 1,
                name: name_idx
                    .and_then(|idx| row.get(idx))
                    .unwrap_or("")
                    .to_string(),
                address: String::new(),
                profile_link: String::new(),
                website_link: website_idx
                    .and_then(|idx| row.get(idx))
                    .unwrap_or("")
                    .to_string(),
                raw_email_text: row
                    .get(email_idx)
                    .map(|s| s.to_string())
                    .filter(|s| !s.trim().is_empty()),
                email: String::new(),
            })
            .collect();

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("batch");
        let (customer_type, country) = parse_batch_identity(stem);

        let mut batch = Batch::new(&country, &customer_type, records);
        let stats = self.processor.process(&mut batch);

        let out_dir = Path::new(&self.config.output.directory);
        std::fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join(format!("{}_cleaned.csv", stem));

        let mut wtr = csv::Writer::from_path(&out_path)?;
        wtr.write_record(&headers)?;
        for (row, record) in rows.iter().zip(&batch.records) {
            let mut fields: Vec<String> = row.iter().map(|s| s.to_string()).collect();
            while fields.len() <= email_idx {
                fields.push(String::new());
            }
            fields[email_idx] = record.email.clone();
            wtr.write_record(&fields)?;
        }
        wtr.flush()?;

        info!(
            "Saved {} cleaned rows to {}",
            batch.records.len(),
            out_path.display()
        );
        Ok(stats)
    }
}
