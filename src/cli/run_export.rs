use dialoguer::{theme::ColorfulTheme, Input};
use std::path::{Path, PathBuf};

use crate::export;
use crate::models::{Batch, CliApp, CompanyRecord, Result};

impl CliApp {
    pub async fn run_export(&mut self) -> Result<()> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Cleaned CSV to export (Number, Company Name, Email columns required)")
            .interact_text()?;

        let out_path = self.export_csv_to_xlsx(Path::new(&path))?;
        println!("\n📤 Spreadsheet saved to {}", out_path.display());
        Ok(())
    }

    /// Turns a cleaned CSV into the final per-country spreadsheet. Missing
    /// required columns abort this export only.
    pub fn export_csv_to_xlsx(&self, path: &Path) -> Result<PathBuf> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);
        for required in ["Number", "Company Name", "Email"] {
            if column(required).is_none() {
                return Err(format!(
                    "{}: required column '{}' not found",
                    path.display(),
                    required
                )
                .into());
            }
        }
        let number_idx = column("Number").unwrap_or_default();
        let name_idx = column("Company Name").unwrap_or_default();
        let email_idx = column("Email").unwrap_or_default();
        let website_idx = column("Company Website").or_else(|| column("Website"));

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
            records.push(CompanyRecord {
                sequence_number: row
                    .get(number_idx)
                    .and_then(|n| n.trim().parse().ok())
                    .unwrap_or(i as u32 + 1),
                name: field(name_idx),
                address: String::new(),
                profile_link: String::new(),
                website_link: website_idx.map(field).unwrap_or_default(),
                raw_email_text: None,
                email: field(email_idx),
            });
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("batch");
        let (customer_type, country) = parse_batch_identity(stem);

        let batch = Batch::new(&country, &customer_type, records);
        let out_dir = Path::new(&self.config.output.directory);
        std::fs::create_dir_all(out_dir)?;
        export::write_final_xlsx(&batch, out_dir)
    }
}

/// Recovers customer type and country from a batch file name such as
/// `Installers_Spain_Email_20240131`. Country segments with spaces arrive
/// percent-encoded from the listing URLs.
pub(crate) fn parse_batch_identity(stem: &str) -> (String, String) {
    let mut parts = stem.split('_');
    let customer_type = parts.next().unwrap_or("Unknown").to_string();
    let country = parts
        .next()
        .map(|c| c.replace("%20", " "))
        .unwrap_or_else(|| "Unknown".to_string());
    (customer_type, country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_country_from_file_stems() {
        assert_eq!(
            parse_batch_identity("Installers_Spain_Email_20240131"),
            ("Installers".to_string(), "Spain".to_string())
        );
        assert_eq!(
            parse_batch_identity("Wholesalers_United%20Kingdom_Cleaned20240131"),
            ("Wholesalers".to_string(), "United Kingdom".to_string())
        );
        assert_eq!(
            parse_batch_identity("oddname"),
            ("oddname".to_string(), "Unknown".to_string())
        );
    }
}
