// src/export/xlsx_export.rs
use crate::models::Batch;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tracing::info;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const FINAL_COLUMNS: [&str; 6] = [
    "Number",
    "Country",
    "Company Name",
    "Email",
    "Customer Type",
    "Company Website",
];

/// Final per-country spreadsheet: `<CustomerType>_<Country>.xlsx` with one
/// sheet named after the customer type.
pub fn write_final_xlsx(batch: &Batch, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_{}.xlsx", batch.customer_type, batch.country));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(batch.customer_type.as_str())?;

    for (col, header) in FINAL_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in batch.records.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_number(row, 0, record.sequence_number as f64)?;
        worksheet.write_string(row, 1, batch.country.as_str())?;
        worksheet.write_string(row, 2, record.name.as_str())?;
        worksheet.write_string(row, 3, record.email.as_str())?;
        worksheet.write_string(row, 4, batch.customer_type.as_str())?;
        worksheet.write_string(row, 5, record.website_link.as_str())?;
    }

    workbook.save(&path)?;
    info!(
        "Saved {} records to {}",
        batch.records.len(),
        path.display()
    );
    Ok(path)
}
