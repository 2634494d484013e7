// src/export/mod.rs
pub mod csv_export;
pub mod stats_export;
pub mod xlsx_export;

pub use csv_export::{write_cleaned_csv, write_company_csv};
pub use stats_export::write_stats_json;
pub use xlsx_export::write_final_xlsx;
