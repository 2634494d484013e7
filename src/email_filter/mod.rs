// src/email_filter/mod.rs
pub mod dedup;
pub mod fallback;
pub mod normalizer;
pub mod tables;

pub use dedup::{DuplicateReport, DuplicateResolver};
pub use fallback::{FallbackGenerator, FallbackPolicy};
pub use normalizer::EmailNormalizer;
pub use tables::FilterTables;
