// src/scraper/mod.rs
pub mod detail;
pub mod fetcher;
pub mod listing;

pub use detail::DetailExtractor;
pub use fetcher::{PageFetcher, ProxyRotation};
pub use listing::ListingExtractor;
