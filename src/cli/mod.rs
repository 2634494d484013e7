// src/cli/mod.rs
pub mod cli;
pub mod run;
pub mod run_clean;
pub mod run_export;
pub mod run_scrape;
pub mod show_targets;

pub use cli::MenuAction;
