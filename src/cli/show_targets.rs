use crate::models::{CliApp, Result};

impl CliApp {
    pub fn show_targets(&self) -> Result<()> {
        println!("\n📊 Configured Targets");
        println!("═══════════════════════════════════════");

        if self.targets.is_empty() {
            println!("  (none - check targets.yml)");
        }
        for target in &self.targets {
            println!(
                "  🌍 {} / {} - pages {}-{}{}",
                target.customer_type,
                target.country,
                target.start_page,
                target.end_page,
                target
                    .limit
                    .map(|l| format!(" (limit {})", l))
                    .unwrap_or_default()
            );
        }

        let tables = &self.config.filters;
        println!("\n🧹 Filter tables");
        println!("  Excluded extensions: {}", tables.exclude_extensions.len());
        println!("  Accepted TLDs:       {}", tables.valid_tlds.len());
        println!("  Blacklist keywords:  {}", tables.blacklist_keywords.len());
        println!("  Vendor prefixes:     {}", tables.prefix_keywords.len());
        println!("  Fallback policy:     {:?}", self.config.fallback.policy);
        println!("  Output directory:    {}", self.config.output.directory);

        Ok(())
    }
}
