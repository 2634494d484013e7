// src/email_filter/tables.rs
use serde::{Deserialize, Serialize};

/// Reference data driving the email filter pipeline. Injectable so the
/// pipeline can be tested against synthetic tables; the defaults match the
/// noise patterns of the directory's markup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterTables {
    #[serde(default = "default_exclude_extensions")]
    pub exclude_extensions: Vec<String>,
    #[serde(default = "default_valid_tlds")]
    pub valid_tlds: Vec<String>,
    #[serde(default = "default_blacklist_keywords")]
    pub blacklist_keywords: Vec<String>,
    #[serde(default = "default_prefix_keywords")]
    pub prefix_keywords: Vec<String>,
}

impl Default for FilterTables {
    fn default() -> Self {
        Self {
            exclude_extensions: default_exclude_extensions(),
            valid_tlds: default_valid_tlds(),
            blacklist_keywords: default_blacklist_keywords(),
            prefix_keywords: default_prefix_keywords(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Static-asset file extensions. A scraped "email" ending in one of these
/// is an image/document filename, not an address.
fn default_exclude_extensions() -> Vec<String> {
    to_strings(&[
        "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tiff", "ico", "pdf", "doc", "docx",
        "xls", "xlsx", "ppt", "pptx", "zip", "rar", "tar", "gz", "mp3", "mp4", "avi", "mov",
        "wmv", "flv", "wav", "ogg", "webm",
    ])
}

// Order matters: the TLD truncation regex is an ordered alternation, so
// "com" must come before "co" and "coop" before "co".
fn default_valid_tlds() -> Vec<String> {
    to_strings(&[
        "com", "net", "org", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "museum",
        "coop", "aero", "xxx", "idv", "me", "mobi", "asia", "tel", "eu", "de", "uk", "fr", "it",
        "es", "nl", "ru", "cn", "jp", "kr", "au", "nz", "ca", "us", "mx", "br", "ch", "at", "be",
        "dk", "fi", "gr", "ie", "no", "pt", "se", "cat", "pl", "cz", "hu", "ro", "si", "tr", "co",
        "io", "ai", "app", "dev", "xyz", "online", "tech", "shop", "store", "site", "website",
        "blog", "cloud",
    ])
}

/// Substrings that mark UI/image asset names the canonical regex sometimes
/// matches inside.
fn default_blacklist_keywords() -> Vec<String> {
    to_strings(&[
        "2x",
        "3x",
        "scaled",
        "copy",
        "copia",
        "mesa-de-trabajo",
        "icon",
        "logo",
        "banner",
        "header",
        "footer",
        "background",
        "image",
        "img",
        "photo",
        "picture",
        "avatar",
        "profile",
        "thumb",
        "thumbnail",
        "slide",
        "slide-",
        "@2x",
        "@3x",
        "-copy",
        "-scaled",
        "-copia",
        "-icon",
        "-logo",
        "-banner",
        "-header",
        "-footer",
        "-background",
        "-image",
        "-img",
        "-photo",
        "-picture",
        "-avatar",
        "-profile",
        "-thumb",
        "-thumbnail",
        "-slide",
    ])
}

/// Generic mailbox words the site's templates concatenate in front of the
/// real local part.
fn default_prefix_keywords() -> Vec<String> {
    to_strings(&[
        "info", "hola", "admin", "contact", "mail", "office", "web", "hello", "servicio",
        "ventas", "support", "service",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let tables = FilterTables::default();
        assert!(tables.exclude_extensions.len() >= 25);
        assert!(tables.valid_tlds.len() >= 60);
        assert!(tables.blacklist_keywords.contains(&"logo".to_string()));
        assert!(tables.prefix_keywords.contains(&"info".to_string()));
    }

    #[test]
    fn com_precedes_co_in_tld_table() {
        let tlds = default_valid_tlds();
        let com = tlds.iter().position(|t| t == "com").unwrap();
        let co = tlds.iter().position(|t| t == "co").unwrap();
        assert!(com < co);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let tables: FilterTables = serde_yaml::from_str("valid_tlds: [test]").unwrap();
        assert_eq!(tables.valid_tlds, vec!["test".to_string()]);
        assert!(!tables.exclude_extensions.is_empty());
        assert!(!tables.prefix_keywords.is_empty());
    }
}
