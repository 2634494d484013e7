// src/scraper/detail.rs
use crate::models::DetailPageResult;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

/// Parses company detail pages: the external website link plus whatever
/// email-like text the page exposes. Addresses come in three shapes, tried
/// in priority order: an obfuscated `let eee = '...'` script variable, a
/// `mailto:` link, and plain text (including `[at]` / `(at)` spellings).
pub struct DetailExtractor {
    website_selector: Selector,
    eee_regex: Regex,
    mailto_regex: Regex,
    plain_patterns: Vec<Regex>,
}

impl DetailExtractor {
    pub fn new() -> Self {
        Self {
            website_selector: Selector::parse(r#"a[itemprop="url"]"#).unwrap(),
            eee_regex: Regex::new(r#"let\s+eee\s*=\s*['"]([^'"]+)['"]"#).unwrap(),
            mailto_regex: Regex::new(
                r"mailto:([a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+)",
            )
            .unwrap(),
            plain_patterns: vec![
                Regex::new(r"(?i)[\w.-]+\s*@\s*[\w.-]+\.[a-zA-Z]{2,}").unwrap(),
                Regex::new(r"(?i)[\w.-]+\s*\[at\]\s*[\w.-]+\.[a-zA-Z]{2,}").unwrap(),
                Regex::new(r"(?i)[\w.-]+\s*\(at\)\s*[\w.-]+\.[a-zA-Z]{2,}").unwrap(),
            ],
        }
    }

    pub fn extract(&self, html: &str) -> DetailPageResult {
        let document = Html::parse_document(html);

        let website_link = document
            .select(&self.website_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let raw_email_text = self.extract_email_text(html, &document);

        DetailPageResult {
            website_link,
            raw_email_text,
        }
    }

    fn extract_email_text(&self, html: &str, document: &Html) -> Option<String> {
        if let Some(caps) = self.eee_regex.captures(html) {
            if let Some(decoded) = self.decode_obfuscated(&caps[1]) {
                debug!("Recovered obfuscated address from script variable");
                return Some(decoded);
            }
        }

        if let Some(caps) = self.mailto_regex.captures(html) {
            return Some(caps[1].to_string());
        }

        let text = document.root_element().text().collect::<Vec<_>>().join(" ");
        for pattern in &self.plain_patterns {
            if let Some(m) = pattern.find(&text) {
                let candidate = m
                    .as_str()
                    .replace("(at)", "@")
                    .replace("[at]", "@")
                    .replace(' ', "")
                    .replace(['\n', '\r'], "");
                return Some(candidate.trim().to_string());
            }
        }

        None
    }

    /// The site stores addresses as `local#109#103#.cndomain#103#example123cn`;
    /// a fixed substitution recovers `local@domain.com`. Returns None when
    /// the decoded text still carries no '@'.
    fn decode_obfuscated(&self, encoded: &str) -> Option<String> {
        let decoded = encoded
            .replacen("#109#103#.cn", "@", 1)
            .replacen("#103#example123cn", ".com", 1);
        if decoded.contains('@') {
            Some(decoded)
        } else {
            None
        }
    }
}

impl Default for DetailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_website_link() {
        let html = r#"<html><body>
            <a itemprop="url" href="https://acme.example.com">Website</a>
        </body></html>"#;
        let result = DetailExtractor::new().extract(html);
        assert_eq!(result.website_link, "https://acme.example.com");
    }

    #[test]
    fn decodes_obfuscated_script_variable() {
        let html = r#"<html><body>
            <script>let eee = 'sales#109#103#.cnacme#103#example123cn';</script>
        </body></html>"#;
        let result = DetailExtractor::new().extract(html);
        assert_eq!(result.raw_email_text.as_deref(), Some("sales@acme.com"));
    }

    #[test]
    fn obfuscated_variable_takes_priority_over_mailto() {
        let html = r#"<html><body>
            <script>let eee = 'sales#109#103#.cnacme#103#example123cn';</script>
            <a href="mailto:other@acme.com">Mail us</a>
        </body></html>"#;
        let result = DetailExtractor::new().extract(html);
        assert_eq!(result.raw_email_text.as_deref(), Some("sales@acme.com"));
    }

    #[test]
    fn falls_back_to_mailto_link() {
        let html = r#"<html><body><a href="mailto:hello@acme.com">Mail us</a></body></html>"#;
        let result = DetailExtractor::new().extract(html);
        assert_eq!(result.raw_email_text.as_deref(), Some("hello@acme.com"));
    }

    #[test]
    fn recovers_plain_text_with_at_spelling() {
        let html = "<html><body><p>Reach us: sales [at] acme.com</p></body></html>";
        let result = DetailExtractor::new().extract(html);
        assert_eq!(result.raw_email_text.as_deref(), Some("sales@acme.com"));
    }

    #[test]
    fn page_without_contact_yields_none() {
        let html = "<html><body><p>No contact information here.</p></body></html>";
        let result = DetailExtractor::new().extract(html);
        assert!(result.raw_email_text.is_none());
        assert_eq!(result.website_link, "");
    }
}
