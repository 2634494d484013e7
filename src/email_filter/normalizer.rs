// src/email_filter/normalizer.rs
use crate::email_filter::tables::FilterTables;
use regex::Regex;

/// Turns noisy email-like text scraped from directory markup into a
/// canonical address, or an empty string when nothing plausible survives.
///
/// The stages run in a fixed order: the recovery heuristics (asset-filename
/// short-circuit, label strip, vendor-prefix truncation, trailing-TLD
/// truncation) each narrow the candidate before the validation gates
/// (canonical match, digit strip, extension/blacklist/TLD/length checks)
/// decide whether to keep it.
pub struct EmailNormalizer {
    tables: FilterTables,
    label_prefix: Regex,
    tld_truncate: Regex,
    canonical: Regex,
    leading_digits: Regex,
}

impl EmailNormalizer {
    pub fn new(tables: &FilterTables) -> Self {
        let tld_alternation = tables
            .valid_tlds
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            tables: tables.clone(),
            label_prefix: Regex::new(r"(?i)^e[-_ ]?mail[-_. ]*").unwrap(),
            // greedy so backtracking lands on the right-most ".<tld>";
            // a lazy scan would stop at a tld embedded mid-domain and
            // mangle multi-label hosts like "site.co.uk"
            tld_truncate: Regex::new(&format!(r"(?i)@[^@]*\.(?:{})", tld_alternation)).unwrap(),
            canonical: Regex::new(r"([\w.-]+)@([\w.-]+\.[a-zA-Z]{2,})").unwrap(),
            leading_digits: Regex::new(r"^(\d+)([a-zA-Z].*)$").unwrap(),
        }
    }

    /// Pure and total: any input maps to either "" or an address satisfying
    /// the full validity contract.
    pub fn normalize(&self, raw: &str) -> String {
        let mut working = raw.trim().to_string();
        if working.is_empty() {
            return String::new();
        }
        if self.is_static_resource(&working) {
            return String::new();
        }

        // "Email info@acme.com" style label+value concatenation
        working = self.label_prefix.replace(&working, "").to_string();

        working = self.strip_vendor_prefix(&working);

        // drop tracking suffixes and other garbage trailing the right-most
        // "@<domain>.<tld>"
        if let Some(m) = self.tld_truncate.find_iter(&working).last() {
            working.truncate(m.end());
        }

        let (local, domain) = match self.canonical.captures(&working) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => return String::new(),
        };

        let local = self.strip_leading_digits(&local);

        let working_lower = working.to_lowercase();
        let domain_lower = domain.to_lowercase();
        for ext in &self.tables.exclude_extensions {
            let suffix = format!(".{}", ext);
            if domain_lower.ends_with(&suffix) || working_lower.ends_with(&suffix) {
                return String::new();
            }
        }

        let local_lower = local.to_lowercase();
        for kw in &self.tables.blacklist_keywords {
            if local_lower.contains(kw.as_str()) || domain_lower.contains(kw.as_str()) {
                return String::new();
            }
        }

        if !self
            .tables
            .valid_tlds
            .iter()
            .any(|tld| domain_lower.ends_with(&format!(".{}", tld)))
        {
            return String::new();
        }

        let local_len = local.chars().count();
        if !(2..=64).contains(&local_len) {
            return String::new();
        }

        format!("{}@{}", local, domain)
    }

    /// True when the trimmed, lowercased text ends in a known binary or
    /// document extension, i.e. an asset filename was scraped as "email".
    pub fn is_static_resource(&self, text: &str) -> bool {
        let lowered = text.trim().to_lowercase();
        self.tables
            .exclude_extensions
            .iter()
            .any(|ext| lowered.ends_with(&format!(".{}", ext)))
    }

    /// "contactjsmith@x.com" -> "jsmith@x.com". Only fires when the local
    /// part is strictly longer than the matched word; "contact@x.com" stays
    /// untouched since there is nothing to recover.
    fn strip_vendor_prefix(&self, email: &str) -> String {
        let Some(at_pos) = email.find('@') else {
            return email.to_string();
        };
        if at_pos == 0 {
            return email.to_string();
        }
        let (local, rest) = email.split_at(at_pos);
        let local_lower = local.to_lowercase();

        for kw in &self.tables.prefix_keywords {
            let kw_lower = kw.to_lowercase();
            if local_lower.starts_with(&kw_lower) {
                if let Some(remainder) = local.get(kw_lower.len()..) {
                    if !remainder.is_empty() {
                        return format!("{}{}", remainder, rest);
                    }
                }
                break;
            }
        }
        email.to_string()
    }

    /// Drops id runs some templates prepend to the local part, e.g.
    /// "2024jdoe" -> "jdoe". First the local part is trimmed to the
    /// right-most digit not preceded by any letter, then the remaining
    /// leading digit run (one or more digits) is removed.
    fn strip_leading_digits(&self, local: &str) -> String {
        let mut cut = None;
        let mut seen_alpha = false;
        for (idx, c) in local.char_indices() {
            if c.is_alphabetic() {
                seen_alpha = true;
            }
            if c.is_ascii_digit() && !seen_alpha {
                cut = Some(idx);
            }
        }
        let trimmed = match cut {
            Some(idx) => &local[idx..],
            None => local,
        };

        match self.leading_digits.captures(trimmed) {
            Some(caps) => caps[2].to_string(),
            None => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> EmailNormalizer {
        EmailNormalizer::new(&FilterTables::default())
    }

    #[test]
    fn plain_address_passes_through() {
        assert_eq!(normalizer().normalize("jsmith@example.com"), "jsmith@example.com");
    }

    #[test]
    fn vendor_prefix_is_stripped() {
        assert_eq!(
            normalizer().normalize("infojsmith@example.com"),
            "jsmith@example.com"
        );
    }

    #[test]
    fn vendor_prefix_alone_is_kept() {
        assert_eq!(normalizer().normalize("info@example.com"), "info@example.com");
    }

    #[test]
    fn leading_digits_are_stripped() {
        assert_eq!(normalizer().normalize("2024jdoe@company.io"), "jdoe@company.io");
    }

    #[test]
    fn single_leading_digit_is_stripped() {
        assert_eq!(normalizer().normalize("7jdoe@company.io"), "jdoe@company.io");
    }

    #[test]
    fn interior_digits_are_untouched() {
        assert_eq!(normalizer().normalize("jdoe2024@company.io"), "jdoe2024@company.io");
    }

    #[test]
    fn blacklist_substring_rejects() {
        assert_eq!(normalizer().normalize("logo-banner@site.com"), "");
    }

    #[test]
    fn static_resource_short_circuits() {
        assert_eq!(normalizer().normalize("photo.jpg"), "");
        assert_eq!(normalizer().normalize("  brochure.PDF  "), "");
    }

    #[test]
    fn trailing_garbage_is_truncated() {
        assert_eq!(
            normalizer().normalize("contact@firm.xyz???tracking=1"),
            "contact@firm.xyz"
        );
    }

    #[test]
    fn multi_label_domains_keep_their_final_tld() {
        // "co" and "com" are both accepted; truncation must bind to the
        // right-most occurrence, not an earlier label
        assert_eq!(normalizer().normalize("user@site.co.uk"), "user@site.co.uk");
        assert_eq!(
            normalizer().normalize("jdoe@mail.company.de"),
            "jdoe@mail.company.de"
        );
        assert_eq!(
            normalizer().normalize("user@site.co.uk?ref=listing"),
            "user@site.co.uk"
        );
    }

    #[test]
    fn asset_domain_with_trailing_text_is_rejected() {
        // doesn't end in an extension, so the early short-circuit lets it
        // through; the re-check on the extracted domain must catch it
        assert_eq!(normalizer().normalize("user@site.png contact page"), "");
        assert_eq!(normalizer().normalize("user@site.png"), "");
    }

    #[test]
    fn email_label_is_stripped() {
        assert_eq!(normalizer().normalize("email_jdoe@x.com"), "jdoe@x.com");
        assert_eq!(normalizer().normalize("E-mail jdoe@x.com"), "jdoe@x.com");
    }

    #[test]
    fn unknown_tld_rejects() {
        assert_eq!(normalizer().normalize("jdoe@example.invalidtld"), "");
    }

    #[test]
    fn no_address_rejects() {
        assert_eq!(normalizer().normalize("no email here"), "");
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("   "), "");
    }

    #[test]
    fn local_part_length_bounds() {
        assert_eq!(normalizer().normalize("ab@x.com"), "ab@x.com");
        assert_eq!(normalizer().normalize("a@x.com"), "");

        let local_64 = "x".repeat(64);
        assert_eq!(
            normalizer().normalize(&format!("{}@x.com", local_64)),
            format!("{}@x.com", local_64)
        );

        let local_65 = "x".repeat(65);
        assert_eq!(normalizer().normalize(&format!("{}@x.com", local_65)), "");
    }

    #[test]
    fn domain_casing_is_preserved() {
        assert_eq!(normalizer().normalize("jdoe@Example.COM"), "jdoe@Example.COM");
    }

    #[test]
    fn total_over_arbitrary_noise() {
        for input in [
            "@@@@",
            "....",
            "@x.com",
            "héllo wörld",
            "a@b@c@d.com????",
            "\u{0}\u{1}binary",
            "mailto:",
        ] {
            // must not panic, output is "" or revalidates cleanly
            let out = normalizer().normalize(input);
            if !out.is_empty() {
                assert_eq!(normalizer().normalize(&out), out);
            }
        }
    }

    #[test]
    fn canonical_outputs_are_stable() {
        let n = normalizer();
        for input in [
            "infojsmith@example.com",
            "2024jdoe@company.io",
            "contact@firm.xyz???tracking=1",
            "email_jdoe@x.com",
        ] {
            let once = n.normalize(input);
            assert!(!once.is_empty());
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn synthetic_tables_are_honored() {
        let tables = FilterTables {
            exclude_extensions: vec!["xyz".to_string()],
            valid_tlds: vec!["test".to_string()],
            blacklist_keywords: vec!["spam".to_string()],
            prefix_keywords: vec!["box".to_string()],
        };
        let n = EmailNormalizer::new(&tables);
        assert_eq!(n.normalize("boxuser@site.test"), "user@site.test");
        assert_eq!(n.normalize("user@site.com"), "");
        assert_eq!(n.normalize("spamuser@site.test"), "");
        assert_eq!(n.normalize("file.xyz"), "");
    }
}
