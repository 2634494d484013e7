// src/email_filter/fallback.rs
use serde::{Deserialize, Serialize};

/// How to fill records whose scraped text yielded no valid address. The
/// source exhibited two behaviors for this step, so both are selectable
/// rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Leave the email empty.
    Disabled,
    /// Always `info@<name>.com`.
    Fixed,
    /// Prefix drawn from {info: 0.6, service: 0.2, contact: 0.2}, casing
    /// from {lowercase: 0.9, Capitalized: 0.05, UPPERCASE: 0.05}.
    Weighted,
}

pub struct FallbackGenerator {
    policy: FallbackPolicy,
    rng: fastrand::Rng,
}

impl FallbackGenerator {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            rng: fastrand::Rng::new(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(policy: FallbackPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Synthesizes an address from the company name, or "" when the policy
    /// is disabled or the name has no alphanumeric characters to build a
    /// domain from.
    pub fn generate(&mut self, company_name: &str) -> String {
        if self.policy == FallbackPolicy::Disabled {
            return String::new();
        }

        let name_clean: String = company_name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if name_clean.is_empty() {
            return String::new();
        }

        let prefix = match self.policy {
            FallbackPolicy::Fixed => "info".to_string(),
            FallbackPolicy::Weighted => self.weighted_prefix(),
            FallbackPolicy::Disabled => unreachable!(),
        };

        format!("{}@{}.com", prefix, name_clean)
    }

    fn weighted_prefix(&mut self) -> String {
        let word = match self.rng.f64() {
            r if r < 0.6 => "info",
            r if r < 0.8 => "service",
            _ => "contact",
        };

        match self.rng.f64() {
            r if r < 0.9 => word.to_string(),
            r if r < 0.95 => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => word.to_string(),
                }
            }
            _ => word.to_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policy_builds_info_address() {
        let mut gen = FallbackGenerator::new(FallbackPolicy::Fixed);
        assert_eq!(gen.generate("Acme Solar GmbH"), "info@acmesolargmbh.com");
    }

    #[test]
    fn name_is_lowercased_and_stripped_to_alphanumerics() {
        let mut gen = FallbackGenerator::new(FallbackPolicy::Fixed);
        assert_eq!(gen.generate("Sun & Sky, S.L. 24"), "info@sunskysl24.com");
    }

    #[test]
    fn unusable_name_yields_no_fallback() {
        let mut gen = FallbackGenerator::new(FallbackPolicy::Fixed);
        assert_eq!(gen.generate("!!! ---"), "");
        assert_eq!(gen.generate(""), "");
    }

    #[test]
    fn disabled_policy_yields_nothing() {
        let mut gen = FallbackGenerator::new(FallbackPolicy::Disabled);
        assert_eq!(gen.generate("Acme"), "");
    }

    #[test]
    fn weighted_policy_stays_within_vocabulary() {
        let mut gen = FallbackGenerator::with_seed(FallbackPolicy::Weighted, 42);
        let allowed = [
            "info", "Info", "INFO", "service", "Service", "SERVICE", "contact", "Contact",
            "CONTACT",
        ];
        for _ in 0..200 {
            let email = gen.generate("Acme");
            let prefix = email.split('@').next().unwrap();
            assert!(allowed.contains(&prefix), "unexpected prefix {}", prefix);
            assert!(email.ends_with("@acme.com"));
        }
    }

    #[test]
    fn weighted_policy_prefers_lowercase_info() {
        let mut gen = FallbackGenerator::with_seed(FallbackPolicy::Weighted, 7);
        let mut info_count = 0;
        let runs = 1000;
        for _ in 0..runs {
            if gen.generate("Acme").starts_with("info@") {
                info_count += 1;
            }
        }
        // 0.6 * 0.9 = 0.54 expected; loose bounds to stay seed-robust
        assert!(info_count > runs * 4 / 10, "info_count = {}", info_count);
        assert!(info_count < runs * 7 / 10, "info_count = {}", info_count);
    }
}
