//! Experimenter email allowlist loaded from `ALLOWED_EMAILS`.
//!
//! Entries are comma separated. `*` matches any run of characters, so
//! `*@lab.example.org` admits a whole domain.

use std::env;

use regex::Regex;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone)]
pub struct EmailAllowlist {
    patterns: Vec<Regex>,
}

impl EmailAllowlist {
    /// `None` when the variable is unset or blank (allowlist disabled).
    pub fn from_env() -> Option<Self> {
        Self::parse(&env::var("ALLOWED_EMAILS").ok()?)
    }

    /// Build from a comma separated list. Returns `None` if no usable
    /// pattern remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let patterns: Vec<Regex> = raw
            .split(',')
            .map(normalize_email)
            .filter(|p| !p.is_empty())
            .filter_map(|p| match glob_to_regex(&p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "Ignoring invalid ALLOWED_EMAILS entry");
                    None
                }
            })
            .collect();

        (!patterns.is_empty()).then_some(Self { patterns })
    }

    pub fn is_allowed(&self, email: &str) -> bool {
        let normalized = normalize_email(email);
        self.patterns.iter().any(|re| re.is_match(&normalized))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Trim, NFKC-normalize and lowercase. Shared with user creation so stored
/// emails and allowlist checks agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$"))
}
