//! Language-agnostic credential rules
//!
//! Checked against every line of every analyzable file, regardless of
//! language: an identifier like `password`, `api_key`, `secret`, or
//! `token` followed by `=` or `:` and a quoted literal of at least 8
//! characters.

use super::{compile_rules, Rule, RuleSpec};
use crate::models::Severity;
use std::sync::OnceLock;

const CREDENTIAL_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r#"(?i)password\s*[=:]\s*["'][^"']{8,}["']"#,
        issue_type: "hardcoded_password",
        severity: Severity::High,
        description: "Hardcoded password found",
    },
    RuleSpec {
        pattern: r#"(?i)api[_-]?key\s*[=:]\s*["'][^"']{8,}["']"#,
        issue_type: "hardcoded_api_key",
        severity: Severity::High,
        description: "Hardcoded API key found",
    },
    RuleSpec {
        pattern: r#"(?i)secret\s*[=:]\s*["'][^"']{8,}["']"#,
        issue_type: "hardcoded_secret",
        severity: Severity::High,
        description: "Hardcoded secret found",
    },
    RuleSpec {
        pattern: r#"(?i)token\s*[=:]\s*["'][^"']{8,}["']"#,
        issue_type: "hardcoded_token",
        severity: Severity::Medium,
        description: "Hardcoded token found",
    },
];

pub(crate) fn credential_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(CREDENTIAL_SPECS))
}
