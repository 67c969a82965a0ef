//! SQL security rules

use super::{compile_rules, Rule, RuleSpec};
use crate::models::Severity;
use std::sync::OnceLock;

const SECURITY_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r#"(?i)['"].*\+.*['"]"#,
        issue_type: "sql_injection",
        severity: Severity::High,
        description: "Potential SQL injection via string concatenation",
    },
    RuleSpec {
        pattern: r#"(?i)execute\s*\(\s*['"][^'"]*%[^'"]*['"]"#,
        issue_type: "sql_injection",
        severity: Severity::High,
        description: "Potential SQL injection via string formatting",
    },
];

pub(crate) fn security_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(SECURITY_SPECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenation_matches() {
        let line = r#"SELECT * FROM users WHERE name = '" + userName + "'"#;
        assert!(security_rules().iter().any(|r| r.pattern.is_match(line)));
    }

    #[test]
    fn test_format_execute_matches() {
        let line = r#"cursor.execute("SELECT * FROM t WHERE id = %s" % uid)"#;
        assert!(security_rules().iter().any(|r| r.pattern.is_match(line)));
    }

    #[test]
    fn test_plain_query_is_clean() {
        let line = "SELECT id, name FROM users WHERE active = 1;";
        assert!(!security_rules().iter().any(|r| r.pattern.is_match(line)));
    }
}
