//! Java quality rules

use super::{compile_rules, Rule, RuleSpec, PATTERN_ANALYSIS};
use crate::models::{Category, Issue, Severity};
use std::sync::OnceLock;

const QUALITY_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r"System\.out\.println",
        issue_type: "system_out_println",
        severity: Severity::Low,
        description: "System.out.println found (use logging instead)",
    },
    RuleSpec {
        pattern: r"catch\s*\([^)]+\)\s*\{\s*\}",
        issue_type: "empty_catch",
        severity: Severity::High,
        description: "Empty catch block (should handle or log exception)",
    },
];

fn quality_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(QUALITY_SPECS))
}

pub(crate) fn quality_issues(content: &str) -> Vec<Issue> {
    super::evaluate_tables(content, &[quality_rules()], Category::Quality, PATTERN_ANALYSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_println_is_low_severity() {
        let issues = quality_issues("System.out.println(\"hello\");\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, "system_out_println");
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_empty_catch_is_high_severity() {
        let issues = quality_issues("try { run(); } catch (Exception e) {}\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, "empty_catch");
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn test_handled_catch_is_clean() {
        let issues = quality_issues("try { run(); } catch (Exception e) { log(e); }\n");
        assert!(issues.is_empty());
    }
}
