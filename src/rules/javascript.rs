//! JavaScript / TypeScript rule tables

use super::{compile_rules, Rule, RuleSpec, PATTERN_ANALYSIS};
use crate::models::{Category, Issue, Severity};
use regex::Regex;
use std::sync::OnceLock;

const SECURITY_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r"(?i)\beval\s*\(",
        issue_type: "dangerous_eval",
        severity: Severity::High,
        description: "Use of eval() can lead to code injection",
    },
    RuleSpec {
        pattern: r"(?i)innerHTML\s*=",
        issue_type: "xss_risk",
        severity: Severity::Medium,
        description: "innerHTML assignment can lead to XSS",
    },
    RuleSpec {
        pattern: r"(?i)document\.write\s*\(",
        issue_type: "xss_risk",
        severity: Severity::Medium,
        description: "document.write() can lead to XSS",
    },
    RuleSpec {
        pattern: r"(?i)new\s+Function\s*\(",
        issue_type: "dynamic_function",
        severity: Severity::Medium,
        description: "Dynamic function creation can be dangerous",
    },
];

const QUALITY_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r"console\.(log|debug|info|warn|error)",
        issue_type: "console_statement",
        severity: Severity::Low,
        description: "Console statement found (should be removed in production)",
    },
    RuleSpec {
        pattern: r"\bvar\s+\w+",
        issue_type: "var_usage",
        severity: Severity::Medium,
        description: "Use of var (prefer let/const)",
    },
    RuleSpec {
        pattern: r"[^=!]==[^=]",
        issue_type: "loose_equality",
        severity: Severity::Medium,
        description: "Use of == (prefer === for strict equality)",
    },
];

pub(crate) fn security_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(SECURITY_SPECS))
}

pub(crate) fn quality_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(QUALITY_SPECS))
}

fn dom_query_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"document\.getElementById|document\.querySelector").unwrap()
    })
}

fn index_of_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.indexOf\(.*\)\s*[><!]=?\s*-?1").unwrap())
}

pub(crate) fn performance_issues(content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line_no = (i + 1) as u32;
        // A DOM query is only a problem when it re-runs on every iteration
        if dom_query_pattern().is_match(line)
            && (line.contains("for") || line.contains("while"))
        {
            issues.push(
                Issue::new(
                    Category::Performance,
                    "dom_query_in_loop",
                    Severity::Medium,
                    "DOM query in loop (cache the result outside loop)",
                    line_no,
                    PATTERN_ANALYSIS,
                )
                .with_snippet(line),
            );
        }
        if index_of_pattern().is_match(line) {
            issues.push(
                Issue::new(
                    Category::Performance,
                    "inefficient_array_search",
                    Severity::Low,
                    "Consider using .includes() instead of .indexOf() for existence check",
                    line_no,
                    PATTERN_ANALYSIS,
                )
                .with_snippet(line),
            );
        }
    }
    issues
}
