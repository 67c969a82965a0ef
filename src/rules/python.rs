//! Python rule tables and structured quality checks
//!
//! Security and performance detection is line-oriented like every
//! other language. Quality checks use the parse tree (Python is the
//! one structured-tier language): oversized parameter lists and long
//! lines, with a single high-severity `syntax_error` issue when the
//! source does not parse.

use super::{compile_rules, Rule, RuleSpec, PATTERN_ANALYSIS, STRUCTURED_ANALYSIS};
use crate::metrics::walk_nodes;
use crate::models::{Category, Issue, Severity};
use regex::Regex;
use std::sync::OnceLock;
use tree_sitter::Node;

const SECURITY_SPECS: &[RuleSpec] = &[
    RuleSpec {
        pattern: r"(?i)\beval\s*\(",
        issue_type: "dangerous_eval",
        severity: Severity::High,
        description: "Use of eval() can lead to code injection",
    },
    RuleSpec {
        pattern: r"(?i)\bexec\s*\(",
        issue_type: "dangerous_exec",
        severity: Severity::High,
        description: "Use of exec() can lead to code injection",
    },
    RuleSpec {
        pattern: r"(?i)os\.system\s*\(",
        issue_type: "command_injection",
        severity: Severity::High,
        description: "Use of os.system() can lead to command injection",
    },
    RuleSpec {
        pattern: r"(?i)subprocess\.call\s*\([^)]*shell\s*=\s*True",
        issue_type: "shell_injection",
        severity: Severity::High,
        description: "subprocess with shell=True can lead to shell injection",
    },
    RuleSpec {
        pattern: r"(?i)pickle\.loads?\s*\(",
        issue_type: "unsafe_deserialization",
        severity: Severity::High,
        description: "Pickle deserialization can execute arbitrary code",
    },
];

pub(crate) fn security_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(SECURITY_SPECS))
}

/// Parameter node kinds that count toward the argument limit.
/// Splat parameters (`*args`, `**kwargs`) are not counted.
const PARAMETER_KINDS: &[&str] = &[
    "identifier",
    "typed_parameter",
    "default_parameter",
    "typed_default_parameter",
];

const MAX_ARGUMENTS: usize = 7;
const MAX_LINE_LEN: usize = 120;

fn count_parameters(func: Node) -> usize {
    let Some(params) = func.child_by_field_name("parameters") else {
        return 0;
    };
    let mut cursor = params.walk();
    params
        .children(&mut cursor)
        .filter(|child| PARAMETER_KINDS.contains(&child.kind()))
        .count()
}

/// Structured quality checks over the Python parse tree.
///
/// On unparseable source this degrades to a single high-severity
/// `syntax_error` issue anchored at the first error node.
pub(crate) fn quality_issues(content: &str) -> Vec<Issue> {
    let mut parser = tree_sitter::Parser::new();
    if parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .is_err()
    {
        return Vec::new();
    }
    let Some(tree) = parser.parse(content, None) else {
        return Vec::new();
    };
    let root = tree.root_node();

    if root.has_error() {
        let mut error_line = 0u32;
        walk_nodes(root, &mut |node| {
            if (node.is_error() || node.is_missing()) && error_line == 0 {
                error_line = node.start_position().row as u32 + 1;
            }
        });
        return vec![Issue::new(
            Category::Quality,
            "syntax_error",
            Severity::High,
            "Source file contains a syntax error",
            error_line,
            STRUCTURED_ANALYSIS,
        )];
    }

    let mut issues = Vec::new();
    walk_nodes(root, &mut |node| {
        if node.kind() == "function_definition" {
            let arity = count_parameters(node);
            if arity > MAX_ARGUMENTS {
                issues.push(Issue::new(
                    Category::Quality,
                    "too_many_arguments",
                    Severity::Medium,
                    format!(
                        "Function has {arity} arguments (max recommended: {MAX_ARGUMENTS})"
                    ),
                    node.start_position().row as u32 + 1,
                    STRUCTURED_ANALYSIS,
                ));
            }
        }
    });

    for (i, line) in content.lines().enumerate() {
        let len = line.chars().count();
        if len > MAX_LINE_LEN {
            issues.push(Issue::new(
                Category::Quality,
                "long_line",
                Severity::Low,
                format!("Line length {len} exceeds {MAX_LINE_LEN} characters"),
                (i + 1) as u32,
                STRUCTURED_ANALYSIS,
            ));
        }
    }

    issues
}

fn append_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"for\s+\w+\s+in\s+.*:\s*\w+\.append\(").unwrap())
}

pub(crate) fn performance_issues(content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line_no = (i + 1) as u32;
        if line.contains("+=") && (line.contains("for ") || line.contains("while ")) {
            issues.push(
                Issue::new(
                    Category::Performance,
                    "string_concatenation_in_loop",
                    Severity::Medium,
                    "String concatenation in loop (consider using join() or list)",
                    line_no,
                    PATTERN_ANALYSIS,
                )
                .with_snippet(line),
            );
        }
        if append_pattern().is_match(line) {
            issues.push(
                Issue::new(
                    Category::Performance,
                    "list_comprehension_opportunity",
                    Severity::Low,
                    "Consider using list comprehension for better performance",
                    line_no,
                    PATTERN_ANALYSIS,
                )
                .with_snippet(line),
            );
        }
    }
    issues
}
