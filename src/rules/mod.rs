//! Pattern rule engine
//!
//! Rules are organized as a small language-agnostic table (hardcoded
//! credentials) plus per-language tables for security, quality, and
//! performance. Matching is line-oriented: every rule is evaluated
//! against every line independently, and several rules may fire on
//! the same line. Evaluation is side-effect-free and tolerates any
//! input; it never raises.
//!
//! Markup formats get their own rule set (`yaml`), oriented toward
//! indentation consistency, embedded credentials, and the Ansible
//! sub-dialect.

pub mod common;
pub mod external;
mod java;
mod javascript;
mod python;
mod sql;
mod yaml;

use crate::languages::Language;
use crate::models::{Category, Issue, Severity};
use regex::Regex;
use std::path::Path;

pub(crate) const PATTERN_ANALYSIS: &str = "pattern_analysis";
pub(crate) const STRUCTURED_ANALYSIS: &str = "structured_analysis";
pub(crate) const YAML_ANALYSIS: &str = "yaml_analysis";
pub(crate) const ANSIBLE_ANALYSIS: &str = "ansible_analysis";

/// A compiled detection rule.
pub struct Rule {
    pub pattern: Regex,
    pub issue_type: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

/// Static description of a rule; compiled once on first use.
pub(crate) struct RuleSpec {
    pub pattern: &'static str,
    pub issue_type: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

pub(crate) fn compile_rules(specs: &[RuleSpec]) -> Vec<Rule> {
    specs
        .iter()
        .map(|spec| Rule {
            pattern: Regex::new(spec.pattern).expect("static rule pattern"),
            issue_type: spec.issue_type,
            severity: spec.severity,
            description: spec.description,
        })
        .collect()
}

/// Which categories to evaluate.
#[derive(Debug, Clone, Copy)]
pub struct ScanToggles {
    pub security: bool,
    pub quality: bool,
    pub performance: bool,
}

impl Default for ScanToggles {
    fn default() -> Self {
        Self {
            security: true,
            quality: true,
            performance: true,
        }
    }
}

/// Evaluate a set of rule tables line by line, in table order.
pub(crate) fn evaluate_tables(
    content: &str,
    tables: &[&[Rule]],
    category: Category,
    origin: &'static str,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, line) in content.lines().enumerate() {
        for table in tables {
            for rule in *table {
                if rule.pattern.is_match(line) {
                    issues.push(
                        Issue::new(
                            category,
                            rule.issue_type,
                            rule.severity,
                            rule.description,
                            (i + 1) as u32,
                            origin,
                        )
                        .with_snippet(line),
                    );
                }
            }
        }
    }
    issues
}

/// Run all requested rule categories for one file.
pub fn scan(content: &str, path: &Path, language: Language, toggles: ScanToggles) -> Vec<Issue> {
    let mut issues = Vec::new();
    if toggles.security {
        issues.extend(security_pass(content, path, language));
    }
    if toggles.quality {
        issues.extend(quality_pass(content, path, language));
    }
    if toggles.performance {
        issues.extend(performance_pass(content, path, language));
    }
    issues
}

fn security_pass(content: &str, path: &Path, language: Language) -> Vec<Issue> {
    let mut tables: Vec<&[Rule]> = vec![common::credential_rules()];
    match language {
        Language::Python => tables.push(python::security_rules()),
        Language::JavaScript | Language::TypeScript => tables.push(javascript::security_rules()),
        Language::Sql => tables.push(sql::security_rules()),
        _ => {}
    }
    let mut issues = evaluate_tables(content, &tables, Category::Security, PATTERN_ANALYSIS);
    if language == Language::Yaml {
        issues.extend(yaml::security_issues(content, path));
    }
    issues
}

fn quality_pass(content: &str, path: &Path, language: Language) -> Vec<Issue> {
    match language {
        Language::Python => python::quality_issues(content),
        Language::JavaScript | Language::TypeScript => evaluate_tables(
            content,
            &[javascript::quality_rules()],
            Category::Quality,
            PATTERN_ANALYSIS,
        ),
        Language::Java => java::quality_issues(content),
        Language::Yaml => yaml::quality_issues(content, path),
        _ => Vec::new(),
    }
}

fn performance_pass(content: &str, path: &Path, language: Language) -> Vec<Issue> {
    match language {
        Language::Python => python::performance_issues(content),
        Language::JavaScript | Language::TypeScript => javascript::performance_issues(content),
        Language::Yaml => yaml::performance_issues(content, path),
        _ => Vec::new(),
    }
}
