//! Suggestion generation
//!
//! Maps observed issue-type frequencies and metric thresholds to a
//! deduplicated list of remediation suggestions. File-level rules live
//! here; the aggregator adds repository-level suggestions from the
//! aggregate scores.

use crate::languages::Language;
use crate::models::{FileMetrics, Issue, Priority, Suggestion};
use rustc_hash::FxHashMap;

/// Complexity above which a refactor suggestion is emitted.
const COMPLEXITY_SUGGESTION_THRESHOLD: usize = 15;

/// Generate suggestions for one file.
pub fn for_file(issues: &[Issue], metrics: &FileMetrics, language: Language) -> Vec<Suggestion> {
    let mut type_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for issue in issues {
        *type_counts.entry(issue.issue_type.as_str()).or_insert(0) += 1;
    }

    let mut suggestions = Vec::new();

    if type_counts.keys().any(|t| t.starts_with("hardcoded_")) {
        suggestions.push(Suggestion::new(
            "security",
            Priority::High,
            "Use environment variables or secure configuration files for secrets",
            "best_practices",
        ));
    }

    if metrics.cyclomatic_complexity > COMPLEXITY_SUGGESTION_THRESHOLD {
        suggestions.push(Suggestion::new(
            "refactoring",
            Priority::Medium,
            "Consider breaking down complex functions into smaller, more manageable pieces",
            "maintainability",
        ));
    }

    match language {
        Language::Python => {
            if type_counts.contains_key("console_statement") {
                suggestions.push(Suggestion::new(
                    "quality",
                    Priority::Low,
                    "Replace print statements with proper logging",
                    "best_practices",
                ));
            }
        }
        Language::JavaScript | Language::TypeScript => {
            if type_counts.contains_key("var_usage") {
                suggestions.push(Suggestion::new(
                    "modernization",
                    Priority::Medium,
                    "Replace var with let/const for better scoping and immutability",
                    "modern_syntax",
                ));
            }
        }
        _ => {}
    }

    dedup(suggestions)
}

/// Repository-level suggestions from aggregate scores and scan size.
pub fn for_repository(
    scores: &crate::models::OverallScores,
    analyzed_files: usize,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if analyzed_files == 0 {
        return suggestions;
    }

    if scores.security < 70.0 {
        suggestions.push(Suggestion::new(
            "process",
            Priority::High,
            "Security posture is weak; adopt secrets management and a security review process",
            "security",
        ));
    }
    if scores.quality < 60.0 {
        suggestions.push(Suggestion::new(
            "ci",
            Priority::Medium,
            "Add a continuous-integration quality gate to stop further regressions",
            "quality",
        ));
    }
    if analyzed_files > 200 {
        suggestions.push(Suggestion::new(
            "architecture",
            Priority::Medium,
            "Repository is large; consider splitting it into smaller modules",
            "maintainability",
        ));
    }

    suggestions
}

fn dedup(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for suggestion in suggestions {
        let key = (suggestion.suggestion_type.clone(), suggestion.description.clone());
        if !seen.contains(&key) {
            seen.push(key);
            out.push(suggestion);
        }
    }
    out
}
