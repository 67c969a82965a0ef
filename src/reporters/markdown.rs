//! Markdown reporter for GitHub-flavored output
//!
//! Generates reports suitable for README files, pull request
//! comments, and wikis.

use crate::models::RepositoryAnalysis;
use std::fmt::Write;

/// Findings listed per file before eliding the rest.
const MAX_ISSUES_PER_FILE: usize = 10;

fn score_badge(score: f64) -> &'static str {
    if score >= 80.0 {
        "🟢"
    } else if score >= 60.0 {
        "🟡"
    } else {
        "🔴"
    }
}

/// Render the analysis as GitHub-flavored Markdown.
pub fn render(analysis: &RepositoryAnalysis) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Code Analysis Report: {}\n", analysis.repository);
    let _ = writeln!(
        md,
        "_Generated {}_\n",
        analysis.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let _ = writeln!(md, "## Overview\n");
    let _ = writeln!(md, "| | |");
    let _ = writeln!(md, "|---|---|");
    let _ = writeln!(md, "| Files discovered | {} |", analysis.total_files);
    let _ = writeln!(md, "| Files analyzed | {} |", analysis.analyzed_files);
    let _ = writeln!(md, "| Total issues | {} |", analysis.summary.total_issues);
    let _ = writeln!(
        md,
        "| Most common language | {} |",
        analysis.summary.most_common_language
    );
    let _ = writeln!(
        md,
        "| Requires attention | {} |\n",
        if analysis.summary.requires_attention {
            "yes"
        } else {
            "no"
        }
    );

    let _ = writeln!(md, "## Scores\n");
    let _ = writeln!(md, "| Category | Score |");
    let _ = writeln!(md, "|---|---|");
    let scores = &analysis.overall_scores;
    let _ = writeln!(
        md,
        "| Security | {} {:.1} |",
        score_badge(scores.security),
        scores.security
    );
    let _ = writeln!(
        md,
        "| Quality | {} {:.1} |",
        score_badge(scores.quality),
        scores.quality
    );
    let _ = writeln!(
        md,
        "| Performance | {} {:.1} |\n",
        score_badge(scores.performance),
        scores.performance
    );

    if !analysis.languages.is_empty() {
        let _ = writeln!(md, "## Languages\n");
        let _ = writeln!(md, "| Language | Files |");
        let _ = writeln!(md, "|---|---|");
        for (language, count) in &analysis.languages {
            let _ = writeln!(md, "| {language} | {count} |");
        }
        let _ = writeln!(md);
    }

    let with_issues: Vec<_> = analysis
        .file_results
        .iter()
        .filter(|r| !r.issues.is_empty())
        .collect();
    if !with_issues.is_empty() {
        let _ = writeln!(md, "## Findings\n");
        for result in with_issues {
            let _ = writeln!(md, "### `{}`\n", result.file_path.display());
            let _ = writeln!(md, "| Line | Severity | Type | Description |");
            let _ = writeln!(md, "|---|---|---|---|");
            for issue in result.issues.iter().take(MAX_ISSUES_PER_FILE) {
                let _ = writeln!(
                    md,
                    "| {} | {} | `{}` | {} |",
                    issue.line, issue.severity, issue.issue_type, issue.description
                );
            }
            if result.issues.len() > MAX_ISSUES_PER_FILE {
                let _ = writeln!(
                    md,
                    "\n_...and {} more findings in this file._",
                    result.issues.len() - MAX_ISSUES_PER_FILE
                );
            }
            let _ = writeln!(md);
        }
    }

    if !analysis.suggestions.is_empty() {
        let _ = writeln!(md, "## Suggestions\n");
        for suggestion in &analysis.suggestions {
            let _ = writeln!(
                md,
                "- **{}**: {}",
                suggestion.priority, suggestion.description
            );
        }
        let _ = writeln!(md);
    }

    if analysis.dependencies.total() > 0 {
        let _ = writeln!(md, "## Dependencies\n");
        let _ = writeln!(
            md,
            "{} direct, {} dev, {} optional\n",
            analysis.dependencies.direct.len(),
            analysis.dependencies.dev.len(),
            analysis.dependencies.optional.len()
        );
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_markdown_structure() {
        let analysis = RepositoryAnalysis {
            repository: "demo".into(),
            total_files: 1,
            analyzed_files: 1,
            languages: BTreeMap::from([("yaml".to_string(), 1)]),
            overall_scores: OverallScores {
                security: 80.0,
                quality: 55.0,
                performance: 100.0,
            },
            file_results: vec![FileAnalysis {
                file_path: "config.yml".into(),
                language: "yaml".into(),
                issues: vec![Issue::new(
                    Category::Security,
                    "hardcoded_secret",
                    Severity::High,
                    "Hardcoded secret or credential detected",
                    3,
                    "yaml_analysis",
                )],
                metrics: FileMetrics::default(),
                suggestions: vec![],
                security_score: 80.0,
                quality_score: 55.0,
                performance_score: 100.0,
                timestamp: chrono::Utc::now(),
            }],
            dependencies: DependencyReport::default(),
            suggestions: vec![],
            summary: AnalysisSummary::default(),
            timestamp: chrono::Utc::now(),
        };

        let md = render(&analysis);
        assert!(md.starts_with("# Code Analysis Report: demo"));
        assert!(md.contains("## Scores"));
        assert!(md.contains("| Security | 🟢 80.0 |"));
        assert!(md.contains("### `config.yml`"));
        assert!(md.contains("`hardcoded_secret`"));
    }
}
