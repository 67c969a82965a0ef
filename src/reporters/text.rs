//! Terminal reporter with color and tabular summaries

use crate::models::{RepositoryAnalysis, Severity};
use console::style;
use std::fmt::Write;

/// Issues shown per file before eliding the rest.
const MAX_ISSUES_PER_FILE: usize = 5;

fn score_cell(score: f64) -> String {
    let formatted = format!("{score:>5.1}");
    if score >= 80.0 {
        style(formatted).green().to_string()
    } else if score >= 60.0 {
        style(formatted).yellow().to_string()
    } else {
        style(formatted).red().to_string()
    }
}

fn severity_tag(severity: Severity) -> String {
    match severity {
        Severity::High => style("high").red().bold().to_string(),
        Severity::Medium => style("medium").yellow().to_string(),
        Severity::Low => style("low").dim().to_string(),
    }
}

/// Render the analysis for a terminal.
pub fn render(analysis: &RepositoryAnalysis) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\n{} {}",
        style("Repository:").bold(),
        style(&analysis.repository).cyan()
    );
    let _ = writeln!(
        out,
        "  {} files discovered, {} analyzed",
        analysis.total_files, analysis.analyzed_files
    );

    let _ = writeln!(out, "\n{}", style("Scores").bold().underlined());
    let _ = writeln!(out, "  security     {}", score_cell(analysis.overall_scores.security));
    let _ = writeln!(out, "  quality      {}", score_cell(analysis.overall_scores.quality));
    let _ = writeln!(out, "  performance  {}", score_cell(analysis.overall_scores.performance));

    if !analysis.languages.is_empty() {
        let _ = writeln!(out, "\n{}", style("Languages").bold().underlined());
        for (language, count) in &analysis.languages {
            let _ = writeln!(out, "  {language:<14} {count}");
        }
    }

    let summary = &analysis.summary;
    let _ = writeln!(out, "\n{}", style("Issues").bold().underlined());
    let _ = writeln!(
        out,
        "  {} total  ({} security, {} quality, {} performance)",
        summary.total_issues,
        summary.issues_by_category.security,
        summary.issues_by_category.quality,
        summary.issues_by_category.performance
    );
    let _ = writeln!(
        out,
        "  {} high, {} medium, {} low",
        summary.issues_by_severity.high,
        summary.issues_by_severity.medium,
        summary.issues_by_severity.low
    );
    if summary.requires_attention {
        let _ = writeln!(out, "  {}", style("requires attention").red().bold());
    }

    for result in &analysis.file_results {
        if result.issues.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", style(result.file_path.display()).bold());
        for issue in result.issues.iter().take(MAX_ISSUES_PER_FILE) {
            let _ = writeln!(
                out,
                "  L{:<5} [{}] {} ({})",
                issue.line,
                severity_tag(issue.severity),
                issue.description,
                issue.issue_type
            );
        }
        if result.issues.len() > MAX_ISSUES_PER_FILE {
            let _ = writeln!(
                out,
                "  ... and {} more",
                result.issues.len() - MAX_ISSUES_PER_FILE
            );
        }
    }

    if !analysis.suggestions.is_empty() {
        let _ = writeln!(out, "\n{}", style("Suggestions").bold().underlined());
        for suggestion in &analysis.suggestions {
            let _ = writeln!(out, "  [{}] {}", suggestion.priority, suggestion.description);
        }
    }

    if analysis.dependencies.total() > 0 {
        let _ = writeln!(
            out,
            "\n{} {} direct, {} dev, {} optional",
            style("Dependencies:").bold(),
            analysis.dependencies.direct.len(),
            analysis.dependencies.dev.len(),
            analysis.dependencies.optional.len()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use std::collections::BTreeMap;

    fn sample() -> RepositoryAnalysis {
        RepositoryAnalysis {
            repository: "demo".into(),
            total_files: 3,
            analyzed_files: 2,
            languages: BTreeMap::from([("python".to_string(), 2)]),
            overall_scores: OverallScores {
                security: 90.0,
                quality: 70.0,
                performance: 40.0,
            },
            file_results: vec![],
            dependencies: DependencyReport {
                direct: vec!["flask".into()],
                dev: vec![],
                optional: vec![],
            },
            suggestions: vec![Suggestion::new("ci", Priority::Medium, "Add a gate", "quality")],
            summary: AnalysisSummary::default(),
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_report_mentions_key_sections() {
        let rendered = render(&sample());
        assert!(rendered.contains("demo"));
        assert!(rendered.contains("3 files discovered, 2 analyzed"));
        assert!(rendered.contains("python"));
        assert!(rendered.contains("Add a gate"));
        assert!(rendered.contains("1 direct"));
    }
}
