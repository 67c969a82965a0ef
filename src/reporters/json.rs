//! JSON reporter

use crate::models::RepositoryAnalysis;
use anyhow::{Context, Result};

/// Render the full analysis as pretty-printed JSON.
pub fn render(analysis: &RepositoryAnalysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).context("failed to serialize analysis to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_round_trip() {
        let analysis = RepositoryAnalysis {
            repository: "demo".into(),
            total_files: 2,
            analyzed_files: 1,
            languages: BTreeMap::from([("python".to_string(), 1)]),
            overall_scores: OverallScores {
                security: 80.0,
                quality: 100.0,
                performance: 100.0,
            },
            file_results: vec![],
            dependencies: DependencyReport::default(),
            suggestions: vec![],
            summary: AnalysisSummary::default(),
            timestamp: chrono::Utc::now(),
        };
        let rendered = render(&analysis).unwrap();
        let parsed: RepositoryAnalysis = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.repository, "demo");
        assert_eq!(parsed.total_files, 2);
        assert_eq!(parsed.overall_scores.security, 80.0);
    }
}
