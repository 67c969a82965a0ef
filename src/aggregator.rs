//! Repository-level aggregation
//!
//! Drives the full scan: discovery, the analysis cap, the bounded
//! pipeline, and the commutative fold of per-file results into one
//! `RepositoryAnalysis`. Only a missing root path is fatal; every
//! per-file or per-manifest fault degrades in place.

use crate::analyzer::Analyzer;
use crate::discovery;
use crate::error::ScanError;
use crate::models::{AnalysisSummary, DependencyReport, RepositoryAnalysis};
use crate::pipeline::{self, FileJob};
use crate::{deps, scoring, suggest};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Analyze an entire repository rooted at `root`.
pub fn analyze_repository(
    analyzer: &Analyzer,
    root: &Path,
    repository_name: &str,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Result<RepositoryAnalysis, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    let config = analyzer.config();

    info!("starting repository analysis: {}", repository_name);

    let discovered = discovery::discover(root, config);
    let total_files = discovered.total_files;
    let mut analyzable = discovered.analyzable;
    info!(
        "found {} total files, {} analyzable",
        total_files,
        analyzable.len()
    );

    if analyzable.len() > config.max_files {
        warn!(
            "reached file analysis limit ({} files), analyzing the first {} in discovery order",
            config.max_files, config.max_files
        );
        analyzable.truncate(config.max_files);
    }

    let jobs: Vec<FileJob> = analyzable
        .into_iter()
        .enumerate()
        .map(|(index, (path, language))| FileJob {
            index,
            path,
            language,
        })
        .collect();

    let file_results = pipeline::run_file_pipeline(jobs, analyzer, progress);

    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    for result in &file_results {
        *languages.entry(result.language.clone()).or_insert(0) += 1;
    }

    let overall_scores = scoring::overall_scores(&file_results);

    let dependencies = if config.dependency_scan {
        deps::scan_root(root)
    } else {
        DependencyReport::default()
    };

    let summary = AnalysisSummary::from_results(&file_results, &languages, &dependencies);
    let suggestions = suggest::for_repository(&overall_scores, file_results.len());

    info!(
        "repository analysis completed: {} files analyzed, {} issues",
        file_results.len(),
        summary.total_issues
    );

    Ok(RepositoryAnalysis {
        repository: repository_name.to_string(),
        total_files,
        analyzed_files: file_results.len(),
        languages,
        overall_scores,
        file_results,
        dependencies,
        suggestions,
        summary,
        timestamp: Utc::now(),
    })
}

impl Analyzer {
    /// Convenience wrapper over [`analyze_repository`].
    pub fn analyze_repository(
        &self,
        root: &Path,
        repository_name: &str,
    ) -> Result<RepositoryAnalysis, ScanError> {
        analyze_repository(self, root, repository_name, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use std::fs;

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalyzerConfig::default())
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = analyzer().analyze_repository(Path::new("/does/not/exist"), "ghost");
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn test_empty_repository() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = analyzer().analyze_repository(dir.path(), "empty").unwrap();
        assert_eq!(analysis.total_files, 0);
        assert_eq!(analysis.analyzed_files, 0);
        assert_eq!(analysis.overall_scores.security, 0.0);
        assert_eq!(analysis.overall_scores.quality, 0.0);
        assert_eq!(analysis.overall_scores.performance, 0.0);
        assert!(!analysis.summary.requires_attention);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_language_histogram_and_invariant() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("b.py"), "y = 2\n").unwrap();
        fs::write(dir.path().join("c.js"), "let z = 3;\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not code\n").unwrap();

        let analysis = analyzer().analyze_repository(dir.path(), "mixed").unwrap();
        assert_eq!(analysis.total_files, 4);
        assert_eq!(analysis.analyzed_files, 3);
        assert!(analysis.analyzed_files <= analysis.total_files);
        assert_eq!(analysis.languages.get("python"), Some(&2));
        assert_eq!(analysis.languages.get("javascript"), Some(&1));
        assert_eq!(analysis.summary.most_common_language, "python");
    }

    #[test]
    fn test_file_cap_applies_in_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..30 {
            fs::write(dir.path().join(format!("f{i:03}.py")), "x = 1\n").unwrap();
        }

        let mut config = AnalyzerConfig::default();
        config.max_files = 10;
        let analysis = Analyzer::new(config)
            .analyze_repository(dir.path(), "capped")
            .unwrap();
        assert_eq!(analysis.total_files, 30);
        assert_eq!(analysis.analyzed_files, 10);
        // Discovery order is name order, so the first ten names win
        let first = analysis.file_results.first().unwrap();
        assert!(first.file_path.to_string_lossy().ends_with("f000.py"));
        let last = analysis.file_results.last().unwrap();
        assert!(last.file_path.to_string_lossy().ends_with("f009.py"));
    }

    #[test]
    fn test_dependency_scan_toggle() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("requirements.txt"), "flask\n").unwrap();

        let on = analyzer().analyze_repository(dir.path(), "deps").unwrap();
        assert_eq!(on.dependencies.direct, vec!["flask"]);

        let mut config = AnalyzerConfig::default();
        config.dependency_scan = false;
        let off = Analyzer::new(config)
            .analyze_repository(dir.path(), "deps")
            .unwrap();
        assert_eq!(off.dependencies.total(), 0);
    }

    #[test]
    fn test_weak_security_yields_process_suggestion() {
        let dir = tempfile::tempdir().unwrap();
        // Three high-severity credentials: file score 80-ish territory
        fs::write(
            dir.path().join("creds.py"),
            "password = \"secret123\"\napi_key = \"0123456789abc\"\nsecret = \"abcdefgh1234\"\n",
        )
        .unwrap();

        let analysis = analyzer().analyze_repository(dir.path(), "weak").unwrap();
        assert!(analysis.overall_scores.security < 70.0);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.suggestion_type == "process"));
    }
}
