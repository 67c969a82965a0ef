//! Core data models for Repolens
//!
//! These models are used throughout the codebase for representing
//! issues, per-file metrics, and analysis results. All result types
//! are immutable value records: a re-analysis produces new instances,
//! never updates existing ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Maximum length of a code snippet attached to an issue.
pub const MAX_SNIPPET_LEN: usize = 200;

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Issue categories, each scored independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Quality,
    Performance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Quality => "quality",
            Category::Performance => "performance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single finding produced by a rule or external tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub category: Category,
    /// Stable rule identifier, e.g. `hardcoded_password`
    pub issue_type: String,
    pub severity: Severity,
    pub description: String,
    /// 1-based source line; 0 for file-level issues
    pub line: u32,
    /// Offending source line, trimmed and bounded in length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Which rule set or tool produced this issue
    pub origin: String,
    /// Confidence from 0.0 to 1.0, when the producing tool reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Issue {
    pub fn new(
        category: Category,
        issue_type: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        line: u32,
        origin: &'static str,
    ) -> Self {
        Self {
            category,
            issue_type: issue_type.into(),
            severity,
            description: description.into(),
            line,
            snippet: None,
            origin: origin.to_string(),
            confidence: None,
        }
    }

    /// Attach a trimmed, length-bounded code snippet.
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        let trimmed = snippet.trim();
        let bounded: String = trimmed.chars().take(MAX_SNIPPET_LEN).collect();
        if !bounded.is_empty() {
            self.snippet = Some(bounded);
        }
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Remediation priority for suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A ranked remediation suggestion derived from issues and metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion_type: String,
    pub priority: Priority,
    pub description: String,
    pub category: String,
}

impl Suggestion {
    pub fn new(
        suggestion_type: &str,
        priority: Priority,
        description: &str,
        category: &str,
    ) -> Self {
        Self {
            suggestion_type: suggestion_type.to_string(),
            priority,
            description: description.to_string(),
            category: category.to_string(),
        }
    }
}

/// Size and structure metrics for a single file.
///
/// A pure function of (content, language); no external state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Total line count, including blank and comment lines
    pub lines_of_code: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub functions: usize,
    pub classes: usize,
    pub cyclomatic_complexity: usize,
    /// SHA-256 digest of the file content, hex-encoded
    pub file_hash: String,
    pub file_size: u64,
}

/// Complete analysis result for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file_path: PathBuf,
    pub language: String,
    pub issues: Vec<Issue>,
    pub metrics: FileMetrics,
    pub suggestions: Vec<Suggestion>,
    pub security_score: f64,
    pub quality_score: f64,
    pub performance_score: f64,
    pub timestamp: DateTime<Utc>,
}

/// Dependency names extracted from manifest files at the repository root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub direct: Vec<String>,
    pub dev: Vec<String>,
    pub optional: Vec<String>,
}

impl DependencyReport {
    /// Merge another report into this one.
    pub fn merge(&mut self, other: DependencyReport) {
        self.direct.extend(other.direct);
        self.dev.extend(other.dev);
        self.optional.extend(other.optional);
    }

    /// Sort each list and drop duplicates.
    pub fn dedup(&mut self) {
        for list in [&mut self.direct, &mut self.dev, &mut self.optional] {
            list.sort();
            list.dedup();
        }
    }

    pub fn total(&self) -> usize {
        self.direct.len() + self.dev.len() + self.optional.len()
    }
}

/// Issue counts by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub security: usize,
    pub quality: usize,
    pub performance: usize,
}

/// Issue counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Summary statistics folded from per-file results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_issues: usize,
    pub issues_by_category: CategoryCounts,
    pub issues_by_severity: SeverityCounts,
    pub languages_detected: Vec<String>,
    pub most_common_language: String,
    pub total_dependencies: usize,
    pub has_security_issues: bool,
    /// True when any high-severity issue exists or security issues exceed 5
    pub requires_attention: bool,
}

impl AnalysisSummary {
    /// Fold summary statistics from per-file results.
    pub fn from_results(
        results: &[FileAnalysis],
        languages: &BTreeMap<String, usize>,
        dependencies: &DependencyReport,
    ) -> Self {
        let mut by_category = CategoryCounts::default();
        let mut by_severity = SeverityCounts::default();
        let mut total_issues = 0;

        for result in results {
            for issue in &result.issues {
                total_issues += 1;
                match issue.category {
                    Category::Security => by_category.security += 1,
                    Category::Quality => by_category.quality += 1,
                    Category::Performance => by_category.performance += 1,
                }
                match issue.severity {
                    Severity::High => by_severity.high += 1,
                    Severity::Medium => by_severity.medium += 1,
                    Severity::Low => by_severity.low += 1,
                }
            }
        }

        // Highest count wins; ties break toward the alphabetically first name
        let most_common_language = languages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            total_issues,
            issues_by_category: by_category,
            issues_by_severity: by_severity,
            languages_detected: languages.keys().cloned().collect(),
            most_common_language,
            total_dependencies: dependencies.total(),
            has_security_issues: by_category.security > 0,
            requires_attention: by_severity.high > 0 || by_category.security > 5,
        }
    }
}

/// Mean per-category scores across all analyzed files
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallScores {
    pub security: f64,
    pub quality: f64,
    pub performance: f64,
}

/// Complete repository analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    pub repository: String,
    /// All files discovered after exclusion pruning
    pub total_files: usize,
    /// Files that produced a `FileAnalysis`
    pub analyzed_files: usize,
    /// Language name -> file count histogram
    pub languages: BTreeMap<String, usize>,
    pub overall_scores: OverallScores,
    /// Per-file results in discovery order
    pub file_results: Vec<FileAnalysis>,
    pub dependencies: DependencyReport,
    /// Repository-level suggestions (distinct from per-file ones)
    pub suggestions: Vec<Suggestion>,
    pub summary: AnalysisSummary,
    pub timestamp: DateTime<Utc>,
}
