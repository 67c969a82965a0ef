//! Deterministic score computation
//!
//! Each category is scored independently on a 0-100 scale by
//! subtracting fixed per-severity penalties from 100:
//!
//! ```text
//! security:    high 20, medium 10, low 5
//! quality:     high 15, medium  8, low 3
//!              + min(20, complexity - 10)        when complexity > 10
//!              + min(10, (loc - 500) / 100)      when loc > 500
//! performance: high 20, medium 12, low 5
//! ```
//!
//! The per-category penalty tables are intentionally asymmetric; do
//! not equalize them. Scores clamp to [0, 100] and an empty category
//! scores exactly 100.

use crate::models::{Category, FileMetrics, Issue, OverallScores, Severity};

fn penalty_sum(issues: &[Issue], category: Category, high: f64, medium: f64, low: f64) -> f64 {
    issues
        .iter()
        .filter(|i| i.category == category)
        .map(|i| match i.severity {
            Severity::High => high,
            Severity::Medium => medium,
            Severity::Low => low,
        })
        .sum()
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Security score over security-category issues only.
pub fn security_score(issues: &[Issue]) -> f64 {
    clamp(100.0 - penalty_sum(issues, Category::Security, 20.0, 10.0, 5.0))
}

/// Quality score over quality-category issues plus metric penalties.
pub fn quality_score(issues: &[Issue], metrics: &FileMetrics) -> f64 {
    let mut penalty = penalty_sum(issues, Category::Quality, 15.0, 8.0, 3.0);

    let complexity = metrics.cyclomatic_complexity;
    if complexity > 10 {
        penalty += 20.0_f64.min((complexity - 10) as f64);
    }

    let loc = metrics.lines_of_code;
    if loc > 500 {
        penalty += 10.0_f64.min(((loc - 500) / 100) as f64);
    }

    clamp(100.0 - penalty)
}

/// Performance score over performance-category issues only.
pub fn performance_score(issues: &[Issue]) -> f64 {
    clamp(100.0 - penalty_sum(issues, Category::Performance, 20.0, 12.0, 5.0))
}

/// Unweighted arithmetic mean of per-file scores. All-zero when no
/// files were analyzed.
pub fn overall_scores(results: &[crate::models::FileAnalysis]) -> OverallScores {
    if results.is_empty() {
        return OverallScores::default();
    }
    let n = results.len() as f64;
    OverallScores {
        security: results.iter().map(|r| r.security_score).sum::<f64>() / n,
        quality: results.iter().map(|r| r.quality_score).sum::<f64>() / n,
        performance: results.iter().map(|r| r.performance_score).sum::<f64>() / n,
    }
}
