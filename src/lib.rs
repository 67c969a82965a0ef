//! Repolens - multi-language static analysis engine
//!
//! Walks a repository, classifies files by language, computes
//! size/structure metrics, runs per-language pattern rules for
//! security, quality, and performance issues, scores each file on a
//! 0-100 scale, and folds everything into one repository-level
//! result.
//!
//! The library surface is [`Analyzer`] plus the serializable result
//! types in [`models`]:
//!
//! ```no_run
//! use repolens::{Analyzer, AnalyzerConfig};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default());
//! let analysis = analyzer
//!     .analyze_repository(std::path::Path::new("."), "my-repo")
//!     .unwrap();
//! println!("security score: {}", analysis.overall_scores.security);
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod deps;
pub mod discovery;
pub mod error;
pub mod languages;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod rules;
pub mod scoring;
pub mod suggest;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::ScanError;
pub use languages::{AnalysisTier, Language};
pub use models::{
    AnalysisSummary, Category, FileAnalysis, FileMetrics, Issue, Priority, RepositoryAnalysis,
    Severity, Suggestion,
};
