//! Per-file analysis orchestration
//!
//! `Analyzer` wires the classifier, metric calculator, rule engine,
//! scoring, and suggestion generation together. Per-file analysis is
//! a pure function of (content, language, rule tables); the only
//! stateful pieces are the configuration and the probed external
//! linters, both fixed at construction.

use crate::config::AnalyzerConfig;
use crate::languages::{self, Language};
use crate::models::{Category, FileAnalysis};
use crate::rules::external::{self, ExternalLinter};
use crate::rules::{self, ScanToggles};
use crate::{metrics, scoring, suggest};
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub struct Analyzer {
    config: AnalyzerConfig,
    linters: Vec<Box<dyn ExternalLinter>>,
}

impl Analyzer {
    /// Create an analyzer. External linters are probed once here;
    /// tools missing from PATH are silently dropped.
    pub fn new(config: AnalyzerConfig) -> Self {
        let linters = if config.external_tools {
            external::available_linters()
        } else {
            Vec::new()
        };
        Self { config, linters }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a single file on disk.
    ///
    /// Returns `None` for anything that is not analyzable: missing or
    /// unreadable files, oversized files, binary content, unknown
    /// extensions. None of these are errors.
    pub fn analyze_file(&self, path: &Path) -> Option<FileAnalysis> {
        let metadata = std::fs::metadata(path).ok()?;
        if metadata.len() > self.config.max_file_size {
            debug!("skipping large file: {}", path.display());
            return None;
        }
        let bytes = std::fs::read(path).ok()?;
        if languages::is_binary(&bytes) {
            return None;
        }
        let language = Language::from_path(path)?;
        let content = String::from_utf8_lossy(&bytes);
        Some(self.analyze_content(path, language, &content))
    }

    /// Analyze content that has already been read and classified.
    pub fn analyze_content(
        &self,
        path: &Path,
        language: Language,
        content: &str,
    ) -> FileAnalysis {
        debug!("analyzing {} as {}", path.display(), language);

        let metrics = metrics::compute(content, language);

        let toggles = ScanToggles {
            security: self.config.security_scan,
            quality: self.config.quality_scan,
            performance: self.config.performance_scan,
        };
        let mut issues = rules::scan(content, path, language, toggles);

        for linter in &self.linters {
            if !linter.supports(language) {
                continue;
            }
            let gated_off = match linter.category() {
                Category::Security => !self.config.security_scan,
                Category::Quality => !self.config.quality_scan,
                Category::Performance => !self.config.performance_scan,
            };
            if gated_off {
                continue;
            }
            let timeout = Duration::from_secs(self.config.tool_timeout);
            issues.extend(linter.run(path, timeout));
        }

        let suggestions = suggest::for_file(&issues, &metrics, language);

        FileAnalysis {
            file_path: path.to_path_buf(),
            language: language.name().to_string(),
            security_score: scoring::security_score(&issues),
            quality_score: scoring::quality_score(&issues, &metrics),
            performance_score: scoring::performance_score(&issues),
            issues,
            metrics,
            suggestions,
            timestamp: Utc::now(),
        }
    }
}
