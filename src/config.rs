//! Analyzer configuration
//!
//! Controls file discovery (exclusions, size limits, the file cap),
//! which scan categories run, and the worker pool size. Defaults are
//! usable as-is; a `repolens.toml` at the scanned root can override
//! any field.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Built-in glob patterns excluded from analysis.
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["*.pyc", "*.log", "*.tmp", "*.min.js"];

/// Built-in directory names pruned during traversal. Their contents
/// never appear in the discovered file list.
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "__pycache__",
    "node_modules",
    ".git",
    ".vscode",
    ".idea",
    "venv",
    "env",
    ".venv",
    "dist",
    "build",
    "target",
];

fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_max_file_size() -> u64 {
    1_048_576 // 1 MiB
}

fn default_max_files() -> usize {
    100
}

fn default_workers() -> usize {
    8
}

fn default_tool_timeout() -> u64 {
    30
}

/// Configuration surface consumed by the analysis engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Glob patterns matched against file names and repo-relative paths
    pub exclude_patterns: Vec<String>,
    /// Directory names pruned during traversal
    pub exclude_dirs: Vec<String>,
    /// Files larger than this are skipped (not an error)
    pub max_file_size: u64,
    /// Cap on analyzed files per repository scan
    pub max_files: usize,
    /// Upper bound on parallel analysis workers
    pub workers: usize,
    pub security_scan: bool,
    pub quality_scan: bool,
    pub performance_scan: bool,
    pub dependency_scan: bool,
    /// Run external analyzers (bandit, yamllint) when present on PATH
    pub external_tools: bool,
    /// Per-invocation timeout for external analyzers, in seconds
    pub tool_timeout: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: default_exclude_patterns(),
            exclude_dirs: default_exclude_dirs(),
            max_file_size: default_max_file_size(),
            max_files: default_max_files(),
            workers: default_workers(),
            security_scan: true,
            quality_scan: true,
            performance_scan: true,
            dependency_scan: true,
            external_tools: false,
            tool_timeout: default_tool_timeout(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration for a repository root.
    ///
    /// Reads `repolens.toml` at the root when present; a missing file
    /// yields defaults and a malformed one is reported and ignored.
    pub fn load(root: &Path) -> Self {
        let path = root.join("repolens.toml");
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Effective worker count: the configured cap bounded by the
    /// machine's available parallelism.
    pub fn effective_workers(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        self.workers.clamp(1, 64).min(cores).max(1)
    }

    /// Compile the exclusion globs. Invalid patterns are reported and
    /// dropped rather than failing the scan.
    pub fn exclusions(&self) -> ExclusionMatcher {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!("ignoring invalid exclude pattern '{}': {}", pattern, e),
            }
        }
        let globs = builder.build().unwrap_or_else(|e| {
            warn!("failed to compile exclusion globs: {}", e);
            GlobSet::empty()
        });
        ExclusionMatcher {
            globs,
            dirs: self.exclude_dirs.clone(),
        }
    }
}

/// Compiled exclusion set applied during discovery.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    globs: GlobSet,
    dirs: Vec<String>,
}

impl ExclusionMatcher {
    /// Whether a directory name is on the blocklist (prunes the
    /// whole subtree during traversal).
    pub fn is_dir_excluded(&self, name: &str) -> bool {
        self.dirs.iter().any(|d| d == name)
    }

    /// Whether a file is excluded by glob, matched against both the
    /// bare file name and the repo-relative path.
    pub fn is_file_excluded(&self, relative: &Path) -> bool {
        if self.globs.is_match(relative) {
            return true;
        }
        relative
            .file_name()
            .map(|name| self.globs.is_match(Path::new(name)))
            .unwrap_or(false)
    }
}
