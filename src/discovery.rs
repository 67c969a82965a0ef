//! File discovery
//!
//! Walks the repository root depth-first with a deterministic name
//! ordering. Excluded directories are pruned during traversal, so
//! their contents never appear in the discovered list; excluded files
//! are dropped as they are seen. The surviving files are then
//! filtered to the analyzable subset: within the size limit, not
//! binary, and carrying a registered extension.

use crate::config::AnalyzerConfig;
use crate::languages::{self, Language};
use ignore::WalkBuilder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of walking one repository root.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    /// Every file that survived exclusion, analyzable or not
    pub total_files: usize,
    /// Analyzable files in discovery order
    pub analyzable: Vec<(PathBuf, Language)>,
}

/// Read the leading bytes used for binary sniffing.
fn read_head(path: &Path) -> Option<Vec<u8>> {
    let mut file = std::fs::File::open(path).ok()?;
    let mut head = vec![0u8; 1024];
    let n = file.read(&mut head).ok()?;
    head.truncate(n);
    Some(head)
}

/// Enumerate files under `root`, applying the configured exclusions.
pub fn discover(root: &Path, config: &AnalyzerConfig) -> DiscoveredFiles {
    let matcher = config.exclusions();
    let dir_matcher = matcher.clone();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a: &std::ffi::OsStr, b: &std::ffi::OsStr| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                let name = entry.file_name().to_string_lossy();
                if dir_matcher.is_dir_excluded(&name) {
                    return false;
                }
            }
            true
        })
        .build();

    let mut discovered = DiscoveredFiles::default();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("walk error: {}", e);
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if matcher.is_file_excluded(relative) {
            continue;
        }
        discovered.total_files += 1;

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > config.max_file_size {
            debug!("skipping large file: {}", path.display());
            continue;
        }

        let Some(head) = read_head(path) else {
            continue;
        };
        if let Some(language) = languages::classify(path, &head) {
            discovered.analyzable.push((path.to_path_buf(), language));
        }
    }

    discovered
}
