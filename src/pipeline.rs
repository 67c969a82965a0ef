//! Bounded parallel analysis pipeline
//!
//! Producer/worker/collector layout over crossbeam bounded channels:
//! one producer feeds file jobs, a capped pool of workers runs the
//! per-file analysis, and a single collector folds results. Bounded
//! channels give real backpressure, so in-flight work is capped no
//! matter how large the repository is.
//!
//! Each job carries its discovery index; results are re-sorted on
//! collection so output order never depends on worker scheduling.

use crate::analyzer::Analyzer;
use crate::languages::Language;
use crate::models::FileAnalysis;
use crossbeam_channel::bounded;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use tracing::{debug, error};

/// One unit of work: a file tagged with its discovery position.
pub(crate) struct FileJob {
    pub index: usize,
    pub path: PathBuf,
    pub language: Language,
}

/// Run per-file analysis for all jobs and return results in
/// discovery order. Worker faults are logged and that file is
/// omitted; they never abort the repository scan.
pub(crate) fn run_file_pipeline(
    jobs: Vec<FileJob>,
    analyzer: &Analyzer,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Vec<FileAnalysis> {
    let total = jobs.len();
    if total == 0 {
        return Vec::new();
    }

    let workers = analyzer.config().effective_workers().min(total);
    let buffer = (workers * 2).max(4);
    debug!("analysis pipeline: {} files, {} workers", total, workers);

    let (job_tx, job_rx) = bounded::<FileJob>(buffer);
    let (result_tx, result_rx) = bounded::<(usize, FileAnalysis)>(buffer);

    let mut indexed: Vec<(usize, FileAnalysis)> = Vec::with_capacity(total);

    std::thread::scope(|scope| {
        // Producer: feed jobs, blocking when the buffer is full
        scope.spawn(move || {
            for job in jobs {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        // Workers: analyze in parallel
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = result_tx.clone();
            scope.spawn(move || {
                for job in rx {
                    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
                        analyze_job(analyzer, &job)
                    }));
                    match outcome {
                        Ok(Some(analysis)) => {
                            if tx.send((job.index, analysis)).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(_) => {
                            error!("analysis panicked for {}, skipping", job.path.display());
                        }
                    }
                }
            });
        }

        // Drop our copies so the collector sees completion
        drop(job_rx);
        drop(result_tx);

        // Collector: single writer
        let mut done = 0;
        for (index, analysis) in result_rx {
            done += 1;
            if let Some(cb) = progress {
                cb(done, total);
            }
            indexed.push((index, analysis));
        }
    });

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, analysis)| analysis).collect()
}

fn analyze_job(analyzer: &Analyzer, job: &FileJob) -> Option<FileAnalysis> {
    let bytes = match std::fs::read(&job.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("error analyzing {}: {}", job.path.display(), e);
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    Some(analyzer.analyze_content(&job.path, job.language, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn jobs_for(dir: &std::path::Path, count: usize) -> Vec<FileJob> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("file_{i}.py"));
                fs::write(&path, format!("x = {i}\n")).unwrap();
                FileJob {
                    index: i,
                    path,
                    language: Language::Python,
                }
            })
            .collect()
    }

    #[test]
    fn test_results_come_back_in_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = jobs_for(dir.path(), 20);
        let analyzer = Analyzer::new(AnalyzerConfig::default());

        let results = run_file_pipeline(jobs, &analyzer, None);
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            assert!(result
                .file_path
                .to_string_lossy()
                .ends_with(&format!("file_{i}.py")));
        }
    }

    #[test]
    fn test_missing_file_is_omitted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut jobs = jobs_for(dir.path(), 3);
        jobs.push(FileJob {
            index: 3,
            path: dir.path().join("vanished.py"),
            language: Language::Python,
        });

        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let results = run_file_pipeline(jobs, &analyzer, None);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_progress_callback_sees_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = jobs_for(dir.path(), 7);
        let analyzer = Analyzer::new(AnalyzerConfig::default());

        let seen = AtomicUsize::new(0);
        let progress = |_done: usize, _total: usize| {
            seen.fetch_add(1, Ordering::Relaxed);
        };
        let results = run_file_pipeline(jobs, &analyzer, Some(&progress));
        assert_eq!(results.len(), 7);
        assert_eq!(seen.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_empty_job_list() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        assert!(run_file_pipeline(Vec::new(), &analyzer, None).is_empty());
    }
}
