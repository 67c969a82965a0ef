//! Optional external analyzer enrichment
//!
//! External tools are modeled as an injected `ExternalLinter`
//! capability so the engine is fully testable with no binaries
//! installed. Every failure mode — missing binary, timeout, non-zero
//! exit, unparseable output — degrades silently to pattern-only
//! results; enrichment can add issues but never remove or block them.

use crate::languages::Language;
use crate::models::{Category, Issue, Severity};
use regex::Regex;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// A per-language external analyzer, invoked as a bounded-time
/// subprocess. Implementations must fail closed: any error yields an
/// empty issue list.
pub trait ExternalLinter: Send + Sync {
    fn name(&self) -> &'static str;
    fn supports(&self, language: Language) -> bool;
    /// Which scan category this tool contributes to; the per-category
    /// toggles gate it the same way they gate the built-in tables.
    fn category(&self) -> Category;
    /// Probe for the tool once; absence disables the linter.
    fn is_available(&self) -> bool;
    fn run(&self, path: &Path, timeout: Duration) -> Vec<Issue>;
}

/// All built-in linters that answer `is_available()`.
pub fn available_linters() -> Vec<Box<dyn ExternalLinter>> {
    let candidates: Vec<Box<dyn ExternalLinter>> =
        vec![Box::new(BanditLinter), Box::new(YamllintLinter)];
    candidates
        .into_iter()
        .filter(|linter| {
            let available = linter.is_available();
            if !available {
                debug!("external tool '{}' not found, skipping", linter.name());
            }
            available
        })
        .collect()
}

fn probe(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run a command, capturing stdout, killing the child at the
/// deadline. Returns `None` on spawn failure or timeout.
fn run_with_timeout(mut cmd: Command, tool: &str, timeout: Duration) -> Option<String> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!("failed to spawn {}: {}", tool, e);
            return None;
        }
    };

    // Drain stdout on a separate thread so a chatty tool cannot
    // deadlock on a full pipe before we reap it.
    let stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        use std::io::Read;
        let mut stdout = stdout;
        let mut buf = String::new();
        let _ = stdout.read_to_string(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if Instant::now() >= deadline {
                    debug!("{} timed out after {:?}", tool, timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    return None;
                }
                std::thread::sleep(Duration::from_millis(25));
            }
            Err(e) => {
                debug!("{} wait failed: {}", tool, e);
                let _ = child.kill();
                return None;
            }
        }
    }

    reader.join().ok()
}

/// Python security analysis via bandit's JSON report.
pub struct BanditLinter;

impl BanditLinter {
    fn map_severity(level: &str) -> Severity {
        match level.to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    fn map_confidence(level: &str) -> f64 {
        match level.to_ascii_lowercase().as_str() {
            "high" => 0.9,
            "low" => 0.3,
            _ => 0.6,
        }
    }
}

impl ExternalLinter for BanditLinter {
    fn name(&self) -> &'static str {
        "bandit"
    }

    fn supports(&self, language: Language) -> bool {
        language == Language::Python
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn is_available(&self) -> bool {
        probe("bandit")
    }

    fn run(&self, path: &Path, timeout: Duration) -> Vec<Issue> {
        let mut cmd = Command::new("bandit");
        cmd.args(["-f", "json", "-q"]).arg(path);

        let Some(stdout) = run_with_timeout(cmd, self.name(), timeout) else {
            return Vec::new();
        };
        let Ok(report) = serde_json::from_str::<serde_json::Value>(&stdout) else {
            debug!("bandit produced unparseable output");
            return Vec::new();
        };

        let results = report
            .get("results")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        results
            .iter()
            .filter_map(|item| {
                let test_id = item.get("test_id")?.as_str()?;
                let text = item.get("issue_text")?.as_str()?;
                let line = item.get("line_number").and_then(|l| l.as_u64()).unwrap_or(0);
                let severity = item
                    .get("issue_severity")
                    .and_then(|s| s.as_str())
                    .unwrap_or("medium");
                let confidence = item
                    .get("issue_confidence")
                    .and_then(|s| s.as_str())
                    .unwrap_or("medium");
                Some(
                    Issue::new(
                        Category::Security,
                        test_id,
                        Self::map_severity(severity),
                        text,
                        line as u32,
                        "bandit",
                    )
                    .with_confidence(Self::map_confidence(confidence)),
                )
            })
            .collect()
    }
}

/// YAML quality analysis via yamllint's parsable output:
/// `file:line:col: [level] message (rule)`.
pub struct YamllintLinter;

fn yamllint_line_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"^[^:]+:(\d+):\d+:\s*\[(\w+)\]\s*(.+?)(?:\s*\(([\w-]+)\))?$").unwrap()
    })
}

impl YamllintLinter {
    fn map_severity(level: &str) -> Severity {
        match level {
            "error" => Severity::High,
            "warning" => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

impl ExternalLinter for YamllintLinter {
    fn name(&self) -> &'static str {
        "yamllint"
    }

    fn supports(&self, language: Language) -> bool {
        language == Language::Yaml
    }

    fn category(&self) -> Category {
        Category::Quality
    }

    fn is_available(&self) -> bool {
        probe("yamllint")
    }

    fn run(&self, path: &Path, timeout: Duration) -> Vec<Issue> {
        let mut cmd = Command::new("yamllint");
        cmd.args(["-f", "parsable"]).arg(path);

        let Some(stdout) = run_with_timeout(cmd, self.name(), timeout) else {
            return Vec::new();
        };

        stdout
            .lines()
            .filter_map(|line| {
                let captures = yamllint_line_pattern().captures(line)?;
                let line_no: u32 = captures[1].parse().ok()?;
                let level = captures.get(2).map(|m| m.as_str()).unwrap_or("warning");
                let message = captures.get(3).map(|m| m.as_str()).unwrap_or("");
                let rule = captures.get(4).map(|m| m.as_str()).unwrap_or("unknown");
                Some(Issue::new(
                    Category::Quality,
                    format!("yaml_lint_{rule}"),
                    Self::map_severity(level),
                    message,
                    line_no,
                    "yamllint",
                ))
            })
            .collect()
    }
}
