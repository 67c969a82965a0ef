//! End-to-end repository analysis tests
//!
//! Each test builds an isolated temp workspace, runs the full
//! analysis through the library API, and checks the observable
//! contract: counts, scores, histograms, and determinism.

use repolens::{Analyzer, AnalyzerConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyze(dir: &TempDir) -> repolens::RepositoryAnalysis {
    Analyzer::new(AnalyzerConfig::default())
        .analyze_repository(dir.path(), "test-repo")
        .unwrap()
}

#[test]
fn empty_repository_yields_zeroes() {
    let dir = tempfile::tempdir().unwrap();
    let analysis = analyze(&dir);

    assert_eq!(analysis.total_files, 0);
    assert_eq!(analysis.analyzed_files, 0);
    assert_eq!(analysis.overall_scores.security, 0.0);
    assert_eq!(analysis.overall_scores.quality, 0.0);
    assert_eq!(analysis.overall_scores.performance, 0.0);
    assert!(!analysis.summary.requires_attention);
}

#[test]
fn hardcoded_password_scores_eighty() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "config.py", "password = \"secret123\"");

    let analysis = analyze(&dir);
    assert_eq!(analysis.analyzed_files, 1);

    let result = &analysis.file_results[0];
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].issue_type, "hardcoded_password");
    assert_eq!(result.issues[0].line, 1);
    assert_eq!(result.security_score, 80.0);
    assert_eq!(analysis.overall_scores.security, 80.0);
    assert!(analysis.summary.requires_attention);
}

#[test]
fn nine_medium_quality_issues_score_twenty_eight() {
    let dir = tempfile::tempdir().unwrap();
    let content: String = (0..9).map(|i| format!("var v{i} = {i};\n")).collect();
    write(dir.path(), "legacy.js", &content);

    let analysis = analyze(&dir);
    let result = &analysis.file_results[0];

    let quality: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.issue_type == "var_usage")
        .collect();
    assert_eq!(quality.len(), 9);
    assert_eq!(result.security_score, 100.0);
    assert_eq!(result.performance_score, 100.0);
    assert_eq!(result.quality_score, 28.0);
}

#[test]
fn file_cap_analyzes_first_hundred_in_discovery_order() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..150 {
        write(dir.path(), &format!("src/m{i:03}.py"), "x = 1\n");
    }

    let analysis = analyze(&dir);
    assert_eq!(analysis.total_files, 150);
    assert_eq!(analysis.analyzed_files, 100);
    assert_eq!(analysis.file_results.len(), 100);
    assert!(analysis.file_results[0]
        .file_path
        .to_string_lossy()
        .ends_with("m000.py"));
    assert!(analysis.file_results[99]
        .file_path
        .to_string_lossy()
        .ends_with("m099.py"));
}

#[test]
fn excluded_directory_contents_are_pruned() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "node_modules/lib/index.js", "var x = 1;\n");
    write(dir.path(), "node_modules/lib/deep/more.py", "x = 1\n");

    let analysis = analyze(&dir);
    assert_eq!(analysis.total_files, 0);
    assert_eq!(analysis.analyzed_files, 0);
}

#[test]
fn binary_and_unknown_files_are_never_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("image.py"), b"\x00\x89PNG").unwrap();
    write(dir.path(), "README.md", "# docs\n");
    write(dir.path(), "app.py", "x = 1\n");

    let analysis = analyze(&dir);
    assert_eq!(analysis.total_files, 3);
    assert_eq!(analysis.analyzed_files, 1);
    assert_eq!(analysis.file_results[0].language, "python");
}

#[test]
fn reanalysis_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "app.py",
        "import os\n\npassword = \"secret123\"\n\ndef run(cmd):\n    os.system(cmd)\n",
    );
    write(dir.path(), "web.js", "var x = 1;\nel.innerHTML = x;\n");
    write(
        dir.path(),
        "deploy.yml",
        "- hosts: all\n  tasks:\n    - name: go\n      shell: sudo apt install nginx\n",
    );

    let first = analyze(&dir);
    let second = analyze(&dir);

    assert_eq!(first.total_files, second.total_files);
    assert_eq!(first.languages, second.languages);
    assert_eq!(first.overall_scores.security, second.overall_scores.security);
    assert_eq!(first.overall_scores.quality, second.overall_scores.quality);
    for (a, b) in first.file_results.iter().zip(second.file_results.iter()) {
        assert_eq!(a.issues, b.issues);
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.suggestions, b.suggestions);
    }
}

#[test]
fn yaml_and_ansible_rules_fire() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "site.yml",
        "- hosts: web\n  tasks:\n    - name: install\n      shell: sudo apt install nginx\n      with_items:\n        - nginx\n",
    );

    let analysis = analyze(&dir);
    let result = &analysis.file_results[0];
    let types: Vec<&str> = result.issues.iter().map(|i| i.issue_type.as_str()).collect();
    assert!(types.contains(&"ansible_unsafe_sudo"));
    assert!(types.contains(&"ansible_inefficient_module"));
    assert!(types.contains(&"ansible_deprecated_loop"));
}

#[test]
fn dependency_manifests_are_merged() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "requirements.txt", "flask>=2\nrequests\n");
    write(
        dir.path(),
        "package.json",
        r#"{"dependencies": {"react": "*"}, "devDependencies": {"jest": "*"}}"#,
    );
    write(dir.path(), "app.py", "x = 1\n");

    let analysis = analyze(&dir);
    assert_eq!(analysis.dependencies.direct, vec!["flask", "react", "requests"]);
    assert_eq!(analysis.dependencies.dev, vec!["jest"]);
    assert_eq!(analysis.summary.total_dependencies, 4);
}

#[test]
fn syntax_error_degrades_to_single_quality_issue() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.py", "def broken(:\n    pass\n");

    let analysis = analyze(&dir);
    assert_eq!(analysis.analyzed_files, 1);
    let result = &analysis.file_results[0];
    let syntax: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.issue_type == "syntax_error")
        .collect();
    assert_eq!(syntax.len(), 1);
    assert_eq!(syntax[0].severity, repolens::Severity::High);
}

#[test]
fn json_report_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app.py", "password = \"secret123\"\n");

    let analysis = analyze(&dir);
    let rendered =
        repolens::reporters::render(&analysis, repolens::reporters::OutputFormat::Json).unwrap();
    let parsed: repolens::RepositoryAnalysis = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed.analyzed_files, analysis.analyzed_files);
    assert_eq!(
        parsed.file_results[0].issues[0].issue_type,
        analysis.file_results[0].issues[0].issue_type
    );
}

#[test]
fn per_category_score_is_hundred_when_category_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    // Performance issue only; security and quality must both be 100
    write(
        dir.path(),
        "loop.py",
        "for chunk in chunks: out += chunk\n",
    );

    let analysis = analyze(&dir);
    let result = &analysis.file_results[0];
    assert!(result
        .issues
        .iter()
        .all(|i| i.category == repolens::Category::Performance));
    assert_eq!(result.security_score, 100.0);
    assert_eq!(result.quality_score, 100.0);
    assert!(result.performance_score < 100.0);
}