//! Language registry and classification
//!
//! Maps file extensions to a closed set of supported languages and
//! records, per language, the comment syntax and which analysis tier
//! applies. Classification is a pure, total function: unknown
//! extensions and binary content are simply unsupported.

use serde::{Deserialize, Serialize};

/// How faithfully a language can be analyzed.
///
/// `Structured` languages have a real parse tree available and get
/// tree-walk metrics; everything else falls back to line-level
/// pattern analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisTier {
    Structured,
    Pattern,
}

/// Supported languages, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    CSharp,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Scala,
    R,
    Sql,
    Bash,
    PowerShell,
    Yaml,
    Json,
    Xml,
    Html,
    Css,
    Scss,
    Less,
}

/// Every registered language, in declaration order.
pub const ALL_LANGUAGES: &[Language] = &[
    Language::Python,
    Language::JavaScript,
    Language::TypeScript,
    Language::Java,
    Language::Go,
    Language::Rust,
    Language::Cpp,
    Language::C,
    Language::CSharp,
    Language::Php,
    Language::Ruby,
    Language::Swift,
    Language::Kotlin,
    Language::Scala,
    Language::R,
    Language::Sql,
    Language::Bash,
    Language::PowerShell,
    Language::Yaml,
    Language::Json,
    Language::Xml,
    Language::Html,
    Language::Css,
    Language::Scss,
    Language::Less,
];

impl Language {
    /// Look up a language from a file extension (without the dot).
    ///
    /// Case-insensitive; returns `None` for anything outside the
    /// registry. `.h` headers classify as C++, matching the common
    /// case of mixed C/C++ trees.
    pub fn from_extension(ext: &str) -> Option<Language> {
        let ext = ext.to_ascii_lowercase();
        let lang = match ext.as_str() {
            "py" | "pyw" => Language::Python,
            "js" | "jsx" | "mjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "h" => Language::Cpp,
            "c" => Language::C,
            "cs" => Language::CSharp,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "kt" => Language::Kotlin,
            "scala" => Language::Scala,
            "r" => Language::R,
            "sql" => Language::Sql,
            "sh" => Language::Bash,
            "ps1" => Language::PowerShell,
            "yml" | "yaml" => Language::Yaml,
            "json" => Language::Json,
            "xml" => Language::Xml,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "scss" => Language::Scss,
            "less" => Language::Less,
            _ => return None,
        };
        Some(lang)
    }

    /// Look up a language from a file path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Language> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }

    /// Stable lowercase identifier used in results and histograms.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::R => "r",
            Language::Sql => "sql",
            Language::Bash => "bash",
            Language::PowerShell => "powershell",
            Language::Yaml => "yaml",
            Language::Json => "json",
            Language::Xml => "xml",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Less => "less",
        }
    }

    /// Line prefixes that start a comment in this language.
    pub fn comment_prefixes(&self) -> &'static [&'static str] {
        match self {
            Language::Python
            | Language::Ruby
            | Language::R
            | Language::Bash
            | Language::PowerShell
            | Language::Yaml => &["#"],
            Language::Php => &["//", "/*", "#"],
            Language::Sql => &["--", "/*"],
            Language::JavaScript
            | Language::TypeScript
            | Language::Java
            | Language::Go
            | Language::Rust
            | Language::Cpp
            | Language::C
            | Language::CSharp
            | Language::Swift
            | Language::Kotlin
            | Language::Scala
            | Language::Css
            | Language::Scss
            | Language::Less => &["//", "/*"],
            Language::Html | Language::Xml => &["<!--"],
            Language::Json => &[],
        }
    }

    /// Which analysis tier this language supports.
    pub fn tier(&self) -> AnalysisTier {
        match self {
            Language::Python => AnalysisTier::Structured,
            _ => AnalysisTier::Pattern,
        }
    }

    /// Whether this is a markup or configuration format rather than
    /// executable code. Markup formats report zero complexity and get
    /// the markup-oriented rule set.
    pub fn is_markup(&self) -> bool {
        matches!(
            self,
            Language::Yaml
                | Language::Json
                | Language::Xml
                | Language::Html
                | Language::Css
                | Language::Scss
                | Language::Less
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of leading bytes inspected for binary content.
const SNIFF_LEN: usize = 1024;

/// Content sniff: a NUL byte in the first KiB marks the file binary.
pub fn is_binary(content: &[u8]) -> bool {
    let head = &content[..content.len().min(SNIFF_LEN)];
    memchr::memchr(0, head).is_some()
}

/// A file is analyzable iff its content is not binary and its
/// extension maps to a registered language.
pub fn classify(path: &std::path::Path, head: &[u8]) -> Option<Language> {
    if is_binary(head) {
        return None;
    }
    Language::from_path(path)
}
