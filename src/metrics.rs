//! Per-file metric computation
//!
//! Metrics are a pure function of (content, language). Line counts
//! use the per-language comment-prefix table; structure counts come
//! from one of two tiers:
//!
//! - `Structured` (Python): a tree-sitter walk counts definitions and
//!   decision constructs per function. A parse-tree error falls back
//!   to the pattern tier, so computation never raises.
//! - `Pattern` (everything else): regex tallies of decision keywords
//!   and declaration shapes. Markup formats report zero structure.

use crate::languages::{AnalysisTier, Language};
use crate::models::FileMetrics;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use tree_sitter::Node;

/// Function/class/complexity tallies, independent of line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureCounts {
    pub functions: usize,
    pub classes: usize,
    pub complexity: usize,
}

/// Compute the full metric set for one file.
pub fn compute(content: &str, language: Language) -> FileMetrics {
    let mut blank_lines = 0;
    let mut comment_lines = 0;
    let prefixes = language.comment_prefixes();

    // Total line count includes blank and comment lines
    let lines_of_code = content.split('\n').count();
    for line in content.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            blank_lines += 1;
        } else if prefixes.iter().any(|p| stripped.starts_with(p)) {
            comment_lines += 1;
        }
    }

    let structure = if language.is_markup() {
        StructureCounts::default()
    } else {
        match language.tier() {
            AnalysisTier::Structured => {
                python_structure(content).unwrap_or_else(|| pattern_structure(content))
            }
            AnalysisTier::Pattern => pattern_structure(content),
        }
    };

    FileMetrics {
        lines_of_code,
        blank_lines,
        comment_lines,
        functions: structure.functions,
        classes: structure.classes,
        cyclomatic_complexity: structure.complexity,
        file_hash: content_hash(content),
        file_size: content.len() as u64,
    }
}

/// SHA-256 digest of the content, hex-encoded. Used by callers for
/// change detection; never consulted for control flow.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Parse Python source, returning `None` when the grammar cannot be
/// loaded or the tree contains errors.
pub(crate) fn parse_python(source: &str) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .ok()?;
    let tree = parser.parse(source, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    Some(tree)
}

/// Visit every node in the tree, depth-first.
pub(crate) fn walk_nodes<'t>(node: Node<'t>, f: &mut dyn FnMut(Node<'t>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_nodes(child, f);
    }
}

/// Node kinds that add one complexity unit each. Boolean operators
/// contribute one per operator node, i.e. one per operand after the
/// first; comprehension clauses count via `for_in_clause`.
const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "while_statement",
    "for_statement",
    "except_clause",
    "for_in_clause",
    "boolean_operator",
];

/// Structured-tier counts from a Python parse tree.
///
/// Complexity is summed per function: a base of one plus one unit per
/// decision construct in the function body. Returns `None` on
/// unparseable input so the caller can fall back to the pattern tier.
pub fn python_structure(content: &str) -> Option<StructureCounts> {
    let tree = parse_python(content)?;
    let root = tree.root_node();

    let mut counts = StructureCounts::default();
    let mut function_nodes = Vec::new();
    walk_nodes(root, &mut |node| match node.kind() {
        "function_definition" => {
            counts.functions += 1;
            function_nodes.push(node);
        }
        "class_definition" => counts.classes += 1,
        _ => {}
    });

    for func in function_nodes {
        let mut decisions = 0;
        walk_nodes(func, &mut |node| {
            if DECISION_KINDS.contains(&node.kind()) {
                decisions += 1;
            }
        });
        counts.complexity += 1 + decisions;
    }

    Some(counts)
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("static metric pattern"))
        .collect()
}

fn function_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"function\s+\w+",
            r"(const|let|var)\s+\w+\s*=\s*\(",
            r"=>",
            r"async\s+function",
            r"\bdef\s+\w+",
            r"\bfn\s+\w+",
            r"\bfunc\s+\w+",
        ])
    })
}

fn class_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(&[r"\bclass\s+\w+", r"\bstruct\s+\w+", r"\binterface\s+\w+"]))
}

fn decision_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"\bif\s*\(",
            r"\belse\s+if\s*\(",
            r"\bwhile\s*\(",
            r"\bfor\s*\(",
            r"\bswitch\s*\(",
            r"\bcase\s+",
            r"\bcatch\s*\(",
            r"\?\s*.*\s*:",
        ])
    })
}

/// Pattern-tier approximation for languages without a parse tree.
pub fn pattern_structure(content: &str) -> StructureCounts {
    let count_all = |patterns: &[Regex]| -> usize {
        patterns.iter().map(|p| p.find_iter(content).count()).sum()
    };
    StructureCounts {
        functions: count_all(function_patterns()),
        classes: count_all(class_patterns()),
        complexity: count_all(decision_patterns()),
    }
}
