mod javascript;
mod lexer;
mod python;

pub use javascript::JavaScriptScanner;
pub use python::PythonScanner;

use crate::models::Language;
use std::collections::HashSet;

/// Trait for language-specific lexical import scanners
pub trait SpecifierScanner {
    /// Extract raw import specifiers from source text.
    ///
    /// Duplicates are collapsed and the result is in first-occurrence
    /// order. Never fails: malformed input just yields fewer matches.
    fn scan(&self, source: &str) -> Vec<String>;

    /// Get the language this scanner handles
    fn language(&self) -> Language;
}

/// Scanner selected by language
#[derive(Debug, Clone, Copy)]
pub enum Scanner {
    JavaScript(JavaScriptScanner),
    Python(PythonScanner),
}

impl Scanner {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Python => Scanner::Python(PythonScanner::new()),
            Language::JavaScript => Scanner::JavaScript(JavaScriptScanner::new(false)),
            Language::TypeScript => Scanner::JavaScript(JavaScriptScanner::new(true)),
        }
    }
}

impl SpecifierScanner for Scanner {
    fn scan(&self, source: &str) -> Vec<String> {
        match self {
            Scanner::JavaScript(scanner) => scanner.scan(source),
            Scanner::Python(scanner) => scanner.scan(source),
        }
    }

    fn language(&self) -> Language {
        match self {
            Scanner::JavaScript(scanner) => scanner.language(),
            Scanner::Python(scanner) => scanner.language(),
        }
    }
}

/// Scan `source` with the scanner for `language`
pub fn scan_source(language: Language, source: &str) -> Vec<String> {
    Scanner::for_language(language).scan(source)
}

/// Order matches by source offset and drop repeated specifiers
fn collect_ordered(mut found: Vec<(usize, String)>) -> Vec<String> {
    found.sort_by_key(|(offset, _)| *offset);

    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter_map(|(_, specifier)| {
            if seen.insert(specifier.clone()) {
                Some(specifier)
            } else {
                None
            }
        })
        .collect()
}
