use regex::Regex;
use std::sync::LazyLock;

use super::lexer::mask_python;
use super::{collect_ordered, SpecifierScanner};
use crate::models::Language;

/// `import a`, `import a.b as c, d`, also after `;` or a one-line `if x:`
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|[;:])[ \t]*import[ \t]+([\w.]+(?:[ \t]+as[ \t]+\w+)?(?:[ \t]*,[ \t]*[\w.]+(?:[ \t]+as[ \t]+\w+)?)*)",
    )
    .expect("import pattern")
});

/// `from a.b import c`, `from . import c`, `from ..a import c`
static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[;:])[ \t]*from[ \t]+(?:(\.+)[ \t]*|(\.*\w[\w.]*)[ \t]+)import\b")
        .expect("from-import pattern")
});

/// Lexical import scanner for Python
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonScanner;

impl PythonScanner {
    pub fn new() -> Self {
        Self
    }
}

impl SpecifierScanner for PythonScanner {
    fn scan(&self, source: &str) -> Vec<String> {
        let masked = mask_python(source);
        let mut found: Vec<(usize, String)> = Vec::new();

        for caps in IMPORT.captures_iter(&masked) {
            let Some(names) = caps.get(1) else { continue };
            let mut offset = names.start();
            for part in names.as_str().split(',') {
                // `a.b as c` -> `a.b`
                if let Some(module) = part.split_whitespace().next() {
                    found.push((offset, module.to_string()));
                }
                offset += part.len() + 1;
            }
        }

        for caps in FROM_IMPORT.captures_iter(&masked) {
            if let Some(module) = caps.get(1).or_else(|| caps.get(2)) {
                found.push((module.start(), module.as_str().to_string()));
            }
        }

        collect_ordered(found)
    }

    fn language(&self) -> Language {
        Language::Python
    }
}
