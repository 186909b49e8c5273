use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::lexer::mask_ecmascript;
use super::{collect_ordered, SpecifierScanner};
use crate::models::Language;

/// Prefix that keeps `foo.import(...)` or `myrequire(...)` from matching
const BOUNDARY: &str = r"(?:^|[^.\w$])";

/// `"..."` or `'...'`, contents captured
const QUOTED: &str = r#"(?:"([^"\n]*)"|'([^'\n]*)')"#;

/// Template literal without interpolation
const TEMPLATE: &str = r"`([^`$]*)`";

/// `import x from '...'`, `import { a } from '...'`, `import * as ns from '...'`,
/// `import type { T } from '...'`, `import '...'`
static STATIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m){BOUNDARY}import(?:\s+type\b)?\s*(?:(?:[\w$]+\s*,?\s*)?(?:\*\s*as\s+[\w$]+\s*|\{{[^}}]*\}}\s*)?from\s*)?{QUOTED}"
    ))
    .expect("static import pattern")
});

/// `export * from '...'`, `export * as ns from '...'`, `export { a } from '...'`
static EXPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m){BOUNDARY}export(?:\s+type\b)?\s*(?:\*\s*(?:as\s+[\w$]+\s*)?|\{{[^}}]*\}}\s*)from\s*{QUOTED}"
    ))
    .expect("re-export pattern")
});

/// `import('...')`
static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m){BOUNDARY}import\s*\(\s*(?:{QUOTED}|{TEMPLATE})\s*[,)]"
    ))
    .expect("dynamic import pattern")
});

/// `require('...')`
static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m){BOUNDARY}require\s*\(\s*(?:{QUOTED}|{TEMPLATE})\s*\)"
    ))
    .expect("require pattern")
});

/// Lexical import scanner for JavaScript and TypeScript
#[derive(Debug, Clone, Copy)]
pub struct JavaScriptScanner {
    is_typescript: bool,
}

impl JavaScriptScanner {
    pub fn new(typescript: bool) -> Self {
        Self {
            is_typescript: typescript,
        }
    }
}

impl SpecifierScanner for JavaScriptScanner {
    fn scan(&self, source: &str) -> Vec<String> {
        let masked = mask_ecmascript(source);
        let mut found: Vec<(usize, String)> = Vec::new();

        for pattern in [&*STATIC_IMPORT, &*EXPORT_FROM, &*DYNAMIC_IMPORT, &*REQUIRE] {
            for caps in pattern.captures_iter(&masked) {
                if let Some(m) = literal_contents(&caps) {
                    // Offsets in the masked text line up with the original.
                    let specifier = source[m.start()..m.end()].trim();
                    if !specifier.is_empty() {
                        found.push((m.start(), specifier.to_string()));
                    }
                }
            }
        }

        collect_ordered(found)
    }

    fn language(&self) -> Language {
        if self.is_typescript {
            Language::TypeScript
        } else {
            Language::JavaScript
        }
    }
}

fn literal_contents<'h>(caps: &Captures<'h>) -> Option<regex::Match<'h>> {
    caps.iter().skip(1).flatten().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<String> {
        JavaScriptScanner::new(false).scan(source)
    }

    #[test]
    fn test_esm_import() {
        assert_eq!(scan("import express from 'express';"), vec!["express"]);
    }

    #[test]
    fn test_import_forms() {
        let src = r#"
import React, { useState } from "react";
import * as path from 'path';
import {
  helper,
  other as alias,
} from './utils/helper';
import './globals.css';
import type { User } from './types';
"#;
        assert_eq!(
            scan(src),
            vec!["react", "path", "./utils/helper", "./globals.css", "./types"]
        );
    }

    #[test]
    fn test_reexports() {
        let src = "export * from './a';\nexport { b } from \"./b\";\nexport * as c from './c';\nexport const d = 1;";
        assert_eq!(scan(src), vec!["./a", "./b", "./c"]);
    }

    #[test]
    fn test_require_and_dynamic_import() {
        let src = "const fs = require('fs');\nconst lazy = () => import(\"./lazy\");\nconst t = require(`./tmpl`);";
        assert_eq!(scan(src), vec!["fs", "./lazy", "./tmpl"]);
    }

    #[test]
    fn test_interpolated_template_is_skipped() {
        assert!(scan("const m = require(`./locale/${lang}`);").is_empty());
    }

    #[test]
    fn test_comments_are_ignored() {
        let src = r#"
// import a from './commented';
/* const b = require('./block');
   import('./also-block') */
import real from './real';
"#;
        assert_eq!(scan(src), vec!["./real"]);
    }

    #[test]
    fn test_string_decoys_are_ignored() {
        let src = r#"
const s = "import x from './decoy'";
const t = `require('./template-decoy')`;
const u = 'export * from "./another"'; const v = require('./near');
"#;
        assert_eq!(scan(src), vec!["./near"]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_occurrence_order() {
        let src = "require('b');\nimport a from 'a';\nimport b2 from 'b';\nrequire('a');";
        assert_eq!(scan(src), vec!["b", "a"]);
    }

    #[test]
    fn test_member_calls_do_not_match() {
        assert!(scan("loader.require('x'); obj.import('y'); myrequire('z');").is_empty());
    }

    #[test]
    fn test_import_meta_is_not_an_import() {
        assert!(scan("const url = import.meta.url;").is_empty());
    }

    #[test]
    fn test_typescript_import_equals_require() {
        let scanner = JavaScriptScanner::new(true);
        assert_eq!(scanner.scan("import fs = require('fs');"), vec!["fs"]);
        assert_eq!(scanner.language(), Language::TypeScript);
    }

    #[test]
    fn test_malformed_source_does_not_panic() {
        assert!(scan("import { from '").is_empty());
        assert!(scan("require(").is_empty());
        assert!(scan("`unterminated ${").is_empty());
    }
}
