//! Comment and string masking.
//!
//! Both maskers return a copy of the source with the same byte length in
//! which comments are blanked with spaces and string literal contents are
//! overwritten with a filler byte. Newlines are always preserved so
//! line-anchored patterns keep working, and byte offsets found in the
//! masked text can be used to slice the original source.

/// Byte written over string literal contents
pub const STRING_FILL: u8 = b'_';

const COMMENT_FILL: u8 = b' ';

/// Mask a C-family / ECMAScript source.
///
/// Handles `//` and `/* */` comments, single and double quoted strings
/// and template literals. Inside a template literal every `$` is kept so
/// callers can tell interpolated templates from plain ones.
pub fn mask_ecmascript(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = find_line_end(bytes, i);
                blank(&mut out, i, end, COMMENT_FILL);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_subslice(bytes, i + 2, b"*/").map_or(len, |pos| pos + 2);
                blank(&mut out, i, end, COMMENT_FILL);
                i = end;
            }
            quote @ (b'\'' | b'"') => {
                let end = find_quote_end(bytes, i + 1, quote, false);
                blank(&mut out, i + 1, end, STRING_FILL);
                i = end + 1;
            }
            b'`' => {
                let end = find_quote_end(bytes, i + 1, b'`', true);
                for idx in i + 1..end {
                    if bytes[idx] != b'\n' && bytes[idx] != b'$' {
                        out[idx] = STRING_FILL;
                    }
                }
                i = end + 1;
            }
            _ => i += 1,
        }
    }

    into_string(out)
}

/// Mask a Python source.
///
/// Handles `#` comments, single/double quoted strings, triple quoted
/// strings and backslash line continuations (which are joined into a
/// single logical line).
pub fn mask_python(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'#' => {
                let end = find_line_end(bytes, i);
                blank(&mut out, i, end, COMMENT_FILL);
                i = end;
            }
            b'\\' if bytes.get(i + 1) == Some(&b'\n') => {
                out[i] = b' ';
                out[i + 1] = b' ';
                i += 2;
            }
            b'\\' if bytes.get(i + 1) == Some(&b'\r') && bytes.get(i + 2) == Some(&b'\n') => {
                out[i] = b' ';
                out[i + 1] = b' ';
                out[i + 2] = b' ';
                i += 3;
            }
            quote @ (b'\'' | b'"') => {
                let triple = [quote, quote, quote];
                if bytes[i..].starts_with(&triple) {
                    let end = find_triple_end(bytes, i + 3, quote);
                    blank(&mut out, i + 3, end, STRING_FILL);
                    i = (end + 3).min(len);
                } else {
                    let end = find_quote_end(bytes, i + 1, quote, false);
                    blank(&mut out, i + 1, end, STRING_FILL);
                    i = end + 1;
                }
            }
            _ => i += 1,
        }
    }

    into_string(out)
}

/// Overwrite `out[start..end]` with `fill`, keeping newlines
fn blank(out: &mut [u8], start: usize, end: usize, fill: u8) {
    let end = end.min(out.len());
    for byte in out.iter_mut().take(end).skip(start) {
        if *byte != b'\n' && *byte != b'\r' {
            *byte = fill;
        }
    }
}

fn find_line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| from + pos)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| from + pos)
}

/// Index of the closing quote, or of the line end / EOF for an
/// unterminated literal. Multi-line literals only stop at the quote.
fn find_quote_end(bytes: &[u8], from: usize, quote: u8, multiline: bool) -> usize {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' if !multiline => return j,
            b if b == quote => return j,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn find_triple_end(bytes: &[u8], from: usize, quote: u8) -> usize {
    let triple = [quote, quote, quote];
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == b'\\' {
            j += 2;
            continue;
        }
        if bytes[j..].starts_with(&triple) {
            return j;
        }
        j += 1;
    }
    bytes.len()
}

fn into_string(masked: Vec<u8>) -> String {
    // Only whole characters are replaced with ASCII, so this stays valid UTF-8.
    String::from_utf8_lossy(&masked).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_preserves_length_and_newlines() {
        let src = "a /* é\n */ b // ü\n'ça' `x${y}`";
        let masked = mask_ecmascript(src);
        assert_eq!(masked.len(), src.len());
        assert_eq!(masked.matches('\n').count(), 2);
        assert!(masked.starts_with("a "));
        assert!(masked.contains(" b "));
        assert!(masked.contains("'___'"));
        assert!(masked.contains("`_$___`"));
    }

    #[test]
    fn test_mask_ecmascript_comments() {
        let masked = mask_ecmascript("x // require('a')\n/* import 'b' */y");
        assert!(!masked.contains("require"));
        assert!(!masked.contains("import"));
        assert!(masked.contains('x'));
        assert!(masked.ends_with('y'));
    }

    #[test]
    fn test_comment_marker_inside_string_is_not_a_comment() {
        let masked = mask_ecmascript("const u = 'http://x'; require('y')");
        assert!(masked.contains("require('_')"));
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let masked = mask_ecmascript(r#"const s = "a\"import 'x'"; z"#);
        assert!(!masked.contains("import"));
        assert!(masked.ends_with("; z"));
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let masked = mask_ecmascript("const s = 'oops\nrequire('a')");
        assert!(masked.contains("require('_')"));
    }

    #[test]
    fn test_mask_python_docstring_and_comment() {
        let src = "\"\"\"\nimport os\n\"\"\"\n# import sys\nimport re\n";
        let masked = mask_python(src);
        assert_eq!(masked.len(), src.len());
        assert!(!masked.contains("os"));
        assert!(!masked.contains("sys"));
        assert!(masked.contains("import re"));
    }

    #[test]
    fn test_mask_python_line_continuation() {
        let masked = mask_python("import a, \\\n    b\n");
        assert!(masked.starts_with("import a,"));
        assert_eq!(masked.lines().count(), 1);
    }

    #[test]
    fn test_unterminated_block_comment_masks_to_end() {
        let masked = mask_ecmascript("a /* import 'x'");
        assert_eq!(masked.trim(), "a");
    }
}
