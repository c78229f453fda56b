//! Nesting depth check on raw JSON text
//!
//! Runs before deserialization so that deeply nested input is reported as
//! [`AnalysisError::DepthExceeded`] instead of reaching the parser's own
//! recursion. Only structural bytes are inspected; syntax errors are left
//! for the parser to report.

use crate::error::{AnalysisError, AnalysisResult};
use crate::structure::path;

/// Open container while scanning
enum Scope {
    Object {
        /// Byte range of the current key, quotes included
        key: Option<(usize, usize)>,
        expect_key: bool,
    },
    Array {
        index: usize,
    },
}

/// Fail if any value in `text` sits deeper than `max_depth`.
///
/// Depth counts enclosing containers, matching the depth of field records:
/// children of the root are at depth 1. The error carries the path of the
/// first offending value in document order.
pub fn check_nesting(text: &str, max_depth: usize) -> AnalysisResult<()> {
    let bytes = text.as_bytes();
    let mut stack: Vec<Scope> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b':' => i += 1,
            b',' => {
                match stack.last_mut() {
                    Some(Scope::Array { index }) => *index += 1,
                    Some(Scope::Object { expect_key, .. }) => *expect_key = true,
                    None => {}
                }
                i += 1;
            }
            b'}' | b']' => {
                stack.pop();
                i += 1;
            }
            b'"' => {
                let Some(end) = string_end(bytes, i) else {
                    // Unterminated string; the parser reports it
                    return Ok(());
                };
                let is_key = matches!(
                    stack.last(),
                    Some(Scope::Object {
                        expect_key: true,
                        ..
                    })
                );
                if !is_key {
                    check_value(text, &stack, max_depth)?;
                } else if let Some(Scope::Object { key, expect_key }) = stack.last_mut() {
                    *key = Some((i, end));
                    *expect_key = false;
                }
                i = end + 1;
            }
            open @ (b'{' | b'[') => {
                check_value(text, &stack, max_depth)?;
                stack.push(if open == b'{' {
                    Scope::Object {
                        key: None,
                        expect_key: true,
                    }
                } else {
                    Scope::Array { index: 0 }
                });
                i += 1;
            }
            _ => {
                // Number or literal
                check_value(text, &stack, max_depth)?;
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
            }
        }
    }

    Ok(())
}

fn check_value(text: &str, stack: &[Scope], max_depth: usize) -> AnalysisResult<()> {
    let depth = stack.len();
    if depth > max_depth {
        return Err(AnalysisError::depth_exceeded(
            path_of(text, stack),
            depth,
            max_depth,
        ));
    }
    Ok(())
}

/// Path of the value at the innermost scope's current position
fn path_of(text: &str, stack: &[Scope]) -> String {
    stack.iter().fold(String::new(), |parent, scope| match scope {
        Scope::Array { index } => path::child_index(&parent, *index),
        Scope::Object { key, .. } => {
            let raw = key.map(|(start, end)| &text[start..=end]).unwrap_or("\"\"");
            let key = serde_json::from_str::<String>(raw)
                .unwrap_or_else(|_| raw.trim_matches('"').to_string());
            path::child_key(&parent, &key)
        }
    })
}

/// Index of the closing quote of the string opening at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b',' | b':' | b'{' | b'}' | b'[' | b']' | b'"' | b' ' | b'\t' | b'\n' | b'\r'
    )
}
