//! Field path syntax
//!
//! - `$` addresses the document root.
//! - Keys of the root object are written bare (`name`); nested keys are
//!   joined with a dot (`user.name`).
//! - Array elements use brackets (`user.tags[0]`, or `[0]` under a root
//!   array).
//! - Keys that would make a path ambiguous (empty, `$`, or containing `.`,
//!   `[`, `]`, quotes, backslashes or whitespace) use a quoted bracket form
//!   with JSON string escaping: `config["db.host"]`.

use serde_json::Value;

/// Path of the document root
pub const ROOT: &str = "$";

/// Path of `key` under `parent`; `parent` is empty for the root container.
pub fn child_key(parent: &str, key: &str) -> String {
    if needs_quoting(key) {
        format!("{}[{}]", parent, quote(key))
    } else if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Path of element `index` under `parent`; `parent` is empty for the root container.
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// Display name of an array element
pub fn index_name(index: usize) -> String {
    format!("[{}]", index)
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key == ROOT
        || key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '"' | '\\') || c.is_whitespace() || c.is_control())
}

fn quote(key: &str) -> String {
    Value::String(key.to_string()).to_string()
}
