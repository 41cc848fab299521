//! SOQL text helpers.
//!
//! The client passes query text through untouched. When a query embeds a
//! value that came from a user, escape it first:
//!
//! ```rust
//! use forcelink_rest::soql;
//!
//! let name = soql::escape_string("O'Brien & Co.");
//! let query = format!("SELECT Id FROM Account WHERE Name = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Account WHERE Name = 'O\\'Brien & Co.'");
//! ```

/// Escape a value for use inside a single-quoted SOQL string literal.
///
/// Escapes `'`, `\`, newline, carriage return and tab.
#[must_use]
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape a value for use in a `LIKE` pattern. The `%` and `_` wildcards
/// are escaped on top of [`escape_string`].
#[must_use]
pub fn escape_like(value: &str) -> String {
    let base_escaped = escape_string(value);
    let mut escaped = String::with_capacity(base_escaped.len() + 8);
    for ch in base_escaped.chars() {
        match ch {
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `SELECT <fields> FROM <object> WHERE Id = '<id>'`.
///
/// `record_id` is inserted as given.
pub(crate) fn select_by_id(fields: &[&str], object_name: &str, record_id: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE Id = '{}'",
        fields.join(", "),
        object_name,
        record_id
    )
}
