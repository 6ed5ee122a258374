//! Substitution-protocol lines
//!
//! Lines of the form `PREFIX|characterName|messageKey|params...` are shown
//! as their message key.

/// Message key of a protocol line
///
/// `None` when the line does not start with `prefix` or has fewer than three
/// tokens.
pub fn unwrap_protocol<'a>(line: &'a str, prefix: &str, delimiter: char) -> Option<&'a str> {
    if prefix.is_empty() || !line.starts_with(prefix) {
        return None;
    }
    line.split(delimiter).nth(2)
}
