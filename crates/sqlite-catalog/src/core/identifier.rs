//! Identifier quoting for generated SQL.
//!
//! SQL identifiers (table, column and index names) cannot be bound as
//! statement parameters, so every name placed into generated SQL goes
//! through [`quote_ident`]. Raw SQL fragments such as column definitions
//! or partial-index predicates are never passed through here; they are
//! arbitrary SQL and belong to the caller.

/// Identifier delimiter used by SQLite.
const DELIMITER: char = '"';

/// Quote an identifier for SQLite.
///
/// Doubles every embedded double quote and wraps the result in double
/// quotes. The name is otherwise left untouched: no case folding, no
/// trimming, no validation.
///
/// # Examples
///
/// ```
/// use sqlite_catalog::quote_ident;
///
/// assert_eq!(quote_ident("users"), "\"users\"");
/// assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_ident(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(DELIMITER);
    for ch in name.chars() {
        if ch == DELIMITER {
            quoted.push(DELIMITER);
        }
        quoted.push(ch);
    }
    quoted.push(DELIMITER);
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_normal() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("my_table"), "\"my_table\"");
        assert_eq!(quote_ident("Table123"), "\"Table123\"");
    }

    #[test]
    fn test_quote_ident_escapes_double_quote() {
        assert_eq!(quote_ident("table\"name"), "\"table\"\"name\"");
        assert_eq!(quote_ident("a\"b\"c"), "\"a\"\"b\"\"c\"");
        assert_eq!(quote_ident("\""), "\"\"\"\"");
    }

    #[test]
    fn test_quote_ident_preserves_case_and_whitespace() {
        assert_eq!(quote_ident("  Mixed Case  "), "\"  Mixed Case  \"");
        assert_eq!(quote_ident("日本語"), "\"日本語\"");
    }

    #[test]
    fn test_quote_ident_empty() {
        assert_eq!(quote_ident(""), "\"\"");
    }

    #[test]
    fn test_quote_ident_injection_safely_quoted() {
        assert_eq!(
            quote_ident("Robert\"); DROP TABLE Students;--"),
            "\"Robert\"\"); DROP TABLE Students;--\""
        );
    }

    #[test]
    fn test_quote_ident_leaves_single_quotes_alone() {
        assert_eq!(quote_ident("O'Brien"), "\"O'Brien\"");
    }
}
