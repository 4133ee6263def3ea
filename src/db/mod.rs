//! Data access layer. All queries take the pool by reference; nothing here
//! holds connection state of its own.

pub mod ratings;
pub mod stores;
pub mod users;

/// Builds a safe ORDER BY clause from client-supplied sort params.
/// Unknown fields fall back to name, unknown directions to ascending.
pub fn order_clause(sort_by: Option<&str>, sort_order: Option<&str>) -> String {
    let field = match sort_by {
        Some("email") => "email",
        Some("address") => "address",
        _ => "name",
    };
    let dir = match sort_order {
        Some(o) if o.eq_ignore_ascii_case("desc") => "DESC",
        _ => "ASC",
    };
    format!("{field} {dir}")
}

/// Escapes LIKE metacharacters in a client-supplied filter so `%` and `_`
/// match literally. Queries using the result must carry `ESCAPE '\'`.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("%_%"), "\\%\\_\\%");
    }

    #[test]
    fn test_order_clause_whitelist() {
        assert_eq!(order_clause(None, None), "name ASC");
        assert_eq!(order_clause(Some("email"), Some("desc")), "email DESC");
        assert_eq!(order_clause(Some("address"), Some("DESC")), "address DESC");
        assert_eq!(order_clause(Some("email"), Some("asc")), "email ASC");
        // unknown direction falls back to ASC
        assert_eq!(order_clause(Some("name"), Some("sideways")), "name ASC");
        // injection attempts collapse to the default field
        assert_eq!(
            order_clause(Some("name; DROP TABLE users"), None),
            "name ASC"
        );
        assert_eq!(order_clause(Some("password_hash"), None), "name ASC");
    }
}
