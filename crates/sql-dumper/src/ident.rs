//! Identifier quoting for generated MySQL statements.
//!
//! Identifiers (table and column names) cannot be bound as statement
//! parameters, so every name that reaches generated SQL goes through
//! these functions. Backticks inside a name are doubled.

/// Quote a MySQL identifier using backticks.
pub fn quote(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Qualify a column with its table: `` `table`.`column` ``.
pub fn qualify(table: &str, column: &str) -> String {
    format!("{}.{}", quote(table), quote(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("some_table"), "`some_table`");
        assert_eq!(quote("some_column"), "`some_column`");
        assert_eq!(quote("Users"), "`Users`");
    }

    #[test]
    fn test_quote_escapes_backtick() {
        assert_eq!(quote("table`name"), "`table``name`");
        assert_eq!(quote("a`b`c"), "`a``b``c`");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("some_table", "some_column"), "`some_table`.`some_column`");
    }

    #[test]
    fn test_qualify_injection_safely_quoted() {
        assert_eq!(
            qualify("t", "Robert`); DROP TABLE Students;--"),
            "`t`.`Robert``); DROP TABLE Students;--`"
        );
    }
}
