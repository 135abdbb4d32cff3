//! Query model and SQL generation.
//!
//! A [`Query`] owns the parsed export request: the ordered table list,
//! the declared relations and the primary interval. The first declared
//! table is the anchor: its first column carries the interval predicate
//! (`BETWEEN ? AND ?`), and every other table is reached through a
//! single relation hop back toward the rest of the declaration.
//!
//! Relation resolution walks exactly one hop; deeper transitive chains
//! are out of scope.

use crate::error::{DumpError, Result};
use crate::ident::{qualify, quote};

/// One table of the export request: its name and the columns to
/// project, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSelection {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableSelection {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Comma-separated qualified projection list for this table.
    fn select_columns(&self) -> String {
        self.columns
            .iter()
            .map(|c| qualify(&self.name, c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One endpoint of a declared relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub table: String,
    pub column: String,
}

impl Endpoint {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// A declared equi-join between two table columns.
///
/// The pair is unordered: either side may be matched as the local
/// endpoint during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub left: Endpoint,
    pub right: Endpoint,
}

impl Relation {
    pub fn new(left: Endpoint, right: Endpoint) -> Self {
        Self { left, right }
    }

    /// Whether either endpoint belongs to the given table.
    pub fn involves(&self, table: &str) -> bool {
        self.left.table == table || self.right.table == table
    }

    /// Split into (local, remote) endpoints for the given table name.
    pub fn endpoints_for(&self, table: &str) -> Option<(&Endpoint, &Endpoint)> {
        if self.left.table == table {
            Some((&self.left, &self.right))
        } else if self.right.table == table {
            Some((&self.right, &self.left))
        } else {
            None
        }
    }

    /// The remote endpoint for an exact (table, column) local match.
    pub fn remote_of(&self, table: &str, column: &str) -> Option<&Endpoint> {
        if self.left.table == table && self.left.column == column {
            Some(&self.right)
        } else if self.right.table == table && self.right.column == column {
            Some(&self.left)
        } else {
            None
        }
    }

    /// The equi-join condition as SQL text.
    fn condition(&self) -> String {
        format!(
            "{} = {}",
            qualify(&self.left.table, &self.left.column),
            qualify(&self.right.table, &self.right.column)
        )
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} = {}.{}",
            self.left.table, self.left.column, self.right.table, self.right.column
        )
    }
}

/// Find the remote endpoint for a column: the first declared relation
/// with an exact (table, column) endpoint wins.
pub fn find_relation<'a>(
    relations: &'a [Relation],
    table: &str,
    column: &str,
) -> Option<&'a Endpoint> {
    relations.iter().find_map(|r| r.remote_of(table, column))
}

/// A parsed export request, ready for SQL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tables: Vec<TableSelection>,
    relations: Vec<Relation>,
    interval: Vec<i64>,
}

impl Query {
    pub fn new(tables: Vec<TableSelection>, relations: Vec<Relation>, interval: Vec<i64>) -> Self {
        Self {
            tables,
            relations,
            interval,
        }
    }

    pub fn tables(&self) -> &[TableSelection] {
        &self.tables
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// The anchor table: first in declaration order.
    pub fn anchor(&self) -> &TableSelection {
        &self.tables[0]
    }

    /// The inclusive primary interval. Fails unless exactly two bounds
    /// were declared; checked before any SQL is generated or executed.
    pub fn interval(&self) -> Result<(i64, i64)> {
        if self.interval.len() != 2 {
            return Err(DumpError::QueryBuild(
                "primary interval should contain exactly two values".to_string(),
            ));
        }
        Ok((self.interval[0], self.interval[1]))
    }

    /// SELECT for the anchor table, restricted to the primary interval
    /// on its first declared column.
    pub fn single_table_sql(&self, table: &TableSelection) -> Result<String> {
        let first_column = table.columns.first().ok_or_else(|| {
            DumpError::QueryBuild(format!("table '{}' has no columns to select", table.name))
        })?;
        Ok(format!(
            "SELECT {}\nFROM {}\nWHERE {} BETWEEN ? AND ?",
            table.select_columns(),
            quote(&table.name),
            qualify(&table.name, first_column)
        ))
    }

    /// SELECT for a dependent table, correlated back through its
    /// relation with an `IN (subquery)` predicate.
    pub fn related_table_sql(&self, table: &TableSelection) -> Result<String> {
        let (subquery, left_column) = self.relation_subquery(table)?;
        Ok(format!(
            "SELECT {}\nFROM {}\nWHERE {} IN\n(\n{}\n)",
            table.select_columns(),
            quote(&table.name),
            left_column,
            subquery
        ))
    }

    /// One joined SELECT across all declared tables, each column
    /// aliased as `table.column`.
    pub fn combined_sql(&self) -> String {
        let mut select_tables = Vec::new();
        let mut select_columns = Vec::new();
        let mut conditions = Vec::new();

        for table in &self.tables {
            select_tables.push(quote(&table.name));
            for column in &table.columns {
                select_columns.push(format!(
                    "{} AS {}",
                    qualify(&table.name, column),
                    quote(&format!("{}.{}", table.name, column))
                ));
            }
        }
        for relation in &self.relations {
            conditions.push(relation.condition());
        }
        let anchor = self.anchor();
        conditions.push(format!(
            "{} BETWEEN ? AND ?",
            qualify(&anchor.name, &anchor.columns[0])
        ));

        format!(
            "SELECT {}\nFROM {}\nWHERE ({})",
            select_columns.join(", "),
            select_tables.join(", "),
            conditions.join(") AND (")
        )
    }

    /// `table.column` names across all tables, in declaration order.
    /// These match the aliases produced by [`combined_sql`].
    pub fn all_columns(&self) -> Vec<String> {
        self.tables
            .iter()
            .flat_map(|t| {
                t.columns
                    .iter()
                    .map(move |c| format!("{}.{}", t.name, c))
            })
            .collect()
    }

    /// Build the correlated subquery for a dependent table.
    ///
    /// Returns the subquery text and the qualified local column it
    /// correlates on. The subquery projects the remote endpoint of the
    /// first relation mentioning the table, selects FROM every other
    /// declared table, and filters on the anchor interval plus every
    /// relation that does not involve the table.
    fn relation_subquery(&self, table: &TableSelection) -> Result<(String, String)> {
        if table.name == self.anchor().name {
            return Err(DumpError::QueryBuild(
                "cannot build a dependent query for the anchor table".to_string(),
            ));
        }

        let (local, remote) = self
            .relations
            .iter()
            .find_map(|r| r.endpoints_for(&table.name))
            .ok_or_else(|| DumpError::RelationNotFound {
                table: table.name.clone(),
                relations: self.relations_display(),
            })?;
        let left_column = qualify(&local.table, &local.column);

        let from_tables = self
            .tables
            .iter()
            .filter(|t| t.name != table.name)
            .map(|t| quote(&t.name))
            .collect::<Vec<_>>()
            .join(", ");

        let anchor = self.anchor();
        let mut conditions = vec![format!(
            "{} BETWEEN ? AND ?",
            qualify(&anchor.name, &anchor.columns[0])
        )];
        for relation in &self.relations {
            if relation.involves(&table.name) {
                continue;
            }
            conditions.push(relation.condition());
        }

        let subquery = format!(
            "SELECT {}\nFROM {}\nWHERE ({})",
            qualify(&remote.table, &remote.column),
            from_tables,
            conditions.join(") AND (")
        );
        Ok((subquery, left_column))
    }

    /// All declared relations rendered for diagnostics.
    fn relations_display(&self) -> String {
        self.relations
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
