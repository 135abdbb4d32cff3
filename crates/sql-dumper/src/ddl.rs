//! CREATE TABLE synthesis from live column metadata.
//!
//! The generated DDL covers only the columns the request asked for, so
//! a table recreated from it can hold exactly the exported data: column
//! definitions with nullability and defaults, the primary key, plain
//! and unique indexes, and foreign keys inferred from the declared
//! relations.

use crate::error::{DumpError, Result};
use crate::ident::quote;
use crate::query::{find_relation, Relation};

/// Key classification of a column, as reported by `DESCRIBE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    /// Not part of any key.
    #[default]
    None,
    /// Part of the primary key (`PRI`).
    Primary,
    /// First column of a non-unique index (`MUL`).
    Index,
    /// First column of a unique index (`UNI`).
    Unique,
}

impl KeyKind {
    /// Map the `Key` column of a MySQL `DESCRIBE` row.
    pub fn from_mysql(key: &str) -> Self {
        match key {
            "PRI" => KeyKind::Primary,
            "MUL" => KeyKind::Index,
            "UNI" => KeyKind::Unique,
            _ => KeyKind::None,
        }
    }
}

/// Per-column metadata from the describe capability.
///
/// The type string is dialect-native and passed through opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub field: String,
    pub column_type: String,
    pub nullable: bool,
    pub key: KeyKind,
    pub default: Option<String>,
}

/// Synthesize a CREATE TABLE statement for the requested column subset.
///
/// Metadata rows for columns outside the requested set are skipped;
/// requested columns absent from the metadata are ignored. Fails when
/// no metadata row survives the filter.
///
/// Default values are single-quoted verbatim: embedded quotes are not
/// escaped further.
pub fn create_table(
    table_name: &str,
    description: &[ColumnDescription],
    requested_columns: &[String],
    relations: &[Relation],
) -> Result<String> {
    let mut column_rows = Vec::new();
    let mut primary_keys = Vec::new();
    let mut index_columns = Vec::new();
    let mut unique_columns = Vec::new();
    // Foreign-key candidates keyed by column, kept in metadata order so
    // the emitted DDL is deterministic.
    let mut foreign_keys: Vec<(String, String)> = Vec::new();

    for column in description {
        if !requested_columns.contains(&column.field) {
            continue;
        }

        let mut row = format!(
            "{} {} {}",
            quote(&column.field),
            column.column_type,
            if column.nullable { "NULL" } else { "NOT NULL" }
        );
        if let Some(default) = &column.default {
            row.push_str(&format!(" DEFAULT '{}'", default));
        }
        column_rows.push(row);

        match column.key {
            KeyKind::Primary => primary_keys.push(column.field.clone()),
            KeyKind::Index => index_columns.push(column.field.clone()),
            KeyKind::Unique => unique_columns.push(column.field.clone()),
            KeyKind::None => {}
        }

        if let Some(remote) = find_relation(relations, table_name, &column.field) {
            let constraint = format!(
                "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
                quote(&format!("fk_{}", column.field)),
                quote(&column.field),
                quote(&remote.table),
                quote(&remote.column)
            );
            foreign_keys.push((column.field.clone(), constraint));
        }
    }

    if column_rows.is_empty() {
        return Err(DumpError::NoRequestedFields(table_name.to_string()));
    }

    let mut rows = column_rows;
    if !primary_keys.is_empty() {
        let quoted = primary_keys
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(format!("PRIMARY KEY ({})", quoted));
    }
    for column in &index_columns {
        rows.push(format!("INDEX {} ({})", quote(column), quote(column)));
    }
    for column in &unique_columns {
        rows.push(format!("UNIQUE INDEX {} ({})", quote(column), quote(column)));
    }
    for (column, constraint) in &foreign_keys {
        // A foreign key on the sole primary-key column would be a
        // redundant self-reference.
        if primary_keys.len() == 1 && &primary_keys[0] == column {
            continue;
        }
        rows.push(constraint.clone());
    }

    let body = rows
        .iter()
        .map(|row| format!("    {}", row))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!("CREATE TABLE {} (\n{}\n);", quote(table_name), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Endpoint, Relation};

    fn column(
        field: &str,
        column_type: &str,
        nullable: bool,
        key: KeyKind,
        default: Option<&str>,
    ) -> ColumnDescription {
        ColumnDescription {
            field: field.to_string(),
            column_type: column_type.to_string(),
            nullable,
            key,
            default: default.map(|d| d.to_string()),
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_kind_from_mysql() {
        assert_eq!(KeyKind::from_mysql("PRI"), KeyKind::Primary);
        assert_eq!(KeyKind::from_mysql("MUL"), KeyKind::Index);
        assert_eq!(KeyKind::from_mysql("UNI"), KeyKind::Unique);
        assert_eq!(KeyKind::from_mysql(""), KeyKind::None);
        assert_eq!(KeyKind::from_mysql("SPATIAL"), KeyKind::None);
    }

    #[test]
    fn test_create_table() {
        let description = vec![
            column("id", "bigint(20)", false, KeyKind::Primary, None),
            column("id2", "bigint(20)", true, KeyKind::Index, Some("")),
            column("id3", "bigint(20)", true, KeyKind::Unique, Some("0")),
            column("id4", "varchar(255)", true, KeyKind::Primary, None),
        ];
        let relations = vec![Relation::new(
            Endpoint::new("some_table", "id2"),
            Endpoint::new("other_table", "id"),
        )];

        let ddl = create_table(
            "some_table",
            &description,
            &strings(&["id", "id2", "id3", "no"]),
            &relations,
        )
        .unwrap();

        let expected = "CREATE TABLE `some_table` (\n\
                        \x20   `id` bigint(20) NOT NULL,\n\
                        \x20   `id2` bigint(20) NULL DEFAULT '',\n\
                        \x20   `id3` bigint(20) NULL DEFAULT '0',\n\
                        \x20   PRIMARY KEY (`id`),\n\
                        \x20   INDEX `id2` (`id2`),\n\
                        \x20   UNIQUE INDEX `id3` (`id3`),\n\
                        \x20   CONSTRAINT `fk_id2` FOREIGN KEY (`id2`) REFERENCES `other_table` (`id`) ON DELETE CASCADE\n\
                        );";
        assert_eq!(ddl, expected);
    }

    #[test]
    fn test_create_table_no_matching_fields() {
        let err = create_table("some_table", &[], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("contains none of the specified fields"));

        let description = vec![column("other", "int", false, KeyKind::None, None)];
        let err = create_table("some_table", &description, &strings(&["id"]), &[]).unwrap_err();
        assert!(err.to_string().contains("some_table"));
    }

    #[test]
    fn test_no_foreign_key_on_sole_primary_key() {
        let description = vec![
            column("id", "bigint(20)", false, KeyKind::Primary, None),
            column("name", "varchar(100)", false, KeyKind::None, None),
        ];
        let relations = vec![Relation::new(
            Endpoint::new("some_table", "id"),
            Endpoint::new("other_table", "id"),
        )];

        let ddl = create_table(
            "some_table",
            &description,
            &strings(&["id", "name"]),
            &relations,
        )
        .unwrap();

        assert!(ddl.contains("PRIMARY KEY (`id`)"));
        assert!(!ddl.contains("FOREIGN KEY"));
    }

    #[test]
    fn test_foreign_key_kept_on_composite_primary_key() {
        let description = vec![
            column("station_id", "bigint(20)", false, KeyKind::Primary, None),
            column("route_id", "bigint(20)", false, KeyKind::Primary, None),
        ];
        let relations = vec![
            Relation::new(
                Endpoint::new("stations", "id"),
                Endpoint::new("stations_for_routes", "station_id"),
            ),
            Relation::new(
                Endpoint::new("routes", "id"),
                Endpoint::new("stations_for_routes", "route_id"),
            ),
        ];

        let ddl = create_table(
            "stations_for_routes",
            &description,
            &strings(&["station_id", "route_id"]),
            &relations,
        )
        .unwrap();

        assert!(ddl.contains("PRIMARY KEY (`station_id`, `route_id`)"));
        // Composite key: both columns still get their constraints, in
        // metadata order.
        let fk_station = ddl.find("CONSTRAINT `fk_station_id`").unwrap();
        let fk_route = ddl.find("CONSTRAINT `fk_route_id`").unwrap();
        assert!(fk_station < fk_route);
        assert!(ddl.contains(
            "CONSTRAINT `fk_station_id` FOREIGN KEY (`station_id`) REFERENCES `stations` (`id`) ON DELETE CASCADE"
        ));
        assert!(ddl.contains(
            "CONSTRAINT `fk_route_id` FOREIGN KEY (`route_id`) REFERENCES `routes` (`id`) ON DELETE CASCADE"
        ));
    }

    #[test]
    fn test_default_quoted_verbatim() {
        let description = vec![column(
            "label",
            "varchar(20)",
            true,
            KeyKind::None,
            Some("n/a"),
        )];
        let ddl = create_table("t", &description, &strings(&["label"]), &[]).unwrap();
        assert!(ddl.contains("`label` varchar(20) NULL DEFAULT 'n/a'"));
    }
}
