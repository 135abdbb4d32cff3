//! Parsing of the three request strings into a [`Query`].
//!
//! Formats:
//!
//! - tables: `table1:col11,col12;table2:col21;...`
//! - interval: `start-end` (both inclusive, signed 64-bit)
//! - relations: `table1.col1=table2.col2;...` (may be empty)

use crate::error::{DumpError, Result};
use crate::query::{Endpoint, Query, Relation, TableSelection};

/// Parse the request strings into a query definition.
pub fn parse(tables_part: &str, interval_part: &str, relations_part: &str) -> Result<Query> {
    let tables = parse_tables_part(tables_part)?;
    let interval = parse_interval_part(interval_part)?;
    let relations = parse_relations_part(relations_part)?;
    Ok(Query::new(tables, relations, interval))
}

fn parse_tables_part(tables_part: &str) -> Result<Vec<TableSelection>> {
    if tables_part.is_empty() {
        return Err(DumpError::Request("tables part is empty".to_string()));
    }

    let mut tables = Vec::new();
    for definition in tables_part.split(';') {
        let parts: Vec<&str> = definition.split(':').collect();
        if parts.len() != 2 {
            return Err(DumpError::Request(format!(
                "table definition should be in format 'table:column1,column2,...'. Got '{}'",
                definition
            )));
        }
        if parts[1].is_empty() {
            return Err(DumpError::Request(format!(
                "table definition should contain one column at least. Got '{}'",
                definition
            )));
        }
        let columns = parts[1].split(',').map(|c| c.to_string()).collect();
        tables.push(TableSelection::new(parts[0], columns));
    }
    Ok(tables)
}

fn parse_interval_part(interval_part: &str) -> Result<Vec<i64>> {
    let parts: Vec<&str> = interval_part.split('-').collect();
    if parts.len() != 2 {
        return Err(DumpError::Request(format!(
            "interval definition should be in format 'start-end'. Got '{}'",
            interval_part
        )));
    }

    let mut interval = Vec::with_capacity(2);
    for part in parts {
        let bound: i64 = part.parse().map_err(|_| {
            DumpError::Request(format!("interval bound is not an integer: '{}'", part))
        })?;
        interval.push(bound);
    }
    Ok(interval)
}

fn parse_relations_part(relations_part: &str) -> Result<Vec<Relation>> {
    let mut relations = Vec::new();
    if relations_part.is_empty() {
        return Ok(relations);
    }

    for definition in relations_part.split(';') {
        let sides: Vec<&str> = definition.split('=').collect();
        if sides.len() != 2 {
            return Err(DumpError::Request(format!(
                "relation definition should be in format 'table1.column1=table2.column2'. Got '{}'",
                definition
            )));
        }
        let left: Vec<&str> = sides[0].split('.').collect();
        let right: Vec<&str> = sides[1].split('.').collect();
        if left.len() != 2 || right.len() != 2 {
            return Err(DumpError::Request(format!(
                "relation definition should be in format 'table1.column1=table2.column2'. Got '{}'",
                definition
            )));
        }
        if left.iter().chain(right.iter()).any(|part| part.is_empty()) {
            return Err(DumpError::Request(
                "found empty relation part: table or column".to_string(),
            ));
        }
        relations.push(Relation::new(
            Endpoint::new(left[0], left[1]),
            Endpoint::new(right[0], right[1]),
        ));
    }
    Ok(relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tables_part() {
        let tables = parse_tables_part(
            "routes:id,name;stations:id,sname;stations_for_routes:station_id,route_id,ord",
        )
        .unwrap();
        assert_eq!(
            tables,
            vec![
                TableSelection::new("routes", vec!["id".into(), "name".into()]),
                TableSelection::new("stations", vec!["id".into(), "sname".into()]),
                TableSelection::new(
                    "stations_for_routes",
                    vec!["station_id".into(), "route_id".into(), "ord".into()],
                ),
            ]
        );

        let tables = parse_tables_part("routes:id,name").unwrap();
        assert_eq!(
            tables,
            vec![TableSelection::new("routes", vec!["id".into(), "name".into()])]
        );
    }

    #[test]
    fn test_parse_tables_part_errors() {
        assert!(parse_tables_part("").is_err());
        assert!(parse_tables_part("routes").is_err());
        assert!(parse_tables_part("routes:").is_err());
        assert!(parse_tables_part("routes:id;stations").is_err());
    }

    #[test]
    fn test_parse_interval_part() {
        assert_eq!(
            parse_interval_part("704293046165300-704293046165399").unwrap(),
            vec![704293046165300, 704293046165399]
        );
        assert_eq!(parse_interval_part("1-2").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_parse_interval_part_errors() {
        assert!(parse_interval_part("1-a").is_err());
        assert!(parse_interval_part("1").is_err());
        assert!(parse_interval_part("").is_err());
        assert!(parse_interval_part("1-2-3").is_err());
    }

    #[test]
    fn test_parse_relations_part() {
        let relations = parse_relations_part(
            "routes.id=stations_for_routes.route_id;stations.id=stations_for_routes.station_id",
        )
        .unwrap();
        assert_eq!(
            relations,
            vec![
                Relation::new(
                    Endpoint::new("routes", "id"),
                    Endpoint::new("stations_for_routes", "route_id"),
                ),
                Relation::new(
                    Endpoint::new("stations", "id"),
                    Endpoint::new("stations_for_routes", "station_id"),
                ),
            ]
        );

        assert_eq!(parse_relations_part("").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_relations_part_errors() {
        assert!(parse_relations_part("routes.id=stations_for_routes.").is_err());
        assert!(parse_relations_part("asd").is_err());
        assert!(parse_relations_part("routes.id=stations_for_routes").is_err());
        assert!(parse_relations_part(".id=stations.id").is_err());
    }

    #[test]
    fn test_parse() {
        let query = parse(
            "routes:id,name;stations:id,sname;stations_for_routes:station_id,route_id,ord",
            "154293032165394-154293032165399",
            "routes.id=stations_for_routes.route_id;stations.id=stations_for_routes.station_id",
        )
        .unwrap();
        assert_eq!(query.tables().len(), 3);
        assert_eq!(query.relations().len(), 2);
        assert_eq!(query.interval().unwrap(), (154293032165394, 154293032165399));
    }

    #[test]
    fn test_parse_propagates_errors() {
        assert!(parse("routes:id", "1-2", "asd").is_err());
        assert!(parse("routes:id", "asd", "").is_err());
        assert!(parse("asd", "1-2", "").is_err());
    }
}
