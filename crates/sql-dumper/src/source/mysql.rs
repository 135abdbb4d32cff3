//! MySQL/MariaDB source implementation.
//!
//! Implements the [`SourceDatabase`] trait with SQLx. Result values are
//! decoded by the driver-reported column type into the closed [`Value`]
//! set; temporal and decimal columns are carried in their textual
//! display form, and anything unrecognized degrades to [`Value::Other`]
//! rather than failing the export.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::ddl::{ColumnDescription, KeyKind};
use crate::error::Result;
use crate::ident::quote;
use crate::source::SourceDatabase;
use crate::value::{Row, Value};

/// Connection pool acquire timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL/MariaDB source implementation.
///
/// The export is fully sequential, so the pool holds a single
/// connection.
pub struct MysqlSource {
    pool: MySqlPool,
}

impl MysqlSource {
    /// Connect from configuration and smoke-test the connection.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").fetch_one(&pool).await?;

        info!(
            "Connected to MySQL source: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { pool })
    }

    fn describe_sql(table: &str) -> String {
        format!("DESCRIBE {}", quote(table))
    }

    /// Decode one result cell by its driver-reported type.
    fn decode_value(row: &MySqlRow, index: usize) -> Value {
        let type_name = {
            let raw = match row.try_get_raw(index) {
                Ok(raw) => raw,
                Err(_) => return Value::Other,
            };
            if raw.is_null() {
                return Value::Null;
            }
            raw.type_info().name().to_string()
        };

        match type_name.as_str() {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" => row
                .try_get::<i32, _>(index)
                .map(Value::I32)
                .unwrap_or(Value::Other),

            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" | "YEAR" | "BIT" => row
                .try_get::<u64, _>(index)
                .map(|v| Value::I64(v as i64))
                .unwrap_or(Value::Other),

            "BIGINT" => row
                .try_get::<i64, _>(index)
                .map(Value::I64)
                .unwrap_or(Value::Other),

            "FLOAT" => row
                .try_get::<f32, _>(index)
                .map(|v| Value::F64(v as f64))
                .unwrap_or(Value::Other),

            "DOUBLE" => row
                .try_get::<f64, _>(index)
                .map(Value::F64)
                .unwrap_or(Value::Other),

            "DECIMAL" => row
                .try_get::<rust_decimal::Decimal, _>(index)
                .map(|v| Value::Text(v.to_string()))
                .unwrap_or(Value::Other),

            "BOOLEAN" => row
                .try_get::<bool, _>(index)
                .map(|v| Value::I32(v as i32))
                .unwrap_or(Value::Other),

            "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM"
            | "SET" | "JSON" => row
                .try_get::<String, _>(index)
                .map(Value::Text)
                .unwrap_or(Value::Other),

            "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
                .try_get::<Vec<u8>, _>(index)
                .map(Value::Bytes)
                .unwrap_or(Value::Other),

            "DATE" => row
                .try_get::<chrono::NaiveDate, _>(index)
                .map(|v| Value::Text(v.to_string()))
                .unwrap_or(Value::Other),

            "TIME" => row
                .try_get::<chrono::NaiveTime, _>(index)
                .map(|v| Value::Text(v.to_string()))
                .unwrap_or(Value::Other),

            "DATETIME" | "TIMESTAMP" => row
                .try_get::<chrono::NaiveDateTime, _>(index)
                .map(|v| Value::Text(v.to_string()))
                .unwrap_or(Value::Other),

            // Last resort: try the textual representation before giving
            // up on the value entirely.
            _ => row
                .try_get::<String, _>(index)
                .map(Value::Text)
                .unwrap_or(Value::Other),
        }
    }

    fn row_to_map(row: &MySqlRow) -> Row {
        let mut map = HashMap::with_capacity(row.columns().len());
        for (index, column) in row.columns().iter().enumerate() {
            map.insert(column.name().to_string(), Self::decode_value(row, index));
        }
        map
    }
}

#[async_trait]
impl SourceDatabase for MysqlSource {
    async fn select_rows(&self, sql: &str, start: i64, end: i64) -> Result<Vec<Row>> {
        debug!("Executing query:\n{}", sql);
        let rows: Vec<MySqlRow> = sqlx::query(sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_map).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescription>> {
        let sql = Self::describe_sql(table);
        debug!("Describing table: {}", sql);
        let rows: Vec<MySqlRow> = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut description = Vec::with_capacity(rows.len());
        for row in rows {
            let field: String = row.try_get("Field")?;
            let column_type: String = row.try_get("Type")?;
            let null: String = row.try_get("Null")?;
            let key: String = row.try_get("Key")?;
            let default: Option<String> = row.try_get("Default")?;

            description.push(ColumnDescription {
                field,
                column_type,
                nullable: null == "YES",
                key: KeyKind::from_mysql(&key),
                default,
            });
        }

        Ok(description)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_sql() {
        assert_eq!(MysqlSource::describe_sql("routes"), "DESCRIBE `routes`");
        assert_eq!(
            MysqlSource::describe_sql("strange`table"),
            "DESCRIBE `strange``table`"
        );
    }
}
