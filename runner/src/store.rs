//! Persistence for the per-match tables.

use crate::pipeline::MatchTables;

const JSON_NULL: serde_json::Value = serde_json::Value::Null;

/// Sink for the tables of one match.
///
/// A call either persists every row of every table or nothing, a match must
/// never be stored half-way.
pub trait TableStore: Send {
    fn append_match(&mut self, tables: &MatchTables) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    Database(duckdb::Error),
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl From<duckdb::Error> for StoreError {
    fn from(err: duckdb::Error) -> Self {
        Self::Database(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(err) => write!(f, "Database: {}", err),
            Self::Io(err) => write!(f, "Writing tables: {}", err),
            Self::Encode(err) => write!(f, "Encoding rows: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

/// Stores every match in one DuckDB database file.
///
/// Tables are created on first contact with their column types inferred from
/// the rows, later matches append to them. All inserts for one match run in
/// a single transaction.
pub struct DuckDbStore {
    conn: duckdb::Connection,
}

impl DuckDbStore {
    pub fn open<P>(path: P) -> Result<Self, StoreError>
    where
        P: AsRef<std::path::Path>,
    {
        let conn = duckdb::Connection::open(path)?;
        Ok(Self { conn })
    }

    fn append_tables(&self, tables: &MatchTables) -> Result<(), StoreError> {
        for table in tables.tables.iter() {
            if table.rows.is_empty() {
                continue;
            }

            let columns = column_types(&table.rows);
            self.create_if_missing(table.name, &columns)?;
            self.insert_rows(table.name, &columns, &table.rows)?;
        }

        Ok(())
    }

    fn create_if_missing(
        &self,
        name: &str,
        columns: &[(String, &'static str)],
    ) -> Result<(), StoreError> {
        let definitions: Vec<String> = columns
            .iter()
            .map(|(column, sql_type)| format!("\"{}\" {}", column, sql_type))
            .collect();
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            name,
            definitions.join(", ")
        );

        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    fn insert_rows(
        &self,
        name: &str,
        columns: &[(String, &'static str)],
        rows: &[serde_json::Map<String, serde_json::Value>],
    ) -> Result<(), StoreError> {
        let column_list: Vec<String> = columns
            .iter()
            .map(|(column, _)| format!("\"{}\"", column))
            .collect();
        let placeholders = vec!["?"; columns.len()];
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            name,
            column_list.join(", "),
            placeholders.join(", ")
        );

        let mut statement = self.conn.prepare(&sql)?;
        for row in rows.iter() {
            let values: Vec<SqlValue<'_>> = columns
                .iter()
                .map(|(column, _)| SqlValue(row.get(column).unwrap_or(&JSON_NULL)))
                .collect();
            let params: Vec<&dyn duckdb::ToSql> = values
                .iter()
                .map(|value| value as &dyn duckdb::ToSql)
                .collect();

            statement.execute(params.as_slice())?;
        }

        Ok(())
    }
}

impl TableStore for DuckDbStore {
    fn append_match(&mut self, tables: &MatchTables) -> Result<(), StoreError> {
        self.conn.execute_batch("BEGIN TRANSACTION")?;

        match self.append_tables(tables) {
            Ok(()) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                    tracing::warn!("Rolling back {:?}: {:?}", tables.match_id, rollback_err);
                }
                Err(err)
            }
        }
    }
}

/// Stores each match as a directory of JSON-lines files, one per table.
///
/// Tables are written into a hidden staging directory first and the whole
/// directory is renamed into place at the end.
pub struct JsonlStore {
    folder: std::path::PathBuf,
}

impl JsonlStore {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        Self {
            folder: folder.into(),
        }
    }
}

impl TableStore for JsonlStore {
    fn append_match(&mut self, tables: &MatchTables) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.folder)?;

        let dir_name = directory_name(&tables.match_id);
        let staging = self.folder.join(format!(".{}.tmp", dir_name));
        if staging.exists() {
            std::fs::remove_dir_all(&staging)?;
        }
        std::fs::create_dir_all(&staging)?;

        for table in tables.tables.iter() {
            if table.rows.is_empty() {
                continue;
            }

            let mut lines = String::new();
            for row in table.rows.iter() {
                lines.push_str(&serde_json::to_string(row)?);
                lines.push('\n');
            }
            std::fs::write(staging.join(format!("{}.jsonl", table.name)), lines)?;
        }

        std::fs::rename(&staging, self.folder.join(dir_name))?;

        Ok(())
    }
}

/// Match ids carry team names, which are free text.
fn directory_name(match_id: &str) -> String {
    match_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn column_types(
    rows: &[serde_json::Map<String, serde_json::Value>],
) -> Vec<(String, &'static str)> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    first
        .keys()
        .map(|column| {
            // A column that is null in every row falls back to VARCHAR.
            let sql_type = rows
                .iter()
                .find_map(|row| row.get(column).and_then(value_type))
                .unwrap_or("VARCHAR");
            (column.clone(), sql_type)
        })
        .collect()
}

fn value_type(value: &serde_json::Value) -> Option<&'static str> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(_) => Some("BOOLEAN"),
        serde_json::Value::Number(number) if number.is_f64() => Some("DOUBLE"),
        serde_json::Value::Number(_) => Some("BIGINT"),
        serde_json::Value::String(_) => Some("VARCHAR"),
        _ => Some("VARCHAR"),
    }
}

struct SqlValue<'a>(&'a serde_json::Value);

impl duckdb::ToSql for SqlValue<'_> {
    fn to_sql(&self) -> duckdb::Result<duckdb::types::ToSqlOutput<'_>> {
        use duckdb::types::{ToSqlOutput, Value, ValueRef};

        let output = match self.0 {
            serde_json::Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            serde_json::Value::Bool(value) => ToSqlOutput::Owned(Value::Boolean(*value)),
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    ToSqlOutput::Owned(Value::BigInt(int))
                } else if let Some(int) = number.as_u64() {
                    ToSqlOutput::Owned(Value::UBigInt(int))
                } else {
                    ToSqlOutput::Owned(Value::Double(number.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(value) => ToSqlOutput::Owned(Value::Text(value.clone())),
            other => ToSqlOutput::Owned(Value::Text(other.to_string())),
        };

        Ok(output)
    }
}

#[cfg(test)]
pub(crate) struct MemoryStore {
    pub appended: std::sync::Arc<std::sync::Mutex<Vec<MatchTables>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> (Self, std::sync::Arc<std::sync::Mutex<Vec<MatchTables>>>) {
        let appended = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        (
            Self {
                appended: appended.clone(),
            },
            appended,
        )
    }
}

#[cfg(test)]
impl TableStore for MemoryStore {
    fn append_match(&mut self, tables: &MatchTables) -> Result<(), StoreError> {
        self.appended.lock().unwrap().push(tables.clone());
        Ok(())
    }
}
