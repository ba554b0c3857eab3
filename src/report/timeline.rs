//! Timeline feed
//!
//! Rows are appended to an SQLite database shared by every artifact written
//! into the same report directory:
//!
//! ```text
//! data(key TEXT, activity TEXT, datalist TEXT)
//! ```
//!
//! - `key` is the row's first cell (the timestamp column)
//! - `activity` names the artifact the row came from
//! - `datalist` is a JSON object of header -> cell, in header order

use rusqlite::{params, Connection};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::types::ArtifactTable;
use crate::error::ArtifactResult;

/// One stored timeline entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub key: String,
    pub activity: String,
    pub datalist: String,
}

fn open(db_path: &Path) -> ArtifactResult<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS data (
            key TEXT,
            activity TEXT,
            datalist TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_data_key ON data(key);
        "#,
    )?;
    Ok(conn)
}

/// Append every row of `table` under `activity`; returns the number of rows inserted
pub fn append(db_path: &Path, activity: &str, table: &ArtifactTable) -> ArtifactResult<usize> {
    let mut conn = open(db_path)?;
    let tx = conn.transaction()?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO data (key, activity, datalist) VALUES (?1, ?2, ?3)")?;
        for row in &table.rows {
            let key = row.first().map(String::as_str).unwrap_or("");
            let datalist: Map<String, Value> = table
                .headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect();
            stmt.execute(params![key, activity, serde_json::to_string(&datalist)?])?;
        }
    }
    tx.commit()?;
    Ok(table.len())
}

/// Read all entries ordered by key; ties keep insertion order
pub fn entries(db_path: &Path) -> ArtifactResult<Vec<TimelineEntry>> {
    let conn = open(db_path)?;
    let mut stmt =
        conn.prepare("SELECT key, activity, datalist FROM data ORDER BY key, rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(TimelineEntry {
            key: row.get(0)?,
            activity: row.get(1)?,
            datalist: row.get(2)?,
        })
    })?;

    let mut result = Vec::new();
    for entry in rows {
        result.push(entry?);
    }
    Ok(result)
}
