//! SQLite-backed report history
//!
//! Rows are keyed by (env, report_date, org_name, space_name). Re-exporting the
//! same key is a no-op, so running an export twice on one day never duplicates
//! history.

use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::report::UsageRow;

/// Schema version - increment when the table layout changes
const SCHEMA_VERSION: i32 = 1;

/// Default database file name inside the data directory
const DB_FILE: &str = "usagereport.db";

type Result<T> = std::result::Result<T, StoreError>;

const SELECT_COLUMNS: &str = "env, report_date, org_name, space_name, space_memory_used, \
     org_memory_quota, apps_deployed, apps_running, app_instances_configured, \
     app_instances_running, total_service_instances_deployed, \
     rabbitmq_service_instance_deployed, redis_service_instance_deployed, \
     mysql_service_instance_deployed, spring_cloud_service_instance_deployed, \
     spring_cloud_dataflow_server_instance_deployed";

/// Durable store for exported usage rows
pub struct ReportStore {
    conn: Connection,
}

/// Filter for history queries. Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

impl ReportStore {
    /// Open the store at the default location (~/.usagereport/usagereport.db)
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(StoreError::NoHome)?;
        Ok(home.join(".usagereport").join(DB_FILE))
    }

    /// Open or create the store at a specific path and ensure the schema exists
    pub fn open_at(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create store dir: {}", e)))?;
        }

        let conn = Connection::open(db_path)?;

        let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;
        if version > SCHEMA_VERSION {
            return Err(StoreError::Io(format!(
                "Store schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            )));
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS usage_report (
                env TEXT NOT NULL,
                report_date TEXT NOT NULL,
                org_name TEXT NOT NULL,
                space_name TEXT NOT NULL,
                space_memory_used INTEGER NOT NULL,
                org_memory_quota INTEGER NOT NULL,
                apps_deployed INTEGER NOT NULL,
                apps_running INTEGER NOT NULL,
                app_instances_configured INTEGER NOT NULL,
                app_instances_running INTEGER NOT NULL,
                total_service_instances_deployed INTEGER NOT NULL,
                rabbitmq_service_instance_deployed INTEGER NOT NULL,
                redis_service_instance_deployed INTEGER NOT NULL,
                mysql_service_instance_deployed INTEGER NOT NULL,
                spring_cloud_service_instance_deployed INTEGER NOT NULL,
                spring_cloud_dataflow_server_instance_deployed INTEGER NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_usage_report_key
                ON usage_report(env, report_date, org_name, space_name);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        log::debug!("Opened report store at {}", db_path.display());
        Ok(Self { conn })
    }

    /// Append rows in one transaction, ignoring rows whose key already exists.
    ///
    /// Returns the number of rows actually inserted. On error the transaction
    /// is rolled back and no row from this call is kept.
    pub fn append_rows(&mut self, rows: &[UsageRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO usage_report VALUES
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )?;

            for row in rows {
                inserted += stmt.execute(params![
                    row.env,
                    row.report_date.format("%Y-%m-%d").to_string(),
                    row.org_name,
                    row.space_name,
                    row.space_memory_used,
                    row.org_memory_quota,
                    row.apps_deployed,
                    row.apps_running,
                    row.app_instances_configured,
                    row.app_instances_running,
                    row.total_service_instances_deployed,
                    row.rabbitmq_service_instance_deployed,
                    row.redis_service_instance_deployed,
                    row.mysql_service_instance_deployed,
                    row.spring_cloud_service_instance_deployed,
                    row.spring_cloud_dataflow_server_instance_deployed,
                ])?;
            }
        }

        tx.commit()?;

        if inserted < rows.len() {
            log::info!(
                "{} of {} rows already stored, skipped",
                rows.len() - inserted,
                rows.len()
            );
        }
        Ok(inserted)
    }

    /// Query stored rows ordered by date, env, org and space
    pub fn rows(&self, filter: &HistoryFilter) -> Result<Vec<UsageRow>> {
        let since = filter.since.map(|d| d.format("%Y-%m-%d").to_string());
        let until = filter.until.map(|d| d.format("%Y-%m-%d").to_string());

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM usage_report
             WHERE (?1 IS NULL OR env = ?1)
               AND (?2 IS NULL OR org_name = ?2)
               AND (?3 IS NULL OR report_date >= ?3)
               AND (?4 IS NULL OR report_date <= ?4)
             ORDER BY report_date, env, org_name, space_name"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![filter.env, filter.org, since, until], row_from_sql)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Total number of stored rows
    #[cfg(test)]
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_report", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

fn row_from_sql(row: &Row<'_>) -> rusqlite::Result<UsageRow> {
    let date: String = row.get(1)?;
    let report_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(UsageRow {
        env: row.get(0)?,
        report_date,
        org_name: row.get(2)?,
        space_name: row.get(3)?,
        space_memory_used: row.get(4)?,
        org_memory_quota: row.get(5)?,
        apps_deployed: row.get(6)?,
        apps_running: row.get(7)?,
        app_instances_configured: row.get(8)?,
        app_instances_running: row.get(9)?,
        total_service_instances_deployed: row.get(10)?,
        rabbitmq_service_instance_deployed: row.get(11)?,
        redis_service_instance_deployed: row.get(12)?,
        mysql_service_instance_deployed: row.get(13)?,
        spring_cloud_service_instance_deployed: row.get(14)?,
        spring_cloud_dataflow_server_instance_deployed: row.get(15)?,
    })
}
