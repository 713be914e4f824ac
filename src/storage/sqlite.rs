use super::{quote_ident, CatalogId, CatalogRecord, CatalogStore};
use crate::config::TableConfig;
use crate::error::{CatalogSyncError, Result};
use catalog_sync_common::ServiceCategory;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{params, Connection, OpenFlags};
use std::path::PathBuf;
use tracing::debug;

impl FromSql for CatalogId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(id) => Ok(CatalogId::Integer(id)),
            ValueRef::Text(_) => String::column_result(value).map(CatalogId::Text),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// SQLite 上のサービス台帳
pub struct SqliteCatalog {
    conn: Connection,
    select_sql: String,
    update_sql: String,
}

impl SqliteCatalog {
    /// 接続URLから開く。ファイルが無い場合は作らずにエラー
    pub fn open(url: &str, table: &TableConfig) -> Result<Self> {
        let path = database_path(url)?;
        debug!("SQLite を開きます: {}", path.display());
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::from_connection(conn, table))
    }

    pub fn from_connection(conn: Connection, table: &TableConfig) -> Self {
        let t = quote_ident(&table.table);
        let id = quote_ident(&table.id_column);
        let title = quote_ident(&table.title_column);
        let category = quote_ident(&table.category_column);

        Self {
            conn,
            select_sql: format!("SELECT {id}, {title} FROM {t}"),
            update_sql: format!("UPDATE {t} SET {category} = ?1 WHERE {id} = ?2"),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CatalogStore for SqliteCatalog {
    fn fetch_all(&mut self) -> Result<Vec<CatalogRecord>> {
        let mut stmt = self.conn.prepare(&self.select_sql)?;
        let records = stmt
            .query_map([], |row| {
                Ok(CatalogRecord {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn update_category(&mut self, id: &CatalogId, category: ServiceCategory) -> Result<usize> {
        let changed = self.conn.execute(&self.update_sql, params![category.label(), id])?;
        debug!("UPDATE id={} category={} ({}件)", id, category, changed);
        Ok(changed)
    }
}

/// `sqlite://path` / `sqlite:path` / `file:path` / パスそのもの
fn database_path(url: &str) -> Result<PathBuf> {
    let url = url.trim();
    let path = ["sqlite://", "sqlite:", "file://", "file:"]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url);

    if path.is_empty() || path.contains("://") {
        return Err(CatalogSyncError::UnsupportedDatabaseUrl(url.to_string()));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_catalog() -> SqliteCatalog {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE "Service" (id TEXT PRIMARY KEY, title TEXT, category TEXT);
            INSERT INTO "Service" VALUES ('a1', 'ABC塾 渋谷校', NULL);
            INSERT INTO "Service" VALUES ('a2', NULL, NULL);
            "#,
        )
        .unwrap();
        SqliteCatalog::from_connection(conn, &TableConfig::default())
    }

    #[test]
    fn test_database_path() {
        assert_eq!(database_path("sqlite:///tmp/a.db").unwrap(), PathBuf::from("/tmp/a.db"));
        assert_eq!(database_path("sqlite:a.db").unwrap(), PathBuf::from("a.db"));
        assert_eq!(database_path("file:a.db").unwrap(), PathBuf::from("a.db"));
        assert_eq!(database_path(" data/catalog.db ").unwrap(), PathBuf::from("data/catalog.db"));
    }

    #[test]
    fn test_database_path_rejects_other_schemes() {
        let err = database_path("mysql://user:pw@localhost/db").unwrap_err();
        assert!(matches!(err, CatalogSyncError::UnsupportedDatabaseUrl(_)));
        assert!(database_path("sqlite://").is_err());
    }

    #[test]
    fn test_fetch_all_text_ids_and_null_title() {
        let mut catalog = memory_catalog();
        let records = catalog.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, CatalogId::Text("a1".into()));
        assert_eq!(records[0].trimmed_title(), "ABC塾 渋谷校");
        assert_eq!(records[1].title, None);
        assert_eq!(records[1].trimmed_title(), "");
    }

    #[test]
    fn test_update_category() {
        let mut catalog = memory_catalog();
        let changed = catalog
            .update_category(&CatalogId::Text("a1".into()), ServiceCategory::EnglishConversation)
            .unwrap();
        assert_eq!(changed, 1);

        let category: String = catalog
            .connection()
            .query_row(r#"SELECT category FROM "Service" WHERE id = 'a1'"#, [], |r| r.get(0))
            .unwrap();
        assert_eq!(category, "英会話");
    }

    #[test]
    fn test_integer_ids() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE services (sid INTEGER PRIMARY KEY, name TEXT, kind TEXT);
             INSERT INTO services VALUES (7, 'X', NULL);",
        )
        .unwrap();
        let table = TableConfig {
            table: "services".into(),
            id_column: "sid".into(),
            title_column: "name".into(),
            category_column: "kind".into(),
        };
        let mut catalog = SqliteCatalog::from_connection(conn, &table);

        let records = catalog.fetch_all().unwrap();
        assert_eq!(records[0].id, CatalogId::Integer(7));
        assert_eq!(
            catalog.update_category(&records[0].id, ServiceCategory::Programming).unwrap(),
            1
        );
        assert_eq!(
            catalog.update_category(&CatalogId::Integer(99), ServiceCategory::Programming).unwrap(),
            0
        );
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("missing.db").display());
        let err = SqliteCatalog::open(&url, &TableConfig::default()).err().unwrap();
        assert!(matches!(err, CatalogSyncError::Database(_)));
    }
}
