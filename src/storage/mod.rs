//! サービス台帳へのアクセス
//!
//! 必要な操作は「全件の (id, title) 取得」と「id 指定の category 更新」の2つだけ。
//! 接続先URLのスキームで PostgreSQL と SQLite を切り替える。

pub mod postgres;
pub mod sqlite;

pub use self::postgres::PostgresCatalog;
pub use sqlite::SqliteCatalog;

use crate::config::TableConfig;
use crate::error::Result;
use catalog_sync_common::ServiceCategory;
use rusqlite::types::{ToSql, ToSqlOutput};
use std::fmt;

/// 台帳レコードの識別子（整数・文字列どちらの主キーにも対応）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogId::Integer(id) => write!(f, "{}", id),
            CatalogId::Text(id) => f.write_str(id),
        }
    }
}

impl ToSql for CatalogId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            CatalogId::Integer(id) => id.to_sql(),
            CatalogId::Text(id) => id.to_sql(),
        }
    }
}

/// 台帳の1レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: CatalogId,
    pub title: Option<String>,
}

impl CatalogRecord {
    /// 前後空白を除いたタイトル（NULL は空文字）
    pub fn trimmed_title(&self) -> &str {
        self.title.as_deref().map(str::trim).unwrap_or("")
    }
}

pub trait CatalogStore {
    fn fetch_all(&mut self) -> Result<Vec<CatalogRecord>>;

    /// 1件更新して即時反映する。更新件数を返す
    fn update_category(&mut self, id: &CatalogId, category: ServiceCategory) -> Result<usize>;
}

/// 接続URLに応じた台帳を開く
///
/// `postgres://` / `postgresql://` は PostgreSQL、それ以外は SQLite として扱う。
pub fn open_catalog(url: &str, table: &TableConfig) -> Result<Box<dyn CatalogStore>> {
    if is_postgres_url(url) {
        Ok(Box::new(PostgresCatalog::connect(url, table)?))
    } else {
        Ok(Box::new(SqliteCatalog::open(url, table)?))
    }
}

fn is_postgres_url(url: &str) -> bool {
    let url = url.trim_start();
    ["postgres://", "postgresql://"]
        .iter()
        .any(|scheme| {
            url.get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        })
}

/// 識別子を二重引用符で囲む
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
