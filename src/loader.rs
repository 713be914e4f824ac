//! 商品エクスポートの読み込み
//!
//! CSV（UTF-8、BOM可）と Excel/ODS（先頭シート）に対応する。
//! 1行目をヘッダーとし、商品名列とカテゴリー列だけを使う。

use crate::config::ColumnConfig;
use crate::error::{CatalogSyncError, Result};
use calamine::{open_workbook_auto, Reader};
use catalog_sync_common::SourceTable;
use std::path::Path;
use tracing::{debug, warn};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// エクスポートファイルを読み込んで商品名→カテゴリの表を作る
pub fn load_source(path: &Path, columns: &ColumnConfig) -> Result<SourceTable> {
    if !path.exists() {
        return Err(CatalogSyncError::FileNotFound(path.display().to_string()));
    }

    let is_spreadsheet = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false);

    let rows = if is_spreadsheet {
        read_spreadsheet_rows(path)?
    } else {
        read_csv_rows(path)?
    };

    build_table(rows, columns)
}

/// CSV文字列から読み込み
pub fn load_source_str(content: &str, columns: &ColumnConfig) -> Result<SourceTable> {
    build_table(parse_csv(content)?, columns)
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content)
}

fn parse_csv(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogSyncError::EmptyWorkbook(path.display().to_string()))??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

fn build_table(rows: Vec<Vec<String>>, columns: &ColumnConfig) -> Result<SourceTable> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();

    let find_column = |name: &str| header.iter().position(|h| h.trim() == name);

    let name_idx = find_column(&columns.name_header)
        .ok_or_else(|| CatalogSyncError::MissingColumn(columns.name_header.clone()))?;
    let category_idx = find_column(&columns.category_header);
    if category_idx.is_none() {
        warn!(
            "列「{}」がありません。全行のカテゴリーを空として扱います",
            columns.category_header
        );
    }

    let mut table = SourceTable::new();
    let mut skipped = 0usize;
    for row in rows {
        let name = row.get(name_idx).map(String::as_str).unwrap_or("");
        let cell = category_idx
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("");
        if !table.insert(name, cell) {
            skipped += 1;
        }
    }

    debug!("{} 件読み込み、名前が空の行 {} 件をスキップ", table.len(), skipped);
    Ok(table)
}
