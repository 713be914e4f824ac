//! 照合・更新・レポート
//!
//! 台帳を1回だけ全件取得し、レコードごとに照合して一致したものを即時更新する。
//! 更新はまとめず、途中で失敗してもそれまでの更新は残る。

use crate::error::Result;
use crate::storage::{CatalogId, CatalogStore};
use catalog_sync_common::{FuzzyPolicy, MatchKind, ServiceCategory, SourceTable};
use std::io::Write;
use tracing::{debug, warn};

/// 一致行に表示するタイトルの最大文字数
const MATCH_TITLE_WIDTH: usize = 50;
/// 未一致一覧に表示するタイトルの最大文字数
const UNMATCHED_TITLE_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub policy: FuzzyPolicy,
    /// 更新せずにレポートだけ出す
    pub dry_run: bool,
    pub unmatched_sample_limit: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            policy: FuzzyPolicy::default(),
            dry_run: false,
            unmatched_sample_limit: 20,
        }
    }
}

/// 1レコード分の決定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: CatalogId,
    pub title: String,
    pub kind: MatchKind,
    pub source_name: String,
    pub category: ServiceCategory,
}

/// 実行結果
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    pub source_rows: usize,
    pub catalog_records: usize,
    pub assignments: Vec<Assignment>,
    /// 実際に UPDATE を発行した件数（dry-run では 0）
    pub updated: usize,
    /// タイトルが空で照合しなかった件数
    pub skipped_blank: usize,
    /// 一致しなかったタイトル（全件）
    pub unmatched: Vec<String>,
}

impl SyncSummary {
    pub fn exact_count(&self) -> usize {
        self.count_kind(MatchKind::Exact)
    }

    pub fn fuzzy_count(&self) -> usize {
        self.count_kind(MatchKind::Fuzzy)
    }

    fn count_kind(&self, kind: MatchKind) -> usize {
        self.assignments.iter().filter(|a| a.kind == kind).count()
    }
}

/// 照合して更新し、経過を `out` に書く
pub fn run_sync<S, W>(
    table: &SourceTable,
    store: &mut S,
    options: &SyncOptions,
    out: &mut W,
) -> Result<SyncSummary>
where
    S: CatalogStore + ?Sized,
    W: Write,
{
    let mut summary = SyncSummary {
        source_rows: table.len(),
        ..Default::default()
    };
    writeln!(out, "CSV: {} 件の名前・カテゴリを読み込みました。", table.len())?;

    let records = store.fetch_all()?;
    summary.catalog_records = records.len();
    writeln!(out, "DB: {} 件のサービスを取得しました。", records.len())?;
    if options.dry_run {
        writeln!(out, "（dry-run: データベースは更新しません）")?;
    }

    for record in records {
        let title = record.trimmed_title();
        if title.is_empty() {
            summary.skipped_blank += 1;
            continue;
        }

        let Some(found) = table.find(title, options.policy) else {
            summary.unmatched.push(truncate(title, UNMATCHED_TITLE_WIDTH));
            continue;
        };

        let category = found.category();
        if !options.dry_run {
            let changed = store.update_category(&record.id, category)?;
            if changed == 0 {
                warn!("id={} は更新されませんでした", record.id);
            }
            summary.updated += 1;
        }
        writeln!(
            out,
            "  [{}] {} -> {}",
            found.kind,
            truncate(title, MATCH_TITLE_WIDTH),
            category
        )?;
        debug!(
            "{} ← {}（{}、元カテゴリ: {:?}）",
            title, found.record.name, found.kind, found.record.raw_category
        );

        summary.assignments.push(Assignment {
            id: record.id.clone(),
            title: title.to_string(),
            kind: found.kind,
            source_name: found.record.name.clone(),
            category,
        });
    }

    write_footer(&summary, options, out)?;
    Ok(summary)
}

fn write_footer<W: Write>(summary: &SyncSummary, options: &SyncOptions, out: &mut W) -> Result<()> {
    if options.dry_run {
        writeln!(out, "\n更新予定: {} 件（dry-run）", summary.assignments.len())?;
    } else {
        writeln!(out, "\n更新: {} 件", summary.updated)?;
    }

    if summary.unmatched.is_empty() {
        return Ok(());
    }

    writeln!(out, "CSVに名前が無かったサービス: {} 件", summary.unmatched.len())?;
    for title in summary.unmatched.iter().take(options.unmatched_sample_limit) {
        writeln!(out, "  - {}", title)?;
    }
    if summary.unmatched.len() > options.unmatched_sample_limit {
        writeln!(
            out,
            "  ... 他 {} 件",
            summary.unmatched.len() - options.unmatched_sample_limit
        )?;
    }
    Ok(())
}

/// 先頭 `width` 文字に切り詰める
fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
