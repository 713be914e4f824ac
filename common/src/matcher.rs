//! 名前照合モジュール
//!
//! エクスポートの商品名と、DB側サービスのタイトルを突き合わせる。
//!
//! ## 照合順
//! 1. 完全一致（前後空白除去後のタイトルが商品名そのもの）
//! 2. 部分一致（どちらかがもう一方を含む）
//! 3. 括弧注記（`(...)` / `（...）`）を1つ外して部分一致
//!
//! 部分一致の候補が複数ある場合の選び方は [`FuzzyPolicy`] で決める。
//! 候補の走査順は、エクスポートで商品名が最初に現れた順。

use crate::category::ServiceCategory;
use crate::normalizer::resolve_category;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

lazy_static::lazy_static! {
    // 全角・半角の混在も許す（最短一致）
    static ref ANNOTATION_RE: Regex = Regex::new(r"[（(].*?[）)]").unwrap();
}

/// エクスポートの1商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// 商品名（前後空白除去済み、空でない）
    pub name: String,
    /// 「カテゴリー」列の生の値
    pub raw_category: String,
    /// 正規化済みカテゴリ
    pub category: ServiceCategory,
}

/// 照合の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "完全一致"),
            MatchKind::Fuzzy => write!(f, "部分一致"),
        }
    }
}

/// 部分一致の候補が複数ある場合の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuzzyPolicy {
    /// 走査順で最初に当たった商品
    FirstFound,
    /// 括弧注記を外さずに当たったものを優先し、その中でタイトルと文字数が最も近いもの
    #[default]
    MostSpecific,
}

/// 照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMatch<'a> {
    pub kind: MatchKind,
    pub record: &'a SourceRecord,
}

impl SourceMatch<'_> {
    pub fn category(&self) -> ServiceCategory {
        self.record.category
    }
}

/// 部分一致の根拠
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Containment {
    Stripped,
    Direct,
}

/// 部分一致の根拠と、比較した2つの文字列の文字数差
type Overlap = (Containment, usize);

/// 商品名→カテゴリの表
///
/// 同名の行は後勝ち。走査順は最初に現れた位置のまま。
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    records: Vec<SourceRecord>,
    index: HashMap<String, usize>,
}

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1行追加する。商品名が空なら何もせず `false`
    pub fn insert(&mut self, name: &str, raw_category: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let record = SourceRecord {
            name: name.to_string(),
            raw_category: raw_category.to_string(),
            category: resolve_category(raw_category),
        };

        match self.index.get(name) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SourceRecord> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    /// 走査順のイテレータ
    pub fn iter(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter()
    }

    /// タイトルに対応する商品を探す
    ///
    /// 空タイトルは照合対象外として `None`。
    pub fn find(&self, title: &str, policy: FuzzyPolicy) -> Option<SourceMatch<'_>> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        if let Some(record) = self.get(title) {
            return Some(SourceMatch { kind: MatchKind::Exact, record });
        }

        let title_base = strip_annotation(title);
        let record = match policy {
            FuzzyPolicy::FirstFound => self
                .records
                .iter()
                .find(|r| overlap(&r.name, title, &title_base).is_some()),
            FuzzyPolicy::MostSpecific => self.most_specific(title, &title_base),
        }?;

        Some(SourceMatch { kind: MatchKind::Fuzzy, record })
    }

    /// 商品名⊂タイトルなら長い名前ほど、タイトル⊂商品名なら短い名前ほど近い
    fn most_specific(&self, title: &str, title_base: &str) -> Option<&SourceRecord> {
        let mut best: Option<((Containment, Reverse<usize>), &SourceRecord)> = None;
        for record in &self.records {
            let Some((how, gap)) = overlap(&record.name, title, title_base) else {
                continue;
            };
            let score = (how, Reverse(gap));
            // 同点は先に現れた方
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, record));
            }
        }
        best.map(|(_, record)| record)
    }
}

/// 最初の括弧注記を1つ取り除く
pub fn strip_annotation(text: &str) -> String {
    ANNOTATION_RE.replacen(text, 1, "").trim().to_string()
}

fn overlap(name: &str, title: &str, title_base: &str) -> Option<Overlap> {
    if title.contains(name) || name.contains(title) {
        return Some((Containment::Direct, char_gap(name, title)));
    }

    let name_base = strip_annotation(name);
    if !name_base.is_empty()
        && !title_base.is_empty()
        && (title_base.contains(name_base.as_str()) || name_base.contains(title_base))
    {
        return Some((Containment::Stripped, char_gap(&name_base, title_base)));
    }

    None
}

fn char_gap(a: &str, b: &str) -> usize {
    a.chars().count().abs_diff(b.chars().count())
}
