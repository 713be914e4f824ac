//! Catalog Sync Common Library
//!
//! カテゴリ正規化と名前照合のルール（I/Oなし）

pub mod category;
pub mod normalizer;
pub mod matcher;

pub use category::ServiceCategory;
pub use normalizer::{normalize_tag, resolve_category};
pub use matcher::{FuzzyPolicy, MatchKind, SourceMatch, SourceRecord, SourceTable, strip_annotation};
