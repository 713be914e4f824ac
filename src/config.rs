use crate::error::{CatalogSyncError, Result};
use catalog_sync_common::FuzzyPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// エクスポートファイルの列名
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnConfig {
    pub name_header: String,
    pub category_header: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name_header: "名前".into(),
            category_header: "カテゴリー".into(),
        }
    }
}

/// 更新対象テーブル
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub table: String,
    pub id_column: String,
    pub title_column: String,
    pub category_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table: "Service".into(),
            id_column: "id".into(),
            title_column: "title".into(),
            category_column: "category".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 接続先URLを読む環境変数名
    pub credential_var: String,
    /// 環境変数が無いときに読む dotenv 形式ファイル
    pub env_file: PathBuf,
    pub columns: ColumnConfig,
    pub storage: TableConfig,
    pub unmatched_sample_limit: usize,
    pub fuzzy_policy: FuzzyPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_var: "DIRECT_URL".into(),
            env_file: PathBuf::from(".env.local"),
            columns: ColumnConfig::default(),
            storage: TableConfig::default(),
            unmatched_sample_limit: 20,
            fuzzy_policy: FuzzyPolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（無ければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogSyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("catalog-sync").join("config.json"))
    }
}
