use crate::error::{CatalogSyncError, Result};
use catalog_sync_common::FuzzyPolicy;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(about = "商品エクスポートのカテゴリーをサービス台帳に反映するツール", long_about = None)]
#[command(after_help = "接続先は環境変数 DIRECT_URL（または .env.local）で指定します")]
pub struct Cli {
    /// 商品エクスポート（CSV / Excel）
    #[arg(required_unless_present = "show_config")]
    pub input: Option<PathBuf>,

    /// 照合・レポートのみ行い、データベースを更新しない
    #[arg(long)]
    pub dry_run: bool,

    /// 部分一致候補が複数ある場合の選び方
    #[arg(long, value_enum)]
    pub fuzzy: Option<FuzzyArg>,

    /// 未一致タイトルの表示件数
    #[arg(long)]
    pub sample_limit: Option<usize>,

    /// 環境変数が無いときに読む dotenv ファイル
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// 設定ファイル（省略時は ~/.config/catalog-sync/config.json）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 有効な設定を表示して終了
    #[arg(long)]
    pub show_config: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 入力ファイル。`--show-config` 以外で省略されていれば使い方エラー
    pub fn input_path(&self) -> Result<&Path> {
        self.input.as_deref().ok_or(CatalogSyncError::MissingInput)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FuzzyArg {
    /// 最初に見つかった候補
    FirstFound,
    /// 括弧注記を外さずに当たり、文字数が最も近い候補
    MostSpecific,
}

impl From<FuzzyArg> for FuzzyPolicy {
    fn from(arg: FuzzyArg) -> Self {
        match arg {
            FuzzyArg::FirstFound => FuzzyPolicy::FirstFound,
            FuzzyArg::MostSpecific => FuzzyPolicy::MostSpecific,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_input_and_flags() {
        let cli = Cli::try_parse_from([
            "catalog-sync",
            "export.csv",
            "--dry-run",
            "--fuzzy",
            "first-found",
            "--sample-limit",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("export.csv")));
        assert!(cli.dry_run);
        assert_eq!(cli.fuzzy.map(FuzzyPolicy::from), Some(FuzzyPolicy::FirstFound));
        assert_eq!(cli.sample_limit, Some(5));
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        assert!(Cli::try_parse_from(["catalog-sync"]).is_err());
    }

    #[test]
    fn test_show_config_without_input() {
        let cli = Cli::try_parse_from(["catalog-sync", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.input.is_none());
        assert!(matches!(cli.input_path(), Err(CatalogSyncError::MissingInput)));
    }

    #[test]
    fn test_input_path() {
        let cli = Cli::try_parse_from(["catalog-sync", "export.csv"]).unwrap();
        assert_eq!(cli.input_path().unwrap(), Path::new("export.csv"));
    }
}
