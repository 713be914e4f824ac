use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogSyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{var} が設定されていません。環境変数か {env_file} に設定してください")]
    MissingCredential { var: String, env_file: String },

    #[error("入力ファイルを指定してください（使い方: catalog-sync <INPUT>）")]
    MissingInput,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("列が見つかりません: {0}")]
    MissingColumn(String),

    #[error("シートが見つかりません: {0}")]
    EmptyWorkbook(String),

    #[error("対応していないデータベースURLです: {0}（postgres://、sqlite:// またはファイルパスを指定してください）")]
    UnsupportedDatabaseUrl(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("データベースエラー: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("PostgreSQLエラー: {0}")]
    Postgres(#[from] postgres::Error),
}

pub type Result<T> = std::result::Result<T, CatalogSyncError>;
