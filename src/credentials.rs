//! 接続先URLの解決
//!
//! 環境変数を優先し、無ければ dotenv 形式のファイル（`KEY=value`、`#` コメント、
//! クォート可）から同じキーを探す。プロセスの環境変数は書き換えない。

use crate::error::{CatalogSyncError, Result};
use std::path::Path;
use tracing::debug;

/// URLの取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    EnvFile,
}

/// `var` の値を環境変数 → `env_file` の順に探す
pub fn resolve_credential(var: &str, env_file: &Path) -> Result<(String, CredentialSource)> {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            debug!("{} を環境変数から取得", var);
            return Ok((value, CredentialSource::Environment));
        }
    }

    if let Some(value) = read_env_file(var, env_file) {
        debug!("{} を {} から取得", var, env_file.display());
        return Ok((value, CredentialSource::EnvFile));
    }

    Err(CatalogSyncError::MissingCredential {
        var: var.to_string(),
        env_file: env_file.display().to_string(),
    })
}

/// dotenv ファイルから1キーだけ読む（最初の空でない値）
pub fn read_env_file(var: &str, env_file: &Path) -> Option<String> {
    let entries = match dotenvy::from_path_iter(env_file) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("{} を読めません: {}", env_file.display(), e);
            return None;
        }
    };

    for entry in entries {
        match entry {
            Ok((key, value)) if key == var && !value.trim().is_empty() => {
                return Some(value.trim().to_string());
            }
            Ok(_) => {}
            Err(e) => debug!("{} の行をスキップ: {}", env_file.display(), e),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_file_quoted_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(
            &path,
            "# comment\nOTHER=1\nCATALOG_SYNC_TEST_A=\"sqlite:///tmp/a.db\"\n",
        )
        .unwrap();

        assert_eq!(
            read_env_file("CATALOG_SYNC_TEST_A", &path).as_deref(),
            Some("sqlite:///tmp/a.db")
        );
    }

    #[test]
    fn test_env_file_single_quotes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "CATALOG_SYNC_TEST_B='catalog.db'\n").unwrap();

        assert_eq!(read_env_file("CATALOG_SYNC_TEST_B", &path).as_deref(), Some("catalog.db"));
    }

    #[test]
    fn test_env_file_missing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "OTHER=1\n").unwrap();

        assert!(read_env_file("CATALOG_SYNC_TEST_C", &path).is_none());
    }

    #[test]
    fn test_resolve_from_file_when_env_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "CATALOG_SYNC_TEST_D=catalog.db\n").unwrap();

        let (value, source) = resolve_credential("CATALOG_SYNC_TEST_D", &path).unwrap();
        assert_eq!(value, "catalog.db");
        assert_eq!(source, CredentialSource::EnvFile);
    }

    #[test]
    fn test_resolve_env_wins_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(&path, "CATALOG_SYNC_TEST_F=file.db\n").unwrap();
        std::env::set_var("CATALOG_SYNC_TEST_F", "env.db");

        let (value, source) = resolve_credential("CATALOG_SYNC_TEST_F", &path).unwrap();
        assert_eq!(value, "env.db");
        assert_eq!(source, CredentialSource::Environment);
    }

    #[test]
    fn test_resolve_missing_everywhere() {
        let dir = tempdir().unwrap();
        let err = resolve_credential("CATALOG_SYNC_TEST_E", &dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CatalogSyncError::MissingCredential { .. }));
        assert!(err.to_string().contains("CATALOG_SYNC_TEST_E"));
    }
}
