//! 設定ファイルの読み込み関数

use std::path::Path;

use jsonc_parser::ParseOptions;

use super::{
    ConfigError,
    OverlaySettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".word-overlay.json";

/// ワークスペースから設定を読み込む
///
/// `.word-overlay.json` ファイルを探して読み込む（コメントと末尾カンマを許可）
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSONC 構文エラー
/// - 設定値の型エラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<OverlaySettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError(e.to_string()))?;

    // 空ファイルはデフォルト設定として扱う
    let Some(value) = value else {
        return Ok(Some(OverlaySettings::default()));
    };
    let settings: OverlaySettings = serde_json::from_value(value)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_workspace`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"sourceLanguage": "lt"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        assert_eq!(settings.unwrap().source_language, "lt");
    }

    /// `load_from_workspace`: コメントと末尾カンマを含む設定ファイル
    #[rstest]
    fn test_load_from_workspace_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{
  // admin panel languages
  "toggleLanguages": ["en", "de"],
  /* keep it in memory */
  "storage": { "path": null },
}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap().unwrap();

        assert_eq!(settings.toggle_languages[1], "de");
        assert!(settings.storage.path.is_none());
    }

    /// `load_from_workspace`: 空の設定ファイル
    #[rstest]
    fn test_load_from_workspace_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap().unwrap();

        assert_eq!(settings.source_language, "en");
    }

    /// `load_from_workspace`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_workspace`: 構文エラー
    #[rstest]
    fn test_load_from_workspace_invalid_syntax() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"sourceLanguage": }"#).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::SyntaxError(_))));
    }

    /// `load_from_workspace`: 型エラー
    #[rstest]
    fn test_load_from_workspace_wrong_type() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"toggleLanguages": "en"}"#)
            .unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
