//! ワークスペース設定の読み込み結果を保持するモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    OverlaySettings,
    loader,
};

/// 検証済みの設定とワークスペースルート
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings: OverlaySettings,
    workspace_root: PathBuf,
}

impl ConfigManager {
    /// `workspace_root` の設定ファイルを読み込んで検証する
    ///
    /// 設定ファイルがない場合はデフォルト設定を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSONC パースエラー
    /// - バリデーションエラー
    pub fn load(workspace_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let workspace_root = workspace_root.into();
        let settings = loader::load_from_workspace(&workspace_root)?.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(root = %workspace_root.display(), ?settings, "Loaded settings");
        Ok(Self { settings, workspace_root })
    }

    #[must_use]
    pub const fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// 言語の保存先ファイル（ワークスペースルートからの相対パスを解決したもの）
    ///
    /// `storage.path` が `null` の場合は `None`
    #[must_use]
    pub fn storage_path(&self) -> Option<PathBuf> {
        let relative = self.settings.storage.path.as_ref()?;
        Some(self.workspace_root.join(relative))
    }
}
