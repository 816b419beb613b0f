//! word-overlay
//!
//! 辞書ベースの単語単位翻訳オーバーレイ。描画済みの文書のテキストノードと
//! 一部の属性を、マークアップ構造を変えずに選択中の言語へ置き換える。

pub mod config;
pub mod dictionary;
pub mod document;
pub mod language;
pub mod overlay;
pub mod translate;
pub mod types;
pub mod workspace;

#[cfg(test)]
mod test_utils;

pub use overlay::Overlay;
pub use translate::Translator;
