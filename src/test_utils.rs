//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::dictionary::{
    Dictionary,
    WordMap,
};

/// テスト用の WordMap を作成する
///
/// # Arguments
/// * `words` - 単語と訳語のペア
pub(crate) fn word_map(words: &[(&str, &str)]) -> WordMap {
    words.iter().copied().collect()
}

/// テスト用の Dictionary を作成する
///
/// # Arguments
/// * `languages` - 言語コードと単語ペアの組
///
/// # Returns
/// 作成された Dictionary
pub(crate) fn dictionary(languages: &[(&str, &[(&str, &str)])]) -> Dictionary {
    let mut dictionary = Dictionary::new();
    for (language, words) in languages {
        dictionary.insert(*language, word_map(words));
    }
    dictionary
}
