//! 方言の音素記号からIPA記号への変換表

use hashbrown::HashMap;

use crate::errors::{PhonolexError, Result};
use crate::lexicon::Pronunciation;

/// MARY TTS ドイツ語辞書の音素(長音記号を除く)とIPAの対応
const MARYTTS_DE_TO_IPA: &[(&str, &str)] = &[
    ("@", "ə"), ("2", "ø"), ("6", "ɐ"), ("9", "œ"), ("a", "a"), ("a~", "ã"),
    ("aI", "aɪ"), ("aU", "aʊ"), ("b", "b"), ("C", "ç"), ("d", "d"), ("D", "ð"),
    ("e", "e"), ("e~", "ẽ"), ("E", "ɛ"), ("EI", "ɛɪ"), ("f", "f"), ("g", "ɡ"),
    ("h", "h"), ("i", "i"), ("I", "ɪ"), ("j", "j"), ("k", "k"), ("l", "l"),
    ("m", "m"), ("n", "n"), ("N", "ŋ"), ("o", "o"), ("o~", "õ"), ("O", "ɔ"),
    ("OY", "ɔʏ"), ("p", "p"), ("pf", "pf"), ("r", "ɹ"), ("R", "ʀ"), ("s", "s"),
    ("S", "ʃ"), ("t", "t"), ("T", "θ"), ("ts", "ts"), ("tS", "tʃ"), ("u", "u"),
    ("U", "ʊ"), ("v", "v"), ("w", "w"), ("x", "x"), ("y", "y"), ("Y", "ʏ"),
    ("z", "z"), ("Z", "ʒ"),
];

/// Combilex 表層辞書の音素とIPAの対応
const COMBILEX_TO_IPA: &[(&str, &str)] = &[
    ("A", "ɑ"), ("a", "a"), ("aI", "aɪ"), ("aU", "aʊ"), ("E", "ɛ"), ("eI", "eɪ"),
    ("E@", "ɛə"), ("@U", "əʊ"), ("Q", "ɒ"), ("O", "ɔ"), ("OI", "ɔɪ"), ("3", "ɜ"),
    ("@", "ə"), ("I", "ɪ"), ("i", "i"), ("I@", "ɪə"), ("U", "ʊ"), ("V", "ʌ"),
    ("u", "u"), ("U@", "ʊə"), ("N", "ŋ"), ("T", "θ"), ("D", "ð"), ("S", "ʃ"),
    ("Z", "ʒ"), ("tS", "tʃ"), ("dZ", "dʒ"), ("m=", "ṃ"), ("n=", "ṇ"), ("l=", "ḷ"),
    ("e~", "ẽ"), ("o~", "õ"), ("j", "j"), ("w", "w"), ("4", "ɾ"), ("5", "ɫ"),
    ("b", "b"), ("d", "d"), ("f", "f"), ("g", "ɡ"), ("h", "h"), ("k", "k"),
    ("l", "l"), ("m", "m"), ("n", "n"), ("p", "p"), ("r", "ɹ"), ("s", "s"),
    ("t", "t"), ("v", "v"), ("z", "z"),
];

/// 方言の音素記号からIPA記号へのマップ
///
/// 一度構築したら変更されません。恒等マップはすべての記号をそのまま通します。
#[derive(Clone, Debug)]
pub struct PhonemeMap {
    table: Option<HashMap<String, String>>,
}

impl PhonemeMap {
    /// 記号の組から新しいマップを作成します。
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// すべての記号をそのまま通す恒等マップを作成します。
    pub fn identity() -> Self {
        Self { table: None }
    }

    /// MARY TTS ドイツ語辞書のマップを作成します。
    pub fn marytts_de() -> Self {
        Self::from_pairs(MARYTTS_DE_TO_IPA.iter().copied())
    }

    /// Combilex 辞書のマップを作成します。
    pub fn combilex() -> Self {
        Self::from_pairs(COMBILEX_TO_IPA.iter().copied())
    }

    /// 恒等マップであれば `true` を返します。
    pub fn is_identity(&self) -> bool {
        self.table.is_none()
    }

    /// 記号を変換します。
    ///
    /// マップにない記号の場合は `None` を返します。
    pub fn get<'a>(&'a self, symbol: &'a str) -> Option<&'a str> {
        match &self.table {
            Some(table) => table.get(symbol).map(String::as_str),
            None => Some(symbol),
        }
    }

    /// 変換先のIPA記号を列挙します。恒等マップでは何も返しません。
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.table
            .iter()
            .flat_map(|table| table.values().map(String::as_str))
    }

    /// 空白区切りの発音をトークンごとに変換します。
    ///
    /// # エラー
    ///
    /// マップにないトークンがあれば [`PhonolexError::UnknownPhoneme`] を返します。
    pub(crate) fn map_pronunciation(
        &self,
        pron: &str,
        dialect: &'static str,
        lineno: usize,
    ) -> Result<Pronunciation> {
        let mut phonemes = vec![];
        for symbol in pron.split_whitespace() {
            let ipa = self
                .get(symbol)
                .ok_or_else(|| PhonolexError::unknown_phoneme(dialect, symbol, lineno))?;
            phonemes.push(ipa.to_string());
        }
        Ok(Pronunciation::new(phonemes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(PhonemeMap::marytts_de().targets().count(), 50);
        assert_eq!(PhonemeMap::combilex().targets().count(), 51);
    }

    #[test]
    fn test_get() {
        let map = PhonemeMap::combilex();
        assert_eq!(map.get("dZ"), Some("dʒ"));
        assert_eq!(map.get("5"), Some("ɫ"));
        assert_eq!(map.get("x"), None);
        assert_eq!(PhonemeMap::identity().get("x"), Some("x"));
    }

    #[test]
    fn test_map_pronunciation() {
        let map = PhonemeMap::marytts_de();
        let pron = map.map_pronunciation("aI n @ n", "marytts_de", 1).unwrap();
        assert_eq!(pron.to_string(), "aɪ n ə n");
    }

    #[test]
    fn test_map_pronunciation_unknown() {
        let map = PhonemeMap::marytts_de();
        let err = map.map_pronunciation("a ?", "marytts_de", 12).unwrap_err();
        assert_eq!(
            err.to_string(),
            "UnknownPhonemeError: marytts_de: line 12: no IPA mapping for symbol \"?\""
        );
    }
}
