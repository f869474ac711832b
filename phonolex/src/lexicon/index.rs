//! 正規形式の辞書から単語→発音リストの索引を構築するモジュール

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;

use crate::errors::{PhonolexError, Result};
use crate::lexicon::{LexiconEntry, Pronunciation};

/// 単語から発音リストへの索引
///
/// 発音リストはファイル内の出現順に並び、先頭が最優先の発音です。
/// 構築後は読み取り専用です。
#[derive(Debug, Default, Clone)]
pub struct LexiconIndex {
    map: HashMap<String, Vec<Pronunciation>>,
}

impl LexiconIndex {
    /// 空の索引を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 正規形式の辞書を読み込みます。
    ///
    /// 空行は読み飛ばします。
    ///
    /// # エラー
    ///
    /// タブを含まない行がある場合は [`PhonolexError::InvalidFormat`] を返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut index = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = LexiconEntry::parse_canonical(&line, i + 1, "lexicon")? {
                index.insert(entry);
            }
        }
        Ok(index)
    }

    /// 正規形式の辞書ファイルを読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルが存在しない場合は [`PhonolexError::InputNotFound`] を返します。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PhonolexError::InputNotFound(path.to_path_buf()));
        }
        log::debug!("Loading lexicon from {}", path.display());
        let index = Self::from_reader(File::open(path)?)?;
        log::debug!("Loaded {} words", index.len());
        Ok(index)
    }

    fn insert(&mut self, entry: LexiconEntry) {
        self.map
            .entry(entry.word)
            .or_default()
            .push(entry.pronunciation);
    }

    /// 単語のすべての発音を優先順に返します。
    ///
    /// 完全一致で見つからない場合は小文字化した単語で引き直します。
    pub fn get(&self, word: &str) -> Option<&[Pronunciation]> {
        self.map
            .get(word)
            .or_else(|| self.map.get(word.to_lowercase().as_str()))
            .map(Vec::as_slice)
    }

    /// 単語の最優先の発音を返します。
    #[inline]
    pub fn preferred(&self, word: &str) -> Option<&Pronunciation> {
        self.get(word).and_then(|prons| prons.first())
    }

    /// 単語が索引に含まれていれば `true` を返します。
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// 単語数を返します。
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 索引が空であれば `true` を返します。
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<LexiconEntry> for LexiconIndex {
    fn from_iter<I: IntoIterator<Item = LexiconEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}
