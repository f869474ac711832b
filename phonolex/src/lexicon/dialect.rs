//! 辞書の方言
//!
//! 方言ごとに行パーサと既定の音素マップを対応付けます。

use std::fmt;
use std::str::FromStr;

use crate::errors::{PhonolexError, Result};
use crate::lexicon::phonemap::PhonemeMap;
use crate::lexicon::{combilex, marytts, LexiconEntry, RawEntry};

/// サポートする辞書の方言
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MARY TTS ドイツ語辞書 (`word|pron`)
    MaryTtsDe,
    /// Combilex 表層辞書 (コロン区切り21フィールド)
    Combilex,
    /// 正規形式 (`word<TAB>pron`)、恒等マップで変換します
    Canonical,
}

impl Dialect {
    /// すべての方言
    pub const ALL: [Self; 3] = [Self::MaryTtsDe, Self::Combilex, Self::Canonical];

    /// 方言名を返します。
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MaryTtsDe => "marytts_de",
            Self::Combilex => "combilex",
            Self::Canonical => "canonical",
        }
    }

    /// 方言の既定の音素マップを作成します。
    pub fn phoneme_map(&self) -> PhonemeMap {
        match self {
            Self::MaryTtsDe => PhonemeMap::marytts_de(),
            Self::Combilex => PhonemeMap::combilex(),
            Self::Canonical => PhonemeMap::identity(),
        }
    }

    /// 1行をパースします。
    ///
    /// 読み飛ばす行の場合は `Ok(None)` を返します。
    pub(crate) fn parse_line(&self, line: &str, lineno: usize) -> Result<Option<RawEntry>> {
        match self {
            Self::MaryTtsDe => marytts::parse_line(line, lineno),
            Self::Combilex => combilex::parse_line(line, lineno),
            Self::Canonical => Ok(LexiconEntry::parse_canonical(line, lineno, self.name())?
                .map(|e| RawEntry {
                    word: e.word.to_lowercase(),
                    pronunciation: e.pronunciation.to_string(),
                })),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = PhonolexError;

    /// 方言名をパースします。大文字小文字と `-`/`_` の違いは無視します。
    fn from_str(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| {
                PhonolexError::invalid_argument(
                    "dialect",
                    format!(
                        "unknown lexicon dialect {name:?}, expected one of: marytts_de, combilex, canonical"
                    ),
                )
            })
    }
}
