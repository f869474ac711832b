//! 発音辞書の正規化と読み込みを行うモジュール
//!
//! 方言ごとに異なる形式の発音辞書をパースし、音素マップを通して
//! IPA表記に変換したうえで、正規形式の辞書ファイルを出力します。
//!
//! 正規形式は1行1エントリの `単語<TAB>音素 音素 ...` です。
//! 同じ単語が複数行に現れる場合、それぞれが別の発音を表し、
//! ファイル内で先に現れたものが優先されます。

mod combilex;
mod dialect;
pub mod index;
mod marytts;
mod phonemap;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use hashbrown::HashSet;

use crate::errors::{PhonolexError, Result};

pub use crate::lexicon::dialect::Dialect;
pub use crate::lexicon::index::LexiconIndex;
pub use crate::lexicon::phonemap::PhonemeMap;

/// 音素トークンの並びで表した発音
///
/// ディスク上では半角スペース区切りで表現されます。空のトークンは保持しません。
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pronunciation(Vec<String>);

impl Pronunciation {
    /// 音素トークンの列から発音を作成します。
    ///
    /// 空文字列のトークンは取り除かれます。
    pub fn new<I, S>(phonemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            phonemes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        )
    }

    /// 空白区切りの文字列をパースします。
    pub fn parse(s: &str) -> Self {
        Self::new(s.split_whitespace())
    }

    /// 音素トークンのスライスを返します。
    #[inline(always)]
    pub fn phonemes(&self) -> &[String] {
        &self.0
    }

    /// 音素の数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 音素を1つも含まない場合に `true` を返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// 正規形式の辞書エントリ
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexiconEntry {
    /// 小文字化された単語
    pub word: String,
    /// 発音
    pub pronunciation: Pronunciation,
}

impl LexiconEntry {
    /// 新しいエントリを作成します。
    pub fn new<S>(word: S, pronunciation: Pronunciation) -> Self
    where
        S: Into<String>,
    {
        Self {
            word: word.into(),
            pronunciation,
        }
    }

    /// 正規形式の1行をパースします。
    ///
    /// 空行の場合は `Ok(None)` を返します。
    ///
    /// # エラー
    ///
    /// タブ区切りがない行、単語や発音が空の行は [`PhonolexError::InvalidFormat`] になります。
    pub(crate) fn parse_canonical(
        line: &str,
        lineno: usize,
        name: &'static str,
    ) -> Result<Option<Self>> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (word, pron) = line.split_once('\t').ok_or_else(|| {
            PhonolexError::invalid_format(name, lineno, format!("missing tab in {line:?}"))
        })?;
        let word = word.trim();
        let pronunciation = Pronunciation::parse(pron);
        if word.is_empty() || pronunciation.is_empty() {
            return Err(PhonolexError::invalid_format(
                name,
                lineno,
                format!("empty word or pronunciation in {line:?}"),
            ));
        }
        Ok(Some(Self::new(word, pronunciation)))
    }
}

impl fmt::Display for LexiconEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.pronunciation)
    }
}

/// 方言パーサが1行から取り出した、音素マップ適用前のエントリ
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub word: String,
    pub pronunciation: String,
}

/// 正規形式のエントリ列を書き出します。
///
/// # エラー
///
/// 書き込みに失敗した場合は [`std::io::Error`] を返します。
pub fn write_canonical<W>(entries: &[LexiconEntry], wtr: W) -> std::io::Result<()>
where
    W: Write,
{
    let mut wtr = BufWriter::new(wtr);
    for entry in entries {
        writeln!(wtr, "{entry}")?;
    }
    wtr.flush()
}

/// 発音辞書の正規化器
///
/// 方言と音素マップの組を保持します。音素マップは構築時に一度だけ読み込まれ、
/// 以降変更されません。
pub struct Normalizer {
    dialect: Dialect,
    phoneme_map: PhonemeMap,
}

impl Normalizer {
    /// 方言に対応する既定の音素マップで正規化器を作成します。
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            phoneme_map: dialect.phoneme_map(),
        }
    }

    /// 任意の音素マップで正規化器を作成します。
    pub fn with_phoneme_map(dialect: Dialect, phoneme_map: PhonemeMap) -> Self {
        Self {
            dialect,
            phoneme_map,
        }
    }

    /// 方言を返します。
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// 音素マップを返します。
    pub fn phoneme_map(&self) -> &PhonemeMap {
        &self.phoneme_map
    }

    /// リーダーから辞書を読み込み、正規化したエントリを返します。
    ///
    /// 返されるエントリは単語順に安定ソートされ、同じ単語と発音の組は
    /// 最初の1つだけが残ります。
    ///
    /// # エラー
    ///
    /// - 方言の構造にパースできない行がある場合は [`PhonolexError::InvalidFormat`]
    /// - 音素マップにない記号がある場合は [`PhonolexError::UnknownPhoneme`]
    pub fn read_entries<R>(&self, rdr: R) -> Result<Vec<LexiconEntry>>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);

        let mut entries = vec![];
        let mut seen = HashSet::new();
        let mut skipped = 0;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            let Some(raw) = self.dialect.parse_line(&line, lineno)? else {
                skipped += 1;
                continue;
            };
            let pronunciation =
                self.phoneme_map
                    .map_pronunciation(&raw.pronunciation, self.dialect.name(), lineno)?;
            if seen.insert((raw.word.clone(), pronunciation.to_string())) {
                entries.push(LexiconEntry::new(raw.word, pronunciation));
            }
        }
        if skipped != 0 {
            log::info!(
                "Skipped {} line(s) of the {} lexicon",
                skipped,
                self.dialect.name()
            );
        }

        entries.sort_by(|a, b| a.word.cmp(&b.word));
        Ok(entries)
    }

    /// リーダーから辞書を読み込み、正規形式でライターに書き出します。
    ///
    /// # 戻り値
    ///
    /// 書き出したエントリ数
    ///
    /// # エラー
    ///
    /// [`read_entries()`](Self::read_entries) と同じエラーに加え、書き込みに失敗した場合は
    /// I/Oエラーを返します。
    pub fn normalize<R, W>(&self, rdr: R, wtr: W) -> Result<usize>
    where
        R: Read,
        W: Write,
    {
        let entries = self.read_entries(rdr)?;
        write_canonical(&entries, wtr)?;
        Ok(entries.len())
    }

    /// ファイルを正規化します。
    ///
    /// 出力ファイルはエントリをすべて読み終えてから作成されるため、
    /// 入力が不正な場合に中途半端な出力は残りません。
    pub fn normalize_file<P, Q>(&self, input: P, output: Q) -> Result<usize>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();
        if !input.is_file() {
            return Err(PhonolexError::InputNotFound(input.to_path_buf()));
        }
        let entries = self.read_entries(File::open(input)?)?;
        write_canonical(&entries, File::create(output)?)?;
        log::debug!(
            "Wrote {} {} entries to {}",
            entries.len(),
            self.dialect.name(),
            output.display()
        );
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronunciation_drops_empty_tokens() {
        let pron = Pronunciation::new(["h", "", "ə"]);
        assert_eq!(pron.phonemes(), &["h", "ə"]);
        assert_eq!(Pronunciation::parse("  w  ɝ l d "), Pronunciation::new(["w", "ɝ", "l", "d"]));
    }

    #[test]
    fn test_parse_canonical() {
        let entry = LexiconEntry::parse_canonical("hello\th ə l oʊ\r", 1, "lex")
            .unwrap()
            .unwrap();
        assert_eq!(entry.word, "hello");
        assert_eq!(entry.to_string(), "hello\th ə l oʊ");
        assert_eq!(LexiconEntry::parse_canonical("  ", 2, "lex").unwrap(), None);
    }

    #[test]
    fn test_parse_canonical_missing_tab() {
        let result = LexiconEntry::parse_canonical("hello h ə l oʊ", 7, "lex");
        match result {
            Err(PhonolexError::InvalidFormat(e)) => assert_eq!(e.line(), 7),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_marytts_sorted_and_deduplicated() {
        let data = "Zug|' ts u: k\nAbend|' a: - b @ n t\nzug|ts ' u: k\n";
        let mut out = vec![];
        let n = Normalizer::new(Dialect::MaryTtsDe)
            .normalize(data.as_bytes(), &mut out)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "abend\ta b ə n t\nzug\tts u k\n"
        );
    }

    #[test]
    fn test_normalize_keeps_pronunciation_order() {
        let data = "b\tx\na\tz\nb\ty\n";
        let entries = Normalizer::new(Dialect::Canonical)
            .read_entries(data.as_bytes())
            .unwrap();
        let lines: Vec<_> = entries.iter().map(|e| e.to_string()).collect();
        assert_eq!(lines, ["a\tz", "b\tx", "b\ty"]);
    }

    #[test]
    fn test_normalize_unknown_phoneme() {
        let data = "Abend|a b Q n t\n";
        let result = Normalizer::new(Dialect::MaryTtsDe).normalize(data.as_bytes(), vec![]);
        assert!(matches!(
            result,
            Err(PhonolexError::UnknownPhoneme { line: 1, ref symbol, .. }) if symbol == "Q"
        ));
    }

    #[test]
    fn test_normalize_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = Normalizer::new(Dialect::Combilex)
            .normalize_file(dir.path().join("nope.txt"), dir.path().join("out.lex"));
        assert!(matches!(result, Err(PhonolexError::InputNotFound(_))));
        assert!(!dir.path().join("out.lex").exists());
    }
}
