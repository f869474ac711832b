//! MARY TTS ドイツ語辞書のパーサ
//!
//! 1行が `word|pronunciation` の形式です。

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{PhonolexError, Result};
use crate::lexicon::RawEntry;

const NAME: &str = "marytts_de";

/// 強勢、長音、音節境界、声門閉鎖音の記号
static STRIP_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[',:\-?]").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// 読み飛ばす行の先頭文字 (ギリシャ文字の見出し語)
const SKIPPED_PREFIXES: [char; 3] = ['α', 'β', 'γ'];

pub(crate) fn parse_line(line: &str, lineno: usize) -> Result<Option<RawEntry>> {
    if line.starts_with(SKIPPED_PREFIXES) {
        return Ok(None);
    }
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut spl = line.split('|');
    let (word, pron) = match (spl.next(), spl.next(), spl.next()) {
        (Some(word), Some(pron), None) => (word, pron),
        _ => {
            return Err(PhonolexError::invalid_format(
                NAME,
                lineno,
                format!("expected exactly one '|' in {line:?}"),
            ))
        }
    };

    let mut word = word.to_lowercase();
    // Abbreviations such as "zz'" confuse G2P training.
    if word.ends_with('\'') {
        word = word.trim_matches('\'').to_string();
    }
    if word.is_empty() {
        return Err(PhonolexError::invalid_format(NAME, lineno, "empty headword"));
    }

    let pron = STRIP_CHARS.replace_all(pron, "");
    let pron = MULTI_SPACE.replace_all(&pron, " ");
    let pron = pron.trim();
    if pron.is_empty() {
        return Err(PhonolexError::invalid_format(
            NAME,
            lineno,
            format!("empty pronunciation for {word:?}"),
        ));
    }

    Ok(Some(RawEntry {
        word,
        pronunciation: pron.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let raw = parse_line("Abend|' a: - b @ n t", 1).unwrap().unwrap();
        assert_eq!(raw.word, "abend");
        assert_eq!(raw.pronunciation, "a b @ n t");
    }

    #[test]
    fn test_glottal_stop_removed() {
        let raw = parse_line("Uhr|? ' u: 6", 1).unwrap().unwrap();
        assert_eq!(raw.pronunciation, "u 6");
    }

    #[test]
    fn test_trailing_apostrophe() {
        let raw = parse_line("Hans'|h ' a n s", 1).unwrap().unwrap();
        assert_eq!(raw.word, "hans");
    }

    #[test]
    fn test_greek_lines_skipped() {
        assert_eq!(parse_line("α|' a l f a", 1).unwrap(), None);
        assert_eq!(parse_line("γ|' g a m a", 1).unwrap(), None);
    }

    #[test]
    fn test_blank_line_skipped() {
        assert_eq!(parse_line("   ", 1).unwrap(), None);
    }

    #[test]
    fn test_missing_delimiter() {
        let result = parse_line("Abend ' a: b @ n t", 4);
        assert!(matches!(result, Err(PhonolexError::InvalidFormat(ref e)) if e.line() == 4));
    }

    #[test]
    fn test_extra_delimiter() {
        assert!(parse_line("Abend|a b|@ n t", 1).is_err());
    }

    #[test]
    fn test_empty_pronunciation() {
        assert!(parse_line("Abend|' -", 1).is_err());
    }
}
