//! 単語リストへの符号化とプレースホルダトークン
//!
//! デコーダは1行1単語の単語リストを入力として受け取ります。テキスト中の空白と
//! 句読点は、単語リストを通過した後に元の位置へ復元できるよう、
//! それぞれ専用のプレースホルダ行として書き出されます。
//!
//! 例えば `"Hello, world!"` は次の単語リストになります。
//!
//! ```text
//! Hello
//! ,
//! .space
//! world
//! !
//! ```

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::Result;

/// 空白を表すプレースホルダの文字列
pub const SPACE_LITERAL: &str = ".space";

/// 単語リスト上で空白や句読点の代わりに使われるトークン
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// 空白
    Space,
    /// `.`
    Period,
    /// `?`
    Question,
    /// `!`
    Exclamation,
    /// `,`
    Comma,
}

impl Placeholder {
    /// すべてのプレースホルダ
    pub const ALL: [Self; 5] = [
        Self::Space,
        Self::Period,
        Self::Question,
        Self::Exclamation,
        Self::Comma,
    ];

    /// 単語リストに書き出される文字列を返します。
    pub const fn literal(&self) -> &'static str {
        match self {
            Self::Space => SPACE_LITERAL,
            Self::Period => ".",
            Self::Question => "?",
            Self::Exclamation => "!",
            Self::Comma => ",",
        }
    }

    /// 復元後の文字を返します。
    pub const fn character(&self) -> char {
        match self {
            Self::Space => ' ',
            Self::Period => '.',
            Self::Question => '?',
            Self::Exclamation => '!',
            Self::Comma => ',',
        }
    }

    /// 入力テキストの文字に対応するプレースホルダを返します。
    ///
    /// 空白類の文字はすべて [`Placeholder::Space`] になります。
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Period),
            '?' => Some(Self::Question),
            '!' => Some(Self::Exclamation),
            ',' => Some(Self::Comma),
            c if c.is_whitespace() => Some(Self::Space),
            _ => None,
        }
    }

    /// 単語リスト上の文字列に対応するプレースホルダを返します。
    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.literal() == s)
    }
}

/// テキストを単語リストの形式でライターに書き出します。
///
/// 区切り文字ではない文字の連続は1行にそのまま書き出され、空白と句読点は
/// それぞれ独立したプレースホルダ行になります。空の単語は書き出されないため、
/// 行の並びはトークンの並びと一致します。
///
/// # 戻り値
///
/// 書き出した行数
pub fn encode_to<W>(text: &str, wtr: W) -> io::Result<usize>
where
    W: Write,
{
    let mut wtr = BufWriter::new(wtr);
    let mut word = String::new();
    let mut num_lines = 0;

    for c in text.chars() {
        match Placeholder::from_char(c) {
            Some(placeholder) => {
                if !word.is_empty() {
                    writeln!(wtr, "{word}")?;
                    word.clear();
                    num_lines += 1;
                }
                writeln!(wtr, "{}", placeholder.literal())?;
                num_lines += 1;
            }
            None => word.push(c),
        }
    }
    if !word.is_empty() {
        writeln!(wtr, "{word}")?;
        num_lines += 1;
    }

    wtr.flush()?;
    Ok(num_lines)
}

/// 一時ファイル上の単語リスト
///
/// ドロップされるとファイルは削除されます。
pub struct WordList {
    file: NamedTempFile,
    num_tokens: usize,
}

impl WordList {
    /// テキストを符号化した単語リストを一時ファイルに作成します。
    pub fn from_text(text: &str) -> Result<Self> {
        let mut file = NamedTempFile::new()?;
        let num_tokens = encode_to(text, file.as_file_mut())?;
        Ok(Self { file, num_tokens })
    }

    /// 一時ファイルのパスを返します。
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// 単語リストの行数を返します。
    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        let mut out = vec![];
        encode_to(text, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            encode("Hello, world!"),
            "Hello\n,\n.space\nworld\n!\n"
        );
    }

    #[test]
    fn test_encode_keeps_word_characters() {
        assert_eq!(encode("don't stop-me"), "don't\n.space\nstop-me\n");
    }

    #[test]
    fn test_encode_consecutive_separators() {
        assert_eq!(encode("a  b?!"), "a\n.space\n.space\nb\n?\n!\n");
        assert_eq!(encode("x\ty"), "x\n.space\ny\n");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_placeholder_literals() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_literal(p.literal()), Some(p));
            assert_eq!(Placeholder::from_char(p.character()), Some(p));
        }
        assert_eq!(Placeholder::from_literal("_SPACE"), None);
    }

    #[test]
    fn test_word_list_removed_on_drop() {
        let list = WordList::from_text("one two").unwrap();
        let path = list.path().to_path_buf();
        assert_eq!(list.num_tokens(), 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\n.space\ntwo\n");
        drop(list);
        assert!(!path.exists());
    }
}
