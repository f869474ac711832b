//! デコーダの標準出力を読み出すイテレータ

use std::io::{BufRead, BufReader, ErrorKind};
use std::process::ChildStdout;

use crate::decoder::process::DecoderProcess;
use crate::decoder::DecoderTriple;
use crate::errors::Result;
use crate::placeholder::Placeholder;

/// デコーダの出力を1行ずつ三つ組として返すイテレータ
///
/// 出力全体をメモリに溜めることはありません。形の崩れた行やUTF-8として不正な行は
/// 警告を出して読み飛ばされるか、句読点のプレースホルダであれば `(w, w, w)` に補われます。
/// 出力の終端でプロセスの終了を待ち、時間切れで強制終了されていた場合は
/// 最後にエラーを1回返します。
pub struct DecoderOutput {
    reader: BufReader<ChildStdout>,
    buf: Vec<u8>,
    process: DecoderProcess,
    done: bool,
}

impl DecoderOutput {
    pub(crate) fn new(process: DecoderProcess, stdout: ChildStdout) -> Self {
        Self {
            reader: BufReader::new(stdout),
            buf: vec![],
            process,
            done: false,
        }
    }
}

impl Iterator for DecoderOutput {
    type Item = Result<DecoderTriple>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    if let Err(e) = self.process.finish() {
                        return Some(Err(e));
                    }
                }
                Ok(_) => match std::str::from_utf8(&self.buf) {
                    Ok(line) => {
                        if let Some(triple) = parse_line(line) {
                            return Some(Ok(triple));
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "Skipped a decoder line that is not valid UTF-8: {e}: {:?}",
                            String::from_utf8_lossy(&self.buf)
                        );
                    }
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    self.process.kill();
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

/// デコーダの出力1行を三つ組にします。
///
/// 三つのフィールドに分けられない行は、先頭のフィールドがプレースホルダであれば
/// `(w, w, w)` に補い、そうでなければ警告を出して `None` を返します。
pub(crate) fn parse_line(line: &str) -> Option<DecoderTriple> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split('\t').collect();
    if let [word, score, pronunciation] = fields[..] {
        return Some(DecoderTriple::new(word, score, pronunciation));
    }
    let word = fields[0];
    if Placeholder::from_literal(word).is_some() {
        return Some(DecoderTriple::new(word, word, word));
    }
    log::warn!("No pronunciation for word: {word:?}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("world\t-2.1\tw ɝ l d"),
            Some(DecoderTriple::new("world", "-2.1", "w ɝ l d"))
        );
        assert_eq!(
            parse_line("hmm\t13.2\t\r\n"),
            Some(DecoderTriple::new("hmm", "13.2", ""))
        );
    }

    #[test]
    fn test_parse_line_placeholder() {
        assert_eq!(parse_line(","), Some(DecoderTriple::new(",", ",", ",")));
        assert_eq!(
            parse_line(".space\t"),
            Some(DecoderTriple::new(".space", ".space", ".space"))
        );
    }

    #[test]
    fn test_parse_line_malformed() {
        assert_eq!(parse_line("zzz"), None);
        assert_eq!(parse_line("zzz\t1.0\ta\tb"), None);
        assert_eq!(parse_line(""), None);
    }
}
