//! テスト用ユーティリティ
//!
//! 外部コマンドの代わりに使う小さなシェルスクリプトを作成します。

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// 実行可能なシェルスクリプトを `dir` に作成します。
pub(crate) fn fake_program(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// 単語リストを読み、`responses` に従って1行ずつ結果を出力する偽のデコーダを作成します。
///
/// `responses` は `word<TAB>line` の形式で、`word` に一致した入力行に対して `line` を出力します。
/// 一致しない単語には何も出力しません。スクリプトは受け取った引数を `args.txt` に書き出します。
pub(crate) fn fake_decoder(dir: &Path, responses: &[(&str, &str)]) -> PathBuf {
    let mut body = String::new();
    body.push_str(&format!(
        "printf '%s\\n' \"$@\" > '{}'\n",
        dir.join("args.txt").display()
    ));
    body.push_str("for arg in \"$@\"; do\n  case \"$arg\" in\n    --wordlist=*) list=\"${arg#--wordlist=}\" ;;\n  esac\ndone\n");
    body.push_str("while IFS= read -r word || [ -n \"$word\" ]; do\n  case \"$word\" in\n");
    for (word, line) in responses {
        body.push_str(&format!("    '{word}') printf '%s\\n' '{line}' ;;\n"));
    }
    body.push_str("  esac\ndone < \"$list\"");
    fake_program(dir, "fake-g2pfst", &body)
}

/// 空のモデルファイルを作成します。
pub(crate) fn fake_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.fst");
    fs::write(&path, b"").unwrap();
    path
}
