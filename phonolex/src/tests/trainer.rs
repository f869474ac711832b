//! モデル学習の通しテスト
//!
//! 3つの外部コマンドを、引数を記録して出力ファイルを作るだけの
//! シェルスクリプトで置き換えます。

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::errors::PhonolexError;
use crate::test_utils::fake_program;
use crate::trainer::{Trainer, TrainerConfig};

/// `--ofile=` または `-wl` の次の引数に書かれたパスへファイルを作るスクリプト
const WRITE_OUTPUT: &str = r#"echo "$0 $*" >> "$(dirname "$0")/calls.txt"
prev=""
for arg in "$@"; do
  case "$arg" in
    --ofile=*) : > "${arg#--ofile=}" ;;
  esac
  if [ "$prev" = "-wl" ]; then : > "$arg"; fi
  prev="$arg"
done"#;

fn config(bin: &Path) -> TrainerConfig {
    TrainerConfig::new()
        .seq2_del(true)
        .align_program(fake_program(bin, "align", WRITE_OUTPUT).to_string_lossy())
        .ngram_program(fake_program(bin, "ngram", WRITE_OUTPUT).to_string_lossy())
        .arpa2wfst_program(fake_program(bin, "arpa2wfst", WRITE_OUTPUT).to_string_lossy())
}

#[test]
fn test_train() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let lexicon = work.path().join("en.lex");
    fs::write(&lexicon, "hello\th ə l oʊ\n").unwrap();
    let out_dir = work.path().join("g2p");

    let trainer = Trainer::new(config(bin.path())).unwrap();
    let model = trainer.train(&lexicon, "en", &out_dir).unwrap();
    assert_eq!(model, out_dir.join("en.fst"));
    assert!(model.is_file());
    assert!(out_dir.join("en.corpus").is_file());
    assert!(out_dir.join("en.o8.arpa").is_file());

    let calls = fs::read_to_string(bin.path().join("calls.txt")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].contains("--seq2_del=true"));
    assert!(calls[0].contains(&format!("--input={}", lexicon.display())));
    assert!(calls[1].contains("-o 8 -t"));
    assert!(calls[2].contains(&format!("--ofile={}", model.display())));
}

#[test]
fn test_failing_step() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let lexicon = work.path().join("en.lex");
    fs::write(&lexicon, "hello\th ə l oʊ\n").unwrap();

    let ngram = fake_program(bin.path(), "ngram-broken", "exit 1");
    let config = config(bin.path()).ngram_program(ngram.to_string_lossy());
    let trainer = Trainer::new(config).unwrap();
    let result = trainer.train(&lexicon, "en", work.path());
    assert!(matches!(
        result,
        Err(PhonolexError::ExternalCommand { ref program, .. }) if program.ends_with("ngram-broken")
    ));
}

#[test]
fn test_missing_model_after_training() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let lexicon = work.path().join("en.lex");
    fs::write(&lexicon, "hello\th ə l oʊ\n").unwrap();

    let noop = fake_program(bin.path(), "noop", "exit 0");
    let config = config(bin.path()).arpa2wfst_program(noop.to_string_lossy());
    let trainer = Trainer::new(config).unwrap();
    let result = trainer.train(&lexicon, "en", work.path());
    assert!(matches!(result, Err(PhonolexError::InvalidState(_))));
}

#[test]
fn test_missing_lexicon() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let trainer = Trainer::new(config(bin.path())).unwrap();
    let result = trainer.train(work.path().join("none.lex"), "en", work.path());
    assert!(matches!(result, Err(PhonolexError::InputNotFound(_))));
    assert!(!bin.path().join("calls.txt").exists());
}
