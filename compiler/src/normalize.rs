//! 発音辞書の正規化モジュール
//!
//! このモジュールは、方言ごとに形式の異なる発音辞書を読み込み、
//! 正規形式 (`単語<TAB>音素 音素 ...`) の辞書ファイルに変換する機能を提供します。

use std::path::PathBuf;

use clap::Parser;

use phonolex::errors::PhonolexError;
use phonolex::lexicon::{Dialect, Normalizer};

/// 正規化コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "normalize",
    about = "A program to convert a pronunciation dictionary into the canonical lexicon format."
)]
pub struct Args {
    /// Dialect of the input dictionary. Choices are marytts_de, combilex, and canonical.
    #[clap(short = 'd', long)]
    dialect: Dialect,

    /// Input pronunciation dictionary.
    #[clap(short = 'i', long)]
    lexicon_in: PathBuf,

    /// File to which the canonical lexicon is output.
    #[clap(short = 'o', long)]
    lexicon_out: PathBuf,
}

/// 正規化処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 辞書の読み込みエラー
    #[error("Normalization failed: {0}")]
    Phonolex(#[from] PhonolexError),
}

/// 正規化コマンドを実行する
///
/// # エラー
///
/// 辞書の行が方言の形式にパースできない場合や、音素マップにない記号が
/// 含まれる場合、`NormalizeError`を返します。
pub fn run(args: Args) -> Result<(), NormalizeError> {
    if let Some(parent) = args.lexicon_out.parent() {
        if !parent.as_os_str().is_empty() {
            log::debug!("Creating the output directory {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }

    println!(
        "Normalizing the {} dictionary {}...",
        args.dialect,
        args.lexicon_in.display()
    );
    let num_entries =
        Normalizer::new(args.dialect).normalize_file(&args.lexicon_in, &args.lexicon_out)?;

    println!(
        "Successfully wrote {num_entries} entries to {}",
        args.lexicon_out.display()
    );
    Ok(())
}
