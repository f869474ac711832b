//! モデル学習モジュール
//!
//! このモジュールは、正規形式の辞書からG2Pモデルを学習する機能を提供します。
//! 学習そのものは外部のFSTツールキットが行い、このコマンドはその呼び出しを
//! 取りまとめます。

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use phonolex::errors::PhonolexError;
use phonolex::trainer::{Trainer, TrainerConfig};

/// 学習コマンドの引数
///
/// モデルを学習するために必要な入力ファイルとアライメントのパラメータを指定します。
#[derive(Parser, Debug)]
#[clap(name = "train", about = "G2P model trainer")]
pub struct Args {
    /// Canonical lexicon file (word<TAB>phonemes).
    #[clap(short = 'l', long)]
    lexicon_in: PathBuf,

    /// Prefix for the model and the intermediate files. The model is written to
    /// <OUT_DIR>/<MODEL_PREFIX>.fst.
    #[clap(short = 'p', long, default_value = "model")]
    model_prefix: String,

    /// Directory to which the model and the intermediate files are output.
    #[clap(short = 'o', long)]
    out_dir: PathBuf,

    #[clap(flatten)]
    params: TrainingParams,
}

/// アライメントとN-gram推定のパラメータ
#[derive(Parser, Debug, Clone)]
pub struct TrainingParams {
    /// Maximum number of graphemes in an alignment unit.
    #[clap(long, default_value = "2")]
    pub seq1_max: usize,

    /// Maximum number of phonemes in an alignment unit.
    #[clap(long, default_value = "2")]
    pub seq2_max: usize,

    /// Allows deletions on the grapheme side.
    #[clap(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub seq1_del: bool,

    /// Allows deletions on the phoneme side.
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub seq2_del: bool,

    /// Grows the maximum alignment length when an entry cannot be aligned.
    #[clap(long)]
    pub grow: bool,

    /// Order of the joint n-gram model.
    #[clap(long, default_value = "8")]
    pub ngram_order: usize,

    /// Passes the output of the external commands through.
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl TrainingParams {
    fn to_config(&self) -> TrainerConfig {
        TrainerConfig::new()
            .seq1_max(self.seq1_max)
            .seq2_max(self.seq2_max)
            .seq1_del(self.seq1_del)
            .seq2_del(self.seq2_del)
            .grow(self.grow)
            .ngram_order(self.ngram_order)
            .verbose(self.verbose)
    }
}

/// 学習処理中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum TrainError {
    /// 学習処理エラー
    #[error("Training process failed: {0}")]
    Phonolex(#[from] PhonolexError),
}

/// 学習コマンドを実行する
///
/// # エラー
///
/// 外部コマンドが見つからない、または失敗した場合、`TrainError`を返します。
pub fn run(args: Args) -> Result<(), TrainError> {
    println!("Starting model training...");
    let model = train_model(&args.lexicon_in, &args.model_prefix, &args.out_dir, &args.params)?;
    println!("Successfully trained the model: {}", model.display());
    Ok(())
}

/// 指定されたパラメータでモデルを学習する
///
/// CLIに依存しないコアの学習ロジックです。
///
/// # 戻り値
///
/// 学習したモデルのパス
pub fn train_model(
    lexicon: &Path,
    model_prefix: &str,
    out_dir: &Path,
    params: &TrainingParams,
) -> Result<PathBuf, TrainError> {
    let trainer = Trainer::new(params.to_config())?;
    Ok(trainer.train(lexicon, model_prefix, out_dir)?)
}
