//! 一括構築モジュール
//!
//! このモジュールは、G2P設定ファイルからモデルを一括構築する機能を提供します。
//! 辞書の正規化とモデルの学習の2つのステップを自動的に実行し、
//! すべての中間ファイルと最終的なモデルを `train_dir` に生成します。

use std::path::PathBuf;

use clap::Parser;

use phonolex::errors::PhonolexError;
use phonolex::G2pConfig;

use crate::train::{self, TrainError, TrainingParams};

/// 一括構築コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "full-build",
    about = "Normalizes a dictionary and trains a G2P model from a JSON configuration"
)]
pub struct Args {
    /// G2P configuration file (JSON with lexicon, lexicon_path, train_dir, and model_prefix).
    #[clap(short = 'c', long, value_name = "CONFIG_PATH")]
    pub config: PathBuf,

    /// File to which the updated configuration is written. Its lexicon_path points to the
    /// canonical lexicon.
    #[clap(long, value_name = "CONFIG_PATH")]
    pub config_out: Option<PathBuf>,

    #[clap(flatten)]
    pub params: TrainingParams,
}

/// 一括構築処理中に発生する可能性のあるエラー
///
/// 正規化と学習の各フェーズで発生したエラーをラップします。
#[derive(Debug, thiserror::Error)]
pub enum FullBuildError {
    /// モデル学習中のエラー
    #[error(transparent)]
    Train(#[from] TrainError),
    /// 入出力エラー
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Phonolexライブラリのエラー
    #[error(transparent)]
    Phonolex(#[from] PhonolexError),
}

/// 一括構築コマンドを実行する
///
/// 以下の2つのステップを順次実行します:
/// 1. 辞書を正規形式に変換
/// 2. 正規形式の辞書からモデルを学習
///
/// # エラー
///
/// 各フェーズの処理やファイルの入出力に失敗した場合、`FullBuildError`を返します。
pub fn run(args: Args) -> Result<(), FullBuildError> {
    let config = G2pConfig::from_path(&args.config)?;

    println!("[1/2] Normalizing the {} lexicon...", config.lexicon);
    let config = config.preprocess_lexicon()?;

    println!("[2/2] Training model...");
    let model = train::train_model(
        &config.lexicon_path,
        &config.model_prefix,
        &config.train_dir,
        &args.params,
    )?;

    if let Some(path) = &args.config_out {
        config.write_to(std::fs::File::create(path)?)?;
        log::info!("Wrote the updated configuration to {}", path.display());
    }

    println!("Successfully built all artifacts: {}", model.display());
    Ok(())
}
