//! Phonolex G2Pコンパイラのメインエントリーポイント
//!
//! このモジュールは、G2Pモデルを構築するためのサブコマンドを提供します。
//! 発音辞書の正規化、モデルの学習、設定ファイルからの一括構築など、
//! モデル構築に関する全ての操作を統合したCLIツールです。

mod full_build;
mod normalize;
mod train;

use clap::Parser;
use thiserror::Error;

use crate::{full_build::FullBuildError, normalize::NormalizeError, train::TrainError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
///
/// 各サブコマンドはモデル構築プロセスの異なるフェーズに対応します。
#[derive(Parser, Debug)]
enum Command {
    /// 設定ファイルからモデルをワンステップで構築します
    ///
    /// 辞書の正規化と学習を一度に実行し、すべての中間ファイルと最終的なモデルを生成します。
    FullBuild(full_build::Args),

    /// 正規形式の辞書からモデルを学習します
    ///
    /// 外部のFSTツールキットでアライメント、N-gram推定、WFST変換を行います。
    Train(train::Args),

    /// 発音辞書を正規形式に変換します
    ///
    /// 方言ごとの辞書をパースし、音素をIPAに揃えた `単語<TAB>音素列` の辞書を出力します。
    Normalize(normalize::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 一括構築中のエラー
    #[error(transparent)]
    FullBuildError(#[from] FullBuildError),
    /// モデル学習中のエラー
    #[error(transparent)]
    TrainError(#[from] TrainError),
    /// 辞書の正規化中のエラー
    #[error(transparent)]
    NormalizeError(#[from] NormalizeError),
}

/// メイン関数
///
/// ログの出力先を設定し、コマンドライン引数をパースして指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::FullBuild(args) => Ok(full_build::run(args)?),
        Command::Train(args) => Ok(train::run(args)?),
        Command::Normalize(args) => Ok(normalize::run(args)?),
    }
}
