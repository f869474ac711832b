//! エラー型の定義
//!
//! このモジュールは、Phonolexライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Phonolex専用のResult型
///
/// エラー型としてデフォルトで[`PhonolexError`]を使用します。
pub type Result<T, E = PhonolexError> = std::result::Result<T, E>;

/// Phonolexのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
/// 辞書の正規化や設定に関するエラーは処理全体を中断させます。
/// デコーダ出力の行単位の異常はエラーにならず、アダプタ内で警告として処理されます。
#[derive(Debug, thiserror::Error)]
pub enum PhonolexError {
    /// 無効な引数エラー
    ///
    /// 未知の方言名など、設定段階で検出される誤りです。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// 辞書の行が方言の期待する構造にパースできない場合に発生します。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 音素マップに存在しない記号
    #[error("UnknownPhonemeError: {dialect}: line {line}: no IPA mapping for symbol {symbol:?}")]
    UnknownPhoneme {
        /// 方言名
        dialect: &'static str,
        /// マップに存在しなかった記号
        symbol: String,
        /// 1始まりの行番号
        line: usize,
    },

    /// 外部コマンドが実行パス上に見つからない
    ///
    /// デコーダに限らず、学習に使う `phonetisaurus-align` などのコマンドが
    /// 見つからない場合にもこのエラーを返します。
    #[error("Command '{0}' not found in PATH.")]
    DecoderNotFound(String),

    /// 入力ファイルが存在しない、または通常のファイルではない
    #[error("Input file not found: '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// デコーダが制限時間内に終了しなかった
    #[error("The decoder did not finish within {0:?} and was killed.")]
    DecoderTimeout(Duration),

    /// 外部コマンドが失敗した
    #[error("Command '{program}' failed: {status}")]
    ExternalCommand {
        /// 実行したプログラム名
        program: String,
        /// 終了ステータス
        status: ExitStatus,
    },

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// JSONパースエラー
    ///
    /// [`serde_json::Error`]のエラーバリアント。
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PhonolexError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `line` - 1始まりの行番号
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            line,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// 音素マップのエラーを生成します
    pub(crate) fn unknown_phoneme<S>(dialect: &'static str, symbol: S, line: usize) -> Self
    where
        S: Into<String>,
    {
        Self::UnknownPhoneme {
            dialect,
            symbol: symbol.into(),
            line,
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// 1始まりの行番号
    pub(crate) line: usize,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl InvalidFormatError {
    /// エラーが発生した行番号を返します。
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InvalidFormatError: {}: line {}: {}",
            self.arg, self.line, self.msg
        )
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}
