//! 外部G2Pデコーダの呼び出し
//!
//! デコーダは単語リストのファイルを受け取り、1単語ごとに
//! `word<TAB>score<TAB>pronunciation` の行を標準出力に書き出します。
//! このモジュールはデコーダを1回起動し、その出力を逐次読み出すイテレータを提供します。

mod options;
mod output;
mod process;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{PhonolexError, Result};
use crate::utils;

pub use crate::decoder::options::{DecoderOptions, DEFAULT_DECODER};
pub use crate::decoder::output::DecoderOutput;
use crate::decoder::process::DecoderProcess;

/// デコーダが出力する1行分の結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderTriple {
    /// 入力の単語
    pub word: String,
    /// スコア（負の対数確率、または確率）
    pub score: String,
    /// 空白区切りの発音。空の場合があります。
    pub pronunciation: String,
}

impl DecoderTriple {
    /// 三つ組を作成します。
    pub fn new<W, S, P>(word: W, score: S, pronunciation: P) -> Self
    where
        W: Into<String>,
        S: Into<String>,
        P: Into<String>,
    {
        Self {
            word: word.into(),
            score: score.into(),
            pronunciation: pronunciation.into(),
        }
    }

    /// スコアを数値として返します。数値でない場合は `None` です。
    pub fn score_value(&self) -> Option<f64> {
        self.score.trim().parse().ok()
    }
}

/// 外部デコーダ
///
/// 生成時にプログラムの存在を確認するため、存在しないデコーダで
/// 単語リストを処理しようとすることはありません。
#[derive(Clone, Debug)]
pub struct Decoder {
    program: PathBuf,
    model: PathBuf,
    options: DecoderOptions,
}

impl Decoder {
    /// デコーダを作成します。
    ///
    /// # 引数
    ///
    /// * `model` - 学習済みモデルのパス
    /// * `options` - 実行オプション
    ///
    /// # エラー
    ///
    /// デコーダのプログラムが見つからない場合は [`PhonolexError::DecoderNotFound`]、
    /// モデルファイルが存在しない場合は [`PhonolexError::InputNotFound`] を返します。
    pub fn new<P>(model: P, options: DecoderOptions) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let program = utils::which(&options.program)
            .ok_or_else(|| PhonolexError::DecoderNotFound(options.program.clone()))?;
        let model = model.as_ref();
        if !model.is_file() {
            return Err(PhonolexError::InputNotFound(model.to_path_buf()));
        }
        Ok(Self {
            program,
            model: model.to_path_buf(),
            options,
        })
    }

    /// 実行するプログラムのパスを返します。
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// モデルのパスを返します。
    pub fn model(&self) -> &Path {
        &self.model
    }

    /// 実行オプションを返します。
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// デコーダに渡す引数を返します。
    pub fn args(&self, word_list: &Path) -> Vec<String> {
        let opts = &self.options;
        vec![
            format!("--model={}", self.model.display()),
            format!("--nbest={}", opts.nbest),
            format!("--beam={}", opts.beam),
            format!("--thresh={}", opts.thresh),
            format!("--accumulate={}", opts.accumulate),
            format!("--pmass={}", opts.pmass),
            format!("--nlog_probs={}", !opts.probs),
            format!("--wordlist={}", word_list.display()),
        ]
    }

    /// 単語リストに対してデコーダを起動します。
    ///
    /// 出力はイテレータから読み出されるたびに1行ずつパースされます。
    /// イテレータを最後まで読まずにドロップした場合、デコーダは強制終了されます。
    ///
    /// # エラー
    ///
    /// 単語リストが通常のファイルでない場合は [`PhonolexError::InputNotFound`] を返します。
    pub fn run<P>(&self, word_list: P) -> Result<DecoderOutput>
    where
        P: AsRef<Path>,
    {
        let word_list = word_list.as_ref();
        if !word_list.is_file() {
            return Err(PhonolexError::InputNotFound(word_list.to_path_buf()));
        }

        let args = self.args(word_list);
        log::debug!("{} {}", self.program.display(), args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if self.options.verbose {
                Stdio::inherit()
            } else {
                Stdio::null()
            });

        let (process, stdout) = DecoderProcess::spawn(
            self.options.program.clone(),
            &mut command,
            self.options.timeout,
        )?;
        Ok(DecoderOutput::new(process, stdout))
    }
}
