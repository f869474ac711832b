//! G2Pモデルの学習
//!
//! 学習そのものは外部のFSTツールキットが行います。このモジュールは
//! 次の3つのコマンドを順に呼び出し、`{output_dir}/{model_prefix}.fst` に
//! モデルを出力させます。
//!
//! 1. `phonetisaurus-align` による書記素と音素のアライメント
//! 2. `estimate-ngram` による結合N-gramモデルの推定
//! 3. `phonetisaurus-arpa2wfst` によるARPA形式からWFSTへの変換

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{PhonolexError, Result};
use crate::utils;

/// アライメントのプログラム名
pub const ALIGN_PROGRAM: &str = "phonetisaurus-align";
/// N-gram推定のプログラム名
pub const NGRAM_PROGRAM: &str = "estimate-ngram";
/// WFST変換のプログラム名
pub const ARPA2WFST_PROGRAM: &str = "phonetisaurus-arpa2wfst";

/// 学習の設定
#[derive(Clone, Debug)]
pub struct TrainerConfig {
    seq1_max: usize,
    seq2_max: usize,
    seq1_del: bool,
    seq2_del: bool,
    grow: bool,
    ngram_order: usize,
    verbose: bool,
    align_program: String,
    ngram_program: String,
    arpa2wfst_program: String,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            seq1_max: 2,
            seq2_max: 2,
            seq1_del: false,
            seq2_del: false,
            grow: false,
            ngram_order: 8,
            verbose: false,
            align_program: ALIGN_PROGRAM.to_string(),
            ngram_program: NGRAM_PROGRAM.to_string(),
            arpa2wfst_program: ARPA2WFST_PROGRAM.to_string(),
        }
    }
}

impl TrainerConfig {
    /// 既定値の設定を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 1つのアライメント単位に含める書記素の最大数を指定します。
    pub fn seq1_max(mut self, n: usize) -> Self {
        self.seq1_max = n;
        self
    }

    /// 1つのアライメント単位に含める音素の最大数を指定します。
    pub fn seq2_max(mut self, n: usize) -> Self {
        self.seq2_max = n;
        self
    }

    /// 書記素側の削除を許可するかどうかを指定します。
    pub fn seq1_del(mut self, yes: bool) -> Self {
        self.seq1_del = yes;
        self
    }

    /// 音素側の削除を許可するかどうかを指定します。
    pub fn seq2_del(mut self, yes: bool) -> Self {
        self.seq2_del = yes;
        self
    }

    /// アライメントの最大長を必要に応じて伸ばすかどうかを指定します。
    pub fn grow(mut self, yes: bool) -> Self {
        self.grow = yes;
        self
    }

    /// N-gramの次数を指定します。
    pub fn ngram_order(mut self, order: usize) -> Self {
        self.ngram_order = order;
        self
    }

    /// 外部コマンドの出力を呼び出し側に流します。
    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    /// アライメントのプログラム名またはパスを指定します。
    pub fn align_program<S: Into<String>>(mut self, program: S) -> Self {
        self.align_program = program.into();
        self
    }

    /// N-gram推定のプログラム名またはパスを指定します。
    pub fn ngram_program<S: Into<String>>(mut self, program: S) -> Self {
        self.ngram_program = program.into();
        self
    }

    /// WFST変換のプログラム名またはパスを指定します。
    pub fn arpa2wfst_program<S: Into<String>>(mut self, program: S) -> Self {
        self.arpa2wfst_program = program.into();
        self
    }
}

/// 外部コマンドによるモデル学習器
pub struct Trainer {
    config: TrainerConfig,
    align: PathBuf,
    ngram: PathBuf,
    arpa2wfst: PathBuf,
}

impl Trainer {
    /// 学習器を作成します。
    ///
    /// # エラー
    ///
    /// いずれかのコマンドが見つからない場合は、そのコマンド名を持つ
    /// [`PhonolexError::DecoderNotFound`] を返します。
    pub fn new(config: TrainerConfig) -> Result<Self> {
        let resolve = |program: &str| {
            utils::which(program).ok_or_else(|| PhonolexError::DecoderNotFound(program.to_string()))
        };
        let align = resolve(&config.align_program)?;
        let ngram = resolve(&config.ngram_program)?;
        let arpa2wfst = resolve(&config.arpa2wfst_program)?;
        Ok(Self {
            config,
            align,
            ngram,
            arpa2wfst,
        })
    }

    /// 学習の設定を返します。
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// モデルを学習します。
    ///
    /// # 引数
    ///
    /// * `lexicon` - 正規形式の辞書
    /// * `model_prefix` - モデルと中間ファイルの名前の接頭辞
    /// * `output_dir` - 出力先のディレクトリ。存在しない場合は作成されます。
    ///
    /// # 戻り値
    ///
    /// 学習したモデルのパス
    ///
    /// # エラー
    ///
    /// 辞書が存在しない場合は [`PhonolexError::InputNotFound`]、
    /// コマンドが失敗した場合は [`PhonolexError::ExternalCommand`] を返します。
    pub fn train<P, Q>(&self, lexicon: P, model_prefix: &str, output_dir: Q) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let lexicon = lexicon.as_ref();
        if !lexicon.is_file() {
            return Err(PhonolexError::InputNotFound(lexicon.to_path_buf()));
        }
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let corpus = output_dir.join(format!("{model_prefix}.corpus"));
        let arpa = output_dir.join(format!(
            "{model_prefix}.o{}.arpa",
            self.config.ngram_order
        ));
        let model = output_dir.join(format!("{model_prefix}.fst"));

        log::info!("Aligning lexicon {}", lexicon.display());
        self.execute(
            &self.config.align_program,
            &self.align,
            &self.align_args(lexicon, &corpus),
        )?;

        log::info!("Training joint n-gram model");
        self.execute(
            &self.config.ngram_program,
            &self.ngram,
            &self.ngram_args(&corpus, &arpa),
        )?;

        log::info!("Converting ARPA model to WFST");
        self.execute(
            &self.config.arpa2wfst_program,
            &self.arpa2wfst,
            &self.arpa2wfst_args(&arpa, &model),
        )?;

        if !model.is_file() {
            return Err(PhonolexError::invalid_state(
                "The trained model was not created",
                model.display().to_string(),
            ));
        }
        Ok(model)
    }

    fn align_args(&self, lexicon: &Path, corpus: &Path) -> Vec<String> {
        let c = &self.config;
        vec![
            format!("--input={}", lexicon.display()),
            format!("--ofile={}", corpus.display()),
            format!("--seq1_del={}", c.seq1_del),
            format!("--seq2_del={}", c.seq2_del),
            format!("--seq1_max={}", c.seq1_max),
            format!("--seq2_max={}", c.seq2_max),
            format!("--grow={}", c.grow),
        ]
    }

    fn ngram_args(&self, corpus: &Path, arpa: &Path) -> Vec<String> {
        vec![
            "-o".to_string(),
            self.config.ngram_order.to_string(),
            "-t".to_string(),
            corpus.display().to_string(),
            "-wl".to_string(),
            arpa.display().to_string(),
        ]
    }

    fn arpa2wfst_args(&self, arpa: &Path, model: &Path) -> Vec<String> {
        vec![
            format!("--lm={}", arpa.display()),
            format!("--ofile={}", model.display()),
        ]
    }

    fn execute(&self, name: &str, program: &Path, args: &[String]) -> Result<()> {
        log::debug!("{} {}", program.display(), args.join(" "));
        let (stdout, stderr) = if self.config.verbose {
            (Stdio::inherit(), Stdio::inherit())
        } else {
            (Stdio::null(), Stdio::null())
        };
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()?;
        if !status.success() {
            return Err(PhonolexError::ExternalCommand {
                program: name.to_string(),
                status,
            });
        }
        Ok(())
    }
}
