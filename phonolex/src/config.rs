//! G2P学習パイプラインの設定
//!
//! 設定はJSONで記述します。
//!
//! ```json
//! {
//!     "lexicon": "marytts_de",
//!     "lexicon_path": "data/de.txt",
//!     "train_dir": "g2p",
//!     "model_prefix": "de"
//! }
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PhonolexError, Result};
use crate::lexicon::{Dialect, Normalizer};

/// G2P学習パイプラインの設定
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2pConfig {
    /// 辞書の方言名
    pub lexicon: String,
    /// 辞書ファイルのパス
    pub lexicon_path: PathBuf,
    /// 学習結果の出力先
    pub train_dir: PathBuf,
    /// モデルと中間ファイルの名前の接頭辞
    pub model_prefix: String,
}

impl G2pConfig {
    /// JSONの設定を読み込みます。
    ///
    /// # エラー
    ///
    /// JSONとして不正な場合、またはフィールドが欠けている場合にエラーを返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_json::from_reader(BufReader::new(rdr))?)
    }

    /// JSONの設定ファイルを読み込みます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PhonolexError::InputNotFound(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }

    /// 設定をJSONで書き出します。
    pub fn write_to<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let mut wtr = BufWriter::new(wtr);
        serde_json::to_writer_pretty(&mut wtr, self)?;
        writeln!(wtr)?;
        wtr.flush()?;
        Ok(())
    }

    /// 方言を返します。
    ///
    /// # エラー
    ///
    /// 未知の方言名の場合は [`PhonolexError::InvalidArgument`] を返します。
    pub fn dialect(&self) -> Result<Dialect> {
        self.lexicon.parse()
    }

    /// 正規化後の辞書のパス `{train_dir}/{model_prefix}.lex` を返します。
    pub fn canonical_lexicon_path(&self) -> PathBuf {
        self.train_dir.join(format!("{}.lex", self.model_prefix))
    }

    /// 学習済みモデルのパス `{train_dir}/{model_prefix}.fst` を返します。
    pub fn model_path(&self) -> PathBuf {
        self.train_dir.join(format!("{}.fst", self.model_prefix))
    }

    /// 辞書を正規形式に変換して `train_dir` に書き出します。
    ///
    /// `train_dir` が存在しない場合は作成します。
    ///
    /// # 戻り値
    ///
    /// `lexicon_path` を正規化後の辞書に差し替えた設定
    ///
    /// # エラー
    ///
    /// 方言名が不正な場合や、辞書の行が解釈できない場合にエラーを返します。
    pub fn preprocess_lexicon(&self) -> Result<Self> {
        let normalizer = Normalizer::new(self.dialect()?);
        let lex_out = self.canonical_lexicon_path();
        fs::create_dir_all(&self.train_dir)?;
        let num_entries = normalizer.normalize_file(&self.lexicon_path, &lex_out)?;
        log::info!(
            "Wrote {num_entries} entries to {}",
            lex_out.display()
        );
        Ok(Self {
            lexicon_path: lex_out,
            ..self.clone()
        })
    }
}
