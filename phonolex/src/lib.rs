//! # Phonolex
//!
//! Phonolexは、音声合成の前処理として単語を音素列に変換するG2P（書記素→音素変換）の実装です。
//!
//! ## 概要
//!
//! 形式の異なる発音辞書を正規形式に揃え、外部のFSTツールキットでG2Pモデルを学習し、
//! 学習したモデルをテキストに適用します。適用時は辞書の発音が常にモデルの予測より優先され、
//! テキスト中の空白と句読点は元の位置に復元されます。
//!
//! ## 主な機能
//!
//! - **辞書の正規化**: MARY TTS ドイツ語辞書、Combilex、正規形式の読み込みとIPAへの変換
//! - **モデルの学習**: アライメント、N-gram推定、WFST変換の外部コマンド呼び出し
//! - **G2P適用**: 外部デコーダの出力を逐次読み出し、辞書の発音と統合
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use phonolex::lexicon::{Dialect, LexiconIndex, Normalizer};
//!
//! let source = "Abend|' a: - b @ n t\nZug|' ts u: k\n";
//!
//! let mut canonical = vec![];
//! Normalizer::new(Dialect::MaryTtsDe).normalize(source.as_bytes(), &mut canonical)?;
//! assert_eq!(String::from_utf8(canonical.clone())?, "abend\ta b ə n t\nzug\tts u k\n");
//!
//! let index = LexiconIndex::from_reader(canonical.as_slice())?;
//! assert_eq!(index.preferred("Zug").unwrap().to_string(), "ts u k");
//! # Ok(())
//! # }
//! ```

/// G2P学習パイプラインの設定
pub mod config;

/// 外部デコーダの呼び出し
pub mod decoder;

/// エラー型の定義
pub mod errors;

/// 辞書優先のG2P変換
pub mod g2p;

/// 発音辞書の正規化と読み込み
pub mod lexicon;

/// 単語リストへの符号化
pub mod placeholder;

/// モデル学習の外部コマンド呼び出し
pub mod trainer;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(all(test, unix))]
mod test_utils;
#[cfg(test)]
mod tests;

// Re-exports
pub use config::G2pConfig;
pub use decoder::{Decoder, DecoderOptions};
pub use g2p::{apply_g2p, load_g2p, train_g2p, G2pModel};
pub use lexicon::{Dialect, LexiconIndex, Normalizer};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
