//! Phonolexのテストモジュール群
//!
//! 辞書の正規化、G2P適用、モデル学習の各パイプラインを
//! 通しで検証するテストを含みます。

mod normalize;


#[cfg(unix)]
mod trainer;
