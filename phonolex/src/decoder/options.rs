//! デコーダの実行オプション

use std::time::Duration;

/// 既定のデコーダのプログラム名
pub const DEFAULT_DECODER: &str = "phonetisaurus-g2pfst";

/// デコーダの実行オプション
///
/// `greedy` 以外の値はそのままデコーダの引数として渡されます。
#[derive(Clone, Debug)]
pub struct DecoderOptions {
    pub(crate) program: String,
    pub(crate) nbest: usize,
    pub(crate) beam: usize,
    pub(crate) thresh: f64,
    pub(crate) accumulate: bool,
    pub(crate) pmass: f64,
    pub(crate) probs: bool,
    pub(crate) greedy: bool,
    pub(crate) verbose: bool,
    pub(crate) timeout: Option<Duration>,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_DECODER.to_string(),
            nbest: 1,
            beam: 10000,
            thresh: 99.0,
            accumulate: false,
            pmass: 0.0,
            probs: false,
            greedy: false,
            verbose: false,
            timeout: None,
        }
    }
}

impl DecoderOptions {
    /// 既定値のオプションを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// デコーダのプログラム名またはパスを指定します。
    pub fn program<S>(mut self, program: S) -> Self
    where
        S: Into<String>,
    {
        self.program = program.into();
        self
    }

    /// 単語ごとに出力する仮説の最大数を指定します。
    pub fn nbest(mut self, nbest: usize) -> Self {
        self.nbest = nbest;
        self
    }

    /// 探索のビーム幅を指定します。
    pub fn beam(mut self, beam: usize) -> Self {
        self.beam = beam;
        self
    }

    /// N-bestの枝刈り閾値を指定します。
    pub fn thresh(mut self, thresh: f64) -> Self {
        self.thresh = thresh;
        self
    }

    /// 同じ発音の確率を累積するかどうかを指定します。
    pub fn accumulate(mut self, yes: bool) -> Self {
        self.accumulate = yes;
        self
    }

    /// 合計確率がこの値に達するまで仮説を出力します。`0.0` で無効です。
    pub fn pmass(mut self, pmass: f64) -> Self {
        self.pmass = pmass;
        self
    }

    /// スコアを負の対数確率ではなく確率で出力させます。
    pub fn probs(mut self, yes: bool) -> Self {
        self.probs = yes;
        self
    }

    /// 辞書に載っている単語にもデコーダの発音を使います。
    pub fn greedy(mut self, yes: bool) -> Self {
        self.greedy = yes;
        self
    }

    /// デコーダの標準エラー出力を呼び出し側に流します。
    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    /// デコーダの実行時間の上限を指定します。超過するとプロセスは強制終了されます。
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `greedy` が有効かどうかを返します。
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    /// 実行時間の上限を返します。
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }
}
