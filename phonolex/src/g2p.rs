//! 辞書優先のG2P変換
//!
//! テキストを単語リストに符号化してデコーダに渡し、返ってきた結果を
//! 辞書の発音と統合して1本の音素列にします。辞書に載っている単語は常に
//! 辞書の最優先の発音が使われ、デコーダのスコアによる調停は行いません。

use std::fmt;
use std::path::{Path, PathBuf};

use crate::decoder::{Decoder, DecoderOptions, DecoderTriple};
use crate::errors::Result;
use crate::lexicon::LexiconIndex;
use crate::placeholder::{Placeholder, WordList, SPACE_LITERAL};
use crate::trainer::{Trainer, TrainerConfig};

/// 音素を連結する区切り文字
pub const PHONEME_SEPARATOR: char = '|';

/// 統合後の音素グループの列
///
/// 入力の単語またはプレースホルダ1つにつき1グループで、結果が空のトークンは
/// 含まれません。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhonemeSequence {
    groups: Vec<Vec<String>>,
}

impl PhonemeSequence {
    /// 空の列を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    fn push<I, S>(&mut self, phonemes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group: Vec<String> = phonemes
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    /// 音素グループを返します。
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// グループ数を返します。
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// グループがなければ `true` を返します。
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// すべての音素を `|` で連結し、空白のプレースホルダを空白に戻した文字列を返します。
    ///
    /// 両端の区切り文字と空白は取り除かれます。結果が空の場合は `None` です。
    pub fn to_phoneme_string(&self) -> Option<String> {
        let joined = self.to_string().replace(SPACE_LITERAL, " ");
        let line = joined.trim_matches([' ', PHONEME_SEPARATOR]);
        (!line.is_empty()).then(|| line.to_string())
    }
}

impl fmt::Display for PhonemeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut phonemes = self.groups.iter().flatten();
        if let Some(first) = phonemes.next() {
            f.write_str(first)?;
            for p in phonemes {
                write!(f, "{PHONEME_SEPARATOR}{p}")?;
            }
        }
        Ok(())
    }
}

/// デコーダの出力と辞書を統合します。
///
/// 三つ組ごとに次の順で発音を選びます。
///
/// 1. 単語が辞書にあれば、その最優先の発音（`greedy` の場合は使いません）
/// 2. 単語がプレースホルダであれば、プレースホルダそのもの
/// 3. それ以外はデコーダの発音
///
/// # エラー
///
/// 三つ組の列がエラーを返した場合、そのエラーを返します。
pub fn merge<I>(triples: I, lexicon: &LexiconIndex, greedy: bool) -> Result<PhonemeSequence>
where
    I: IntoIterator<Item = Result<DecoderTriple>>,
{
    let mut sequence = PhonemeSequence::new();
    for triple in triples {
        let triple = triple?;
        let preferred = if greedy {
            None
        } else {
            lexicon.preferred(&triple.word)
        };
        if let Some(pron) = preferred {
            sequence.push(pron.phonemes().iter().map(String::as_str));
        } else if Placeholder::from_literal(&triple.word).is_some() {
            sequence.push([triple.word]);
        } else {
            sequence.push(triple.pronunciation.split(' '));
        }
    }
    Ok(sequence)
}

/// 学習済みモデルと参照辞書の組
pub struct G2pModel {
    decoder: Decoder,
    lexicon: LexiconIndex,
}

impl G2pModel {
    /// デコーダと辞書からモデルを作成します。
    pub fn new(decoder: Decoder, lexicon: LexiconIndex) -> Self {
        Self { decoder, lexicon }
    }

    /// デコーダの実行オプションを置き換えます。
    ///
    /// # エラー
    ///
    /// 新しいオプションのデコーダが見つからない場合は
    /// [`PhonolexError::DecoderNotFound`](crate::errors::PhonolexError::DecoderNotFound) を返します。
    pub fn with_options(self, options: DecoderOptions) -> Result<Self> {
        let decoder = Decoder::new(self.decoder.model(), options)?;
        Ok(Self {
            decoder,
            lexicon: self.lexicon,
        })
    }

    /// デコーダを返します。
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// 参照辞書を返します。
    pub fn lexicon(&self) -> &LexiconIndex {
        &self.lexicon
    }

    /// テキストを音素グループの列に変換します。
    ///
    /// 一時的な単語リストはどの経路で戻っても削除されます。
    pub fn transcribe(&self, text: &str) -> Result<PhonemeSequence> {
        let word_list = WordList::from_text(text)?;
        log::debug!("Applying G2P model to {} tokens", word_list.num_tokens());
        let output = self.decoder.run(word_list.path())?;
        merge(output, &self.lexicon, self.decoder.options().is_greedy())
    }
}

/// 辞書からG2Pモデルを学習します。
///
/// # 引数
///
/// * `lexicon_file` - 正規形式の辞書
/// * `model_out` - モデルと中間ファイルの名前の接頭辞
/// * `g2p_dir` - モデルと中間ファイルの出力先
///
/// # 戻り値
///
/// `{g2p_dir}/{model_out}.fst`
///
/// # エラー
///
/// 外部コマンドが見つからない、または失敗した場合にエラーを返します。
pub fn train_g2p<P, Q>(lexicon_file: P, model_out: &str, g2p_dir: Q) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let trainer = Trainer::new(TrainerConfig::new().seq2_del(true))?;
    trainer.train(lexicon_file, model_out, g2p_dir)
}

/// 学習済みモデルを読み込みます。
///
/// # 引数
///
/// * `model` - 学習済みモデルのパス
/// * `lexicon` - 参照辞書のパス（省略可）
///
/// # エラー
///
/// デコーダが見つからない場合、またはモデルや辞書が存在しない場合にエラーを返します。
pub fn load_g2p<P>(model: P, lexicon: Option<&Path>) -> Result<G2pModel>
where
    P: AsRef<Path>,
{
    let decoder = Decoder::new(model, DecoderOptions::default())?;
    let lexicon = match lexicon {
        Some(path) => LexiconIndex::from_path(path)?,
        None => LexiconIndex::new(),
    };
    Ok(G2pModel::new(decoder, lexicon))
}

/// テキストを音素列に変換します。
///
/// # 戻り値
///
/// 音素を `|` で連結し、空白を復元した文字列。音素が1つも得られなかった場合は `None`
pub fn apply_g2p(text: &str, model: &G2pModel) -> Result<Option<String>> {
    Ok(model.transcribe(text)?.to_phoneme_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::PhonolexError;

    fn ok(word: &str, score: &str, pron: &str) -> Result<DecoderTriple> {
        Ok(DecoderTriple::new(word, score, pron))
    }

    fn lexicon(data: &str) -> LexiconIndex {
        LexiconIndex::from_reader(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_merge_scenario() {
        let lexicon = lexicon("hello\th ə l oʊ\n");
        let triples = vec![
            ok("Hello", "-1.0", "h ɛ l oʊ"),
            ok(",", ",", ","),
            ok(".space", ".space", ".space"),
            ok("world", "-2.1", "w ɝ l d"),
            ok("!", "!", "!"),
        ];
        let seq = merge(triples, &lexicon, false).unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.groups()[0], ["h", "ə", "l", "oʊ"]);
        assert_eq!(seq.to_string(), "h|ə|l|oʊ|,|.space|w|ɝ|l|d|!");
        assert_eq!(
            seq.to_phoneme_string().as_deref(),
            Some("h|ə|l|oʊ|,| |w|ɝ|l|d|!")
        );
    }

    #[test]
    fn test_merge_lexicon_priority_ignores_score() {
        let lexicon = lexicon("cat\tk æ t\ncat\tk a t\n");
        let triples = vec![ok("cat", "0.0001", "x y z")];
        let seq = merge(triples, &lexicon, false).unwrap();
        assert_eq!(seq.to_phoneme_string().as_deref(), Some("k|æ|t"));
    }

    #[test]
    fn test_merge_greedy() {
        let lexicon = lexicon("cat\tk æ t\n");
        let triples = vec![ok("cat", "1.5", "k a t")];
        let seq = merge(triples, &lexicon, true).unwrap();
        assert_eq!(seq.to_phoneme_string().as_deref(), Some("k|a|t"));
    }

    #[test]
    fn test_merge_drops_empty_results() {
        let triples = vec![
            ok("a", "1.0", "eɪ"),
            ok("hmm", "9.0", ""),
            ok(".space", ".space", ".space"),
            ok("b", "1.0", "b iː"),
        ];
        let seq = merge(triples, &LexiconIndex::new(), false).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.to_phoneme_string().as_deref(), Some("eɪ| |b|iː"));
    }

    #[test]
    fn test_merge_placeholder_with_pronunciation() {
        let triples = vec![ok("?", "3.0", "k w ɛ s")];
        let seq = merge(triples, &LexiconIndex::new(), false).unwrap();
        assert_eq!(seq.to_phoneme_string().as_deref(), Some("?"));
    }

    #[test]
    fn test_merge_single_space_is_none() {
        let triples = vec![ok(".space", ".space", ".space")];
        let seq = merge(triples, &LexiconIndex::new(), false).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.to_phoneme_string(), None);
    }

    #[test]
    fn test_merge_empty() {
        let seq = merge(vec![], &LexiconIndex::new(), false).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.to_phoneme_string(), None);
    }

    #[test]
    fn test_merge_propagates_error() {
        let triples = vec![
            ok("a", "1.0", "eɪ"),
            Err(PhonolexError::DecoderTimeout(std::time::Duration::from_secs(1))),
        ];
        let result = merge(triples, &LexiconIndex::new(), false);
        assert!(matches!(result, Err(PhonolexError::DecoderTimeout(_))));
    }
}
