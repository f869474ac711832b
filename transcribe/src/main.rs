//! G2P変換を実行するユーティリティ
//!
//! このバイナリは、標準入力から1行ずつテキストを読み込み、学習済みモデルと
//! 参照辞書を使って音素列に変換し、指定された出力形式（phonemes、detail）で
//! 結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use phonolex::decoder::{DecoderOptions, DEFAULT_DECODER};
use phonolex::g2p::{self, G2pModel};
use phonolex::{Decoder, LexiconIndex};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Phonemes,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "phonemes" => Ok(Self::Phonemes),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "transcribe", about = "Converts text to phonemes")]
struct Args {
    /// Trained G2P model (FST).
    #[clap(short = 'm', long)]
    model: PathBuf,

    /// Optional reference lexicon in the canonical format. Its entries take priority over the
    /// model.
    #[clap(short = 'l', long)]
    lexicon: Option<PathBuf>,

    /// Output mode. Choices are phonemes and detail.
    #[clap(short = 'O', long, default_value = "phonemes")]
    output_mode: OutputMode,

    /// Maximum number of hypotheses to produce. Overridden if --pmass is set.
    #[clap(short = 'n', long, default_value = "1")]
    nbest: usize,

    /// Search beam.
    #[clap(short = 'b', long, default_value = "10000")]
    beam: usize,

    /// Pruning threshold for n-best.
    #[clap(short = 't', long, default_value = "99.0")]
    thresh: f64,

    /// Uses the G2P model even if a reference lexicon has been provided.
    #[clap(short = 'g', long)]
    greedy: bool,

    /// Accumulates probabilities across unique pronunciations.
    #[clap(short = 'a', long)]
    accumulate: bool,

    /// Selects the maximum number of hypotheses summing to P total mass for a word.
    #[clap(short = 'p', long, default_value = "0.0")]
    pmass: f64,

    /// Prints exp(-val) instead of default -log values.
    #[clap(long)]
    probs: bool,

    /// Decoder program name or path.
    #[clap(long, default_value = DEFAULT_DECODER)]
    decoder: String,

    /// Kills the decoder if a line takes longer than this many seconds.
    #[clap(long)]
    timeout: Option<u64>,

    /// Passes the standard error of the decoder through.
    #[clap(short = 'v', long)]
    verbose: bool,
}

/// メイン関数
///
/// モデルと辞書をロードし、標準入力から読み込んだテキストを音素列に変換して、
/// 指定された形式で結果を標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = DecoderOptions::new()
        .program(args.decoder)
        .nbest(args.nbest)
        .beam(args.beam)
        .thresh(args.thresh)
        .accumulate(args.accumulate)
        .pmass(args.pmass)
        .probs(args.probs)
        .greedy(args.greedy)
        .verbose(args.verbose)
        .timeout(args.timeout.map(Duration::from_secs));
    let decoder = Decoder::new(&args.model, options)?;

    eprintln!("Loading the lexicon...");
    let lexicon = match &args.lexicon {
        Some(path) => LexiconIndex::from_path(path)?,
        None => LexiconIndex::new(),
    };
    let model = G2pModel::new(decoder, lexicon);

    eprintln!("Ready to transcribe");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        match args.output_mode {
            OutputMode::Phonemes => {
                let phonemes = g2p::apply_g2p(&line, &model)?;
                writeln!(&mut out, "{}", phonemes.unwrap_or_default())?;
            }
            OutputMode::Detail => {
                let sequence = model.transcribe(&line)?;
                for group in sequence.groups() {
                    writeln!(&mut out, "{}", group.join(" "))?;
                }
                out.write_all(b"EOS\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
