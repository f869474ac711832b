//! Combilex 表層辞書のパーサ
//!
//! 1行がコロン区切りの21フィールドからなるレコードです。フィールドは位置で
//! 検証され、見出し語と発音以外は読み捨てられます。

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{PhonolexError, Result};
use crate::lexicon::RawEntry;

const NAME: &str = "combilex";

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<hw>[^:]+):
        (?P<sense>[0-9]+):
        (?P<pos>[A-Z$/|]*):
        (?P<variant>[^:]*):
        (?P<pron>[^:]+):
        (?P<table>[a-z/]+):
        (?P<word_id>[0-9-]+):
        (?P<strength>[sw]?):
        (?P<pron_id>[0-9-]*):
        (?P<ref_id>[^:]*):
        (?P<derivation>[^:]*):
        (?P<lang>[a-z/]*):
        (?P<semantics>[^:]*):
        (?P<domain>[^:]*):
        (?P<fname>[y]?):
        (?P<fname_gender>[m/f]*):
        (?P<sname>[y]?):
        (?P<sname_gender>[m/f]*):
        (?P<country>(?:[A-Z][A-Z]/?)*):
        (?P<place_region>[^:]*):
        (?P<place_type>[^:]*)$",
    )
    .unwrap()
});

/// 発音フィールドから音素以外を取り除く置換規則。順番に適用されます。
static STRIP_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?: [0+]_[^ ]+)|_[^ ]+|[<{>}]", ""),
        (r",", " "),
        (r" # ", " "),
        (r" \. ", " "),
        (r#" ?["%] "#, " "),
        // The rhoticity marker is always redundant with a following /r/.
        (r"`", ""),
        (r"0", ""),
        (r" +", " "),
    ]
    .into_iter()
    .map(|(pattern, rep)| (Regex::new(pattern).unwrap(), rep))
    .collect()
});

/// 検証済みのレコードのうち利用するフィールド
#[derive(Debug, PartialEq, Eq)]
struct Record<'a> {
    headword: &'a str,
    pron: &'a str,
}

impl<'a> Record<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = RECORD.captures(line)?;
        Some(Self {
            headword: caps.name("hw")?.as_str(),
            pron: caps.name("pron")?.as_str(),
        })
    }
}

/// 発音文字列から音素以外の記号を取り除きます。
pub(crate) fn strip_pronunciation(pron: &str) -> String {
    let mut pron = pron.to_string();
    for (re, rep) in STRIP_RULES.iter() {
        pron = re.replace_all(&pron, *rep).into_owned();
    }
    pron.trim().to_string()
}

pub(crate) fn parse_line(line: &str, lineno: usize) -> Result<Option<RawEntry>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let record = Record::parse(line).ok_or_else(|| {
        PhonolexError::invalid_format(
            NAME,
            lineno,
            format!("not a 21-field Combilex record: {line:?}"),
        )
    })?;

    let word = record.headword.to_lowercase();
    // Multi-word entries are also listed word by word.
    if word.contains(' ') {
        return Ok(None);
    }

    let pronunciation = strip_pronunciation(record.pron);
    if pronunciation.is_empty() {
        return Err(PhonolexError::invalid_format(
            NAME,
            lineno,
            format!("empty pronunciation for {word:?}"),
        ));
    }

    Ok(Some(RawEntry {
        word,
        pronunciation,
    }))
}
