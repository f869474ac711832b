//! 辞書の正規化に関するテスト

use hashbrown::HashSet;

use crate::errors::PhonolexError;
use crate::lexicon::{Dialect, LexiconIndex, Normalizer};

fn combilex_record(headword: &str, pron: &str) -> String {
    format!("{headword}:1:NN::{pron}:lex:1234{}", ":".repeat(14))
}

fn normalize(dialect: Dialect, data: &str) -> String {
    let mut out = vec![];
    Normalizer::new(dialect)
        .normalize(data.as_bytes(), &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_only_mapped_symbols_are_written() {
    let marytts = "Abend|' a: - b @ n t\nZug|' ts u: k\nBuch|' b u: x\nEis|' aI s\n";
    let combilex = [
        combilex_record("Abbey", "{ \" a . b i }"),
        combilex_record("thing", "{ \" T I N }"),
        combilex_record("joy", "{ \" dZ OI }"),
    ]
    .join("\n");

    for (dialect, data) in [
        (Dialect::MaryTtsDe, marytts.to_string()),
        (Dialect::Combilex, combilex),
    ] {
        let map = dialect.phoneme_map();
        let targets: HashSet<&str> = map.targets().collect();
        let out = normalize(dialect, &data);
        assert!(!out.is_empty());
        for line in out.lines() {
            let (_, pron) = line.split_once('\t').unwrap();
            for phoneme in pron.split(' ') {
                assert!(
                    targets.contains(phoneme),
                    "{dialect}: {phoneme:?} is not an IPA target"
                );
            }
        }
    }
}

#[test]
fn test_canonical_is_a_fixed_point() {
    let source = [
        combilex_record("Abbey", "{ \" a . b i }"),
        combilex_record("thing", "{ \" T I N }"),
        combilex_record("Abbey", "{ \" a . b I }"),
    ]
    .join("\n");
    let canonical = normalize(Dialect::Combilex, &source);
    let again = normalize(Dialect::Canonical, &canonical);
    assert_eq!(canonical, again);
}

#[test]
fn test_multi_word_headword_is_skipped() {
    let source = [
        combilex_record("new york", "{ n j u . \" j O k }"),
        combilex_record("York", "{ \" j O k }"),
    ]
    .join("\n");
    assert_eq!(normalize(Dialect::Combilex, &source), "york\tj ɔ k\n");
}

#[test]
fn test_truncated_record_is_an_error() {
    let line = "Abbey:1:NN::{ \" a . b i }:lex:1234:::";
    let result = Normalizer::new(Dialect::Combilex).normalize(line.as_bytes(), vec![]);
    assert!(matches!(result, Err(PhonolexError::InvalidFormat(ref e)) if e.line() == 1));
}

#[test]
fn test_normalized_lexicon_loads_into_index() {
    let source = "Lesen|' l e: - z @ n\nlesen|' l E - z @ n\nZug|' ts u: k\n";
    let canonical = normalize(Dialect::MaryTtsDe, source);
    let index = LexiconIndex::from_reader(canonical.as_bytes()).unwrap();
    assert_eq!(index.len(), 2);
    let prons: Vec<String> = index
        .get("Lesen")
        .unwrap()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(prons, ["l e z ə n", "l ɛ z ə n"]);
}
