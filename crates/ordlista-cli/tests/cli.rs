use std::fs;

use corpus_types::{PosTag, WordCandidate};
use ordlista_cli::{exclusions, output};

#[test]
fn exclusion_lists_are_lowercased_and_unioned() {
    let dir = tempfile::tempdir().unwrap();
    let english = dir.path().join("english.txt");
    let french = dir.path().join("french.txt");
    fs::write(&english, "Abandon\nability\n\nable\n").unwrap();
    fs::write(&french, "abandon\nabeille\n").unwrap();

    let excluded = exclusions::load_exclusions(&[&english, &french]).unwrap();
    assert_eq!(excluded.len(), 4);
    assert!(excluded.contains("abandon"));
    assert!(excluded.contains("abeille"));
    assert!(!excluded.contains("Abandon"));
}

#[test]
fn missing_exclusion_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.txt");
    let err = exclusions::load_exclusions(&[&missing]).unwrap_err();
    assert!(err.to_string().contains("nowhere.txt"));
}

#[test]
fn candidate_dump_is_tab_separated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candidates.tsv");

    let mut hund = WordCandidate::first_observed("hund", "hund", PosTag::Nn, 500);
    hund.merge("hund", "hundar", PosTag::Nn, 300);
    let tre = WordCandidate::first_observed("tre", "tre", PosTag::Rg, 42);

    output::write_candidates(&path, &[&hund, &tre]).unwrap();
    let dump = fs::read_to_string(&path).unwrap();
    assert_eq!(
        dump,
        "hund\t{NN}\t{hund,hundar}\ntre\t{RG}\t{tre}\n"
    );
}

#[test]
fn wordlist_is_one_word_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordlist.txt");

    let words = vec!["hund".to_string(), "katten".to_string(), "tre".to_string()];
    output::write_wordlist(&path, &words).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "hund\nkatten\ntre\n"
    );
}
