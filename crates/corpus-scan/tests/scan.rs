use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use corpus_scan::{Aggregator, ScanConfig, ScanError, rank_viable};
use corpus_types::FilterRules;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("stats_suc.txt")
}

fn scan_fixture(viable_target: usize) -> Result<corpus_scan::ScanReport, ScanError> {
    let file = File::open(fixture_path()).expect("open fixture corpus");
    Aggregator::new(ScanConfig {
        rules: FilterRules::default(),
        viable_target,
    })
    .scan(BufReader::new(file))
}

#[test]
fn stops_early_once_the_target_is_reached() {
    let report = scan_fixture(5).expect("five viable candidates exist");

    // "kasta" on line 13 is the fifth viable candidate; the two lines after
    // it must never have been read.
    assert_eq!(report.viable_count, 5);
    assert_eq!(report.lines_read, 13);
    assert!(report.store.get("aldrig").is_none());
    assert!(report.store.get("katt").is_none());

    // The punctuation line and the numeric token are skipped, not fatal.
    assert_eq!(report.lines_skipped, 2);
}

#[test]
fn groups_inflections_and_ranks_by_total_occurrences() {
    let report = scan_fixture(5).expect("five viable candidates exist");
    let rules = FilterRules::default();

    // "är" and "vara" share the base form vara; the candidate only becomes
    // viable (and length-eligible) through the longer form.
    let vara = report.store.get("vara").expect("vara aggregated");
    assert_eq!(vara.total_occurrences, 35_990 + 22_011);

    let hund = report.store.get("hund").expect("hund aggregated");
    assert_eq!(hund.total_occurrences, 800);

    let ranked = rank_viable(&report.store, &rules);
    let order: Vec<&str> = ranked.iter().map(|c| c.base_form()).collect();
    assert_eq!(order, vec!["vara", "stor", "tre", "kasta", "hund"]);
}

#[test]
fn non_whitelisted_lemmas_never_count_as_viable() {
    let report = scan_fixture(5).expect("five viable candidates exist");
    let rules = FilterRules::default();

    // Stored, but conjunctions and pronouns stay outside the viable set.
    let och = report.store.get("och").expect("och stored");
    assert!(!och.is_viable(&rules));
    assert!(rank_viable(&report.store, &rules).len() < report.store.len());
}

#[test]
fn asking_for_more_than_the_corpus_holds_fails() {
    let err = scan_fixture(50).expect_err("fixture has nowhere near 50 viable lemmas");
    match err {
        ScanError::InsufficientCandidates { found, required } => {
            assert_eq!(required, 50);
            assert!(found < 50);
        }
        other => panic!("unexpected error: {other}"),
    }
}
