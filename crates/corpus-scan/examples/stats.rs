use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use corpus_scan::{Aggregator, ScanConfig, rank_viable};
use corpus_types::FilterRules;

fn main() -> Result<()> {
    let corpus = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p corpus-scan --example stats -- <path-to-corpus> [target]")?;
    let target: usize = env::args()
        .nth(2)
        .map(|raw| raw.parse())
        .transpose()
        .context("target must be an integer")?
        .unwrap_or(1000);

    let rules = FilterRules::default();
    let file = File::open(&corpus).with_context(|| format!("open {}", corpus.display()))?;
    let report = Aggregator::new(ScanConfig {
        rules: rules.clone(),
        viable_target: target,
    })
    .scan(BufReader::new(file))?;

    println!("Corpus: {}", corpus.display());
    println!("Lines read   : {}", report.lines_read);
    println!("Lines skipped: {}", report.lines_skipped);
    println!("Base forms   : {}", report.store.len());
    println!("Viable       : {}", report.viable_count);

    println!("\nTop 20 by total occurrences:");
    for candidate in rank_viable(&report.store, &rules).iter().take(20) {
        println!(
            "{:>10}  {}  {:?}",
            candidate.total_occurrences,
            candidate.base_form(),
            candidate.surface_forms,
        );
    }

    Ok(())
}
