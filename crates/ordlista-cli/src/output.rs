//! Flat-text output writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use corpus_types::WordCandidate;

/// Dump ranked candidates, one per line: base form, tag set, surface forms.
pub fn write_candidates(path: &Path, ranked: &[&WordCandidate]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for candidate in ranked {
        let tags: Vec<&str> = candidate.pos_tags.iter().map(|tag| tag.code()).collect();
        let forms: Vec<&str> = candidate
            .surface_forms
            .iter()
            .map(String::as_str)
            .collect();
        writeln!(
            out,
            "{}\t{{{}}}\t{{{}}}",
            candidate.base_form(),
            tags.join(","),
            forms.join(",")
        )
        .with_context(|| format!("write {}", path.display()))?;
    }
    out.flush().with_context(|| format!("flush {}", path.display()))
}

/// Write the final curated list, one lower-cased word per line.
pub fn write_wordlist(path: &Path, words: &[String]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for word in words {
        writeln!(out, "{word}").with_context(|| format!("write {}", path.display()))?;
    }
    out.flush().with_context(|| format!("flush {}", path.display()))
}
