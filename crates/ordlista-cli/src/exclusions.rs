//! Loading of exclusion wordlists.
//!
//! A curated mnemonic word should be unambiguous across languages, so words
//! already present in other languages' lists (Czech, English, French, ...)
//! are excluded from curation. Each list is plain text, one word per line.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read every given wordlist into one lower-cased exclusion set.
///
/// Blank lines are ignored. An empty `paths` slice yields an empty set.
pub fn load_exclusions<P: AsRef<Path>>(paths: &[P]) -> Result<HashSet<String>> {
    let mut excluded = HashSet::new();
    for path in paths {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open exclusion list {}", path.display()))?;
        let mut words = 0usize;
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            excluded.insert(word.to_lowercase());
            words += 1;
        }
        info!(words, path = %path.display(), "loaded exclusion list");
    }
    Ok(excluded)
}
