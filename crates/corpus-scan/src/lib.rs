//! Stream a part-of-speech-annotated frequency corpus into ranked lemma
//! candidates.
//!
//! The corpus is plain text, one token record per line, tab-separated:
//! surface word, dot-separated morphosyntactic annotation (first segment is
//! the coarse POS code), pipe-delimited lemma annotations (second segment
//! holds `base..suffix`), an unused column, and the occurrence count.
//!
//! [`decode_line`] turns one raw line into a borrowed [`CorpusLine`];
//! [`CandidateStore`] folds decoded lines into [`WordCandidate`] records
//! keyed by base form; [`Aggregator`] drives both over a line stream and
//! stops as soon as enough viable candidates have been seen, so a
//! multi-million-line corpus is never read further than necessary.
//!
//! # Example
//! ```rust
//! use corpus_scan::{Aggregator, ScanConfig};
//! use corpus_types::FilterRules;
//!
//! let mut agg = Aggregator::new(ScanConfig {
//!     rules: FilterRules::default(),
//!     viable_target: 2,
//! });
//! agg.feed("hund\tNN.UTR.SIN.IND.NOM\t|hund..nn.1|\t-\t500\t1.2");
//! agg.feed("hundar\tNN.UTR.PLU.IND.NOM\t|hund..nn.1|\t-\t300\t0.8");
//!
//! let hund = agg.store().get("hund").unwrap();
//! assert_eq!(hund.total_occurrences, 800);
//! assert_eq!(hund.surface_forms.len(), 2);
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;
use std::io::BufRead;

use corpus_types::{FilterRules, PosTag, WordCandidate};
use thiserror::Error;
use tracing::{debug, info};

/// Minimum number of tab-separated fields a corpus line must carry.
pub const MIN_FIELDS: usize = 5;

/// How many newly viable candidates between progress reports.
const VIABLE_MILESTONE: usize = 500;

/// One decoded corpus line, borrowing from the raw text. Folded into the
/// store immediately and never retained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CorpusLine<'a> {
    pub surface: &'a str,
    pub pos: PosTag,
    pub base_form: &'a str,
    pub occurrences: u64,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("line has only {found} tab-separated fields")]
    MissingFields { found: usize },
    #[error("empty part-of-speech annotation")]
    EmptyPos,
    #[error("unknown part-of-speech code {0:?}")]
    UnknownPos(String),
    #[error("lemma annotation decodes to an empty base form")]
    EmptyBaseForm,
    #[error("invalid occurrence count {raw:?}")]
    BadCount {
        raw: String,
        source: std::num::ParseIntError,
    },
}

/// Decode one raw corpus line.
///
/// Field positions are fixed; a trailing `\r` is tolerated. When the lemma
/// annotation segment is empty the surface word is taken to be its own base
/// form. Callers are expected to reject non-alphabetic surface words
/// themselves (see [`is_alphabetic_word`]); that is a filtering decision,
/// not a decoding failure.
pub fn decode_line(raw: &str) -> Result<CorpusLine<'_>, DecodeError> {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Err(DecodeError::MissingFields {
            found: fields.len(),
        });
    }

    let surface = fields[0];
    let pos_code = fields[1].split('.').next().unwrap_or("");
    if pos_code.is_empty() {
        return Err(DecodeError::EmptyPos);
    }
    let pos = PosTag::from_code(pos_code)
        .ok_or_else(|| DecodeError::UnknownPos(pos_code.to_string()))?;

    let base_form = decode_base_form(fields[2], surface)?;

    let raw_count = fields[4].trim();
    let occurrences: u64 = raw_count.parse().map_err(|source| DecodeError::BadCount {
        raw: raw_count.to_string(),
        source,
    })?;

    Ok(CorpusLine {
        surface,
        pos,
        base_form,
        occurrences,
    })
}

/// The second pipe segment of `|hund..nn.1|` is `hund..nn.1`; the base form
/// is the text before the first `..`. An empty segment means the word is its
/// own lemma.
fn decode_base_form<'a>(annotation: &'a str, surface: &'a str) -> Result<&'a str, DecodeError> {
    let segment = annotation.split('|').nth(1).unwrap_or("");
    if segment.is_empty() {
        return Ok(surface);
    }
    let base = match segment.split_once("..") {
        Some((base, _)) => base,
        None => segment,
    };
    if base.is_empty() {
        return Err(DecodeError::EmptyBaseForm);
    }
    Ok(base)
}

/// Whether a surface word consists purely of alphabetic characters.
/// Numbers and punctuation-bearing tokens never make wordlist material.
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Candidates keyed by base form, remembering first-observation order so
/// ranking ties can be broken stably.
#[derive(Debug, Default)]
pub struct CandidateStore {
    by_base: HashMap<String, usize>,
    candidates: Vec<WordCandidate>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new candidate or merge into the existing one.
    ///
    /// Returns `true` when this observation made the candidate viable for
    /// the first time. Accumulation only grows tag and form sets, so
    /// viability can flip false-to-true at most once per candidate; callers
    /// can keep a running viable count without rescanning the store.
    pub fn add_or_update(&mut self, line: &CorpusLine<'_>, rules: &FilterRules) -> bool {
        match self.by_base.get(line.base_form) {
            Some(&idx) => {
                let candidate = &mut self.candidates[idx];
                let was_viable = candidate.is_viable(rules);
                candidate.merge(line.base_form, line.surface, line.pos, line.occurrences);
                !was_viable && candidate.is_viable(rules)
            }
            None => {
                let candidate = WordCandidate::first_observed(
                    line.base_form,
                    line.surface,
                    line.pos,
                    line.occurrences,
                );
                let viable = candidate.is_viable(rules);
                self.by_base
                    .insert(line.base_form.to_string(), self.candidates.len());
                self.candidates.push(candidate);
                viable
            }
        }
    }

    pub fn get(&self, base_form: &str) -> Option<&WordCandidate> {
        self.by_base
            .get(base_form)
            .map(|&idx| &self.candidates[idx])
    }

    /// Candidates in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = &WordCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Viable candidates sorted by descending total occurrences. The sort is
/// stable, so candidates with equal totals keep their first-observation
/// order.
pub fn rank_viable<'a>(store: &'a CandidateStore, rules: &FilterRules) -> Vec<&'a WordCandidate> {
    let mut viable: Vec<&WordCandidate> = store.iter().filter(|c| c.is_viable(rules)).collect();
    viable.sort_by_key(|c| Reverse(c.total_occurrences));
    viable
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("corpus exhausted with {found} viable candidates, {required} required")]
    InsufficientCandidates { found: usize, required: usize },
    #[error("failed to read corpus line {line}")]
    Io {
        line: u64,
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub rules: FilterRules,
    /// Stop scanning once this many viable candidates exist.
    pub viable_target: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScanState {
    Running,
    Done,
}

/// State machine that folds corpus lines into a [`CandidateStore`] until the
/// viable target is met or input runs out.
///
/// The target comparison is reach-or-exceed: the scan is done as soon as the
/// viable count is `>=` the configured target. Malformed lines and
/// non-alphabetic surface words are skipped and counted, never fatal.
#[derive(Debug)]
pub struct Aggregator {
    config: ScanConfig,
    store: CandidateStore,
    viable_count: usize,
    lines_read: u64,
    lines_skipped: u64,
    state: ScanState,
}

/// What a finished scan hands back to the caller.
#[derive(Debug)]
pub struct ScanReport {
    pub store: CandidateStore,
    pub viable_count: usize,
    pub lines_read: u64,
    pub lines_skipped: u64,
}

impl Aggregator {
    pub fn new(config: ScanConfig) -> Self {
        let state = if config.viable_target == 0 {
            ScanState::Done
        } else {
            ScanState::Running
        };
        Self {
            config,
            store: CandidateStore::new(),
            viable_count: 0,
            lines_read: 0,
            lines_skipped: 0,
            state,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ScanState::Done
    }

    pub fn viable_count(&self) -> usize {
        self.viable_count
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn lines_skipped(&self) -> u64 {
        self.lines_skipped
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Feed one raw line; returns `true` once the viable target is reached.
    ///
    /// Feeding after the scan is done is a no-op.
    pub fn feed(&mut self, raw: &str) -> bool {
        if self.is_done() {
            return true;
        }
        self.lines_read += 1;

        match decode_line(raw) {
            Err(err) => {
                self.lines_skipped += 1;
                debug!(line = self.lines_read, %err, "skipped malformed line");
            }
            Ok(line) if !is_alphabetic_word(line.surface) => {
                self.lines_skipped += 1;
                debug!(line = self.lines_read, word = line.surface, "skipped non-alphabetic token");
            }
            Ok(line) => {
                if self.store.add_or_update(&line, &self.config.rules) {
                    self.viable_count += 1;
                    if self.viable_count % VIABLE_MILESTONE == 0 {
                        info!(
                            viable = self.viable_count,
                            lines = self.lines_read,
                            "aggregation progress"
                        );
                    }
                }
            }
        }

        if self.viable_count >= self.config.viable_target {
            self.state = ScanState::Done;
        }
        self.is_done()
    }

    /// Drive the aggregator over a reader, stopping at the line where the
    /// viable count first reaches the target. No line beyond that one is
    /// pulled from the reader.
    pub fn scan<R: BufRead>(mut self, reader: R) -> Result<ScanReport, ScanError> {
        let mut lines = reader.lines();
        while !self.is_done() {
            let raw = match lines.next() {
                Some(result) => result.map_err(|source| ScanError::Io {
                    line: self.lines_read + 1,
                    source,
                })?,
                None => break,
            };
            self.feed(&raw);
        }
        self.finish()
    }

    /// Close out the run; fails when the corpus ran dry before the target.
    pub fn finish(self) -> Result<ScanReport, ScanError> {
        if self.viable_count < self.config.viable_target {
            return Err(ScanError::InsufficientCandidates {
                found: self.viable_count,
                required: self.config.viable_target,
            });
        }
        info!(
            viable = self.viable_count,
            lines = self.lines_read,
            skipped = self.lines_skipped,
            "aggregation finished"
        );
        Ok(ScanReport {
            store: self.store,
            viable_count: self.viable_count,
            lines_read: self.lines_read,
            lines_skipped: self.lines_skipped,
        })
    }
}
