//! Shared vocabulary for working with SUC-annotated frequency corpora.
//!
//! The corpus side and the curation side of the tool meet in three types:
//! [`PosTag`] models the coarse part-of-speech codes of the SUC tagset,
//! [`WordCandidate`] accumulates everything observed about one lemma, and
//! [`FilterRules`] carries the explicit length/POS configuration that decides
//! which candidates are worth keeping. Rules are always passed in at
//! construction time; there is no process-wide state.
//!
//! ```rust
//! use corpus_types::{FilterRules, PosTag, WordCandidate};
//!
//! let rules = FilterRules::default();
//! let mut hund = WordCandidate::first_observed("hund", "hund", PosTag::Nn, 500);
//! hund.merge("hund", "Hundar", PosTag::Nn, 300);
//! assert_eq!(hund.total_occurrences, 800);
//! assert!(hund.is_viable(&rules));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// Coarse part-of-speech code from the SUC tagset.
///
/// Only the first dot-separated segment of a corpus annotation is modelled
/// here; the finer morphosyntactic features (`NN.UTR.SIN.IND.NOM`) are not
/// needed to curate a wordlist. Codes outside this set fail to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum PosTag {
    /// Adverb ("inte").
    Ab,
    /// Determiner ("denna").
    Dt,
    /// Interrogative/relative adverb ("när").
    Ha,
    /// Interrogative/relative determiner ("vilken").
    Hd,
    /// Interrogative/relative pronoun ("som").
    Hp,
    /// Interrogative/relative possessive ("vars").
    Hs,
    /// Infinitive marker ("att").
    Ie,
    /// Interjection ("ja").
    In,
    /// Adjective ("glad").
    Jj,
    /// Conjunction ("och").
    Kn,
    /// Noun ("pudding").
    Nn,
    /// Participle ("utsänd").
    Pc,
    /// Particle ("ut").
    Pl,
    /// Proper noun ("Mats").
    Pm,
    /// Pronoun ("hon").
    Pn,
    /// Preposition ("av").
    Pp,
    /// Possessive pronoun ("hennes").
    Ps,
    /// Cardinal number ("tre").
    Rg,
    /// Ordinal number ("tredje").
    Ro,
    /// Subjunction ("att").
    Sn,
    /// Foreign word ("the").
    Uo,
    /// Verb ("kasta").
    Vb,
}

impl PosTag {
    /// Parse a SUC code (case-insensitive) into an enum.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "AB" => Some(PosTag::Ab),
            "DT" => Some(PosTag::Dt),
            "HA" => Some(PosTag::Ha),
            "HD" => Some(PosTag::Hd),
            "HP" => Some(PosTag::Hp),
            "HS" => Some(PosTag::Hs),
            "IE" => Some(PosTag::Ie),
            "IN" => Some(PosTag::In),
            "JJ" => Some(PosTag::Jj),
            "KN" => Some(PosTag::Kn),
            "NN" => Some(PosTag::Nn),
            "PC" => Some(PosTag::Pc),
            "PL" => Some(PosTag::Pl),
            "PM" => Some(PosTag::Pm),
            "PN" => Some(PosTag::Pn),
            "PP" => Some(PosTag::Pp),
            "PS" => Some(PosTag::Ps),
            "RG" => Some(PosTag::Rg),
            "RO" => Some(PosTag::Ro),
            "SN" => Some(PosTag::Sn),
            "UO" => Some(PosTag::Uo),
            "VB" => Some(PosTag::Vb),
            _ => None,
        }
    }

    /// Emit the code as written in corpus annotations.
    pub fn code(self) -> &'static str {
        match self {
            PosTag::Ab => "AB",
            PosTag::Dt => "DT",
            PosTag::Ha => "HA",
            PosTag::Hd => "HD",
            PosTag::Hp => "HP",
            PosTag::Hs => "HS",
            PosTag::Ie => "IE",
            PosTag::In => "IN",
            PosTag::Jj => "JJ",
            PosTag::Kn => "KN",
            PosTag::Nn => "NN",
            PosTag::Pc => "PC",
            PosTag::Pl => "PL",
            PosTag::Pm => "PM",
            PosTag::Pn => "PN",
            PosTag::Pp => "PP",
            PosTag::Ps => "PS",
            PosTag::Rg => "RG",
            PosTag::Ro => "RO",
            PosTag::Sn => "SN",
            PosTag::Uo => "UO",
            PosTag::Vb => "VB",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Length window and POS whitelist deciding which candidates are viable.
///
/// Lengths are counted in characters, not bytes, so "kärl" is four long.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterRules {
    pub min_length: usize,
    pub max_length: usize,
    pub whitelist: BTreeSet<PosTag>,
}

impl FilterRules {
    pub fn new(min_length: usize, max_length: usize, whitelist: BTreeSet<PosTag>) -> Self {
        Self {
            min_length,
            max_length,
            whitelist,
        }
    }

    /// Whether a word's character count falls inside the window (inclusive).
    pub fn length_eligible(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.min_length <= len && len <= self.max_length
    }

    pub fn allows_tag(&self, tag: PosTag) -> bool {
        self.whitelist.contains(&tag)
    }
}

impl Default for FilterRules {
    /// The window and whitelist used for the Swedish mnemonic list:
    /// 3 to 8 characters, adjectives, nouns, cardinal numbers and verbs.
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 8,
            whitelist: BTreeSet::from([PosTag::Jj, PosTag::Nn, PosTag::Rg, PosTag::Vb]),
        }
    }
}

/// One lemma (base form) and everything observed about it across the corpus.
///
/// Created on the first observation of a base form, then merged into on every
/// later observation of the same base form. The base form is the record's
/// identity and never changes; two candidates are equal iff their base forms
/// are equal.
#[derive(Clone, Debug)]
pub struct WordCandidate {
    base_form: String,
    pub pos_tags: BTreeSet<PosTag>,
    pub surface_forms: BTreeSet<String>,
    pub total_occurrences: u64,
}

impl WordCandidate {
    /// Build a candidate from the first observation of a base form.
    ///
    /// The surface form is stored lower-cased; the base form is kept as
    /// annotated.
    pub fn first_observed(base_form: &str, surface: &str, tag: PosTag, occurrences: u64) -> Self {
        Self {
            base_form: base_form.to_string(),
            pos_tags: BTreeSet::from([tag]),
            surface_forms: BTreeSet::from([surface.to_lowercase()]),
            total_occurrences: occurrences,
        }
    }

    pub fn base_form(&self) -> &str {
        &self.base_form
    }

    /// Fold a later observation of the same base form into this record.
    ///
    /// # Panics
    ///
    /// Panics when `base_form` differs from the record's own base form. The
    /// store is keyed by base form, so a mismatch here is an internal logic
    /// error rather than bad input.
    pub fn merge(&mut self, base_form: &str, surface: &str, tag: PosTag, occurrences: u64) {
        assert_eq!(
            self.base_form, base_form,
            "merged observation must share the record's base form"
        );
        self.pos_tags.insert(tag);
        self.surface_forms.insert(surface.to_lowercase());
        self.total_occurrences += occurrences;
    }

    /// Viability: some surface form fits the length window and some observed
    /// tag is whitelisted. Monotonic under accumulation: merging can only
    /// turn a non-viable candidate viable, never the reverse.
    pub fn is_viable(&self, rules: &FilterRules) -> bool {
        self.surface_forms.iter().any(|w| rules.length_eligible(w))
            && self.pos_tags.iter().any(|t| rules.allows_tag(*t))
    }
}

impl PartialEq for WordCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.base_form == other.base_form
    }
}

impl Eq for WordCandidate {}
