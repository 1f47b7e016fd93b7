//! Walk a ranked candidate list and let a human pick the final wordlist.
//!
//! The curator is deliberately decoupled from any particular terminal: all
//! answers come through the [`Prompter`] you supply, so tests drive it with a
//! scripted answer feed and the binary plugs in stdin/stdout.
//!
//! # How it works
//! 1. Visit candidates in rank order until the target count is reached.
//! 2. Per candidate, keep the surface forms that fit the length window, are
//!    not on the exclusion list, and do not collide with an already-chosen
//!    word under the truncation rule (see [`truncation_key`]).
//! 3. No surviving form: move on silently. One form: a yes/no prompt.
//!    Several forms: a yes/no prompt, then an indexed pick.
//! 4. Invalid answers are re-prompted locally and never escape as errors.
//!
//! # Example
//! ```rust
//! use corpus_types::{FilterRules, PosTag, WordCandidate};
//! use wordlist_curator::{CurateError, Curator, Prompter};
//!
//! struct AlwaysYes;
//! impl Prompter for AlwaysYes {
//!     fn ask(&mut self, _prompt: &str) -> Result<String, CurateError> {
//!         Ok("y".to_string())
//!     }
//! }
//!
//! # fn main() -> Result<(), CurateError> {
//! let hund = WordCandidate::first_observed("hund", "hund", PosTag::Nn, 800);
//! let curator = Curator::new(FilterRules::default(), 1, Default::default());
//! let chosen = curator.curate(&[&hund], &mut AlwaysYes)?;
//! assert_eq!(chosen, vec!["hund".to_string()]);
//! # Ok(()) }
//! ```

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use corpus_types::{FilterRules, WordCandidate};
use thiserror::Error;
use tracing::{debug, warn};

/// How many trailing characters the duplicate-suppression rule ignores.
pub const TRUNCATED_SUFFIX: usize = 4;

#[derive(Debug, Error)]
pub enum CurateError {
    #[error("answer source closed before curation finished")]
    AnswersClosed,
    #[error("failed to read an answer")]
    Io(#[from] io::Error),
}

/// Source of human answers. One call shows a prompt and blocks for one raw
/// answer line; validation and re-prompting happen in the curator.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String, CurateError>;
}

/// Prompter backed by the process's stdin and stdout.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, CurateError> {
        let mut out = io::stdout().lock();
        write!(out, "{prompt} ")?;
        out.flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(CurateError::AnswersClosed);
        }
        Ok(answer)
    }
}

/// Ask a yes/no question, re-prompting until the answer parses.
/// Accepts `y`/`yes`/`n`/`no`, case-insensitively.
pub fn ask_yes_no<P: Prompter>(prompter: &mut P, question: &str) -> Result<bool, CurateError> {
    loop {
        let answer = prompter.ask(question)?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}

/// Ask for an index in `0..len`, re-prompting on parse failures and
/// out-of-range answers.
pub fn ask_index<P: Prompter>(
    prompter: &mut P,
    question: &str,
    len: usize,
) -> Result<usize, CurateError> {
    loop {
        let answer = prompter.ask(question)?;
        match answer.trim().parse::<usize>() {
            Ok(index) if index < len => return Ok(index),
            _ => continue,
        }
    }
}

/// Key under which a word competes for uniqueness: the word minus its last
/// four characters. Words too short to keep a non-empty stem compete under
/// their full spelling instead (exact-match dedup). Counted in characters,
/// not bytes.
///
/// Crude on purpose: "katten"/"kattens" style suffix variants collapse
/// without any morphological analysis.
pub fn truncation_key(word: &str) -> String {
    let stem_len = word.chars().count().saturating_sub(TRUNCATED_SUFFIX);
    if stem_len == 0 {
        word.to_string()
    } else {
        word.chars().take(stem_len).collect()
    }
}

/// Interactive selection of a fixed-size final list from ranked candidates.
pub struct Curator {
    rules: FilterRules,
    final_target: usize,
    excluded: HashSet<String>,
}

impl Curator {
    /// `excluded` holds lower-cased words that must never be offered, e.g.
    /// words already used by other languages' mnemonic lists.
    pub fn new(rules: FilterRules, final_target: usize, excluded: HashSet<String>) -> Self {
        Self {
            rules,
            final_target,
            excluded,
        }
    }

    /// Walk `ranked` and build the final list, in chosen order.
    ///
    /// Runs until the target is reached or the candidates are exhausted;
    /// exhaustion short of the target is reported as a warning and the
    /// partial list is returned.
    pub fn curate<P: Prompter>(
        &self,
        ranked: &[&WordCandidate],
        prompter: &mut P,
    ) -> Result<Vec<String>, CurateError> {
        let mut chosen: Vec<String> = Vec::new();
        let mut taken_keys: HashSet<String> = HashSet::new();

        for candidate in ranked {
            if chosen.len() >= self.final_target {
                break;
            }

            let forms = self.eligible_forms(candidate, &taken_keys);
            let picked = match forms.len() {
                0 => continue,
                1 => {
                    let word = &forms[0];
                    let question = format!(
                        "include '{word}' ({} occurrences)? [y/n]",
                        candidate.total_occurrences
                    );
                    ask_yes_no(prompter, &question)?.then(|| word.clone())
                }
                _ => {
                    let question = format!(
                        "'{}' has {} usable forms, include one of them? [y/n]",
                        candidate.base_form(),
                        forms.len()
                    );
                    if ask_yes_no(prompter, &question)? {
                        let mut listing = String::new();
                        for (index, form) in forms.iter().enumerate() {
                            listing.push_str(&format!("  [{index}] {form}\n"));
                        }
                        let question = format!("{listing}pick a form [0-{}]:", forms.len() - 1);
                        let index = ask_index(prompter, &question, forms.len())?;
                        Some(forms[index].clone())
                    } else {
                        None
                    }
                }
            };

            if let Some(word) = picked {
                taken_keys.insert(truncation_key(&word));
                chosen.push(word);
            }
        }

        if chosen.len() < self.final_target {
            warn!(
                chosen = chosen.len(),
                target = self.final_target,
                "candidates exhausted before the final target was reached"
            );
        }
        Ok(chosen)
    }

    /// Surface forms of one candidate that are still worth offering, in
    /// deterministic (alphabetical) order.
    fn eligible_forms(&self, candidate: &WordCandidate, taken_keys: &HashSet<String>) -> Vec<String> {
        candidate
            .surface_forms
            .iter()
            .filter(|form| self.rules.length_eligible(form))
            .filter(|form| {
                if self.excluded.contains(form.as_str()) {
                    debug!(word = form.as_str(), "dropped excluded word");
                    return false;
                }
                true
            })
            .filter(|form| !taken_keys.contains(&truncation_key(form)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_types::PosTag;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }

    fn scripted(answers: &[&'static str]) -> Scripted {
        Scripted {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }

    impl Prompter for Scripted {
        fn ask(&mut self, prompt: &str) -> Result<String, CurateError> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or(CurateError::AnswersClosed)
        }
    }

    fn noun(base: &str, forms: &[(&str, u64)]) -> WordCandidate {
        let (first, rest) = forms.split_first().expect("at least one form");
        let mut candidate = WordCandidate::first_observed(base, first.0, PosTag::Nn, first.1);
        for (surface, count) in rest {
            candidate.merge(base, surface, PosTag::Nn, *count);
        }
        candidate
    }

    fn curator(target: usize) -> Curator {
        Curator::new(FilterRules::default(), target, HashSet::new())
    }

    #[test]
    fn truncation_drops_the_last_four_characters() {
        assert_eq!(truncation_key("katten"), "ka");
        assert_eq!(truncation_key("jägaren"), "jäg");
        assert_eq!(truncation_key("vålnader"), "våln");
    }

    #[test]
    fn short_words_keep_their_full_spelling_as_key() {
        assert_eq!(truncation_key("tre"), "tre");
        assert_eq!(truncation_key("hund"), "hund");
        assert_eq!(truncation_key(""), "");
    }

    #[test]
    fn yes_no_reprompts_until_parseable() {
        let mut prompter = scripted(&["kanske", "", "YES"]);
        assert!(ask_yes_no(&mut prompter, "?").unwrap());
        assert_eq!(prompter.asked.len(), 3);

        let mut prompter = scripted(&["N"]);
        assert!(!ask_yes_no(&mut prompter, "?").unwrap());
    }

    #[test]
    fn index_reprompts_on_garbage_and_out_of_range() {
        let mut prompter = scripted(&["sju", "12", "-1", "1"]);
        assert_eq!(ask_index(&mut prompter, "?", 3).unwrap(), 1);
        assert_eq!(prompter.asked.len(), 4);
    }

    #[test]
    fn single_form_is_a_plain_accept_or_reject() {
        let hund = noun("hund", &[("hund", 800)]);
        let mut prompter = scripted(&["y"]);
        let chosen = curator(1).curate(&[&hund], &mut prompter).unwrap();
        assert_eq!(chosen, vec!["hund".to_string()]);

        let mut prompter = scripted(&["no"]);
        let chosen = curator(1).curate(&[&hund], &mut prompter).unwrap();
        assert!(chosen.is_empty());
    }

    #[test]
    fn several_forms_are_picked_by_index() {
        let katt = noun("katt", &[("katten", 500), ("kattorna", 300)]);
        let mut prompter = scripted(&["y", "1"]);
        let chosen = curator(1).curate(&[&katt], &mut prompter).unwrap();
        // Forms are offered alphabetically: [0] katten, [1] kattorna.
        assert_eq!(chosen, vec!["kattorna".to_string()]);
    }

    #[test]
    fn declining_the_form_list_chooses_nothing() {
        let katt = noun("katt", &[("katten", 500), ("kattorna", 300)]);
        let mut prompter = scripted(&["n"]);
        let chosen = curator(1).curate(&[&katt], &mut prompter).unwrap();
        assert!(chosen.is_empty());
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn shared_truncated_prefix_is_suppressed_without_a_prompt() {
        // katten and kalvar both truncate to "ka".
        let katt = noun("katt", &[("katten", 500)]);
        let kalv = noun("kalv", &[("kalvar", 400)]);
        let stig = noun("stig", &[("stigen", 300)]);

        let mut prompter = scripted(&["y", "y"]);
        let chosen = curator(2)
            .curate(&[&katt, &kalv, &stig], &mut prompter)
            .unwrap();
        assert_eq!(chosen, vec!["katten".to_string(), "stigen".to_string()]);
        // kalvar was dropped silently; only two questions were ever asked.
        assert_eq!(prompter.asked.len(), 2);
    }

    #[test]
    fn short_words_collide_only_on_exact_repeats() {
        let tre = noun("tre", &[("tre", 900)]);
        let trea = noun("trea", &[("tre", 100)]);
        let lund = noun("lund", &[("lund", 50)]);

        let mut prompter = scripted(&["y", "y"]);
        let chosen = curator(3)
            .curate(&[&tre, &trea, &lund], &mut prompter)
            .unwrap();
        // The second "tre" is an exact repeat; "lund" keys as itself.
        assert_eq!(chosen, vec!["tre".to_string(), "lund".to_string()]);
        assert_eq!(prompter.asked.len(), 2);
    }

    #[test]
    fn excluded_words_are_never_offered() {
        let hund = noun("hund", &[("hund", 800)]);
        let katt = noun("katt", &[("katten", 500)]);
        let excluded = HashSet::from(["hund".to_string()]);

        let mut prompter = scripted(&["y"]);
        let curator = Curator::new(FilterRules::default(), 1, excluded);
        let chosen = curator.curate(&[&hund, &katt], &mut prompter).unwrap();
        assert_eq!(chosen, vec!["katten".to_string()]);
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn forms_outside_the_length_window_are_not_offered() {
        let lang = noun("långdistanslöpning", &[("långdistanslöpningarna", 70)]);
        let stig = noun("stig", &[("stigen", 300)]);

        let mut prompter = scripted(&["y"]);
        let chosen = curator(1).curate(&[&lang, &stig], &mut prompter).unwrap();
        assert_eq!(chosen, vec!["stigen".to_string()]);
    }

    #[test]
    fn stops_once_the_target_is_reached() {
        let hund = noun("hund", &[("hunden", 800)]);
        let stig = noun("stig", &[("stigen", 300)]);

        let mut prompter = scripted(&["y", "y"]);
        let chosen = curator(1).curate(&[&hund, &stig], &mut prompter).unwrap();
        assert_eq!(chosen, vec!["hunden".to_string()]);
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn exhausted_candidates_return_a_partial_list() {
        let hund = noun("hund", &[("hunden", 800)]);
        let mut prompter = scripted(&["y"]);
        let chosen = curator(5).curate(&[&hund], &mut prompter).unwrap();
        assert_eq!(chosen.len(), 1);
    }

    #[test]
    fn a_closed_answer_source_is_an_error() {
        let hund = noun("hund", &[("hunden", 800)]);
        let mut prompter = scripted(&[]);
        let err = curator(1).curate(&[&hund], &mut prompter).unwrap_err();
        assert!(matches!(err, CurateError::AnswersClosed));
    }
}
