use std::collections::BTreeSet;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use corpus_scan::{Aggregator, ScanConfig, rank_viable};
use corpus_types::{FilterRules, PosTag};
use ordlista_cli::{exclusions, output};
use wordlist_curator::{Curator, TerminalPrompter};

const DEFAULT_CORPUS: &str = "stats_suc.txt";
const DEFAULT_CANDIDATES_OUT: &str = "candidates.tsv";
const DEFAULT_WORDLIST_OUT: &str = "wordlist.txt";
const DEFAULT_POS_WHITELIST: &str = "JJ,NN,RG,VB";
const DEFAULT_MIN_LENGTH: usize = 3;
const DEFAULT_MAX_LENGTH: usize = 8;
const DEFAULT_VIABLE_TARGET: usize = 4096;
const DEFAULT_FINAL_TARGET: usize = 2048;

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    info!("corpus: {}", config.corpus_path.display());
    info!(
        "length window {}-{}, whitelist {:?}",
        config.rules.min_length, config.rules.max_length, config.rules.whitelist
    );
    info!(
        viable_target = config.viable_target,
        final_target = config.final_target,
        "targets"
    );

    let excluded = exclusions::load_exclusions(&config.exclude_paths)?;

    let file = File::open(&config.corpus_path)
        .with_context(|| format!("open corpus {}", config.corpus_path.display()))?;
    let start = Instant::now();
    let report = Aggregator::new(ScanConfig {
        rules: config.rules.clone(),
        viable_target: config.viable_target,
    })
    .scan(BufReader::new(file))
    .context("corpus aggregation failed")?;
    info!(
        lines = report.lines_read,
        skipped = report.lines_skipped,
        base_forms = report.store.len(),
        viable = report.viable_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "corpus scan finished"
    );

    let ranked = rank_viable(&report.store, &config.rules);
    output::write_candidates(&config.candidates_path, &ranked)?;
    info!(
        candidates = ranked.len(),
        path = %config.candidates_path.display(),
        "wrote ranked candidate dump"
    );

    let curator = Curator::new(config.rules.clone(), config.final_target, excluded);
    let chosen = curator.curate(&ranked, &mut TerminalPrompter)?;

    output::write_wordlist(&config.wordlist_path, &chosen)?;
    info!(
        words = chosen.len(),
        path = %config.wordlist_path.display(),
        "wrote final wordlist"
    );
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    corpus_path: PathBuf,
    rules: FilterRules,
    viable_target: usize,
    final_target: usize,
    exclude_paths: Vec<PathBuf>,
    candidates_path: PathBuf,
    wordlist_path: PathBuf,
}

fn load_config() -> Result<Config> {
    let mut corpus: Option<PathBuf> = None;
    let mut min_length: Option<String> = None;
    let mut max_length: Option<String> = None;
    let mut whitelist: Option<String> = None;
    let mut viable_target: Option<String> = None;
    let mut final_target: Option<String> = None;
    let mut exclude_paths: Vec<PathBuf> = Vec::new();
    let mut candidates_out: Option<PathBuf> = None;
    let mut wordlist_out: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        let mut value = |name: &str| -> Result<String> {
            match inline.clone().or_else(|| args.next()) {
                Some(v) => Ok(v),
                None => bail!("{name} needs a value"),
            }
        };
        match flag.as_str() {
            "--corpus" => corpus = Some(PathBuf::from(value("--corpus")?)),
            "--min-len" => min_length = Some(value("--min-len")?),
            "--max-len" => max_length = Some(value("--max-len")?),
            "--pos" => whitelist = Some(value("--pos")?),
            "--viable-target" => viable_target = Some(value("--viable-target")?),
            "--final-target" => final_target = Some(value("--final-target")?),
            "--exclude" => exclude_paths.push(PathBuf::from(value("--exclude")?)),
            "--candidates-out" => candidates_out = Some(PathBuf::from(value("--candidates-out")?)),
            "--wordlist-out" => wordlist_out = Some(PathBuf::from(value("--wordlist-out")?)),
            other => bail!("unknown option {other}"),
        }
    }

    let corpus_path = corpus
        .or_else(|| env::var("CORPUS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS));
    let min_length = parse_count(
        min_length.or_else(|| env::var("MIN_WORD_LENGTH").ok()),
        DEFAULT_MIN_LENGTH,
        "minimum word length",
    )?;
    let max_length = parse_count(
        max_length.or_else(|| env::var("MAX_WORD_LENGTH").ok()),
        DEFAULT_MAX_LENGTH,
        "maximum word length",
    )?;
    if min_length == 0 || min_length > max_length {
        bail!("length window {min_length}-{max_length} is empty");
    }
    let whitelist = parse_whitelist(
        whitelist
            .or_else(|| env::var("POS_WHITELIST").ok())
            .as_deref()
            .unwrap_or(DEFAULT_POS_WHITELIST),
    )?;
    let viable_target = parse_count(
        viable_target.or_else(|| env::var("VIABLE_TARGET").ok()),
        DEFAULT_VIABLE_TARGET,
        "viable candidate target",
    )?;
    let final_target = parse_count(
        final_target.or_else(|| env::var("FINAL_TARGET").ok()),
        DEFAULT_FINAL_TARGET,
        "final wordlist target",
    )?;
    if exclude_paths.is_empty() {
        if let Ok(raw) = env::var("EXCLUDE_LISTS") {
            exclude_paths = raw
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
    }
    let candidates_path = candidates_out
        .or_else(|| env::var("CANDIDATES_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CANDIDATES_OUT));
    let wordlist_path = wordlist_out
        .or_else(|| env::var("WORDLIST_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDLIST_OUT));

    Ok(Config {
        corpus_path,
        rules: FilterRules::new(min_length, max_length, whitelist),
        viable_target,
        final_target,
        exclude_paths,
        candidates_path,
        wordlist_path,
    })
}

fn parse_count(raw: Option<String>, default: usize, what: &str) -> Result<usize> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{what} {raw:?} is not a number")),
        None => Ok(default),
    }
}

fn parse_whitelist(raw: &str) -> Result<BTreeSet<PosTag>> {
    let mut tags = BTreeSet::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        match PosTag::from_code(code) {
            Some(tag) => {
                tags.insert(tag);
            }
            None => bail!("unknown part-of-speech code {code:?} in whitelist"),
        }
    }
    if tags.is_empty() {
        bail!("part-of-speech whitelist is empty");
    }
    Ok(tags)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
