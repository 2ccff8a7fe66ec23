use std::collections::HashSet;
use std::fs;
use std::io::BufRead;
use std::io::BufReader;
use std::num::NonZero;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;

use thiserror::Error;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::classify::Classification;
use crate::classify::classify;
use crate::pattern::PatternSet;
use crate::selector::Candidate;

pub const DEFAULT_MAX_CANDIDATES: usize = 1000;

/// Where candidate names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Entries of a single directory; candidate names are bare file names.
    Directory(PathBuf),
    /// An external locator (argv) printing one path per line on stdout.
    Command(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub show_hidden: bool,
    pub show_binary: bool,
    pub show_dirs: bool,
    pub patterns: PatternSet,
    pub max_candidates: NonZero<usize>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            show_binary: false,
            show_dirs: false,
            patterns: PatternSet::default(),
            #[expect(clippy::unwrap_used)]
            max_candidates: NonZero::new(DEFAULT_MAX_CANDIDATES).unwrap(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Sorted by name, no duplicates.
    pub candidates: Vec<Candidate>,
    /// Widest display name in bytes, for layout.
    pub max_name_len: usize,
    /// Set once `max_candidates` entries have been collected.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("locator command is empty")]
    EmptyCommand,
    #[error("failed to run locator `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Lists candidates from `source`, keeping the entries `options` allows.
pub fn enumerate(
    source: &CandidateSource,
    options: &FilterOptions,
) -> Result<Enumeration, EnumerateError> {
    let mut collector = Collector::new(options);
    match source {
        CandidateSource::Directory(dir) => collect_directory(dir, &mut collector),
        CandidateSource::Command(argv) => collect_command(argv, &mut collector)?,
    }
    Ok(collector.finish())
}

fn collect_directory(dir: &Path, collector: &mut Collector<'_>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read directory {}: {err}", dir.display());
            return;
        }
    };
    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(name) = entry.file_name().into_string() else {
            trace!("skipping non UTF-8 entry {:?}", entry.file_name());
            continue;
        };
        if !collector.offer(&entry.path(), name) {
            break;
        }
    }
}

fn collect_command(argv: &[String], collector: &mut Collector<'_>) -> Result<(), EnumerateError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(EnumerateError::EmptyCommand);
    };
    debug!(?argv, "running locator");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| EnumerateError::Spawn {
            program: program.clone(),
            source,
        })?;

    let mut stopped_early = false;
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).split(b'\n') {
            let Ok(mut line) = line else {
                break;
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let Ok(name) = String::from_utf8(line) else {
                continue;
            };
            if !collector.offer(Path::new(&name), name.clone()) {
                stopped_early = true;
                break;
            }
        }
    }
    reap(child, stopped_early);
    Ok(())
}

fn reap(mut child: Child, kill: bool) {
    if kill
        && let Err(err) = child.kill()
    {
        debug!("failed to stop locator: {err}");
    }
    match child.wait() {
        Ok(status) => debug!(?status, "locator exited"),
        Err(err) => debug!("failed to wait for locator: {err}"),
    }
}

struct Collector<'a> {
    options: &'a FilterOptions,
    candidates: Vec<Candidate>,
    seen: HashSet<String>,
    max_name_len: usize,
    truncated: bool,
}

impl<'a> Collector<'a> {
    fn new(options: &'a FilterOptions) -> Self {
        Self {
            options,
            candidates: Vec::new(),
            seen: HashSet::new(),
            max_name_len: 0,
            truncated: false,
        }
    }

    /// Runs the entry through the filters. Returns `false` once the bound is
    /// reached and enumeration should stop.
    fn offer(&mut self, path: &Path, name: String) -> bool {
        let Some(candidate) = self.admit(path, name) else {
            return true;
        };
        if self.seen.contains(&candidate.name) {
            return true;
        }
        self.max_name_len = self.max_name_len.max(candidate.display_len());
        self.seen.insert(candidate.name.clone());
        self.candidates.push(candidate);
        if self.candidates.len() >= self.options.max_candidates.get() {
            self.truncated = true;
            return false;
        }
        true
    }

    fn admit(&self, path: &Path, name: String) -> Option<Candidate> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                trace!("skipping {name}: {err}");
                return None;
            }
        };
        if name == "." || name == ".." {
            return None;
        }
        if !self.options.show_hidden && is_hidden(path) {
            return None;
        }
        let is_dir = metadata.is_dir();
        if is_dir && !self.options.show_dirs {
            return None;
        }
        if !self.options.patterns.accepts(&name) {
            return None;
        }
        if !is_dir && !self.options.show_binary {
            match classify(path) {
                Classification::Text => {}
                classification => {
                    trace!(?classification, "skipping {name}");
                    return None;
                }
            }
        }
        Some(if is_dir {
            Candidate::dir(name)
        } else {
            Candidate::file(name)
        })
    }

    fn finish(self) -> Enumeration {
        let Self {
            mut candidates,
            max_name_len,
            truncated,
            ..
        } = self;
        candidates.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        debug!(count = candidates.len(), truncated, "enumeration finished");
        Enumeration {
            candidates,
            max_name_len,
            truncated,
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
