use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;

mod classify;
mod cli;
mod config;
mod enumerate;
mod pattern;
mod presenter;
mod selector;
mod tokenize;

pub use classify::CLASSIFY_PREFIX_BYTES;
pub use classify::Classification;
pub use classify::classify;
pub use classify::classify_bytes;
pub use cli::Cli;
pub use config::Config;
pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use config::ConfigToml;
pub use config::load_config_toml;
pub use enumerate::CandidateSource;
pub use enumerate::DEFAULT_MAX_CANDIDATES;
pub use enumerate::EnumerateError;
pub use enumerate::Enumeration;
pub use enumerate::FilterOptions;
pub use enumerate::enumerate;
pub use pattern::PatternError;
pub use pattern::PatternSet;
pub use presenter::Presenter;
pub use presenter::Prompt;
pub use presenter::StdinPrompt;
pub use presenter::TerminalPresenter;
pub use presenter::prompt_for;
pub use presenter::render_list;
pub use selector::Candidate;
pub use selector::Selector;
pub use tokenize::TokenizeError;
pub use tokenize::rtrim_spaces;
pub use tokenize::tokenize;

/// What the caller should do once the selection is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Run `argv[0]` with the remaining arguments, without a shell.
    Exec(Vec<String>),
    /// Nothing to run; exit successfully.
    Abort,
}

/// Resolves configuration from the command line, `config.toml` and the
/// environment, then runs one selection in the current directory (or from the
/// `--source` command).
pub fn run_main<P: Presenter, Q: Prompt>(
    cli: Cli,
    presenter: &P,
    prompt: &mut Q,
) -> anyhow::Result<Launch> {
    let config = Config::load(cli.config_overrides())?;
    debug!(?config, "resolved configuration");

    let source = match cli.source.as_deref() {
        Some(command) => {
            let argv = shlex::split(command)
                .with_context(|| format!("cannot parse --source command {command:?}"))?;
            CandidateSource::Command(argv)
        }
        None => CandidateSource::Directory(PathBuf::from(".")),
    };

    let (patterns, errors) =
        PatternSet::compile(&cli.patterns, cli.invert, config.case_insensitive);
    for err in &errors {
        presenter.warn_invalid_pattern(err);
    }

    let options = FilterOptions {
        show_hidden: config.show_hidden,
        show_binary: config.show_binary,
        show_dirs: config.show_dirs,
        patterns,
        max_candidates: config.max_candidates,
    };
    select(&source, &options, &config.default_command, presenter, prompt)
}

/// Enumerates `source`, asks the operator to choose when there is more than
/// one candidate, and turns the answer into an argument vector.
pub fn select<P: Presenter, Q: Prompt>(
    source: &CandidateSource,
    options: &FilterOptions,
    default_command: &str,
    presenter: &P,
    prompt: &mut Q,
) -> anyhow::Result<Launch> {
    let Enumeration {
        candidates,
        max_name_len,
        truncated,
    } = enumerate(source, options)?;
    let selector = Selector::new(candidates);
    info!(count = selector.len(), truncated, "candidates ready");

    if selector.is_empty() {
        presenter.warn_no_candidates();
        return Ok(Launch::Abort);
    }
    if let Some(argv) = selector.single_match_argv(default_command) {
        return Ok(Launch::Exec(argv));
    }

    presenter.present(&selector, max_name_len);
    if truncated {
        presenter.warn_candidates_truncated(options.max_candidates.get());
    }

    let Some(line) = prompt
        .read_line(&prompt_for(&selector))
        .context("failed to read selection")?
    else {
        return Ok(Launch::Abort);
    };

    match tokenize(&line, &selector, default_command) {
        Ok(argv) => Ok(Launch::Exec(argv)),
        Err(TokenizeError::Empty) => Ok(Launch::Abort),
        Err(err @ (TokenizeError::DanglingBang | TokenizeError::NulByte)) => {
            presenter.warn_rejected_input(&err);
            Ok(Launch::Abort)
        }
    }
}
