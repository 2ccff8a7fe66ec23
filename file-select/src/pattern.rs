use regex::Regex;
use regex::RegexBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled name patterns applied by the filtering pipeline.
///
/// A name passes a non-inverted set when it matches every pattern. An
/// inverted set is the exact negation of that: a name passes when at least
/// one pattern does not match it.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
    invert: bool,
}

impl PatternSet {
    /// Compiles every pattern, keeping the ones that compile and returning an
    /// error for each one that does not.
    pub fn compile<S: AsRef<str>>(
        patterns: &[S],
        invert: bool,
        case_insensitive: bool,
    ) -> (Self, Vec<PatternError>) {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut errors = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
            {
                Ok(regex) => compiled.push(regex),
                Err(source) => errors.push(PatternError {
                    pattern: pattern.to_string(),
                    source,
                }),
            }
        }
        (
            Self {
                patterns: compiled,
                invert,
            },
            errors,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// An empty set accepts everything regardless of `invert`.
    pub fn accepts(&self, name: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let all_match = self.patterns.iter().all(|pattern| pattern.is_match(name));
        all_match != self.invert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAMES: &[&str] = &["Makefile", "README", "el.c", "el.h", "main.rs"];

    fn accepted(set: &PatternSet) -> Vec<&'static str> {
        NAMES
            .iter()
            .copied()
            .filter(|name| set.accepts(name))
            .collect()
    }

    #[test]
    fn empty_set_accepts_everything() {
        let (set, errors) = PatternSet::compile::<&str>(&[], true, false);
        assert!(errors.is_empty());
        assert!(set.is_empty());
        assert_eq!(accepted(&set), NAMES.to_vec());
    }

    #[test]
    fn non_inverted_requires_every_pattern() {
        let (set, _) = PatternSet::compile(&["^el", r"\.c$"], false, false);
        assert_eq!(accepted(&set), vec!["el.c"]);
    }

    #[test]
    fn inverted_passes_when_any_pattern_fails_to_match() {
        // "el.h" matches `^el` but not `\.c$`, so it survives inversion even
        // though it matches one of the patterns.
        let (set, _) = PatternSet::compile(&["^el", r"\.c$"], true, false);
        assert_eq!(
            accepted(&set),
            vec!["Makefile", "README", "el.h", "main.rs"]
        );
    }

    #[test]
    fn inverted_and_plain_sets_partition_names() {
        let (plain, _) = PatternSet::compile(&["e"], false, false);
        let (inverted, _) = PatternSet::compile(&["e"], true, false);

        for name in NAMES {
            assert_ne!(plain.accepts(name), inverted.accepts(name), "{name}");
        }
    }

    #[test]
    fn case_insensitive_flag_applies_to_every_pattern() {
        let (sensitive, _) = PatternSet::compile(&["readme"], false, false);
        let (insensitive, _) = PatternSet::compile(&["readme"], false, true);
        assert_eq!(accepted(&sensitive), Vec::<&str>::new());
        assert_eq!(accepted(&insensitive), vec!["README"]);
    }

    #[test]
    fn invalid_patterns_are_reported_and_skipped() {
        let (set, errors) = PatternSet::compile(&["(", "^el", "[z-a]"], false, false);

        assert_eq!(set.len(), 1);
        let bad: Vec<&str> = errors.iter().map(|err| err.pattern.as_str()).collect();
        assert_eq!(bad, vec!["(", "[z-a]"]);
        assert!(errors[0].to_string().starts_with("invalid pattern `(`"));
        assert_eq!(accepted(&set), vec!["el.c", "el.h"]);
    }
}
