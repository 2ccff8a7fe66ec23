//! Turns one line of operator input into an argument vector.
//!
//! The grammar is intentionally small:
//!
//! * words are separated by whitespace and numbers that name a list entry are
//!   replaced by that entry's file name;
//! * a double-quoted span is a single literal argument (`\"` inside it is a
//!   literal quote) and is never resolved as a number;
//! * the default command is prepended unless the line starts with `!`, in
//!   which case the word after the bang is the command to run.

use thiserror::Error;

use crate::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Nothing was typed; the selection is abandoned.
    #[error("no input")]
    Empty,
    /// A bang with no command after it.
    #[error("`!` needs a command")]
    DanglingBang,
    /// A NUL byte cannot be passed to `exec`.
    #[error("input contains a NUL byte")]
    NulByte,
}

/// Removes the contiguous run of trailing space characters only. Tabs and
/// interior whitespace are left alone.
pub fn rtrim_spaces(line: &str) -> &str {
    line.trim_end_matches(' ')
}

pub fn tokenize(
    raw_line: &str,
    selector: &Selector,
    default_command: &str,
) -> Result<Vec<String>, TokenizeError> {
    let line = rtrim_spaces(raw_line);
    if line.is_empty() {
        return Err(TokenizeError::Empty);
    }
    if line.contains('\0') {
        return Err(TokenizeError::NulByte);
    }

    let mut argv: Vec<String> = Vec::new();
    let mut bang_pending = false;
    let mut quoted = line.starts_with('"');

    for span in split_quoted_spans(line) {
        if quoted {
            if bang_pending {
                if span.is_empty() {
                    return Err(TokenizeError::DanglingBang);
                }
                bang_pending = false;
            } else if argv.is_empty() {
                argv.push(default_command.to_string());
            }
            argv.push(span);
        } else {
            for word in span.split_whitespace() {
                if bang_pending {
                    argv.push(selector.resolve_reference(word));
                    bang_pending = false;
                } else if !argv.is_empty() {
                    argv.push(selector.resolve_reference(word));
                } else if word == "!" {
                    bang_pending = true;
                } else if let Some(command) = word.strip_prefix('!') {
                    argv.push(selector.resolve_reference(command));
                } else {
                    argv.push(default_command.to_string());
                    argv.push(selector.resolve_reference(word));
                }
            }
        }
        quoted = !quoted;
    }

    if bang_pending {
        return Err(TokenizeError::DanglingBang);
    }
    if argv.is_empty() {
        return Err(TokenizeError::Empty);
    }
    Ok(argv)
}

/// Splits `line` on double quotes into alternating unquoted/quoted spans,
/// starting with a quoted span when the line opens with a quote.
///
/// A segment ending in a backslash was cut at an escaped quote: the
/// backslash becomes a literal `"` and the following segment is glued back
/// on.
fn split_quoted_spans(line: &str) -> Vec<String> {
    let mut segments = line.split('"');
    if line.starts_with('"') {
        // The empty text before the opening quote.
        segments.next();
    }

    let mut spans = Vec::new();
    while let Some(segment) = segments.next() {
        let mut span = segment.to_string();
        while span.ends_with('\\') {
            let Some(next) = segments.next() else {
                break;
            };
            span.pop();
            span.push('"');
            span.push_str(next);
        }
        spans.push(span);
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selector() -> Selector {
        Selector::from_names(["Makefile", "README", "el.c"])
    }

    fn argv(line: &str) -> Result<Vec<String>, TokenizeError> {
        tokenize(line, &selector(), "vi")
    }

    fn words(words: &[&str]) -> Result<Vec<String>, TokenizeError> {
        Ok(words.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn number_opens_candidate_with_default_command() {
        assert_eq!(argv("3"), words(&["vi", "el.c"]));
    }

    #[test]
    fn bang_prefix_replaces_command() {
        assert_eq!(argv("!echo 2 3"), words(&["echo", "README", "el.c"]));
    }

    #[test]
    fn detached_bang_takes_next_word_as_command() {
        assert_eq!(argv("! less 1"), words(&["less", "Makefile"]));
        assert_eq!(argv("! 3 2"), words(&["el.c", "README"]));
    }

    #[test]
    fn bang_command_may_be_quoted() {
        assert_eq!(
            argv("! \"my editor\" 2"),
            words(&["my editor", "README"])
        );
        assert_eq!(argv("!\"my editor\""), words(&["my editor"]));
    }

    #[test]
    fn quoted_span_is_one_literal_argument() {
        assert_eq!(argv("\"2 3\""), words(&["vi", "2 3"]));
        assert_eq!(argv("\"3\""), words(&["vi", "3"]));
    }

    #[test]
    fn plain_words_get_default_command_and_resolution() {
        assert_eq!(argv("2 extra.txt"), words(&["vi", "README", "extra.txt"]));
    }

    #[test]
    fn empty_line_aborts() {
        assert_eq!(argv(""), Err(TokenizeError::Empty));
        assert_eq!(tokenize("", &Selector::default(), "vi"), Err(TokenizeError::Empty));
        assert_eq!(argv("    "), Err(TokenizeError::Empty));
    }

    #[test]
    fn whitespace_without_words_aborts() {
        assert_eq!(argv("\t"), Err(TokenizeError::Empty));
    }

    #[test]
    fn lone_bang_is_dangling() {
        assert_eq!(argv("!"), Err(TokenizeError::DanglingBang));
        assert_eq!(argv("!   "), Err(TokenizeError::DanglingBang));
        assert_eq!(argv("! \"\""), Err(TokenizeError::DanglingBang));
        assert_eq!(
            tokenize("!", &Selector::default(), "vi"),
            Err(TokenizeError::DanglingBang)
        );
    }

    #[test]
    fn nul_bytes_are_rejected() {
        assert_eq!(argv("!echo a\0b"), Err(TokenizeError::NulByte));
        assert_eq!(argv("\"a\0\""), Err(TokenizeError::NulByte));
        assert_eq!(argv("\0"), Err(TokenizeError::NulByte));
    }

    #[test]
    fn bang_after_first_word_is_literal() {
        assert_eq!(argv("1 !2"), words(&["vi", "Makefile", "!2"]));
    }

    #[test]
    fn quoted_bang_is_an_argument() {
        assert_eq!(argv("\"!\" 1"), words(&["vi", "!", "Makefile"]));
    }

    #[test]
    fn out_of_range_and_garbage_numbers_are_literal() {
        assert_eq!(argv("0 4 3x"), words(&["vi", "0", "4", "3x"]));
    }

    #[test]
    fn quotes_mix_with_words() {
        assert_eq!(
            argv("!grep \"two words\" 1 3"),
            words(&["grep", "two words", "Makefile", "el.c"])
        );
        assert_eq!(
            argv("1 \"a b\" 2"),
            words(&["vi", "Makefile", "a b", "README"])
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_their_span() {
        assert_eq!(
            argv(r#""say \"hi\"" 2"#),
            words(&["vi", r#"say "hi""#, "README"])
        );
        assert_eq!(argv(r#"!echo a\"b"#), words(&["echo", r#"a"b"#]));
    }

    #[test]
    fn trailing_backslash_without_quote_is_kept() {
        assert_eq!(argv(r"!echo a\"), words(&["echo", r"a\"]));
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(argv("1 \"rest of line"), words(&["vi", "Makefile", "rest of line"]));
    }

    #[test]
    fn empty_quotes_yield_empty_argument() {
        assert_eq!(argv("!printf \"\""), words(&["printf", ""]));
    }

    #[test]
    fn only_trailing_spaces_are_trimmed() {
        assert_eq!(rtrim_spaces("a b  "), "a b");
        assert_eq!(rtrim_spaces("a b\t "), "a b\t");
        assert_eq!(rtrim_spaces("  a"), "  a");
        assert_eq!(argv("\"x \"  "), words(&["vi", "x "]));
    }

    #[test]
    fn tokenizing_is_repeatable() {
        let selector = selector();
        let line = "!cp 1 \"dest dir\"";
        assert_eq!(
            tokenize(line, &selector, "vi"),
            tokenize(line, &selector, "vi")
        );
    }

    #[test]
    fn single_match_shortcut_equals_typing_its_number() {
        let selector = Selector::from_names(["only.txt"]);
        assert_eq!(
            selector.single_match_argv("vi"),
            tokenize("1", &selector, "vi").ok()
        );
    }
}
