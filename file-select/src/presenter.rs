use std::io::BufRead;
use std::io::Write;

use crate::pattern::PatternError;
use crate::tokenize::TokenizeError;
use crate::selector::Selector;

const FALLBACK_TERMINAL_WIDTH: usize = 80;
const COLUMN_GAP: usize = 2;

/// Shows the numbered list and any warnings raised while building it.
pub trait Presenter {
    fn present(&self, selector: &Selector, max_name_len: usize);
    fn warn_candidates_truncated(&self, limit: usize);
    fn warn_invalid_pattern(&self, err: &PatternError);
    fn warn_no_candidates(&self);
    fn warn_rejected_input(&self, err: &TokenizeError);
}

/// Source of the operator's response.
pub trait Prompt {
    /// Returns one line without its line terminator, or `None` at end of
    /// input.
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn present(&self, selector: &Selector, max_name_len: usize) {
        print!("{}", render_list(selector, max_name_len, terminal_width()));
    }

    fn warn_candidates_truncated(&self, limit: usize) {
        eprintln!("\n* limit {limit} reached. *");
    }

    fn warn_invalid_pattern(&self, err: &PatternError) {
        eprintln!("el: {err}");
    }

    fn warn_no_candidates(&self) {
        eprintln!("el: nothing to select");
    }

    fn warn_rejected_input(&self, err: &TokenizeError) {
        eprintln!("el: {err}");
    }
}

#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

/// Width of the widest list number.
pub fn number_width(count: usize) -> usize {
    count.max(1).to_string().len()
}

/// The prompt lines up with the `:` of the list numbers.
pub fn prompt_for(selector: &Selector) -> String {
    let width = number_width(selector.len());
    format!("{:width$}> ", "")
}

/// Lays the entries out as `N: name` cells, filled top to bottom, in as many
/// columns as fit in `width`.
pub fn render_list(selector: &Selector, max_name_len: usize, width: usize) -> String {
    let count = selector.len();
    if count == 0 {
        return String::new();
    }
    let number_width = number_width(count);
    let cell_width = number_width + 2 + max_name_len;
    let columns = ((width + COLUMN_GAP) / (cell_width + COLUMN_GAP)).clamp(1, count);
    let rows = count.div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        let mut line = String::new();
        for column in 0..columns {
            let idx = column * rows + row;
            let Some(candidate) = selector.candidates().get(idx) else {
                break;
            };
            if column > 0 {
                let padding = max_name_len.saturating_sub(previous_len(selector, idx - rows));
                line.push_str(&" ".repeat(padding + COLUMN_GAP));
            }
            line.push_str(&format!(
                "{:>number_width$}: {}",
                idx + 1,
                candidate.display_name
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn previous_len(selector: &Selector, idx: usize) -> usize {
    selector
        .candidates()
        .get(idx)
        .map_or(0, |candidate| candidate.display_name.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selector(count: usize) -> Selector {
        Selector::from_names((0..count).map(|i| format!("f{i}")))
    }

    #[test]
    fn narrow_terminal_prints_one_per_line() {
        let selector = Selector::from_names(["Makefile", "README", "el.c"]);
        assert_eq!(
            render_list(&selector, 8, 10),
            "1: Makefile\n2: README\n3: el.c\n"
        );
    }

    #[test]
    fn numbers_are_right_aligned() {
        let selector = selector(10);
        let rendered = render_list(&selector, 2, 1);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " 1: f0");
        assert_eq!(lines[9], "10: f9");
    }

    #[test]
    fn wide_terminal_fills_columns_top_to_bottom() {
        let selector = selector(5);
        // Each cell is "N: fX" (5 wide) plus a gap of 2.
        assert_eq!(
            render_list(&selector, 2, 19),
            "1: f0  3: f2  5: f4\n2: f1  4: f3\n"
        );
    }

    #[test]
    fn short_names_are_padded_to_the_widest() {
        let selector = Selector::from_names(["a", "bbb", "c", "d"]);
        assert_eq!(
            render_list(&selector, 3, 20),
            "1: a    3: c\n2: bbb  4: d\n"
        );
    }

    #[test]
    fn empty_selector_renders_nothing() {
        assert_eq!(render_list(&Selector::default(), 0, 80), "");
    }

    #[test]
    fn prompt_aligns_with_numbers() {
        assert_eq!(prompt_for(&selector(3)), " > ");
        assert_eq!(prompt_for(&selector(12)), "  > ");
    }
}
