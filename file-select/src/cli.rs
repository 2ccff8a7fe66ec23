use clap::Parser;
use std::num::NonZero;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Pick a file from a numbered list and open it with $EDITOR.
///
/// At the prompt, type list numbers and other words to pass as arguments.
/// Start the line with `!cmd` to run `cmd` instead of the editor. Double
/// quotes keep text together as a single argument.
#[derive(Debug, Parser)]
#[command(name = "el", version)]
pub struct Cli {
    /// Regular expressions a file name must match (all of them).
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Include hidden files.
    #[arg(short = 'a', long = "all", default_value_t = false)]
    pub show_hidden: bool,

    /// Include binary files.
    #[arg(short = 'b', long = "binary", default_value_t = false)]
    pub show_binary: bool,

    /// Include directories.
    #[arg(short = 'd', long = "dirs", default_value_t = false)]
    pub show_dirs: bool,

    /// Match patterns case-insensitively.
    #[arg(short = 'i', long = "ignore-case", default_value_t = false)]
    pub case_insensitive: bool,

    /// Keep the files that do not match the patterns.
    #[arg(short = 'v', long = "invert", default_value_t = false)]
    pub invert: bool,

    /// Command to open the selection with (defaults to $EDITOR, then vi).
    #[arg(short = 'e', long = "editor", value_name = "CMD")]
    pub editor: Option<String>,

    /// Maximum number of files to list.
    #[arg(short = 'n', long = "max", value_name = "N")]
    pub max_candidates: Option<NonZero<usize>>,

    /// Directory to list instead of the current one.
    #[clap(long = "cd", short = 'C', value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Read candidate paths, one per line, from this command instead of
    /// listing a directory (e.g. "locate -i notes").
    #[arg(short = 's', long = "source", value_name = "CMD")]
    pub source: Option<String>,

    /// Print the command that would run as JSON instead of running it.
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            editor: self.editor.clone(),
            max_candidates: self.max_candidates,
            show_hidden: self.show_hidden,
            show_binary: self.show_binary,
            show_dirs: self.show_dirs,
            case_insensitive: self.case_insensitive,
        }
    }
}
