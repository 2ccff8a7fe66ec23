use std::io;
use std::num::NonZero;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::enumerate::DEFAULT_MAX_CANDIDATES;

pub const CONFIG_TOML_FILE: &str = "config.toml";
pub const DEFAULT_COMMAND: &str = "vi";

/// Contents of `$EL_HOME/config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// Command prepended to the selection, e.g. `"nvim"`.
    pub editor: Option<String>,
    pub max_candidates: Option<NonZero<usize>>,
    pub show_hidden: Option<bool>,
    pub show_binary: Option<bool>,
    pub show_dirs: Option<bool>,
    pub case_insensitive: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads `config.toml` from `el_home`. A missing file yields the defaults.
pub fn load_config_toml(el_home: &Path) -> Result<ConfigToml, ConfigError> {
    let path = el_home.join(CONFIG_TOML_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(ConfigToml::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// Settings given on the command line; they win over everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub editor: Option<String>,
    pub max_candidates: Option<NonZero<usize>>,
    pub show_hidden: bool,
    pub show_binary: bool,
    pub show_dirs: bool,
    pub case_insensitive: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_command: String,
    pub max_candidates: NonZero<usize>,
    pub show_hidden: bool,
    pub show_binary: bool,
    pub show_dirs: bool,
    pub case_insensitive: bool,
}

impl Config {
    /// Precedence: command line, then `config.toml`, then `$EDITOR` (for the
    /// default command), then built-in defaults. Switches are on when either
    /// the command line or the file turns them on.
    pub fn resolve(
        overrides: ConfigOverrides,
        config_toml: ConfigToml,
        env_editor: Option<String>,
    ) -> Self {
        let default_command = [overrides.editor, config_toml.editor, env_editor]
            .into_iter()
            .flatten()
            .find(|editor| !editor.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND.to_string());
        let max_candidates = overrides
            .max_candidates
            .or(config_toml.max_candidates)
            .unwrap_or_else(default_max_candidates);

        Self {
            default_command,
            max_candidates,
            show_hidden: overrides.show_hidden || config_toml.show_hidden.unwrap_or(false),
            show_binary: overrides.show_binary || config_toml.show_binary.unwrap_or(false),
            show_dirs: overrides.show_dirs || config_toml.show_dirs.unwrap_or(false),
            case_insensitive: overrides.case_insensitive
                || config_toml.case_insensitive.unwrap_or(false),
        }
    }

    /// Loads the config file under `$EL_HOME` and reads `$EDITOR`.
    pub fn load(overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let el_home = el_utils_home_dir::find_el_home()?;
        let config_toml = load_config_toml(&el_home)?;
        let env_editor = std::env::var("EDITOR").ok().filter(|val| !val.is_empty());
        Ok(Self::resolve(overrides, config_toml, env_editor))
    }
}

fn default_max_candidates() -> NonZero<usize> {
    NonZero::new(DEFAULT_MAX_CANDIDATES).unwrap_or(NonZero::<usize>::MIN)
}
