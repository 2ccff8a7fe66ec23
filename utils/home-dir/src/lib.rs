use dirs::home_dir;
use std::io;
use std::path::PathBuf;

/// Overrides where `el` looks for `config.toml`.
pub const EL_HOME_ENV_VAR: &str = "EL_HOME";

const DEFAULT_DIR_NAME: &str = ".el";

/// Directory holding `config.toml`.
///
/// `~/.el` need not exist; `el` then runs on built-in defaults. A directory
/// named by `$EL_HOME` is taken as a deliberate choice, so a typo there is
/// reported rather than silently ignored.
pub fn find_el_home() -> io::Result<PathBuf> {
    let el_home_env = std::env::var(EL_HOME_ENV_VAR)
        .ok()
        .filter(|val| !val.is_empty());
    find_el_home_from_env(el_home_env.as_deref())
}

fn find_el_home_from_env(el_home_env: Option<&str>) -> io::Result<PathBuf> {
    match el_home_env {
        Some(val) => explicit_el_home(val),
        None => default_el_home(),
    }
}

fn default_el_home() -> io::Result<PathBuf> {
    home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory for ~/.el"))
}

fn explicit_el_home(val: &str) -> io::Result<PathBuf> {
    let context = |err: io::Error| {
        let detail = match err.kind() {
            io::ErrorKind::NotFound => "no such directory".to_string(),
            _ => err.to_string(),
        };
        io::Error::new(err.kind(), format!("{EL_HOME_ENV_VAR}={val:?}: {detail}"))
    };

    let path = PathBuf::from(val).canonicalize().map_err(context)?;
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{EL_HOME_ENV_VAR}={val:?}: not a directory"),
        ));
    }
    Ok(path)
}
