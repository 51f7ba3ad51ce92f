use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::interpreter::EofPolicy;
use crate::tape::DEFAULT_TAPE_LEN;

pub const ENV_TAPE_LEN: &str = "BRAINFK_TAPE_LEN";
pub const ENV_EOF: &str = "BRAINFK_EOF";
pub const ENV_MEMO: &str = "BRAINFK_MEMO";
/// Points at a config file to use instead of `$XDG_CONFIG_HOME/brainfk.toml`.
pub const ENV_CONFIG: &str = "BRAINFK_CONFIG";

const CONFIG_FILE: &str = "brainfk.toml";
const SECTION: &str = "interpreter";

/// Fully resolved interpreter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tape_len: usize,
    pub eof: EofPolicy,
    pub memoize_spans: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tape_len: DEFAULT_TAPE_LEN,
            eof: EofPolicy::Zero,
            memoize_spans: true,
        }
    }
}

/// One configuration layer. Unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub tape_len: Option<usize>,
    pub eof: Option<EofPolicy>,
    pub memoize_spans: Option<bool>,
}

impl Overrides {
    /// Fill the gaps in `self` from `lower`.
    pub fn or(self, lower: Overrides) -> Overrides {
        Overrides {
            tape_len: self.tape_len.or(lower.tape_len),
            eof: self.eof.or(lower.eof),
            memoize_spans: self.memoize_spans.or(lower.memoize_spans),
        }
    }

    pub fn apply(self, base: Settings) -> Settings {
        Settings {
            tape_len: self.tape_len.unwrap_or(base.tape_len),
            eof: self.eof.unwrap_or(base.eof),
            memoize_spans: self.memoize_spans.unwrap_or(base.memoize_spans),
        }
    }

    /// Read the `BRAINFK_*` variables through `lookup`.
    pub fn from_env_with<F>(lookup: F) -> Overrides
    where
        F: Fn(&str) -> Option<String>,
    {
        Overrides {
            tape_len: lookup(ENV_TAPE_LEN).and_then(|v| parse_value(ENV_TAPE_LEN, &v, parse_tape_len)),
            eof: lookup(ENV_EOF).and_then(|v| parse_value(ENV_EOF, &v, parse_eof)),
            memoize_spans: lookup(ENV_MEMO).and_then(|v| parse_value(ENV_MEMO, &v, parse_bool)),
        }
    }

    pub fn from_env() -> Overrides {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse the `[interpreter]` section of a config file.
    ///
    /// Only `key = value` lines are understood; values may be quoted.
    /// Unknown keys and bad values are skipped.
    pub fn from_toml_str(content: &str) -> Overrides {
        let mut in_section = false;
        let mut map: HashMap<&str, &str> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_section = line[1..line.len() - 1].trim() == SECTION;
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((key, raw)) = line.split_once('=') {
                let raw = raw.trim();
                let value = raw
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(raw);
                map.insert(key.trim(), value);
            }
        }

        let mut layer = Overrides::default();

        macro_rules! set {
            ($field:ident, $key:literal, $parse:expr) => {
                if let Some(v) = map.get($key).and_then(|s| parse_value($key, s, $parse)) {
                    layer.$field = Some(v);
                }
            };
        }

        set!(tape_len, "tape_len", parse_tape_len);
        set!(eof, "eof", parse_eof);
        set!(memoize_spans, "memoize_spans", parse_bool);

        layer
    }

    /// Load the config file, if there is one.
    pub fn from_file() -> Overrides {
        let Some(path) = config_path() else {
            return Overrides::default();
        };
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "loaded config file");
                Self::from_toml_str(&content)
            }
            Err(_) => Overrides::default(),
        }
    }
}

/// `$BRAINFK_CONFIG`, or `brainfk.toml` in the user's config directory.
///
/// On Linux this is usually `~/.config/brainfk.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(explicit));
    }
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE);
    Some(path)
}

/// Merge settings: `cli` first, then the environment, then the config file.
pub fn resolve(cli: Overrides) -> Settings {
    cli.or(Overrides::from_env())
        .or(Overrides::from_file())
        .apply(Settings::default())
}

fn parse_value<T>(key: &str, value: &str, parse: fn(&str) -> Result<T, String>) -> Option<T> {
    match parse(value) {
        Ok(v) => Some(v),
        Err(msg) => {
            warn!("ignoring {key}={value:?}: {msg}");
            None
        }
    }
}

/// Tape length in cells; must be at least 1.
pub fn parse_tape_len(value: &str) -> Result<usize, String> {
    match value.trim().replace('_', "").parse::<usize>() {
        Ok(0) => Err("tape length must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

pub fn parse_eof(value: &str) -> Result<EofPolicy, String> {
    EofPolicy::from_str(value.trim(), true)
        .map_err(|_| "expected one of: zero, unchanged, sentinel".to_string())
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}
