use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::functions::{FunctionRegistry, is_valid_function_name};
use crate::interpreter::{Brainfunc, Options};
use crate::theme::{Palette, parse_color};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BFN_CONFIG";

/// Settings read from `bfn.toml`.
///
/// ```toml
/// [interpreter]
/// strict_ascii = true
/// echo_unknown = false
/// presets = true
///
/// [functions]
/// double = "[->++<]>[-<+>]<"
///
/// [colors]
/// flow = "#cba6f7"
/// halt = "red"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub strict_ascii: Option<bool>,
    pub echo_unknown: Option<bool>,
    pub presets: Option<bool>,
    /// User functions in file order.
    pub functions: Vec<(String, String)>,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_ascii: None,
            echo_unknown: None,
            presets: None,
            functions: Vec::new(),
            palette: Palette::default(),
        }
    }
}

/// Command-line switches layered over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub lenient: bool,
    pub echo_unknown: bool,
    pub no_presets: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Config {
    /// Load configuration: `explicit` path first, then `BFN_CONFIG`, then
    /// `bfn.toml` in the XDG config home.
    ///
    /// An explicitly named file must be readable; a missing default file just
    /// yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        if let Some(path) = named {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "loaded config");
            return Ok(Self::parse(&content));
        }

        match default_path().and_then(|path| fs::read_to_string(path).ok()) {
            Some(content) => Ok(Self::parse(&content)),
            None => Ok(Self::default()),
        }
    }

    /// Parse the small TOML subset the config uses: `[section]` headers and
    /// `key = value` lines, values optionally double-quoted.
    pub fn parse(content: &str) -> Self {
        let mut sections: HashMap<String, Vec<(String, String)>> = HashMap::new();
        let mut current = String::new();

        for (number, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = name.trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!(line = number + 1, "ignoring config line without '='");
                continue;
            };
            sections
                .entry(current.clone())
                .or_default()
                .push((unquote(key.trim()), unquote(value.trim())));
        }

        let mut cfg = Self::default();

        for (key, value) in sections.remove("interpreter").unwrap_or_default() {
            let Some(flag) = parse_bool(&value) else {
                warn!(%key, %value, "ignoring non-boolean interpreter setting");
                continue;
            };
            match key.as_str() {
                "strict_ascii" => cfg.strict_ascii = Some(flag),
                "echo_unknown" => cfg.echo_unknown = Some(flag),
                "presets" => cfg.presets = Some(flag),
                _ => warn!(%key, "ignoring unknown interpreter setting"),
            }
        }

        for (name, body) in sections.remove("functions").unwrap_or_default() {
            if is_valid_function_name(&name) {
                cfg.functions.push((name, body));
            } else {
                warn!(%name, "ignoring config function with invalid name");
            }
        }

        for (key, value) in sections.remove("colors").unwrap_or_default() {
            match parse_color(&value) {
                Some(color) if cfg.palette.set(&key, color) => {}
                Some(_) => warn!(%key, "ignoring unknown color key"),
                None => warn!(%key, %value, "ignoring unparseable color"),
            }
        }

        for name in sections.keys() {
            warn!(section = %name, "ignoring unknown config section");
        }

        cfg
    }

    /// Interpreter options for a program called `source`. A set flag wins over
    /// the file, which wins over the defaults.
    pub fn options(&self, source: &str, overrides: Overrides) -> Options {
        let defaults = Options::default();
        Options {
            source: source.to_string(),
            strict_ascii: !overrides.lenient && self.strict_ascii.unwrap_or(defaults.strict_ascii),
            echo_unknown: overrides.echo_unknown
                || self.echo_unknown.unwrap_or(defaults.echo_unknown),
        }
    }

    /// Presets (unless disabled) plus the configured user functions.
    pub fn registry(&self, overrides: Overrides) -> FunctionRegistry {
        let presets = !overrides.no_presets && self.presets.unwrap_or(true);
        let mut registry = if presets {
            FunctionRegistry::with_presets()
        } else {
            FunctionRegistry::new()
        };
        self.install_functions(&mut registry);
        registry
    }

    /// A ready-to-run interpreter for `source`.
    pub fn build_engine(&self, source: &str, overrides: Overrides) -> Brainfunc {
        Brainfunc::with_options(self.options(source, overrides), self.registry(overrides))
    }

    /// Add the configured user functions to `registry`, replacing presets of
    /// the same name.
    pub fn install_functions(&self, registry: &mut FunctionRegistry) {
        for (name, body) in &self.functions {
            registry.define(name.clone(), body.clone());
        }
    }
}

/// `bfn.toml` under the XDG config home (`~/.config` on every platform).
pub fn default_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bfn.toml");
    Some(path)
}

fn unquote(raw: &str) -> String {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
        .to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
