use indexmap::IndexMap;
use ini::Ini;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, ScanError};

pub const DEFAULT_OUTPUT: &str = "license-scan.csv";
pub const RC_FILE_NAME: &str = ".licenserc";

pub const SYSTEM_CONFIG_DIR: &str = "/etc";
/// Replaces `/etc` when looking for system-wide config files.
pub const SYSTEM_CONFIG_DIR_VAR: &str = "LICENSE_SCAN_SYSTEM_CONFIG_DIR";

const APP_NAME: &str = "license";
const ENV_PREFIX: &str = "license_";
const INI_DEFAULTS_SECTION: &str = "defaults";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report file, relative to the project root (default: license-scan.csv)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Only these license strings are accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Vec<String>>,

    /// These license strings are rejected (ignored when a whitelist is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<Vec<String>>,

    /// Fallback licenses keyed by "name@version"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<IndexMap<String, String>>,
}

impl Config {
    /// Field-wise overlay: values set in `overrides` replace ours.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            output: overrides.output.or(self.output),
            whitelist: overrides.whitelist.or(self.whitelist),
            blacklist: overrides.blacklist.or(self.blacklist),
            defaults: overrides.defaults.or(self.defaults),
        }
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        match &self.output {
            Some(output) => root.join(output),
            None => root.join(DEFAULT_OUTPUT),
        }
    }

    /// Parse a config file as JSON (comments allowed), then TOML, then INI.
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let json_err = match parse_jsonc(&content) {
            Ok(config) => return Ok(config),
            Err(err) => err,
        };
        let toml_err = match toml::from_str::<Config>(&content) {
            Ok(config) => return Ok(config),
            Err(err) => err,
        };

        parse_ini(&content).map_err(|ini_err| ScanError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("JSON: {json_err}; TOML: {}; INI: {ini_err}", toml_err.message()),
        })
    }

    /// Settings from `license_output`, `license_whitelist` and
    /// `license_blacklist`; lists are comma-separated.
    pub fn from_env_vars<I>(vars: I) -> Config
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Config::default();

        for (key, value) in vars {
            let key = key.to_ascii_lowercase();
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "output" => config.output = Some(PathBuf::from(value)),
                "whitelist" => config.whitelist = Some(split_list(&value)),
                "blacklist" => config.blacklist = Some(split_list(&value)),
                _ => {}
            }
        }

        config
    }
}

fn parse_jsonc(content: &str) -> std::result::Result<Config, String> {
    let value = jsonc_parser::parse_to_value(content, &jsonc_parser::ParseOptions::default())
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "empty document".to_string())?;
    serde_json::from_value(jsonc_to_value(value)).map_err(|err| err.to_string())
}

fn jsonc_to_value(value: jsonc_parser::JsonValue) -> Value {
    match value {
        jsonc_parser::JsonValue::Null => Value::Null,
        jsonc_parser::JsonValue::Boolean(b) => Value::Bool(b),
        jsonc_parser::JsonValue::Number(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Value::Number(i.into())
            } else if let Ok(f) = n.parse::<f64>() {
                serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
            } else {
                Value::Null
            }
        }
        jsonc_parser::JsonValue::String(s) => Value::String(s.to_string()),
        jsonc_parser::JsonValue::Array(items) => {
            Value::Array(items.into_iter().map(jsonc_to_value).collect())
        }
        jsonc_parser::JsonValue::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, value) in object {
                map.insert(key, jsonc_to_value(value));
            }
            Value::Object(map)
        }
    }
}

/// INI layout: `key[] = value` appends to a list, a plain list key is
/// comma-separated, and `[defaults]` holds the fallback licenses.
fn parse_ini(content: &str) -> std::result::Result<Config, String> {
    let ini = Ini::load_from_str(content).map_err(|err| err.to_string())?;
    let mut config = Config::default();

    let general = ini.section(None::<String>).into_iter().flat_map(|section| section.iter());
    for (key, value) in general {
        let (name, append) = match key.strip_suffix("[]") {
            Some(name) => (name.trim(), true),
            None => (key.trim(), false),
        };
        let list = match name {
            "output" => {
                config.output = Some(PathBuf::from(value));
                continue;
            }
            "whitelist" => &mut config.whitelist,
            "blacklist" => &mut config.blacklist,
            _ => continue,
        };
        if append {
            list.get_or_insert_with(Vec::new).push(value.to_string());
        } else {
            *list = Some(split_list(value));
        }
    }

    if let Some(section) = ini.section(Some(INI_DEFAULTS_SECTION)) {
        let defaults = section
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config.defaults = Some(defaults);
    }

    Ok(config)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Nearest `.licenserc` in `start` or one of its parents.
pub fn find_rc_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(RC_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Every config file location for `root`, lowest precedence first.
pub fn config_candidates(root: &Path, system: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        system.join(APP_NAME).join("config"),
        system.join(format!("{APP_NAME}rc")),
    ];
    if let Some(home) = home {
        let config_dir = home.join(".config");
        candidates.push(config_dir.join(APP_NAME).join("config"));
        candidates.push(config_dir.join(APP_NAME));
        candidates.push(home.join(format!(".{APP_NAME}")).join("config"));
        candidates.push(home.join(RC_FILE_NAME));
    }
    if let Some(local) = find_rc_file(root) {
        candidates.push(local);
    }
    candidates
}

/// Merge every config file that applies to `root`, then the explicit file.
pub fn load_config_files(
    root: &Path,
    system: &Path,
    home: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<Config> {
    let mut config = Config::default();
    for path in config_candidates(root, system, home)
        .iter()
        .filter(|path| path.is_file())
    {
        debug!(path = %path.display(), "loading configuration");
        config = config.merge(Config::from_file(path)?);
    }

    // An explicitly requested file has to exist
    if let Some(explicit) = explicit {
        debug!(path = %explicit.display(), "loading configuration");
        config = config.merge(Config::from_file(explicit)?);
    }

    Ok(config)
}

/// Load the effective configuration for a project, environment included.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let system = std::env::var_os(SYSTEM_CONFIG_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SYSTEM_CONFIG_DIR));
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let config = load_config_files(root, &system, home.as_deref(), explicit)?;
    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    Ok(config.merge(Config::from_env_vars(vars)))
}
