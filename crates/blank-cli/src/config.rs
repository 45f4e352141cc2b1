//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`-a`, `-P`, `-o`; handled at the call-site)
//! 2. `BLANK_PATH` for the search path
//! 3. `BLANK__SECTION__KEY` environment variables
//! 4. Config file (`--config FILE`, else `<config dir>/blank/config.toml`)
//! 5. Built-in defaults

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use blank_core::domain::{BLANK_PATH, Format, SearchPath};

/// Prefix of the environment variables that override config keys.
const ENV_PREFIX: &str = "BLANK";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where makefiles are looked up.
    pub search: SearchConfig,
    /// Defaults for `blank update`.
    pub update: UpdateConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// How `blank make` runs make.
    pub make: MakeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub paths: Vec<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            paths: default_search_dir().into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Output format when neither `-o` nor `-i` is given.
    pub default_output: Format,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakeConfig {
    /// The make executable.
    pub program: String,
}

impl Default for MakeConfig {
    fn default() -> Self {
        Self {
            program: "make".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. When
    /// it is `None` the default location is used if a file is there.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(config_file, None, std::env::var_os(BLANK_PATH))
    }

    /// Load with an explicit environment.
    ///
    /// `env` replaces the process environment for `BLANK__*` keys when
    /// given; `blank_path` is the raw `BLANK_PATH` value.
    pub(crate) fn load_with(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
        blank_path: Option<OsString>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default config")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = Self::config_path();
                if path.is_file() {
                    builder = builder.add_source(File::from(path).format(FileFormat::Toml));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let mut config: Self = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if let Some(value) = blank_path.filter(|v| !v.is_empty()) {
            config.search.paths = SearchPath::from_env_value(&value).dirs().to_vec();
        }

        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Falls back to `.blank.toml` in the current directory when the user
    /// config directory cannot be determined.
    pub fn config_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|d| d.config_dir().join("blank").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".blank.toml"))
    }

    /// The makefile search path this configuration describes.
    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(&self.search.paths)
    }

    /// Render as TOML, the format of the config file.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }

    /// Look up a dotted key such as `update.default_output`.
    pub fn get(&self, key: &str) -> anyhow::Result<Option<toml::Value>> {
        let mut value = toml::Value::try_from(self).context("Failed to serialise configuration")?;
        for part in key.split('.') {
            match value {
                toml::Value::Table(mut table) => match table.remove(part) {
                    Some(next) => value = next,
                    None => return Ok(None),
                },
                _ => return Ok(None),
            }
        }
        Ok(Some(value))
    }
}

/// `<user config dir>/blank`, where makefiles live by default.
fn default_search_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("blank"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.update.default_output, Format::Json);
        assert_eq!(cfg.make.program, "make");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = config_file(
            "[update]\ndefault_output = \"yaml\"\n\n[search]\npaths = [\"/opt/blank\"]\n",
        );
        let cfg = AppConfig::load_with(Some(file.path()), no_env(), None).unwrap();
        assert_eq!(cfg.update.default_output, Format::Yaml);
        assert_eq!(cfg.search.paths, [PathBuf::from("/opt/blank")]);
        assert_eq!(cfg.make.program, "make");
    }

    #[test]
    fn env_overrides_file() {
        let file = config_file("[make]\nprogram = \"gmake\"\n");
        let env = config::Map::from([(
            "BLANK__MAKE__PROGRAM".to_owned(),
            "bmake".to_owned(),
        )]);
        let cfg = AppConfig::load_with(Some(file.path()), Some(env), None).unwrap();
        assert_eq!(cfg.make.program, "bmake");
    }

    #[test]
    fn blank_path_overrides_search_paths() {
        let value = std::env::join_paths(["/a", "/b"]).unwrap();
        let cfg = AppConfig::load_with(None, no_env(), Some(value)).unwrap();
        assert_eq!(cfg.search.paths, [PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn empty_blank_path_is_ignored() {
        let cfg = AppConfig::load_with(None, no_env(), Some(OsString::new())).unwrap();
        assert_eq!(cfg.search.paths, SearchConfig::default().paths);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_with(Some(Path::new("/nonexistent/blank.toml")), no_env(), None);
        assert!(result.is_err());
    }

    #[test]
    fn get_dotted_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("update.default_output").unwrap(),
            Some(toml::Value::String("json".into()))
        );
        assert_eq!(cfg.get("update.nope").unwrap(), None);
        assert_eq!(cfg.get("make.program.deeper").unwrap(), None);
    }

    #[test]
    fn toml_round_trips() {
        let cfg = AppConfig::default();
        let text = cfg.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
