//! Configuration loading and discovery.
//!
//! Sources are merged with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `~/.config/neolo/config.<ext>` (user config)
//! 3. `.neolo.<ext>` then `neolo.<ext>` in the closest directory (walking up
//!    from the search root) that has either
//! 4. Explicit files, in the order they were added
//! 5. `NEOLO_*` environment variables
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. When several
//! extensions exist in one directory they all merge, later extensions
//! winning: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use neolo_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("HD-D sample size: {}", config.hdd_sample_size());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::diversity::{DEFAULT_HDD_SAMPLE_SIZE, DEFAULT_MLTD_THRESHOLD, DEFAULT_MSTTR_WINDOW};
use crate::error::{ConfigError, ConfigResult};
use crate::tokenize::PunctuationConfig;

/// The configuration for neolo.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. No file log is written when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// HD-D sample size (default 42).
    pub hdd_sample_size: Option<u64>,
    /// MSTTR segment length (default 100).
    pub msttr_window: Option<usize>,
    /// MLTD TTR threshold (default 0.72).
    pub mltd_threshold: Option<f64>,
    /// Keep hyphenated words whole.
    pub no_hyphen: bool,
    /// Keep contractions whole.
    pub no_apostrophe: bool,
    /// Abbreviations protected from sentence splitting.
    pub abbreviations: Vec<String>,
    /// Reference dictionaries used when `analyze` gets no `--dicts`.
    pub dictionaries: Vec<Utf8PathBuf>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Config {
    /// Effective HD-D sample size.
    pub fn hdd_sample_size(&self) -> u64 {
        self.hdd_sample_size.unwrap_or(DEFAULT_HDD_SAMPLE_SIZE)
    }

    /// Effective MSTTR window.
    pub fn msttr_window(&self) -> usize {
        self.msttr_window.unwrap_or(DEFAULT_MSTTR_WINDOW)
    }

    /// Effective MLTD threshold.
    pub fn mltd_threshold(&self) -> f64 {
        self.mltd_threshold.unwrap_or(DEFAULT_MLTD_THRESHOLD)
    }

    /// Tokenizer punctuation settings.
    pub const fn punctuation(&self) -> PunctuationConfig {
        PunctuationConfig {
            hyphen: !self.no_hyphen,
            apostrophe: !self.no_apostrophe,
        }
    }

    /// The input size cap, or `None` when disabled.
    pub fn max_input(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-span detail.
    Trace,
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Files that contributed to a loaded [`Config`], for `neolo info`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User-level file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Project files from the nearest directory that has any, low to high.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// `--config` files, low to high.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values won: last explicit, else last project, else user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .or(self.user_file.as_ref())
            .map(Utf8PathBuf::as_path)
    }

    fn is_empty(&self) -> bool {
        self.user_file.is_none() && self.project_files.is_empty() && self.explicit_files.is_empty()
    }
}

const APP_NAME: &str = "neolo";
const ENV_PREFIX: &str = "NEOLO_";

/// A config file syntax, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Yml,
    Json,
}

impl FileFormat {
    /// Merge order within one directory.
    const ALL: [Self; 4] = [Self::Toml, Self::Yaml, Self::Yml, Self::Json];

    const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Yml => "yml",
            Self::Json => "json",
        }
    }

    /// Unknown extensions are read as TOML.
    fn of(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("yaml") => Self::Yaml,
            Some("yml") => Self::Yml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn merge_into(self, figment: Figment, path: &Utf8Path) -> Figment {
        let path = path.as_str();
        match self {
            Self::Toml => figment.merge(Toml::file_exact(path)),
            Self::Yaml | Self::Yml => figment.merge(Yaml::file_exact(path)),
            Self::Json => figment.merge(Json::file_exact(path)),
        }
    }
}

/// Existing `<dir>/<stem>.<ext>` files, in [`FileFormat::ALL`] order.
fn files_with_stem(dir: &Utf8Path, stem: &str) -> Vec<Utf8PathBuf> {
    FileFormat::ALL
        .iter()
        .map(|format| dir.join(format!("{stem}.{}", format.extension())))
        .filter(|path| path.is_file())
        .collect()
}

/// Collects and merges configuration sources.
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// User config on, no project search, `.git` as the search boundary.
    pub fn new() -> Self {
        Self {
            search_from: None,
            user_config: true,
            boundary: Some(".git".to_string()),
            explicit: Vec::new(),
        }
    }

    /// Look for project files in `dir` and its ancestors.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Search up to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` after every discovered file. Repeatable.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit.push(path.as_ref().to_path_buf());
        self
    }

    fn sources(&self) -> ConfigSources {
        ConfigSources {
            user_file: if self.user_config {
                find_user_config()
            } else {
                None
            },
            project_files: self
                .search_from
                .as_deref()
                .map(|dir| self.find_project_configs(dir))
                .unwrap_or_default(),
            explicit_files: self.explicit.clone(),
        }
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.sources();
        Self::extract(sources)
    }

    /// Like [`load`](Self::load), but fails with [`ConfigError::NotFound`]
    /// when no file at all was found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.sources();
        if sources.is_empty() {
            return Err(ConfigError::NotFound);
        }
        Self::extract(sources)
    }

    fn extract(sources: ConfigSources) -> ConfigResult<(Config, ConfigSources)> {
        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files);

        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        for file in files {
            tracing::debug!(%file, "merging config file");
            figment = FileFormat::of(file).merge_into(figment, file);
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(log_level = config.log_level.as_str(), "configuration loaded");
        Ok((config, sources))
    }

    /// Files in the nearest directory holding `.neolo.*` or `neolo.*`.
    ///
    /// Dotfiles merge before plain names. A directory holding the boundary
    /// marker is still searched, but the walk goes no higher.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let dot_stem = format!(".{APP_NAME}");
        for dir in start.ancestors() {
            let mut found = files_with_stem(dir, &dot_stem);
            found.extend(files_with_stem(dir, APP_NAME));
            if !found.is_empty() {
                return found;
            }
            let at_boundary = self
                .boundary
                .as_ref()
                .is_some_and(|marker| dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    files_with_stem(&user_config_dir()?, "config").into_iter().next()
}

/// Per-user config directory (`~/.config/neolo` on Linux).
///
/// `None` when no home directory can be determined.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct Scratch(TempDir);

    impl Scratch {
        fn new() -> Self {
            Self(TempDir::new().unwrap())
        }

        fn root(&self) -> Utf8PathBuf {
            Utf8PathBuf::try_from(self.0.path().to_path_buf()).unwrap()
        }

        fn file(&self, rel: &str, body: &str) -> Utf8PathBuf {
            let path = self.root().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, body).unwrap();
            path
        }

        fn dir(&self, rel: &str) -> Utf8PathBuf {
            let path = self.root().join(rel);
            fs::create_dir_all(&path).unwrap();
            path
        }
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().with_user_config(false)
    }

    fn from_file(path: &Utf8Path) -> Config {
        isolated().with_file(path).load().unwrap().0
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.hdd_sample_size(), 42);
        assert_eq!(config.msttr_window(), 100);
        assert!((config.mltd_threshold() - 0.72).abs() < f64::EPSILON);
        assert_eq!(config.punctuation(), PunctuationConfig::default());
        assert_eq!(config.max_input(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn no_sources_gives_defaults() {
        let (config, sources) = isolated().without_boundary_marker().load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.hdd_sample_size(), 42);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn estimator_parameters_from_toml() {
        let scratch = Scratch::new();
        let path = scratch.file(
            "config.toml",
            "hdd_sample_size = 50\nmsttr_window = 25\nmltd_threshold = 0.6\n",
        );
        let config = from_file(&path);
        assert_eq!(config.hdd_sample_size(), 50);
        assert_eq!(config.msttr_window(), 25);
        assert!((config.mltd_threshold() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn punctuation_flags_from_yaml() {
        let scratch = Scratch::new();
        let path = scratch.file("config.yaml", "no_hyphen: true\n");
        assert_eq!(
            from_file(&path).punctuation(),
            PunctuationConfig {
                hyphen: false,
                apostrophe: true
            }
        );
    }

    #[test]
    fn lists_deserialize_from_yaml() {
        let yaml = "abbreviations: [\"Mr.\", \"e.g.\"]\ndictionaries:\n  - dicts/brown.txt\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.abbreviations, vec!["Mr.", "e.g."]);
        assert_eq!(config.dictionaries, vec![Utf8PathBuf::from("dicts/brown.txt")]);
    }

    #[test]
    fn unknown_extension_reads_as_toml() {
        let scratch = Scratch::new();
        let path = scratch.file("settings.conf", "msttr_window = 7\n");
        assert_eq!(FileFormat::of(&path), FileFormat::Toml);
        assert_eq!(from_file(&path).msttr_window(), 7);
    }

    #[test]
    fn later_explicit_file_wins() {
        let scratch = Scratch::new();
        let base = scratch.file("base.toml", r#"log_level = "warn""#);
        let over = scratch.file("override.json", r#"{"log_level": "error"}"#);

        let (config, sources) = isolated().with_file(&base).with_file(&over).load().unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.primary_file(), Some(over.as_path()));
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let scratch = Scratch::new();
        scratch.file("corpus/.neolo.toml", "msttr_window = 10\n");
        let deep = scratch.dir("corpus/texts/2024");

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();
        assert_eq!(config.msttr_window(), 10);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let scratch = Scratch::new();
        scratch.file(".neolo.toml", r#"log_level = "warn""#);
        scratch.dir("repo/.git");
        let work = scratch.dir("repo/work");

        let (config, sources) = isolated().with_project_search(&work).load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn config_beside_marker_is_found() {
        let scratch = Scratch::new();
        scratch.dir("repo/.git");
        scratch.file("repo/neolo.yaml", "hdd_sample_size: 12\n");
        let work = scratch.dir("repo/work");

        let (config, _) = isolated().with_project_search(&work).load().unwrap();
        assert_eq!(config.hdd_sample_size(), 12);
    }

    #[test]
    fn nearest_directory_only() {
        let scratch = Scratch::new();
        scratch.file(".neolo.toml", "hdd_sample_size = 10\nmsttr_window = 5\n");
        scratch.file("inner/.neolo.toml", "hdd_sample_size = 30\n");
        let inner = scratch.root().join("inner");

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(&inner)
            .load()
            .unwrap();
        assert_eq!(config.hdd_sample_size(), 30);
        assert_eq!(config.msttr_window(), 100, "outer directory should not merge");
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn plain_name_merges_after_dotfile() {
        let scratch = Scratch::new();
        scratch.file(".neolo.toml", "log_level = \"debug\"\nmsttr_window = 40\n");
        scratch.file("neolo.toml", r#"log_level = "error""#);

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(scratch.root())
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.msttr_window(), 40);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.primary_file().unwrap().as_str().ends_with("/neolo.toml"));
    }

    #[test]
    fn explicit_file_beats_project_config() {
        let scratch = Scratch::new();
        scratch.file(".neolo.toml", "hdd_sample_size = 30\n");
        let over = scratch.file("override.toml", "hdd_sample_size = 60\n");

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(scratch.root())
            .with_file(&over)
            .load()
            .unwrap();
        assert_eq!(config.hdd_sample_size(), 60);
        assert_eq!(sources.primary_file(), Some(over.as_path()));
    }

    #[test]
    fn load_or_error_without_files() {
        let result = isolated().without_boundary_marker().load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn load_or_error_with_explicit_file() {
        let scratch = Scratch::new();
        let path = scratch.file("c.toml", "msttr_window = 9\n");
        let (config, _) = isolated().with_file(&path).load_or_error().unwrap();
        assert_eq!(config.msttr_window(), 9);
    }

    #[test]
    fn invalid_value_is_a_deserialize_error() {
        let scratch = Scratch::new();
        let path = scratch.file("config.toml", "hdd_sample_size = \"many\"\n");
        let result = isolated().with_file(&path).load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn disable_input_limit_overrides_max_bytes() {
        let scratch = Scratch::new();
        let path = scratch.file(
            "config.toml",
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        );
        let config = from_file(&path);
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.max_input(), None);
    }

    #[test]
    fn user_dir_is_named_after_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("neolo"));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_beats_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let scratch = Scratch::new();
        let path = scratch.file("config.toml", "log_dir = \"/var/log/neolo\"\n");

        // SAFETY: ENV_LOCK serializes every test touching the environment.
        unsafe { std::env::set_var("NEOLO_LOG_DIR", "/tmp/neolo-logs") };
        let config = from_file(&path);
        // SAFETY: as above.
        unsafe { std::env::remove_var("NEOLO_LOG_DIR") };

        assert_eq!(config.log_dir, Some(Utf8PathBuf::from("/tmp/neolo-logs")));
    }
}
