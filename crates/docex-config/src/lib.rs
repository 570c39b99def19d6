//! Configuration management for docex.
//!
//! Parses `docex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `output.dir`
//! - `latex.title`
//! - `latex.author`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the exported formats.
    pub formats: Option<Vec<String>>,
    /// Override the asset collision policy.
    pub collision: Option<CollisionPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docex.toml";

/// Default exported formats.
const DEFAULT_FORMATS: &[&str] = &["xml", "latex"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// XML output configuration.
    pub xml: XmlConfig,
    /// LaTeX output configuration.
    pub latex: LatexConfig,
    /// Diagram asset configuration.
    pub assets: AssetsConfig,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    figures_dir: Option<String>,
    formats: Option<Vec<String>>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory receiving all artifacts.
    pub dir: PathBuf,
    /// Subdirectory of `dir` receiving diagram images.
    pub figures_dir: String,
    /// Exporter names to run, in order.
    pub formats: Vec<String>,
}

impl OutputConfig {
    /// Directory receiving diagram images.
    #[must_use]
    pub fn figures_path(&self) -> PathBuf {
        self.dir.join(&self.figures_dir)
    }
}

/// XML output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct XmlConfig {
    /// File name of the XML document inside the output directory.
    pub file_name: String,
    /// Whether to write an `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            file_name: "project.xml".to_owned(),
            declaration: false,
        }
    }
}

/// LaTeX output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LatexConfig {
    /// File name of the LaTeX source inside the output directory.
    pub file_name: String,
    /// Document title.
    pub title: String,
    /// Document author.
    pub author: String,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            file_name: "project.tex".to_owned(),
            title: "API Documentation".to_owned(),
            author: "docex".to_owned(),
        }
    }
}

/// What to do when two different diagrams share a file name.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The diagram copied last wins.
    #[default]
    Overwrite,
    /// Abort the export.
    Reject,
}

/// Diagram asset configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Policy for diagrams with the same file name.
    pub collision: CollisionPolicy,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_OUT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to name a single entry inside the output directory.
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain name, not a path: {value}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(formats) = &settings.formats {
            self.output_resolved.formats.clone_from(formats);
        }
        if let Some(collision) = settings.collision {
            self.assets.collision = collision;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfigRaw::default(),
            xml: XmlConfig::default(),
            latex: LatexConfig::default(),
            assets: AssetsConfig::default(),
            output_resolved: OutputConfig {
                dir: base.join("build/docex"),
                figures_dir: "figures".to_owned(),
                formats: default_formats(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file_name(&self.output_resolved.figures_dir, "output.figures_dir")?;
        require_file_name(&self.xml.file_name, "xml.file_name")?;
        require_file_name(&self.latex.file_name, "latex.file_name")?;

        if self.output_resolved.formats.is_empty() {
            return Err(ConfigError::Validation(
                "output.formats cannot be empty".to_owned(),
            ));
        }
        for format in &self.output_resolved.formats {
            require_non_empty(format, "output.formats")?;
        }

        if self.xml.file_name == self.latex.file_name {
            return Err(ConfigError::Validation(format!(
                "xml.file_name and latex.file_name must differ: {}",
                self.xml.file_name
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            ("output.dir", self.output.dir.as_mut()),
            ("latex.title", Some(&mut self.latex.title)),
            ("latex.author", Some(&mut self.latex.author)),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *value = expand::expand_env(value, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: config_dir.join(self.output.dir.as_deref().unwrap_or("build/docex")),
            figures_dir: self
                .output
                .figures_dir
                .clone()
                .unwrap_or_else(|| "figures".to_owned()),
            formats: self
                .output
                .formats
                .clone()
                .unwrap_or_else(default_formats),
        };
    }
}

fn default_formats() -> Vec<String> {
    DEFAULT_FORMATS.iter().map(|&f| f.to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/build/docex"));
        assert_eq!(
            config.output_resolved.figures_path(),
            PathBuf::from("/test/build/docex/figures")
        );
        assert_eq!(config.output_resolved.formats, ["xml", "latex"]);
        assert_eq!(config.xml.file_name, "project.xml");
        assert!(!config.xml.declaration);
        assert_eq!(config.latex.file_name, "project.tex");
        assert_eq!(config.assets.collision, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.xml.file_name, "project.xml");
        assert_eq!(config.latex.title, "API Documentation");
        assert_eq!(config.latex.author, "docex");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[output]
dir = "out"
figures_dir = "img"
formats = ["xml"]

[xml]
file_name = "api.xml"
declaration = true

[latex]
file_name = "api.tex"
title = "Widgets"
author = "Team"

[assets]
collision = "reject"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.dir.as_deref(), Some("out"));
        assert_eq!(config.output.figures_dir.as_deref(), Some("img"));
        assert_eq!(config.xml.file_name, "api.xml");
        assert!(config.xml.declaration);
        assert_eq!(config.latex.title, "Widgets");
        assert_eq!(config.latex.author, "Team");
        assert_eq!(config.assets.collision, CollisionPolicy::Reject);
    }

    #[test]
    fn test_parse_unknown_collision_policy() {
        let toml = r#"
[assets]
collision = "rename"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[output]
dir = "site/api"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.output_resolved.dir, tmp.path().join("site/api"));
        assert_eq!(config.output_resolved.figures_dir, "figures");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");

        let err = Config::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if *p == missing));
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[output\ndir = ");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env_in_output_dir() {
        let tmp = TempDir::new().unwrap();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCEX_TEST_LOAD_DIR", "expanded");
        }
        let path = write_config(
            tmp.path(),
            r#"
[output]
dir = "${DOCEX_TEST_LOAD_DIR}/docs"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.output_resolved.dir, tmp.path().join("expanded/docs"));
        unsafe {
            std::env::remove_var("DOCEX_TEST_LOAD_DIR");
        }
    }

    #[test]
    fn test_load_expands_env_in_latex_fields() {
        let tmp = TempDir::new().unwrap();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCEX_TEST_LOAD_TEAM", "Platform");
            std::env::remove_var("DOCEX_TEST_LOAD_TITLE");
        }
        let path = write_config(
            tmp.path(),
            r#"
[latex]
title = "${DOCEX_TEST_LOAD_TITLE:-Widgets} API"
author = "${DOCEX_TEST_LOAD_TEAM} team"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.latex.title, "Widgets API");
        assert_eq!(config.latex.author, "Platform team");
        unsafe {
            std::env::remove_var("DOCEX_TEST_LOAD_TEAM");
        }
    }

    #[test]
    fn test_load_env_error_names_field() {
        let tmp = TempDir::new().unwrap();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCEX_TEST_LOAD_AUTHOR");
        }
        let path = write_config(tmp.path(), "[latex]\nauthor = \"${DOCEX_TEST_LOAD_AUTHOR}\"\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(
            matches!(err, ConfigError::EnvVar { ref field, .. } if field == "latex.author")
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "");
        let settings = CliSettings {
            output_dir: Some(PathBuf::from("/elsewhere")),
            formats: Some(vec!["latex".to_owned()]),
            collision: Some(CollisionPolicy::Reject),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.output_resolved.dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.output_resolved.formats, ["latex"]);
        assert_eq!(config.assets.collision, CollisionPolicy::Reject);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/build/docex"));
        assert_eq!(config.assets.collision, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_file_name_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.xml.file_name = "../project.xml".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xml.file_name"));
    }

    #[test]
    fn test_validate_empty_figures_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.figures_dir = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.figures_dir cannot be empty"));
    }

    #[test]
    fn test_validate_empty_formats() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_same_file_names() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.latex.file_name = "project.xml".to_owned();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }
}
