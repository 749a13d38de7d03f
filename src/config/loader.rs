//! Settings file loading

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_SUFFIX: &str = ".txt";

/// Section name accepted for nested settings files.
const SECTION: &str = "file-merge-sort";

/// Tool-level settings that shape how arguments are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Suffix that marks a positional argument as a file path
    #[serde(deserialize_with = "deserialize_suffix")]
    pub file_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self { file_suffix: DEFAULT_FILE_SUFFIX.to_string() }
    }
}

impl Settings {
    /// Replace the file suffix, normalizing a bare extension like `txt` to `.txt`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.file_suffix = normalize_suffix(suffix);
        self
    }

    pub fn is_file_argument(&self, arg: &str) -> bool {
        arg.ends_with(&self.file_suffix)
    }
}

fn normalize_suffix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILE_SUFFIX.to_string();
    }
    if trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!(".{trimmed}")
    } else {
        trimmed.to_string()
    }
}

fn deserialize_suffix<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_suffix(&raw))
}

/// Load settings from `config_path`, or from a settings file discovered in `dir`.
///
/// An explicitly provided file must parse. A discovered file that fails to parse
/// only produces a warning and the defaults are used.
pub fn load_settings(dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(dir),
    };

    let Some(settings_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(&settings_file)
        .with_context(|| format!("Failed reading settings file: {}", settings_file.display()))?;

    let ext =
        settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_settings(&content, &settings_file),
        "yaml" | "yml" => parse_yaml_settings(&content, &settings_file),
        other => Err(anyhow::anyhow!(
            "Unsupported settings extension '.{}' for file {}",
            other,
            settings_file.display()
        )),
    };

    match parsed {
        Ok(settings) => {
            tracing::debug!("Loaded settings from {}", settings_file.display());
            Ok(settings)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Ignoring auto-discovered settings {}: {:#}",
                settings_file.display(),
                e
            );
            Ok(Settings::default())
        }
    }
}

/// Parse TOML settings, supporting a nested `[file-merge-sort]` section.
fn parse_toml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", settings_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    value.try_into().with_context(|| format!("Invalid TOML settings: {}", settings_file.display()))
}

/// Parse YAML settings, supporting a nested `file-merge-sort` section.
fn parse_yaml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", settings_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(value)
        .with_context(|| format!("Invalid YAML settings: {}", settings_file.display()))
}

fn discover_settings(dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "file-merge-sort.toml",
        ".file-merge-sort.toml",
        "file-merge-sort.yaml",
        ".file-merge-sort.yaml",
        "file-merge-sort.yml",
        ".file-merge-sort.yml",
    ];

    candidates.iter().map(|candidate| dir.join(candidate)).find(|path| path.exists())
}
