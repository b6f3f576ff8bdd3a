//! studysense configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_LIMIT;
use crate::error::StudyError;

/// File name searched for in the current directory.
pub const CONFIG_FILE_NAME: &str = "studysense.toml";

/// How ranked recommendations are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(StudyError::unknown("output format", s)),
        }
    }
}

/// Top-level studysense configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudysenseConfig {
    /// Number of recommendations to show.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// TOML catalog file or directory replacing the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// TOML phrasebook overriding the English text.
    #[serde(default)]
    pub phrasebook: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Treat input warnings as errors.
    #[serde(default)]
    pub strict: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for StudysenseConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            catalog: None,
            phrasebook: None,
            format: OutputFormat::default(),
            strict: false,
        }
    }
}

impl StudysenseConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config TOML")
    }

    /// Apply `STUDYSENSE_CATALOG` / `STUDYSENSE_LIMIT` overrides and resolve
    /// `${VAR}` references in paths, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(catalog) = lookup("STUDYSENSE_CATALOG") {
            self.catalog = Some(PathBuf::from(catalog));
        }
        if let Some(limit) = lookup("STUDYSENSE_LIMIT") {
            self.limit = limit
                .trim()
                .parse()
                .with_context(|| format!("STUDYSENSE_LIMIT is not a number: {limit}"))?;
        }
        self.catalog = self.catalog.take().map(|p| resolve_path(&p, &lookup));
        self.phrasebook = self.phrasebook.take().map(|p| resolve_path(&p, &lookup));
        Ok(())
    }
}

/// Replace `${VAR}` references with values from `lookup`; unset variables
/// become empty.
pub fn resolve_env_vars<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&lookup(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path<F>(path: &Path, lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    PathBuf::from(resolve_env_vars(&path.to_string_lossy(), lookup))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studysense.toml` in the current directory
/// 2. `~/.config/studysense/config.toml`
pub fn load_config() -> Result<StudysenseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudysenseConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => default_config_path(),
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            StudysenseConfig::from_toml_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => StudysenseConfig::default(),
    };
    if let Some(path) = &config_path {
        tracing::debug!("loaded config from {}", path.display());
    }

    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    let global = std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config/studysense/config.toml"))?;
    global.exists().then_some(global)
}

/// Starter config written by `studysense init`.
pub const STARTER_CONFIG: &str = r#"# studysense configuration

# Number of recommendations to show.
limit = 5

# Output format: "table" or "json".
format = "table"

# Fail on invalid profile records instead of warning.
strict = false

# Replace the built-in catalog with a TOML file or directory.
# catalog = "${HOME}/.config/studysense/catalog"

# Override reasoning and tip text.
# phrasebook = "phrases.toml"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn resolve_env_vars_basic() {
        let lookup = env(&[("DATA", "/srv/data")]);
        assert_eq!(resolve_env_vars("${DATA}", &lookup), "/srv/data");
        assert_eq!(
            resolve_env_vars("${DATA}/catalog/${MISSING}x", &lookup),
            "/srv/data/catalog/x"
        );
        assert_eq!(resolve_env_vars("plain ${unterminated", &lookup), "plain ${unterminated");
    }

    #[test]
    fn default_config() {
        let config = StudysenseConfig::default();
        assert_eq!(config.limit, 5);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(!config.strict);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn starter_config_parses_to_defaults() {
        let config = StudysenseConfig::from_toml_str(STARTER_CONFIG).unwrap();
        assert_eq!(config, StudysenseConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let config = StudysenseConfig::from_toml_str(
            "limit = 3\nformat = \"json\"\nstrict = true\ncatalog = \"techniques.toml\"\n",
        )
        .unwrap();
        assert_eq!(config.limit, 3);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.strict);
        assert_eq!(config.catalog, Some(PathBuf::from("techniques.toml")));
    }

    #[test]
    fn unknown_keys_and_formats_fail() {
        assert!(StudysenseConfig::from_toml_str("limmit = 3\n").is_err());
        assert!(StudysenseConfig::from_toml_str("format = \"xml\"\n").is_err());
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn env_overrides_and_resolution() {
        let mut config =
            StudysenseConfig::from_toml_str("phrasebook = \"${HOME}/phrases.toml\"\n").unwrap();
        config
            .apply_env(env(&[
                ("HOME", "/home/ana"),
                ("STUDYSENSE_LIMIT", "8"),
                ("STUDYSENSE_CATALOG", "${HOME}/catalog"),
            ]))
            .unwrap();
        assert_eq!(config.limit, 8);
        assert_eq!(config.catalog, Some(PathBuf::from("/home/ana/catalog")));
        assert_eq!(config.phrasebook, Some(PathBuf::from("/home/ana/phrases.toml")));

        let mut config = StudysenseConfig::default();
        let err = config
            .apply_env(env(&[("STUDYSENSE_LIMIT", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/studysense.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "limit = 2\nstrict = true\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.strict);
    }
}
