//! Configuration management for the automerger
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (AUTOMERGER_*)
//! 3. Config file (~/.config/automerger/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API root; `https://<host>/api/v3` for GitHub Enterprise
    pub api_url: String,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "automerger".to_string(),
        }
    }
}

impl GitHubConfig {
    /// The API root as a URL
    pub fn api_url(&self) -> Result<Url> {
        parse_api_url(&self.api_url)
    }
}

/// Workflow behavior switches
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Report an existing pull request that still cannot be merged with
    /// exit code 0 and without assigning it
    pub legacy_existing_conflict: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubConfig,

    /// Workflow configuration
    pub workflow: WorkflowConfig,
}

/// Values supplied on the command line; `None` leaves the lower layer alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--timeout`
    pub timeout: Option<Duration>,
    /// `--legacy-existing-conflict`
    pub legacy_existing_conflict: bool,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/automerger/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("automerger").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - AUTOMERGER_API_URL: API root URL
    /// - AUTOMERGER_TIMEOUT: request timeout, e.g. `30s`
    /// - AUTOMERGER_LEGACY_EXISTING_CONFLICT: `true`/`1` to enable
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = var("AUTOMERGER_API_URL") {
            self.github.api_url = parse_api_url(&url)?.to_string();
        }

        if let Some(timeout) = var("AUTOMERGER_TIMEOUT") {
            self.github.timeout = humantime::parse_duration(&timeout)
                .map_err(|e| Error::Config(format!("Invalid AUTOMERGER_TIMEOUT: {}", e)))?;
        }

        if let Some(flag) = var("AUTOMERGER_LEGACY_EXISTING_CONFLICT") {
            self.workflow.legacy_existing_conflict =
                matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Result<Self> {
        if let Some(url) = overrides.api_url {
            self.github.api_url = parse_api_url(&url)?.to_string();
        }

        if let Some(timeout) = overrides.timeout {
            self.github.timeout = timeout;
        }

        if overrides.legacy_existing_conflict {
            self.workflow.legacy_existing_conflict = true;
        }

        Ok(self)
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(path: Option<&Path>, overrides: CliOverrides) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        base.with_env_overrides()?.with_cli_overrides(overrides)
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("API URL {} cannot be used as a base", raw)));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(
            config.github.api_url().unwrap().as_str(),
            "https://api.github.com/"
        );
        assert_eq!(config.github.timeout, Duration::from_secs(30));
        assert_eq!(config.github.user_agent, "automerger");
        assert!(!config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[github]
api_url = "https://ghe.example.com/api/v3"
timeout = "10s"
user_agent = "ci-merger"

[workflow]
legacy_existing_conflict = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.timeout, Duration::from_secs(10));
        assert_eq!(config.github.user_agent, "ci-merger");
        assert!(config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[github]
timeout = "1m"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.timeout, Duration::from_secs(60));
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert!(!config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[workflow]\nlegacy_existing_conflict = true").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert!(config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github]\ntimeout = 5").unwrap();

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("AUTOMERGER_API_URL", "http://localhost:8080"),
            ("AUTOMERGER_TIMEOUT", "5s"),
            ("AUTOMERGER_LEGACY_EXISTING_CONFLICT", "true"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.github.api_url, "http://localhost:8080/");
        assert_eq!(config.github.timeout, Duration::from_secs(5));
        assert!(config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_env_invalid_timeout() {
        let result = Config::default().with_overrides_from(|k| {
            (k == "AUTOMERGER_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default()
            .with_cli_overrides(CliOverrides {
                api_url: Some("https://ghe.example.com/api/v3".to_string()),
                timeout: Some(Duration::from_secs(3)),
                legacy_existing_conflict: true,
            })
            .unwrap();

        assert_eq!(
            config.github.api_url().unwrap().host_str(),
            Some("ghe.example.com")
        );
        assert_eq!(config.github.timeout, Duration::from_secs(3));
        assert!(config.workflow.legacy_existing_conflict);
    }

    #[test]
    fn test_file_api_url_validated_on_use() {
        let config: Config = toml::from_str("[github]\napi_url = \"nope\"").unwrap();
        assert!(matches!(config.github.api_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_rejects_bad_url() {
        let result = Config::default().with_cli_overrides(CliOverrides {
            api_url: Some("not a url".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
