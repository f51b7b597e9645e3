//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(p)) => {
                debug!("No config at {}, using defaults", p);
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.docrelay`).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.debug_port, 9222);
        assert_eq!(config.store.ttl_seconds, 300);
    }

    #[test]
    fn test_load_sections() {
        let content = r#"
            settings_path = "/tmp/docrelay-settings.json"

            [browser]
            debug_port = 9333
            headless = true

            [store]
            ttl_seconds = 60

            [automation]
            submit_attempts = 4

            [platforms.claude]
            url = "https://claude.ai/new?incognito"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert!(config.browser.headless);
        assert_eq!(config.store.ttl_seconds, 60);
        assert_eq!(config.automation.submit_attempts, 4);
        assert_eq!(config.automation.submit_interval_ms, 500);
        assert_eq!(config.platforms.claude.url, "https://claude.ai/new?incognito");
        assert_eq!(config.platforms.chatgpt.url, "https://chatgpt.com/");
        assert_eq!(config.settings_path, "/tmp/docrelay-settings.json");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[capture]").unwrap();
        writeln!(file, "extra_pdf_hosts = [\"exams.example.org\"]").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.capture.extra_pdf_hosts, vec!["exams.example.org".to_string()]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test sets a unique test-only env var
        unsafe {
            std::env::set_var("DOCRELAY_TEST_PORT", "9444");
        }
        let config = ConfigLoader::load_str("[browser]\ndebug_port = ${DOCRELAY_TEST_PORT}").unwrap();
        assert_eq!(config.browser.debug_port, 9444);
        unsafe {
            std::env::remove_var("DOCRELAY_TEST_PORT");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_DOCRELAY_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("test"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/usr/local/bin"), PathBuf::from("/usr/local/bin"));
    }
}
