use crate::config::FetchConfig;
use crate::utils::error::{FetchError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// On-disk layout. Every section and key is optional; anything left out keeps
/// the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub endpoint: Option<EndpointConfig>,
    pub target: Option<TargetConfig>,
    pub batch: Option<BatchConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub query_param: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchConfig {
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    pub workers: Option<usize>,
}

impl TomlConfig {
    /// Parses the TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FetchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn apply_to(self, config: &mut FetchConfig) {
        if let Some(endpoint) = self.endpoint {
            if let Some(url) = endpoint.url {
                config.endpoint = url;
            }
            if let Some(query_param) = endpoint.query_param {
                config.query_param = query_param;
            }
            if endpoint.timeout_seconds.is_some() {
                config.timeout_seconds = endpoint.timeout_seconds;
            }
        }

        if let Some(template) = self.target.and_then(|t| t.template) {
            config.target_template = template;
        }

        if let Some(batch) = self.batch {
            if let Some(first_page) = batch.first_page {
                config.first_page = first_page;
            }
            if let Some(last_page) = batch.last_page {
                config.last_page = last_page;
            }
            if let Some(workers) = batch.workers {
                config.workers = workers;
            }
        }
    }
}

impl FetchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config = FetchConfig::default();
        TomlConfig::from_toml_str(content)?.apply_to(&mut config);
        Ok(config)
    }
}

/// Replaces `${VAR}` with the variable's value. An unset variable is an error.
/// Whole-line `#` comments are copied through untouched.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FetchError::ConfigValidationError {
        field: "env_substitution".to_string(),
        message: e.to_string(),
    })?;

    let mut result = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut last = 0;
        for caps in re.captures_iter(line) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value =
                std::env::var(name.as_str()).map_err(|_| FetchError::MissingEnvVarError {
                    name: name.as_str().to_string(),
                })?;
            result.push_str(&line[last..whole.start()]);
            result.push_str(&value);
            last = whole.end();
        }
        result.push_str(&line[last..]);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[endpoint]
url = "http://127.0.0.1:8080/request"
query_param = "target"
timeout_seconds = 10

[target]
template = "https://example.com/search?page={page}"

[batch]
first_page = 5
last_page = 9
workers = 2
"#;

        let config = FetchConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:8080/request");
        assert_eq!(config.query_param, "target");
        assert_eq!(config.timeout_seconds, Some(10));
        assert_eq!(config.target_template, "https://example.com/search?page={page}");
        assert_eq!(config.first_page, 5);
        assert_eq!(config.last_page, 9);
        assert_eq!(config.workers, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_content = r#"
[batch]
last_page = 3
"#;

        let config = FetchConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.last_page, 3);
        assert_eq!(config.first_page, 1);
        assert_eq!(config.workers, 55);
        assert_eq!(config.endpoint, "http://localhost:5000/request");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = FetchConfig::from_toml_str("").unwrap();
        assert_eq!(config, FetchConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BATCH_FETCH_TEST_PROXY", "http://proxy.internal:5000/request");

        let toml_content = r#"
[endpoint]
url = "${BATCH_FETCH_TEST_PROXY}"
"#;

        let config = FetchConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.endpoint, "http://proxy.internal:5000/request");

        std::env::remove_var("BATCH_FETCH_TEST_PROXY");
    }

    #[test]
    fn test_missing_env_var_is_error() {
        let toml_content = r#"
[endpoint]
url = "${BATCH_FETCH_TEST_UNSET_VARIABLE}"
"#;

        let err = FetchConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, FetchError::MissingEnvVarError { ref name } if name == "BATCH_FETCH_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn test_commented_placeholder_is_ignored() {
        let toml_content = r#"
[endpoint]
# url = "${BATCH_FETCH_TEST_COMMENTED_OUT}"
  #query_param = "${BATCH_FETCH_TEST_COMMENTED_OUT}"
query_param = "target"
"#;

        let config = FetchConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.query_param, "target");
        assert_eq!(config.endpoint, "http://localhost:5000/request");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = FetchConfig::from_toml_str("[batch\nworkers = ").unwrap_err();
        assert!(matches!(err, FetchError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[batch]\nworkers = 8\n")
            .unwrap();

        let config = FetchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.workers, 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FetchConfig::from_file("/nonexistent/batch-fetch.toml").unwrap_err();
        assert!(matches!(err, FetchError::IoError(_)));
    }
}
