use crate::config::FetchConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Each flag that is given overrides the config file,
/// which in turn overrides the built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "batch-fetch")]
#[command(about = "Fan out paginated listing requests through a local fetch proxy")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Proxy endpoint receiving the GET requests
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Query parameter that carries the target URL
    #[arg(long)]
    pub query_param: Option<String>,

    /// Target URL template; `{page}` is replaced by the page index
    #[arg(long)]
    pub target_template: Option<String>,

    #[arg(long)]
    pub first_page: Option<u32>,

    #[arg(long)]
    pub last_page: Option<u32>,

    /// Maximum number of requests in flight
    #[arg(long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn resolve(&self) -> Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                FetchConfig::from_file(path)?
            }
            None => FetchConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(query_param) = &self.query_param {
            config.query_param = query_param.clone();
        }
        if let Some(template) = &self.target_template {
            config.target_template = template.clone();
        }
        if let Some(first_page) = self.first_page {
            config.first_page = first_page;
        }
        if let Some(last_page) = self.last_page {
            config.last_page = last_page;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.timeout_seconds.is_some() {
            config.timeout_seconds = self.timeout_seconds;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = CliArgs::parse_from(["batch-fetch"]);
        assert_eq!(args.resolve().unwrap(), FetchConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = CliArgs::parse_from([
            "batch-fetch",
            "--endpoint",
            "http://127.0.0.1:9000/request",
            "--last-page",
            "10",
            "--workers",
            "3",
            "--timeout-seconds",
            "5",
            "-v",
        ]);

        let config = args.resolve().unwrap();
        assert!(args.verbose);
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/request");
        assert_eq!(config.page_count(), 10);
        assert_eq!(config.workers, 3);
        assert_eq!(config.timeout_seconds, Some(5));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[batch]\nworkers = 8\nlast_page = 20\n")
            .unwrap();

        let args = CliArgs::parse_from([
            "batch-fetch".to_string(),
            "--config".to_string(),
            temp_file.path().display().to_string(),
            "--workers".to_string(),
            "2".to_string(),
        ]);

        let config = args.resolve().unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.last_page, 20);
    }
}
