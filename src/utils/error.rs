use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Environment variable '{name}' is not set")]
    MissingEnvVarError { name: String },
}

impl FetchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            FetchError::HttpClientError(_) => "Could not set up the HTTP client".to_string(),
            FetchError::IoError(e) => format!("Could not read a file: {}", e),
            FetchError::UrlError(e) => format!("The proxy endpoint is not a valid URL: {}", e),
            FetchError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            FetchError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has an invalid value '{}': {}", field, value, reason),
            FetchError::MissingEnvVarError { name } => {
                format!("The configuration refers to ${{{}}}, which is not set", name)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchError::HttpClientError(_) => "Check the TLS setup and the timeout setting",
            FetchError::IoError(_) => "Make sure the configuration file exists and is readable",
            FetchError::UrlError(_) => "Use a full URL such as http://localhost:5000/request",
            FetchError::ConfigValidationError { .. } => "Fix the TOML syntax in the configuration file",
            FetchError::InvalidConfigValueError { .. } => {
                "Correct the value on the command line or in the configuration file"
            }
            FetchError::MissingEnvVarError { .. } => {
                "Export the variable or remove the placeholder from the configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
