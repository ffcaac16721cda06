use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input file not found or unreadable: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No <script> element found in {}", path.display())]
    MissingScriptElement { path: PathBuf },

    #[error("Array literal(s) not found in script: {}", missing.join(", "))]
    MissingArrayLiteral { missing: Vec<String> },

    #[error("Invalid JSON for '{variable}' after normalization: {source}")]
    JsonDecodeError {
        variable: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected error: {message}")]
    UnexpectedError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Extraction,
    Decoding,
    Config,
    Unexpected,
}

impl ConvertError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::Input,
            Self::MissingScriptElement { .. } | Self::MissingArrayLiteral { .. } => {
                ErrorCategory::Extraction
            }
            Self::JsonDecodeError { .. } => ErrorCategory::Decoding,
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Config,
            Self::UnexpectedError { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Short message meant for the console, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { path, .. } => {
                format!("The file {} was not found.", path.display())
            }
            Self::MissingScriptElement { .. } => {
                "No <script> tag was found in the HTML file.".to_string()
            }
            Self::MissingArrayLiteral { missing } => format!(
                "Could not find the array(s) {} in the script.",
                missing
                    .iter()
                    .map(|name| format!("'{}'", name))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::JsonDecodeError { variable, source } => format!(
                "Failed to parse '{}' as JSON, the data format in the script may be invalid: {}",
                variable, source
            ),
            Self::UnexpectedError { message } => {
                format!("An unexpected error occurred: {}", message)
            }
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid configuration value for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "Check the input path and that the file is readable",
            Self::MissingScriptElement { .. } => {
                "Make sure the data is embedded in an inline <script> element"
            }
            Self::MissingArrayLiteral { .. } => {
                "The first <script> must declare `let comptes = [...];`, `let tiers = [...];` and `let ecritures = [...];`"
            }
            Self::JsonDecodeError { .. } => {
                "Check the literal for trailing commas or unsupported JavaScript syntax, or try --scan balanced"
            }
            Self::UnexpectedError { .. } => "Check permissions on the output location and retry",
            Self::ConfigError { .. } => "Make sure the config file exists and is valid TOML",
            Self::InvalidConfigValue { .. } => "Fix the reported field in the CLI arguments or config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
