use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum MrssError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("UI state lock poisoned")]
    StatePoisoned,
}

impl MrssError {
    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MrssError::Config(_) => 1,
            _ => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, MrssError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = MrssError::from(ConfigError::NoConfigDir);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_terminal_errors_exit_with_two() {
        let err = MrssError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Terminal error"));
    }
}
