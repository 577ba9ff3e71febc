use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
///
/// Endpoint descriptions themselves are accepted as written; only the
/// crawler and output settings are checked.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base(&config.base)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the base URL prefix
fn validate_base(base: &str) -> Result<(), ConfigError> {
    if base.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "base must not contain whitespace, got '{}'",
            base
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_rounds < 1 {
        return Err(ConfigError::Validation(format!(
            "max_rounds must be >= 1, got {}",
            config.max_rounds
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if !config.extension.starts_with('.') || config.extension.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "extension must start with '.' and name a suffix, got '{}'",
            config.extension
        )));
    }

    if config.extension.contains('/') {
        return Err(ConfigError::Validation(format!(
            "extension must not contain '/', got '{}'",
            config.extension
        )));
    }

    Ok(())
}
