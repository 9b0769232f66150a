use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::url::parse_http_link;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_links(&config.links)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and 120, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.request_timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed request_timeout_secs ({})",
            config.connect_timeout_secs, config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.metadata_path.is_empty() {
        return Err(ConfigError::Validation(
            "metadata_path cannot be empty".to_string(),
        ));
    }

    if config.metadata_path == config.database_path {
        return Err(ConfigError::Validation(
            "metadata_path and database_path must differ".to_string(),
        ));
    }

    Ok(())
}

/// Validates configured links
///
/// Only the URL shape is checked here. Whether a link can be classified is
/// decided when the step runs.
fn validate_links(links: &[String]) -> Result<(), ConfigError> {
    for link in links {
        parse_http_link(link)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid link '{}': {}", link, e)))?;
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| {
        ConfigError::Validation(format!("Invalid email format: '{}'", email))
    })?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_validate_crawler_timeouts() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.request_timeout_secs = 0;
        assert!(validate_crawler_config(&config).is_err());

        config.request_timeout_secs = 301;
        assert!(validate_crawler_config(&config).is_err());

        config.request_timeout_secs = 5;
        config.connect_timeout_secs = 10;
        assert!(validate_crawler_config(&config).is_err());

        config.connect_timeout_secs = 5;
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_validate_user_agent() {
        assert!(validate_user_agent_config(&user_agent()).is_ok());

        let mut config = user_agent();
        config.crawler_name = "Bad Name".to_string();
        assert!(validate_user_agent_config(&config).is_err());

        let mut config = user_agent();
        config.contact_url = "nope".to_string();
        assert!(matches!(
            validate_user_agent_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_output() {
        let config = OutputConfig {
            database_path: "a.db".to_string(),
            metadata_path: "a.db".to_string(),
        };
        assert!(validate_output_config(&config).is_err());

        let config = OutputConfig {
            database_path: "a.db".to_string(),
            metadata_path: "meta.json".to_string(),
        };
        assert!(validate_output_config(&config).is_ok());
    }

    #[test]
    fn test_validate_links() {
        assert!(validate_links(&[]).is_ok());
        assert!(validate_links(&["https://site.com/unknown-page/".to_string()]).is_ok());
        assert!(validate_links(&["site.com/about/".to_string()]).is_err());
        assert!(validate_links(&["mailto:a@site.com".to_string()]).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }
}
