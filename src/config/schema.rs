use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CrawlConfig {
    /// Page the crawl starts from.
    #[serde(default)]
    #[validate(url)]
    pub start_url: String,

    /// Maximum link-hop depth; 1 means the start page only.
    #[serde(default = "default_max_depth")]
    #[validate(range(min = 1))]
    pub max_depth: usize,

    /// User-Agent header sent with each request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            max_depth: default_max_depth(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_max_depth() -> usize {
    2
}

fn default_user_agent() -> String {
    "crawl-cli/0.1".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: CrawlConfig = toml::from_str("start_url = \"https://example.com/\"").unwrap();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.user_agent, "crawl-cli/0.1");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn validation_rejects_a_bad_start_url() {
        let config = CrawlConfig {
            start_url: "not a url".to_string(),
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_a_zero_depth() {
        let config = CrawlConfig {
            start_url: "https://example.com/".to_string(),
            max_depth: 0,
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
