use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use validator::Validate;

use crate::config::schema::CrawlConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and validates a config file, picking the parser from the file
    /// extension (json, yaml/yml or toml).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CrawlConfig> {
        let path = path.as_ref();
        let config = Self::load_file(path)?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<CrawlConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config: CrawlConfig = serde_json::from_str(&content)?;
                Ok(config)
            }
            Some("yaml") | Some("yml") => {
                let config: CrawlConfig = serde_yaml::from_str(&content)?;
                Ok(config)
            }
            Some("toml") => {
                let config: CrawlConfig = toml::from_str(&content)?;
                Ok(config)
            }
            _ => anyhow::bail!("Unsupported config file extension: {}", path.display()),
        }
    }
}
