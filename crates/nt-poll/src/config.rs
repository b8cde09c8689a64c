//! YAML poll configuration files.

use std::path::{Path, PathBuf};

use nt_query::QueryParams;
use serde::{Deserialize, Serialize};

use crate::error::{PollError, PollResult};

pub const CONFIG_VERSION: u32 = 1;

/// A saved polling setup.
///
/// `frames` lists recorded result files for offline replay; relative paths
/// resolve against the config file's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub params: QueryParams,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<PathBuf>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl PollConfig {
    pub fn new(params: QueryParams) -> Self {
        Self {
            version: CONFIG_VERSION,
            name: None,
            params,
            frames: Vec::new(),
        }
    }

    pub fn validate(&self) -> PollResult<()> {
        if self.version != CONFIG_VERSION {
            return Err(PollError::Config {
                what: format!(
                    "unsupported config version {} (expected {CONFIG_VERSION})",
                    self.version
                ),
            });
        }
        self.params.validate()?;
        Ok(())
    }

    /// Frame paths with relative entries joined onto `base`.
    pub fn frame_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.frames
            .iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p.clone() })
            .collect()
    }
}

pub fn load_config(path: &Path) -> PollResult<PollConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: PollConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    tracing::debug!(path = %path.display(), name = ?config.name, "loaded poll config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &PollConfig) -> PollResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_query::{AccountId, DataSource};

    #[test]
    fn parses_minimal_config() {
        let yaml = "params:\n  account_id: 42\n  source: ipfix\n";
        let config: PollConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.params.account_id, Some(AccountId(42)));
        assert_eq!(config.params.source, DataSource::Ipfix);
        assert!(config.frames.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_version() {
        let mut config = PollConfig::new(QueryParams::for_account(AccountId(1), DataSource::Sflow));
        config.version = 9;
        assert!(matches!(config.validate(), Err(PollError::Config { .. })));
    }

    #[test]
    fn rejects_missing_account() {
        let config = PollConfig::new(QueryParams::default());
        assert!(matches!(config.validate(), Err(PollError::Params(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("nt-poll-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("poll.yaml");

        let mut config = PollConfig::new(QueryParams::for_account(AccountId(3), DataSource::Sflow));
        config.name = Some("core links".into());
        config.frames = vec!["frame-1.json".into()];
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.frame_paths(&dir), vec![dir.join("frame-1.json")]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
