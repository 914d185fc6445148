use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};

/// CLI configuration at ~/.config/leitura/config.toml
///
/// Without a `[remote]` section the tracker runs in guest mode:
/// everything stays on this device.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Signed-in account id; set by `leitura login`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Generated guest id, persisted so guest progress survives restarts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the PostgREST-style API, e.g. a Supabase project URL.
    pub url: String,
    pub api_key: String,
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("leitura");
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl CliConfig {
    /// Load the config, defaulting everything when the file is absent.
    pub fn load() -> Result<Self> {
        let path = config_path()?;

        let config: CliConfig = Config::builder()
            .add_source(File::from(path.clone()).required(false))
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}
