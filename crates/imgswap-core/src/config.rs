use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Transport settings for the GET issued on a cache miss (optional `[fetch]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit, libcurl default).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Optional `User-Agent` header value.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirects: default_max_redirects(),
            user_agent: None,
        }
    }
}

fn default_max_redirects() -> u32 {
    10
}

/// Global configuration loaded from `~/.config/imgswap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgswapConfig {
    /// Pause before every network fetch, in milliseconds. Ledger hits never sleep.
    pub fetch_delay_ms: u64,
    /// Name of the media directory, relative to the output document.
    pub media_dir_name: String,
    /// Optional transport settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for ImgswapConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 250,
            media_dir_name: "imgswap_media".to_string(),
            fetch: None,
        }
    }
}

impl ImgswapConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgswap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgswapConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgswapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ImgswapConfig = toml::from_str(&data)?;
    Ok(cfg)
}
