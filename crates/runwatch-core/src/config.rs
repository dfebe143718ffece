use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest delay, cap, jitter width or floor accepted in config, in seconds.
pub const MAX_SECS: f64 = u32::MAX as f64;

/// Randomized pre-poll delay (the `[poll.delay]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Lower bound in seconds for the default random delay.
    pub min_secs: f64,
    /// Upper bound in seconds for the default random delay.
    pub max_secs: f64,
    /// Jitter half-width in seconds applied around a caller-supplied delay.
    pub jitter_width_secs: f64,
    /// Smallest jittered delay allowed, in seconds.
    pub jitter_floor_secs: f64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_secs: 1.0,
            max_secs: 10.0,
            jitter_width_secs: 1.0,
            jitter_floor_secs: 0.0,
        }
    }
}

/// Backoff curve between status checks (the `[poll.backoff]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Growth factor `g` in `1 + (attempt * g)^2`.
    pub growth: f64,
    /// Cap on the backoff upper bound, in seconds (600 = 10 minutes).
    pub max_delay_secs: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            growth: 0.6,
            max_delay_secs: 600.0,
        }
    }
}

/// Per-waiter polling parameters (the `[poll]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Unsuccessful status checks allowed per phase before giving up.
    pub max_attempts: u32,
    /// Base delay in seconds before each phase; jittered. When absent a bounded
    /// random delay (`delay.min_secs..=delay.max_secs`) is used instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_secs: Option<f64>,
    pub delay: DelayConfig,
    pub backoff: BackoffConfig,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4200,
            initial_delay_secs: None,
            delay: DelayConfig::default(),
            backoff: BackoffConfig::default(),
        }
    }
}

impl PollConfig {
    pub fn initial_delay(&self) -> Option<Duration> {
        self.initial_delay_secs.map(Duration::from_secs_f64)
    }

    /// Reject values the delay and backoff math cannot work with.
    pub fn validate(&self) -> Result<()> {
        let d = &self.delay;
        let g = self.backoff.growth;
        if !g.is_finite() || g < 0.0 {
            bail!("poll.backoff.growth must be a non-negative number, got {}", g);
        }
        let secs = [
            ("poll.delay.min_secs", Some(d.min_secs)),
            ("poll.delay.max_secs", Some(d.max_secs)),
            ("poll.delay.jitter_width_secs", Some(d.jitter_width_secs)),
            ("poll.delay.jitter_floor_secs", Some(d.jitter_floor_secs)),
            ("poll.backoff.max_delay_secs", Some(self.backoff.max_delay_secs)),
            ("poll.initial_delay_secs", self.initial_delay_secs),
        ];
        for (name, v) in secs {
            let Some(v) = v else { continue };
            if !v.is_finite() || v < 0.0 {
                bail!("{} must be a non-negative number, got {}", name, v);
            }
            if v > MAX_SECS {
                bail!("{} must be at most {} seconds, got {}", name, MAX_SECS, v);
            }
        }
        if d.min_secs > d.max_secs {
            bail!(
                "poll.delay.min_secs ({}) is greater than poll.delay.max_secs ({})",
                d.min_secs,
                d.max_secs
            );
        }
        if self.max_attempts == 0 {
            bail!("poll.max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Remote status API settings (the `[api]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the status API; run documents live under `runs/<id>`.
    pub base_url: String,
    /// Optional owner; when set, runs are fetched from `users/<owner>/runs/<id>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            owner: None,
            token_env: "RUNWATCH_TOKEN".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Bearer token from the environment, if the variable is set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Global configuration loaded from `~/.config/runwatch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("runwatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<WatchConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: WatchConfig = toml::from_str(&data)?;
    cfg.poll.validate()?;
    Ok(cfg)
}
