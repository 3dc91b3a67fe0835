use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top-level runtime configuration, loadable from TOML. Every field has a
/// working default so an absent or empty file is a valid configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retry: Retry,
}

/// Reconnect policy for the event stream. The stream is reopened after
/// every transport or decode failure; `attempts` of `None` retries
/// forever, which matches a server whose streams drop routinely. The cap
/// exists so a permanently broken game can be configured to die instead
/// of looping in the dark.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Retry {
    pub attempts: Option<u32>,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            attempts: None,
            min_delay_ms: 1_000,
            max_delay_ms: 60_000,
        }
    }
}

impl Config {
    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let config = toml::from_str::<Self>(&text)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.retry.validate()
    }
}

impl Retry {
    fn validate(&self) -> anyhow::Result<()> {
        if self.attempts == Some(0) {
            anyhow::bail!("retry.attempts must be at least 1 when set");
        }
        if self.min_delay_ms == 0 {
            anyhow::bail!("retry.min_delay_ms must be nonzero");
        }
        if self.min_delay_ms > self.max_delay_ms {
            anyhow::bail!("retry.min_delay_ms must not exceed retry.max_delay_ms");
        }
        Ok(())
    }

    /// Backoff before the given 1-based reconnect attempt: doubles from
    /// `min_delay_ms` until capped at `max_delay_ms`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        let ms = self
            .min_delay_ms
            .saturating_mul(1 << doublings)
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }
}
