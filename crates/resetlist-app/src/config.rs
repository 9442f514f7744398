//! Configuration: the reset catalog and HTTP authentication.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use resetlist_core::recur::{Interval, Recurrence};
use serde::Deserialize;

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Reset catalog offered to new todos.
    #[serde(default = "builtin_resets")]
    pub resets: Vec<Recurrence>,
    /// HTTP authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resets: builtin_resets(),
            auth: AuthConfig::default(),
        }
    }
}

/// Session-cookie authentication settings for the HTTP API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret expected in the `session` cookie. Unset disables the
    /// check entirely.
    #[serde(default)]
    pub session_token: Option<String>,
    /// Actor recorded on events written through the HTTP API.
    #[serde(default)]
    pub user: Option<String>,
}

impl Config {
    /// Load configuration from `path`. A missing file yields the defaults,
    /// including the builtin reset catalog.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve a catalog entry by display name.
    #[must_use]
    pub fn reset(&self, name: &str) -> Option<&Recurrence> {
        self.resets.iter().find(|reset| reset.name == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for reset in &self.resets {
            if reset.name.trim().is_empty() {
                bail!("reset catalog entries must have a non-empty name");
            }
            if !seen.insert(reset.name.as_str()) {
                bail!("duplicate reset catalog entry: {}", reset.name);
            }
        }
        Ok(())
    }
}

/// The shipped reset catalog.
fn builtin_resets() -> Vec<Recurrence> {
    vec![
        Recurrence {
            name: "Weekly reset".into(),
            interval: Interval::Weekly,
            hour_offset: 32,
        },
        Recurrence {
            name: "Duty reset".into(),
            interval: Interval::Daily,
            hour_offset: 15,
        },
        Recurrence {
            name: "GC Supply reset".into(),
            interval: Interval::Daily,
            hour_offset: 20,
        },
        Recurrence {
            name: "Jumbo Cactpot reset".into(),
            interval: Interval::Weekly,
            hour_offset: 139,
        },
        Recurrence {
            name: "Island Sanctuary reset".into(),
            interval: Interval::Daily,
            hour_offset: 8,
        },
    ]
}
