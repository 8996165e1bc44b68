use anyhow::{Context, Result, bail};
use sentrykit::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::ConnectionArgs;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("sentry-converge"))
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(path).with_context(|| format!("Could not expand path {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Connection settings, layered from file, environment and flags
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub host: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from an explicit file, or from the default location if it exists
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (expand_path(p)?, true),
            None => (config_dir()?.join("config.toml"), false),
        };

        if !path.exists() {
            if required {
                bail!("Settings file not found: {}", path.display());
            }
            log::debug!("no settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Parse settings from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay command-line and environment values on top of file values
    pub fn merge(self, args: &ConnectionArgs) -> Self {
        Self {
            host: args.host.clone().or(self.host),
            token: args.token.clone().or(self.token),
            timeout_secs: args.timeout.or(self.timeout_secs),
        }
    }

    /// Build the client configuration, failing if host or token is missing
    pub fn client_config(&self) -> Result<ClientConfig> {
        let host = match self.host.as_deref() {
            Some(h) if !h.trim().is_empty() => h,
            _ => bail!("No Sentry host configured (use --host or SENTRY_HOST)"),
        };
        let token = match self.token.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => bail!("No Sentry token configured (use --token or SENTRY_TOKEN)"),
        };

        let mut config = ClientConfig::new(host, token);
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                bail!("Timeout must be at least one second");
            }
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
