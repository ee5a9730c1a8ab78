// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Client identity announced to SubDB. Only applied when all three parts are set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdentityConfig {
    pub client_name: Option<String>,
    pub client_version: Option<String>,
    pub client_url: Option<String>,
}

impl IdentityConfig {
    /// Name, version and URL, if the identity is fully configured.
    pub fn parts(&self) -> Option<(&str, &str, &str)> {
        match (&self.client_name, &self.client_version, &self.client_url) {
            (Some(name), Some(version), Some(url)) => {
                Some((name.as_str(), version.as_str(), url.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Base URL for lookups (languages, search, download).
    pub read_base_url: String,
    /// Base URL for uploads.
    pub upload_base_url: String,
}

// Reads default to the sandbox and uploads to production. Confirm with the
// service owner before changing either default.
impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            read_base_url: "http://sandbox.thesubdb.com".to_string(),
            upload_base_url: "http://api.thesubdb.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub read_timeout_secs: u64,
    pub upload_timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            read_timeout_secs: 5,
            upload_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub identity: IdentityConfig,
    pub endpoints: EndpointsConfig,
    pub http: HttpConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: SUBDB_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("SUBDB_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load(None).map_err(|e| e.to_string())?;

            assert!(config.identity.parts().is_none());
            assert_eq!(config.endpoints.read_base_url, "http://sandbox.thesubdb.com");
            assert_eq!(config.endpoints.upload_base_url, "http://api.thesubdb.com");
            assert_eq!(config.http.read_timeout(), Duration::from_secs(5));
            assert_eq!(config.http.upload_timeout(), None);
            assert_eq!(config.telemetry.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "subdb.toml",
                r#"
                [identity]
                client_name = "MyPlayer"
                client_version = "2.1"
                client_url = "https://player.example.org"

                [endpoints]
                read_base_url = "http://api.thesubdb.com"

                [http]
                upload_timeout_secs = 30
                "#,
            )?;

            let config = load(Some(Path::new("subdb.toml"))).map_err(|e| e.to_string())?;

            assert_eq!(
                config.identity.parts(),
                Some(("MyPlayer", "2.1", "https://player.example.org"))
            );
            assert_eq!(config.endpoints.read_base_url, "http://api.thesubdb.com");
            assert_eq!(config.endpoints.upload_base_url, "http://api.thesubdb.com");
            assert_eq!(config.http.upload_timeout(), Some(Duration::from_secs(30)));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "subdb.toml",
                r#"
                [http]
                read_timeout_secs = 10
                "#,
            )?;
            jail.set_env("SUBDB_HTTP__READ_TIMEOUT_SECS", "2");
            jail.set_env("SUBDB_IDENTITY__CLIENT_NAME", "EnvPlayer");

            let config = load(Some(Path::new("subdb.toml"))).map_err(|e| e.to_string())?;

            assert_eq!(config.http.read_timeout_secs, 2);
            assert_eq!(
                config.identity.client_name.as_deref(),
                Some("EnvPlayer")
            );
            // Partial identity is not usable
            assert!(config.identity.parts().is_none());
            Ok(())
        });
    }
}
