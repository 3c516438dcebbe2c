use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Price-sync API origin, without the `/api` suffix
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

/// Built dashboard served for every path no route matches
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StaticFilesConfig {
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_health_timeout_secs() -> u64 {
    5
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[upstream]
api_url = "http://localhost:8000"
timeout_secs = 10
health_timeout_secs = 5

[static_files]
dir = "dist"
"#;

impl Config {
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", addr, e))
    }

    pub fn api_url(&self) -> &str {
        self.upstream.api_url.trim_end_matches('/')
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.health_timeout_secs)
    }

    /// Static directory resolved against the executable directory;
    /// `None` when it is not configured or does not exist
    pub fn static_dir(&self) -> Option<PathBuf> {
        let dir = self.static_files.dir.as_deref()?;
        let path = Path::new(dir);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|d| d.join(path)))
                .unwrap_or_else(|| path.to_path_buf())
        };
        resolved.is_dir().then_some(resolved)
    }

    /// `API_URL`, `GATEWAY_HOST`, `GATEWAY_PORT` win over the file
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("API_URL").filter(|v| !v.trim().is_empty()) {
            self.upstream.api_url = url;
        }
        if let Some(host) = lookup("GATEWAY_HOST").filter(|v| !v.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid GATEWAY_PORT {:?}: {}", port, e))?;
        }
        Ok(())
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment overrides are applied on top in both cases.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Ok(toml::from_str(&contents)?);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

#[cfg(test)]
pub(crate) fn test_config(api_url: &str) -> Config {
    let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
    config.upstream.api_url = api_url.to_string();
    config.static_files.dir = None;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api_url(), "http://localhost:8000");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.health_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_optional_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [upstream]
            api_url = "http://api:8000/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url(), "http://api:8000");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.static_files.dir.is_none());
        assert!(config.static_dir().is_none());
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("API_URL", "http://backend:9000"), ("GATEWAY_PORT", "4000")]
            .into_iter()
            .collect();
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        config
            .apply_env_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_url(), "http://backend:9000");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_bad_port_override_fails() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let result = config.apply_env_overrides(|k| (k == "GATEWAY_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }
}
