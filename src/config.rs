use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub use_json: bool,
    /// "hourly", "daily", or "never"
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "challenge_gate.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Challenge issuance and verification settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// Domain stamped into issued challenges.
    pub domain: String,
    /// Human-readable statement shown to the signer.
    pub statement: String,
    /// Resource URI the challenge grants access to.
    pub resource: String,
    /// Deployment scope stamped into issued challenges.
    pub scope_id: u64,
    /// Challenge validity window in seconds.
    pub challenge_ttl_secs: u64,
    /// When true, reject challenges whose scope_id differs from
    /// `scope_id` above.
    pub enforce_scope: bool,
    /// Success-event broadcast channel capacity.
    pub event_capacity: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
            statement: "Sign this challenge to authenticate".to_string(),
            resource: "http://localhost/".to_string(),
            scope_id: 1,
            challenge_ttl_secs: crate::auth::DEFAULT_TTL_SECS,
            enforce_scope: false,
            event_capacity: crate::auth::DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "gateway:\n  host: 127.0.0.1\n  port: 8080\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.log.level, "info");
        assert!(!config.auth.enforce_scope);
        assert_eq!(config.auth.challenge_ttl_secs, 300);
    }

    #[test]
    fn full_yaml_round_trips() {
        let yaml = r#"
log:
  level: debug
  dir: /var/log/challenge_gate
  file: gate.log
  use_json: true
  rotation: hourly
gateway:
  host: 0.0.0.0
  port: 9000
auth:
  domain: example.com
  statement: Sign in to Example
  resource: https://example.com/login
  scope_id: 31337
  challenge_ttl_secs: 120
  enforce_scope: true
  event_capacity: 64
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log.rotation, "hourly");
        assert!(config.log.use_json);
        assert_eq!(config.auth.domain, "example.com");
        assert_eq!(config.auth.scope_id, 31337);
        assert!(config.auth.enforce_scope);
        assert_eq!(config.auth.event_capacity, 64);
    }
}
