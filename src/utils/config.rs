use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::utils::error::{KycError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub backend: BackendConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// CORS origins for the browser wizard; empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Which verification backend answers the wizard's step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// HTTP calls to the configured verification API only.
    Real,
    /// Deterministic demo answers, no network.
    Stub,
    /// HTTP first, demo answers whenever the API is unreachable.
    Masked,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub verification: VerificationMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: usize,
}

impl Config {
    pub fn new() -> Result<Self> {
        let config = ConfigLib::builder()
            // Start with default values
            .set_default("node.host", "127.0.0.1")?
            .set_default("node.port", 8080)?
            .set_default("node.log_level", "info")?
            .set_default("backend.timeout_secs", 30)?
            .set_default("backend.verification", "masked")?
            .set_default("admin.timeout_secs", 30)?
            .set_default("admin.page_size", 10)?
            // Load from config file
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (e.g., APP_NODE_HOST)
            .add_source(Environment::with_prefix("APP").separator("_"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.node.port == 0 {
            return Err(KycError::Config("Invalid port number".into()));
        }
        if self.backend.base_url.is_empty() {
            return Err(KycError::Config("backend.base_url must be set".into()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(KycError::Config(
                "backend.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.admin.base_url.is_empty() {
            return Err(KycError::Config("admin.base_url must be set".into()));
        }
        if self.admin.page_size == 0 {
            return Err(KycError::Config("admin.page_size must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    pub fn admin_timeout(&self) -> Duration {
        Duration::from_secs(self.admin.timeout_secs)
    }
}

impl From<ConfigError> for KycError {
    fn from(error: ConfigError) -> Self {
        KycError::Config(error.to_string())
    }
}
