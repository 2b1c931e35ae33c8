use serde::Deserialize;

use crate::error::AppError;

/// Base HTTP settings shared by every binary in the workspace. Service-specific
/// settings (database, business tunables) live with the service itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServiceConfig {
    /// Loads settings from the environment, honouring a local `.env` file when
    /// one exists. Variables use the `APP` prefix with `__` as the separator,
    /// e.g. `APP__PORT=9090`.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let config = settings.try_deserialize::<ServiceConfig>()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ServiceConfig::default();
        assert_eq!(config.address(), "0.0.0.0:8080");
    }
}
