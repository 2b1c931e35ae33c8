//! Configuration module for erp-service.

use chrono::NaiveTime;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ErpConfig {
    pub common: core_config::ServiceConfig,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub business: BusinessConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Business-rule tunables. Defaults match the established office rules:
/// workday opens at 08:00 with no grace, an item is low on stock at 20% of
/// its base quantity, and project deadlines raise an alert a week out.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub workday_start: NaiveTime,
    pub late_grace_minutes: u32,
    pub low_stock_percent: u32,
    pub deadline_window_days: i64,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            workday_start: default_workday_start(),
            late_grace_minutes: 0,
            low_stock_percent: 20,
            deadline_window_days: 7,
        }
    }
}

fn default_workday_start() -> NaiveTime {
    // 08:00 is a valid time of day.
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl ErpConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::ServiceConfig::load()?;

        let workday_start = match env::var("ERP_WORKDAY_START") {
            Ok(raw) => NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|_| {
                AppError::ConfigError(anyhow::anyhow!(
                    "ERP_WORKDAY_START must be HH:MM, got '{}'",
                    raw
                ))
            })?,
            Err(_) => default_workday_start(),
        };

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "erp-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            },
            business: BusinessConfig {
                workday_start,
                late_grace_minutes: env::var("ERP_LATE_GRACE_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
                low_stock_percent: env::var("ERP_LOW_STOCK_PERCENT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(20),
                deadline_window_days: env::var("ERP_DEADLINE_WINDOW_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(7),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_defaults() {
        let business = BusinessConfig::default();
        assert_eq!(business.workday_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(business.late_grace_minutes, 0);
        assert_eq!(business.low_stock_percent, 20);
        assert_eq!(business.deadline_window_days, 7);
    }
}
