//! # Varsel Configuration System
//!
//! Hierarchical configuration for the varsel passive-check reporter.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth across all components
//! - **Validation**: Startup-fatal validation of reporting parameters,
//!   before any timer is armed
//! - **Environment Awareness**: `VARSEL_ENV` selects an override file and
//!   `VARSEL_*` variables win over everything on disk

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod reporting;
mod target;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use reporting::ReportingConfig;
pub use target::TargetConfig;
pub use telemetry::{MetricsConfig, TelemetryConfig, TracingConfig};

/// Top-level configuration container for all varsel components.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct VarselConfig {
    /// Reporting cadence, escalation and recovery parameters.
    #[validate(nested)]
    pub reporting: ReportingConfig,

    /// Identity the reports are filed under.
    #[validate(nested)]
    pub target: TargetConfig,

    /// Telemetry and observability configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl VarselConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/varsel.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `VARSEL_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Start with defaults.
        let mut figment = Figment::from(Serialized::defaults(VarselConfig::default()));

        if Path::new("config/varsel.yaml").exists() {
            figment = figment.merge(Yaml::file("config/varsel.yaml"));
        }

        let env = std::env::var("VARSEL_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("VARSEL_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(VarselConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("VARSEL_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = VarselConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        // Override a field via environment variable.
        std::env::set_var("VARSEL_REPORTING__MESSAGE_INTERVAL_SECS", "120");
        let config = VarselConfig::load().unwrap();
        assert_eq!(config.reporting.message_interval_secs, 120);
        std::env::remove_var("VARSEL_REPORTING__MESSAGE_INTERVAL_SECS");
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            VarselConfig::load_from_path("config/does-not-exist.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
