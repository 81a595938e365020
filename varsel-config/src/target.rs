//! Report target configuration.
//!
//! Identifies which service/host the passive-check reports are filed under
//! at the monitoring endpoint.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Target identity parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TargetConfig {
    /// Service or host identity the reports are attributed to.
    #[validate(custom(function = validation::validate_identity))]
    #[serde(default = "default_identity")]
    pub identity: String,
}

fn default_identity() -> String {
    "varsel".into()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}
