//! Shared domain types and configuration for the monthly update digest.

pub mod app_config;
pub mod config;
pub mod rules;
pub mod update;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use rules::{load_rules, parse_rules, KeywordGroup, ReportRules, RulesFile};
pub use update::{ReportWindow, Update, MAX_LOOKBACK_DAYS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
