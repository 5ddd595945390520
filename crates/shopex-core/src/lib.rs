pub mod app_config;
pub mod columns;
pub mod config;
pub mod filters;
pub mod profile;

pub use app_config::AppConfig;
pub use columns::{ColumnError, ColumnSelection, ExportColumn};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{FilterError, ProductFilters, ProductStatus, SortOrder};
pub use profile::{load_profile, parse_profile, ExportProfile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(#[from] serde_yaml::Error),

    #[error("profile validation failed: {0}")]
    Validation(String),
}
