use std::path::PathBuf;

use thiserror::Error;
use tscat_i18n::CatalogError;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for malformed or unreadable catalogs.
pub const EXIT_CATALOG: i32 = 2;
/// Exit code for bad arguments or configuration (`EX_USAGE`).
pub const EXIT_USAGE: i32 = 64;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("no catalog for locale {locale} in {}", dir.display())]
    NotFound { dir: PathBuf, locale: String },

    #[error("check failed: {errors} error(s), {warnings} warning(s)")]
    CheckFailed { errors: usize, warnings: usize },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(_) | Self::Io(_) | Self::Json(_) => EXIT_CATALOG,
            Self::Config { .. } | Self::InvalidArgument { .. } => EXIT_USAGE,
            Self::NotFound { .. } | Self::CheckFailed { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
