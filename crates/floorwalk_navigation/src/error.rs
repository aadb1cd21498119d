//! Ошибки навигации
//!
//! Miss (клик мимо всех targets) и tick в Idle - это НЕ ошибки, это outcomes.
//! Здесь только то, что реально может сломаться: config и загрузка layout.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid navigator config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    #[error("layout parse failed: {0}")]
    LayoutParse(#[from] serde_json::Error),
    #[error("layout file {path} unreadable: {source}")]
    LayoutIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type NavigationResult<T> = Result<T, NavigationError>;

impl NavigationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        NavigationError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
