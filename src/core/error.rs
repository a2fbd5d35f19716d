//! # Errors
//!
//! Everything in this crate that can fail is a wiring mistake by the
//! caller (bad registry, bad layout, bad key chord, bad config file) or
//! terminal I/O. Empty lists and empty search results are not errors.

use thiserror::Error;

use crate::core::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown detail key: {0}")]
    UnknownDetail(String),

    #[error("screen {0} is not in the registry")]
    UnknownScreen(String),

    #[error("flow layout requires at least one visible column")]
    NoVisibleColumn,

    #[error("invalid layout: {0}")]
    InvalidLayout(&'static str),

    #[error("invalid key binding: {0:?}")]
    InvalidKey(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
