#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid update spec '{spec}': expected L:R:VAL (e.g. 1:3:2)")]
    InvalidUpdateSpec { spec: String },

    #[error("invalid integer '{token}' in {context}")]
    InvalidInteger { token: String, context: &'static str },

    #[error(transparent)]
    Engine(#[from] deltaviz_core::EngineError),
}
