//! Error types for ising-sim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid lattice size {0}, expected >= 1")]
    InvalidSize(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("statistics window is empty")]
    EmptyWindow,
}

impl From<validator::ValidationErrors> for SimError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidParameter(format!("{errors}"))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
