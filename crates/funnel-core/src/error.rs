//! Error Types

use thiserror::Error;

/// Result type alias for funnel operations
pub type Result<T> = std::result::Result<T, FunnelError>;

/// Lead funnel errors
#[derive(Error, Debug)]
pub enum FunnelError {
    /// Sector value outside the fixed option set
    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    /// Relay could not be reached
    #[error("Transport error: {0}")]
    Transport(String),
}

impl FunnelError {
    /// Message suitable for the form's general error slot
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownSector(_) => "Please pick a sector from the list.".into(),
            Self::Transport(_) => "Unable to process the request.".into(),
        }
    }
}
