use thiserror::Error;

/// Failures surfaced by the simulation or one of its collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// The display rejected a draw call or the frame commit
    #[error("display failed: {0}")]
    Display(String),

    /// The button reader could not produce a snapshot
    #[error("button input failed: {0}")]
    Input(String),

    /// A fixed constant would break a simulation invariant
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: &'static str) -> Self {
        Error::InvalidConfig { field, reason }
    }
}
