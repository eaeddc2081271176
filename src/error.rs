//! Engine error taxonomy.
//!
//! Every error is a local logic error: the engine performs no I/O, so nothing
//! here is transient or worth retrying. Callers translate these into
//! user-facing messages.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Seed is not a 64 character hex string
    #[error("invalid hash: {0}")]
    InvalidHash(String),
    /// Draw requested with an empty range
    #[error("invalid range: modulus must be at least 1, got {0}")]
    InvalidRange(u32),
    /// Attribute table is empty or misconfigured
    #[error("generation error: {0}")]
    Generation(String),
    /// Breeding called with an incomplete or unusable parent record
    #[error("ineligible parents: {0}")]
    IneligibleParents(String),
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::InvalidHash("zz".into());
        assert_eq!(err.to_string(), "invalid hash: zz");

        let err = EngineError::InvalidRange(0);
        assert!(err.to_string().contains("at least 1"));
    }
}
