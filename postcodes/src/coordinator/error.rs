//! Lookup error types.

use std::sync::Arc;

use crate::domain::{IllegalDistance, IllegalPoint, InvalidNumber};
use crate::transport::TransportError;

/// Errors returned by [`PostCoder`](super::PostCoder) lookups.
///
/// Validation errors are raised before the cache or the network is touched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// A numeric argument could not be parsed
    #[error("invalid argument `{field}`: {source}")]
    InvalidArgument {
        field: &'static str,
        source: InvalidNumber,
    },

    /// Latitude or longitude out of range
    #[error(transparent)]
    IllegalPoint(#[from] IllegalPoint),

    /// Negative search radius
    #[error(transparent)]
    IllegalDistance(#[from] IllegalDistance),

    /// The request to the postcode service failed
    #[error("lookup failed: {0}")]
    Transport(Arc<TransportError>),
}

impl LookupError {
    /// Whether this error was raised by argument validation rather than by
    /// the transport.
    pub fn is_validation(&self) -> bool {
        !matches!(self, LookupError::Transport(_))
    }
}

impl From<TransportError> for LookupError {
    fn from(err: TransportError) -> Self {
        LookupError::Transport(Arc::new(err))
    }
}

impl From<Arc<TransportError>> for LookupError {
    fn from(err: Arc<TransportError>) -> Self {
        LookupError::Transport(err)
    }
}
