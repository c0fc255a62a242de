//! Error types for the gatherers.

use std::convert::Infallible;

/// Result type for gatherer operations.
pub type Result<T, E = GatherError> = std::result::Result<T, E>;

/// Errors from windowing, folding, and concurrent mapping.
///
/// `E` is the error type of a caller-supplied function. Operations that never
/// call fallible user code use the default `Infallible`.
#[derive(Debug, thiserror::Error)]
pub enum GatherError<E = Infallible> {
    /// A size or concurrency bound was below 1.
    ///
    /// Raised on the call itself, before any element is consumed.
    #[error("invalid argument: {parameter} must be at least 1 (got {value})")]
    InvalidArgument {
        parameter: &'static str,
        value: usize,
    },

    /// The concurrent mapper could not start one of its worker threads.
    ///
    /// Workers already started are stopped before this is returned, and no
    /// element has been transformed.
    #[error("failed to spawn worker thread {worker}")]
    WorkerSpawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied function failed on the element at `index`.
    #[error("transformation failed at element {index}")]
    TransformationFailure {
        index: usize,
        #[source]
        source: E,
    },
}

impl<E> GatherError<E> {
    /// Returns the input position of the failing element, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::InvalidArgument { .. } | Self::WorkerSpawn { .. } => None,
            Self::TransformationFailure { index, .. } => Some(*index),
        }
    }

    /// Converts the failure payload with `f`.
    pub fn map_source<F>(self, f: impl FnOnce(E) -> F) -> GatherError<F> {
        match self {
            Self::InvalidArgument { parameter, value } => {
                GatherError::InvalidArgument { parameter, value }
            }
            Self::WorkerSpawn { worker, source } => GatherError::WorkerSpawn { worker, source },
            Self::TransformationFailure { index, source } => GatherError::TransformationFailure {
                index,
                source: f(source),
            },
        }
    }
}

impl GatherError {
    /// Widens a validation error into one carrying a user error type.
    pub fn widen<E>(self) -> GatherError<E> {
        self.map_source(|never| match never {})
    }
}

/// Rejects `value` if it is below 1.
pub(crate) fn require_positive(parameter: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(GatherError::InvalidArgument { parameter, value });
    }
    Ok(value)
}
