//! Error types for the operation runtime.

use thiserror::Error;

/// A runtime fault raised by an operation body.
///
/// Faults are the exceptional channel, distinct from the error messages an
/// operation reports inside its [`Outcome`](verdict_core::Outcome). A catch
/// decorator turns them into messages; without one they propagate to the caller.
pub type Fault = anyhow::Error;

/// Errors raised when assembling decorators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// A required argument was not supplied.
    #[error("missing required argument: {name}")]
    InvalidArgument { name: &'static str },
}
