//! Chaining helpers for wrapping operations in decorators.

use std::error::Error as StdError;

use verdict_core::Outcome;

use crate::decorators::{CatchFault, CatchFaults, CollectOutcomes};
use crate::error::Fault;
use crate::operation::Operation;

/// Decorator constructors available on every [`Operation`].
///
/// Each call wraps `self` in a new decorator, even if `self` already is one
/// of the same kind.
///
/// ```
/// use verdict_core::Outcome;
/// use verdict_runtime::{operation_fn, Operation, OperationExt};
///
/// let op = operation_fn(|()| -> anyhow::Result<Outcome<u8>> { anyhow::bail!("boom") })
///     .catch_faults()
///     .collect_outcomes();
///
/// assert!(op.invoke(()).unwrap().has_errors());
/// assert_eq!(op.count(), 1);
/// ```
pub trait OperationExt<A>: Operation<A> + Sized {
    /// Wraps in [`CatchFaults`] with the default configuration.
    fn catch_faults(self) -> CatchFaults<Self, A> {
        CatchFaults::new(self)
    }

    /// Wraps in [`CatchFaults`] with a fault handler.
    fn catch_faults_with<H>(self, handler: H) -> CatchFaults<Self, A>
    where
        H: Fn(Fault) -> Outcome<Self::Output> + Send + Sync + 'static,
    {
        CatchFaults::with_handler(self, handler)
    }

    /// Wraps in [`CatchFault`], catching only faults of type `E`.
    fn catch_fault<E>(self) -> CatchFault<Self, E, A>
    where
        E: StdError + Send + Sync + 'static,
    {
        CatchFault::new(self)
    }

    /// Wraps in [`CatchFault`] with a handler for faults of type `E`.
    fn catch_fault_with<E, H>(self, handler: H) -> CatchFault<Self, E, A>
    where
        E: StdError + Send + Sync + 'static,
        H: Fn(E) -> Outcome<Self::Output> + Send + Sync + 'static,
    {
        CatchFault::with_handler(self, handler)
    }

    /// Wraps in [`CollectOutcomes`].
    fn collect_outcomes(self) -> CollectOutcomes<Self, A>
    where
        Self::Output: Clone,
    {
        CollectOutcomes::new(self)
    }
}

impl<O, A> OperationExt<A> for O where O: Operation<A> {}
