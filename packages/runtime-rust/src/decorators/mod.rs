//! Decorators wrapping an [`Operation`](crate::Operation).
//!
//! - [`catch`]: Fault-to-message conversion, untyped and typed
//! - [`collect`]: Outcome history across invocations
//!
//! Every decorator is itself an operation, so decorators nest.

pub mod catch;
pub mod collect;

pub use catch::{CatchFault, CatchFaults, CatchFaultsBuilder, FaultHandler, TypedFaultHandler};
pub use collect::CollectOutcomes;
