//! Verdict Runtime: operations producing outcomes, and the decorators around them.
//!
//! An [`Operation`] reports its result as an [`Outcome`](verdict_core::Outcome)
//! and reserves `Err` for faults. Decorators are operations wrapping other
//! operations:
//!
//! - [`CatchFaults`] / [`CatchFault`] turn faults into error messages
//! - [`CollectOutcomes`] records every outcome produced
//!
//! [`OperationExt`] chains them, and [`InstanceRegistry`] shares one lazily
//! created instance per operation type.

pub mod config;
pub mod decorators;
pub mod error;
pub mod ext;
pub mod operation;
pub mod registry;

pub use config::CatchConfig;
pub use decorators::{
    CatchFault, CatchFaults, CatchFaultsBuilder, CollectOutcomes, FaultHandler, TypedFaultHandler,
};
pub use error::{Fault, RuntimeError};
pub use ext::OperationExt;
pub use operation::{operation_fn, FnOperation, Operation};
pub use registry::InstanceRegistry;
