//! Decorators that convert faults into error messages.
//!
//! - [`CatchFaults`] catches every fault (and, by default, panics).
//! - [`CatchFault`] catches only faults of one error type; anything else
//!   propagates unchanged.
//!
//! Without a handler, a caught fault becomes an outcome holding the default
//! value and a single error message whose tag is the fault itself.

use std::any::{type_name, Any};
use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;
use verdict_core::{Message, Outcome};

use crate::config::CatchConfig;
use crate::error::{Fault, RuntimeError};
use crate::operation::Operation;

/// Handler turning a caught fault into an outcome.
pub type FaultHandler<T> = Box<dyn Fn(Fault) -> Outcome<T> + Send + Sync>;

/// Handler turning a caught fault of type `E` into an outcome.
pub type TypedFaultHandler<E, T> = Box<dyn Fn(E) -> Outcome<T> + Send + Sync>;

/// Builds the outcome reported for a fault caught without a handler.
fn fault_outcome<T, F>(operation: &str, code: i32, fault: F) -> Outcome<T>
where
    T: Default,
    F: Any + Send + Sync,
{
    let message = Message::error(
        code,
        format!("Exception caught while running operation type {operation}"),
    )
    .with_tag(fault);
    Outcome::from_value(T::default()).with_message(message)
}

fn panic_fault(payload: &(dyn Any + Send)) -> Fault {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned());
    anyhow::anyhow!("operation panicked: {reason}")
}

// ---------------------------------------------------------------------------
// CatchFaults
// ---------------------------------------------------------------------------

/// Decorator that catches every fault raised by the wrapped operation.
pub struct CatchFaults<O, A = ()>
where
    O: Operation<A>,
{
    inner: O,
    handler: Option<FaultHandler<O::Output>>,
    config: CatchConfig,
    _args: PhantomData<fn(A)>,
}

impl<O, A> CatchFaults<O, A>
where
    O: Operation<A>,
{
    /// Wraps `inner` with the default configuration and no handler.
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self::with_config(inner, CatchConfig::default())
    }

    /// Wraps `inner` with an explicit configuration.
    pub fn with_config(inner: O, config: CatchConfig) -> Self {
        Self {
            inner,
            handler: None,
            config,
            _args: PhantomData,
        }
    }

    /// Wraps `inner`, routing caught faults through `handler`.
    pub fn with_handler<H>(inner: O, handler: H) -> Self
    where
        H: Fn(Fault) -> Outcome<O::Output> + Send + Sync + 'static,
    {
        let mut decorator = Self::new(inner);
        decorator.handler = Some(Box::new(handler));
        decorator
    }

    /// Starts a builder, for callers assembling the decorator from optional parts.
    pub fn builder() -> CatchFaultsBuilder<O, A> {
        CatchFaultsBuilder::new()
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn config(&self) -> &CatchConfig {
        &self.config
    }

    fn attempt(&self, args: A) -> Result<Outcome<O::Output>, Fault> {
        if !self.config.catch_panics {
            return self.inner.invoke(args);
        }
        panic::catch_unwind(AssertUnwindSafe(|| self.inner.invoke(args)))
            .unwrap_or_else(|payload| Err(panic_fault(payload.as_ref())))
    }
}

impl<O, A> Operation<A> for CatchFaults<O, A>
where
    O: Operation<A>,
    O::Output: Default,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<O::Output>, Fault> {
        let fault = match self.attempt(args) {
            Ok(outcome) => return Ok(outcome),
            Err(fault) => fault,
        };

        let operation = type_name::<O>();
        warn!(operation, code = self.config.fault_code, error = %fault, "fault caught");
        Ok(match &self.handler {
            Some(handler) => handler(fault),
            None => fault_outcome(operation, self.config.fault_code, fault),
        })
    }
}

impl<O, A> fmt::Debug for CatchFaults<O, A>
where
    O: Operation<A> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatchFaults")
            .field("inner", &self.inner)
            .field("has_handler", &self.handler.is_some())
            .field("config", &self.config)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CatchFaultsBuilder
// ---------------------------------------------------------------------------

/// Builder for [`CatchFaults`] whose wrapped operation may be absent.
pub struct CatchFaultsBuilder<O, A = ()>
where
    O: Operation<A>,
{
    operation: Option<O>,
    handler: Option<FaultHandler<O::Output>>,
    config: CatchConfig,
    _args: PhantomData<fn(A)>,
}

impl<O, A> CatchFaultsBuilder<O, A>
where
    O: Operation<A>,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            operation: None,
            handler: None,
            config: CatchConfig::default(),
            _args: PhantomData,
        }
    }

    #[must_use]
    pub fn operation(mut self, operation: O) -> Self {
        self.operation = Some(operation);
        self
    }

    #[must_use]
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Fn(Fault) -> Outcome<O::Output> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn config(mut self, config: CatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Assembles the decorator.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidArgument`] if no operation was supplied.
    pub fn build(self) -> Result<CatchFaults<O, A>, RuntimeError> {
        let inner = self
            .operation
            .ok_or(RuntimeError::InvalidArgument { name: "operation" })?;
        Ok(CatchFaults {
            inner,
            handler: self.handler,
            config: self.config,
            _args: PhantomData,
        })
    }
}

impl<O, A> Default for CatchFaultsBuilder<O, A>
where
    O: Operation<A>,
{
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// CatchFault
// ---------------------------------------------------------------------------

/// Decorator that catches only faults whose error type is `E`.
///
/// Faults of any other type, and panics, propagate unchanged. Only
/// [`CatchConfig::fault_code`] applies; `catch_panics` is ignored.
pub struct CatchFault<O, E, A = ()>
where
    O: Operation<A>,
{
    inner: O,
    handler: Option<TypedFaultHandler<E, O::Output>>,
    config: CatchConfig,
    _marker: PhantomData<fn(A) -> E>,
}

impl<O, E, A> CatchFault<O, E, A>
where
    O: Operation<A>,
    E: StdError + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self::with_config(inner, CatchConfig::default())
    }

    /// Wraps `inner` with an explicit configuration.
    pub fn with_config(inner: O, config: CatchConfig) -> Self {
        Self {
            inner,
            handler: None,
            config,
            _marker: PhantomData,
        }
    }

    /// Wraps `inner`, routing caught `E` faults through `handler`.
    pub fn with_handler<H>(inner: O, handler: H) -> Self
    where
        H: Fn(E) -> Outcome<O::Output> + Send + Sync + 'static,
    {
        let mut decorator = Self::new(inner);
        decorator.handler = Some(Box::new(handler));
        decorator
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn config(&self) -> &CatchConfig {
        &self.config
    }
}

impl<O, E, A> Operation<A> for CatchFault<O, E, A>
where
    O: Operation<A>,
    O::Output: Default,
    E: StdError + Send + Sync + 'static,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<O::Output>, Fault> {
        let fault = match self.inner.invoke(args) {
            Ok(outcome) => return Ok(outcome),
            Err(fault) => fault.downcast::<E>()?,
        };

        let operation = type_name::<O>();
        warn!(
            operation,
            fault_type = type_name::<E>(),
            code = self.config.fault_code,
            error = %fault,
            "fault caught"
        );
        Ok(match &self.handler {
            Some(handler) => handler(fault),
            None => fault_outcome(operation, self.config.fault_code, fault),
        })
    }
}

impl<O, E, A> fmt::Debug for CatchFault<O, E, A>
where
    O: Operation<A> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatchFault")
            .field("inner", &self.inner)
            .field("fault_type", &type_name::<E>())
            .field("has_handler", &self.handler.is_some())
            .field("config", &self.config)
            .finish()
    }
}
