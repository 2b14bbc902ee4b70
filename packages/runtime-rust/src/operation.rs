//! The [`Operation`] trait: a unit of work producing an [`Outcome`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use verdict_core::Outcome;

use crate::error::Fault;

/// A unit of work that reports its result as an [`Outcome`].
///
/// Operations take a single argument `A`: the unit type `()` for zero-argument
/// operations, a tuple for several arguments. Functional errors belong in the
/// returned outcome's messages; `Err` is reserved for faults, which decorators
/// such as [`CatchFaults`](crate::CatchFaults) may convert into messages.
///
/// Implementations are shared across threads (for example through
/// [`InstanceRegistry`](crate::InstanceRegistry)), hence the `Send + Sync` bound.
pub trait Operation<A = ()>: Send + Sync {
    /// Type of the value carried by the produced outcome.
    type Output;

    /// Runs the operation once.
    ///
    /// # Errors
    ///
    /// Returns a [`Fault`] when the operation fails exceptionally.
    fn invoke(&self, args: A) -> Result<Outcome<Self::Output>, Fault>;
}

impl<A, O> Operation<A> for &O
where
    O: Operation<A> + ?Sized,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<Self::Output>, Fault> {
        (**self).invoke(args)
    }
}

impl<A, O> Operation<A> for Arc<O>
where
    O: Operation<A> + ?Sized,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<Self::Output>, Fault> {
        (**self).invoke(args)
    }
}

impl<A, O> Operation<A> for Box<O>
where
    O: Operation<A> + ?Sized,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<Self::Output>, Fault> {
        (**self).invoke(args)
    }
}

// ---------------------------------------------------------------------------
// FnOperation
// ---------------------------------------------------------------------------

/// An [`Operation`] backed by a closure. Created with [`operation_fn`].
pub struct FnOperation<F, A = ()> {
    f: F,
    _args: PhantomData<fn(A)>,
}

/// Wraps a closure as an [`Operation`].
///
/// ```
/// use verdict_core::Outcome;
/// use verdict_runtime::{operation_fn, Operation};
///
/// let double = operation_fn(|x: i32| Ok(Outcome::from_value(x * 2)));
/// assert_eq!(double.invoke(21).unwrap().value, 42);
/// ```
pub fn operation_fn<F, A, T>(f: F) -> FnOperation<F, A>
where
    F: Fn(A) -> Result<Outcome<T>, Fault> + Send + Sync,
{
    FnOperation {
        f,
        _args: PhantomData,
    }
}

impl<F, A, T> Operation<A> for FnOperation<F, A>
where
    F: Fn(A) -> Result<Outcome<T>, Fault> + Send + Sync,
{
    type Output = T;

    fn invoke(&self, args: A) -> Result<Outcome<T>, Fault> {
        (self.f)(args)
    }
}

impl<F, A> fmt::Debug for FnOperation<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use verdict_core::Message;

    use super::*;

    struct Greeting;

    impl Operation<(String, u8)> for Greeting {
        type Output = String;

        fn invoke(&self, (name, times): (String, u8)) -> Result<Outcome<String>, Fault> {
            if times == 0 {
                return Ok(Outcome::new().with_message(Message::warning(1, "nothing to say")));
            }
            Ok(Outcome::from_value(format!("hello {name}").repeat(usize::from(times))))
        }
    }

    #[test]
    fn tuple_arguments() {
        let outcome = Greeting.invoke(("bob".to_string(), 2)).unwrap();
        assert_eq!(outcome.value, "hello bobhello bob");

        let outcome = Greeting.invoke(("bob".to_string(), 0)).unwrap();
        assert!(outcome.has_warnings());
        assert_eq!(outcome.value, "");
    }

    #[test]
    fn zero_argument_closure() {
        let op = operation_fn(|()| Ok(Outcome::from_value(7)));
        assert_eq!(op.invoke(()).unwrap().value, 7);
    }

    #[test]
    fn closure_faults_propagate() {
        let op = operation_fn(|()| -> Result<Outcome<()>, Fault> { Err(anyhow::anyhow!("boom")) });
        assert_eq!(op.invoke(()).unwrap_err().to_string(), "boom");
    }

    #[test]
    fn shared_and_boxed_operations_delegate() {
        let shared = Arc::new(Greeting);
        assert_eq!(shared.invoke(("a".into(), 1)).unwrap().value, "hello a");

        let boxed: Box<dyn Operation<(String, u8), Output = String>> = Box::new(Greeting);
        assert_eq!(boxed.invoke(("b".into(), 1)).unwrap().value, "hello b");
    }
}
