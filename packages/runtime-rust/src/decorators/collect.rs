//! Decorator that keeps every outcome the wrapped operation produced.

use std::fmt;
use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::trace;
use verdict_core::Outcome;

use crate::error::Fault;
use crate::operation::Operation;

/// Decorator recording the history of outcomes across invocations.
///
/// Each successful `invoke` appends a copy of the outcome before returning it;
/// faults are not recorded. The history only grows.
pub struct CollectOutcomes<O, A = ()>
where
    O: Operation<A>,
{
    inner: O,
    history: Mutex<Vec<Outcome<O::Output>>>,
    _args: PhantomData<fn(A)>,
}

impl<O, A> CollectOutcomes<O, A>
where
    O: Operation<A>,
    O::Output: Clone,
{
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            history: Mutex::new(Vec::new()),
            _args: PhantomData,
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Number of outcomes collected so far.
    pub fn count(&self) -> usize {
        self.history.lock().len()
    }

    /// Every collected outcome, in invocation order.
    pub fn results(&self) -> Vec<Outcome<O::Output>> {
        self.history.lock().clone()
    }

    /// Collected outcomes matching `predicate`, in invocation order.
    ///
    /// Empty when nothing matches.
    pub fn results_where<P>(&self, predicate: P) -> Vec<Outcome<O::Output>>
    where
        P: Fn(&Outcome<O::Output>) -> bool,
    {
        self.history
            .lock()
            .iter()
            .filter(|outcome| predicate(outcome))
            .cloned()
            .collect()
    }

    /// Runs `f` against the collected history without copying it.
    ///
    /// The history is locked while `f` runs, so `f` must not invoke this
    /// decorator.
    pub fn with_results<R>(&self, f: impl FnOnce(&[Outcome<O::Output>]) -> R) -> R {
        f(&self.history.lock())
    }
}

impl<O, A> CollectOutcomes<O, A>
where
    O: Operation<A>,
    O::Output: Clone + Send,
{
    /// Invokes once, collecting the outcome, and returns the decorator for chaining.
    ///
    /// # Errors
    ///
    /// Returns the wrapped operation's fault; nothing is collected in that case.
    pub fn run_and_collect(&self, args: A) -> Result<&Self, Fault> {
        self.invoke(args)?;
        Ok(self)
    }
}

impl<O, A> Operation<A> for CollectOutcomes<O, A>
where
    O: Operation<A>,
    O::Output: Clone + Send,
{
    type Output = O::Output;

    fn invoke(&self, args: A) -> Result<Outcome<O::Output>, Fault> {
        let outcome = self.inner.invoke(args)?;
        let mut history = self.history.lock();
        history.push(outcome.clone());
        trace!(count = history.len(), "outcome collected");
        Ok(outcome)
    }
}

impl<O, A> fmt::Debug for CollectOutcomes<O, A>
where
    O: Operation<A> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectOutcomes")
            .field("inner", &self.inner)
            .field("count", &self.history.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use verdict_core::{Classify, Message, OutcomeSeq};

    use super::*;

    /// Concatenates five strings; `"z"` as the last one is an error and `"y"`
    /// a warning.
    #[derive(Debug, Default)]
    struct Concat;

    impl Operation<(&'static str, &'static str, &'static str, &'static str, &'static str)> for Concat {
        type Output = usize;

        fn invoke(
            &self,
            (a, b, c, d, e): (&'static str, &'static str, &'static str, &'static str, &'static str),
        ) -> Result<Outcome<usize>, Fault> {
            let joined = [a, b, c, d, e].concat();
            let outcome = Outcome::from_value(joined.len());
            Ok(match e {
                "z" => outcome.with_message(Message::error(100, "z is not allowed")),
                "y" => outcome.with_message(Message::warning(200, "y is discouraged")),
                _ => outcome,
            })
        }
    }

    #[derive(Debug, Default)]
    struct Letter;

    impl Operation for Letter {
        type Output = String;

        fn invoke(&self, (): ()) -> Result<Outcome<String>, Fault> {
            Ok(Outcome::from_value("a".to_owned()))
        }
    }

    #[test]
    fn passes_outcome_through() {
        let value = CollectOutcomes::new(Letter).invoke(()).unwrap().value;
        assert_eq!(value, "a");
    }

    #[test]
    fn count_grows_by_one_per_invoke() {
        let collector = CollectOutcomes::new(Letter);
        assert_eq!(collector.count(), 0);

        for expected in 1..=5 {
            collector.invoke(()).unwrap();
            assert_eq!(collector.count(), expected);
        }

        let results = collector.results();
        assert_eq!(results.len(), collector.count());
        assert!(results.iter().all(|o| o.value == "a"));
    }

    #[test]
    fn history_keeps_invocation_order_and_classifies() {
        let collector = CollectOutcomes::new(Concat);
        collector.invoke(("a", "b", "c", "d", "e")).unwrap();
        collector.invoke(("a", "b", "c", "d", "e")).unwrap();

        let results = collector.results();
        assert_eq!(results.len(), 2);
        assert!(results.errors().is_empty());
        assert!(results.warnings().is_empty());
        assert!(results.informationals().is_empty());

        collector.invoke(("a", "b", "c", "d", "z")).unwrap();
        collector.invoke(("a", "b", "c", "d", "e")).unwrap();

        let results = collector.results();
        assert_eq!(results.len(), 4);
        assert_eq!(results.errors().len(), 1);
        assert!(results[2].has_errors());
        assert!(results.has_errors());
        assert!(!results.has_warnings());

        let clean = collector.results_where(|o| !o.has_errors());
        assert_eq!(clean.len(), 3);
        assert!(clean.errors().is_empty());

        collector.invoke(("a", "b", "c", "d", "y")).unwrap();
        assert!(collector.with_results(|all| all.has_warnings()));
        assert_eq!(collector.with_results(|all| all.on_warning().map(|_| "a")), "a");
    }

    #[test]
    fn results_where_without_match_is_empty() {
        let collector = CollectOutcomes::new(Letter);
        collector.invoke(()).unwrap();

        assert!(collector.results_where(Outcome::has_errors).is_empty());
        let untouched: CollectOutcomes<Letter> = CollectOutcomes::new(Letter);
        assert!(untouched.results_where(|_| true).is_empty());
    }

    #[test]
    fn run_and_collect_chains() {
        let collector = CollectOutcomes::new(Letter);
        let count = collector
            .run_and_collect(())
            .and_then(|c| c.run_and_collect(()))
            .map(|c| c.count())
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn faults_are_not_collected() {
        let failing = crate::operation::operation_fn(|fail: bool| {
            if fail {
                Err(anyhow::anyhow!("boom"))
            } else {
                Ok(Outcome::from_value(1_u8))
            }
        });
        let collector = CollectOutcomes::new(failing);

        collector.invoke(false).unwrap();
        assert!(collector.invoke(true).is_err());
        assert_eq!(collector.count(), 1);
    }
}
