//! Branching combinators over outcomes and sequences of outcomes.
//!
//! Every combinator follows the same template: a [`Trigger`] selects the
//! classification predicate, and a terminal method on [`Branch`] decides which
//! callback (if any) runs. The predicate is evaluated when the terminal method
//! runs, never earlier, and the subject is only ever borrowed immutably.
//!
//! ```
//! use verdict_core::{Classify, Message, Outcome};
//!
//! let outcome = Outcome::from_value(41).with_message(Message::warning(1, "slow"));
//!
//! let next = outcome.on_success().map(|o| o.value + 1);
//! assert_eq!(next, 42);
//!
//! let label = outcome.on_error().map_else(|_| "failed", |_| "ok");
//! assert_eq!(label, "ok");
//! ```
//!
//! Sequences (`[Outcome<T>]`, and therefore `Vec<Outcome<T>>`) trigger when
//! ANY element satisfies the single-outcome predicate. Their callbacks receive
//! the whole, unfiltered slice.

use crate::message::Message;
use crate::outcome::Outcome;

/// Which classification a [`Branch`] reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// No error messages.
    Success,
    /// At least one error message.
    Error,
    /// At least one warning message.
    Warning,
    /// At least one informational message.
    Informational,
}

// ---------------------------------------------------------------------------
// Classify
// ---------------------------------------------------------------------------

/// Severity classification plus the entry points of the branching combinators.
pub trait Classify {
    fn has_errors(&self) -> bool;

    fn has_warnings(&self) -> bool;

    fn has_informationals(&self) -> bool;

    /// Whether `trigger` holds for this subject right now.
    fn is_triggered(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Success => !self.has_errors(),
            Trigger::Error => self.has_errors(),
            Trigger::Warning => self.has_warnings(),
            Trigger::Informational => self.has_informationals(),
        }
    }

    /// Branch on an arbitrary trigger.
    fn on(&self, trigger: Trigger) -> Branch<'_, Self> {
        Branch {
            subject: self,
            trigger,
        }
    }

    /// Branch taken when there are no errors.
    fn on_success(&self) -> Branch<'_, Self> {
        self.on(Trigger::Success)
    }

    /// Branch taken when there is at least one error.
    fn on_error(&self) -> Branch<'_, Self> {
        self.on(Trigger::Error)
    }

    /// Branch taken when there is at least one warning.
    fn on_warning(&self) -> Branch<'_, Self> {
        self.on(Trigger::Warning)
    }

    /// Branch taken when there is at least one informational message.
    fn on_informational(&self) -> Branch<'_, Self> {
        self.on(Trigger::Informational)
    }
}

impl<T> Classify for Outcome<T> {
    fn has_errors(&self) -> bool {
        Outcome::has_errors(self)
    }

    fn has_warnings(&self) -> bool {
        Outcome::has_warnings(self)
    }

    fn has_informationals(&self) -> bool {
        Outcome::has_informationals(self)
    }
}

impl<T> Classify for [Outcome<T>] {
    fn has_errors(&self) -> bool {
        self.iter().any(Outcome::has_errors)
    }

    fn has_warnings(&self) -> bool {
        self.iter().any(Outcome::has_warnings)
    }

    fn has_informationals(&self) -> bool {
        self.iter().any(Outcome::has_informationals)
    }
}

// ---------------------------------------------------------------------------
// OutcomeSeq
// ---------------------------------------------------------------------------

/// Filtered views over a sequence of outcomes.
///
/// The views select whole outcomes, not their messages; use
/// [`OutcomeSeq::messages`] to flatten explicitly.
pub trait OutcomeSeq<T> {
    /// Outcomes carrying at least one error, in original order.
    fn errors(&self) -> Vec<&Outcome<T>>;

    /// Outcomes carrying at least one warning, in original order.
    fn warnings(&self) -> Vec<&Outcome<T>>;

    /// Outcomes carrying at least one informational message, in original order.
    fn informationals(&self) -> Vec<&Outcome<T>>;

    /// Every message of every outcome, outcome by outcome.
    fn messages(&self) -> Vec<&Message>;
}

impl<T> OutcomeSeq<T> for [Outcome<T>] {
    fn errors(&self) -> Vec<&Outcome<T>> {
        self.iter().filter(|o| o.has_errors()).collect()
    }

    fn warnings(&self) -> Vec<&Outcome<T>> {
        self.iter().filter(|o| o.has_warnings()).collect()
    }

    fn informationals(&self) -> Vec<&Outcome<T>> {
        self.iter().filter(|o| o.has_informationals()).collect()
    }

    fn messages(&self) -> Vec<&Message> {
        self.iter().flat_map(|o| o.messages.iter()).collect()
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// A pending branch on a subject's classification.
///
/// Created by [`Classify::on_success`] and friends; does nothing until one of
/// its terminal methods runs.
#[must_use = "a branch does nothing until one of its terminal methods is called"]
#[derive(Debug)]
pub struct Branch<'a, S: ?Sized> {
    subject: &'a S,
    trigger: Trigger,
}

impl<S: ?Sized> Clone for Branch<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Branch<'_, S> {}

impl<'a, S: Classify + ?Sized> Branch<'a, S> {
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Evaluates the trigger against the subject.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.subject.is_triggered(self.trigger)
    }

    /// Runs `action` if triggered.
    pub fn then<F: FnOnce()>(self, action: F) {
        if self.is_triggered() {
            action();
        }
    }

    /// Runs `action` if triggered, `otherwise` if not.
    pub fn then_else<F, G>(self, action: F, otherwise: G)
    where
        F: FnOnce(),
        G: FnOnce(),
    {
        if self.is_triggered() {
            action();
        } else {
            otherwise();
        }
    }

    /// Runs `action` with the subject if triggered.
    pub fn then_with<F: FnOnce(&'a S)>(self, action: F) {
        if self.is_triggered() {
            action(self.subject);
        }
    }

    /// Runs `action` or `otherwise` with the subject.
    pub fn then_with_else<F, G>(self, action: F, otherwise: G)
    where
        F: FnOnce(&'a S),
        G: FnOnce(&'a S),
    {
        if self.is_triggered() {
            action(self.subject);
        } else {
            otherwise(self.subject);
        }
    }

    /// Returns `f(subject)` if triggered, `U::default()` otherwise.
    pub fn map<U, F>(self, f: F) -> U
    where
        U: Default,
        F: FnOnce(&'a S) -> U,
    {
        if self.is_triggered() {
            f(self.subject)
        } else {
            U::default()
        }
    }

    /// Returns `f(subject)` if triggered, `otherwise(subject)` if not.
    pub fn map_else<U, F, G>(self, f: F, otherwise: G) -> U
    where
        F: FnOnce(&'a S) -> U,
        G: FnOnce(&'a S) -> U,
    {
        if self.is_triggered() {
            f(self.subject)
        } else {
            otherwise(self.subject)
        }
    }
}

impl<'a, T> Branch<'a, Outcome<T>> {
    /// Runs `action` with the outcome's value if triggered.
    pub fn then_value<F: FnOnce(&'a T)>(self, action: F) {
        if self.is_triggered() {
            action(&self.subject.value);
        }
    }

    /// Runs `action` or `otherwise` with the outcome's value.
    pub fn then_value_else<F, G>(self, action: F, otherwise: G)
    where
        F: FnOnce(&'a T),
        G: FnOnce(&'a T),
    {
        if self.is_triggered() {
            action(&self.subject.value);
        } else {
            otherwise(&self.subject.value);
        }
    }
}
