//! The [`Outcome`] model and its construction helpers.
//!
//! An outcome is what an operation hands back to its caller: an ordered list of
//! [`Message`]s plus a typed value. "Error" is a message severity here, not a
//! control-flow signal; callers branch on [`Outcome::has_errors`] rather than
//! catching anything. Use `()` as the value type for operations that produce
//! nothing but messages.

use std::any::TypeId;

use serde::Serialize;

use crate::message::{Message, Severity};

/// Messages plus a return value produced by one operation invocation.
///
/// Classification (`has_errors`, `errors`, ...) is always derived from
/// `messages` on demand, so pushing a message is immediately reflected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outcome<T> {
    /// Diagnostics in insertion order. Duplicates are allowed.
    pub messages: Vec<Message>,
    /// The return value; `T::default()` until explicitly set.
    pub value: T,
}

impl<T: Default> Outcome<T> {
    /// Creates an outcome with no messages and a default value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an outcome holding copies of `messages` and a default value.
    ///
    /// `None` is treated as an empty message list.
    #[must_use]
    pub fn from_messages<I>(messages: Option<I>) -> Self
    where
        I: IntoIterator<Item = Message>,
    {
        Self::from_parts(T::default(), messages)
    }
}

impl<T> Outcome<T> {
    /// Creates an outcome holding `value` and no messages.
    #[must_use]
    pub fn from_value(value: T) -> Self {
        Self {
            messages: Vec::new(),
            value,
        }
    }

    /// Creates an outcome holding `value` and copies of `messages`.
    ///
    /// `None` is treated as an empty message list.
    #[must_use]
    pub fn from_parts<I>(value: T, messages: Option<I>) -> Self
    where
        I: IntoIterator<Item = Message>,
    {
        let mut outcome = Self::from_value(value);
        if let Some(messages) = messages {
            outcome.messages.extend(messages);
        }
        outcome
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends a message, builder style.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_severity(Severity::Error)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_severity(Severity::Warning)
    }

    #[must_use]
    pub fn has_informationals(&self) -> bool {
        self.has_severity(Severity::Information)
    }

    /// Error messages in their original order.
    pub fn errors(&self) -> impl Iterator<Item = &Message> + '_ {
        self.of_severity(Severity::Error)
    }

    /// Warning messages in their original order.
    pub fn warnings(&self) -> impl Iterator<Item = &Message> + '_ {
        self.of_severity(Severity::Warning)
    }

    /// Informational messages in their original order.
    pub fn informationals(&self) -> impl Iterator<Item = &Message> + '_ {
        self.of_severity(Severity::Information)
    }

    /// Whether `T` is the unit type, i.e. the operation returns no value.
    #[must_use]
    pub fn is_void(&self) -> bool
    where
        T: 'static,
    {
        TypeId::of::<T>() == TypeId::of::<()>()
    }

    fn has_severity(&self, severity: Severity) -> bool {
        self.messages.iter().any(|m| m.severity() == severity)
    }

    fn of_severity(&self, severity: Severity) -> impl Iterator<Item = &Message> + '_ {
        self.messages
            .iter()
            .filter(move |m| m.severity() == severity)
    }
}

/// Creates an empty outcome. Shorthand for [`Outcome::new`].
#[must_use]
pub fn make<T: Default>() -> Outcome<T> {
    Outcome::new()
}

/// Creates an outcome from messages only. Shorthand for [`Outcome::from_messages`].
#[must_use]
pub fn make_with_messages<T, I>(messages: Option<I>) -> Outcome<T>
where
    T: Default,
    I: IntoIterator<Item = Message>,
{
    Outcome::from_messages(messages)
}

/// Creates an outcome from a value only. Shorthand for [`Outcome::from_value`].
#[must_use]
pub fn make_with_value<T>(value: T) -> Outcome<T> {
    Outcome::from_value(value)
}

/// Creates an outcome from a value and messages. Shorthand for [`Outcome::from_parts`].
#[must_use]
pub fn make_with<T, I>(value: T, messages: Option<I>) -> Outcome<T>
where
    I: IntoIterator<Item = Message>,
{
    Outcome::from_parts(value, messages)
}
