//! Bridge from functional error messages back into Rust errors.

use std::fmt;

use thiserror::Error;

use crate::message::{Message, Severity, Tag};
use crate::outcome::Outcome;

/// Error raised by [`Outcome::throw_on_error`].
///
/// Describes the earliest error message of the outcome and carries every error
/// message it held, in their original order. Displays as the primary
/// message's description.
#[derive(Clone, Error)]
#[error("{description}")]
pub struct MessageError {
    code: i32,
    description: String,
    severity: Severity,
    timestamp: u64,
    tag: Option<Tag>,
    errors: Vec<Message>,
}

impl MessageError {
    fn new(primary: &Message, errors: Vec<Message>) -> Self {
        Self {
            code: primary.code(),
            description: primary.description().to_owned(),
            severity: primary.severity(),
            timestamp: primary.timestamp(),
            tag: primary.tag().cloned(),
            errors,
        }
    }

    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// All error messages of the originating outcome, not only the primary one.
    #[must_use]
    pub fn errors(&self) -> &[Message] {
        &self.errors
    }
}

impl fmt::Debug for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageError")
            .field("code", &self.code)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .field("timestamp", &self.timestamp)
            .field("tagged", &self.tag.is_some())
            .field("errors", &self.errors)
            .finish()
    }
}

impl<T> Outcome<T> {
    /// Converts error messages into a [`MessageError`].
    ///
    /// The primary message is the error with the smallest timestamp; among
    /// equal timestamps the first one inserted wins.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if the outcome holds at least one error message.
    pub fn throw_on_error(&self) -> Result<(), MessageError> {
        let Some(primary) = self.errors().min_by_key(|m| m.timestamp()) else {
            return Ok(());
        };
        let errors: Vec<Message> = self.errors().cloned().collect();
        tracing::debug!(
            code = primary.code(),
            error_count = errors.len(),
            "raising outcome errors"
        );
        Err(MessageError::new(primary, errors))
    }

    /// Returns the value if the outcome holds no error messages.
    ///
    /// # Errors
    ///
    /// Returns the same [`MessageError`] as [`Outcome::throw_on_error`].
    pub fn into_value(self) -> Result<T, MessageError> {
        self.throw_on_error()?;
        Ok(self.value)
    }
}
