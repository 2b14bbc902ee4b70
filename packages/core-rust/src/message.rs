//! Severity-tagged diagnostic messages.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::{ClockSource, SystemClock};

/// Code of the message generated when a catch decorator swallows a fault.
pub const FAULT_CAUGHT_CODE: i32 = -10;

/// Opaque, shareable payload attached to a [`Message`].
///
/// Typically holds the fault that caused the message. Reference-counted so that
/// cloning a message never deep-copies its tag.
pub type Tag = Arc<dyn Any + Send + Sync>;

/// Classification of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Functional error: the operation did not achieve its goal.
    Error,
    /// The operation succeeded but something deserves attention.
    Warning,
    /// Informational context only.
    Information,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
        };
        f.write_str(name)
    }
}

/// One diagnostic record carried by an [`Outcome`](crate::Outcome).
///
/// The timestamp is assigned when the message is built and cannot be changed
/// afterwards; every other field is fixed at construction too, except the tag
/// which may be attached with [`Message::with_tag`].
#[derive(Clone, Serialize)]
pub struct Message {
    code: i32,
    description: String,
    severity: Severity,
    timestamp: u64,
    #[serde(skip)]
    tag: Option<Tag>,
}

impl Message {
    /// Creates a message stamped with the system clock.
    #[must_use]
    pub fn new(code: i32, description: impl Into<String>, severity: Severity) -> Self {
        Self::with_clock(code, description, severity, &SystemClock)
    }

    /// Creates a message stamped with the given clock.
    #[must_use]
    pub fn with_clock(
        code: i32,
        description: impl Into<String>,
        severity: Severity,
        clock: &dyn ClockSource,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            severity,
            timestamp: clock.now(),
            tag: None,
        }
    }

    /// Creates an [`Severity::Error`] message.
    #[must_use]
    pub fn error(code: i32, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Error)
    }

    /// Creates a [`Severity::Warning`] message.
    #[must_use]
    pub fn warning(code: i32, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Warning)
    }

    /// Creates a [`Severity::Information`] message.
    #[must_use]
    pub fn information(code: i32, description: impl Into<String>) -> Self {
        Self::new(code, description, Severity::Information)
    }

    /// Attaches an arbitrary value as the message tag.
    #[must_use]
    pub fn with_tag<V: Any + Send + Sync>(self, value: V) -> Self {
        self.with_shared_tag(Arc::new(value))
    }

    /// Attaches an already shared tag.
    #[must_use]
    pub fn with_shared_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
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

    /// Milliseconds since Unix epoch at which the message was built.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Returns the tag if it holds a value of type `V`.
    #[must_use]
    pub fn tag_as<V: Any>(&self) -> Option<&V> {
        self.tag.as_deref().and_then(|tag| tag.downcast_ref::<V>())
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    #[must_use]
    pub fn is_information(&self) -> bool {
        self.severity == Severity::Information
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("code", &self.code)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .field("timestamp", &self.timestamp)
            .field("tagged", &self.tag.is_some())
            .finish()
    }
}
