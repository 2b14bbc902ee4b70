//! Verdict Core: messages, outcomes, classification, and branching combinators.
//!
//! An [`Outcome`] reports what an operation produced without using Rust errors
//! for control flow: a typed value plus an ordered list of severity-tagged
//! [`Message`]s. Callers classify it ([`Outcome::has_errors`], ...), branch on
//! it ([`Classify::on_success`], ...), or turn its errors back into a Rust
//! error with [`Outcome::throw_on_error`].

pub mod branch;
pub mod clock;
pub mod error;
pub mod message;
pub mod outcome;

pub use branch::{Branch, Classify, OutcomeSeq, Trigger};
pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::MessageError;
pub use message::{Message, Severity, Tag, FAULT_CAUGHT_CODE};
pub use outcome::{make, make_with, make_with_messages, make_with_value, Outcome};
