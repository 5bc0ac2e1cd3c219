//! Diagnostics for the Kotlin parsing core.
//!
//! Every problem the parser finds is reported as a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//!
//! Parsing never stops on an error, so diagnostics are plain values that
//! callers collect and render with an [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, LabelStyle, Severity};
pub use error_code::{ErrorCode, UnknownErrorCode};
