//! Internal errors - faults to be reported to operators, not callers.
//!
//! In terms of a web server this is the 5XX range.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write;

use crate::capability::{InternalError, Metadata};
use crate::classify::chain;
use crate::ids::{IdGenerator, UuidGenerator};

/// Snapshot of an unexpected error, ready to send to an error reporting system.
///
/// The underlying error is not kept: its text and causal chain are rendered
/// when the value is built, so later wrapping or dropping of the cause does
/// not change what is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ErrInternal {
    id: String,
    message: String,
    stack: String,
    metadata: Metadata,
}

impl ErrInternal {
    /// Capture `err` with a random identifier.
    ///
    /// `metadata` is a data bag and can contain headers, method, status code, uri etc.
    pub fn new<E>(err: &E, metadata: Metadata) -> Self
    where
        E: Error + ?Sized,
    {
        Self::generated(&UuidGenerator, err, metadata)
    }

    /// Capture `err` taking the identifier from `ids`.
    pub fn generated<E>(ids: &dyn IdGenerator, err: &E, metadata: Metadata) -> Self
    where
        E: Error + ?Sized,
    {
        Self {
            id: ids.generate(),
            message: err.to_string(),
            stack: render_stack(err),
            metadata,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl InternalError for ErrInternal {
    fn id(&self) -> &str {
        &self.id
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn stack(&self) -> &str {
        &self.stack
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

crate::capabilities!(ErrInternal => InternalError);

/// Error text, each cause on its own line, then a backtrace when capture is
/// enabled (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
fn render_stack<E>(err: &E) -> String
where
    E: Error + ?Sized,
{
    let mut out = err.to_string();

    let causes: Vec<_> = chain(err.source()).collect();
    if !causes.is_empty() {
        out.push_str("\n\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            let _ = write!(out, "\n    {i}: {cause}");
        }
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "\n\nStack backtrace:\n{backtrace}");
    }

    if out.trim().is_empty() {
        out = format!("{err:?}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[derive(Debug, thiserror::Error)]
    #[error("query users failed")]
    struct QueryFailed(#[source] Refused);

    #[derive(Debug, thiserror::Error)]
    #[error("")]
    struct Silent;

    fn request_metadata() -> Metadata {
        Metadata::from([
            ("method".to_string(), "GET".to_string()),
            ("uri".to_string(), "/users/123".to_string()),
            ("status".to_string(), "500".to_string()),
        ])
    }

    #[test]
    fn test_new_copies_message_and_metadata() {
        let err = ErrInternal::new(&QueryFailed(Refused), request_metadata());

        assert_eq!(err.message(), "query users failed");
        assert_eq!(err.to_string(), "query users failed");
        assert_eq!(err.metadata(), &request_metadata());
        assert!(!err.id().is_empty());
    }

    #[test]
    fn test_stack_renders_full_chain() {
        let err = ErrInternal::new(&QueryFailed(Refused), Metadata::new());

        assert!(err.stack().starts_with("query users failed"));
        assert!(err.stack().contains("Caused by:"));
        assert!(err.stack().contains("0: connection refused"));
    }

    #[test]
    fn test_stack_captured_at_construction() {
        let cause = anyhow::Error::new(Refused).context("query users failed");
        let err = ErrInternal::new(&*cause, Metadata::new());
        let stack = err.stack().to_string();

        let rewrapped = cause.context("outer layer added later");

        assert_eq!(err.stack(), stack);
        assert!(!err.stack().contains("outer layer added later"));
        assert!(rewrapped.to_string().contains("outer layer"));
    }

    #[test]
    fn test_stack_never_empty() {
        let err = ErrInternal::new(&Silent, Metadata::new());

        assert_eq!(err.message(), "");
        assert!(!err.stack().is_empty());
    }

    #[test]
    fn test_generated_ids() {
        let ids = SequentialIdGenerator::new("fault");

        let first = ErrInternal::generated(&ids, &Refused, Metadata::new());
        let second = ErrInternal::generated(&ids, &Refused, Metadata::new()).with_id("req-7");

        assert_eq!(first.id(), "fault-1");
        assert_eq!(second.id(), "req-7");
    }
}
