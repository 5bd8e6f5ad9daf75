//! # Lathos Core
//!
//! A small error taxonomy. An error belongs to a category when it exposes
//! that category's capability, and the classification queries find it
//! anywhere in an error's `source()` chain without the caller knowing the
//! concrete type that produced it.
//!
//! ```
//! use lathos_core::{ErrClient, is_client_error, is_duplicate, is_not_found};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("saving user failed")]
//! struct SaveFailed(#[source] ErrClient);
//!
//! let err = SaveFailed(ErrClient::duplicate("D001", "resource 123 already exists"));
//!
//! assert!(is_duplicate(&err));
//! assert!(is_client_error(&err));
//! assert!(!is_not_found(&err));
//! ```
//!
//! Mapping categories to transport status codes is left to the consumer.

pub mod capability;
pub mod classified;
pub mod classify;
pub mod client;
pub mod ids;
pub mod internal;

pub use capability::{
    BadRequest, CannotProcess, Capabilities, ClientError, Conflict, Duplicate, InternalError,
    Metadata, NotAuthenticated, NotAuthorised, NotFound, TooManyRequests, Unavailable,
};
pub use classified::{Classified, IntoClassified};
pub use classify::{
    Classify, chain, find_client_error, find_internal_error, is_bad_request, is_cannot_process,
    is_client_error, is_conflict, is_duplicate, is_internal_error, is_not_authenticated,
    is_not_authorised, is_not_found, is_too_many_requests, is_unavailable,
};
pub use client::{ClientKind, ErrClient};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use internal::ErrInternal;
