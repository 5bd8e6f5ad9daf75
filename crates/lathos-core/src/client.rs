//! Client errors - problems a caller can fix or act on.
//!
//! These are not meant to be logged as faults: they cover validation issues,
//! bad inputs, missing resources and the like. In terms of a web server this
//! is the 4XX range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capability::{
    BadRequest, CannotProcess, ClientError, Conflict, Duplicate, NotAuthenticated, NotAuthorised,
    NotFound, TooManyRequests, Unavailable,
};
use crate::ids::{IdGenerator, UuidGenerator};

/// The client error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    NotFound,
    Duplicate,
    NotAuthenticated,
    NotAuthorised,
    NotAvailable,
    Unprocessable,
    TooManyRequests,
    Conflict,
    BadRequest,
}

impl ClientKind {
    pub const ALL: [ClientKind; 9] = [
        ClientKind::NotFound,
        ClientKind::Duplicate,
        ClientKind::NotAuthenticated,
        ClientKind::NotAuthorised,
        ClientKind::NotAvailable,
        ClientKind::Unprocessable,
        ClientKind::TooManyRequests,
        ClientKind::Conflict,
        ClientKind::BadRequest,
    ];

    /// Title shared by every error of this kind.
    pub fn title(self) -> &'static str {
        match self {
            ClientKind::NotFound => "Not found",
            ClientKind::Duplicate => "Item already exists",
            ClientKind::NotAuthenticated => "Not authenticated",
            ClientKind::NotAuthorised => "Permission denied",
            ClientKind::NotAvailable => "Not available",
            ClientKind::Unprocessable => "Unprocessable",
            ClientKind::TooManyRequests => "Too many requests",
            ClientKind::Conflict => "Conflict",
            ClientKind::BadRequest => "Bad Request",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClientKind::NotFound => "not_found",
            ClientKind::Duplicate => "duplicate",
            ClientKind::NotAuthenticated => "not_authenticated",
            ClientKind::NotAuthorised => "not_authorised",
            ClientKind::NotAvailable => "not_available",
            ClientKind::Unprocessable => "unprocessable",
            ClientKind::TooManyRequests => "too_many_requests",
            ClientKind::Conflict => "conflict",
            ClientKind::BadRequest => "bad_request",
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client error of one [`ClientKind`].
///
/// It answers `true` to its own kind's predicate and `false` to the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .kind.title(), .detail)]
pub struct ErrClient {
    id: String,
    code: String,
    kind: ClientKind,
    detail: String,
}

impl ErrClient {
    /// Create a client error with a random identifier.
    ///
    /// `code` identifies this particular error in your application, ie `E404`,
    /// so clients can show a custom message. `detail` gives more context, ie
    /// "resource 123 does not exist".
    pub fn new(kind: ClientKind, code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::generated(&UuidGenerator, kind, code, detail)
    }

    /// Create a client error taking its identifier from `ids`.
    pub fn generated(
        ids: &dyn IdGenerator,
        kind: ClientKind,
        code: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: ids.generate(),
            code: code.into(),
            kind,
            detail: detail.into(),
        }
    }

    /// Replace the identifier, ie with a request or correlation ID in an error handler.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    pub fn not_found(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::NotFound, code, detail)
    }

    pub fn duplicate(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::Duplicate, code, detail)
    }

    pub fn not_authenticated(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::NotAuthenticated, code, detail)
    }

    pub fn not_authorised(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::NotAuthorised, code, detail)
    }

    /// A part of the service, such as a database, is not available.
    pub fn not_available(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::NotAvailable, code, detail)
    }

    /// The request is valid but the system cannot carry on with it.
    pub fn unprocessable(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::Unprocessable, code, detail)
    }

    pub fn too_many_requests(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::TooManyRequests, code, detail)
    }

    pub fn conflict(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::Conflict, code, detail)
    }

    pub fn bad_request(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ClientKind::BadRequest, code, detail)
    }
}

impl ClientError for ErrClient {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn title(&self) -> &str {
        self.kind.title()
    }

    fn detail(&self) -> &str {
        &self.detail
    }
}

impl NotFound for ErrClient {
    fn not_found(&self) -> bool {
        self.kind == ClientKind::NotFound
    }
}

impl Duplicate for ErrClient {
    fn duplicate(&self) -> bool {
        self.kind == ClientKind::Duplicate
    }
}

impl NotAuthenticated for ErrClient {
    fn not_authenticated(&self) -> bool {
        self.kind == ClientKind::NotAuthenticated
    }
}

impl NotAuthorised for ErrClient {
    fn not_authorised(&self) -> bool {
        self.kind == ClientKind::NotAuthorised
    }
}

impl Unavailable for ErrClient {
    fn unavailable(&self) -> bool {
        self.kind == ClientKind::NotAvailable
    }
}

impl CannotProcess for ErrClient {
    fn cannot_process(&self) -> bool {
        self.kind == ClientKind::Unprocessable
    }
}

impl TooManyRequests for ErrClient {
    fn too_many_requests(&self) -> bool {
        self.kind == ClientKind::TooManyRequests
    }
}

impl Conflict for ErrClient {
    fn conflict(&self) -> bool {
        self.kind == ClientKind::Conflict
    }
}

impl BadRequest for ErrClient {
    fn bad_request(&self) -> bool {
        self.kind == ClientKind::BadRequest
    }
}

crate::capabilities!(
    ErrClient => ClientError,
    NotFound,
    Duplicate,
    NotAuthenticated,
    NotAuthorised,
    Unavailable,
    CannotProcess,
    TooManyRequests,
    Conflict,
    BadRequest,
);

/// Build a not found [`ErrClient`] with a `format!` style detail.
///
/// ```
/// let err = lathos_core::not_found!("E1", "thing {} missing", 42);
/// assert_eq!(err.to_string(), "Not found: thing 42 missing");
/// ```
#[macro_export]
macro_rules! not_found {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::not_found($code, ::std::format!($($arg)+))
    };
}

/// Build a duplicate [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! duplicate {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::duplicate($code, ::std::format!($($arg)+))
    };
}

/// Build a not authenticated [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! not_authenticated {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::not_authenticated($code, ::std::format!($($arg)+))
    };
}

/// Build a not authorised [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! not_authorised {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::not_authorised($code, ::std::format!($($arg)+))
    };
}

/// Build a not available [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! not_available {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::not_available($code, ::std::format!($($arg)+))
    };
}

/// Build an unprocessable [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! unprocessable {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::unprocessable($code, ::std::format!($($arg)+))
    };
}

/// Build a too many requests [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! too_many_requests {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::too_many_requests($code, ::std::format!($($arg)+))
    };
}

/// Build a conflict [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! conflict {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::conflict($code, ::std::format!($($arg)+))
    };
}

/// Build a bad request [`ErrClient`] with a `format!` style detail.
#[macro_export]
macro_rules! bad_request {
    ($code:expr, $($arg:tt)+) => {
        $crate::ErrClient::bad_request($code, ::std::format!($($arg)+))
    };
}
