//! Capability interfaces.
//!
//! An error belongs to a category when it implements that category's
//! predicate trait and the predicate returns `true`. [`ErrClient`] and
//! [`ErrInternal`] are recognised directly. Any other type takes part by
//! implementing [`Capabilities`] and being boxed with
//! [`classified()`](crate::IntoClassified::classified) before it enters an
//! error chain; unboxed, it classifies as nothing.
//!
//! [`ErrClient`]: crate::ErrClient
//! [`ErrInternal`]: crate::ErrInternal

use std::collections::HashMap;
use std::error::Error;

/// Contextual data attached to an internal error (headers, method, uri, status code).
pub type Metadata = HashMap<String, String>;

/// The error refers to something that doesn't exist or has been deleted.
pub trait NotFound {
    fn not_found(&self) -> bool;
}

/// The error was raised because an item already exists.
pub trait Duplicate {
    fn duplicate(&self) -> bool;
}

/// The caller has not identified themselves.
pub trait NotAuthenticated {
    fn not_authenticated(&self) -> bool;
}

/// The caller is known but lacks permission.
pub trait NotAuthorised {
    fn not_authorised(&self) -> bool;
}

/// A dependency of the service, such as a database, is not available.
pub trait Unavailable {
    fn unavailable(&self) -> bool;
}

/// The request was understood and valid but cannot be processed.
pub trait CannotProcess {
    fn cannot_process(&self) -> bool;
}

/// A rate limit has been reached.
pub trait TooManyRequests {
    fn too_many_requests(&self) -> bool;
}

/// The request conflicts with the current state of the system.
pub trait Conflict {
    fn conflict(&self) -> bool;
}

/// The request is not valid.
pub trait BadRequest {
    fn bad_request(&self) -> bool;
}

/// An error that can be returned to a caller.
///
/// It should not expose debug or program information, only what a consuming
/// client can act on. Transports (http, grpc, ...) build their own message
/// types from these accessors.
pub trait ClientError: Error {
    /// Correlation or request identifier for this instance.
    fn id(&self) -> &str;

    /// Codified identifier for the instance of the error, ie `N001`.
    fn code(&self) -> &str;

    /// Stable per category: every not found error has the same title.
    fn title(&self) -> &str;

    /// Human readable, instance specific detail.
    fn detail(&self) -> &str;

    /// Title and detail joined, same text as `Display`.
    fn message(&self) -> String {
        self.to_string()
    }
}

/// An error used to capture an internal fault, intended for operators and
/// error reporting systems rather than callers.
pub trait InternalError: Error {
    fn id(&self) -> &str;

    fn message(&self) -> &str;

    /// Rendering of the causal chain taken when the error was built.
    fn stack(&self) -> &str;

    fn metadata(&self) -> &Metadata;
}

/// Views a value through the capability traits it implements.
///
/// Rust cannot ask an arbitrary `dyn Error` whether it implements a trait, so
/// participating types list their capabilities here. Every view defaults to
/// `None`; use [`capabilities!`](crate::capabilities) rather than writing the
/// impl by hand.
///
/// The classification queries only find this view on the crate's own errors
/// and on [`Classified`](crate::Classified), so wrap other implementors with
/// `.classified()` where they are returned.
pub trait Capabilities: Error {
    fn as_client_error(&self) -> Option<&dyn ClientError> {
        None
    }

    fn as_internal_error(&self) -> Option<&dyn InternalError> {
        None
    }

    fn as_not_found(&self) -> Option<&dyn NotFound> {
        None
    }

    fn as_duplicate(&self) -> Option<&dyn Duplicate> {
        None
    }

    fn as_not_authenticated(&self) -> Option<&dyn NotAuthenticated> {
        None
    }

    fn as_not_authorised(&self) -> Option<&dyn NotAuthorised> {
        None
    }

    fn as_unavailable(&self) -> Option<&dyn Unavailable> {
        None
    }

    fn as_cannot_process(&self) -> Option<&dyn CannotProcess> {
        None
    }

    fn as_too_many_requests(&self) -> Option<&dyn TooManyRequests> {
        None
    }

    fn as_conflict(&self) -> Option<&dyn Conflict> {
        None
    }

    fn as_bad_request(&self) -> Option<&dyn BadRequest> {
        None
    }
}

/// Implements [`Capabilities`] for a type from the list of traits it implements.
///
/// The type still has to be boxed with `.classified()` to be seen by the
/// classification queries.
///
/// ```
/// use lathos_core::{IntoClassified, NotFound, capabilities, is_not_found};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("user {0} missing")]
/// struct UserMissing(u64);
///
/// impl NotFound for UserMissing {
///     fn not_found(&self) -> bool {
///         true
///     }
/// }
///
/// capabilities!(UserMissing => NotFound);
///
/// assert!(is_not_found(&UserMissing(1).classified()));
/// assert!(!is_not_found(&UserMissing(1)));
/// ```
#[macro_export]
macro_rules! capabilities {
    ($ty:ty => $($cap:ident),+ $(,)?) => {
        impl $crate::Capabilities for $ty {
            $( $crate::__capability_view!($cap); )+
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __capability_view {
    (ClientError) => {
        fn as_client_error(&self) -> ::std::option::Option<&dyn $crate::ClientError> {
            ::std::option::Option::Some(self)
        }
    };
    (InternalError) => {
        fn as_internal_error(&self) -> ::std::option::Option<&dyn $crate::InternalError> {
            ::std::option::Option::Some(self)
        }
    };
    (NotFound) => {
        fn as_not_found(&self) -> ::std::option::Option<&dyn $crate::NotFound> {
            ::std::option::Option::Some(self)
        }
    };
    (Duplicate) => {
        fn as_duplicate(&self) -> ::std::option::Option<&dyn $crate::Duplicate> {
            ::std::option::Option::Some(self)
        }
    };
    (NotAuthenticated) => {
        fn as_not_authenticated(&self) -> ::std::option::Option<&dyn $crate::NotAuthenticated> {
            ::std::option::Option::Some(self)
        }
    };
    (NotAuthorised) => {
        fn as_not_authorised(&self) -> ::std::option::Option<&dyn $crate::NotAuthorised> {
            ::std::option::Option::Some(self)
        }
    };
    (Unavailable) => {
        fn as_unavailable(&self) -> ::std::option::Option<&dyn $crate::Unavailable> {
            ::std::option::Option::Some(self)
        }
    };
    (CannotProcess) => {
        fn as_cannot_process(&self) -> ::std::option::Option<&dyn $crate::CannotProcess> {
            ::std::option::Option::Some(self)
        }
    };
    (TooManyRequests) => {
        fn as_too_many_requests(&self) -> ::std::option::Option<&dyn $crate::TooManyRequests> {
            ::std::option::Option::Some(self)
        }
    };
    (Conflict) => {
        fn as_conflict(&self) -> ::std::option::Option<&dyn $crate::Conflict> {
            ::std::option::Option::Some(self)
        }
    };
    (BadRequest) => {
        fn as_bad_request(&self) -> ::std::option::Option<&dyn $crate::BadRequest> {
            ::std::option::Option::Some(self)
        }
    };
}
