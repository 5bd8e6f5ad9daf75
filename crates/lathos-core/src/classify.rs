//! Classification engine.
//!
//! Each query walks the `Error::source` chain from the outermost error
//! inwards. At every node it tries to view the node through
//! [`Capabilities`]; if the view exposes the probed capability and its
//! predicate returns `true` the query succeeds and deeper nodes are not
//! inspected. An exhausted chain answers `false`. Queries never fail.

use std::error::Error;
use std::iter;

use crate::capability::{Capabilities, ClientError, InternalError};
use crate::classified::Classified;
use crate::client::ErrClient;
use crate::internal::ErrInternal;

/// The causal chain of `err`, outermost first. `None` yields nothing.
pub fn chain<'a>(
    err: Option<&'a (dyn Error + 'static)>,
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    iter::successors(err, |&e| e.source())
}

/// The capability view of one chain node, if its type participates.
fn capabilities_of<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a dyn Capabilities> {
    if let Some(err) = node.downcast_ref::<ErrClient>() {
        return Some(err);
    }
    if let Some(err) = node.downcast_ref::<ErrInternal>() {
        return Some(err);
    }
    node.downcast_ref::<Classified>()
        .map(|c| c.capabilities() as &dyn Capabilities)
}

type Probe = fn(&dyn Capabilities) -> Option<bool>;

fn holds(err: Option<&(dyn Error + 'static)>, probe: Probe) -> bool {
    chain(err)
        .filter_map(capabilities_of)
        .any(|caps| probe(caps) == Some(true))
}

fn client_error(c: &dyn Capabilities) -> Option<bool> {
    c.as_client_error().map(|_| true)
}

fn internal_error(c: &dyn Capabilities) -> Option<bool> {
    c.as_internal_error().map(|_| true)
}

fn not_found(c: &dyn Capabilities) -> Option<bool> {
    c.as_not_found().map(|p| p.not_found())
}

fn duplicate(c: &dyn Capabilities) -> Option<bool> {
    c.as_duplicate().map(|p| p.duplicate())
}

fn not_authenticated(c: &dyn Capabilities) -> Option<bool> {
    c.as_not_authenticated().map(|p| p.not_authenticated())
}

fn not_authorised(c: &dyn Capabilities) -> Option<bool> {
    c.as_not_authorised().map(|p| p.not_authorised())
}

fn unavailable(c: &dyn Capabilities) -> Option<bool> {
    c.as_unavailable().map(|p| p.unavailable())
}

fn cannot_process(c: &dyn Capabilities) -> Option<bool> {
    c.as_cannot_process().map(|p| p.cannot_process())
}

fn too_many_requests(c: &dyn Capabilities) -> Option<bool> {
    c.as_too_many_requests().map(|p| p.too_many_requests())
}

fn conflict(c: &dyn Capabilities) -> Option<bool> {
    c.as_conflict().map(|p| p.conflict())
}

fn bad_request(c: &dyn Capabilities) -> Option<bool> {
    c.as_bad_request().map(|p| p.bad_request())
}

/// First client error in the chain of `err`.
pub fn find_client_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn ClientError> {
    chain(Some(err))
        .filter_map(capabilities_of)
        .find_map(|c| c.as_client_error())
}

/// First internal error in the chain of `err`.
pub fn find_internal_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn InternalError> {
    chain(Some(err))
        .filter_map(capabilities_of)
        .find_map(|c| c.as_internal_error())
}

/// `err` or one of its causes is a [`ClientError`].
pub fn is_client_error(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), client_error)
}

/// `err` or one of its causes is an [`InternalError`].
pub fn is_internal_error(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), internal_error)
}

/// Can be used throughout your code or in an error handler to check that
/// `err` is a not found error.
pub fn is_not_found(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), not_found)
}

pub fn is_duplicate(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), duplicate)
}

pub fn is_not_authenticated(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), not_authenticated)
}

pub fn is_not_authorised(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), not_authorised)
}

pub fn is_unavailable(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), unavailable)
}

pub fn is_cannot_process(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), cannot_process)
}

pub fn is_too_many_requests(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), too_many_requests)
}

pub fn is_conflict(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), conflict)
}

pub fn is_bad_request(err: &(dyn Error + 'static)) -> bool {
    holds(Some(err), bad_request)
}

/// Method form of the classification queries.
///
/// Implemented for the `dyn Error` types, this crate's errors, and through
/// references, boxes and `Option` (where `None` answers `false` to everything).
pub trait Classify {
    /// The outermost error, if any.
    fn as_error(&self) -> Option<&(dyn Error + 'static)>;

    fn is_client_error(&self) -> bool {
        holds(self.as_error(), client_error)
    }

    fn is_internal_error(&self) -> bool {
        holds(self.as_error(), internal_error)
    }

    fn is_not_found(&self) -> bool {
        holds(self.as_error(), not_found)
    }

    fn is_duplicate(&self) -> bool {
        holds(self.as_error(), duplicate)
    }

    fn is_not_authenticated(&self) -> bool {
        holds(self.as_error(), not_authenticated)
    }

    fn is_not_authorised(&self) -> bool {
        holds(self.as_error(), not_authorised)
    }

    fn is_unavailable(&self) -> bool {
        holds(self.as_error(), unavailable)
    }

    fn is_cannot_process(&self) -> bool {
        holds(self.as_error(), cannot_process)
    }

    fn is_too_many_requests(&self) -> bool {
        holds(self.as_error(), too_many_requests)
    }

    fn is_conflict(&self) -> bool {
        holds(self.as_error(), conflict)
    }

    fn is_bad_request(&self) -> bool {
        holds(self.as_error(), bad_request)
    }
}

impl Classify for dyn Error + 'static {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl Classify for dyn Error + Send + Sync + 'static {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl Classify for ErrClient {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl Classify for ErrInternal {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl Classify for Classified {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        (**self).as_error()
    }
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        (**self).as_error()
    }
}

impl<T: Classify> Classify for Option<T> {
    fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        self.as_ref().and_then(|err| err.as_error())
    }
}
