//! Carrier that lets foreign error types take part in classification.

use std::error::Error;
use std::fmt;

use crate::capability::Capabilities;

/// Boxes an error that implements [`Capabilities`] so the classification
/// queries can see it anywhere in a causal chain.
///
/// `Display`, `Debug` and `source` are forwarded to the inner error, so
/// wrapping is transparent to everything else.
pub struct Classified {
    inner: Box<dyn Capabilities + Send + Sync>,
}

impl Classified {
    pub fn new<E>(err: E) -> Self
    where
        E: Capabilities + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(err),
        }
    }

    pub fn capabilities(&self) -> &(dyn Capabilities + Send + Sync) {
        &*self.inner
    }

    pub fn into_inner(self) -> Box<dyn Capabilities + Send + Sync> {
        self.inner
    }
}

impl fmt::Debug for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for Classified {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// `err.classified()` shorthand for [`Classified::new`].
pub trait IntoClassified: Capabilities + Send + Sync + Sized + 'static {
    fn classified(self) -> Classified {
        Classified::new(self)
    }
}

impl<E> IntoClassified for E where E: Capabilities + Send + Sync + 'static {}
