//! Chain storage and walking.
//!
//! A chain is the sequence of errors reachable from a value by repeated
//! [`std::error::Error::source`] calls. Foreign errors are stored as
//! [`anyhow::Error`], which keeps their own chain intact and captures a
//! backtrace when enabled through `RUST_BACKTRACE`.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::{Error, Fields, Kind};

/// An error wrapped by a constructed [`Error`].
///
/// Built from a bare [`Kind`] (a sentinel carrying no payload), from
/// another [`Error`], or from any foreign error through [`Cause::foreign`].
pub struct Cause(Repr);

enum Repr {
    Kind(Kind),
    Error(anyhow::Error),
    Tagged(Box<Tagged>),
}

impl Cause {
    /// Wrap a foreign error, keeping its own chain
    pub fn foreign<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Cause(Repr::Error(anyhow::Error::new(err)))
    }

    /// The cause as a chain link
    pub fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match &self.0 {
            Repr::Kind(kind) => kind,
            Repr::Error(err) => &**err,
            Repr::Tagged(tagged) => &**tagged,
        }
    }

    /// The kind, when the cause is a bare kind sentinel
    pub fn bare_kind(&self) -> Option<Kind> {
        match &self.0 {
            Repr::Kind(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Tag this cause so kind matching also succeeds against `kind`.
    pub(crate) fn tagged(self, kind: Kind) -> Cause {
        Cause(Repr::Tagged(Box::new(Tagged { kind, inner: self })))
    }
}

impl From<Kind> for Cause {
    fn from(kind: Kind) -> Self {
        Cause(Repr::Kind(kind))
    }
}

impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        Cause(Repr::Error(err))
    }
}

impl From<Error> for Cause {
    fn from(err: Error) -> Self {
        Cause::foreign(err)
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::foreign(err)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Kind(kind) => write!(f, "{:?}", kind),
            Repr::Error(err) => write!(f, "{:?}", err),
            Repr::Tagged(tagged) => write!(f, "{:?}", tagged),
        }
    }
}

/// A chain link that also answers kind matches for `kind`.
///
/// Display and source are the inner error's, so tagging never changes how a
/// chain renders.
pub(crate) struct Tagged {
    kind: Kind,
    inner: Cause,
}

impl fmt::Display for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Tagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:?}", self.kind, self.inner)
    }
}

impl StdError for Tagged {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_dyn())
    }
}

/// Walk the chain starting at `err` itself.
pub(crate) fn iter<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |e: &&'a (dyn StdError + 'static)| (*e).source())
}

pub(crate) fn unwrap_once<'a>(
    err: &'a (dyn StdError + 'static),
) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// The deepest error in the chain
pub(crate) fn unwrap_all<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    iter(err).last().unwrap_or(err)
}

/// First link of type `T`.
pub(crate) fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    iter(err).find_map(|link| link.downcast_ref::<T>())
}

/// Whether any link equals `reference`, or matches it as a kind.
pub(crate) fn is<T>(err: &(dyn StdError + 'static), reference: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    let target = reference as &dyn Any;
    iter(err).any(|link| {
        link.downcast_ref::<T>() == Some(reference) || matches_kind(link, target)
    })
}

/// Kind matching for links that carry a kind without being one.
fn matches_kind(link: &(dyn StdError + 'static), target: &dyn Any) -> bool {
    let Some(kind) = target.downcast_ref::<Kind>() else {
        return false;
    };
    if let Some(err) = link.downcast_ref::<Error>() {
        return err.is_kind(*kind);
    }
    link.downcast_ref::<Tagged>().is_some_and(|tagged| tagged.kind == *kind)
}

/// First kind found in the chain, as a bare kind or a tag.
pub(crate) fn kind_of(err: &(dyn StdError + 'static)) -> Option<Kind> {
    iter(err).find_map(|link| {
        link.downcast_ref::<Kind>()
            .copied()
            .or_else(|| link.downcast_ref::<Tagged>().map(|tagged| tagged.kind))
    })
}

/// The structured fields nearest to `err`.
pub(crate) fn fields_of<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Fields> {
    find::<Error>(err).map(Error::fields)
}
