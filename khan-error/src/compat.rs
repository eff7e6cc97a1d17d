//! Chain walking under the familiar names.
//!
//! These are the only chain primitives callers need: with them, an error
//! built by this crate can be inspected the same way as any other.

use std::error::Error as StdError;

use crate::chain;

/// The deepest error in the chain (`err` itself if it has no source).
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    chain::unwrap_all(err)
}

/// The error `err` wraps, one level down.
pub fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    chain::unwrap_once(err)
}

/// Whether any error in the chain equals `reference`.
///
/// An error built by this crate also counts as equal to its kind, so
/// `is(&err, &Kind::NotFound)` asks whether anything in the chain is a
/// not-found error.
///
/// ```rust
/// use khan_error::{internal, is, unauthorized, Kind};
///
/// let err = internal!(unauthorized!());
/// assert!(is(&err, &Kind::Internal));
/// assert!(is(&err, &Kind::Unauthorized));
/// assert!(!is(&err, &Kind::NotFound));
/// ```
pub fn is<T>(err: &(dyn StdError + 'static), reference: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    chain::is(err, reference)
}

/// The first error of type `T` in the chain.
pub fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    chain::find(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{internal, not_found, Error, Kind};
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Sentinel(&'static str);

    impl fmt::Display for Sentinel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Sentinel {}

    #[test]
    fn test_unwrap_twice_reaches_foreign_root() {
        let err = internal!(crate::Cause::foreign(Sentinel("This is not OK")));

        let root = unwrap(unwrap(&err).unwrap()).unwrap();
        assert_eq!(root.downcast_ref::<Sentinel>(), Some(&Sentinel("This is not OK")));
        assert_eq!(cause(&err).downcast_ref::<Sentinel>(), Some(&Sentinel("This is not OK")));
    }

    #[test]
    fn test_cause_of_leaf_is_itself() {
        let err = not_found!();
        assert!(cause(&err).is::<Error>());
        assert!(unwrap(&err).is_none());
    }

    #[test]
    fn test_is_by_value() {
        let err = not_found!(crate::Cause::foreign(Sentinel("sentinel")));
        assert!(is(&err, &Sentinel("sentinel")));
        assert!(!is(&err, &Sentinel("other")));
        assert!(is(&err, &Kind::NotFound));
        assert!(!is(&err, &Kind::Internal));

        let plain = Sentinel("sentinel");
        assert!(!is(&plain, &Kind::Internal));
    }

    #[test]
    fn test_find() {
        let inner = Sentinel("inner");
        assert!(find::<Sentinel>(&inner).is_some());

        let err = internal!();
        assert!(find::<Sentinel>(&err).is_none());

        let err = internal!(crate::Cause::foreign(Sentinel("inner")));
        assert_eq!(find::<Sentinel>(&err), Some(&Sentinel("inner")));
    }
}
