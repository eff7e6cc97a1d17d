//! Constructors, `wrap`, and kind/field resolution

use std::error::Error as StdError;
use std::panic::Location;

use crate::args::{self, Arg};
use crate::{
    chain, fields, Cause, Error, FieldValue, Fields, Kind, BAD_ARGS_KEY, KIND_KEY, MESSAGE_KEY,
    ORIGIN_KEY, SOURCE_KEY,
};

/// Build an error of `kind` from constructor arguments.
///
/// The merged fields start from the resolved kind, take every key the
/// wrapped chain contributes (nearest layer wins, `Source`/`Origin` are
/// dropped), then the caller's fields, then the message.
#[track_caller]
fn new_error(kind: Kind, args: Vec<Arg>) -> Error {
    let mut node = args::classify(kind, args);

    let mut fields = Fields::new();
    fields.insert(KIND_KEY, node.resolved_kind());
    for wrapped in node.wrapped_fields() {
        for (key, value) in wrapped {
            if key == SOURCE_KEY || key == ORIGIN_KEY || fields.contains_key(&key) {
                continue;
            }
            fields.insert(key, value);
        }
    }
    fields.extend(node.extra().clone());
    if !node.message().is_empty() {
        fields.insert(MESSAGE_KEY, node.message());
    }

    // Tag a real cause with the new kind so kind matching sees both the
    // new kind and whatever the cause already carried.
    let cause = match node.take_cause() {
        Some(cause) if cause.bare_kind() != Some(kind) => Some(cause.tagged(kind)),
        _ => None,
    };
    node.set_cause(cause);

    Error::new(node, fields, Location::caller())
}

/// Creates an error of kind [`Kind::NotFound`].
///
/// Arguments may be:
/// 1. an error or kind to wrap
/// 2. a string to use as the error message
/// 3. [`Fields`] of key/value pairs to associate with the error
///
/// If any of these is given more than once, the last one wins. Anything
/// else is recorded as an invalid argument instead of failing. The
/// [`not_found!`](crate::not_found!) macro converts each argument with `Arg::from`.
#[track_caller]
pub fn not_found(args: Vec<Arg>) -> Error {
    new_error(Kind::NotFound, args)
}

/// Creates an error of kind [`Kind::InvalidInput`].
#[track_caller]
pub fn invalid_input(args: Vec<Arg>) -> Error {
    new_error(Kind::InvalidInput, args)
}

/// Creates an error of kind [`Kind::NotAllowed`].
#[track_caller]
pub fn not_allowed(args: Vec<Arg>) -> Error {
    new_error(Kind::NotAllowed, args)
}

/// Creates an error of kind [`Kind::Unauthorized`].
#[track_caller]
pub fn unauthorized(args: Vec<Arg>) -> Error {
    new_error(Kind::Unauthorized, args)
}

/// Creates an error of kind [`Kind::Internal`].
#[track_caller]
pub fn internal(args: Vec<Arg>) -> Error {
    new_error(Kind::Internal, args)
}

/// Creates an error of kind [`Kind::NotImplemented`].
#[track_caller]
pub fn not_implemented(args: Vec<Arg>) -> Error {
    new_error(Kind::NotImplemented, args)
}

/// Creates an error of kind [`Kind::GraphqlResponse`].
#[track_caller]
pub fn graphql_response(args: Vec<Arg>) -> Error {
    new_error(Kind::GraphqlResponse, args)
}

/// Creates an error of kind [`Kind::TransientKhanService`].
#[track_caller]
pub fn transient_khan_service(args: Vec<Arg>) -> Error {
    new_error(Kind::TransientKhanService, args)
}

/// Creates an error of kind [`Kind::KhanService`].
#[track_caller]
pub fn khan_service(args: Vec<Arg>) -> Error {
    new_error(Kind::KhanService, args)
}

/// Creates an error of kind [`Kind::Service`].
#[track_caller]
pub fn service(args: Vec<Arg>) -> Error {
    new_error(Kind::Service, args)
}

/// Creates an error of kind [`Kind::TransientService`].
#[track_caller]
pub fn transient_service(args: Vec<Arg>) -> Error {
    new_error(Kind::TransientService, args)
}

/// Wrapping went wrong; report it as an internal error around `err`.
#[track_caller]
fn fail(message: &str, err: Cause, fields: Fields) -> Error {
    internal(vec![message.into(), err.into(), fields.into()])
}

/// Add fields to an error, keeping its kind.
///
/// `args` alternate string keys and values. `None` in gives `None` out.
///
/// A malformed `args` list (odd length, or a key that isn't a string) never
/// panics: the result is an internal error describing the problem, wrapping
/// `err`. An `err` with no [`Error`] anywhere in its chain is wrapped as
/// [`Kind::Internal`]. That default is not always right (a failed call to a
/// storage client would be better as [`Kind::Service`]), so such clients
/// should return errors built by this crate at their boundary.
///
/// ```rust
/// use khan_error::{get_kind, not_found, wrap, Kind};
///
/// let err = wrap!(not_found!("no such user"), "kaid", "kaid_123", "attempt", 2);
/// assert_eq!(get_kind(&err), Kind::NotFound);
/// assert_eq!(err.fields()["kaid"], "kaid_123");
/// ```
#[track_caller]
pub fn wrap<E: Into<Cause>>(err: Option<E>, args: Vec<FieldValue>) -> Option<Error> {
    let err = err?;
    Some(wrap_error(err, args))
}

/// [`wrap`] for an error that is known to be present.
#[track_caller]
pub fn wrap_error<E: Into<Cause>>(err: E, args: Vec<FieldValue>) -> Error {
    let err = err.into();

    if args.len() % 2 != 0 {
        return fail(
            "Passed an odd number of field-args to wrap()",
            err,
            fields! { BAD_ARGS_KEY => FieldValue::List(args) },
        );
    }

    let mut fields = Fields::new();
    let mut pairs = args.into_iter();
    while let (Some(key), Some(value)) = (pairs.next(), pairs.next()) {
        match key {
            FieldValue::Str(key) => {
                fields.insert(key, value);
            }
            other => {
                return fail(
                    "Passed a non-string key-field to wrap()",
                    err,
                    fields! { "key" => other },
                );
            }
        }
    }

    if let Some(kind) = err.bare_kind() {
        return new_error(kind, vec![fields.into()]);
    }

    match chain::find::<Error>(err.as_dyn()).map(Error::kind) {
        None => internal(vec![err.into(), fields.into()]),
        Some(Kind::Unspecified) => {
            fail("Cannot determine kind of error-to-wrap", err, Fields::new())
        }
        Some(kind) => new_error(kind, vec![err.into(), fields.into()]),
    }
}

/// The kind of `err`.
///
/// The nearest [`Error`] in the chain decides; failing that, the nearest
/// bare kind. Anything else is [`Kind::Unspecified`].
pub fn get_kind(err: &(dyn StdError + 'static)) -> Kind {
    if let Some(found) = chain::find::<Error>(err) {
        return found.kind();
    }
    chain::kind_of(err).unwrap_or(Kind::Unspecified)
}

/// The merged fields of the nearest [`Error`] in the chain, or none.
pub fn get_fields(err: &(dyn StdError + 'static)) -> Fields {
    chain::fields_of(err).cloned().unwrap_or_default()
}

/// Whether `err` itself, not its causes, is one of ours.
///
/// Use it to decide whether a foreign error should be wrapped before
/// logging. To get at the details of an error somewhere in a chain use
/// [`crate::find`] instead.
pub fn is_khan_error(err: &(dyn StdError + 'static)) -> bool {
    err.is::<Error>() || err.is::<Kind>()
}

/// Attach fields to the error of a `Result`, keeping its kind.
pub trait ResultExt<T> {
    /// [`wrap`] the error, if any, with alternating key/value `args`.
    fn wrap_fields(self, args: Vec<FieldValue>) -> Result<T, Error>;

    /// Turn any error into one of ours, keeping the kind if it already has one.
    fn or_internal(self) -> Result<T, Error>;
}

impl<T, E: Into<Cause>> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn wrap_fields(self, args: Vec<FieldValue>) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap_error(err, args)),
        }
    }

    #[track_caller]
    fn or_internal(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(wrap_error(err, Vec::new())),
        }
    }
}

/// Create a [`Kind::NotFound`] error from any number of [`Arg`]-convertible arguments.
#[macro_export]
macro_rules! not_found {
    ($($arg:expr),* $(,)?) => {
        $crate::not_found(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::InvalidInput`](crate::Kind::InvalidInput) error.
#[macro_export]
macro_rules! invalid_input {
    ($($arg:expr),* $(,)?) => {
        $crate::invalid_input(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::NotAllowed`](crate::Kind::NotAllowed) error.
#[macro_export]
macro_rules! not_allowed {
    ($($arg:expr),* $(,)?) => {
        $crate::not_allowed(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::Unauthorized`](crate::Kind::Unauthorized) error.
#[macro_export]
macro_rules! unauthorized {
    ($($arg:expr),* $(,)?) => {
        $crate::unauthorized(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::Internal`](crate::Kind::Internal) error.
#[macro_export]
macro_rules! internal {
    ($($arg:expr),* $(,)?) => {
        $crate::internal(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::NotImplemented`](crate::Kind::NotImplemented) error.
#[macro_export]
macro_rules! not_implemented {
    ($($arg:expr),* $(,)?) => {
        $crate::not_implemented(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::GraphqlResponse`](crate::Kind::GraphqlResponse) error.
#[macro_export]
macro_rules! graphql_response {
    ($($arg:expr),* $(,)?) => {
        $crate::graphql_response(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::TransientKhanService`](crate::Kind::TransientKhanService) error.
#[macro_export]
macro_rules! transient_khan_service {
    ($($arg:expr),* $(,)?) => {
        $crate::transient_khan_service(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::KhanService`](crate::Kind::KhanService) error.
#[macro_export]
macro_rules! khan_service {
    ($($arg:expr),* $(,)?) => {
        $crate::khan_service(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::Service`](crate::Kind::Service) error.
#[macro_export]
macro_rules! service {
    ($($arg:expr),* $(,)?) => {
        $crate::service(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// Create a [`Kind::TransientService`](crate::Kind::TransientService) error.
#[macro_export]
macro_rules! transient_service {
    ($($arg:expr),* $(,)?) => {
        $crate::transient_service(::std::vec![$($crate::Arg::from($arg)),*])
    };
}

/// [`wrap_error`](crate::wrap_error()) an error with alternating key/value arguments.
#[macro_export]
macro_rules! wrap {
    ($err:expr $(, $arg:expr)* $(,)?) => {
        $crate::wrap_error($err, ::std::vec![$($crate::FieldValue::from($arg)),*])
    };
}
