//! # khan-error
//!
//! Errors tagged with a kind and carrying structured fields for logging.
//!
//! ## Design Philosophy
//!
//! - **Kind**: a small closed set of categories (not found, unauthorized,
//!   internal, ...) answering "what went wrong" for callers and dashboards
//! - **Fields**: key/value pairs for structured logs, merged up the chain so
//!   the outermost error carries everything worth logging
//! - **Chain**: wrapping keeps the original error reachable, and both the new
//!   and the original kind stay matchable
//! - **Fail-soft**: constructing an error never panics; misuse turns into an
//!   internal error that describes itself
//!
//! ## Usage
//!
//! ```rust
//! use khan_error::{fields, get_fields, get_kind, internal, is, not_found, wrap, Kind};
//!
//! fn load(id: u64) -> khan_error::Result<()> {
//!     Err(not_found!("no such exercise", fields! { "id" => id }))
//! }
//!
//! let err = load(7).unwrap_err();
//! let err = wrap!(err, "handler", "exercises");
//!
//! assert_eq!(get_kind(&err), Kind::NotFound);
//! assert_eq!(get_fields(&err)["handler"], "exercises");
//! assert!(is(&err, &Kind::NotFound));
//!
//! let outer = internal!(err);
//! assert!(is(&outer, &Kind::Internal));
//! assert!(is(&outer, &Kind::NotFound));
//! ```
//!
//! ## Principles
//!
//! - Construct errors with the kind macros (`not_found!`, `internal!`, ...)
//! - Add context with `wrap!`, which keeps the kind
//! - Foreign errors are wrapped as causes, never leaked as raw types
//! - Query with `get_kind`, `get_fields`, `is` and `find`

mod args;
mod chain;
mod compat;
mod construct;
mod error;
mod fields;
mod kind;
mod log;
mod node;

pub use args::Arg;
pub use chain::Cause;
pub use compat::{cause, find, is, unwrap};
pub use construct::{
    get_fields, get_kind, graphql_response, internal, invalid_input, is_khan_error, khan_service,
    not_allowed, not_found, not_implemented, service, transient_khan_service, transient_service,
    unauthorized, wrap, wrap_error, ResultExt,
};
pub use error::Error;
pub use fields::{
    stringify_field, FieldValue, Fields, BAD_ARGS_KEY, INVALID_ERR_ARGS_KEY, KIND_KEY, MESSAGE_KEY,
    ORIGIN_KEY, SOURCE_KEY,
};
pub use kind::{is_valid_kind, Kind, ParseKindError};
pub use log::log_error;

/// Result type alias using khan Error
pub type Result<T> = std::result::Result<T, Error>;
