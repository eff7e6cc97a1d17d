//! Error kinds: the closed catalogue of error categories

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The category of an error, like an exception class.
///
/// Kinds are deliberately few and general so they stay useful across
/// contexts and when grouping errors in logs. The set is closed: there is no
/// way to register new kinds at runtime.
///
/// A `Kind` is itself an error value. That lets a bare kind act as a
/// sentinel cause, and lets [`crate::is`] match any error in a chain against
/// a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Some requested resource wasn't found.
    ///
    /// Use `Unauthorized` when access control hid the resource and
    /// `InvalidInput` when the lookup input itself was bad.
    NotFound,

    /// The provided input is problematic regardless of system state.
    InvalidInput,

    /// The input is valid but conflicts with the state of the system,
    /// e.g. a username that is already taken.
    NotAllowed,

    /// An access control problem.
    Unauthorized,

    /// Failure unrelated to input or remote systems. The default kind.
    Internal,

    /// The function isn't implemented.
    NotImplemented,

    /// A graphql call executed but its response carried an error code.
    GraphqlResponse,

    /// Contacting another Khan service failed in a way that may succeed on retry.
    TransientKhanService,

    /// Contacting another Khan service failed permanently.
    KhanService,

    /// A request to a non-Khan service (e.g. datastore) failed in a way that
    /// may succeed on retry.
    TransientService,

    /// A request to a non-Khan service failed permanently.
    Service,

    /// No kind was specified. There is no constructor for this kind.
    Unspecified,
}

impl Kind {
    /// Every member of the catalogue, `Unspecified` last.
    pub const ALL: [Kind; 12] = [
        Kind::NotFound,
        Kind::InvalidInput,
        Kind::NotAllowed,
        Kind::Unauthorized,
        Kind::Internal,
        Kind::NotImplemented,
        Kind::GraphqlResponse,
        Kind::TransientKhanService,
        Kind::KhanService,
        Kind::TransientService,
        Kind::Service,
        Kind::Unspecified,
    ];

    /// Returns the kind's label as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::NotFound => "not found",
            Kind::InvalidInput => "invalid input error",
            Kind::NotAllowed => "not allowed",
            Kind::Unauthorized => "unauthorized error",
            Kind::Internal => "internal error",
            Kind::NotImplemented => "not implemented error",
            Kind::GraphqlResponse => "graphql error response",
            Kind::TransientKhanService => "transient khan service error",
            Kind::KhanService => "khan service error",
            Kind::TransientService => "transient service error",
            Kind::Service => "service error",
            Kind::Unspecified => "unspecified error",
        }
    }

    /// Map a label back to its kind, treating unknown labels as `Unspecified`.
    pub fn from_label_lossy(label: &str) -> Kind {
        label.parse().unwrap_or(Kind::Unspecified)
    }

    /// Check if retrying the failed operation may help
    pub fn is_transient(&self) -> bool {
        matches!(self, Kind::TransientKhanService | Kind::TransientService)
    }

    /// Severity used when logging an error of this kind
    pub fn level(&self) -> tracing::Level {
        match self {
            Kind::Internal
            | Kind::NotImplemented
            | Kind::GraphqlResponse
            | Kind::KhanService
            | Kind::Service
            | Kind::Unspecified => tracing::Level::ERROR,

            Kind::TransientKhanService | Kind::TransientService => tracing::Level::WARN,

            Kind::NotFound | Kind::InvalidInput | Kind::NotAllowed | Kind::Unauthorized => {
                tracing::Level::INFO
            }
        }
    }
}

/// Check whether `label` names a member of the catalogue, `Unspecified` included.
pub fn is_valid_kind(label: &str) -> bool {
    label.parse::<Kind>().is_ok()
}

/// Failure to parse a kind label
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseKindError {
    #[error("unknown error kind: {0:?}")]
    Unknown(String),
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for Kind {}
