//! The Error type returned by every constructor

use std::fmt;
use std::panic::Location;

use crate::node::Node;
use crate::{Fields, Kind};

/// A kind-tagged error with structured fields.
///
/// Every constructor returns this type. It holds:
/// - the node: kind, message, wrapped cause, and the caller's extra fields
/// - `fields`: the merged fields for logging (kind, message, the caller's
///   fields and whatever the wrapped chain contributed)
/// - `location`: where the constructor was called
///
/// # Example
///
/// ```rust
/// use khan_error::{fields, get_kind, not_found, Kind};
///
/// let err = not_found!("no such user", fields! { "kaid" => "kaid_123" });
///
/// assert_eq!(err.kind(), Kind::NotFound);
/// assert_eq!(get_kind(&err), Kind::NotFound);
/// assert_eq!(err.fields()["kaid"], "kaid_123");
/// assert_eq!(err.to_string(), "not found no such user, kaid = kaid_123");
/// ```
pub struct Error {
    node: Node,
    fields: Fields,
    location: &'static Location<'static>,
}

impl Error {
    pub(crate) fn new(node: Node, fields: Fields, location: &'static Location<'static>) -> Self {
        Self {
            node,
            fields,
            location,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// The effective kind: this error's own, or the first one found down the chain
    pub fn kind(&self) -> Kind {
        self.node.resolved_kind()
    }

    /// The message given at construction (possibly empty)
    pub fn message(&self) -> &str {
        self.node.message()
    }

    /// The merged fields, as logged
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The fields given at construction, before merging
    pub fn extra(&self) -> &Fields {
        self.node.extra()
    }

    /// Where the constructor was called
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Whether this error's own kind is `kind`. Causes are not consulted;
    /// use [`crate::is`] for that.
    pub fn is_kind(&self, kind: Kind) -> bool {
        self.node.kind() == kind
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }
}

// =============================================================================
// Display - the wrapped chain first, then this error's kind, message, fields
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node, f)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind(), self.location)?;

        if !self.node.message().is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.node.message())?;
        }

        if !self.fields.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Fields:")?;
            for (key, value) in &self.fields {
                writeln!(f, "        {}: {}", key, crate::stringify_field(value))?;
            }
        }

        if let Some(cause) = self.node.cause() {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", cause)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.node.cause().map(|cause| cause.as_dyn())
    }
}
