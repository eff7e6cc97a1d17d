//! The error node: kind, message, wrapped cause and extra fields

use std::fmt;

use crate::{chain, fields, stringify_field, Cause, Error, Fields, Kind, MESSAGE_KEY};

/// Keys the graphql error handler sets with empty values so they always
/// exist in the log schema. Hidden from display while empty.
const SCHEMA_ONLY_KEYS: [&str; 5] = [
    "handledGraphQLPanic",
    "panicErr.Kind",
    "panicErr.Message",
    "panicErr.Source",
    "panicValue",
];

pub(crate) struct Node {
    kind: Kind,
    message: String,
    cause: Option<Cause>,
    extra: Fields,
}

impl Node {
    pub(crate) fn new(kind: Kind, message: String, cause: Option<Cause>, extra: Fields) -> Self {
        Self {
            kind,
            message,
            cause,
            extra,
        }
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn extra(&self) -> &Fields {
        &self.extra
    }

    pub(crate) fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub(crate) fn take_cause(&mut self) -> Option<Cause> {
        self.cause.take()
    }

    pub(crate) fn set_cause(&mut self, cause: Option<Cause>) {
        self.cause = cause;
    }

    /// The node's own kind, or the first kind found among wrapped nodes.
    pub(crate) fn resolved_kind(&self) -> Kind {
        if self.kind != Kind::Unspecified {
            return self.kind;
        }
        self.cause
            .as_ref()
            .and_then(|cause| chain::find::<Error>(cause.as_dyn()))
            .map_or(Kind::Unspecified, |inner| inner.node().resolved_kind())
    }

    /// Fields contributed by the wrapped cause.
    ///
    /// A cause holding a node contributes that node's merged fields, which
    /// always include its kind. A foreign cause contributes its display
    /// string as the message. A bare kind contributes nothing, unlike the
    /// Go library this mirrors, which records the kind's label as the
    /// message.
    pub(crate) fn wrapped_fields(&self) -> Option<Fields> {
        let cause = self.cause.as_ref()?;
        if cause.bare_kind().is_some() {
            return None;
        }

        let link = cause.as_dyn();
        match chain::fields_of(link) {
            Some(fields) => Some(fields.clone()),
            None => Some(fields! { MESSAGE_KEY => link.to_string() }),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cause) = &self.cause {
            write!(f, "{}\nWrapped by: ", cause)?;
        }

        write!(f, "{}", self.resolved_kind())?;
        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }

        for (key, value) in &self.extra {
            let rendered = stringify_field(value);
            if rendered.is_empty() && SCHEMA_ONLY_KEYS.contains(&key.as_str()) {
                continue;
            }
            write!(f, ", {} = {}", key, rendered)?;
        }

        Ok(())
    }
}
