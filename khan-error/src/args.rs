//! Constructor arguments and their classification

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::node::Node;
use crate::{Cause, Error, FieldValue, Fields, Kind, INVALID_ERR_ARGS_KEY};

/// One argument to an error constructor.
///
/// Usually built implicitly through `From`, which is what the constructor
/// macros do for every argument:
/// - strings become the message,
/// - [`Fields`] (or a string-keyed map) become the extra fields,
/// - errors and kinds become the wrapped cause,
/// - anything else is kept as a rejected argument.
#[derive(Debug)]
pub enum Arg {
    Cause(Cause),
    Message(String),
    Fields(Fields),
    /// Rendering of an argument of no recognized type
    Other(String),
}

impl Arg {
    /// Pass a value of no recognized type. It ends up in the error's fields
    /// as a rejected argument.
    pub fn other(value: impl fmt::Debug) -> Self {
        Arg::Other(format!("{:?}", value))
    }
}

impl From<&str> for Arg {
    fn from(message: &str) -> Self {
        Arg::Message(message.to_string())
    }
}

impl From<String> for Arg {
    fn from(message: String) -> Self {
        Arg::Message(message)
    }
}

impl From<Fields> for Arg {
    fn from(fields: Fields) -> Self {
        Arg::Fields(fields)
    }
}

impl<V: Into<FieldValue>> From<BTreeMap<String, V>> for Arg {
    fn from(map: BTreeMap<String, V>) -> Self {
        Arg::Fields(map.into())
    }
}

impl<V: Into<FieldValue>> From<HashMap<String, V>> for Arg {
    fn from(map: HashMap<String, V>) -> Self {
        Arg::Fields(map.into())
    }
}

impl From<Cause> for Arg {
    fn from(cause: Cause) -> Self {
        Arg::Cause(cause)
    }
}

impl From<Error> for Arg {
    fn from(err: Error) -> Self {
        Arg::Cause(err.into())
    }
}

impl From<Kind> for Arg {
    fn from(kind: Kind) -> Self {
        Arg::Cause(kind.into())
    }
}

impl From<anyhow::Error> for Arg {
    fn from(err: anyhow::Error) -> Self {
        Arg::Cause(err.into())
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Arg::Cause(err.into())
    }
}

macro_rules! impl_from_other {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Arg {
                fn from(value: $source) -> Self {
                    Arg::other(value)
                }
            }
        )+
    };
}

impl_from_other!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char);

/// Sort `args` into a node of the given kind.
///
/// Cause, message and fields are each "last one wins". Unrecognized
/// arguments never fail construction: they prefix the message and are
/// recorded under [`INVALID_ERR_ARGS_KEY`].
pub(crate) fn classify(kind: Kind, args: Vec<Arg>) -> Node {
    let mut message = String::new();
    let mut cause = None;
    let mut extra = Fields::new();
    let mut bad_args = Vec::new();

    for arg in args {
        match arg {
            Arg::Cause(c) => cause = Some(c),
            Arg::Message(m) => message = m,
            Arg::Fields(f) => extra = f,
            Arg::Other(rendered) => bad_args.push(rendered),
        }
    }

    if !bad_args.is_empty() {
        message = format!("Invalid error constructor argument(s): {}", message);
        extra.insert(INVALID_ERR_ARGS_KEY, bad_args);
    }

    Node::new(kind, message, cause, extra)
}
