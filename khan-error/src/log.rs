//! Structured logging of errors through `tracing`

use std::error::Error as StdError;
use std::fmt;

use tracing::Level;

use crate::{get_fields, get_kind, Error, Fields, Kind};

impl Error {
    /// Emit this error as one `tracing` event at its kind's level.
    ///
    /// The event carries the kind, the message, the constructor's location
    /// and the merged fields as JSON.
    pub fn log(&self) {
        emit(self.kind(), self.message(), self.fields(), Some(self.location()), self);
    }
}

/// Log any error, using the kind and fields found in its chain.
pub fn log_error(err: &(dyn StdError + 'static)) {
    let fields = get_fields(err);
    let message = fields
        .get(crate::MESSAGE_KEY)
        .map(ToString::to_string)
        .unwrap_or_default();
    let location = crate::find::<Error>(err).map(Error::location);
    emit(get_kind(err), &message, &fields, location, err);
}

fn emit(
    kind: Kind,
    message: &str,
    fields: &Fields,
    location: Option<&std::panic::Location<'static>>,
    err: &dyn fmt::Display,
) {
    let payload = fields.to_json();
    let location = location.map(ToString::to_string).unwrap_or_default();

    macro_rules! event {
        ($level:expr) => {
            tracing::event!(
                $level,
                kind = %kind,
                error_message = %message,
                location = %location,
                fields = %payload,
                error = %err,
                "khan error"
            )
        };
    }

    match kind.level() {
        Level::ERROR => event!(Level::ERROR),
        Level::WARN => event!(Level::WARN),
        Level::INFO => event!(Level::INFO),
        Level::DEBUG => event!(Level::DEBUG),
        _ => event!(Level::TRACE),
    }
}
