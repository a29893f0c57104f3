mod adhoc;
mod connection_pool;
mod driver;
mod invalid_connection_url;
mod record_not_found;
mod too_many_records;
mod type_conversion;

use adhoc::AdhocError;
use connection_pool::ConnectionPoolError;
use driver::DriverError;
use invalid_connection_url::InvalidConnectionUrlError;
use record_not_found::RecordNotFoundError;
use too_many_records::TooManyRecordsError;
use type_conversion::TypeConversionError;

/// Helper macro for returning an ad-hoc error from a function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating an ad-hoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while mapping query results.
///
/// A single error type is surfaced to callers of `fetch_one` / `fetch_all`.
/// The specific failure is carried as a private kind; `is_*` predicates let
/// callers branch on it, and the original underlying cause (when there is
/// one) stays chained for diagnosis.
pub struct Error {
    inner: Box<ErrorInner>,
}

struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    ConnectionPool(ConnectionPoolError),
    InvalidConnectionUrl(InvalidConnectionUrlError),
    TypeConversion(TypeConversionError),
    RecordNotFound(RecordNotFoundError),
    TooManyRecords(TooManyRecordsError),
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    pub fn context(self, consequent: Error) -> Error {
        let mut err = consequent;
        assert!(
            err.inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        err.inner.cause = Some(self);
        err
    }

    /// Iterates the error chain from the outermost error to the root cause.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(args)))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => std::error::Error::source(err),
            ErrorKind::ConnectionPool(err) => std::error::Error::source(err),
            _ => self
                .inner
                .cause
                .as_ref()
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            ConnectionPool(err) => core::fmt::Display::fmt(err, f),
            InvalidConnectionUrl(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            TooManyRecords(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => f.debug_tuple("Anyhow").field(err).finish(),
            Adhoc(err) => f.debug_tuple("Adhoc").field(&err.to_string()).finish(),
            Driver(err) => f.debug_tuple("Driver").field(&err.to_string()).finish(),
            ConnectionPool(err) => f
                .debug_tuple("ConnectionPool")
                .field(&err.to_string())
                .finish(),
            InvalidConnectionUrl(err) => f
                .debug_tuple("InvalidConnectionUrl")
                .field(&err.to_string())
                .finish(),
            TypeConversion(err) => f
                .debug_tuple("TypeConversion")
                .field(&err.to_string())
                .finish(),
            RecordNotFound(err) => f
                .debug_tuple("RecordNotFound")
                .field(&err.to_string())
                .finish(),
            TooManyRecords(err) => f
                .debug_tuple("TooManyRecords")
                .field(&err.to_string())
                .finish(),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
