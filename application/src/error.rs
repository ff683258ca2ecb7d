//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{create_order, update_order_items, ItemsError},
    infra::backend,
    panel::Rejection,
};
use tracerr::{Trace, Traced};

use crate::input::ParseError;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// [`Error`] reported to a user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns the user-facing line of this [`Error`], without its backtrace.
    #[must_use]
    pub fn brief(&self) -> String {
        format!("[{}]: {}", self.code, self.message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "BACKEND_FAILED",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for ItemsError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_ITEMS",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Items(e) => e.try_as_error(),
            Self::ItemsNotStored { .. } => Some(Error {
                code: "ORDER_INCOMPLETE",
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for update_order_items::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Items(e) => e.try_as_error(),
        }
    }
}

impl AsError for Rejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "REJECTED",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for ParseError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_INPUT",
            message: self.to_string(),
            backtrace: None,
        })
    }
}
