//! [`Backend`]-related implementations.

#[cfg(test)]
pub mod fake;
#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Backend operation.
///
/// Transport owning the order data: list, create and item endpoints.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    Http(http::Error),

    #[cfg(test)]
    /// [`fake::Fake`] backend error.
    Fake(fake::Error),
}
