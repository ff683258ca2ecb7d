//! [`Status`] definitions.

use std::{fmt, str::FromStr as _};

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing status of an [`Order`].
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Status {
    /// ID of this [`Status`].
    pub id: Id,

    /// [`Code`] of this [`Status`].
    pub code: Code,
}

/// ID of a [`Status`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

define_kind! {
    #[doc = "Kind of a [`Status`] known to the panel."]
    enum Kind {
        #[doc = "Order is placed, but not paid yet."]
        Pending = 1,

        #[doc = "Order is paid."]
        Paid = 2,

        #[doc = "Order is delivered to its customer."]
        Delivered = 3,

        #[doc = "Order is cancelled."]
        Cancelled = 4,
    }
}

/// Code of a [`Status`].
///
/// Codes unknown to the panel are kept as is, so an [`Order`] having one is
/// still displayed.
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Deserialize, Eq, From, Hash, PartialEq)]
#[serde(from = "String")]
pub enum Code {
    /// Code of a known [`Kind`].
    Known(Kind),

    /// Code unknown to the panel.
    #[from(ignore)]
    Other(String),
}

impl Code {
    /// Returns the [`Kind`] of this [`Code`], if it's a known one.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Other(_) => None,
        }
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        match Kind::from_str(&code) {
            Ok(kind) => Self::Known(kind),
            Err(_) => Self::Other(code),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(kind) => fmt::Display::fmt(kind, f),
            Self::Other(code) => fmt::Display::fmt(code, f),
        }
    }
}
