//! [`Customer`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer placing orders.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Customer {
    /// ID of this [`Customer`].
    pub id: Id,

    /// [`Name`] of this [`Customer`].
    pub name: Name,

    /// [`Phone`] of this [`Customer`].
    pub phone: Phone,

    /// [`Email`] of this [`Customer`].
    pub email: Email,
}

/// ID of a [`Customer`].
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

/// Name of a [`Customer`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

/// Phone number of a [`Customer`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(forward)]
pub struct Phone(String);

/// Email address of a [`Customer`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(forward)]
pub struct Email(String);
