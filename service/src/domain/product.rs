//! [`Product`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product which can be ordered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// ID of this [`Product`].
    pub id: Id,

    /// [`Name`] of this [`Product`].
    pub name: Name,
}

/// ID of a [`Product`].
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

/// Name of a [`Product`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);
