//! [`Order`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{customer, item, user, Customer, Item, Status, User};

/// Order placed by a [`Customer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Total`] amount of this [`Order`].
    pub total: Total,

    /// [`DateTime`] when this [`Order`] was placed.
    ///
    /// [`DateTime`]: common::DateTime
    pub date: CreationDateTime,

    /// [`Attachment`] of this [`Order`], if any.
    pub attachment: Option<Attachment>,

    /// [`DateTime`] when this [`Order`] was modified last time.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: ModificationDateTime,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,

    /// [`Customer`] this [`Order`] is placed for.
    pub customer: Customer,

    /// [`User`] who placed this [`Order`].
    pub user: User,
}

impl Order {
    /// Returns this [`Order`] with its [`Total`] recalculated from the
    /// provided [`Item`]s.
    #[must_use]
    pub fn with_items(self, items: &[Item]) -> Self {
        Self {
            total: Total::of(items),
            ..self
        }
    }
}

/// ID of an [`Order`].
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

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Total amount of an [`Order`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Total(Decimal);

impl Total {
    /// Calculates the [`Total`] of the provided [`Item`]s.
    #[must_use]
    pub fn of(items: &[Item]) -> Self {
        Self(items.iter().map(Item::subtotal).sum())
    }
}

/// Reference to a file attached to an [`Order`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq)]
#[as_ref(forward)]
pub struct Attachment(String);

/// [`DateTime`] of an [`Order`] placement.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] of the last [`Order`] modification.
///
/// [`DateTime`]: common::DateTime
pub type ModificationDateTime = DateTimeOf<(Order, unit::Modification)>;

/// Draft of a new [`Order`], before it's stored by a backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Draft {
    /// ID of the [`Customer`] the [`Order`] is placed for.
    pub customer_id: customer::Id,

    /// ID of the [`User`] placing the [`Order`].
    pub user_id: user::Id,
}

/// Full list of [`item::New`]s replacing the current [`Item`]s of an
/// [`Order`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemList {
    /// ID of the [`Order`] owning the [`Item`]s.
    pub order_id: Id,

    /// New [`Item`]s of the [`Order`].
    pub items: Vec<item::New>,
}
