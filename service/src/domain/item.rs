//! [`Item`] definitions.

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{product, Product};

/// Line item of an [`Order`].
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// Ordered [`Product`].
    pub product: Product,

    /// Ordered [`Quantity`] of the [`Product`].
    pub quantity: Quantity,

    /// Unit [`Price`] of the [`Product`].
    pub price: Price,
}

impl Item {
    /// Returns the price of this [`Item`] as a whole.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity.0) * self.price.0
    }
}

/// Ordered quantity of a [`Product`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Quantity(u32);

/// Unit price of a [`Product`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Price(Decimal);

/// New [`Item`] to be stored, referencing its [`Product`] by ID only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct New {
    /// ID of the ordered [`Product`].
    pub product_id: product::Id,

    /// Ordered [`Quantity`] of the [`Product`].
    pub quantity: Quantity,
}

impl From<&Item> for New {
    fn from(item: &Item) -> Self {
        Self {
            product_id: item.product.id,
            quantity: item.quantity,
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::{order::Total, product, Product};

    use super::{Item, New, Price, Quantity};

    fn item(quantity: u32, price: &str) -> Item {
        Item {
            product: Product {
                id: product::Id::from(Uuid::new_v4()),
                name: product::Name::from("Widget".to_owned()),
            },
            quantity: Quantity::from(quantity),
            price: Price::from(price.parse::<Decimal>().unwrap()),
        }
    }

    #[test]
    fn subtotal_multiplies_quantity_by_price() {
        assert_eq!(item(3, "2.50").subtotal(), "7.50".parse().unwrap());
        assert_eq!(item(0, "9.99").subtotal(), Decimal::ZERO);
    }

    #[test]
    fn total_sums_subtotals() {
        let items = [item(2, "10"), item(1, "0.25")];

        assert_eq!(
            Total::of(&items),
            Total::from("20.25".parse::<Decimal>().unwrap()),
        );
        assert_eq!(Total::of(&[]), Total::default());
    }

    #[test]
    fn new_item_references_product() {
        let item = item(5, "1");
        let new = New::from(&item);

        assert_eq!(new.product_id, item.product.id);
        assert_eq!(new.quantity, Quantity::from(5));
    }
}
