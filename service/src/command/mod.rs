//! [`Command`] definition.

pub mod create_order;
pub mod update_order_items;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_order::CreateOrder, update_order_items::UpdateOrderItems,
};

use derive_more::{Display, Error};

use crate::domain::{item, product};

/// Error of validating [`item::New`]s before storing them.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ItemsError {
    /// No [`item::New`]s are provided.
    #[display("`Order` must have at least one item")]
    Empty,

    /// [`item::New`] has zero quantity.
    #[display("`Product(id: {_0})` is ordered in zero quantity")]
    ZeroQuantity(#[error(not(source))] product::Id),
}

/// Validates the provided [`item::New`]s of an [`Order`].
///
/// # Errors
///
/// If no `items` are provided, or any of them has zero quantity.
///
/// [`Order`]: crate::domain::Order
fn validate_items(items: &[item::New]) -> Result<(), ItemsError> {
    if items.is_empty() {
        return Err(ItemsError::Empty);
    }
    if let Some(item) = items.iter().find(|i| u32::from(i.quantity) == 0) {
        return Err(ItemsError::ZeroQuantity(item.product_id));
    }
    Ok(())
}
