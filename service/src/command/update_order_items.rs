//! [`Command`] for replacing [`Item`]s of an existing [`Order`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{item, order, Item, Order},
    infra::{backend, Backend},
    Service,
};

use super::{validate_items, Command, ItemsError};

/// [`Command`] for replacing all the [`Item`]s of an existing [`Order`].
///
/// Returns the [`Order`] with its [`Total`] recalculated from the new
/// [`Item`]s, so it can be shown without refetching.
///
/// [`Total`]: order::Total
#[derive(Clone, Debug)]
pub struct UpdateOrderItems {
    /// [`Order`] to replace the [`Item`]s of.
    pub order: Order,

    /// New [`Item`]s of the [`Order`].
    pub items: Vec<Item>,
}

impl<B> Command<UpdateOrderItems> for Service<B>
where
    B: Backend<Update<order::ItemList>, Err = Traced<backend::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOrderItems,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOrderItems { order, items } = cmd;

        let new = items.iter().map(item::New::from).collect::<Vec<_>>();
        validate_items(&new).map_err(tracerr::from_and_wrap!(=> E))?;

        self.backend()
            .execute(Update(order::ItemList {
                order_id: order.id,
                items: new,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(order.with_items(&items))
    }
}

/// Error of [`UpdateOrderItems`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Provided [`Item`]s are invalid.
    #[display("Invalid items: {_0}")]
    Items(ItemsError),
}
