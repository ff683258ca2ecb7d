//! [`Command`] for creating a new [`Order`].

use common::operations::{Insert, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, item, order, Order},
    infra::{backend, Backend},
    Service,
};

use super::{validate_items, Command, ItemsError};

/// [`Command`] for creating a new [`Order`] with its [`item::New`]s.
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// ID of the [`Customer`] the new [`Order`] is placed for.
    ///
    /// [`Customer`]: crate::domain::Customer
    pub customer_id: customer::Id,

    /// [`item::New`]s of the new [`Order`].
    pub items: Vec<item::New>,

    /// [`Order`] created by a previous execution which failed to store its
    /// [`item::New`]s, if any.
    ///
    /// No new [`Order`] is created if it's present, so only the
    /// [`item::New`]s are stored.
    pub created: Option<Order>,
}

impl<B> Command<CreateOrder> for Service<B>
where
    B: Backend<Insert<order::Draft>, Ok = Order, Err = Traced<backend::Error>>
        + Backend<Update<order::ItemList>, Err = Traced<backend::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder {
            customer_id,
            items,
            created,
        } = cmd;

        validate_items(&items).map_err(tracerr::from_and_wrap!(=> E))?;

        let order = if let Some(order) = created {
            log::debug!("storing items of created `Order(id: {})`", order.id);
            order
        } else {
            let order = self
                .backend()
                .execute(Insert(order::Draft {
                    customer_id,
                    user_id: self.config().user_id,
                }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            log::debug!("created `Order(id: {})`", order.id);
            order
        };

        let stored = self
            .backend()
            .execute(Update(order::ItemList {
                order_id: order.id,
                items,
            }))
            .await;
        if let Err(e) = stored {
            let (source, trace) = e.split();
            return Err(Traced::compose(
                E::ItemsNotStored { order, source },
                trace,
            ))
            .map_err(tracerr::wrap!());
        }

        Ok(order)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Provided [`item::New`]s are invalid.
    #[display("Invalid items: {_0}")]
    Items(ItemsError),

    /// [`Order`] is created, but its [`item::New`]s failed to be stored.
    #[display("`Order(id: {})` is created without items: {source}", order.id)]
    #[from(ignore)]
    ItemsNotStored {
        /// Created [`Order`] missing its [`item::New`]s.
        order: Order,

        /// [`Backend`] error of storing the [`item::New`]s.
        source: backend::Error,
    },
}
