//! [`Query`] definition.

pub mod order_items;
pub mod orders;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{backend, Backend},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Backend`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<T>(T);

impl<W, B> BackendQuery<By<W, B>> {
    /// Creates a new [`BackendQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Bk, W, B> Query<BackendQuery<By<W, B>>> for Service<Bk>
where
    Bk: Backend<Select<By<W, B>>, Ok = W, Err = Traced<backend::Error>>,
{
    type Ok = W;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(by): BackendQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
