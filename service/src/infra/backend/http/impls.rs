//! [`Backend`] implementations of the [`Http`] client.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{order, Item, Order},
    infra::{backend, Backend, Http},
    read::order::list,
};

use super::dto;

impl Backend<Select<By<list::Page, list::Selector>>> for Http {
    type Ok = list::Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let params = dto::ListParams::from(&selector);
        log::debug!("fetching orders page: {params:?}");

        let resp: dto::OrdersResponse = self
            .fetch(self.client.get(self.url("orders")).query(&params))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(resp.into())
    }
}

impl Backend<Insert<order::Draft>> for Http {
    type Ok = Order;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<order::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = dto::NewOrder::from(draft);

        let order: dto::Order = self
            .fetch(self.client.post(self.url("orders")).json(&body))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(order.into())
    }
}

impl Backend<Update<order::ItemList>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(list): Update<order::ItemList>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("orders/{}/items", list.order_id);
        let body = dto::ItemList {
            list_item: list.items.into_iter().map(Into::into).collect(),
        };

        self.send(self.client.put(self.url(path)).json(&body))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Backend<Select<By<Vec<Item>, order::Id>>> for Http {
    type Ok = Vec<Item>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Item>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("orders/{}/items", by.into_inner());

        let items: Vec<dto::Item> = self
            .fetch(self.client.get(self.url(path)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(items.into_iter().map(Into::into).collect())
    }
}
