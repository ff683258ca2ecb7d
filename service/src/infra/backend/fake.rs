//! In-memory [`Backend`] used in tests.

use std::{cell::RefCell, collections::HashMap};

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{
        customer, item, order, product, status, user, Customer, Item, Order,
        Product, Status, User,
    },
    infra::{backend, Backend},
    read::order::list,
};

/// In-memory [`Backend`] recording the requests it receives.
#[derive(Debug, Default)]
pub struct Fake {
    /// Mutable state of this [`Fake`].
    state: RefCell<State>,
}

/// State of a [`Fake`] backend.
#[derive(Debug, Default)]
struct State {
    /// Stored [`Order`]s, newest first.
    orders: Vec<Order>,

    /// Stored [`Item`]s of [`Order`]s.
    items: HashMap<order::Id, Vec<item::New>>,

    /// Known [`Product`]s with their unit prices.
    products: HashMap<product::Id, (Product, item::Price)>,

    /// [`list::Selector`]s of all the list requests received so far.
    selectors: Vec<list::Selector>,

    /// Number of item replacements received so far.
    item_updates: usize,

    /// Indicator whether all the requests should fail.
    unavailable: bool,

    /// Number of the upcoming item replacements to fail.
    failing_item_updates: usize,
}

impl Fake {
    /// Registers a new [`Product`] with the provided unit `price`.
    pub fn with_product(self, name: &str, price: &str) -> Self {
        let product = Product {
            id: product::Id::from(Uuid::new_v4()),
            name: product::Name::from(name.to_owned()),
        };
        let price = item::Price::from(decimal(price));
        _ = self
            .state
            .borrow_mut()
            .products
            .insert(product.id, (product, price));
        self
    }

    /// Returns the ID of the registered [`Product`] with the provided `name`.
    pub fn product_id(&self, name: &str) -> product::Id {
        self.state
            .borrow()
            .products
            .values()
            .find(|(p, _)| AsRef::<str>::as_ref(&p.name) == name)
            .map(|(p, _)| p.id)
            .expect("unknown product")
    }

    /// Makes the provided number of upcoming item replacements fail.
    pub fn fail_item_updates(&self, count: usize) {
        self.state.borrow_mut().failing_item_updates = count;
    }

    /// Makes all the further requests to this [`Fake`] fail or succeed.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.borrow_mut().unavailable = unavailable;
    }

    /// Returns the stored [`Order`]s.
    pub fn orders(&self) -> Vec<Order> {
        self.state.borrow().orders.clone()
    }

    /// Returns the stored [`item::New`]s of the [`Order`] with the provided
    /// `id`.
    pub fn items_of(&self, id: order::Id) -> Vec<item::New> {
        self.state.borrow().items.get(&id).cloned().unwrap_or_default()
    }

    /// Returns the [`list::Selector`]s received so far.
    pub fn selectors(&self) -> Vec<list::Selector> {
        self.state.borrow().selectors.clone()
    }

    /// Returns the number of item replacements received so far.
    pub fn item_updates(&self) -> usize {
        self.state.borrow().item_updates
    }

    /// Fails if this [`Fake`] is made unavailable.
    fn ensure_available(&self) -> Result<(), Traced<backend::Error>> {
        if self.state.borrow().unavailable {
            return Err(tracerr::new!(backend::Error::from(Error::Unavailable)));
        }
        Ok(())
    }
}

impl Backend<Select<By<list::Page, list::Selector>>> for Fake {
    type Ok = list::Page;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        self.state.borrow_mut().selectors.push(selector.clone());
        self.ensure_available().map_err(tracerr::wrap!())?;

        let state = self.state.borrow();
        let items: Vec<_> = state
            .orders
            .iter()
            .filter(|o| {
                selector.filter.search.as_ref().map_or(true, |s| {
                    AsRef::<str>::as_ref(&o.customer.name)
                        .contains(AsRef::<str>::as_ref(s))
                })
            })
            .cloned()
            .collect();
        Ok(list::Page {
            total_items: items.len() as u64,
            per_page: 20,
            items,
            ..list::Page::default()
        })
    }
}

impl Backend<Insert<order::Draft>> for Fake {
    type Ok = Order;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<order::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        self.ensure_available().map_err(tracerr::wrap!())?;

        let mut order = order("0");
        order.customer.id = draft.customer_id;
        order.user.id = draft.user_id;
        self.state.borrow_mut().orders.insert(0, order.clone());
        Ok(order)
    }
}

impl Backend<Update<order::ItemList>> for Fake {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(list): Update<order::ItemList>,
    ) -> Result<Self::Ok, Self::Err> {
        self.ensure_available().map_err(tracerr::wrap!())?;

        let mut state = self.state.borrow_mut();
        state.item_updates += 1;
        if state.failing_item_updates > 0 {
            state.failing_item_updates -= 1;
            return Err(tracerr::new!(backend::Error::from(
                Error::Unavailable,
            )));
        }
        if !state.orders.iter().any(|o| o.id == list.order_id) {
            return Err(tracerr::new!(backend::Error::from(
                Error::NotFound(list.order_id),
            )));
        }
        _ = state.items.insert(list.order_id, list.items);
        Ok(())
    }
}

impl Backend<Select<By<Vec<Item>, order::Id>>> for Fake {
    type Ok = Vec<Item>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Item>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.ensure_available().map_err(tracerr::wrap!())?;

        let id = by.into_inner();
        let state = self.state.borrow();
        Ok(state
            .items
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|new| {
                let (product, price) = state.products.get(&new.product_id)?;
                Some(Item {
                    product: product.clone(),
                    quantity: new.quantity,
                    price: *price,
                })
            })
            .collect())
    }
}

/// [`Fake`] backend error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Fake`] backend is made unavailable.
    #[display("backend is unavailable")]
    Unavailable,

    /// [`Order`] doesn't exist.
    #[display("`Order(id: {_0})` does not exist")]
    NotFound(#[error(not(source))] order::Id),
}

/// Parses the provided `s`tring as a [`Decimal`].
pub fn decimal(s: &str) -> Decimal {
    s.parse().expect("invalid decimal")
}

/// Creates a new [`Order`] with the provided `total` and placeholder
/// details.
pub fn order(total: &str) -> Order {
    Order {
        id: order::Id::new(),
        total: order::Total::from(decimal(total)),
        date: DateTime::UNIX_EPOCH.coerce(),
        attachment: None,
        updated_at: DateTime::UNIX_EPOCH.coerce(),
        status: Status {
            id: status::Id::default(),
            code: status::Kind::Pending.into(),
        },
        customer: Customer {
            id: customer::Id::from(Uuid::new_v4()),
            name: customer::Name::from("Jane Doe".to_owned()),
            phone: customer::Phone::from("+1 555 0100".to_owned()),
            email: customer::Email::from("jane@example.com".to_owned()),
        },
        user: User {
            id: user::Id::default(),
            name: user::Name::from("admin".to_owned()),
        },
    }
}
