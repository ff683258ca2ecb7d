//! Wire representations of the orders API.

use common::{datetime::serde::iso8601, Direction};
use serde::{Deserialize, Serialize};
use tracing as log;

use crate::{
    domain::{self, customer, item, order, product, status, user},
    read::order::list,
};

/// Query parameters of the `GET /orders` request.
///
/// Absent values are omitted rather than sent empty.
#[derive(Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListParams<'a> {
    /// Explicit page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) page: Option<u32>,

    /// Sort key of the cursor to navigate from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) cursor_date: Option<&'a str>,

    /// Identifier of the cursor to navigate from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) cursor_id: Option<&'a str>,

    /// Direction to navigate from the cursor in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) direction: Option<&'static str>,

    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) search: Option<&'a str>,
}

impl<'a> From<&'a list::Selector> for ListParams<'a> {
    fn from(selector: &'a list::Selector) -> Self {
        let search = selector.filter.search.as_ref().map(AsRef::<str>::as_ref);
        match &selector.arguments {
            list::Arguments::First => Self {
                search,
                ..Self::default()
            },
            list::Arguments::Number(num) => Self {
                page: Some(num.get()),
                search,
                ..Self::default()
            },
            list::Arguments::Cursor(state) => Self {
                cursor_date: state
                    .cursor
                    .date
                    .as_ref()
                    .map(AsRef::<str>::as_ref),
                cursor_id: state.cursor.id.as_ref().map(AsRef::<str>::as_ref),
                direction: Some(state.direction.as_str()),
                search,
                ..Self::default()
            },
        }
    }
}

/// Body of the `GET /orders` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrdersResponse {
    /// Orders of the page.
    orders: Vec<Order>,

    /// Sort key of the previous page cursor.
    #[serde(default)]
    prev_cursor_date: Option<list::CursorDate>,

    /// Identifier of the previous page cursor.
    #[serde(default)]
    prev_cursor_id: Option<list::CursorId>,

    /// Sort key of the next page cursor.
    #[serde(default)]
    next_cursor_date: Option<list::CursorDate>,

    /// Identifier of the next page cursor.
    #[serde(default)]
    next_cursor_id: Option<list::CursorId>,

    /// Total number of pages.
    total_pages: u32,

    /// Total number of orders matching the filter.
    total_orders: u64,

    /// Maximum number of orders per page.
    orders_per_page: u32,
}

impl From<OrdersResponse> for list::Page {
    fn from(resp: OrdersResponse) -> Self {
        let OrdersResponse {
            orders,
            prev_cursor_date,
            prev_cursor_id,
            next_cursor_date,
            next_cursor_id,
            total_pages,
            total_orders,
            orders_per_page,
        } = resp;

        Self {
            items: orders.into_iter().map(Into::into).collect(),
            cursors: list::CursorResponse {
                prev: cursor(Direction::Prev, prev_cursor_date, prev_cursor_id),
                next: cursor(Direction::Next, next_cursor_date, next_cursor_id),
            },
            total_pages,
            total_items: total_orders,
            per_page: orders_per_page,
        }
    }
}

/// Assembles a [`list::Cursor`] out of its wire parts.
fn cursor(
    direction: Direction,
    date: Option<list::CursorDate>,
    id: Option<list::CursorId>,
) -> list::Cursor {
    if date.is_some() != id.is_some() {
        log::warn!(
            "orders API returned a partial `{direction}` cursor \
             (date: {date:?}, id: {id:?}), treating it as exhausted",
        );
    }
    list::Cursor::from_parts(date, id)
}

/// Wire representation of an [`domain::Order`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Order {
    /// ID of the order.
    order_id: order::Id,

    /// Total amount of the order.
    order_total: order::Total,

    /// Placement date and time of the order.
    #[serde(deserialize_with = "iso8601::deserialize")]
    order_date: order::CreationDateTime,

    /// Attachment of the order, if any.
    #[serde(default)]
    order_attachment: Option<order::Attachment>,

    /// Last modification date and time of the order.
    #[serde(deserialize_with = "iso8601::deserialize")]
    updated_at: order::ModificationDateTime,

    /// Status of the order.
    status: Status,

    /// Customer of the order.
    customer: Customer,

    /// User who placed the order.
    user: User,
}

impl From<Order> for domain::Order {
    fn from(order: Order) -> Self {
        let Order {
            order_id,
            order_total,
            order_date,
            order_attachment,
            updated_at,
            status: Status {
                status_id,
                status_code,
            },
            customer:
                Customer {
                    customer_id,
                    customer_name,
                    customer_phone,
                    customer_email,
                },
            user: User { user_id, user_name },
        } = order;

        if let status::Code::Other(code) = &status_code {
            log::warn!("`Order(id: {order_id})` has unknown status `{code}`");
        }

        Self {
            id: order_id,
            total: order_total,
            date: order_date,
            attachment: order_attachment,
            updated_at,
            status: domain::Status {
                id: status_id,
                code: status_code,
            },
            customer: domain::Customer {
                id: customer_id,
                name: customer_name,
                phone: customer_phone,
                email: customer_email,
            },
            user: domain::User {
                id: user_id,
                name: user_name,
            },
        }
    }
}

/// Wire representation of a [`domain::Status`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    /// ID of the status, omitted by some API versions.
    #[serde(default)]
    status_id: status::Id,

    /// Code of the status.
    status_code: status::Code,
}

/// Wire representation of a [`domain::Customer`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Customer {
    /// ID of the customer.
    customer_id: customer::Id,

    /// Name of the customer.
    customer_name: customer::Name,

    /// Phone of the customer.
    customer_phone: customer::Phone,

    /// Email of the customer.
    customer_email: customer::Email,
}

/// Wire representation of a [`domain::User`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    /// ID of the user.
    user_id: user::Id,

    /// Name of the user.
    user_name: user::Name,
}

/// Body of the `POST /orders` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewOrder {
    /// ID of the customer the order is placed for.
    pub(super) customer_id: customer::Id,

    /// ID of the user placing the order.
    pub(super) user_id: user::Id,
}

impl From<order::Draft> for NewOrder {
    fn from(draft: order::Draft) -> Self {
        Self {
            customer_id: draft.customer_id,
            user_id: draft.user_id,
        }
    }
}

/// Body of the `PUT /orders/{id}/items` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ItemList {
    /// New items of the order.
    pub(super) list_item: Vec<NewItem>,
}

/// Wire representation of an [`item::New`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewItem {
    /// ID of the ordered product.
    product_id: product::Id,

    /// Ordered quantity.
    item_quantity: item::Quantity,
}

impl From<item::New> for NewItem {
    fn from(item: item::New) -> Self {
        Self {
            product_id: item.product_id,
            item_quantity: item.quantity,
        }
    }
}

/// Wire representation of a [`domain::Item`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Item {
    /// Ordered product.
    product: Product,

    /// Ordered quantity.
    item_quantity: item::Quantity,

    /// Unit price of the product.
    item_price: item::Price,
}

/// Wire representation of a [`domain::Product`] inside an [`Item`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    /// ID of the product.
    product_id: product::Id,

    /// Name of the product.
    product_name: product::Name,
}

impl From<Item> for domain::Item {
    fn from(item: Item) -> Self {
        let Item {
            product:
                Product {
                    product_id,
                    product_name,
                },
            item_quantity,
            item_price,
        } = item;

        Self {
            product: domain::Product {
                id: product_id,
                name: product_name,
            },
            quantity: item_quantity,
            price: item_price,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination::CursorState, Direction, PageNumber};
    use serde_json::json;

    use crate::{
        domain::status,
        read::order::list::{self, Search},
    };

    use super::{ListParams, OrdersResponse};

    fn selector(arguments: list::Arguments, search: &str) -> list::Selector {
        list::Selector {
            arguments,
            filter: list::Filter {
                search: Search::new(search),
            },
        }
    }

    #[test]
    fn plain_first_page_params_are_empty() {
        let selector = selector(list::Arguments::First, "");

        assert_eq!(
            serde_json::to_value(ListParams::from(&selector)).unwrap(),
            json!({}),
        );
    }

    #[test]
    fn numbered_page_params() {
        let selector = selector(
            list::Arguments::Number(PageNumber::new(3).unwrap()),
            "jane",
        );

        assert_eq!(
            serde_json::to_value(ListParams::from(&selector)).unwrap(),
            json!({"page": 3, "search": "jane"}),
        );
    }

    #[test]
    fn cursor_params() {
        let selector = selector(
            list::Arguments::Cursor(CursorState {
                cursor: list::Cursor::new(
                    list::CursorDate::from("2024-01-01".to_owned()),
                    list::CursorId::from("o5".to_owned()),
                ),
                direction: Direction::Next,
            }),
            "",
        );

        assert_eq!(
            serde_json::to_value(ListParams::from(&selector)).unwrap(),
            json!({
                "cursorDate": "2024-01-01",
                "cursorId": "o5",
                "direction": "next",
            }),
        );
    }

    fn response(prev: (Option<&str>, Option<&str>)) -> serde_json::Value {
        json!({
            "orders": [{
                "orderId": "6a0f4b46-2f38-4b69-9d59-3f5e3c1a7f10",
                "orderTotal": "120.50",
                "orderDate": "2024-01-02T10:00:00",
                "orderAttachment": null,
                "updatedAt": "2024-01-03T08:30:00+00:00",
                "status": {
                    "statusId": "0b1f8f53-8a43-4f6f-a2a7-5d3e1f1d2c3b",
                    "statusCode": "PAID",
                },
                "customer": {
                    "customerId": "4b0c2d7e-9f51-4c0a-8d2b-0e6f7a8b9c1d",
                    "customerName": "Jane Doe",
                    "customerPhone": "+1 555 0100",
                    "customerEmail": "jane@example.com",
                },
                "user": {
                    "userId": "9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b",
                    "userName": "admin",
                },
            }],
            "prevCursorDate": prev.0,
            "prevCursorId": prev.1,
            "nextCursorDate": "2024-01-02T10:00:00",
            "nextCursorId": "6a0f4b46-2f38-4b69-9d59-3f5e3c1a7f10",
            "totalPages": 3,
            "currentPage": 2,
            "totalOrders": 41,
            "ordersPerPage": 20,
        })
    }

    #[test]
    fn decodes_page() {
        let resp: OrdersResponse = serde_json::from_value(response((
            Some("2024-01-05T00:00:00"),
            Some("a"),
        )))
        .unwrap();
        let page = list::Page::from(resp);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 41);
        assert_eq!(page.per_page, 20);
        assert!(!page.cursors.prev.is_exhausted());
        assert_eq!(
            page.cursors.next.id,
            Some(list::CursorId::from(
                "6a0f4b46-2f38-4b69-9d59-3f5e3c1a7f10".to_owned(),
            )),
        );

        let order = &page.items[0];
        assert_eq!(order.total.to_string(), "120.50");
        assert_eq!(order.status.code.kind(), Some(status::Kind::Paid));
        assert_eq!(order.customer.name.to_string(), "Jane Doe");
        assert_eq!(order.date.date(), "2024-01-02");
        assert!(order.attachment.is_none());
    }

    #[test]
    fn decodes_page_with_unknown_status() {
        let mut json = response((None, None));
        json["orders"][0]["status"]["statusCode"] = "ON_HOLD".into();

        let resp: OrdersResponse = serde_json::from_value(json).unwrap();
        let page = list::Page::from(resp);

        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items[0].status.code,
            status::Code::Other("ON_HOLD".to_owned()),
        );
        assert_eq!(page.items[0].status.code.to_string(), "ON_HOLD");
    }

    #[test]
    fn absent_cursor_is_exhausted() {
        let resp: OrdersResponse =
            serde_json::from_value(response((None, None))).unwrap();

        assert!(list::Page::from(resp).cursors.prev.is_exhausted());
    }

    #[test]
    fn cursor_without_date_is_exhausted() {
        let resp: OrdersResponse =
            serde_json::from_value(response((None, Some("a")))).unwrap();

        assert!(list::Page::from(resp).cursors.prev.is_exhausted());
    }
}
