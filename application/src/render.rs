//! Plain text rendering of the order list [`Panel`].

use std::fmt::Write as _;

use itertools::Itertools as _;
use service::{
    domain::{Item, Order},
    panel::{Controls, Form, Panel},
};

/// List of the available line commands.
pub const HELP: &str = "\
Commands:
  page <N>                 jump to the page N
  next | prev              navigate to the next or previous page
  search [text]            filter orders, clearing the filter if empty
  new <customer>           open a new order form
  add <product> <qty>      add a product to the new order form
  edit <row>               open the item form of the order at the row
  set <product> <qty>      set a product quantity in the open form, 0 removes
  save | cancel            submit or close the open form
  items <row>              show items of the order at the row
  show                     show the current page again
  help                     show this help
  quit                     exit";

/// Renders the displayed page of the provided [`Panel`] along with its
/// pagination controls.
#[must_use]
pub fn page(panel: &Panel) -> String {
    let store = panel.store();
    let mut out = format!(
        "{:>4}  {:<10}  {:<24}  {:<9}  {:>10}\n",
        "#", "Date", "Customer", "Status", "Total",
    );
    for (num, order) in store.rows() {
        _ = writeln!(out, "{}", row(num, order));
    }
    if let Some(search) = panel.search() {
        _ = writeln!(out, "Search: \"{search}\"");
    }
    _ = writeln!(out, "{}", store.summary());
    out.push_str(&controls(panel.controls()));
    out
}

/// Renders a single table row of an [`Order`].
fn row(num: u64, order: &Order) -> String {
    format!(
        "{num:>4}  {:<10}  {:<24}  {:<9}  {:>10}",
        order.date.date(),
        order.customer.name,
        order.status.code,
        order.total,
    )
}

/// Renders pagination [`Controls`], marking the disabled ones.
#[must_use]
pub fn controls(controls: Controls) -> String {
    let Controls {
        current,
        total_pages,
        prev,
        next,
    } = controls;

    let pages = (1..=total_pages.max(1))
        .map(|num| {
            if num == current.get() {
                format!("[{num}]")
            } else {
                num.to_string()
            }
        })
        .join(" ");
    format!(
        "{}  {pages}  {}",
        if prev { "< prev" } else { "(< prev)" },
        if next { "next >" } else { "(next >)" },
    )
}

/// Renders [`Item`]s of an [`Order`].
#[must_use]
pub fn items(order: &Order, items: &[Item]) -> String {
    let mut out = format!(
        "Order {} of {} ({})\n",
        order.id, order.customer.name, order.status.code,
    );
    if items.is_empty() {
        out.push_str("  no items");
        return out;
    }
    out.push_str(
        &items
            .iter()
            .map(|i| {
                format!(
                    "  {}  {:<24}  {:>4} x {:>10} = {:>10}",
                    i.product.id,
                    i.product.name,
                    i.quantity,
                    i.price,
                    i.subtotal(),
                )
            })
            .join("\n"),
    );
    out
}

/// Renders the open [`Form`].
#[must_use]
pub fn form(form: &Form) -> String {
    match form {
        Form::Create {
            customer_id, items, ..
        } => {
            let lines = items
                .iter()
                .map(|i| format!("  {}  x {}", i.product_id, i.quantity))
                .join("\n");
            format!(
                "New order for customer {customer_id}\n{}",
                if lines.is_empty() { "  no items" } else { lines.as_str() },
            )
        }
        Form::Edit { order, items: list } => items(order, list),
    }
}
