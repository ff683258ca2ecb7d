//! Domain definitions.

pub mod customer;
pub mod item;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use self::{
    customer::Customer, item::Item, order::Order, product::Product,
    status::Status, user::User,
};
