//! Read entities definitions.

pub mod order;
