//! [`Query`] collection related to the multiple [`Order`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Order, Query};

use super::BackendQuery;

/// Queries a [`read::order::list::Page`] of [`Order`]s.
pub type List =
    BackendQuery<By<read::order::list::Page, read::order::list::Selector>>;
