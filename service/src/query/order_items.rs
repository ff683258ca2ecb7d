//! [`Query`] collection related to [`Item`]s of an [`Order`].

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Order, Query};
use crate::domain::{order, Item};

use super::BackendQuery;

/// Queries all the [`Item`]s of an [`Order`].
pub type List = BackendQuery<By<Vec<Item>, order::Id>>;
