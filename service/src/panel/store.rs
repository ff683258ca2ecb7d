//! Storage of the currently displayed [`list::Page`].

use std::fmt;

use common::PageNumber;

use crate::{domain::Order, read::order::list};

/// Currently displayed [`list::Page`] of [`Order`]s.
#[derive(Clone, Debug, Default)]
pub struct Store {
    /// Displayed [`list::Page`].
    page: list::Page,

    /// [`PageNumber`] the [`list::Page`] is displayed as.
    shown: PageNumber,
}

impl Store {
    /// Replaces the whole displayed [`list::Page`] at once, displaying it as
    /// the page `num`.
    pub fn replace(&mut self, page: list::Page, num: PageNumber) {
        self.page = page;
        self.shown = num;
    }

    /// Replaces the displayed [`Order`] having the same ID as the provided
    /// `updated` one, leaving everything else untouched.
    ///
    /// Returns whether any [`Order`] has been replaced.
    pub fn apply_updated_order(&mut self, updated: Order) -> bool {
        let Some(order) =
            self.page.items.iter_mut().find(|o| o.id == updated.id)
        else {
            return false;
        };
        *order = updated;
        true
    }

    /// Returns the displayed [`Order`]s along with their row numbers in the
    /// whole result set.
    pub fn rows(&self) -> impl Iterator<Item = (u64, &Order)> + '_ {
        self.page
            .items
            .iter()
            .enumerate()
            .map(|(i, order)| (self.page.position(self.shown, i), order))
    }

    /// Returns the displayed [`Order`] with the provided row `number`, if
    /// any.
    #[must_use]
    pub fn row(&self, number: u64) -> Option<&Order> {
        self.rows().find(|(n, _)| *n == number).map(|(_, o)| o)
    }

    /// Returns the [`PageNumber`] the [`list::Page`] is displayed as.
    #[must_use]
    pub fn shown(&self) -> PageNumber {
        self.shown
    }

    /// Returns the [`list::CursorResponse`] of the displayed [`list::Page`].
    #[must_use]
    pub fn cursors(&self) -> &list::CursorResponse {
        &self.page.cursors
    }

    /// Returns the total number of pages in the result set.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page.total_pages
    }

    /// Returns the [`Summary`] of the displayed [`list::Page`].
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            shown: self.page.items.len(),
            total: self.page.total_items,
        }
    }
}

/// Summary of a displayed [`list::Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Number of displayed [`Order`]s.
    pub shown: usize,

    /// Total number of [`Order`]s in the result set.
    pub total: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} orders", self.shown, self.total)
    }
}

#[cfg(test)]
mod spec {
    use common::PageNumber;

    use crate::{
        domain::order,
        infra::backend::fake,
        read::order::list,
    };

    use super::Store;

    fn page(totals: &[&str]) -> list::Page {
        list::Page {
            items: totals.iter().map(|t| fake::order(t)).collect(),
            total_pages: 3,
            total_items: 7,
            per_page: 3,
            ..list::Page::default()
        }
    }

    #[test]
    fn numbers_rows_across_pages() {
        let mut store = Store::default();
        store.replace(page(&["1", "2"]), PageNumber::new(3).unwrap());

        let numbers: Vec<_> = store.rows().map(|(n, _)| n).collect();
        assert_eq!(numbers, [7, 8]);
        assert_eq!(store.shown(), PageNumber::new(3).unwrap());
        assert_eq!(store.row(8).map(|o| o.total.to_string()), Some("2".into()));
        assert!(store.row(9).is_none());
    }

    #[test]
    fn patches_only_matching_order() {
        let mut store = Store::default();
        store.replace(page(&["1", "2", "3"]), PageNumber::FIRST);
        let before = store.clone();

        let mut updated = before.page.items[1].clone();
        updated.total = order::Total::from(fake::decimal("99.90"));
        assert!(store.apply_updated_order(updated.clone()));

        assert_eq!(store.page.items[0], before.page.items[0]);
        assert_eq!(store.page.items[1], updated);
        assert_eq!(store.page.items[2], before.page.items[2]);
        assert_eq!(store.total_pages(), before.total_pages());
        assert_eq!(store.summary(), before.summary());
        assert_eq!(store.cursors(), before.cursors());
    }

    #[test]
    fn ignores_unknown_order() {
        let mut store = Store::default();
        store.replace(page(&["1"]), PageNumber::FIRST);

        assert!(!store.apply_updated_order(fake::order("5")));
        assert_eq!(store.page.items[0].total.to_string(), "1");
    }

    #[test]
    fn summary() {
        let mut store = Store::default();
        store.replace(page(&["1", "2", "3"]), PageNumber::FIRST);

        assert_eq!(store.summary().to_string(), "Showing 3 of 7 orders");
    }
}
