//! Pagination controller deciding which [`list::Page`] to fetch next.

use common::{Direction, PageNumber};
use derive_more::{Display, Error};
use tracing as log;

use crate::read::order::list;

use super::{selector, Store};

/// Generation of an issued [`Ticket`], increasing monotonically.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Ord, PartialEq, PartialOrd)]
pub struct Generation(u64);

/// Issued request of a [`list::Page`].
///
/// Only the latest issued [`Ticket`] is allowed to update a [`Store`], so
/// responses arriving out of order never overwrite newer ones.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    /// [`Generation`] of this [`Ticket`].
    generation: Generation,

    /// [`PageNumber`] the fetched [`list::Page`] is going to be displayed as.
    page: PageNumber,

    /// [`list::Selector`] of the [`list::Page`] to fetch.
    selector: list::Selector,
}

impl Ticket {
    /// Returns the [`Generation`] of this [`Ticket`].
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the [`PageNumber`] the fetched [`list::Page`] is going to be
    /// displayed as.
    #[must_use]
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Returns the [`list::Selector`] of the [`list::Page`] to fetch.
    #[must_use]
    pub fn selector(&self) -> &list::Selector {
        &self.selector
    }
}

/// State of a [`Controller`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum State {
    /// No request is awaited.
    #[default]
    Idle,

    /// The latest issued request is awaited.
    Fetching(Generation),
}

/// Pagination controller.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    /// Current [`State`] of this [`Controller`].
    state: State,

    /// [`Generation`] of the latest issued [`Ticket`].
    latest: Generation,

    /// [`PageNumber`] currently selected by a user.
    current: PageNumber,

    /// Free-text search term of the displayed [`list::Page`].
    search: Option<list::Search>,

    /// Free-text search term of the latest issued [`Ticket`].
    requested: Option<list::Search>,
}

impl Controller {
    /// Returns the current [`State`] of this [`Controller`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the [`PageNumber`] currently selected by a user.
    #[must_use]
    pub fn current_page(&self) -> PageNumber {
        self.current
    }

    /// Returns the free-text search term of the displayed [`list::Page`], if
    /// any.
    #[must_use]
    pub fn search(&self) -> Option<&list::Search> {
        self.search.as_ref()
    }

    /// Selects the page `num` of the displayed result set explicitly.
    ///
    /// # Errors
    ///
    /// If `num` is out of the pages of the displayed result set.
    pub fn click_page(
        &mut self,
        num: PageNumber,
        store: &Store,
    ) -> Result<Ticket, Rejection> {
        let total = store.total_pages().max(1);
        if num.get() > total {
            return Err(Rejection::PageOutOfRange { page: num, total });
        }
        self.current = num;
        self.requested.clone_from(&self.search);
        Ok(self.issue(Some(num), None))
    }

    /// Navigates to the adjacent page of the displayed result set in the
    /// provided `direction`.
    ///
    /// # Errors
    ///
    /// If the displayed result set has no page in the `direction`.
    pub fn click_cursor(
        &mut self,
        direction: Direction,
        store: &Store,
    ) -> Result<Ticket, Rejection> {
        let cursor = store.cursors().get(direction);
        if cursor.is_exhausted() {
            return Err(Rejection::Exhausted(direction));
        }
        let state = list::CursorState {
            cursor: cursor.clone(),
            direction,
        };
        self.current = store.shown().step(direction);
        self.requested.clone_from(&self.search);
        Ok(self.issue(None, Some(state)))
    }

    /// Requests the provided `search` term, resetting to the first page.
    ///
    /// Returns [`None`] if the `search` term is requested already.
    pub fn change_search(
        &mut self,
        search: Option<list::Search>,
    ) -> Option<Ticket> {
        if self.requested == search {
            return None;
        }
        self.requested = search;
        Some(self.reset())
    }

    /// Resets to the first page, fetching it without any page number or
    /// cursor.
    pub fn reset(&mut self) -> Ticket {
        self.current = PageNumber::FIRST;
        self.issue(None, None)
    }

    /// Settles the provided `ticket` being completed.
    ///
    /// Returns whether the `ticket` is the latest issued one, so its result
    /// may be applied.
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        if ticket.generation != self.latest {
            log::debug!(
                "discarding stale response of generation {} \
                 (latest is {})",
                ticket.generation,
                self.latest,
            );
            return false;
        }
        self.state = State::Idle;
        true
    }

    /// Makes the search term of the provided settled `ticket` the one of the
    /// displayed [`list::Page`].
    pub fn apply(&mut self, ticket: &Ticket) {
        self.search.clone_from(&ticket.selector.filter.search);
    }

    /// Rolls the current page and the requested search term back to the
    /// ones still `shown`, after the latest request failed.
    pub fn roll_back(&mut self, shown: PageNumber) {
        self.current = shown;
        self.requested.clone_from(&self.search);
    }

    /// Issues a new [`Ticket`] for the current page.
    ///
    /// The provided `page` and `cursor` are consumed by the built
    /// [`list::Selector`] only.
    fn issue(
        &mut self,
        page: Option<PageNumber>,
        cursor: Option<list::CursorState>,
    ) -> Ticket {
        self.latest = Generation(self.latest.0.wrapping_add(1));
        self.state = State::Fetching(self.latest);
        let ticket = Ticket {
            generation: self.latest,
            page: self.current,
            selector: selector::build(page, cursor, self.requested.as_ref()),
        };
        log::debug!(
            "issuing orders request of generation {} for page {}: {:?}",
            ticket.generation,
            ticket.page,
            ticket.selector.arguments,
        );
        ticket
    }
}

/// Reason of a user action being rejected.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Rejection {
    /// Requested page doesn't exist.
    #[display("page {page} is out of range 1..={total}")]
    PageOutOfRange {
        /// Requested [`PageNumber`].
        page: PageNumber,

        /// Total number of pages.
        total: u32,
    },

    /// There is no page in the requested [`Direction`].
    #[display("there is no {_0} page")]
    Exhausted(#[error(not(source))] Direction),

    /// There is no [`Form`] to submit.
    ///
    /// [`Form`]: super::Form
    #[display("no form is open")]
    NoForm,

    /// Submission of a [`Form`] is awaited already.
    ///
    /// [`Form`]: super::Form
    #[display("the form is being submitted already")]
    SubmissionPending,
}
