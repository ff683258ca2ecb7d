//! Order list [`Panel`] state machine.
//!
//! [`Panel`] consumes user [`Event`]s and issues [`Ticket`]s describing the
//! [`list::Page`]s to fetch. Fetching itself is performed by a caller via
//! [`query::orders::List`], and its result is fed back with
//! [`Panel::complete()`]:
//!
//! ```text
//!         handle(Event) ──► Ticket
//!   Idle ───────────────────────────► Fetching(generation)
//!    ▲                                     │
//!    └──────── complete(latest Ticket) ◄───┘
//! ```
//!
//! [`query::orders::List`]: crate::query::orders::List

pub mod controller;
pub mod refresh;
pub mod selector;
pub mod store;

use common::{Direction, PageNumber};
use tracing as log;

use crate::{domain::Order, read::order::list};

pub use self::{
    controller::{Controller, Generation, Rejection, State, Ticket},
    refresh::{Coordinator, Form, Mutation, Refresh, Submission},
    store::{Store, Summary},
};

/// User action upon a [`Panel`].
#[derive(Clone, Debug)]
pub enum Event {
    /// Numbered page is clicked.
    PageClicked(PageNumber),

    /// Previous or next page is clicked.
    CursorClicked(Direction),

    /// Search term is settled after being typed.
    SearchChanged(Option<list::Search>),

    /// Submitted [`Form`] has been stored successfully.
    MutationSucceeded(Mutation),

    /// Submitted [`Form`] has failed to be stored.
    ///
    /// Holds the new [`Order`] created despite the failure, if any.
    MutationFailed(Option<Order>),
}

/// Reaction of a [`Panel`] to an [`Event`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reaction {
    /// Nothing is to be fetched.
    Idle,

    /// [`list::Page`] is to be fetched.
    Fetch(Ticket),

    /// First [`list::Page`] is to be fetched after a [`Mutation`].
    Refresh(Refresh, Ticket),
}

impl Reaction {
    /// Returns the [`Ticket`] to be fetched, if any.
    #[must_use]
    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Idle => None,
            Self::Fetch(ticket) | Self::Refresh(_, ticket) => Some(ticket),
        }
    }
}

/// Result of completing a [`Ticket`].
#[derive(Debug)]
pub enum Completion<E> {
    /// Fetched [`list::Page`] is displayed.
    Applied,

    /// Newer [`Ticket`] has been issued, so the result is dropped.
    Discarded,

    /// Fetching of the latest [`Ticket`] has failed.
    Failed(E),
}

/// Pagination controls of a [`Panel`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Controls {
    /// Currently selected [`PageNumber`].
    pub current: PageNumber,

    /// Total number of pages.
    pub total_pages: u32,

    /// Indicator whether the previous page can be navigated to.
    pub prev: bool,

    /// Indicator whether the next page can be navigated to.
    pub next: bool,
}

/// Order list panel.
#[derive(Clone, Debug, Default)]
pub struct Panel {
    /// [`Store`] of the displayed [`list::Page`].
    store: Store,

    /// [`Controller`] of the pagination.
    controller: Controller,

    /// [`Coordinator`] of the [`Form`] and refreshes.
    refresh: Coordinator,
}

impl Panel {
    /// Issues a [`Ticket`] of the plain first [`list::Page`], to be fetched
    /// initially.
    pub fn load(&mut self) -> Ticket {
        self.controller.reset()
    }

    /// Handles the provided [`Event`].
    ///
    /// # Errors
    ///
    /// If the [`Event`] cannot be performed upon the displayed
    /// [`list::Page`].
    pub fn handle(&mut self, event: Event) -> Result<Reaction, Rejection> {
        log::debug!("handling panel event: {event:?}");
        let reaction = match event {
            Event::PageClicked(num) => {
                Reaction::Fetch(self.controller.click_page(num, &self.store)?)
            }
            Event::CursorClicked(direction) => Reaction::Fetch(
                self.controller.click_cursor(direction, &self.store)?,
            ),
            Event::SearchChanged(search) => self
                .controller
                .change_search(search)
                .map_or(Reaction::Idle, Reaction::Fetch),
            Event::MutationSucceeded(mutation) => {
                if let Mutation::Updated(order) = mutation {
                    let id = order.id;
                    if !self.store.apply_updated_order(order) {
                        log::debug!("updated `Order(id: {id})` is not shown");
                    }
                }
                let refresh =
                    self.refresh.succeeded(self.controller.current_page());
                Reaction::Refresh(refresh, self.controller.reset())
            }
            Event::MutationFailed(created) => {
                self.refresh.failed(created);
                Reaction::Idle
            }
        };
        Ok(reaction)
    }

    /// Completes the provided [`Ticket`] with its fetching `result`.
    ///
    /// Only the latest issued [`Ticket`] is applied. If it fails, the
    /// displayed [`list::Page`] is kept and the current page along with the
    /// search term are rolled back to it.
    pub fn complete<E>(
        &mut self,
        ticket: &Ticket,
        result: Result<list::Page, E>,
    ) -> Completion<E> {
        if !self.controller.settle(ticket) {
            return Completion::Discarded;
        }
        match result {
            Ok(page) => {
                self.store.replace(page, ticket.page());
                self.controller.apply(ticket);
                Completion::Applied
            }
            Err(e) => {
                self.controller.roll_back(self.store.shown());
                Completion::Failed(e)
            }
        }
    }

    /// Returns the [`Store`] of the displayed [`list::Page`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the current [`State`] of this [`Panel`].
    #[must_use]
    pub fn state(&self) -> &State {
        self.controller.state()
    }

    /// Returns the currently selected [`PageNumber`].
    #[must_use]
    pub fn current_page(&self) -> PageNumber {
        self.controller.current_page()
    }

    /// Returns the applied search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&list::Search> {
        self.controller.search()
    }

    /// Returns the pagination [`Controls`] of the displayed [`list::Page`].
    #[must_use]
    pub fn controls(&self) -> Controls {
        let cursors = self.store.cursors();
        Controls {
            current: self.controller.current_page(),
            total_pages: self.store.total_pages(),
            prev: !cursors.prev.is_exhausted(),
            next: !cursors.next.is_exhausted(),
        }
    }

    /// Returns the currently open [`Form`], if any.
    #[must_use]
    pub fn form(&self) -> Option<&Form> {
        self.refresh.form()
    }

    /// Returns the currently open [`Form`] for modification, if any.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.refresh.form_mut()
    }

    /// Opens the provided [`Form`], replacing the currently open one.
    pub fn open_form(&mut self, form: Form) {
        self.refresh.open(form);
    }

    /// Submits the currently open [`Form`].
    ///
    /// # Errors
    ///
    /// If no [`Form`] is open, or a [`Submission`] is awaited already.
    pub fn submit(&mut self) -> Result<Submission, Rejection> {
        self.refresh.submit()
    }

    /// Closes the currently open [`Form`] without submitting it.
    pub fn close_form(&mut self) -> Option<Form> {
        self.refresh.close()
    }
}
