//! Event loop driving the order list [`Panel`] from a terminal.

use std::{io, time::Duration};

use futures::{
    future::LocalBoxFuture, stream::FuturesUnordered, FutureExt as _,
    StreamExt as _,
};
use service::{
    command::{
        create_order, update_order_items, Command, CreateOrder,
        UpdateOrderItems,
    },
    domain::{Item, Order},
    infra::backend,
    panel::{
        Completion, Event, Form, Mutation, Panel, Reaction, Submission, Ticket,
    },
    query::{order_items, orders, Query},
    read::order::list,
};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _,
};
use tracerr::Traced;
use tracing as log;

use crate::{define_error, render, AsError as _, Debouncer, Error, Input};

/// Operations required from a [`Service`] to drive a [`Panel`].
///
/// [`Service`]: service::Service
pub trait Api:
    Query<orders::List, Ok = list::Page, Err = Traced<backend::Error>>
    + Query<order_items::List, Ok = Vec<Item>, Err = Traced<backend::Error>>
    + Command<
        CreateOrder,
        Ok = Order,
        Err = Traced<create_order::ExecutionError>,
    > + Command<
        UpdateOrderItems,
        Ok = Order,
        Err = Traced<update_order_items::ExecutionError>,
    >
{
}

impl<T> Api for T where
    T: Query<orders::List, Ok = list::Page, Err = Traced<backend::Error>>
        + Query<
            order_items::List,
            Ok = Vec<Item>,
            Err = Traced<backend::Error>,
        > + Command<
            CreateOrder,
            Ok = Order,
            Err = Traced<create_order::ExecutionError>,
        > + Command<
            UpdateOrderItems,
            Ok = Order,
            Err = Traced<update_order_items::ExecutionError>,
        >
{
}

/// Runs the [`Panel`] upon the provided [`Api`], reading [`Input`] lines
/// from the `input` and writing renders to the `output`, until `quit` is
/// typed or the `input` is exhausted and nothing is awaited.
///
/// # Errors
///
/// If reading the `input` or writing the `output` fails.
pub async fn run<S, I, O>(
    api: &S,
    search_debounce: Duration,
    input: I,
    mut output: O,
) -> io::Result<()>
where
    S: Api,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut session = Session {
        panel: Panel::default(),
        search: Debouncer::new(search_debounce),
    };
    let mut awaited = FuturesUnordered::new();
    awaited.push(spawn(api, Job::Fetch(session.panel.load())));

    let mut lines = input.lines();
    let mut input_closed = false;

    output
        .write_all(b"Type `help` to list the available commands.\n")
        .await?;

    loop {
        let mut out = String::new();
        let job = tokio::select! {
            biased;

            Some(done) = awaited.next(), if !awaited.is_empty() => {
                session.done(done, &mut out)
            }
            search = session.search.settled(),
                if session.search.is_pending() =>
            {
                session.event(Event::SearchChanged(search), &mut out)
            }
            line = lines.next_line(), if !input_closed => {
                match line? {
                    None => {
                        input_closed = true;
                        None
                    }
                    Some(line) => match Input::parse(&line) {
                        Ok(Some(Input::Quit)) => break,
                        Ok(Some(input)) => session.input(input, &mut out),
                        Ok(None) => None,
                        Err(e) => {
                            out.push_str(&e.as_error().brief());
                            None
                        }
                    },
                }
            }
            else => break,
        };
        if let Some(job) = job {
            awaited.push(spawn(api, job));
        }
        if !out.is_empty() {
            out.push('\n');
            output.write_all(out.as_bytes()).await?;
            output.flush().await?;
        }
    }
    output.flush().await
}

/// State of a terminal session.
#[derive(Debug)]
struct Session {
    /// Driven [`Panel`].
    panel: Panel,

    /// [`Debouncer`] of the typed search terms.
    search: Debouncer<Option<list::Search>>,
}

impl Session {
    /// Handles the provided [`Input`], rendering its result into the `out`.
    ///
    /// Returns the [`Job`] to be performed, if any.
    fn input(&mut self, input: Input, out: &mut String) -> Option<Job> {
        match self.try_input(input, out) {
            Ok(job) => job,
            Err(e) => {
                out.push_str(&e.brief());
                None
            }
        }
    }

    /// Tries to handle the provided [`Input`].
    fn try_input(
        &mut self,
        input: Input,
        out: &mut String,
    ) -> Result<Option<Job>, Error> {
        use SessionError as E;

        let job = match input {
            Input::Page(num) => return self.try_event(Event::PageClicked(num)),
            Input::Next => {
                return self.try_event(Event::CursorClicked(
                    common::Direction::Next,
                ))
            }
            Input::Prev => {
                return self.try_event(Event::CursorClicked(
                    common::Direction::Prev,
                ))
            }
            Input::Search(search) => {
                self.search.push(search);
                None
            }
            Input::New(customer_id) => {
                self.panel.open_form(Form::Create {
                    customer_id,
                    items: vec![],
                    created: None,
                });
                self.show_form(out);
                None
            }
            Input::Add(product_id, quantity) => {
                let Some(form @ Form::Create { .. }) = self.panel.form_mut()
                else {
                    return Err(E::NotNewOrderForm.into());
                };
                _ = form.set_quantity(product_id, quantity);
                self.show_form(out);
                None
            }
            Input::Set(product_id, quantity) => {
                let form = self.panel.form_mut().ok_or(E::NoForm)?;
                if !form.set_quantity(product_id, quantity) {
                    return Err(E::UnknownProduct.into());
                }
                self.show_form(out);
                None
            }
            Input::Edit(row) => Some(Job::Items {
                order: self.order_at(row)?,
                edit: true,
            }),
            Input::Items(row) => Some(Job::Items {
                order: self.order_at(row)?,
                edit: false,
            }),
            Input::Save => Some(Job::Submit(
                self.panel.submit().map_err(|e| e.as_error())?,
            )),
            Input::Cancel => {
                _ = self.panel.close_form().ok_or(E::NoForm)?;
                out.push_str("Form is closed.");
                None
            }
            Input::Show => {
                out.push_str(&render::page(&self.panel));
                if self.panel.form().is_some() {
                    out.push('\n');
                    self.show_form(out);
                }
                None
            }
            Input::Help => {
                out.push_str(render::HELP);
                None
            }
            Input::Quit => None,
        };
        Ok(job)
    }

    /// Renders the open [`Form`] (if any) into the `out`.
    fn show_form(&self, out: &mut String) {
        if let Some(form) = self.panel.form() {
            out.push_str(&render::form(form));
        }
    }

    /// Returns a clone of the displayed [`Order`] at the provided `row`.
    fn order_at(&self, row: u64) -> Result<Order, Error> {
        self.panel
            .store()
            .row(row)
            .cloned()
            .ok_or_else(|| SessionError::NoSuchRow.into())
    }

    /// Handles the provided [`Event`], rendering rejection into the `out`.
    fn event(&mut self, event: Event, out: &mut String) -> Option<Job> {
        self.try_event(event).unwrap_or_else(|e| {
            out.push_str(&e.brief());
            None
        })
    }

    /// Tries to handle the provided [`Event`].
    fn try_event(&mut self, event: Event) -> Result<Option<Job>, Error> {
        let reaction = self.panel.handle(event).map_err(|e| e.as_error())?;
        Ok(match reaction {
            Reaction::Idle => None,
            Reaction::Fetch(ticket) => Some(Job::Fetch(ticket)),
            Reaction::Refresh(refresh, ticket) => {
                log::debug!("refreshing orders after mutation: {refresh:?}");
                Some(Job::Fetch(ticket))
            }
        })
    }

    /// Handles the provided [`Done`] job, rendering its result into the
    /// `out`.
    ///
    /// Returns the [`Job`] to be performed next, if any.
    fn done(&mut self, done: Done, out: &mut String) -> Option<Job> {
        match done {
            Done::Page(ticket, result) => {
                match self.panel.complete(&ticket, result) {
                    Completion::Applied => {
                        out.push_str(&render::page(&self.panel));
                    }
                    Completion::Discarded => {}
                    Completion::Failed(e) => {
                        let e = e.as_error();
                        log::error!("failed to fetch orders: {e}");
                        out.push_str(&e.brief());
                    }
                }
                None
            }
            Done::Items {
                order,
                edit,
                result,
            } => {
                match result {
                    Ok(items) if edit => {
                        let form = Form::Edit { order, items };
                        out.push_str(&render::form(&form));
                        self.panel.open_form(form);
                    }
                    Ok(items) => out.push_str(&render::items(&order, &items)),
                    Err(e) => {
                        let e = e.as_error();
                        log::error!("failed to fetch order items: {e}");
                        out.push_str(&e.brief());
                    }
                }
                None
            }
            Done::Mutation(mutation) => {
                out.push_str("Order is saved.");
                self.event(Event::MutationSucceeded(mutation), out)
            }
            Done::MutationFailed { error, created } => {
                log::error!("failed to save order: {error}");
                out.push_str(&error.brief());
                self.event(Event::MutationFailed(created), out)
            }
        }
    }
}

/// Asynchronous job to be performed upon an [`Api`].
#[derive(Debug)]
enum Job {
    /// Fetching of a [`list::Page`].
    Fetch(Ticket),

    /// Fetching of an [`Order`]'s [`Item`]s.
    Items {
        /// [`Order`] to fetch the [`Item`]s of.
        order: Order,

        /// Indicator whether to open an edit [`Form`] with the [`Item`]s.
        edit: bool,
    },

    /// Submission of a [`Form`].
    Submit(Submission),
}

/// Performed [`Job`].
#[derive(Debug)]
enum Done {
    /// [`list::Page`] is fetched.
    Page(Ticket, Result<list::Page, Traced<backend::Error>>),

    /// [`Order`]'s [`Item`]s are fetched.
    Items {
        /// [`Order`] the [`Item`]s are fetched of.
        order: Order,

        /// Indicator whether to open an edit [`Form`] with the [`Item`]s.
        edit: bool,

        /// Fetched [`Item`]s.
        result: Result<Vec<Item>, Traced<backend::Error>>,
    },

    /// [`Form`] is submitted.
    Mutation(Mutation),

    /// [`Form`] submission has failed.
    MutationFailed {
        /// [`Error`] of the submission.
        error: Error,

        /// [`Order`] created despite the failure, if any.
        created: Option<Order>,
    },
}

/// Starts performing the provided [`Job`] upon the [`Api`].
fn spawn<S: Api>(api: &S, job: Job) -> LocalBoxFuture<'_, Done> {
    match job {
        Job::Fetch(ticket) => async move {
            let result = api
                .execute(orders::List::by(ticket.selector().clone()))
                .await;
            Done::Page(ticket, result)
        }
        .boxed_local(),
        Job::Items { order, edit } => async move {
            let result = api.execute(order_items::List::by(order.id)).await;
            Done::Items {
                order,
                edit,
                result,
            }
        }
        .boxed_local(),
        Job::Submit(Submission::Create(cmd)) => async move {
            match api.execute(cmd).await {
                Ok(order) => Done::Mutation(Mutation::Created(order)),
                Err(e) => {
                    let created = match e.as_ref() {
                        create_order::ExecutionError::ItemsNotStored {
                            order,
                            ..
                        } => Some(order.clone()),
                        create_order::ExecutionError::Backend(_)
                        | create_order::ExecutionError::Items(_) => None,
                    };
                    Done::MutationFailed {
                        error: e.as_error(),
                        created,
                    }
                }
            }
        }
        .boxed_local(),
        Job::Submit(Submission::Update(cmd)) => async move {
            match api.execute(cmd).await {
                Ok(order) => Done::Mutation(Mutation::Updated(order)),
                Err(e) => Done::MutationFailed {
                    error: e.as_error(),
                    created: None,
                },
            }
        }
        .boxed_local(),
    }
}

define_error! {
    enum SessionError {
        #[code = "NO_SUCH_ROW"]
        #[message = "No order is displayed at this row"]
        NoSuchRow,

        #[code = "NO_FORM"]
        #[message = "No form is open"]
        NoForm,

        #[code = "NOT_NEW_ORDER_FORM"]
        #[message = "Products can be added to a new order form only"]
        NotNewOrderForm,

        #[code = "UNKNOWN_PRODUCT"]
        #[message = "Product is not in the form"]
        UnknownProduct,
    }
}
