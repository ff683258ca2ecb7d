//! Coordination of an edit [`Form`] with refreshing the displayed page after
//! a [`Mutation`].

use common::PageNumber;
use tracing as log;

use crate::{
    command::{CreateOrder, UpdateOrderItems},
    domain::{customer, item, product, Item, Order},
};

use super::Rejection;

/// Edit form of an [`Order`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Form {
    /// Form of a new [`Order`].
    Create {
        /// ID of the [`Customer`] the new [`Order`] is placed for.
        ///
        /// [`Customer`]: crate::domain::Customer
        customer_id: customer::Id,

        /// [`item::New`]s of the new [`Order`].
        items: Vec<item::New>,

        /// [`Order`] created by a failed submission of this [`Form`], which
        /// is still missing its [`item::New`]s.
        created: Option<Order>,
    },

    /// Form of an existing [`Order`]'s [`Item`]s.
    Edit {
        /// [`Order`] being edited.
        order: Order,

        /// [`Item`]s of the [`Order`].
        items: Vec<Item>,
    },
}

impl Form {
    /// Sets the `quantity` of the [`Product`] with the provided `product_id`.
    ///
    /// Zero `quantity` removes the [`Product`]. Only [`Form::Create`] may
    /// have new [`Product`]s added, as prices of them are unknown otherwise.
    ///
    /// Returns whether the [`Form`] has been changed.
    ///
    /// [`Product`]: crate::domain::Product
    pub fn set_quantity(
        &mut self,
        product_id: product::Id,
        quantity: item::Quantity,
    ) -> bool {
        let remove = u32::from(quantity) == 0;
        match self {
            Self::Create { items, .. } => {
                let pos = items.iter().position(|i| i.product_id == product_id);
                match (pos, remove) {
                    (Some(pos), true) => {
                        _ = items.remove(pos);
                    }
                    (Some(pos), false) => items[pos].quantity = quantity,
                    (None, false) => items.push(item::New {
                        product_id,
                        quantity,
                    }),
                    (None, true) => return false,
                }
                true
            }
            Self::Edit { items, .. } => {
                let Some(pos) =
                    items.iter().position(|i| i.product.id == product_id)
                else {
                    return false;
                };
                if remove {
                    _ = items.remove(pos);
                } else {
                    items[pos].quantity = quantity;
                }
                true
            }
        }
    }

    /// Returns the [`Submission`] of this [`Form`].
    #[must_use]
    pub fn submission(&self) -> Submission {
        match self {
            Self::Create {
                customer_id,
                items,
                created,
            } => Submission::Create(CreateOrder {
                customer_id: *customer_id,
                items: items.clone(),
                created: created.clone(),
            }),
            Self::Edit { order, items } => {
                Submission::Update(UpdateOrderItems {
                    order: order.clone(),
                    items: items.clone(),
                })
            }
        }
    }
}

/// [`Command`] submitting a [`Form`].
///
/// [`Command`]: crate::Command
#[derive(Clone, Debug)]
pub enum Submission {
    /// Creation of a new [`Order`].
    Create(CreateOrder),

    /// Replacement of an existing [`Order`]'s [`Item`]s.
    Update(UpdateOrderItems),
}

/// Successfully performed mutation of an [`Order`].
#[derive(Clone, Debug)]
pub enum Mutation {
    /// New [`Order`] has been created.
    Created(Order),

    /// Existing [`Order`] has been updated.
    Updated(Order),
}

/// Way the displayed page is refreshed after a [`Mutation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Refresh {
    /// First page is displayed already, so it's fetched again.
    Refetched,

    /// Another page is displayed, so it's reset to the first one.
    ResetToFirstPage,
}

/// Coordinator of the open [`Form`] and refreshes after [`Mutation`]s.
#[derive(Clone, Debug, Default)]
pub struct Coordinator {
    /// Currently open [`Form`], if any.
    form: Option<Form>,

    /// Number of [`Form`]s opened so far, identifying the open one.
    opened: u64,

    /// Identifier of the [`Form`] whose [`Submission`] is awaited, if any.
    submitted: Option<u64>,
}

impl Coordinator {
    /// Returns the currently open [`Form`], if any.
    #[must_use]
    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// Returns the currently open [`Form`] for modification, if any.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.form.as_mut()
    }

    /// Opens the provided [`Form`], replacing the currently open one.
    pub fn open(&mut self, form: Form) {
        self.opened = self.opened.wrapping_add(1);
        self.form = Some(form);
    }

    /// Indicates whether a [`Submission`] is awaited.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitted.is_some()
    }

    /// Submits the open [`Form`].
    ///
    /// # Errors
    ///
    /// If no [`Form`] is open, or another [`Submission`] is still awaited.
    pub fn submit(&mut self) -> Result<Submission, Rejection> {
        if self.submitted.is_some() {
            return Err(Rejection::SubmissionPending);
        }
        let form = self.form.as_ref().ok_or(Rejection::NoForm)?;
        self.submitted = Some(self.opened);
        Ok(form.submission())
    }

    /// Takes the awaited [`Submission`], returning whether it's of the
    /// currently open [`Form`].
    fn settle(&mut self) -> bool {
        let submitted = self.submitted.take();
        self.form.is_some() && submitted == Some(self.opened)
    }

    /// Closes the currently open [`Form`], returning it.
    pub fn close(&mut self) -> Option<Form> {
        self.form.take()
    }

    /// Closes the submitted [`Form`] after a successful [`Mutation`] and
    /// decides how to refresh the `current` page.
    ///
    /// A [`Form`] opened after the submission is kept open.
    pub fn succeeded(&mut self, current: PageNumber) -> Refresh {
        if self.settle() {
            _ = self.close();
        } else if self.form.is_some() {
            log::debug!("keeping the form opened after the submission");
        }
        if current.is_first() {
            Refresh::Refetched
        } else {
            Refresh::ResetToFirstPage
        }
    }

    /// Keeps the submitted [`Form`] open after a failed [`Mutation`].
    ///
    /// The [`Order`] `created` despite the failure is remembered by the
    /// [`Form`], so submitting it again doesn't create another one.
    pub fn failed(&mut self, created: Option<Order>) {
        if !self.settle() {
            if let Some(order) = created {
                log::warn!(
                    "`Order(id: {})` is created without items, but its form \
                     is closed already",
                    order.id,
                );
            }
            return;
        }
        log::debug!("mutation failed, keeping the form open");
        if let (Some(Form::Create { created: slot, .. }), Some(order)) =
            (&mut self.form, created)
        {
            *slot = Some(order);
        }
    }
}

#[cfg(test)]
mod spec {
    use common::PageNumber;
    use uuid::Uuid;

    use crate::{
        domain::{customer, item, product, Item, Product},
        infra::backend::fake,
    };

    use super::{Coordinator, Form, Refresh, Rejection, Submission};

    fn quantity(n: u32) -> item::Quantity {
        item::Quantity::from(n)
    }

    #[test]
    fn create_form_adds_updates_and_removes_items() {
        let product_id = product::Id::from(Uuid::new_v4());
        let mut form = Form::Create {
            customer_id: customer::Id::from(Uuid::new_v4()),
            items: vec![],
            created: None,
        };

        assert!(form.set_quantity(product_id, quantity(2)));
        assert!(form.set_quantity(product_id, quantity(5)));
        let Form::Create { items, .. } = &form else {
            unreachable!()
        };
        assert_eq!(
            items,
            &[item::New {
                product_id,
                quantity: quantity(5),
            }],
        );

        assert!(form.set_quantity(product_id, quantity(0)));
        assert!(!form.set_quantity(product_id, quantity(0)));
        let Submission::Create(cmd) = form.submission() else {
            unreachable!()
        };
        assert!(cmd.items.is_empty());
    }

    #[test]
    fn edit_form_changes_only_existing_items() {
        let product = Product {
            id: product::Id::from(Uuid::new_v4()),
            name: product::Name::from("Widget".to_owned()),
        };
        let mut form = Form::Edit {
            order: fake::order("10"),
            items: vec![Item {
                product: product.clone(),
                quantity: quantity(1),
                price: item::Price::from(fake::decimal("10")),
            }],
        };

        let unknown = product::Id::from(Uuid::new_v4());
        assert!(!form.set_quantity(unknown, quantity(1)));
        assert!(form.set_quantity(product.id, quantity(3)));

        let Submission::Update(cmd) = form.submission() else {
            unreachable!()
        };
        assert_eq!(cmd.items[0].quantity, quantity(3));
    }

    fn create_form() -> Form {
        Form::Create {
            customer_id: customer::Id::from(Uuid::new_v4()),
            items: vec![],
            created: None,
        }
    }

    #[test]
    fn success_closes_form_and_decides_refresh() {
        let mut coordinator = Coordinator::default();
        coordinator.open(create_form());
        _ = coordinator.submit().unwrap();

        assert_eq!(
            coordinator.succeeded(PageNumber::FIRST),
            Refresh::Refetched,
        );
        assert!(coordinator.form().is_none());

        coordinator.open(Form::Edit {
            order: fake::order("1"),
            items: vec![],
        });
        _ = coordinator.submit().unwrap();
        assert_eq!(
            coordinator.succeeded(PageNumber::new(2).unwrap()),
            Refresh::ResetToFirstPage,
        );
        assert!(coordinator.form().is_none());
    }

    #[test]
    fn failure_keeps_form_open() {
        let mut coordinator = Coordinator::default();
        coordinator.open(Form::Edit {
            order: fake::order("1"),
            items: vec![],
        });
        _ = coordinator.submit().unwrap();

        coordinator.failed(None);

        assert!(coordinator.form().is_some());
        assert!(!coordinator.is_submitting());
    }

    #[test]
    fn refuses_submission_while_awaiting_one() {
        let mut coordinator = Coordinator::default();
        assert_eq!(coordinator.submit().unwrap_err(), Rejection::NoForm);

        coordinator.open(create_form());
        _ = coordinator.submit().unwrap();

        assert_eq!(
            coordinator.submit().unwrap_err(),
            Rejection::SubmissionPending,
        );
        coordinator.failed(None);
        assert!(coordinator.submit().is_ok());
    }

    #[test]
    fn success_keeps_form_opened_after_submission() {
        let mut coordinator = Coordinator::default();
        coordinator.open(create_form());
        _ = coordinator.submit().unwrap();

        coordinator.open(Form::Edit {
            order: fake::order("1"),
            items: vec![],
        });
        _ = coordinator.succeeded(PageNumber::FIRST);

        assert!(matches!(coordinator.form(), Some(Form::Edit { .. })));
    }

    #[test]
    fn resubmission_reuses_created_order() {
        let mut coordinator = Coordinator::default();
        coordinator.open(create_form());
        _ = coordinator.submit().unwrap();
        let created = fake::order("0");

        coordinator.failed(Some(created.clone()));

        let Submission::Create(cmd) = coordinator.submit().unwrap() else {
            unreachable!()
        };
        assert_eq!(cmd.created, Some(created));
    }
}
