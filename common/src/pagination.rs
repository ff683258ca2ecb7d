//! Abstractions for cursor-based pagination.
//!
//! A backend returns one [`Page`] at a time together with a
//! [`CursorResponse`] pointing at the pages around it. Cursors are opaque:
//! they are never compared or interpreted by a client, only sent back
//! verbatim to request an adjacent [`Page`].

use std::{fmt, num::NonZeroU32};

/// Boundary marker of a [`Page`] in an ordered result set.
///
/// Consists of the sort key (`date`) of the boundary record and its `id`
/// used as a tiebreak.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cursor<D, I> {
    /// Sort key of the boundary record.
    pub date: Option<D>,

    /// Identifier of the boundary record.
    pub id: Option<I>,
}

impl<D, I> Cursor<D, I> {
    /// Creates a new [`Cursor`] pointing to a record with the provided
    /// `date` and `id`.
    #[must_use]
    pub const fn new(date: D, id: I) -> Self {
        Self {
            date: Some(date),
            id: Some(id),
        }
    }

    /// Creates an exhausted [`Cursor`] meaning there is no further [`Page`]
    /// in its direction.
    #[must_use]
    pub const fn exhausted() -> Self {
        Self {
            date: None,
            id: None,
        }
    }

    /// Creates a new [`Cursor`] out of its optional parts.
    ///
    /// A [`Cursor`] missing any of its parts cannot be navigated by, so it's
    /// [`exhausted`] as a whole.
    ///
    /// [`exhausted`]: Cursor::exhausted
    #[must_use]
    pub fn from_parts(date: Option<D>, id: Option<I>) -> Self {
        match (date, id) {
            (Some(date), Some(id)) => Self::new(date, id),
            (None | Some(_), None) | (None, Some(_)) => Self::exhausted(),
        }
    }

    /// Indicates whether this [`Cursor`] points nowhere, so there is no
    /// further [`Page`] in its direction.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.date.is_none() && self.id.is_none()
    }
}

impl<D, I> Default for Cursor<D, I> {
    fn default() -> Self {
        Self::exhausted()
    }
}

/// Direction of a [`Cursor`] navigation.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Towards the previous [`Page`].
    Prev,

    /// Towards the next [`Page`].
    Next,
}

impl Direction {
    /// Returns the string representation of this [`Direction`] as understood
    /// by backends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// [`Cursor`]s surrounding a [`Page`], as returned by a backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorResponse<D, I> {
    /// [`Cursor`] of the previous [`Page`].
    ///
    /// [`exhausted`] on the first [`Page`].
    ///
    /// [`exhausted`]: Cursor::exhausted
    pub prev: Cursor<D, I>,

    /// [`Cursor`] of the next [`Page`].
    ///
    /// [`exhausted`] on the last [`Page`].
    ///
    /// [`exhausted`]: Cursor::exhausted
    pub next: Cursor<D, I>,
}

impl<D, I> CursorResponse<D, I> {
    /// Returns the [`Cursor`] leading in the provided [`Direction`].
    #[must_use]
    pub const fn get(&self, direction: Direction) -> &Cursor<D, I> {
        match direction {
            Direction::Prev => &self.prev,
            Direction::Next => &self.next,
        }
    }
}

impl<D, I> Default for CursorResponse<D, I> {
    fn default() -> Self {
        Self {
            prev: Cursor::exhausted(),
            next: Cursor::exhausted(),
        }
    }
}

/// Intended [`Cursor`] navigation for an upcoming [`Page`] request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorState<D, I> {
    /// [`Cursor`] to navigate from.
    pub cursor: Cursor<D, I>,

    /// [`Direction`] to navigate in.
    pub direction: Direction,
}

/// One-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// Number of the first [`Page`].
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`PageNumber`], if the provided `num` is not zero.
    #[must_use]
    pub const fn new(num: u32) -> Option<Self> {
        match NonZeroU32::new(num) {
            Some(num) => Some(Self(num)),
            None => None,
        }
    }

    /// Returns the raw value of this [`PageNumber`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Indicates whether this is the [`PageNumber::FIRST`].
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0.get() == 1
    }

    /// Returns the [`PageNumber`] one step away in the provided
    /// [`Direction`].
    ///
    /// Saturates at [`PageNumber::FIRST`] and [`u32::MAX`].
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Prev => match NonZeroU32::new(self.0.get() - 1) {
                Some(num) => Self(num),
                None => Self::FIRST,
            },
            Direction::Next => Self(self.0.saturating_add(1)),
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pagination arguments of a [`Page`] request.
///
/// A request either jumps to a numbered [`Page`] or navigates by a
/// [`Cursor`], never both.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Arguments<D, I> {
    /// Plain first [`Page`], without any page number or [`Cursor`].
    #[default]
    First,

    /// Explicitly numbered [`Page`].
    Number(PageNumber),

    /// [`Page`] adjacent to a [`Cursor`].
    Cursor(CursorState<D, I>),
}

impl<D, I> Arguments<D, I> {
    /// Returns the explicit [`PageNumber`] requested by these
    /// [`Arguments`], if any.
    #[must_use]
    pub const fn page(&self) -> Option<PageNumber> {
        match self {
            Self::Number(num) => Some(*num),
            Self::First | Self::Cursor(_) => None,
        }
    }

    /// Returns the [`CursorState`] requested by these [`Arguments`], if any.
    #[must_use]
    pub const fn cursor(&self) -> Option<&CursorState<D, I>> {
        match self {
            Self::Cursor(state) => Some(state),
            Self::First | Self::Number(_) => None,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector<D, I, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<D, I>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// A single page of an ordered result set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T, D, I> {
    /// Items of this [`Page`], in the backend's order.
    pub items: Vec<T>,

    /// [`Cursor`]s surrounding this [`Page`].
    pub cursors: CursorResponse<D, I>,

    /// Total number of pages in the result set.
    pub total_pages: u32,

    /// Total number of items in the result set.
    pub total_items: u64,

    /// Maximum number of items per page.
    pub per_page: u32,
}

impl<T, D, I> Default for Page<T, D, I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursors: CursorResponse::default(),
            total_pages: 1,
            total_items: 0,
            per_page: 1,
        }
    }
}

impl<T, D, I> Page<T, D, I> {
    /// Returns the one-based position in the whole result set of the item at
    /// the provided `index` of this [`Page`], displayed as the page `num`.
    #[must_use]
    pub fn position(&self, num: PageNumber, index: usize) -> u64 {
        u64::from(self.per_page) * u64::from(num.get() - 1)
            + index as u64
            + 1
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($date:ty, $id:ty, $node:ty, $filter:ty) => {
        #[doc = "Boundary [`Cursor`] of a [`Page`]."]
        pub type Cursor = $crate::pagination::Cursor<$date, $id>;

        #[doc = "[`Cursor`]s surrounding a [`Page`]."]
        pub type CursorResponse =
            $crate::pagination::CursorResponse<$date, $id>;

        #[doc = "Intended [`Cursor`] navigation."]
        pub type CursorState = $crate::pagination::CursorState<$date, $id>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$date, $id>;

        #[doc = "[`Page`] selector."]
        pub type Selector =
            $crate::pagination::Selector<$date, $id, $filter>;

        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node, $date, $id>;
    };
}
