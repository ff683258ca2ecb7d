//! [`Order`]-related read definitions.

#[cfg(doc)]
use crate::domain::Order;

pub mod list {
    //! [`Order`] list definitions.

    use common::define_pagination;
    use derive_more::{AsRef, Display, From};
    use serde::Deserialize;

    use crate::domain::Order;

    define_pagination!(CursorDate, CursorId, Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Order;

    /// Opaque sort key of the boundary [`Order`] of a [`Page`].
    #[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
    #[as_ref(forward)]
    pub struct CursorDate(String);

    /// Opaque identifier of the boundary [`Order`] of a [`Page`].
    #[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq)]
    #[as_ref(forward)]
    pub struct CursorId(String);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Free-text [`Search`] term, if any.
        pub search: Option<Search>,
    }

    /// Free-text search term matched by a backend.
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(forward)]
    pub struct Search(String);

    impl Search {
        /// Creates a new [`Search`] term.
        ///
        /// Empty terms mean no filtering, so [`None`] is returned for them.
        /// Any other content is kept verbatim.
        #[must_use]
        pub fn new(term: impl Into<String>) -> Option<Self> {
            let term = term.into();
            (!term.is_empty()).then_some(Self(term))
        }
    }

    #[cfg(test)]
    mod spec {
        use super::Search;

        #[test]
        fn empty_search_is_absent() {
            assert!(Search::new("").is_none());
        }

        #[test]
        fn search_is_kept_verbatim() {
            assert_eq!(
                AsRef::<str>::as_ref(&Search::new("  Jane O'Neil ").unwrap()),
                "  Jane O'Neil ",
            );
        }
    }
}
