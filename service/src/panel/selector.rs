//! Building of [`list::Selector`]s out of the panel state.

use common::PageNumber;

use crate::read::order::list;

/// Builds a [`list::Selector`] of the [`list::Page`] to fetch.
///
/// A [`list::CursorState`] wins over an explicit `page`, and without both
/// the plain first [`list::Page`] is selected. The `search` term is attached
/// as is.
#[must_use]
pub fn build(
    page: Option<PageNumber>,
    cursor: Option<list::CursorState>,
    search: Option<&list::Search>,
) -> list::Selector {
    let arguments = match (cursor, page) {
        (Some(state), _) => list::Arguments::Cursor(state),
        (None, Some(num)) => list::Arguments::Number(num),
        (None, None) => list::Arguments::First,
    };
    list::Selector {
        arguments,
        filter: list::Filter {
            search: search.cloned(),
        },
    }
}

#[cfg(test)]
mod spec {
    use common::{Direction, PageNumber};

    use crate::read::order::list;

    use super::build;

    fn cursor_state() -> list::CursorState {
        list::CursorState {
            cursor: list::Cursor::new(
                list::CursorDate::from("2024-01-01".to_owned()),
                list::CursorId::from("o5".to_owned()),
            ),
            direction: Direction::Next,
        }
    }

    #[test]
    fn cursor_wins_over_page() {
        let selector =
            build(PageNumber::new(2), Some(cursor_state()), None);

        assert_eq!(selector.arguments, list::Arguments::Cursor(cursor_state()));
        assert_eq!(selector.arguments.page(), None);
        assert_eq!(selector.filter, list::Filter::default());
    }

    #[test]
    fn numbered_page() {
        let search = list::Search::new("Jane");
        let selector = build(PageNumber::new(4), None, search.as_ref());

        assert_eq!(selector.arguments.page(), PageNumber::new(4));
        assert!(selector.arguments.cursor().is_none());
        assert_eq!(selector.filter.search, search);
    }

    #[test]
    fn plain_first_page() {
        let search = list::Search::new("  o'neil ");
        let selector = build(None, None, search.as_ref());

        assert_eq!(selector.arguments, list::Arguments::First);
        assert_eq!(
            selector.filter.search.as_ref().map(AsRef::<str>::as_ref),
            Some("  o'neil "),
        );
    }
}
