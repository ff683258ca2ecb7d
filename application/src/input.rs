//! [`Input`] line commands.

use std::str::FromStr;

use common::PageNumber;
use derive_more::{Display, Error};
use service::{
    domain::{customer, item, product},
    read::order::list,
};

/// Line command typed by a user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// `page <N>`: jumps to the numbered page.
    Page(PageNumber),

    /// `next`: navigates to the next page.
    Next,

    /// `prev`: navigates to the previous page.
    Prev,

    /// `search [text]`: types a search term, clearing it if empty.
    Search(Option<list::Search>),

    /// `new <customer>`: opens a form of a new order.
    New(customer::Id),

    /// `add <product> <qty>`: adds a product to the new order form.
    Add(product::Id, item::Quantity),

    /// `edit <row>`: opens a form of the order at the row.
    Edit(u64),

    /// `set <product> <qty>`: sets a product quantity in the open form.
    Set(product::Id, item::Quantity),

    /// `save`: submits the open form.
    Save,

    /// `cancel`: closes the open form without submitting it.
    Cancel,

    /// `items <row>`: shows items of the order at the row.
    Items(u64),

    /// `show`: shows the displayed page again.
    Show,

    /// `help`: shows the available commands.
    Help,

    /// `quit`: exits.
    Quit,
}

impl Input {
    /// Parses the provided `line` into an [`Input`].
    ///
    /// Returns [`None`] for blank lines.
    ///
    /// # Errors
    ///
    /// If the `line` is not a valid command.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));

        if cmd == "search" {
            return Ok(Some(Self::Search(list::Search::new(rest))));
        }

        let mut args = Args(rest.split_whitespace());
        let input = match cmd {
            "page" => Self::Page(args.next_page()?),
            "next" => Self::Next,
            "prev" => Self::Prev,
            "new" => Self::New(args.next_parsed("customer")?),
            "add" => Self::Add(
                args.next_parsed("product")?,
                args.next_quantity()?,
            ),
            "edit" => Self::Edit(args.next_parsed("row")?),
            "set" => Self::Set(
                args.next_parsed("product")?,
                args.next_quantity()?,
            ),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "items" => Self::Items(args.next_parsed("row")?),
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(ParseError::UnknownCommand(cmd.to_owned())),
        };
        args.finish()?;
        Ok(Some(input))
    }
}

/// Whitespace-separated arguments of an [`Input`].
struct Args<'a>(std::str::SplitWhitespace<'a>);

impl Args<'_> {
    /// Parses the next argument with the provided `name`.
    fn next_parsed<T: FromStr>(
        &mut self,
        name: &'static str,
    ) -> Result<T, ParseError> {
        let value = self.0.next().ok_or(ParseError::MissingArgument(name))?;
        value.parse().map_err(|_| ParseError::InvalidArgument {
            name,
            value: value.to_owned(),
        })
    }

    /// Parses the next argument as a [`PageNumber`].
    fn next_page(&mut self) -> Result<PageNumber, ParseError> {
        let num: u32 = self.next_parsed("page")?;
        PageNumber::new(num).ok_or(ParseError::InvalidArgument {
            name: "page",
            value: num.to_string(),
        })
    }

    /// Parses the next argument as an [`item::Quantity`].
    fn next_quantity(&mut self) -> Result<item::Quantity, ParseError> {
        self.next_parsed::<u32>("qty").map(item::Quantity::from)
    }

    /// Ensures no arguments are left.
    fn finish(mut self) -> Result<(), ParseError> {
        match self.0.next() {
            Some(arg) => Err(ParseError::UnexpectedArgument(arg.to_owned())),
            None => Ok(()),
        }
    }
}

/// Error of parsing an [`Input`].
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Command is not known.
    #[display("unknown command `{_0}`, type `help` for the list")]
    UnknownCommand(#[error(not(source))] String),

    /// Required argument is missing.
    #[display("missing `<{_0}>` argument")]
    MissingArgument(#[error(not(source))] &'static str),

    /// Argument has invalid value.
    #[display("invalid `<{name}>` argument: `{value}`")]
    InvalidArgument {
        /// Name of the argument.
        name: &'static str,

        /// Provided value of the argument.
        value: String,
    },

    /// Argument is not expected.
    #[display("unexpected argument `{_0}`")]
    UnexpectedArgument(#[error(not(source))] String),
}

#[cfg(test)]
mod spec {
    use common::PageNumber;
    use service::{
        domain::{item, product},
        read::order::list,
    };

    use super::{Input, ParseError};

    #[test]
    fn parses_navigation() {
        assert_eq!(
            Input::parse("page 3\n"),
            Ok(Some(Input::Page(PageNumber::new(3).unwrap()))),
        );
        assert_eq!(Input::parse("  next"), Ok(Some(Input::Next)));
        assert_eq!(Input::parse("prev\r\n"), Ok(Some(Input::Prev)));
        assert_eq!(Input::parse("   \n"), Ok(None));
    }

    #[test]
    fn keeps_search_verbatim() {
        assert_eq!(
            Input::parse("search  Jane O'Neil \n"),
            Ok(Some(Input::Search(list::Search::new(" Jane O'Neil ")))),
        );
        assert_eq!(Input::parse("search"), Ok(Some(Input::Search(None))));
        assert_eq!(Input::parse("search "), Ok(Some(Input::Search(None))));
    }

    #[test]
    fn parses_form_commands() {
        let id = "6a0f4b46-2f38-4b69-9d59-3f5e3c1a7f10";

        assert_eq!(
            Input::parse(&format!("set {id} 4")),
            Ok(Some(Input::Set(
                id.parse::<product::Id>().unwrap(),
                item::Quantity::from(4),
            ))),
        );
        assert_eq!(Input::parse("edit 21"), Ok(Some(Input::Edit(21))));
        assert_eq!(Input::parse("save"), Ok(Some(Input::Save)));
    }

    #[test]
    fn rejects_invalid_lines() {
        assert_eq!(
            Input::parse("page 0"),
            Err(ParseError::InvalidArgument {
                name: "page",
                value: "0".to_owned(),
            }),
        );
        assert_eq!(
            Input::parse("page"),
            Err(ParseError::MissingArgument("page")),
        );
        assert_eq!(
            Input::parse("next 2"),
            Err(ParseError::UnexpectedArgument("2".to_owned())),
        );
        assert_eq!(
            Input::parse("add nope 1"),
            Err(ParseError::InvalidArgument {
                name: "product",
                value: "nope".to_owned(),
            }),
        );
        assert_eq!(
            Input::parse("jump"),
            Err(ParseError::UnknownCommand("jump".to_owned())),
        );
    }
}
