//! Convert a line of user input into a set of report identifiers
//!
//! Accepted forms, after trimming and upper-casing:
//! - `Q` to quit
//! - `99` for every report
//! - a comma-separated list of identifiers and inclusive ranges (`1,3,5`, `1-5,9`),
//!   where spaces are ignored
//!
//! Values outside `0..=max` are dropped silently, unless nothing remains.

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::*;
use std::collections::BTreeSet;

use crate::lib::error::Error;

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

pub const QUIT_TOKEN: &str = "Q";
pub const ALL_TOKEN: &str = "99";

#[derive(Parser)]
#[grammar = "lib/select.pest"]
struct SelectionParser;

/// Ascending, deduplicated report identifiers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection(Vec<u8>);

impl Selection {
    /// Sort and deduplicate arbitrary identifiers
    #[cfg(test)]
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self(ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect())
    }

    /// Every identifier in `0..=max`
    pub fn full(max: u8) -> Self {
        Self((0..=max).collect())
    }

    pub fn ids(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Quit,
    All,
    Only(Selection),
}

impl Request {
    /// Reports to produce, `None` when quitting
    pub fn into_selection(self, max: u8) -> Option<Selection> {
        match self {
            Request::Quit => None,
            Request::All => Some(Selection::full(max)),
            Request::Only(sel) => Some(sel),
        }
    }
}

/// Parser for identifiers in `0..=max`
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    max: u8,
}

impl Selector {
    pub fn new(max: u8) -> Self {
        Self { max }
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn parse(&self, input: &str) -> Result<Request, Error> {
        let head = input.trim().to_uppercase();
        if head == QUIT_TOKEN {
            return Ok(Request::Quit);
        }
        if head == ALL_TOKEN {
            return Ok(Request::All);
        }
        let text = without_spaces(&head);
        let items = match SelectionParser::parse(Rule::selection, &text) {
            Ok(mut pairs) => pairs.next().map(|p| p.into_inner()),
            Err(e) => {
                let pos = match e.location {
                    pest::error::InputLocation::Pos(p) => p,
                    pest::error::InputLocation::Span((p, _)) => p,
                };
                return Err(Error::Parse {
                    token: token_at(&text, pos).to_string(),
                });
            }
        };
        let mut chosen = BTreeSet::new();
        for item in items.into_iter().flatten() {
            match item.as_rule() {
                Rule::number => {
                    let n = to_number(&item);
                    if n <= self.max as u64 {
                        chosen.insert(n as u8);
                    }
                }
                Rule::range => {
                    let token = item.as_str().to_string();
                    let mut bounds = item.into_inner().map(|p| to_number(&p));
                    let (start, end) = match (bounds.next(), bounds.next()) {
                        (Some(start), Some(end)) => (start, end),
                        _ => return Err(Error::Parse { token }),
                    };
                    if start > end {
                        return Err(Error::Parse { token });
                    }
                    // only the part inside 0..=max matters
                    let end = end.min(self.max as u64);
                    if start <= end {
                        chosen.extend((start as u8)..=(end as u8));
                    }
                }
                _ => {}
            }
        }
        if chosen.is_empty() {
            return Err(Error::InvalidSelection { max: self.max });
        }
        let sel = Selection(chosen.into_iter().collect());
        log::debug!("parsed {:?} into {:?}", input, sel.ids());
        Ok(Request::Only(sel))
    }
}

fn without_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// digits only, so the sole failure is overflow, which is out of range anyway
fn to_number(pair: &Pair) -> u64 {
    pair.as_str().parse::<u64>().unwrap_or(u64::MAX)
}

/// Comma-separated token of `text` that contains byte offset `pos`
fn token_at(text: &str, pos: usize) -> &str {
    let mut start = 0;
    for token in text.split(',') {
        let end = start + token.len();
        if pos <= end {
            return token;
        }
        start = end + 1;
    }
    text.rsplit(',').next().unwrap_or(text)
}

#[cfg(test)]
mod test {
    use super::*;

    const MAX: u8 = 12;

    macro_rules! only {
        ( $input:expr => [ $( $id:expr ),* ] ) => {
            assert_eq!(
                Selector::new(MAX).parse($input).unwrap(),
                Request::Only(Selection(vec![ $( $id ),* ])),
            );
        };
    }

    macro_rules! bad_token {
        ( $input:expr => $token:expr ) => {
            match Selector::new(MAX).parse($input) {
                Err(Error::Parse { token }) => assert_eq!(token, $token),
                other => panic!("expected parse error on {:?}, got {:?}", $input, other),
            }
        };
    }

    macro_rules! out_of_range {
        ( $input:expr ) => {
            assert!(matches!(
                Selector::new(MAX).parse($input),
                Err(Error::InvalidSelection { max: MAX })
            ));
        };
    }

    #[test]
    fn lists_and_ranges() {
        only!("1,3,5" => [1, 3, 5]);
        only!("1-12" => [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        only!("1-5,3-7" => [1, 2, 3, 4, 5, 6, 7]);
        only!("5,1,3,1" => [1, 3, 5]);
        only!(" 0 , 2 - 4 " => [0, 2, 3, 4]);
        only!("7-7" => [7]);
    }

    #[test]
    fn sentinels() {
        let sel = Selector::new(MAX);
        assert_eq!(sel.parse("q").unwrap(), Request::Quit);
        assert_eq!(sel.parse("  Q ").unwrap(), Request::Quit);
        assert_eq!(sel.parse("99").unwrap(), Request::All);
        assert_eq!(
            sel.parse("99").unwrap().into_selection(MAX),
            Some(Selection::full(MAX))
        );
        assert_eq!(Selection::full(MAX).ids(), &(0..=12).collect::<Vec<u8>>()[..]);
        assert_eq!(Request::Quit.into_selection(MAX), None);
    }

    #[test]
    fn malformed() {
        bad_token!("5-2" => "5-2");
        bad_token!("abc" => "ABC");
        bad_token!("1,x,3" => "X");
        bad_token!("1,,3" => "");
        bad_token!("1," => "");
        bad_token!("" => "");
        bad_token!("1-" => "1-");
        bad_token!("-3" => "-3");
        bad_token!("1-2-3" => "1-2-3");
        bad_token!("2,4a" => "4A");
    }

    #[test]
    fn out_of_bounds() {
        out_of_range!("13");
        out_of_range!("13-20");
        out_of_range!("100000000000000000000000");
        only!("0,13" => [0]);
        only!("10-400" => [10, 11, 12]);
        only!("99,1" => [1]);
        // the all token is matched before spaces are removed
        out_of_range!("9 9");
        out_of_range!(" 9 9 ");
        only!("9 9,1" => [1]);
    }

    #[test]
    fn sentinels_are_whole_input() {
        let sel = Selector::new(MAX);
        assert_eq!(sel.parse(" 99\n").unwrap(), Request::All);
        assert_eq!(sel.parse("q\r\n").unwrap(), Request::Quit);
        bad_token!("Q Q" => "QQ");
    }

    #[test]
    fn selection_normalizes() {
        assert_eq!(Selection::new(vec![3, 1, 3]).ids(), &[1, 3]);
        assert!(Selection::default().ids().is_empty());
    }

    #[test]
    fn token_lookup() {
        assert_eq!(token_at("1,AB,3", 3), "AB");
        assert_eq!(token_at("1,AB,3", 0), "1");
        assert_eq!(token_at("1,AB,3", 6), "3");
    }
}
