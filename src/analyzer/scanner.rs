//! Character-level scanner for `<marker> = [ "literal", ... ]` assignments
//! embedded in Python scripts such as `setup.py`.
//!
//! Only literal lists of literal strings are understood. Anything else inside
//! the list (names, calls, f-string prefixes, nested groups) marks the result
//! as partial instead of failing the whole scan.

use std::collections::BTreeSet;

use super::specifier;

/// Result of looking for one list assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScan {
    /// The marker does not occur in the text.
    Absent,
    /// The marker is not assigned a list literal.
    NotLiteral,
    /// The list is opened but never closed.
    Unterminated,
    /// The list was read to its closing bracket.
    Parsed {
        names: BTreeSet<String>,
        /// At least one element could not be understood.
        partial: bool,
    },
}

#[derive(Debug, Clone, Copy)]
enum State {
    SeekingEquals,
    SeekingOpenBracket,
    BetweenElements,
    InString { quote: u8, start: usize, escaped: bool },
    InComment,
}

/// Scan `text` for the first `marker`, then the list literal assigned to it.
pub fn scan_literal_list(text: &str, marker: &str) -> ListScan {
    let Some(found) = text.find(marker) else {
        return ListScan::Absent;
    };

    let mut state = State::SeekingEquals;
    let mut names = BTreeSet::new();
    let mut partial = false;
    let mut in_group = false;

    for (i, &b) in text.as_bytes().iter().enumerate().skip(found + marker.len()) {
        state = match state {
            State::SeekingEquals => {
                if b == b'=' {
                    State::SeekingOpenBracket
                } else {
                    State::SeekingEquals
                }
            }
            State::SeekingOpenBracket => match b {
                b' ' | b'\t' | b'\n' | b'\r' => State::SeekingOpenBracket,
                b'[' => State::BetweenElements,
                _ => return ListScan::NotLiteral,
            },
            State::BetweenElements => match b {
                b' ' | b'\t' | b'\n' | b'\r' | b',' => State::BetweenElements,
                b'#' => State::InComment,
                b'\'' | b'"' => State::InString {
                    quote: b,
                    start: i + 1,
                    escaped: false,
                },
                b'[' => {
                    in_group = true;
                    partial = true;
                    State::BetweenElements
                }
                b']' if in_group => {
                    in_group = false;
                    State::BetweenElements
                }
                b']' => return ListScan::Parsed { names, partial },
                _ => {
                    partial = true;
                    State::BetweenElements
                }
            },
            State::InString {
                quote,
                start,
                escaped,
            } => {
                if b == b'\\' {
                    State::InString {
                        quote,
                        start,
                        escaped: !escaped,
                    }
                } else if b == quote && !escaped {
                    // Quotes are ASCII, so both ends are char boundaries.
                    match specifier::parse_name(&text[start..i]) {
                        Some(name) => {
                            names.insert(name.to_string());
                        }
                        None => partial = true,
                    }
                    State::BetweenElements
                } else {
                    State::InString {
                        quote,
                        start,
                        escaped: false,
                    }
                }
            }
            State::InComment => {
                if b == b'\n' {
                    State::BetweenElements
                } else {
                    State::InComment
                }
            }
        };
    }

    match state {
        State::SeekingEquals | State::SeekingOpenBracket => ListScan::NotLiteral,
        _ => ListScan::Unterminated,
    }
}
