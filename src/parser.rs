use std::collections::BTreeMap;
use std::str::Lines;

use tracing::trace;

use crate::section::Section;

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Lines<'a>,
    line_number: usize,
    current: Option<String>,
}

/// What a single line means once all whitespace has been removed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Section(&'a str),
    Assignment { key: &'a str, value: &'a str },
    Unrecognized,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_number: 0,
            current: None,
        }
    }
}

impl Parser<'_> {
    /// Consumes every remaining line and returns the sections they describe.
    ///
    /// Malformed lines are dropped; parsing itself cannot fail.
    pub fn into_sections(mut self) -> BTreeMap<String, Section> {
        let mut sections = BTreeMap::<String, Section>::new();

        for raw in self.lines.by_ref() {
            self.line_number += 1;
            let line = strip_whitespace(raw);

            match classify(&line) {
                Line::Blank | Line::Comment => {}
                Line::Section(name) => {
                    trace!(line = self.line_number, section = name, "entering section");
                    self.current = Some(name.to_owned());
                }
                Line::Assignment { key, value } => match self.current.as_deref() {
                    // A section only exists once it holds a key; repeated headers resume the
                    // existing table instead of clearing it.
                    Some(current) => {
                        sections
                            .entry(current.to_owned())
                            .or_insert_with(|| Section::new(current.to_owned()))
                            .insert(key.to_owned(), value.to_owned());
                    }
                    None => {
                        trace!(
                            line = self.line_number,
                            key,
                            "discarding key outside of any section"
                        );
                    }
                },
                Line::Unrecognized => {
                    trace!(line = self.line_number, "discarding line without '='");
                }
            }
        }

        sections
    }
}

/// Removes every whitespace character, not only the surrounding ones: `"my key = a b"`
/// becomes `"mykey=ab"`.
///
/// Whitespace is the single-byte set `' '`, `\t`, `\n`, `\v`, `\f` and `\r`; anything
/// outside ASCII is kept as-is.
fn strip_whitespace(line: &str) -> String {
    line.chars()
        .filter(|&c| !(c.is_ascii_whitespace() || c == '\x0b'))
        .collect()
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if line.starts_with('#') {
        return Line::Comment;
    }

    if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Line::Section(name);
    }

    match line.split_once('=') {
        Some((key, value)) => Line::Assignment { key, value },
        None => Line::Unrecognized,
    }
}
