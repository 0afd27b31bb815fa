#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod parser;
mod section;
mod value;

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

pub use crate::error::{Error, ErrorKind, Result};
use crate::parser::Parser;
pub use crate::section::{Iter, Section};
pub use crate::value::{FromValue, Kind, Value};

/// Byte Order Mark (BOM) some editors put at the start of UTF-8 files. Left in place, it
/// would hide a section header on the first line.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A parsed INI document: section names mapped to their tables of raw values.
///
/// Built once by [`Ini::load`], [`Ini::from_reader`] or [`Ini::parse`] and read-only after
/// that. Values are stored untyped and coerced on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: BTreeMap<String, Section>,
}

impl Ini {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read. Malformed lines never
    /// cause an error; they are skipped.
    ///
    /// The contents are decoded as UTF-8. Byte sequences that are not valid UTF-8, such as
    /// text saved as Windows-1251 or Latin-1, are replaced with U+FFFD and the original
    /// bytes are lost.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let buffer = fs::read(path).inspect_err(|error| {
            debug!(path = %path.display(), %error, "failed to read configuration");
        })?;
        let ini = Self::from_bytes(&buffer);
        debug!(path = %path.display(), sections = ini.len(), "loaded configuration");

        Ok(ini)
    }

    /// Reads `reader` to the end and parses its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    ///
    /// Decoding is lossy in the same way as [`Ini::load`].
    pub fn from_reader<R>(reader: &mut R) -> Result<Self>
    where
        R: Read + ?Sized,
    {
        let mut buffer = Vec::with_capacity(4096);
        reader.read_to_end(&mut buffer)?;

        Ok(Self::from_bytes(&buffer))
    }

    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            sections: Parser::new(text).into_sections(),
        }
    }

    fn from_bytes(buffer: &[u8]) -> Self {
        let buffer = buffer.strip_prefix(BOM_UTF8).unwrap_or(buffer);
        Self::parse(&String::from_utf8_lossy(buffer))
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Iterates over the sections ordered by name.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up the stored text of `key` in `section` without any coercion.
    ///
    /// # Errors
    ///
    /// [`Error::SectionNotFound`] if `section` does not exist, [`Error::KeyNotFound`] if it
    /// exists but does not contain `key`.
    pub fn raw(&self, section: &str, key: &str) -> Result<&str> {
        self.sections
            .get(section)
            .ok_or_else(|| Error::SectionNotFound {
                section: section.to_owned(),
            })?
            .get(key)
            .ok_or_else(|| Error::KeyNotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    /// Looks up `key` in `section` and coerces it into `kind`.
    ///
    /// # Errors
    ///
    /// Fails like [`Ini::raw`], and with [`Error::ValueFormat`] if an integer was requested
    /// but the stored text is not a base-10 `i32`.
    pub fn get(&self, section: &str, key: &str, kind: Kind) -> Result<Value> {
        Ok(match kind {
            Kind::String => Value::String(self.get_as(section, key)?),
            Kind::Int => Value::Int(self.get_as(section, key)?),
        })
    }

    /// Typed variant of [`Ini::get`]; `T` is either `String` or `i32`.
    ///
    /// # Errors
    ///
    /// Same as [`Ini::get`].
    pub fn get_as<T>(&self, section: &str, key: &str) -> Result<T>
    where
        T: FromValue,
    {
        let raw = self.raw(section, key)?;

        T::from_raw(raw).map_err(|source| Error::ValueFormat {
            section: section.to_owned(),
            key: key.to_owned(),
            value: raw.to_owned(),
            source,
        })
    }

    /// # Errors
    ///
    /// Same as [`Ini::raw`].
    pub fn get_string(&self, section: &str, key: &str) -> Result<String> {
        self.get_as(section, key)
    }

    /// # Errors
    ///
    /// Same as [`Ini::get`].
    pub fn get_int(&self, section: &str, key: &str) -> Result<i32> {
        self.get_as(section, key)
    }
}

impl FromStr for Ini {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
[Section1]
MyIntVariable = 42
MyStringVariable = hello world
# a comment
[Section2]
AnotherIntVariable=7
";

    #[test]
    fn end_to_end_example() {
        let ini = Ini::parse(EXAMPLE);

        assert_eq!(ini.get_int("Section1", "MyIntVariable").ok(), Some(42));
        assert_eq!(
            ini.get_string("Section1", "MyStringVariable").ok(),
            Some("helloworld".to_owned())
        );
        assert_eq!(ini.get_int("Section2", "AnotherIntVariable").ok(), Some(7));
    }

    #[test]
    fn tagged_lookup() {
        let ini = Ini::parse(EXAMPLE);

        assert_eq!(
            ini.get("Section1", "MyIntVariable", Kind::Int).ok(),
            Some(Value::Int(42))
        );
        assert_eq!(
            ini.get("Section1", "MyIntVariable", Kind::String).ok(),
            Some(Value::String("42".to_owned()))
        );
    }

    #[test]
    fn last_assignment_wins() {
        let ini = Ini::parse("[S]\na=1\na=2\n");

        assert_eq!(ini.get_string("S", "a").ok(), Some("2".to_owned()));
    }

    #[test]
    fn value_keeps_extra_equal_signs() {
        let ini = Ini::parse("[S]\nexpr = 1 + 1 = 2\n");

        assert_eq!(ini.raw("S", "expr").ok(), Some("1+1=2"));
    }

    #[test]
    fn missing_section_and_key_are_distinct() {
        let ini = Ini::parse("[S]\na=1\n");

        let section = ini.get_string("T", "a").expect_err("section T does not exist");
        assert_eq!(section.kind(), ErrorKind::SectionNotFound);

        let key = ini.get_string("S", "b").expect_err("key b does not exist");
        assert_eq!(key.kind(), ErrorKind::KeyNotFound);
        assert!(matches!(
            key,
            Error::KeyNotFound { ref section, ref key } if section == "S" && key == "b"
        ));
    }

    #[test]
    fn non_numeric_value_is_a_format_error() {
        let ini = Ini::parse("[S]\nx=abc\nempty=\n");

        let error = ini.get_int("S", "x").expect_err("\"abc\" is not an integer");
        assert_eq!(error.kind(), ErrorKind::ValueFormat);

        let error = ini
            .get("S", "empty", Kind::Int)
            .expect_err("an empty value is not an integer");
        assert!(matches!(error, Error::ValueFormat { ref value, .. } if value.is_empty()));

        // The same key still reads fine as a string.
        assert_eq!(ini.get_string("S", "x").ok(), Some("abc".to_owned()));
    }

    #[test]
    fn orphan_key_is_never_retrievable() {
        let ini = Ini::parse("orphan=1\n[S]\na=1\n");

        assert!(ini.sections().all(|section| !section.contains_key("orphan")));
        assert_eq!(ini.len(), 1);
    }

    #[test]
    fn comment_lines_are_skipped() {
        let ini = Ini::parse("[S]\n   # key = value\n#[T]\nk=v\n");

        assert_eq!(ini.section("S").map(Section::len), Some(1));
        assert!(!ini.contains_section("T"));
        assert_eq!(
            ini.raw("S", "key").map_err(|e| e.kind()),
            Err(ErrorKind::KeyNotFound)
        );
    }

    #[test]
    fn header_without_keys_is_section_not_found() {
        let ini = Ini::parse("[Empty]\n[S]\nk=v\n");

        assert_eq!(ini.len(), 1);
        assert_eq!(
            ini.get_string("Empty", "k").map_err(|e| e.kind()),
            Err(ErrorKind::SectionNotFound)
        );
    }

    #[test]
    fn from_reader_strips_utf8_bom() {
        let mut data: &[u8] = b"\xEF\xBB\xBF[S]\nk=v\n";
        let ini = Ini::from_reader(&mut data).expect("reading from a slice cannot fail");

        assert_eq!(ini.raw("S", "k").ok(), Some("v"));
    }

    #[test]
    fn default_store_is_empty() {
        let ini = Ini::default();

        assert!(ini.is_empty());
        assert_eq!(
            ini.get_string("S", "k").map_err(|e| e.kind()),
            Err(ErrorKind::SectionNotFound)
        );
    }
}
