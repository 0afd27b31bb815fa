use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::Error;

/// The closed set of types a stored value can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
}

impl Kind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "int" | "integer" => Ok(Self::Int),
            _ => Err(Error::UnsupportedType { name: s.to_owned() }),
        }
    }
}

/// A stored value after coercion into the requested [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Int(i32),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::Int(_) => Kind::Int,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => s.fmt(f),
            Self::Int(i) => i.fmt(f),
        }
    }
}

/// Types that [`Ini::get_as`](crate::Ini::get_as) can return.
///
/// Only `String` and `i32` implement this trait, and it cannot be implemented outside this
/// crate.
pub trait FromValue: Sized + private::Sealed {
    /// Converts the raw stored text. Called on every lookup; nothing is cached.
    fn from_raw(raw: &str) -> Result<Self, ParseIntError>;
}

impl FromValue for String {
    fn from_raw(raw: &str) -> Result<Self, ParseIntError> {
        Ok(raw.to_owned())
    }
}

impl FromValue for i32 {
    fn from_raw(raw: &str) -> Result<Self, ParseIntError> {
        raw.parse()
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i32 {}
}
