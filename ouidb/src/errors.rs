use failure::Fail;
use std::io;

/// Failure to turn text into a hardware address.
///
/// Each variant carries the text that was rejected so callers can surface it
/// back to whoever typed it.
#[derive(Clone, Debug, PartialEq, Eq, Fail)]
pub enum ParseError {
    #[fail(display = "address too short: {:?}", _0)]
    TooShort(String),

    #[fail(display = "invalid address syntax: {:?}", _0)]
    InvalidSyntax(String),

    #[fail(display = "mismatched group separator in address: {:?}", _0)]
    BadSeparator(String),

    #[fail(display = "invalid hex group in address: {:?}", _0)]
    InvalidHex(String),

    #[fail(display = "invalid byte count {} for address: {:?}", len, input)]
    InvalidLength { input: String, len: usize },
}

/// Failure to build an [`OuiDb`](crate::OuiDb). Any of these aborts the whole
/// load; no partial database is handed back.
#[derive(Debug, Fail)]
pub enum LoadError {
    #[fail(display = "unable to read vendor list: {}", _0)]
    Io(#[cause] io::Error),

    #[fail(display = "line {}: missing organization field", line)]
    MissingOrganization { line: usize },

    #[fail(display = "line {}: {}", line, cause)]
    InvalidPattern {
        line: usize,
        #[cause]
        cause: ParseError,
    },

    #[fail(display = "line {}: invalid prefix length {:?}", line, text)]
    InvalidPrefixLength { line: usize, text: String },
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}
