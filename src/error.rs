use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cfgtypes::ParamType;

/// Raised while building a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema has no parameters")]
    Empty,

    #[error("parameter `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("schema holds more than {limit} parameters")]
    TooManyParams { limit: usize },

    #[error("parameter name `{name}` is longer than {limit} bytes")]
    NameTooLong { name: String, limit: usize },

    /// Empty, contains whitespace, or starts with the comment marker.
    #[error("`{0}` can never appear as a parameter name")]
    InvalidName(String),
}

/// Fatal to a single parse. No partially filled store escapes alongside one of these.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not open config file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only raised under [`ReadErrorPolicy::Fail`](crate::ReadErrorPolicy::Fail).
    #[error("read error on line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// Only raised under [`ConversionMode::Strict`](crate::ConversionMode::Strict).
    #[error("line {line}: `{value}` is not a valid {expected} for parameter `{name}`")]
    Conversion {
        line: usize,
        name: String,
        value: String,
        expected: ParamType,
    },
}

/// Fatal to a single lookup only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("`{0}` is not a parameter of this schema")]
    UnknownParameter(String),

    #[error("parameter `{name}` is declared {declared}, requested as {requested}")]
    TypeMismatch {
        name: String,
        declared: ParamType,
        requested: ParamType,
    },
}
