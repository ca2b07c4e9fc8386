//! Error types for record extraction and corpus queries.

use thiserror::Error;

/// Result alias used by the extraction core and the aggregate strategies.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An expected `key:` token is absent from the current scan window.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A numeric or boolean literal failed to convert.
    #[error("malformed value for `{field}`: {value:?}")]
    MalformedValue { field: &'static str, value: String },

    /// The media URL could not be rebuilt from its raw token.
    #[error("malformed media url {raw:?}: {source}")]
    MalformedUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    /// A caller-supplied argument is out of range (e.g. a negative top-K limit).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Extraction failure tagged with its 1-based input line.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Strip any `Line` wrapping and return the underlying extraction error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Line { source, .. } => source.root(),
            other => other,
        }
    }
}
