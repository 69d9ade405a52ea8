//! Error results that can be returned from the css3 parser
use crate::byte_stream::Location;
use thiserror::Error;

/// The kind of syntax error. Every error aborts the parse, there is no warning level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CssErrorKind {
    /// A bracket, parenthesis, function or block reached the end of input before its closer
    #[error("unclosed block")]
    UnclosedBlock,
    #[error("invalid declaration")]
    InvalidDeclaration,
    #[error("unexpected at-rule")]
    UnexpectedAtRule,
    #[error("invalid @charset rule")]
    InvalidCharsetAtRule,
    #[error("invalid @import rule")]
    InvalidImportAtRule,
    #[error("invalid @namespace rule")]
    InvalidNamespaceAtRule,
    #[error("invalid nested at-rule")]
    InvalidMediaAtRule,
    #[error("unexpected }}")]
    UnexpectedRightCurlyBracket,
    /// A grammar entry point that the current parser scope does not provide
    #[error("unimplemented")]
    Unimplemented,
}

/// Parser error that defines an error (message) on the given position
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}: {message} at {location}")]
pub struct CssError {
    pub kind: CssErrorKind,
    /// Error message
    pub message: String,
    /// Location of the token that triggered the error
    pub location: Location,
}

impl CssError {
    #[must_use]
    pub fn new(kind: CssErrorKind, message: &str, location: Location) -> Self {
        CssError {
            kind,
            message: message.to_string(),
            location,
        }
    }

    /// Byte offset of the offending token in the source
    #[must_use]
    pub fn offset(&self) -> usize {
        self.location.offset
    }
}

pub type CssResult<T> = Result<T, CssError>;
