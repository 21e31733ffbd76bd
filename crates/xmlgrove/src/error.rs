//! Error types for xmlgrove

use std::fmt;
use thiserror::Error;

/// Position in source text, counted in code points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required literal or character class did not match
    UnexpectedCharacter,
    /// End of input before a required closing token
    UnterminatedConstruct,
    /// End-tag name differs from the start-tag name
    NameMismatch { start: String, end: String },
    /// A processing-instruction target used a reserved name
    ReservedNameViolation,
    /// Mixed content missing its trailing `*`, or neither choice nor seq matched
    MalformedContentModel,
    /// None of the recognized declaration forms matched inside the DTD
    UnknownMarkupKeyword,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
            Self::UnterminatedConstruct => write!(f, "unterminated construct"),
            Self::NameMismatch { start, end } => {
                write!(f, "end-tag name {end:?} does not match start-tag name {start:?}")
            }
            Self::ReservedNameViolation => write!(f, "reserved name"),
            Self::MalformedContentModel => write!(f, "malformed content model"),
            Self::UnknownMarkupKeyword => write!(f, "unknown markup keyword"),
        }
    }
}

/// Diagnostic produced by a failed parse.
///
/// Bundles the production context that was active when the failure
/// occurred (`"DOCTYPE"`, `"note tag"`, ...), the scanner position, and
/// the underlying cause message. The first unrecovered failure
/// terminates the parse; there is no aggregation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context: String,
    pos: Pos,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>, pos: Pos) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            context: context.into(),
            pos,
            message,
        }
    }

    pub fn with_message(
        kind: ErrorKind,
        context: impl Into<String>,
        pos: Pos,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            context: context.into(),
            pos,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Label of the production being parsed when the failure occurred
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error while parsing {} at {}: {}",
            self.context, self.pos, self.message
        )
    }
}

/// Result type alias for xmlgrove
pub type Result<T> = std::result::Result<T, Error>;
