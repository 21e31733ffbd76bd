//! xmlgrove - recursive-descent XML 1.0 parser with DTD support
//!
//! Parses a complete XML document, including an internal DTD subset,
//! into a syntax tree that mirrors the grammar productions it came
//! from. References and entities are preserved as written, never
//! expanded, and no validation is performed against the DTD.
//!
//! # Quick Start
//!
//! ```
//! use xmlgrove::from_str;
//! # fn main() -> Result<(), xmlgrove::Error> {
//! let doc = from_str(r#"<?xml version="1.0"?><note lang="en">hi</note>"#)?;
//! assert_eq!(doc.root.name, "note");
//! assert_eq!(doc.root.attributes[0].name, "lang");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod chars;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod input;
pub use input::Input;

pub mod scanner;
pub use scanner::{Checkpoint, Scanner};

pub mod tree;
pub use tree::{Content, Document, Element};

pub mod parser;
pub use parser::{Config, Parser};

/// Parse an XML document from a string
pub fn from_str(s: &str) -> Result<Document> {
    Parser::new(s).parse()
}

/// Parse an XML document with an explicit configuration
pub fn from_str_with_config(s: &str, config: Config) -> Result<Document> {
    Parser::with_config(s, config).parse()
}

/// Parse an XML document from an [`Input`] source
pub fn from_input(input: Input<'_>, config: Config) -> Result<Document> {
    Parser::with_config(input.text(), config).parse()
}
