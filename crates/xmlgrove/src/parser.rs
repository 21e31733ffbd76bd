//! Recursive-descent parser for the XML 1.0 grammar
//!
//! One parsing operation per grammar production, driven by the
//! code-point [`Scanner`]. Productions with several alternatives are
//! resolved by ordered trial: a checkpoint is taken, the first
//! alternative is attempted, and on failure the cursor is rewound
//! before the next alternative runs. Every operation leaves the cursor
//! at its entry position when it fails, so callers never observe a
//! half-consumed construct.

pub mod content;
pub mod dtd;

use std::borrow::Cow;

use crate::chars;
use crate::error::{Error, ErrorKind, Result};
use crate::scanner::Scanner;
use crate::tree::{Document, Misc, XmlDecl};

/// Reserved literal keywords of the grammar, consulted by name
pub(crate) mod keyword {
    pub const EMPTY: &str = "EMPTY";
    pub const ANY: &str = "ANY";
    pub const PCDATA: &str = "#PCDATA";
    pub const SYSTEM: &str = "SYSTEM";
    pub const PUBLIC: &str = "PUBLIC";
    pub const NDATA: &str = "NDATA";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const REQUIRED: &str = "#REQUIRED";
    pub const IMPLIED: &str = "#IMPLIED";
    pub const FIXED: &str = "#FIXED";
    pub const CDATA: &str = "CDATA";
    pub const ID: &str = "ID";
    pub const IDREF: &str = "IDREF";
    pub const IDREFS: &str = "IDREFS";
    pub const ENTITY: &str = "ENTITY";
    pub const ENTITIES: &str = "ENTITIES";
    pub const NMTOKEN: &str = "NMTOKEN";
    pub const NMTOKENS: &str = "NMTOKENS";
    pub const NOTATION: &str = "NOTATION";
}

/// Parsing policy knobs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Keep element text runs that consist only of whitespace.
    ///
    /// By default such runs are discarded, which diverges from a
    /// literal infoset but suits consumers uninterested in
    /// insignificant whitespace between markup. Non-whitespace text is
    /// always preserved either way.
    pub preserve_whitespace: bool,
}

impl Config {
    pub const fn new(preserve_whitespace: bool) -> Self {
        Self {
            preserve_whitespace,
        }
    }
}

/// XML document parser
#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
    config: Config,
    /// Stack of production-context labels for diagnostics
    context: Vec<Cow<'static, str>>,
}

impl Parser {
    /// Create a parser over already-decoded text
    pub fn new(input: &str) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a parser with a custom configuration
    pub fn with_config(input: &str, config: Config) -> Self {
        Self {
            scanner: Scanner::new(input),
            config,
            context: Vec::new(),
        }
    }

    /// Create a parser over a code-point sequence
    pub fn from_code_points(source: Vec<char>, config: Config) -> Self {
        Self {
            scanner: Scanner::from_code_points(source),
            config,
            context: Vec::new(),
        }
    }

    /// Parse a complete document and require all input to be consumed
    pub fn parse(&mut self) -> Result<Document> {
        let document = self.parse_document()?;
        if !self.scanner.at_end() {
            return Err(self.error_msg(ErrorKind::UnexpectedCharacter, "expected end of input"));
        }
        Ok(document)
    }

    // - Document

    // document ::= prolog element Misc*
    pub(crate) fn parse_document(&mut self) -> Result<Document> {
        let prolog = self.parse_prolog()?;
        let root = self.parse_element()?;
        let misc = self.parse_misc_list();
        Ok(Document { prolog, root, misc })
    }

    // prolog ::= XMLDecl? Misc* (doctypedecl Misc*)?
    pub(crate) fn parse_prolog(&mut self) -> Result<crate::tree::Prolog> {
        let mut prolog = crate::tree::Prolog::default();

        self.skip_space();

        // commit to the XML declaration only when "<?xml" is followed
        // by the whitespace VersionInfo requires; a PI target that
        // merely starts with "xml", like xml-stylesheet, stays a Misc
        if self.scanner.matches_literal("<?xml")
            && self.scanner.peek_at(5).is_some_and(chars::is_space)
        {
            prolog.xml_decl = Some(self.parse_xml_decl()?);
        }

        prolog.misc_before = self.parse_misc_list();

        if self.scanner.matches_literal("<!DOCTYPE") {
            prolog.doctype = Some(self.parse_doctype()?);
            prolog.misc_after = self.parse_misc_list();
        }

        Ok(prolog)
    }

    // XMLDecl ::= '<?xml' VersionInfo EncodingDecl? SDDecl? S? '?>'
    pub(crate) fn parse_xml_decl(&mut self) -> Result<XmlDecl> {
        self.in_context("XML declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<?xml")?;

                let mut decl = XmlDecl {
                    version: p.parse_version()?,
                    ..XmlDecl::default()
                };

                // the encoding and standalone declarations are each
                // optional; peek past the whitespace, then rewind so
                // their productions see their leading space again
                let cp = p.scanner.checkpoint();
                p.skip_space();
                if p.scanner.matches_literal("encoding") {
                    p.scanner.rewind(cp);
                    decl.encoding = Some(p.parse_encoding()?);
                } else {
                    p.scanner.rewind(cp);
                }

                let cp = p.scanner.checkpoint();
                p.skip_space();
                if p.scanner.matches_literal("standalone") {
                    p.scanner.rewind(cp);
                    decl.standalone = Some(p.parse_standalone()?);
                } else {
                    p.scanner.rewind(cp);
                }

                p.skip_space();
                p.must_literal("?>")?;

                Ok(decl)
            })
        })
    }

    // VersionInfo ::= S 'version' Eq (' VersionNum ' | " VersionNum ")
    pub(crate) fn parse_version(&mut self) -> Result<String> {
        self.attempt(|p| {
            p.require_space()?;
            p.must_literal("version")?;
            p.parse_eq()?;
            let quote = p.parse_quote()?;
            let version = p.parse_version_num()?;
            p.must_char(quote)?;
            Ok(version)
        })
    }

    // Eq ::= S? '=' S?
    pub(crate) fn parse_eq(&mut self) -> Result<()> {
        self.attempt(|p| {
            p.skip_space();
            p.must_char('=')?;
            p.skip_space();
            Ok(())
        })
    }

    // VersionNum ::= ([a-zA-Z0-9_.:] | '-')+
    pub(crate) fn parse_version_num(&mut self) -> Result<String> {
        fn is_version_char(c: char) -> bool {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')
        }

        self.attempt(|p| {
            let mut version = String::new();
            while let Some(c) = p.scanner.peek() {
                if !is_version_char(c) {
                    break;
                }
                version.push(c);
                p.scanner.advance();
            }
            if version.is_empty() {
                return Err(p.error_msg(
                    ErrorKind::UnexpectedCharacter,
                    "expected version number character",
                ));
            }
            Ok(version)
        })
    }

    // Misc ::= Comment | PI | S
    //
    // Returns None for a whitespace run, which is discarded.
    pub(crate) fn parse_misc(&mut self) -> Result<Option<Misc>> {
        self.attempt(|p| {
            if p.scanner.matches_literal("<!--") {
                Ok(Some(Misc::Comment(p.parse_comment()?)))
            } else if p.scanner.matches_literal("<?") {
                Ok(Some(Misc::Pi(p.parse_pi()?)))
            } else if p.scanner.peek().is_some_and(chars::is_space) {
                p.skip_space();
                Ok(None)
            } else {
                Err(p.error_msg(ErrorKind::UnexpectedCharacter, "unknown misc type"))
            }
        })
    }

    /// Repeated Misc; stops (without error) at the first construct that
    /// is neither comment, PI, nor whitespace
    pub(crate) fn parse_misc_list(&mut self) -> Vec<Misc> {
        let mut items = Vec::new();
        loop {
            match self.parse_misc() {
                Ok(Some(misc)) => items.push(misc),
                Ok(None) => {}
                Err(_) => break,
            }
        }
        items
    }

    // SDDecl ::= S 'standalone' Eq (("'" ('yes' | 'no') "'") | ('"' ('yes' | 'no') '"'))
    pub(crate) fn parse_standalone(&mut self) -> Result<bool> {
        self.attempt(|p| {
            p.require_space()?;
            p.must_literal("standalone")?;
            p.parse_eq()?;
            let quote = p.parse_quote()?;
            let standalone = if p.scanner.consume_literal(keyword::YES) {
                true
            } else if p.scanner.consume_literal(keyword::NO) {
                false
            } else {
                return Err(p.error_msg(ErrorKind::UnexpectedCharacter, "expected 'yes' or 'no'"));
            };
            p.must_char(quote)?;
            Ok(standalone)
        })
    }

    // EncodingDecl ::= S 'encoding' Eq ('"' EncName '"' | "'" EncName "'")
    pub(crate) fn parse_encoding(&mut self) -> Result<String> {
        self.attempt(|p| {
            p.require_space()?;
            p.must_literal("encoding")?;
            p.parse_eq()?;
            let quote = p.parse_quote()?;
            let name = p.parse_enc_name()?;
            p.must_char(quote)?;
            Ok(name)
        })
    }

    // EncName ::= [A-Za-z] ([A-Za-z0-9._] | '-')*
    pub(crate) fn parse_enc_name(&mut self) -> Result<String> {
        self.attempt(|p| {
            let Some(first) = p.scanner.peek().filter(char::is_ascii_alphabetic) else {
                return Err(p.error_msg(
                    ErrorKind::UnexpectedCharacter,
                    "encoding name must start with an ASCII letter",
                ));
            };
            let mut name = String::from(first);
            p.scanner.advance();

            while let Some(c) = p.scanner.peek() {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    name.push(c);
                    p.scanner.advance();
                } else {
                    break;
                }
            }
            Ok(name)
        })
    }

    // - Names and Tokens

    // Name ::= (Letter | '_' | ':') (NameChar)*
    pub(crate) fn parse_name(&mut self) -> Result<String> {
        self.attempt(|p| {
            let Some(first) = p.scanner.peek().filter(|&c| chars::is_name_start_char(c)) else {
                return Err(p.error_msg(ErrorKind::UnexpectedCharacter, "invalid name start"));
            };
            let mut name = String::from(first);
            p.scanner.advance();

            while let Some(c) = p.scanner.peek() {
                if chars::is_name_char(c) {
                    name.push(c);
                    p.scanner.advance();
                } else {
                    break;
                }
            }
            Ok(name)
        })
    }

    // Nmtoken ::= (NameChar)+
    pub(crate) fn parse_nmtoken(&mut self) -> Result<String> {
        self.attempt(|p| {
            let mut token = String::new();
            while let Some(c) = p.scanner.peek() {
                if chars::is_name_char(c) {
                    token.push(c);
                    p.scanner.advance();
                } else {
                    break;
                }
            }
            if token.is_empty() {
                return Err(p.error_msg(ErrorKind::UnexpectedCharacter, "empty Nmtoken"));
            }
            Ok(token)
        })
    }

    /// Consume either quote character and return it, so the matching
    /// closing quote can be required later
    pub(crate) fn parse_quote(&mut self) -> Result<char> {
        match self.scanner.peek() {
            Some(c) if chars::is_quote_char(c) => {
                self.scanner.advance();
                Ok(c)
            }
            _ => Err(self.error_msg(ErrorKind::UnexpectedCharacter, "expected ' or \"")),
        }
    }

    // - White Space

    // S ::= (#x20 | #x9 | #xD | #xA)+
    pub(crate) fn require_space(&mut self) -> Result<()> {
        if !self.scanner.peek().is_some_and(chars::is_space) {
            return Err(self.error_msg(ErrorKind::UnexpectedCharacter, "expected whitespace"));
        }
        self.skip_space();
        Ok(())
    }

    pub(crate) fn skip_space(&mut self) {
        while self.scanner.peek().is_some_and(chars::is_space) {
            self.scanner.advance();
        }
    }

    // - Engine plumbing

    /// Run a production body; on failure rewind the cursor to the entry
    /// position so the caller can try another alternative
    pub(crate) fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let cp = self.scanner.checkpoint();
        let result = f(self);
        if result.is_err() {
            self.scanner.rewind(cp);
        }
        result
    }

    /// Run a production body under a context label; the label is popped
    /// on every return path, success or failure
    pub(crate) fn in_context<T>(
        &mut self,
        label: impl Into<Cow<'static, str>>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.context.push(label.into());
        let result = f(self);
        self.context.pop();
        result
    }

    fn context_label(&self) -> &str {
        self.context.last().map_or("document", |label| label.as_ref())
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.context_label(), self.scanner.pos())
    }

    pub(crate) fn error_msg(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::with_message(kind, self.context_label(), self.scanner.pos(), message)
    }

    /// Consume a required character, else fail at the current position
    pub(crate) fn must_char(&mut self, expected: char) -> Result<()> {
        if self.scanner.consume_char(expected) {
            Ok(())
        } else if self.scanner.at_end() {
            Err(self.error_msg(
                ErrorKind::UnterminatedConstruct,
                format!("expected {expected:?} before end of input"),
            ))
        } else {
            Err(self.error_msg(ErrorKind::UnexpectedCharacter, format!("expected {expected:?}")))
        }
    }

    /// Consume a required literal, else fail at the current position
    pub(crate) fn must_literal(&mut self, expected: &str) -> Result<()> {
        if self.scanner.consume_literal(expected) {
            Ok(())
        } else if self.scanner.at_end() {
            Err(self.error_msg(
                ErrorKind::UnterminatedConstruct,
                format!("expected {expected:?} before end of input"),
            ))
        } else {
            Err(self.error_msg(ErrorKind::UnexpectedCharacter, format!("expected {expected:?}")))
        }
    }

    pub(crate) const fn preserve_whitespace(&self) -> bool {
        self.config.preserve_whitespace
    }

    pub(crate) const fn scanner(&self) -> &Scanner {
        &self.scanner
    }
}
