//! Document-instance nodes

use crate::tree::dtd::Doctype;

/// Whole parse result: `document ::= prolog element Misc*`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    pub prolog: Prolog,
    pub root: Element,
    pub misc: Vec<Misc>,
}

/// `prolog ::= XMLDecl? Misc* (doctypedecl Misc*)?`
///
/// The misc lists hold only comments and processing instructions;
/// whitespace between them is discarded during the parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Prolog {
    pub xml_decl: Option<XmlDecl>,
    pub misc_before: Vec<Misc>,
    pub doctype: Option<Doctype>,
    pub misc_after: Vec<Misc>,
}

/// `<?xml version="..." encoding="..." standalone="..."?>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// `Misc ::= Comment | PI | S` (whitespace is dropped, not stored)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Misc {
    Comment(String),
    Pi(Pi),
}

/// One instance element with its attributes and content
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub contents: Vec<Content>,
    pub is_empty_tag: bool,
}

/// One `name="value"` pair
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: String,
    pub value: AttValue,
}

/// One entry of an element's content, in document order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Content {
    Text(String),
    Element(Element),
    Ref(Reference),
    CData(String),
    Pi(Pi),
    Comment(String),
}

/// `<?target instruction?>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pi {
    pub target: String,
    pub instruction: String,
}

/// `Reference ::= EntityRef | CharRef`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Reference {
    Entity(EntityRef),
    Char(CharRef),
}

/// `&name;`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityRef {
    pub name: String,
}

/// `&#123;` or `&#x1F;`; digits are kept as written, unvalidated for
/// range, with the base recorded alongside
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharRef {
    pub value: String,
    pub base: CharRefBase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CharRefBase {
    Decimal,
    Hex,
}

/// Quoted attribute-value literal: text runs alternating with
/// references. Literal `<` is rejected by the parser, and parameter
/// entity references never appear here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttValue {
    pub parts: Vec<AttValuePart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttValuePart {
    Text(String),
    Ref(Reference),
}

impl AttValue {
    /// Concatenation of the literal text runs, references skipped
    pub fn literal_text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if let AttValuePart::Text(text) = part {
                out.push_str(text);
            }
        }
        out
    }
}
