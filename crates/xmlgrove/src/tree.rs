//! Syntax-tree node types produced by the parser
//!
//! Plain immutable data carriers mirroring the XML 1.0 grammar. Grammar
//! alternatives are closed enums so that consumers get exhaustiveness
//! checking; ownership is tree-shaped with no sharing or back-links.

pub mod document;
pub mod dtd;

pub use document::{
    AttValue, AttValuePart, Attribute, CharRef, CharRefBase, Content, Document, Element,
    EntityRef, Misc, Pi, Prolog, Reference, XmlDecl,
};
pub use dtd::{
    AttDef, AttType, Attlist, Children, Choice, ChoiceSeq, ContentSpec, Cp, CpKind, DefaultDecl,
    Doctype, ElementDecl, EntityDecl, EntityDef, EntityKind, EntityValue, EntityValuePart,
    ExternalId, ExternalIdKind, Markup, Mixed, Notation, PeRef, Repetition, Seq,
};
