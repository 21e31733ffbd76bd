//! Document Type Definition nodes

use crate::tree::document::{AttValue, Reference};

/// `<!DOCTYPE name ExternalID? [ markup* %pe; ]? >`
///
/// The internal-subset markup list preserves source order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Doctype {
    pub name: String,
    pub external_id: Option<ExternalId>,
    pub markups: Vec<Markup>,
    pub pe_ref: Option<PeRef>,
}

/// `markupdecl ::= elementdecl | AttlistDecl | EntityDecl | NotationDecl | PI | Comment`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Markup {
    Element(ElementDecl),
    Attlist(Attlist),
    Entity(EntityDecl),
    Notation(Notation),
    Pi(crate::tree::document::Pi),
    Comment(String),
}

/// `<!ELEMENT name contentspec>`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementDecl {
    pub name: String,
    pub content_spec: ContentSpec,
}

/// `contentspec ::= 'EMPTY' | 'ANY' | Mixed | children`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContentSpec {
    Empty,
    Any,
    Mixed(Mixed),
    Children(Children),
}

/// `(#PCDATA | a | b)*`, names may be empty; when they are not, the
/// source must carry the trailing `*`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mixed {
    pub names: Vec<String>,
}

/// `children ::= (choice | seq) ('?' | '*' | '+')?`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Children {
    pub group: ChoiceSeq,
    pub suffix: Option<Repetition>,
}

/// Either grouping form of an element-content model
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChoiceSeq {
    Choice(Choice),
    Seq(Seq),
}

/// `choice ::= '(' cp ('|' cp)* ')'`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Choice {
    pub cps: Vec<Cp>,
}

/// `seq ::= '(' cp (',' cp)* ')'`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Seq {
    pub cps: Vec<Cp>,
}

/// `cp ::= (Name | choice | seq) ('?' | '*' | '+')?`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cp {
    pub kind: CpKind,
    pub suffix: Option<Repetition>,
}

/// One content particle is either a name or a nested group
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CpKind {
    Name(String),
    Group(ChoiceSeq),
}

/// Repetition suffix `?`, `*`, or `+`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Repetition {
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Repetition {
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::Optional),
            '*' => Some(Self::ZeroOrMore),
            '+' => Some(Self::OneOrMore),
            _ => None,
        }
    }
}

/// `<!ATTLIST element-name att-def*>`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attlist {
    pub name: String,
    pub defs: Vec<AttDef>,
}

/// `AttDef ::= S Name S AttType S DefaultDecl`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttDef {
    pub name: String,
    pub att_type: AttType,
    pub default: DefaultDecl,
}

/// `AttType ::= StringType | TokenizedType | EnumeratedType`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttType {
    Cdata,
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    NmToken,
    NmTokens,
    Notation(Vec<String>),
    Enumeration(Vec<String>),
}

/// `DefaultDecl ::= '#REQUIRED' | '#IMPLIED' | (('#FIXED' S)? AttValue)`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DefaultDecl {
    Required,
    Implied,
    Value { fixed: bool, value: AttValue },
}

/// `<!ENTITY name ...>`, either general or parameter
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityDecl {
    pub kind: EntityKind,
    pub name: String,
    pub def: EntityDef,
}

/// General entities (`&name;`) expand in content; parameter entities
/// (`%name;`) expand only within the DTD
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityKind {
    General,
    Parameter,
}

/// `EntityDef ::= EntityValue | (ExternalID NDataDecl?)`
///
/// Parameter entities never carry an NDATA name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityDef {
    Internal(EntityValue),
    External {
        id: ExternalId,
        ndata: Option<String>,
    },
}

/// Quoted entity-value literal: text runs alternating with entity,
/// character, and parameter-entity references
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityValue {
    pub parts: Vec<EntityValuePart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityValuePart {
    Text(String),
    Ref(Reference),
    PeRef(PeRef),
}

/// `ExternalID ::= 'SYSTEM' S SystemLiteral | 'PUBLIC' S PubidLiteral S SystemLiteral`
///
/// The pubid literal is present iff the kind is `Public`. The system
/// literal may be absent only on a public-only notation declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExternalId {
    pub kind: ExternalIdKind,
    pub pubid: Option<String>,
    pub system: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExternalIdKind {
    System,
    Public,
}

/// `<!NOTATION name (ExternalID | PublicID)>`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Notation {
    pub name: String,
    pub external_id: ExternalId,
}

/// `%name;`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeRef {
    pub name: String,
}
