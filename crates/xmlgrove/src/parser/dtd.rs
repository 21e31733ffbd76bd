//! Document type declaration and the internal DTD subset

use crate::chars;
use crate::error::{ErrorKind, Result};
use crate::parser::{keyword, Parser};
use crate::tree::{
    AttDef, AttType, Attlist, Children, Choice, ChoiceSeq, ContentSpec, Cp, CpKind, DefaultDecl,
    Doctype, ElementDecl, EntityDecl, EntityDef, EntityKind, EntityValue, EntityValuePart,
    ExternalId, ExternalIdKind, Markup, Mixed, Notation, PeRef, Repetition, Seq,
};

impl Parser {
    // doctypedecl ::= '<!DOCTYPE' S Name (S ExternalID)? S?
    //                 ('[' intSubset ']' S?)? '>'
    pub(crate) fn parse_doctype(&mut self) -> Result<Doctype> {
        self.in_context("DOCTYPE declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<!DOCTYPE")?;
                p.require_space()?;
                let name = p.parse_name()?;

                let external_id = p
                    .attempt(|p| {
                        p.require_space()?;
                        p.parse_external_id()
                    })
                    .ok();

                p.skip_space();
                let mut markups = Vec::new();
                let mut pe_ref = None;
                if p.scanner.consume_char('[') {
                    loop {
                        p.skip_space();
                        if p.scanner.matches_char(']') || p.scanner.at_end() {
                            break;
                        }
                        if let Ok(markup) = p.parse_markup() {
                            markups.push(markup);
                            continue;
                        }
                        if let Ok(reference) = p.parse_pe_ref() {
                            pe_ref = Some(reference);
                            continue;
                        }
                        break;
                    }
                    p.must_char(']')?;
                    p.skip_space();
                }

                p.must_char('>')?;
                Ok(Doctype {
                    name,
                    external_id,
                    markups,
                    pe_ref,
                })
            })
        })
    }

    // markupdecl ::= elementdecl | AttlistDecl | EntityDecl
    //              | NotationDecl | PI | Comment
    pub(crate) fn parse_markup(&mut self) -> Result<Markup> {
        if self.scanner.matches_literal("<!ELEMENT") {
            return Ok(Markup::Element(self.parse_element_decl()?));
        }
        if self.scanner.matches_literal("<!ATTLIST") {
            return Ok(Markup::Attlist(self.parse_attlist()?));
        }
        if self.scanner.matches_literal("<!ENTITY") {
            return Ok(Markup::Entity(self.parse_entity_decl()?));
        }
        if self.scanner.matches_literal("<!NOTATION") {
            return Ok(Markup::Notation(self.parse_notation_decl()?));
        }
        if self.scanner.matches_literal("<!--") {
            return Ok(Markup::Comment(self.parse_comment()?));
        }
        if self.scanner.matches_literal("<?") {
            return Ok(Markup::Pi(self.parse_pi()?));
        }
        if self.scanner.matches_literal("<!") {
            return Err(self.error_msg(
                ErrorKind::UnknownMarkupKeyword,
                "unknown markup declaration keyword",
            ));
        }
        Err(self.error_msg(ErrorKind::UnexpectedCharacter, "expected markup declaration"))
    }

    // - Element Type Declarations

    // elementdecl ::= '<!ELEMENT' S Name S contentspec S? '>'
    pub(crate) fn parse_element_decl(&mut self) -> Result<ElementDecl> {
        self.in_context("ELEMENT declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<!ELEMENT")?;
                p.require_space()?;
                let name = p.parse_name()?;
                p.require_space()?;
                let content_spec = p.parse_content_spec()?;
                p.skip_space();
                p.must_char('>')?;
                Ok(ElementDecl { name, content_spec })
            })
        })
    }

    // contentspec ::= 'EMPTY' | 'ANY' | Mixed | children
    pub(crate) fn parse_content_spec(&mut self) -> Result<ContentSpec> {
        if self.scanner.consume_literal(keyword::EMPTY) {
            return Ok(ContentSpec::Empty);
        }
        if self.scanner.consume_literal(keyword::ANY) {
            return Ok(ContentSpec::Any);
        }
        if let Ok(mixed) = self.parse_mixed() {
            return Ok(ContentSpec::Mixed(mixed));
        }
        let children = self.parse_children()?;
        Ok(ContentSpec::Children(children))
    }

    // children ::= (choice | seq) ('?' | '*' | '+')?
    pub(crate) fn parse_children(&mut self) -> Result<Children> {
        let group = if let Ok(choice) = self.parse_choice() {
            ChoiceSeq::Choice(choice)
        } else if let Ok(seq) = self.parse_seq() {
            ChoiceSeq::Seq(seq)
        } else {
            return Err(self.error_msg(
                ErrorKind::MalformedContentModel,
                "neither choice nor seq matched",
            ));
        };
        let suffix = self.parse_repetition();
        Ok(Children { group, suffix })
    }

    // cp ::= (Name | choice | seq) ('?' | '*' | '+')?
    pub(crate) fn parse_cp(&mut self) -> Result<Cp> {
        self.attempt(|p| {
            let kind = if p.scanner.matches_char('(') {
                let group = if let Ok(choice) = p.parse_choice() {
                    ChoiceSeq::Choice(choice)
                } else {
                    ChoiceSeq::Seq(p.parse_seq()?)
                };
                CpKind::Group(group)
            } else {
                CpKind::Name(p.parse_name()?)
            };
            let suffix = p.parse_repetition();
            Ok(Cp { kind, suffix })
        })
    }

    // choice ::= '(' S? cp ( S? '|' S? cp )+ S? ')'
    pub(crate) fn parse_choice(&mut self) -> Result<Choice> {
        self.attempt(|p| {
            p.must_char('(')?;
            p.skip_space();
            let mut cps = vec![p.parse_cp()?];
            loop {
                p.skip_space();
                if !p.scanner.consume_char('|') {
                    break;
                }
                p.skip_space();
                cps.push(p.parse_cp()?);
            }
            // one alternative alone is a seq, not a choice
            if cps.len() < 2 {
                return Err(p.error_msg(
                    ErrorKind::MalformedContentModel,
                    "choice needs at least two alternatives",
                ));
            }
            p.must_char(')')?;
            Ok(Choice { cps })
        })
    }

    // seq ::= '(' S? cp ( S? ',' S? cp )* S? ')'
    pub(crate) fn parse_seq(&mut self) -> Result<Seq> {
        self.attempt(|p| {
            p.must_char('(')?;
            p.skip_space();
            let mut cps = vec![p.parse_cp()?];
            loop {
                p.skip_space();
                if !p.scanner.consume_char(',') {
                    break;
                }
                p.skip_space();
                cps.push(p.parse_cp()?);
            }
            p.must_char(')')?;
            Ok(Seq { cps })
        })
    }

    // Mixed ::= '(' S? '#PCDATA' (S? '|' S? Name)* S? ')*'
    //         | '(' S? '#PCDATA' S? ')'
    pub(crate) fn parse_mixed(&mut self) -> Result<Mixed> {
        self.attempt(|p| {
            p.must_char('(')?;
            p.skip_space();
            p.must_literal(keyword::PCDATA)?;

            let mut names = Vec::new();
            loop {
                p.skip_space();
                if !p.scanner.consume_char('|') {
                    break;
                }
                p.skip_space();
                names.push(p.parse_name()?);
            }

            p.must_char(')')?;
            if names.is_empty() {
                p.scanner.consume_char('*');
            } else {
                p.must_char('*')?;
            }
            Ok(Mixed { names })
        })
    }

    fn parse_repetition(&mut self) -> Option<Repetition> {
        let rep = self.scanner.peek().and_then(Repetition::from_char)?;
        self.scanner.advance();
        Some(rep)
    }

    // - Attribute-List Declarations

    // AttlistDecl ::= '<!ATTLIST' S Name AttDef* S? '>'
    pub(crate) fn parse_attlist(&mut self) -> Result<Attlist> {
        self.in_context("ATTLIST declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<!ATTLIST")?;
                p.require_space()?;
                let name = p.parse_name()?;

                let mut defs = Vec::new();
                while let Ok(def) = p.parse_att_def() {
                    defs.push(def);
                }

                p.skip_space();
                p.must_char('>')?;
                Ok(Attlist { name, defs })
            })
        })
    }

    // AttDef ::= S Name S AttType S DefaultDecl
    pub(crate) fn parse_att_def(&mut self) -> Result<AttDef> {
        self.attempt(|p| {
            p.require_space()?;
            let name = p.parse_name()?;
            p.require_space()?;
            let att_type = p.parse_att_type()?;
            p.require_space()?;
            let default = p.parse_default_decl()?;
            Ok(AttDef {
                name,
                att_type,
                default,
            })
        })
    }

    // AttType ::= StringType | TokenizedType | EnumeratedType
    //
    // Keywords that are prefixes of other keywords are tried longest
    // first, so IDREFS never parses as IDREF followed by a stray S.
    pub(crate) fn parse_att_type(&mut self) -> Result<AttType> {
        if self.scanner.consume_literal(keyword::CDATA) {
            return Ok(AttType::Cdata);
        }
        if self.scanner.consume_literal(keyword::IDREFS) {
            return Ok(AttType::IdRefs);
        }
        if self.scanner.consume_literal(keyword::IDREF) {
            return Ok(AttType::IdRef);
        }
        if self.scanner.consume_literal(keyword::ID) {
            return Ok(AttType::Id);
        }
        if self.scanner.consume_literal(keyword::ENTITIES) {
            return Ok(AttType::Entities);
        }
        if self.scanner.consume_literal(keyword::ENTITY) {
            return Ok(AttType::Entity);
        }
        if self.scanner.consume_literal(keyword::NMTOKENS) {
            return Ok(AttType::NmTokens);
        }
        if self.scanner.consume_literal(keyword::NMTOKEN) {
            return Ok(AttType::NmToken);
        }
        if self.scanner.matches_literal(keyword::NOTATION) {
            return self.parse_notation_type();
        }
        self.parse_enumeration()
    }

    // NotationType ::= 'NOTATION' S '(' S? Name (S? '|' S? Name)* S? ')'
    pub(crate) fn parse_notation_type(&mut self) -> Result<AttType> {
        self.attempt(|p| {
            p.must_literal(keyword::NOTATION)?;
            p.require_space()?;
            p.must_char('(')?;
            p.skip_space();
            let mut names = vec![p.parse_name()?];
            loop {
                p.skip_space();
                if !p.scanner.consume_char('|') {
                    break;
                }
                p.skip_space();
                names.push(p.parse_name()?);
            }
            p.must_char(')')?;
            Ok(AttType::Notation(names))
        })
    }

    // Enumeration ::= '(' S? Nmtoken (S? '|' S? Nmtoken)* S? ')'
    pub(crate) fn parse_enumeration(&mut self) -> Result<AttType> {
        self.attempt(|p| {
            p.must_char('(')?;
            p.skip_space();
            let mut tokens = vec![p.parse_nmtoken()?];
            loop {
                p.skip_space();
                if !p.scanner.consume_char('|') {
                    break;
                }
                p.skip_space();
                tokens.push(p.parse_nmtoken()?);
            }
            p.must_char(')')?;
            Ok(AttType::Enumeration(tokens))
        })
    }

    // DefaultDecl ::= '#REQUIRED' | '#IMPLIED' | (('#FIXED' S)? AttValue)
    pub(crate) fn parse_default_decl(&mut self) -> Result<DefaultDecl> {
        if self.scanner.consume_literal(keyword::REQUIRED) {
            return Ok(DefaultDecl::Required);
        }
        if self.scanner.consume_literal(keyword::IMPLIED) {
            return Ok(DefaultDecl::Implied);
        }
        self.attempt(|p| {
            let fixed = if p.scanner.consume_literal(keyword::FIXED) {
                p.require_space()?;
                true
            } else {
                false
            };
            let value = p.parse_att_value()?;
            Ok(DefaultDecl::Value { fixed, value })
        })
    }

    // - Entity Declarations

    // EntityDecl ::= '<!ENTITY' S Name S EntityDef S? '>'
    //              | '<!ENTITY' S '%' S Name S PEDef S? '>'
    pub(crate) fn parse_entity_decl(&mut self) -> Result<EntityDecl> {
        self.in_context("ENTITY declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<!ENTITY")?;
                p.require_space()?;

                let (kind, name, def) = if p.scanner.consume_char('%') {
                    p.require_space()?;
                    let name = p.parse_name()?;
                    p.require_space()?;
                    let def = p.parse_pe_def()?;
                    (EntityKind::Parameter, name, def)
                } else {
                    let name = p.parse_name()?;
                    p.require_space()?;
                    let def = p.parse_entity_def()?;
                    (EntityKind::General, name, def)
                };

                p.skip_space();
                p.must_char('>')?;
                Ok(EntityDecl { kind, name, def })
            })
        })
    }

    // EntityDef ::= EntityValue | (ExternalID NDataDecl?)
    pub(crate) fn parse_entity_def(&mut self) -> Result<EntityDef> {
        if let Ok(value) = self.parse_entity_value() {
            return Ok(EntityDef::Internal(value));
        }
        let id = self.parse_external_id()?;
        let ndata = self.parse_ndata().ok();
        Ok(EntityDef::External { id, ndata })
    }

    // PEDef ::= EntityValue | ExternalID
    pub(crate) fn parse_pe_def(&mut self) -> Result<EntityDef> {
        if let Ok(value) = self.parse_entity_value() {
            return Ok(EntityDef::Internal(value));
        }
        let id = self.parse_external_id()?;
        Ok(EntityDef::External { id, ndata: None })
    }

    // EntityValue ::= '"' ([^%&"] | PEReference | Reference)* '"'
    //               | "'" ([^%&'] | PEReference | Reference)* "'"
    pub(crate) fn parse_entity_value(&mut self) -> Result<EntityValue> {
        self.attempt(|p| {
            let quote = p.parse_quote()?;

            let mut parts = Vec::new();
            let mut pending = String::new();
            loop {
                if p.scanner.matches_char(quote) || p.scanner.at_end() {
                    break;
                }
                if p.scanner.matches_char('%') {
                    if !pending.is_empty() {
                        parts.push(EntityValuePart::Text(std::mem::take(&mut pending)));
                    }
                    parts.push(EntityValuePart::PeRef(p.parse_pe_ref()?));
                } else if p.scanner.matches_char('&') {
                    if !pending.is_empty() {
                        parts.push(EntityValuePart::Text(std::mem::take(&mut pending)));
                    }
                    parts.push(EntityValuePart::Ref(p.parse_reference()?));
                } else if let Some(c) = p.scanner.peek() {
                    pending.push(c);
                    p.scanner.advance();
                }
            }
            if !pending.is_empty() {
                parts.push(EntityValuePart::Text(pending));
            }

            p.must_char(quote)?;
            Ok(EntityValue { parts })
        })
    }

    // NDataDecl ::= S 'NDATA' S Name
    pub(crate) fn parse_ndata(&mut self) -> Result<String> {
        self.attempt(|p| {
            p.require_space()?;
            p.must_literal(keyword::NDATA)?;
            p.require_space()?;
            p.parse_name()
        })
    }

    // - External Identifiers

    // ExternalID ::= 'SYSTEM' S SystemLiteral
    //              | 'PUBLIC' S PubidLiteral (S SystemLiteral)?
    //
    // The system literal after a public identifier is optional so the
    // same production also covers the PublicID form used by notation
    // declarations.
    pub(crate) fn parse_external_id(&mut self) -> Result<ExternalId> {
        self.attempt(|p| {
            if p.scanner.consume_literal(keyword::SYSTEM) {
                p.require_space()?;
                let system = p.parse_system_literal()?;
                return Ok(ExternalId {
                    kind: ExternalIdKind::System,
                    pubid: None,
                    system: Some(system),
                });
            }
            if p.scanner.consume_literal(keyword::PUBLIC) {
                p.require_space()?;
                let pubid = p.parse_pubid_literal()?;
                let system = p
                    .attempt(|p| {
                        p.require_space()?;
                        p.parse_system_literal()
                    })
                    .ok();
                return Ok(ExternalId {
                    kind: ExternalIdKind::Public,
                    pubid: Some(pubid),
                    system,
                });
            }
            Err(p.error_msg(
                ErrorKind::UnexpectedCharacter,
                "expected 'SYSTEM' or 'PUBLIC'",
            ))
        })
    }

    // SystemLiteral ::= ('"' [^"]* '"') | ("'" [^']* "'")
    pub(crate) fn parse_system_literal(&mut self) -> Result<String> {
        self.attempt(|p| {
            let quote = p.parse_quote()?;
            let mut text = String::new();
            while let Some(c) = p.scanner.peek() {
                if c == quote {
                    break;
                }
                text.push(c);
                p.scanner.advance();
            }
            p.must_char(quote)?;
            Ok(text)
        })
    }

    // PubidLiteral ::= '"' PubidChar* '"' | "'" (PubidChar - "'")* "'"
    pub(crate) fn parse_pubid_literal(&mut self) -> Result<String> {
        self.attempt(|p| {
            let quote = p.parse_quote()?;
            let mut text = String::new();
            while let Some(c) = p.scanner.peek() {
                if c == quote || !chars::is_pubid_char(c) {
                    break;
                }
                text.push(c);
                p.scanner.advance();
            }
            p.must_char(quote)?;
            Ok(text)
        })
    }

    // - Notation Declarations

    // NotationDecl ::= '<!NOTATION' S Name S (ExternalID | PublicID) S? '>'
    pub(crate) fn parse_notation_decl(&mut self) -> Result<Notation> {
        self.in_context("NOTATION declaration", |p| {
            p.attempt(|p| {
                p.must_literal("<!NOTATION")?;
                p.require_space()?;
                let name = p.parse_name()?;
                p.require_space()?;
                let external_id = p.parse_external_id()?;
                p.skip_space();
                p.must_char('>')?;
                Ok(Notation { name, external_id })
            })
        })
    }

    // PEReference ::= '%' Name ';'
    pub(crate) fn parse_pe_ref(&mut self) -> Result<PeRef> {
        self.attempt(|p| {
            p.must_char('%')?;
            let name = p.parse_name()?;
            p.must_char(';')?;
            Ok(PeRef { name })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_cp(name: &str, suffix: Option<Repetition>) -> Cp {
        Cp {
            kind: CpKind::Name(name.to_string()),
            suffix,
        }
    }

    #[test]
    fn test_parse_doctype_name_only() {
        let mut p = Parser::new("<!DOCTYPE note>");
        let doctype = p.parse_doctype().unwrap();
        assert_eq!(doctype.name, "note");
        assert!(doctype.external_id.is_none());
        assert!(doctype.markups.is_empty());
    }

    #[test]
    fn test_parse_doctype_with_system_id() {
        let mut p = Parser::new(r#"<!DOCTYPE note SYSTEM "note.dtd">"#);
        let doctype = p.parse_doctype().unwrap();
        let id = doctype.external_id.unwrap();
        assert_eq!(id.kind, ExternalIdKind::System);
        assert_eq!(id.system.as_deref(), Some("note.dtd"));
    }

    #[test]
    fn test_parse_doctype_with_internal_subset() {
        let source = r#"<!DOCTYPE note [
            <!ELEMENT note (to,from)>
            <!ELEMENT to (#PCDATA)>
            <!-- declarations end here -->
            %extras;
        ]>"#;
        let mut p = Parser::new(source);
        let doctype = p.parse_doctype().unwrap();
        assert_eq!(doctype.markups.len(), 3);
        assert!(matches!(doctype.markups[0], Markup::Element(_)));
        assert!(matches!(doctype.markups[2], Markup::Comment(_)));
        assert_eq!(
            doctype.pe_ref,
            Some(PeRef {
                name: "extras".to_string()
            })
        );
    }

    #[test]
    fn test_parse_doctype_unterminated_subset() {
        let mut p = Parser::new("<!DOCTYPE note [ <!ELEMENT to (#PCDATA)>");
        let err = p.parse_doctype().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedConstruct);
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_parse_markup_unknown_keyword() {
        let mut p = Parser::new("<!SHORTREF map>");
        let err = p.parse_markup().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownMarkupKeyword);
    }

    #[test]
    fn test_parse_element_decl_empty_and_any() {
        let mut p = Parser::new("<!ELEMENT br EMPTY>");
        let decl = p.parse_element_decl().unwrap();
        assert_eq!(decl.name, "br");
        assert_eq!(decl.content_spec, ContentSpec::Empty);

        let mut p = Parser::new("<!ELEMENT container ANY>");
        let decl = p.parse_element_decl().unwrap();
        assert_eq!(decl.content_spec, ContentSpec::Any);
    }

    #[test]
    fn test_parse_mixed_pcdata_only() {
        let mut p = Parser::new("(#PCDATA)");
        let mixed = p.parse_mixed().unwrap();
        assert!(mixed.names.is_empty());
    }

    #[test]
    fn test_parse_mixed_with_names_requires_star() {
        let mut p = Parser::new("(#PCDATA | b | i)*");
        let mixed = p.parse_mixed().unwrap();
        assert_eq!(mixed.names, vec!["b".to_string(), "i".to_string()]);

        let mut p = Parser::new("(#PCDATA | b)");
        assert!(p.parse_mixed().is_err());
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_mixed_without_star_is_not_children_either() {
        let mut p = Parser::new("(#PCDATA | b)");
        let err = p.parse_content_spec().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedContentModel);
    }

    #[test]
    fn test_parse_children_choice_with_suffix() {
        let mut p = Parser::new("(a | b | c)+");
        let children = p.parse_children().unwrap();
        assert_eq!(children.suffix, Some(Repetition::OneOrMore));
        let ChoiceSeq::Choice(choice) = children.group else {
            panic!("expected choice");
        };
        assert_eq!(choice.cps.len(), 3);
        assert_eq!(choice.cps[0], name_cp("a", None));
    }

    #[test]
    fn test_parse_children_seq() {
        let mut p = Parser::new("(to, from?, body*)");
        let children = p.parse_children().unwrap();
        assert!(children.suffix.is_none());
        let ChoiceSeq::Seq(seq) = children.group else {
            panic!("expected seq");
        };
        assert_eq!(
            seq.cps,
            vec![
                name_cp("to", None),
                name_cp("from", Some(Repetition::Optional)),
                name_cp("body", Some(Repetition::ZeroOrMore)),
            ]
        );
    }

    #[test]
    fn test_single_name_group_is_seq() {
        let mut p = Parser::new("(body)");
        let children = p.parse_children().unwrap();
        assert!(matches!(children.group, ChoiceSeq::Seq(_)));
    }

    #[test]
    fn test_parse_cp_nested_group() {
        let mut p = Parser::new("((a | b), c)?");
        let children = p.parse_children().unwrap();
        assert_eq!(children.suffix, Some(Repetition::Optional));
        let ChoiceSeq::Seq(seq) = children.group else {
            panic!("expected seq");
        };
        assert!(matches!(seq.cps[0].kind, CpKind::Group(_)));
        assert_eq!(seq.cps[1], name_cp("c", None));
    }

    #[test]
    fn test_parse_attlist() {
        let source = r#"<!ATTLIST note id ID #REQUIRED lang CDATA "en">"#;
        let mut p = Parser::new(source);
        let attlist = p.parse_attlist().unwrap();
        assert_eq!(attlist.name, "note");
        assert_eq!(attlist.defs.len(), 2);
        assert_eq!(attlist.defs[0].att_type, AttType::Id);
        assert_eq!(attlist.defs[0].default, DefaultDecl::Required);
        assert_eq!(attlist.defs[1].att_type, AttType::Cdata);
        let DefaultDecl::Value { fixed, ref value } = attlist.defs[1].default else {
            panic!("expected default value");
        };
        assert!(!fixed);
        assert_eq!(value.literal_text(), "en");
    }

    #[test]
    fn test_parse_attlist_no_defs() {
        let mut p = Parser::new("<!ATTLIST note>");
        let attlist = p.parse_attlist().unwrap();
        assert!(attlist.defs.is_empty());
    }

    #[test]
    fn test_att_type_longest_match() {
        let cases = [
            ("IDREFS", AttType::IdRefs),
            ("IDREF", AttType::IdRef),
            ("ID", AttType::Id),
            ("ENTITIES", AttType::Entities),
            ("ENTITY", AttType::Entity),
            ("NMTOKENS", AttType::NmTokens),
            ("NMTOKEN", AttType::NmToken),
            ("CDATA", AttType::Cdata),
        ];
        for (source, expected) in cases {
            let mut p = Parser::new(source);
            assert_eq!(p.parse_att_type().unwrap(), expected, "{source}");
            assert!(p.scanner().at_end(), "{source} not fully consumed");
        }
    }

    #[test]
    fn test_parse_notation_type() {
        let mut p = Parser::new("NOTATION (gif | jpeg)");
        assert_eq!(
            p.parse_att_type().unwrap(),
            AttType::Notation(vec!["gif".to_string(), "jpeg".to_string()])
        );
    }

    #[test]
    fn test_parse_enumeration() {
        let mut p = Parser::new("(yes | no | 1)");
        assert_eq!(
            p.parse_att_type().unwrap(),
            AttType::Enumeration(vec![
                "yes".to_string(),
                "no".to_string(),
                "1".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_default_decl() {
        let mut p = Parser::new("#REQUIRED");
        assert_eq!(p.parse_default_decl().unwrap(), DefaultDecl::Required);

        let mut p = Parser::new("#IMPLIED");
        assert_eq!(p.parse_default_decl().unwrap(), DefaultDecl::Implied);

        let mut p = Parser::new(r#"#FIXED "1.0""#);
        let DefaultDecl::Value { fixed, value } = p.parse_default_decl().unwrap() else {
            panic!("expected value");
        };
        assert!(fixed);
        assert_eq!(value.literal_text(), "1.0");
    }

    #[test]
    fn test_parse_entity_decl_internal() {
        let mut p = Parser::new(r#"<!ENTITY copy "&#169;">"#);
        let decl = p.parse_entity_decl().unwrap();
        assert_eq!(decl.kind, EntityKind::General);
        assert_eq!(decl.name, "copy");
        let EntityDef::Internal(value) = decl.def else {
            panic!("expected internal definition");
        };
        assert_eq!(value.parts.len(), 1);
        assert!(matches!(value.parts[0], EntityValuePart::Ref(_)));
    }

    #[test]
    fn test_parse_entity_decl_external_with_ndata() {
        let mut p = Parser::new(r#"<!ENTITY logo SYSTEM "logo.gif" NDATA gif>"#);
        let decl = p.parse_entity_decl().unwrap();
        let EntityDef::External { id, ndata } = decl.def else {
            panic!("expected external definition");
        };
        assert_eq!(id.system.as_deref(), Some("logo.gif"));
        assert_eq!(ndata.as_deref(), Some("gif"));
    }

    #[test]
    fn test_parse_entity_decl_parameter() {
        let mut p = Parser::new(r#"<!ENTITY % draft "INCLUDE">"#);
        let decl = p.parse_entity_decl().unwrap();
        assert_eq!(decl.kind, EntityKind::Parameter);
        assert_eq!(decl.name, "draft");
        assert!(matches!(decl.def, EntityDef::Internal(_)));
    }

    #[test]
    fn test_parse_entity_value_mixed_parts() {
        let mut p = Parser::new(r#""before %pe; and &ge; after""#);
        let value = p.parse_entity_value().unwrap();
        assert_eq!(value.parts.len(), 5);
        assert_eq!(value.parts[0], EntityValuePart::Text("before ".to_string()));
        assert_eq!(
            value.parts[1],
            EntityValuePart::PeRef(PeRef {
                name: "pe".to_string()
            })
        );
        assert_eq!(value.parts[2], EntityValuePart::Text(" and ".to_string()));
        assert!(matches!(value.parts[3], EntityValuePart::Ref(_)));
        assert_eq!(value.parts[4], EntityValuePart::Text(" after".to_string()));
    }

    #[test]
    fn test_parse_external_id_public() {
        let mut p = Parser::new(r#"PUBLIC "-//W3C//DTD XHTML 1.0//EN" "xhtml1.dtd""#);
        let id = p.parse_external_id().unwrap();
        assert_eq!(id.kind, ExternalIdKind::Public);
        assert_eq!(id.pubid.as_deref(), Some("-//W3C//DTD XHTML 1.0//EN"));
        assert_eq!(id.system.as_deref(), Some("xhtml1.dtd"));
    }

    #[test]
    fn test_parse_external_id_public_without_system() {
        let mut p = Parser::new(r#"PUBLIC "-//ACME//NOTATION gif//EN""#);
        let id = p.parse_external_id().unwrap();
        assert_eq!(id.kind, ExternalIdKind::Public);
        assert!(id.system.is_none());
    }

    #[test]
    fn test_parse_system_literal() {
        let mut p = Parser::new(r#""http://example.com/a?b=c""#);
        assert_eq!(p.parse_system_literal().unwrap(), "http://example.com/a?b=c");

        let mut p = Parser::new("'note.dtd'");
        assert_eq!(p.parse_system_literal().unwrap(), "note.dtd");

        let mut p = Parser::new(r#""never closed"#);
        assert!(p.parse_system_literal().is_err());
    }

    #[test]
    fn test_parse_pubid_literal() {
        let mut p = Parser::new(r#""-//W3C//DTD XHTML 1.0//EN""#);
        assert_eq!(p.parse_pubid_literal().unwrap(), "-//W3C//DTD XHTML 1.0//EN");

        // stops at the first character outside the pubid set
        let mut p = Parser::new(r#""a{b""#);
        assert!(p.parse_pubid_literal().is_err());
    }

    #[test]
    fn test_parse_notation_decl() {
        let mut p = Parser::new(r#"<!NOTATION gif SYSTEM "image/gif">"#);
        let notation = p.parse_notation_decl().unwrap();
        assert_eq!(notation.name, "gif");
        assert_eq!(notation.external_id.system.as_deref(), Some("image/gif"));
    }

    #[test]
    fn test_parse_pe_ref() {
        let mut p = Parser::new("%chapter;");
        assert_eq!(
            p.parse_pe_ref().unwrap(),
            PeRef {
                name: "chapter".to_string()
            }
        );

        let mut p = Parser::new("%chapter");
        assert!(p.parse_pe_ref().is_err());
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_failed_content_spec_restores_position() {
        let mut p = Parser::new("(a | )");
        assert!(p.parse_content_spec().is_err());
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_element_decl_error_context() {
        let mut p = Parser::new("<!ELEMENT note (a | )>");
        let err = p.parse_element_decl().unwrap_err();
        assert_eq!(err.context(), "ELEMENT declaration");
    }
}
