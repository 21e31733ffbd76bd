//! Element, content, and reference productions

use crate::chars;
use crate::error::{ErrorKind, Result};
use crate::parser::Parser;
use crate::tree::{
    AttValue, AttValuePart, Attribute, CharRef, CharRefBase, Content, Element, EntityRef, Pi,
    Reference,
};

impl Parser {
    // - Element

    // element ::= EmptyElemTag | STag content ETag
    // EmptyElemTag ::= '<' Name (S Attribute)* S? '/>'
    // STag ::= '<' Name (S Attribute)* S? '>'
    pub(crate) fn parse_element(&mut self) -> Result<Element> {
        self.in_context("element", |p| {
            p.attempt(|p| {
                p.must_char('<')?;
                let name = p.parse_name()?;
                p.in_context(format!("{name} tag"), |p| p.parse_element_rest(name))
            })
        })
    }

    fn parse_element_rest(&mut self, name: String) -> Result<Element> {
        let mut attributes = Vec::new();
        while self.scanner.peek().is_some_and(chars::is_space) {
            self.skip_space();
            if self.scanner.matches_char('>')
                || self.scanner.matches_literal("/>")
                || self.scanner.at_end()
            {
                break;
            }
            attributes.push(self.parse_attribute()?);
        }

        if self.scanner.consume_char('>') {
            let contents = self.parse_contents();
            let end_name = self.parse_etag()?;
            if end_name != name {
                return Err(self.error(ErrorKind::NameMismatch {
                    start: name,
                    end: end_name,
                }));
            }
            Ok(Element {
                name,
                attributes,
                contents,
                is_empty_tag: false,
            })
        } else if self.scanner.consume_literal("/>") {
            Ok(Element {
                name,
                attributes,
                contents: Vec::new(),
                is_empty_tag: true,
            })
        } else if self.scanner.at_end() {
            Err(self.error_msg(
                ErrorKind::UnterminatedConstruct,
                "element start-tag is not closed",
            ))
        } else {
            Err(self.error_msg(ErrorKind::UnexpectedCharacter, "expected '>' or '/>'"))
        }
    }

    // Attribute ::= Name Eq AttValue
    pub(crate) fn parse_attribute(&mut self) -> Result<Attribute> {
        self.attempt(|p| {
            let name = p.parse_name()?;
            p.parse_eq()?;
            let value = p.parse_att_value()?;
            Ok(Attribute { name, value })
        })
    }

    // ETag ::= '</' Name S? '>'
    pub(crate) fn parse_etag(&mut self) -> Result<String> {
        self.attempt(|p| {
            p.must_literal("</")?;
            let name = p.parse_name()?;
            p.skip_space();
            p.must_char('>')?;
            Ok(name)
        })
    }

    // - Content of Elements

    // content ::= (element | CharData | Reference | CDSect | PI | Comment)*
    //
    // Classified by the next one-to-few characters:
    //   '&'          -> Reference
    //   '<!--'       -> Comment
    //   '<![CDATA['  -> CDSect (retried as Comment, both start '<!')
    //   '<?'         -> PI
    //   '<'          -> nested element
    //   otherwise    -> accumulated text run
    //
    // The loop never fails: it stops at end of input, at ']]>', or at
    // the first construct whose production fails, with the cursor
    // restored to before that attempt. Deciding whether what follows is
    // a valid end-tag is the caller's job.
    pub(crate) fn parse_contents(&mut self) -> Vec<Content> {
        let mut contents = Vec::new();
        let mut pending = String::new();

        loop {
            if self.scanner.matches_char('&') {
                let Ok(reference) = self.parse_reference() else {
                    break;
                };
                self.flush_text(&mut pending, &mut contents);
                contents.push(Content::Ref(reference));
            } else if self.scanner.matches_char('<') {
                let item = if self.scanner.matches_literal("<!") {
                    match self.parse_cdsect() {
                        Ok(cdata) => Content::CData(cdata),
                        Err(_) => match self.parse_comment() {
                            Ok(comment) => Content::Comment(comment),
                            Err(_) => break,
                        },
                    }
                } else if self.scanner.matches_literal("<?") {
                    match self.parse_pi() {
                        Ok(pi) => Content::Pi(pi),
                        Err(_) => break,
                    }
                } else {
                    match self.parse_element() {
                        Ok(element) => Content::Element(element),
                        Err(_) => break,
                    }
                };
                self.flush_text(&mut pending, &mut contents);
                contents.push(item);
            } else {
                if self.scanner.at_end() || self.scanner.matches_literal("]]>") {
                    break;
                }
                if let Some(c) = self.scanner.peek() {
                    pending.push(c);
                }
                self.scanner.advance();
            }
        }
        self.flush_text(&mut pending, &mut contents);
        contents
    }

    /// Move a pending text run into the content list. Runs that are
    /// entirely whitespace are dropped unless the parser was configured
    /// to preserve them.
    fn flush_text(&self, pending: &mut String, contents: &mut Vec<Content>) {
        if pending.is_empty() {
            return;
        }
        if self.preserve_whitespace() || !pending.chars().all(chars::is_space) {
            contents.push(Content::Text(std::mem::take(pending)));
        } else {
            pending.clear();
        }
    }

    // - Comments

    // Comment ::= '<!--' ((Char - '-') | ('-' (Char - '-')))* '-->'
    pub(crate) fn parse_comment(&mut self) -> Result<String> {
        self.in_context("comment", |p| {
            p.attempt(|p| {
                p.must_literal("<!--")?;

                let mut text = String::new();
                while !p.scanner.matches_literal("--") {
                    match p.scanner.peek() {
                        Some(c) if chars::is_char(c) => {
                            text.push(c);
                            p.scanner.advance();
                        }
                        Some(_) => {
                            return Err(p.error_msg(
                                ErrorKind::UnexpectedCharacter,
                                "invalid character in comment",
                            ));
                        }
                        None => {
                            return Err(p.error_msg(
                                ErrorKind::UnterminatedConstruct,
                                "expected \"-->\" before end of input",
                            ));
                        }
                    }
                }

                p.must_literal("-->")?;
                Ok(text)
            })
        })
    }

    // - Processing Instructions

    // PI ::= '<?' PITarget (S (Char* - (Char* '?>' Char*)))? '?>'
    pub(crate) fn parse_pi(&mut self) -> Result<Pi> {
        self.in_context("processing instruction", |p| {
            p.attempt(|p| {
                p.must_literal("<?")?;
                let target = p.parse_pi_target()?;

                let mut instruction = String::new();
                if p.scanner.peek().is_some_and(chars::is_space) {
                    p.skip_space();
                    while !p.scanner.matches_literal("?>") && !p.scanner.at_end() {
                        match p.scanner.peek() {
                            Some(c) if chars::is_char(c) => {
                                instruction.push(c);
                                p.scanner.advance();
                            }
                            _ => break,
                        }
                    }
                }

                p.must_literal("?>")?;
                Ok(Pi {
                    target,
                    instruction,
                })
            })
        })
    }

    // PITarget ::= Name - (('X' | 'x') ('M' | 'm') ('L' | 'l'))
    //
    // Rejects exactly the names spelling "xml" case-insensitively; the
    // reserved check is an equality test, not a containment test, so
    // targets such as `max` stay legal.
    pub(crate) fn parse_pi_target(&mut self) -> Result<String> {
        self.attempt(|p| {
            let name = p.parse_name()?;
            if name.eq_ignore_ascii_case("xml") {
                return Err(p.error_msg(
                    ErrorKind::ReservedNameViolation,
                    "PI target must not be 'xml'",
                ));
            }
            Ok(name)
        })
    }

    // - CDATA Sections

    // CDSect ::= CDStart CData CDEnd
    pub(crate) fn parse_cdsect(&mut self) -> Result<String> {
        self.attempt(|p| {
            p.must_literal("<![CDATA[")?;
            let mut text = String::new();
            while !p.scanner.matches_literal("]]>") {
                let Some(c) = p.scanner.peek() else {
                    return Err(p.error_msg(
                        ErrorKind::UnterminatedConstruct,
                        "expected \"]]>\" before end of input",
                    ));
                };
                text.push(c);
                p.scanner.advance();
            }
            p.must_literal("]]>")?;
            Ok(text)
        })
    }

    // - Attribute Values

    // AttValue ::= '"' ([^<&"] | Reference)* '"' | "'" ([^<&'] | Reference)* "'"
    pub(crate) fn parse_att_value(&mut self) -> Result<AttValue> {
        self.attempt(|p| {
            let quote = p.parse_quote()?;

            let mut parts = Vec::new();
            let mut pending = String::new();
            loop {
                if p.scanner.matches_char('<') {
                    return Err(p.error_msg(ErrorKind::UnexpectedCharacter, "unexpected '<'"));
                }
                if p.scanner.matches_char(quote) || p.scanner.at_end() {
                    break;
                }

                if p.scanner.matches_char('&') {
                    if !pending.is_empty() {
                        parts.push(AttValuePart::Text(std::mem::take(&mut pending)));
                    }
                    parts.push(AttValuePart::Ref(p.parse_reference()?));
                } else if let Some(c) = p.scanner.peek() {
                    pending.push(c);
                    p.scanner.advance();
                }
            }
            if !pending.is_empty() {
                parts.push(AttValuePart::Text(pending));
            }

            p.must_char(quote)?;
            Ok(AttValue { parts })
        })
    }

    // - References

    // Reference ::= EntityRef | CharRef
    //
    // EntityRef is tried first; numeric forms always fail it, since '#'
    // is not a valid name start, after which CharRef runs from the same
    // position.
    pub(crate) fn parse_reference(&mut self) -> Result<Reference> {
        if let Ok(entity) = self.parse_entity_ref() {
            return Ok(Reference::Entity(entity));
        }
        let char_ref = self.parse_char_ref()?;
        Ok(Reference::Char(char_ref))
    }

    // EntityRef ::= '&' Name ';'
    pub(crate) fn parse_entity_ref(&mut self) -> Result<EntityRef> {
        self.attempt(|p| {
            p.must_char('&')?;
            let name = p.parse_name()?;
            p.must_char(';')?;
            Ok(EntityRef { name })
        })
    }

    // CharRef ::= '&#' [0-9]+ ';' | '&#x' [0-9a-fA-F]+ ';'
    //
    // Digits are collected as written; no range check is applied to the
    // code point they denote.
    pub(crate) fn parse_char_ref(&mut self) -> Result<CharRef> {
        self.attempt(|p| {
            let (base, digit_test): (CharRefBase, fn(char) -> bool) =
                if p.scanner.consume_literal("&#x") {
                    (CharRefBase::Hex, |c| c.is_ascii_hexdigit())
                } else if p.scanner.consume_literal("&#") {
                    (CharRefBase::Decimal, |c| c.is_ascii_digit())
                } else {
                    return Err(
                        p.error_msg(ErrorKind::UnexpectedCharacter, "expected '&#' or '&#x'")
                    );
                };

            let mut value = String::new();
            while let Some(c) = p.scanner.peek() {
                if digit_test(c) {
                    value.push(c);
                    p.scanner.advance();
                } else {
                    break;
                }
            }
            if value.is_empty() {
                return Err(p.error_msg(
                    ErrorKind::UnexpectedCharacter,
                    "expected at least one digit",
                ));
            }

            p.must_char(';')?;
            Ok(CharRef { value, base })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_element_empty_pair() {
        let mut p = Parser::new("<a></a>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.name, "a");
        assert!(element.contents.is_empty());
        assert!(!element.is_empty_tag);
    }

    #[test]
    fn test_parse_element_empty_tag() {
        let mut p = Parser::new("<a/>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.name, "a");
        assert!(element.contents.is_empty());
        assert!(element.is_empty_tag);
    }

    #[test]
    fn test_parse_element_name_mismatch() {
        let mut p = Parser::new("<a></b>");
        let err = p.parse_element().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::NameMismatch {
                start: "a".to_string(),
                end: "b".to_string(),
            }
        );
        assert_eq!(err.context(), "a tag");
    }

    #[test]
    fn test_parse_element_attributes_in_order() {
        let mut p = Parser::new(r#"<note id="1" lang='en'/>"#);
        let element = p.parse_element().unwrap();
        assert_eq!(element.attributes.len(), 2);
        assert_eq!(element.attributes[0].name, "id");
        assert_eq!(element.attributes[0].value.literal_text(), "1");
        assert_eq!(element.attributes[1].name, "lang");
        assert_eq!(element.attributes[1].value.literal_text(), "en");
    }

    #[test]
    fn test_parse_element_nested_content() {
        let mut p = Parser::new("<a>one<b/>two</a>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.contents.len(), 3);
        assert_eq!(element.contents[0], Content::Text("one".to_string()));
        assert!(matches!(element.contents[1], Content::Element(_)));
        assert_eq!(element.contents[2], Content::Text("two".to_string()));
    }

    #[test]
    fn test_parse_element_unclosed() {
        let mut p = Parser::new("<a>text");
        assert!(p.parse_element().is_err());

        let mut p = Parser::new("<a");
        assert!(p.parse_element().is_err());
    }

    #[test]
    fn test_whitespace_only_text_dropped_by_default() {
        let mut p = Parser::new("<a>\n  <b/>\n</a>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.contents.len(), 1);
        assert!(matches!(element.contents[0], Content::Element(_)));
    }

    #[test]
    fn test_whitespace_only_text_kept_when_configured() {
        let config = crate::parser::Config::new(true);
        let mut p = Parser::with_config("<a>\n  <b/>\n</a>", config);
        let element = p.parse_element().unwrap();
        assert_eq!(element.contents.len(), 3);
        assert_eq!(element.contents[0], Content::Text("\n  ".to_string()));
        assert_eq!(element.contents[2], Content::Text("\n".to_string()));
    }

    #[test]
    fn test_parse_contents_with_references() {
        let mut p = Parser::new("<a>x&amp;y&#65;</a>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.contents.len(), 4);
        assert_eq!(element.contents[0], Content::Text("x".to_string()));
        assert_eq!(
            element.contents[1],
            Content::Ref(Reference::Entity(EntityRef {
                name: "amp".to_string()
            }))
        );
        assert_eq!(element.contents[2], Content::Text("y".to_string()));
        assert_eq!(
            element.contents[3],
            Content::Ref(Reference::Char(CharRef {
                value: "65".to_string(),
                base: CharRefBase::Decimal,
            }))
        );
    }

    #[test]
    fn test_parse_contents_cdata_and_comment() {
        let mut p = Parser::new("<a><![CDATA[<raw>]]><!-- note --><?go here?></a>");
        let element = p.parse_element().unwrap();
        assert_eq!(element.contents.len(), 3);
        assert_eq!(element.contents[0], Content::CData("<raw>".to_string()));
        assert_eq!(element.contents[1], Content::Comment(" note ".to_string()));
        assert_eq!(
            element.contents[2],
            Content::Pi(Pi {
                target: "go".to_string(),
                instruction: "here".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_att_value_rejects_lt() {
        let mut p = Parser::new(r#""a<b""#);
        assert!(p.parse_att_value().is_err());
    }

    #[test]
    fn test_parse_att_value_with_reference() {
        let mut p = Parser::new(r#""a&lt;b""#);
        let value = p.parse_att_value().unwrap();
        assert_eq!(value.parts.len(), 3);
        assert_eq!(value.parts[0], AttValuePart::Text("a".to_string()));
        assert_eq!(
            value.parts[1],
            AttValuePart::Ref(Reference::Entity(EntityRef {
                name: "lt".to_string()
            }))
        );
        assert_eq!(value.parts[2], AttValuePart::Text("b".to_string()));
    }

    #[test]
    fn test_parse_att_value_unterminated() {
        let mut p = Parser::new(r#""abc"#);
        assert!(p.parse_att_value().is_err());
    }

    #[test]
    fn test_parse_comment() {
        let mut p = Parser::new("<!-- this is comment-->");
        assert_eq!(p.parse_comment().unwrap(), " this is comment");
    }

    #[test]
    fn test_parse_comment_errors() {
        let mut p = Parser::new("<-- aa -->");
        assert!(p.parse_comment().is_err());

        let mut p = Parser::new("<!-- aa --");
        let err = p.parse_comment().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedCharacter);

        let mut p = Parser::new("<!-- aa ");
        let err = p.parse_comment().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedConstruct);

        let mut p = Parser::new("<!-- \u{0} -->");
        assert!(p.parse_comment().is_err());
    }

    #[test]
    fn test_parse_pi() {
        let mut p = Parser::new("<?go run fast?>");
        let pi = p.parse_pi().unwrap();
        assert_eq!(pi.target, "go");
        assert_eq!(pi.instruction, "run fast");
    }

    #[test]
    fn test_parse_pi_without_instruction() {
        let mut p = Parser::new("<?go?>");
        let pi = p.parse_pi().unwrap();
        assert_eq!(pi.target, "go");
        assert_eq!(pi.instruction, "");
    }

    #[test]
    fn test_parse_pi_target_reserved() {
        for source in ["<?xml version?>", "<?XML version?>", "<?XmL version?>"] {
            let mut p = Parser::new(source);
            let err = p.parse_pi().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ReservedNameViolation, "{source}");
        }
    }

    #[test]
    fn test_parse_pi_target_containing_xml_letters_is_legal() {
        // target names merely containing x/m/l are fine
        let mut p = Parser::new("<?max value?>");
        assert_eq!(p.parse_pi().unwrap().target, "max");
    }

    #[test]
    fn test_parse_cdsect() {
        let mut p = Parser::new("<![CDATA[a < b && c]]>");
        assert_eq!(p.parse_cdsect().unwrap(), "a < b && c");

        let mut p = Parser::new("<![CDATA[never closed");
        let err = p.parse_cdsect().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedConstruct);
    }

    #[test]
    fn test_parse_entity_ref() {
        let mut p = Parser::new("&name;");
        assert_eq!(
            p.parse_entity_ref().unwrap(),
            EntityRef {
                name: "name".to_string()
            }
        );

        for source in ["name;", "&;", "&name"] {
            let mut p = Parser::new(source);
            assert!(p.parse_entity_ref().is_err(), "should fail: {source}");
        }
    }

    #[test]
    fn test_parse_char_ref_decimal() {
        let mut p = Parser::new("&#65;");
        let char_ref = p.parse_char_ref().unwrap();
        assert_eq!(char_ref.value, "65");
        assert_eq!(char_ref.base, CharRefBase::Decimal);
    }

    #[test]
    fn test_parse_char_ref_hex() {
        let mut p = Parser::new("&#x41;");
        let char_ref = p.parse_char_ref().unwrap();
        assert_eq!(char_ref.value, "41");
        assert_eq!(char_ref.base, CharRefBase::Hex);
    }

    #[test]
    fn test_parse_char_ref_errors() {
        for source in ["&#x;", "&#;", "&#xg1;", "&#65", "&name;"] {
            let mut p = Parser::new(source);
            assert!(p.parse_char_ref().is_err(), "should fail: {source}");
        }
    }

    #[test]
    fn test_parse_reference_backtracks_to_char_ref() {
        let mut p = Parser::new("&#x1F;");
        let reference = p.parse_reference().unwrap();
        assert_eq!(
            reference,
            Reference::Char(CharRef {
                value: "1F".to_string(),
                base: CharRefBase::Hex,
            })
        );
    }

    #[test]
    fn test_failed_reference_restores_position() {
        let mut p = Parser::new("&#x;");
        assert!(p.parse_reference().is_err());
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_failed_element_restores_position() {
        let mut p = Parser::new("<a><b></a>");
        assert!(p.parse_element().is_err());
        assert_eq!(p.scanner().offset(), 0);
    }

    #[test]
    fn test_parse_etag() {
        let mut p = Parser::new("</a >");
        assert_eq!(p.parse_etag().unwrap(), "a");

        let mut p = Parser::new("</a");
        assert!(p.parse_etag().is_err());
    }
}
