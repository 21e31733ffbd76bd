//! Character classification predicates for the XML 1.0 grammar
//!
//! Pure functions over single code points, consumed by the parser. The
//! grammar engine only depends on these predicates existing and being
//! consistent between calls; it never classifies characters itself.

/// XML whitespace: exactly U+0020, U+0009, U+000D, U+000A
pub const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Letter production (Unicode letters)
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

/// Digit production (Unicode decimal digits)
pub fn is_digit(c: char) -> bool {
    c.is_numeric()
}

/// Valid document character per the XML 1.0 Char production
pub const fn is_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Combining marks admitted by the NameChar production
pub const fn is_combining_char(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{0345}'
        | '\u{0360}'..='\u{0361}'
        | '\u{0483}'..='\u{0486}'
        | '\u{0591}'..='\u{05BD}'
        | '\u{0610}'..='\u{065F}'
        | '\u{0E31}'..='\u{0E3A}'
        | '\u{0F71}'..='\u{0F84}'
        | '\u{20D0}'..='\u{20DC}'
        | '\u{302A}'..='\u{302F}')
}

/// Extender characters admitted by the NameChar production
pub const fn is_extender_char(c: char) -> bool {
    matches!(c,
        '\u{00B7}' | '\u{02D0}' | '\u{02D1}' | '\u{0387}' | '\u{0640}'
        | '\u{0E46}' | '\u{0EC6}' | '\u{3005}'
        | '\u{3031}'..='\u{3035}'
        | '\u{309D}'..='\u{309E}'
        | '\u{30FC}'..='\u{30FE}')
}

/// First character of a Name: Letter | '_' | ':'
pub fn is_name_start_char(c: char) -> bool {
    is_letter(c) || c == '_' || c == ':'
}

/// NameChar ::= Letter | Digit | '.' | '-' | '_' | ':' | CombiningChar | Extender
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || is_digit(c)
        || matches!(c, '.' | '-')
        || is_combining_char(c)
        || is_extender_char(c)
}

/// PubidChar production
pub const fn is_pubid_char(c: char) -> bool {
    matches!(c,
        '\u{20}' | '\u{D}' | '\u{A}'
        | 'a'..='z' | 'A'..='Z' | '0'..='9'
        | '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':' | '='
        | '?' | ';' | '!' | '*' | '#' | '@' | '$' | '_' | '%')
}

/// Either literal quote character
pub const fn is_quote_char(c: char) -> bool {
    matches!(c, '\'' | '"')
}
