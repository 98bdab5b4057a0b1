//! Text preparation for XML character data
//!
//! The writer escapes markup characters itself. What escaping
//! cannot fix are characters XML 1.0 forbids outright (most C0 controls,
//! U+FFFE, U+FFFF); those are dropped here before text reaches the writer.

use std::borrow::Cow;

/// Check if a character may appear in XML 1.0 character data
#[must_use]
pub const fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Remove characters that cannot be represented in XML 1.0
///
/// Line endings are normalized to `\n` the way XML parsers read them back,
/// so `\r\n` and a lone `\r` both become `\n`.
#[must_use]
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| is_xml_char(c) && c != '\r') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
            }
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Escape text for inclusion in the HTML description block
///
/// Escapes all five markup characters so feed text always shows
/// literally in the popup.
#[must_use]
pub fn html_text(text: &str) -> String {
    quick_xml::escape::escape(xml_safe(text).as_ref()).into_owned()
}
