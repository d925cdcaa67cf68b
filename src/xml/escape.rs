use std::borrow::Cow;

const REPLACEMENT: char = '\u{FFFD}';

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '\'' | '"') || is_whitespace_control(c) || !is_xml_char(c)
}

fn is_whitespace_control(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// XML 1.0 `Char` production. Surrogates cannot appear in a `str`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Make `input` safe inside an attribute value (either quote style) or text
/// content.
///
/// `& < > ' "` become entity references. Tab, LF and CR become character
/// references so attribute-value normalization cannot fold them into
/// spaces. Characters XML 1.0 forbids outright become U+FFFD.
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if !is_xml_char(c) => out.push(REPLACEMENT),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
