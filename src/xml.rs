//! XML text escaping for generated package parts.
use crate::error::{Error, Result};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared by every slide and part writer
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Whether `c` matches the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape XML special characters in text and attribute values.
///
/// Fails with [`Error::Xml`] if the text holds a character XML 1.0 cannot
/// represent at all, such as a C0 control character.
///
/// # Examples
///
/// ```
/// use lottery_slides::xml::escape_xml;
/// assert_eq!(escape_xml("Smith & Sons")?, "Smith &amp; Sons");
/// assert_eq!(escape_xml("O'Neil <WL>")?, "O&apos;Neil &lt;WL&gt;");
/// assert!(escape_xml("A\u{1}da").is_err());
/// # Ok::<(), lottery_slides::Error>(())
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Result<String> {
    if let Some(c) = s.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::Xml(format!(
            "text {:?} contains U+{:04X}, which is not allowed in XML",
            s, c as u32
        )));
    }
    Ok(XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
}

/// XML declaration shared by every part.
pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
