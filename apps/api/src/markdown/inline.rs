//! Inline-run resolution: `**bold**`, `*italic*` and `` `code` `` spans.
//!
//! Resolution is lexical substitution in three fixed passes over the same string:
//! bold, then italic on the already-substituted text, then code. Replacement markup
//! contains no markers, so earlier passes are inert to later ones. Overlapping
//! markers (`**a*b**c*`) resolve by pass order, not by a grammar.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Failed to compile bold regex"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("Failed to compile italic regex"));
static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`(.+?)`").expect("Failed to compile code span regex"));

/// Resolves emphasis markers in `text` into `<strong>`, `<em>` and `<code>` spans.
///
/// The text is HTML-escaped first. An unmatched marker has no closing partner for
/// its pattern and stays literal.
pub fn resolve_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    let italicized = ITALIC.replace_all(&bolded, "<em>$1</em>");
    CODE.replace_all(&italicized, "<code>$1</code>").into_owned()
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
