use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<head>\w)-[ \t]*\n[ \t]*(?P<tail>\w)").expect("static pattern")
});

/// Cleans up raw OCR output for storage.
///
/// Compatibility characters (ligatures, full-width forms) are folded by NFKC
/// and control characters other than line breaks are dropped. Words split
/// across a line break with a hyphen are rejoined. Blank lines collapse to a
/// single paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.nfkc() {
        match ch {
            '\n' | '\t' => normalized.push(ch),
            // Page and vertical-tab breaks start a new paragraph.
            '\x0c' | '\x0b' => normalized.push_str("\n\n"),
            c if c.is_control() => {}
            c => normalized.push(c),
        }
    }

    let joined = HYPHENATED_LINE_BREAK.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in joined.split('\n') {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&words.join(" "));
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}
