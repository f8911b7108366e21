const MARGIN_CHARS: [char; 2] = [' ', '\t'];

/// Removes the leading whitespace shared by every non-blank line.
/// Whitespace-only lines are emptied and do not affect the margin.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !is_blank(line))
        .map(|line| &line[..line.len() - line.trim_start_matches(MARGIN_CHARS).len()])
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dedents and trims generated text, then wraps it in single newlines.
pub fn format_generated_text(raw: &str) -> String {
    format!("\n{}\n", dedent(raw).trim())
}

fn is_blank(line: &str) -> bool {
    line.trim_matches(MARGIN_CHARS).trim_end_matches('\r').is_empty()
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}
