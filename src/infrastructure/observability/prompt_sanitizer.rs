const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PREFIXES: [&str; 6] = [
    "Bearer ",
    "api_key=",
    "key=",
    "password=",
    "secret=",
    "token=",
];

/// Shortens user text and masks credentials before it reaches a log line.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    redact(&visible)
}

fn redact(text: &str) -> String {
    let mut result = text.to_string();

    for prefix in SENSITIVE_PREFIXES {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(prefix) {
            let value_start = search_from + found + prefix.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map_or(result.len(), |i| value_start + i);

            if value_end == value_start || &result[value_start..value_end] == "[REDACTED]" {
                search_from = value_end;
                continue;
            }

            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }

    result
}
