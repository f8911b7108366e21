use std::borrow::Cow;

use regex::Regex;

/// The regular expression a search actually runs. Queries are free text, so
/// one that is not valid regex syntax (an unbalanced parenthesis, say) is
/// escaped and matched literally.
pub fn search_regex(pattern: &str) -> Cow<'_, str> {
    match Regex::new(pattern) {
        Ok(_) => Cow::Borrowed(pattern),
        Err(e) => {
            tracing::debug!(error = %e, "Search pattern is not a valid regex, matching literally");
            Cow::Owned(regex::escape(pattern))
        }
    }
}
