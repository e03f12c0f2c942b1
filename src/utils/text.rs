//! Text shaping for captions and message bodies.

/// Cut `text` to at most `limit` characters. Strings already within the
/// limit come back unchanged.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Append the hashtag line below the text, separated by a blank line.
#[must_use]
pub fn build_caption(text: &str, hashtags: &str) -> String {
    let hashtags = hashtags.trim();
    if hashtags.is_empty() {
        text.to_string()
    } else {
        format!("{text}\n\n{hashtags}")
    }
}

/// Join a quote and its author as `quote — author`. A missing author drops
/// the separator.
#[must_use]
pub fn attribute(quote: &str, author: &str) -> String {
    format!("{} — {}", quote.trim(), author.trim())
        .trim_matches(|c: char| c == ' ' || c == '—')
        .to_string()
}

/// Tidy model output into a single quote: strip wrapping quotation marks and
/// collapse whitespace.
#[must_use]
pub fn clean_generated(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’'))
        .trim()
        .to_string()
}
