/// Returns at most the first `cap` characters of `s`, with no marker.
///
/// Counts Unicode scalar values so a code point is never split.
pub fn truncate_chars(s: &str, cap: usize) -> &str {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shortens `s` to `max` characters with a "..." suffix if needed.
///
/// Used for human-readable diagnostic output.
pub fn preview(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() < s.len() {
        format!("{cut}...")
    } else {
        cut.to_string()
    }
}
