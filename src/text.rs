//! Text normalization applied to user input before it reaches storage.

/// Maximum number of characters kept in a title.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum number of characters kept in a todo description or experience
/// content.
pub const BODY_MAX_CHARS: usize = 10_000;

/// Truncates `value` to at most `max_chars` characters.
///
/// Oversized input is shortened rather than rejected.
#[must_use]
pub fn truncate_chars(mut value: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = value.char_indices().nth(max_chars) {
        value.truncate(byte_index);
    }
    value
}

/// Trims `value`, returning `None` when nothing remains.
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
