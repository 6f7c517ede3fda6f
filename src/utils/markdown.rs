//! Helpers for Telegram MarkdownV2 text.

/// Characters MarkdownV2 reserves outside of code blocks.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes user-provided text (names, dates, category labels) so it renders
/// literally in a MarkdownV2 message.
///
/// # Example
/// ```
/// use photo_tournament_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("Cats (top-3)!"), "Cats \\(top\\-3\\)\\!");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes text placed inside a MarkdownV2 code block, where only the
/// backtick and the backslash are special.
pub fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_user_names() {
        assert_eq!(escape_markdown("ann_lee"), "ann\\_lee");
        assert_eq!(escape_markdown("*Star* [Admin]"), "\\*Star\\* \\[Admin\\]");
        assert_eq!(escape_markdown("Мария 🌸"), "Мария 🌸");
    }

    #[test]
    fn test_escape_last_seen_timestamp() {
        assert_eq!(escape_markdown("2024-03-09 07:05:00"), "2024\\-03\\-09 07:05:00");
    }

    #[test]
    fn test_escape_every_reserved_character() {
        let escaped = escape_markdown("_*[]()~`>#+-=|{}.!");
        assert_eq!(escaped, "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("Landscapes 🏞 12"), "Landscapes 🏞 12");
    }

    #[test]
    fn test_escape_code() {
        assert_eq!(escape_code("a`b"), "a\\`b");
        assert_eq!(escape_code("a\\b"), "a\\\\b");
        assert_eq!(escape_code("Ann_Lee *5*"), "Ann_Lee *5*");
    }
}
