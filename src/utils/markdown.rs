/// Utility functions for handling Telegram MarkdownV2 formatting
/// 
/// MarkdownV2 requires escaping of special characters to prevent formatting issues.
/// Escapes are also honoured inside entities, so free text may sit between `*`.
/// Escapes markdown special characters for MarkdownV2 parsing mode
/// 
/// # Arguments
/// * `text` - The text to escape
/// 
/// # Returns
/// A string with all markdown special characters escaped with backslashes
/// 
/// # Example
/// ```
/// use teacher_finder_bot::utils::markdown::escape_markdown;
/// 
/// let text = "ауд_5 *new* (301)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "ауд\\_5 \\*new\\* \\(301\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
                | '|' | '{' | '}' | '.' | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
