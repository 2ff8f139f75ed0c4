//! Terminal output sanitization
//!
//! Message text comes from an exported archive and is shown verbatim in the
//! terminal viewer. Escape sequences embedded in a message could clear the
//! screen, move the cursor or retitle the window, so every piece of message
//! text goes through [`strip_ansi_codes`] before it reaches a ratatui `Span`.
//! This is the terminal counterpart of HTML-escaping in the HTML renderer.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips ANSI escape sequences and control characters from a string
///
/// Removes CSI sequences (`ESC [ ... letter`), OSC sequences
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`) and any other control character
/// except tab and newline.
///
/// # Examples
///
/// ```
/// use lastseen::utils::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mhi\x1b[0m"), "hi");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == BEL {
                            break;
                        }
                        if next_ch == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes_in_message() {
        let text = "see \x1b[1;31mthis\x1b[0m now";
        assert_eq!(strip_ansi_codes(text), "see this now");
    }

    #[test]
    fn test_strip_screen_clear() {
        assert_eq!(strip_ansi_codes("\x1b[2J\x1b[Hhello"), "hello");
    }

    #[test]
    fn test_strip_osc_title_sequences() {
        assert_eq!(strip_ansi_codes("a\x1b]0;pwned\x07b"), "ab");
        assert_eq!(strip_ansi_codes("a\x1b]0;pwned\x1b\\b"), "ab");
    }

    #[test]
    fn test_strip_carriage_return_and_bell() {
        assert_eq!(strip_ansi_codes("line\r\nnext\x07"), "line\nnext");
    }

    #[test]
    fn test_keeps_unicode_and_tabs() {
        let text = "Привет 👋\tмир";
        assert_eq!(strip_ansi_codes(text), text);
    }

    #[test]
    fn test_unterminated_sequence_is_dropped() {
        assert_eq!(strip_ansi_codes("ok\x1b[31"), "ok");
    }
}
