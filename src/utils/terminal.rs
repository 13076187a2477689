//! Sanitizing backend text before it reaches the terminal
//!
//! Answers, professor names and reviews come from the backend verbatim. Escape sequences in
//! them could move the cursor, recolor the screen or set the window title while the TUI is
//! drawing, so every backend-supplied string goes through [`sanitize_for_display`] first.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips CSI (`ESC [ ... letter`) and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`) sequences
/// plus control characters other than tab and newline.
///
/// # Examples
///
/// ```
/// use prof_finder::utils::terminal::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[31mDr. Red\x1b[0m"), "Dr. Red");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                // Lone ESC or two-byte sequence: drop ESC and the selector
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }

        if ch == '\r' {
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
    fn test_strips_color_codes() {
        assert_eq!(sanitize_for_display("\x1b[1;32mGreen\x1b[0m text"), "Green text");
    }

    #[test]
    fn test_strips_cursor_movement() {
        assert_eq!(sanitize_for_display("\x1b[2J\x1b[HCleared"), "Cleared");
    }

    #[test]
    fn test_strips_osc_title_with_bel() {
        assert_eq!(sanitize_for_display("\x1b]0;pwned\x07Dr. Smith"), "Dr. Smith");
    }

    #[test]
    fn test_strips_osc_with_string_terminator() {
        assert_eq!(sanitize_for_display("a\x1b]8;;http://x\x1b\\b"), "ab");
    }

    #[test]
    fn test_keeps_newlines_and_tabs_drops_carriage_returns() {
        assert_eq!(sanitize_for_display("Line 1\r\nLine 2\tTabbed"), "Line 1\nLine 2\tTabbed");
    }

    #[test]
    fn test_drops_bell_and_backspace() {
        assert_eq!(sanitize_for_display("Alert\x07!\x08"), "Alert!");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(sanitize_for_display("4.5⭐ \x1b[31mÉlève\x1b[0m 教授"), "4.5⭐ Élève 教授");
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(sanitize_for_display("text\x1b"), "text");
    }
}
