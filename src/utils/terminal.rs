//! Sanitizing thread text for single-line terminal output
//!
//! Subjects, tag names and colors come from external thread files and the tag
//! store. Escape sequences in them could recolor the terminal or move the
//! cursor, and embedded newlines would break the one-row-per-thread layout.

/// Make `text` safe to print inside a single output row
///
/// - ANSI CSI sequences (`ESC [ ... letter`) are removed
/// - Newlines, carriage returns and tabs become a single space
/// - Every other control character is dropped
pub fn sanitize_line(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        match ch {
            '\n' | '\r' | '\t' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        assert_eq!(sanitize_line("\x1b[31mQ4 Budget\x1b[0m Review"), "Q4 Budget Review");
    }

    #[test]
    fn test_strips_cursor_movement() {
        assert_eq!(sanitize_line("\x1b[2J\x1b[HFake subject"), "Fake subject");
    }

    #[test]
    fn test_flattens_line_breaks() {
        assert_eq!(sanitize_line("Line 1\nLine 2\r\tEnd"), "Line 1 Line 2  End");
    }

    #[test]
    fn test_drops_other_control_characters() {
        assert_eq!(sanitize_line("Alert!\x07\x08"), "Alert!");
        assert_eq!(sanitize_line("\x1bnot csi"), "not csi");
    }

    #[test]
    fn test_keeps_unicode() {
        assert_eq!(sanitize_line("Launch 🚀 \x1b[1mplan\x1b[0m 测试"), "Launch 🚀 plan 测试");
    }

    #[test]
    fn test_plain_and_empty() {
        assert_eq!(sanitize_line("Plain text"), "Plain text");
        assert_eq!(sanitize_line(""), "");
    }
}
