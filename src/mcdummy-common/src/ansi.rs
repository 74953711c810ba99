//! ANSI escape code handling utilities.
//!
//! Console records may carry color; the log file must not.

use std::io::IsTerminal;

/// Check if stdout should output colors/ANSI codes.
///
/// Returns false when stdout is not a terminal or `NO_COLOR` is set
/// (https://no-color.org/).
pub fn should_colorize() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    std::io::stdout().is_terminal()
}

/// Strip ANSI escape codes from a string.
///
/// Removes CSI sequences (colors, cursor movement, clearing) and OSC
/// sequences terminated by BEL or ST.
pub fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(&next) = chars.peek() {
                if next == '[' {
                    chars.next();
                    // CSI ends at the first letter.
                    while let Some(&c) = chars.peek() {
                        chars.next();
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                    continue;
                } else if next == ']' {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes_basic() {
        let colored = "\x1b[91mRed\x1b[0m Normal";
        assert_eq!(strip_ansi_codes(colored), "Red Normal");
    }

    #[test]
    fn test_strip_ansi_codes_compound_sgr() {
        let colored = "\x1b[33;1;3mGold\x1b[0m \x1b[96mAqua\x1b[0m";
        assert_eq!(strip_ansi_codes(colored), "Gold Aqua");
    }

    #[test]
    fn test_strip_ansi_codes_osc_title() {
        assert_eq!(strip_ansi_codes("\x1b]0;title\x07text"), "text");
    }

    #[test]
    fn test_strip_ansi_codes_no_codes() {
        assert_eq!(strip_ansi_codes("Saved the game"), "Saved the game");
        assert_eq!(strip_ansi_codes(""), "");
    }
}
