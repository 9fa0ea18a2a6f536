//! Colour codes.
//!
//! Message templates and token names use `&` followed by a code
//! character (`&a`, `&l`, `&r`, ...). Hosts render the section sign
//! form (`§a`), so everything user-facing passes through [`colorize`].

const SECTION: char = '\u{00A7}';

fn is_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

/// Rewrites `&<code>` to `§<code>`. An `&` not followed by a valid code
/// is left alone, so `Fish & Chips` survives.
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if let Some(&next) = chars.peek() {
                if is_code(next) {
                    out.push(SECTION);
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Removes colour codes in either form.
///
/// Used wherever names are compared, so `&6Gold Pass` and `Gold Pass`
/// are the same name.
pub fn strip_color(text: &str) -> String {
    let colored = colorize(text);
    let mut out = String::with_capacity(colored.len());
    let mut chars = colored.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION {
            if chars.peek().is_some_and(|n| is_code(*n)) {
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_translates_codes() {
        assert_eq!(colorize("&aGreen &lBold"), "\u{00A7}aGreen \u{00A7}lBold");
        assert_eq!(colorize("&F"), "\u{00A7}F");
    }

    #[test]
    fn test_colorize_keeps_bare_ampersand() {
        assert_eq!(colorize("Fish & Chips"), "Fish & Chips");
        assert_eq!(colorize("trailing &"), "trailing &");
        assert_eq!(colorize("&z"), "&z");
    }

    #[test]
    fn test_strip_color_handles_both_forms() {
        assert_eq!(strip_color("&6Gold \u{00A7}lPass"), "Gold Pass");
        assert_eq!(strip_color("plain"), "plain");
    }
}
