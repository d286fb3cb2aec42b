//! Typing shortcuts
//!
//!     Markdown-like delimiters rewritten into tag spans before any tag resolution:
//!
//!         - ***text***   → {bold}{italic}text{.italic}{.bold}
//!         - **text**     → {bold}text{.bold}
//!         - *text*       → {italic}text{.italic}
//!         - __text__     → {underline}text{.underline}
//!         - ~~text~~     → {strike}text{.strike}
//!         - `text`       → {code}text{.code}
//!         - "- text" and "1. text" at the start of a line → {item}text{.item}
//!
//!     Asterisk runs are tried longest first, since each shorter pattern is a sub-pattern of
//!     the longer ones. Spans never cross a line break and must be non-empty; a delimiter
//!     without a partner stays literal text.
//!
//!     Expansion runs once per top-level parse and never on content already split out by
//!     the transpiler.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

struct Shortcut {
    pattern: Lazy<Regex>,
    open: &'static str,
    close: &'static str,
}

macro_rules! shortcut {
    ($pattern:literal, $open:literal, $close:literal) => {
        Shortcut {
            pattern: Lazy::new(|| Regex::new($pattern).unwrap()),
            open: $open,
            close: $close,
        }
    };
}

/// Applied in order
static SHORTCUTS: [Shortcut; 8] = [
    shortcut!(r"\*\*\*(.+?)\*\*\*", "{bold}{italic}", "{.italic}{.bold}"),
    shortcut!(r"\*\*(.+?)\*\*", "{bold}", "{.bold}"),
    shortcut!(r"\*(.+?)\*", "{italic}", "{.italic}"),
    shortcut!(r"__(.+?)__", "{underline}", "{.underline}"),
    shortcut!(r"~~(.+?)~~", "{strike}", "{.strike}"),
    shortcut!(r"`(.+?)`", "{code}", "{.code}"),
    shortcut!(r"(?m)^- ([^\r\n]+)", "{item}", "{.item}"),
    shortcut!(r"(?m)^[0-9]+\. ([^\r\n]+)", "{item}", "{.item}"),
];

/// Rewrite every shortcut in `text` into its tag span
pub fn expand(text: &str) -> Cow<'_, str> {
    let mut expanded = Cow::Borrowed(text);
    for shortcut in SHORTCUTS.iter() {
        if !shortcut.pattern.is_match(&expanded) {
            continue;
        }
        let replaced = shortcut
            .pattern
            .replace_all(&expanded, |caps: &Captures| {
                format!("{}{}{}", shortcut.open, &caps[1], shortcut.close)
            })
            .into_owned();
        expanded = Cow::Owned(replaced);
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(expand("**bold**"), "{bold}bold{.bold}");
        assert_eq!(expand("*italic*"), "{italic}italic{.italic}");
        assert_eq!(
            expand("**a** and *b*"),
            "{bold}a{.bold} and {italic}b{.italic}"
        );
    }

    #[test]
    fn test_triple_asterisk_is_bold_italic() {
        assert_eq!(expand("***x***"), "{bold}{italic}x{.italic}{.bold}");
    }

    #[test]
    fn test_other_delimiters() {
        assert_eq!(expand("__u__"), "{underline}u{.underline}");
        assert_eq!(expand("~~s~~"), "{strike}s{.strike}");
        assert_eq!(expand("`c`"), "{code}c{.code}");
    }

    #[test]
    fn test_list_lines() {
        assert_eq!(
            expand("- one\n- two\n3. three\nnot - a item"),
            "{item}one{.item}\n{item}two{.item}\n{item}three{.item}\nnot - a item"
        );
    }

    #[test]
    fn test_unmatched_delimiters_stay_literal() {
        assert_eq!(expand("2 * 3"), "2 * 3");
        assert_eq!(expand("a ** b"), "a ** b");
        assert_eq!(expand("**"), "**");
        assert_eq!(expand("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn test_no_shortcuts_borrows() {
        assert!(matches!(expand("plain {text}"), Cow::Borrowed(_)));
    }
}
