//! # Assistant Markup Rendering
//!
//! File: cli/src/render.rs
//!
//! Assistant text carries two rendering hints: `**span**` for bold and `\n` for
//! a line break. Adapters turn them into HTML (widget) or terminal styling.
//!
use console::style;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern compiles");
}

/// HTML for a chat bubble. Text is escaped before markup is applied.
pub fn to_html(content: &str) -> String {
    let escaped = escape_html(content);
    BOLD.replace_all(&escaped, "<strong>$1</strong>")
        .replace('\n', "<br>")
}

/// Terminal text. With `color` off the markers are simply removed.
pub fn to_terminal(content: &str, color: bool) -> String {
    BOLD.replace_all(content, |caps: &Captures| {
        if color {
            style(&caps[1]).bold().force_styling(true).to_string()
        } else {
            caps[1].to_string()
        }
    })
    .into_owned()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_bold_and_breaks() {
        assert_eq!(
            to_html("**Tip:** save drafts\nthen publish"),
            "<strong>Tip:</strong> save drafts<br>then publish"
        );
    }

    #[test]
    fn test_to_html_bold_is_non_greedy() {
        assert_eq!(
            to_html("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_to_html_escapes_user_markup() {
        assert_eq!(
            to_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_unclosed_marker_is_left_alone() {
        assert_eq!(to_html("**open"), "**open");
        assert_eq!(to_terminal("**open", false), "**open");
    }

    #[test]
    fn test_to_terminal_plain() {
        assert_eq!(
            to_terminal("**Bookmarks** are easy\n• tap", false),
            "Bookmarks are easy\n• tap"
        );
    }

    #[test]
    fn test_to_terminal_color_wraps_in_ansi() {
        let out = to_terminal("**Bold**", true);
        assert!(out.contains("Bold"));
        assert!(out.contains("\u{1b}["));
        assert!(!out.contains("**"));
    }
}
