//! Text clean-up shared by the collectors.

use once_cell::sync::Lazy;
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Steps applied by [`format_text`] after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub strip_tags: bool,
    pub strip_quotes: bool,
    pub render_markdown: bool,
}

impl TextFormat {
    /// Titles and labels: markup removed, no HTML output.
    pub const PLAIN: TextFormat = TextFormat {
        strip_tags: true,
        strip_quotes: true,
        render_markdown: false,
    };

    /// Abstracts: markdown rendered to HTML.
    pub const HTML: TextFormat = TextFormat {
        strip_tags: false,
        strip_quotes: true,
        render_markdown: true,
    };
}

/// Trims `text` and applies the steps enabled in `format`.
///
/// Blank input is returned as an empty string without further processing.
pub fn format_text(text: &str, format: TextFormat) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut text = if format.strip_tags {
        strip_tags(text)
    } else {
        text.to_string()
    };

    if format.strip_quotes {
        text = strip_wrapping_quotes(&text).to_string();
    }

    if format.render_markdown {
        text = render_markdown(&text);
    }

    text
}

/// Removes anything that looks like an HTML tag.
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Drops one pair of `"` when the text both starts and ends with one.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    match text.strip_prefix('"') {
        Some(rest) if text.ends_with('"') => rest.strip_suffix('"').unwrap_or(rest),
        _ => text,
    }
}

pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::empty());
    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Capitalises every word: a letter following a non-letter is upper-cased,
/// every other letter lower-cased. `"o'neil-smith"` becomes `"O'Neil-Smith"`.
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if previous_is_letter {
            output.extend(ch.to_lowercase());
        } else {
            output.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_alphabetic();
    }
    output
}

/// Reduces a `http(s)://twitter.com/<handle>` URL to the handle.
pub fn twitter_handle(value: &str) -> &str {
    if value.starts_with("https://twitter.com/") || value.starts_with("http://twitter.com/") {
        value.rsplit('/').next().unwrap_or(value)
    } else {
        value
    }
}
