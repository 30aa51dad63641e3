//! Text cleaners applied to raw document text before script generation.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("url regex")
});
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w\.-]+@[\w\.-]+\.[\w]+").expect("email regex"));
static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^a-zA-Z0-9\s.,!?;:"']"#).expect("special chars regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</\s*(script|style)\s*>").expect("script regex")
});
// Void elements plus anchors/images, whose targets must not leak into the text
static STRIPPED_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(link|meta|a|img)\b[^>]*>").expect("tag regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("html tag regex"));

static MD_IMAGE_WITH_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"!\[.*?\]\(.*?(".*?")?\)"#).expect("markdown image regex"));
static MD_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(```|~~~).*$").expect("fence regex"));
static MD_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("image regex"));
static MD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("link regex"));
static MD_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ {0,3}#{1,6}[ \t]*").expect("heading regex"));
static MD_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ {0,3}>[ \t]?").expect("quote regex"));
static MD_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ {0,3}([-*_][ \t]*){3,}$").expect("rule regex"));
static MD_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*([-*+]|\d+\.)[ \t]+").expect("list regex"));
static MD_STRONG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*\n]+)\*\*|__([^_\n]+)__").expect("strong regex")
});
static MD_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("emphasis regex"));
static MD_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`+([^`]*)`+").expect("code regex"));
static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\r?\n)+").expect("newline regex"));

const HTML_TEXT_WIDTH: usize = 1_000;

/// Remove URLs, e-mail addresses, special characters and extra whitespace.
///
/// ```
/// use docpod_maker::preprocessing::clean_with_regex;
///
/// assert_eq!(clean_with_regex("\u{a0}Hello,   world! http://example.com"), "Hello, world!");
/// ```
pub fn clean_with_regex(text: &str) -> String {
    let text = URL_PATTERN.replace_all(text, "");
    let text = EMAIL_PATTERN.replace_all(&text, "");
    let text = SPECIAL_CHARS.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Extract the visible text of an HTML page, then [`clean_with_regex`].
///
/// `script`, `style`, `link` and `meta` elements are dropped.
pub fn clean_html(html: &str) -> String {
    let html = SCRIPT_STYLE.replace_all(html, "");
    let html = STRIPPED_TAGS.replace_all(&html, "");
    let text = match html2text::from_read(html.as_bytes(), HTML_TEXT_WIDTH) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("html2text failed ({err}), stripping tags instead");
            ANY_TAG.replace_all(&html, " ").into_owned()
        }
    };
    clean_with_regex(&text)
}

/// Remove Markdown images, then [`clean_with_regex`].
pub fn clean_markdown(markdown: &str) -> String {
    let text = MD_IMAGE_WITH_TITLE.replace_all(markdown, "");
    clean_with_regex(&text)
}

/// Convert Markdown (as produced for PDF and DOCX input) to plain text.
///
/// Markup is removed and text kept; runs of newlines become one space.
pub fn markdown_to_text(markdown: &str) -> String {
    let text = MD_FENCE.replace_all(markdown, "");
    let text = MD_IMAGE.replace_all(&text, "");
    let text = MD_LINK.replace_all(&text, "$1");
    let text = ANY_TAG.replace_all(&text, "");
    let text = MD_RULE.replace_all(&text, "");
    let text = MD_HEADING.replace_all(&text, "");
    let text = MD_QUOTE.replace_all(&text, "");
    let text = MD_LIST.replace_all(&text, "");
    let text = MD_STRONG.replace_all(&text, "$1$2");
    let text = MD_EMPHASIS.replace_all(&text, "$1");
    let text = MD_CODE.replace_all(&text, "$1");
    NEWLINES.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_cleaner_strips_urls_and_spaces() {
        assert_eq!(
            clean_with_regex("\u{a0}Hello,   world! http://example.com"),
            "Hello, world!"
        );
    }

    #[test]
    fn regex_cleaner_strips_emails_and_symbols() {
        assert_eq!(
            clean_with_regex("Contact: jane.doe@example.org #now @ 50% off"),
            "Contact: now 50 off"
        );
    }

    #[test]
    fn regex_cleaner_keeps_quotes_and_punctuation() {
        let text = r#"He said: "it's fine", then left; why?"#;
        assert_eq!(clean_with_regex(text), text);
    }

    #[test]
    fn html_cleaner_extracts_text() {
        assert_eq!(
            clean_html("<html><body><p>Hello,  world!  </p></body></html>"),
            "Hello, world!"
        );
    }

    #[test]
    fn html_cleaner_drops_scripts_styles_and_meta() {
        let html = r#"<html><head><meta charset="utf-8"><link rel="stylesheet" href="a.css">
            <style>p { color: red; }</style><script>var x = 1;</script></head>
            <body><p>Visible text</p></body></html>"#;
        assert_eq!(clean_html(html), "Visible text");
    }

    #[test]
    fn html_cleaner_keeps_link_text_only() {
        let html = r#"<p>Read <a href="https://example.com/docs">the docs</a> today</p>"#;
        assert_eq!(clean_html(html), "Read the docs today");
    }

    #[test]
    fn markdown_cleaner_removes_images() {
        assert_eq!(
            clean_markdown(r#"# Title   with image ![alt text](image.jpg "Image Title")"#),
            "Title with image"
        );
    }

    #[test]
    fn markdown_to_text_flattens_markup() {
        assert_eq!(
            markdown_to_text("# Heading\nSome text with `code` and <pre>preformatted</pre>"),
            "Heading Some text with code and preformatted"
        );
    }

    #[test]
    fn markdown_to_text_keeps_link_labels_and_emphasis_text() {
        let markdown = "## Intro\n\n- **Bold** point\n- *soft* point with [a link](http://x.y)\n\n> quoted";
        assert_eq!(
            markdown_to_text(markdown),
            "Intro Bold point soft point with a link quoted"
        );
    }
}
