//! HTML rendering.
//!
//! Styled tokens become `<span>` elements; unstyled content passes through
//! as escaped text. Whitespace tokens render as one `&nbsp;` per character
//! so runs survive HTML whitespace collapsing, and each newline token
//! becomes a `<br>`.
//!
//! Content escaping is on by default and covers `&`, `<`, `>`, `"` and `'`,
//! so log lines containing markup render inert.

use logsdx_tokenizer::TokenKind;

use crate::matcher::StyledToken;
use crate::style::StyleDescriptor;
use crate::theme::WhitespaceMode;

use super::{HtmlStyleFormat, RenderOptions, CLASS_PREFIX};

/// Renders a styled token stream as HTML.
pub fn render(
    tokens: &[StyledToken],
    style_format: HtmlStyleFormat,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    for token in tokens {
        match token.kind {
            TokenKind::Whitespace => {
                if options.white_space == WhitespaceMode::Preserve {
                    for _ in token.content.chars() {
                        out.push_str("&nbsp;");
                    }
                }
            }
            TokenKind::Newline => {
                if options.new_line == WhitespaceMode::Preserve {
                    out.push_str("<br>");
                }
            }
            _ => {
                let content = if options.escape_html {
                    escape_html(&token.content)
                } else {
                    token.content.clone()
                };
                match &token.style {
                    Some(style) => out.push_str(&span(style, &content, style_format)),
                    None => out.push_str(&content),
                }
            }
        }
    }
    out
}

/// Escapes HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn span(style: &StyleDescriptor, content: &str, format: HtmlStyleFormat) -> String {
    match format {
        HtmlStyleFormat::InlineCss => {
            let mut css = format!("color:{}", style.color_value().css());
            for flag in style.flags() {
                css.push(';');
                css.push_str(flag.css());
            }
            format!("<span style=\"{}\">{}</span>", css, content)
        }
        HtmlStyleFormat::ClassName => {
            let mut classes = Vec::new();
            let mut inline_color = None;
            // Only named palette colors have stable class names; anything
            // else keeps its exact color inline.
            match style.color_value().class_name() {
                Some(name) => classes.push(format!("{}{}", CLASS_PREFIX, name)),
                None => inline_color = Some(style.color_value().css()),
            }
            for flag in style.flags() {
                classes.push(format!("{}{}", CLASS_PREFIX, flag.class_suffix()));
            }

            let mut attrs = String::new();
            if !classes.is_empty() {
                attrs.push_str(&format!(" class=\"{}\"", classes.join(" ")));
            }
            if let Some(color) = inline_color {
                attrs.push_str(&format!(" style=\"color:{}\"", color));
            }
            format!("<span{}>{}</span>", attrs, content)
        }
    }
}
