//! ANSI terminal rendering.
//!
//! Each styled token becomes one self-contained span: a single CSI sequence
//! carrying the foreground color and flag parameters, the content, then a
//! full reset. Spans never rely on state bleeding between tokens, so any
//! subsequence of the output is safe to cut and re-paste.

use unicode_width::UnicodeWidthStr;

use crate::matcher::StyledToken;
use crate::style::{ColorValue, StyleDescriptor};
use crate::theme::WhitespaceMode;

use super::RenderOptions;

/// Renders a styled token stream as ANSI text.
pub fn render(tokens: &[StyledToken], options: &RenderOptions) -> String {
    let mut out = String::new();
    for token in tokens {
        if skip(token, options) {
            continue;
        }
        match &token.style {
            Some(style) => out.push_str(&span(style, &token.content)),
            None => out.push_str(&token.content),
        }
    }
    out
}

fn skip(token: &StyledToken, options: &RenderOptions) -> bool {
    use logsdx_tokenizer::TokenKind;
    match token.kind {
        TokenKind::Whitespace => options.white_space == WhitespaceMode::Trim,
        TokenKind::Newline => options.new_line == WhitespaceMode::Trim,
        _ => false,
    }
}

/// One span: `ESC [ fg ; flags m content ESC [ 0 m`.
fn span(style: &StyleDescriptor, content: &str) -> String {
    let mut params = style.color_value().fg_code();
    for flag in style.flags() {
        params.push(';');
        params.push_str(flag.ansi_code());
    }
    format!("\x1b[{}m{}\x1b[0m", params, content)
}

/// Border character set for boxed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Rounded,
    Square,
    Double,
    /// ASCII-only, for terminals without box-drawing glyphs.
    Simple,
}

struct BoxChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BoxStyle {
    fn chars(&self) -> BoxChars {
        match self {
            BoxStyle::Rounded => BoxChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BoxStyle::Square => BoxChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            BoxStyle::Double => BoxChars {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
            BoxStyle::Simple => BoxChars {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            },
        }
    }
}

/// Options for [`render_boxed`].
#[derive(Debug, Clone)]
pub struct BoxOptions {
    pub style: BoxStyle,
    /// Centered in the top border when present.
    pub title: Option<String>,
    /// Inner width. When `None` the widest content line decides.
    pub width: Option<usize>,
    /// Background color painted across the interior.
    pub background: Option<ColorValue>,
    /// Spaces between the border and the content, per side.
    pub padding: usize,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            style: BoxStyle::Rounded,
            title: None,
            width: None,
            background: None,
            padding: 1,
        }
    }
}

impl BoxOptions {
    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn background(mut self, color: ColorValue) -> Self {
        self.background = Some(color);
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// Wraps already-rendered ANSI content in a border.
///
/// Widths are measured with escape sequences stripped, so styled content
/// lines up with the border. Multi-line content produces one interior row
/// per line.
pub fn render_boxed(content: &str, options: &BoxOptions) -> String {
    let chars = options.style.chars();
    let lines: Vec<&str> = content.lines().collect();

    let content_width = lines
        .iter()
        .map(|line| console::measure_text_width(line))
        .max()
        .unwrap_or(0);
    let inner = options
        .width
        .unwrap_or(content_width + 2 * options.padding)
        .max(content_width + 2 * options.padding);

    let mut out = String::new();
    out.push_str(&top_border(&chars, inner, options.title.as_deref()));
    out.push('\n');

    for line in &lines {
        let visible = console::measure_text_width(line);
        let left = " ".repeat(options.padding);
        let right = " ".repeat(inner - visible - options.padding);
        let interior = format!("{}{}{}", left, line, right);
        let interior = match &options.background {
            Some(color) => format!("\x1b[{}m{}\x1b[0m", color.bg_code(), interior),
            None => interior,
        };
        out.push(chars.vertical);
        out.push_str(&interior);
        out.push(chars.vertical);
        out.push('\n');
    }

    out.push(chars.bottom_left);
    for _ in 0..inner {
        out.push(chars.horizontal);
    }
    out.push(chars.bottom_right);
    out
}

fn top_border(chars: &BoxChars, inner: usize, title: Option<&str>) -> String {
    let mut out = String::new();
    out.push(chars.top_left);
    match title {
        Some(title) if !title.is_empty() => {
            // " title " centered in the horizontal run.
            let label = format!(" {} ", title);
            let label_width = label.width();
            if label_width >= inner {
                out.push_str(&label);
            } else {
                let left = (inner - label_width) / 2;
                let right = inner - label_width - left;
                for _ in 0..left {
                    out.push(chars.horizontal);
                }
                out.push_str(&label);
                for _ in 0..right {
                    out.push(chars.horizontal);
                }
            }
        }
        _ => {
            for _ in 0..inner {
                out.push(chars.horizontal);
            }
        }
    }
    out.push(chars.top_right);
    out
}
