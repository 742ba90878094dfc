//! Rendering styled tokens to output encodings.
//!
//! The encoding set is closed: ANSI escape sequences for terminals, and HTML
//! in two flavors (inline CSS, or class names for an external stylesheet).
//! Dispatch is a plain match so adding an encoding is a compile-visible
//! change at every call site.
//!
//! Rendering is pure string production. It never inspects the environment
//! and never fails: every styled token stream renders to some output.

pub mod ansi;
pub mod html;

pub use ansi::{render_boxed, BoxOptions, BoxStyle};

use crate::matcher::StyledToken;
use crate::theme::WhitespaceMode;

/// Prefix for every generated CSS class name.
pub const CLASS_PREFIX: &str = "logsdx-";

/// How HTML output carries its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStyleFormat {
    /// `style` attributes with full CSS declarations. Self-contained.
    InlineCss,
    /// `class` attributes using [`CLASS_PREFIX`]-prefixed names; the host
    /// supplies the stylesheet.
    ClassName,
}

/// Target encoding for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ansi,
    Html(HtmlStyleFormat),
}

/// Options controlling one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Escape HTML-significant characters in token content. On by default;
    /// turning it off is for hosts that sanitize upstream.
    pub escape_html: bool,
    pub white_space: WhitespaceMode,
    pub new_line: WhitespaceMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Ansi,
            escape_html: true,
            white_space: WhitespaceMode::Preserve,
            new_line: WhitespaceMode::Preserve,
        }
    }
}

impl RenderOptions {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    pub fn white_space(mut self, mode: WhitespaceMode) -> Self {
        self.white_space = mode;
        self
    }

    pub fn new_line(mut self, mode: WhitespaceMode) -> Self {
        self.new_line = mode;
        self
    }
}

/// Renders a styled token stream in the requested encoding.
pub fn render(tokens: &[StyledToken], options: &RenderOptions) -> String {
    match options.format {
        OutputFormat::Ansi => ansi::render(tokens, options),
        OutputFormat::Html(style_format) => html::render(tokens, style_format, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.format, OutputFormat::Ansi);
        assert!(options.escape_html);
        assert_eq!(options.white_space, WhitespaceMode::Preserve);
        assert_eq!(options.new_line, WhitespaceMode::Preserve);
    }

    #[test]
    fn builder_chains() {
        let options = RenderOptions::default()
            .format(OutputFormat::Html(HtmlStyleFormat::ClassName))
            .escape_html(false)
            .white_space(WhitespaceMode::Trim);
        assert_eq!(
            options.format,
            OutputFormat::Html(HtmlStyleFormat::ClassName)
        );
        assert!(!options.escape_html);
        assert_eq!(options.white_space, WhitespaceMode::Trim);
    }
}
