//! # LogsDX - Log Line Styling Library
//!
//! `logsdx` styles log lines for terminals and HTML. A line is tokenized
//! losslessly, each token is matched against a theme's schema (word matches,
//! ordered pattern rules, default style), and the styled stream is rendered
//! as ANSI escape sequences or HTML.
//!
//! ## Core Concepts
//!
//! - [`tokenize`]: Lossless, deterministic log-line tokenizer
//! - [`Theme`]: Named schema of word/pattern styles with light/dark mode
//! - [`LogProcessor`]: Configure once, style many lines
//! - [`OutputFormat`]: ANSI, or HTML with inline CSS or class names
//! - Background detection: [`theme::detect_background`] with confidence-ranked
//!   environment signals, plus [`theme::adjust_theme_for_terminal`] to repair
//!   themes that conflict with the detected background
//!
//! ## Quick Start
//!
//! ```rust
//! use logsdx::{LogProcessor, ProcessorOptions};
//!
//! let processor = LogProcessor::new(ProcessorOptions::default().theme_name("nord"));
//! println!("{}", processor.process_line("2024-01-15T10:30:00Z ERROR disk full"));
//! ```
//!
//! ## Themes
//!
//! Six built-in themes ship in [`theme::registry`]; custom themes come from
//! YAML/JSON documents or the builder:
//!
//! ```rust
//! use logsdx::style::StyleDescriptor;
//! use logsdx::theme::Theme;
//!
//! let theme = Theme::named("mine")
//!     .default_style(StyleDescriptor::color("white").unwrap())
//!     .word("ERROR", StyleDescriptor::color("red").unwrap().bold());
//! ```
//!
//! ## Guarantees
//!
//! - Tokenization is total and lossless: token contents concatenate back to
//!   the exact input.
//! - Styling is presentation-only: a bad theme name falls back to the
//!   default theme rather than blocking output.
//! - The same input, theme, and options always produce byte-identical
//!   output.
//! - HTML output escapes content by default, so log data cannot inject
//!   markup.

pub mod error;
pub mod matcher;
pub mod processor;
pub mod render;
pub mod style;
pub mod theme;

pub use error::ThemeError;
pub use matcher::{apply_theme, StyledToken};
pub use processor::{LogProcessor, ProcessorOptions, ThemeSelector};
pub use render::{
    render, render_boxed, BoxOptions, BoxStyle, HtmlStyleFormat, OutputFormat, RenderOptions,
};
pub use style::{ColorValue, StyleDescriptor, StyleFlag};
pub use theme::{Theme, ThemeMode};

pub use logsdx_tokenizer::{tokenize, Token, TokenKind};
