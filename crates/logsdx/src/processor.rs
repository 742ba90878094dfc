//! The processor: configure once, style many lines.
//!
//! [`LogProcessor`] resolves its theme at construction (name lookup,
//! light/dark pair selection against the detected background, optional
//! terminal adaptation) and then styles lines statelessly: every
//! [`LogProcessor::process_line`] call is tokenize, match, render with no
//! carry-over between calls.
//!
//! ```rust
//! use logsdx::processor::{LogProcessor, ProcessorOptions};
//!
//! let processor = LogProcessor::new(ProcessorOptions::default());
//! let out = processor.process_line("ERROR disk full");
//! assert!(out.contains("ERROR"));
//! ```

use crate::matcher::apply_theme;
use crate::render::{render, OutputFormat, RenderOptions};
use crate::theme::{
    adjust_theme_for_terminal, detect_background, registry, BackgroundInfo, Theme,
};
use logsdx_tokenizer::tokenize;

/// How the processor picks its theme.
#[derive(Debug, Clone)]
pub enum ThemeSelector {
    /// A built-in theme by name. Unknown names fall back to the default
    /// theme; styling never blocks output.
    Name(String),
    /// A caller-supplied theme.
    Inline(Theme),
    /// One theme per background scheme; resolved against the detected
    /// background at construction.
    Pair { light: Box<Theme>, dark: Box<Theme> },
}

/// Processor configuration. All fields have working defaults: the built-in
/// dark theme rendered as ANSI with HTML escaping on.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    pub theme: ThemeSelector,
    pub format: OutputFormat,
    pub escape_html: bool,
    /// Repair the theme's colors against the detected terminal background.
    pub auto_adjust_terminal: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            theme: ThemeSelector::Name("default-dark".to_string()),
            format: OutputFormat::Ansi,
            escape_html: true,
            auto_adjust_terminal: false,
        }
    }
}

impl ProcessorOptions {
    pub fn theme_name(mut self, name: impl Into<String>) -> Self {
        self.theme = ThemeSelector::Name(name.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = ThemeSelector::Inline(theme);
        self
    }

    pub fn theme_pair(mut self, light: Theme, dark: Theme) -> Self {
        self.theme = ThemeSelector::Pair {
            light: Box::new(light),
            dark: Box::new(dark),
        };
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    pub fn auto_adjust_terminal(mut self, adjust: bool) -> Self {
        self.auto_adjust_terminal = adjust;
        self
    }
}

/// A configured styling pipeline. Cheap to clone; each call is stateless.
#[derive(Debug, Clone)]
pub struct LogProcessor {
    theme: Theme,
    render_options: RenderOptions,
}

impl LogProcessor {
    /// Builds a processor, detecting the background only when the
    /// configuration needs it (a theme pair or terminal adaptation).
    pub fn new(options: ProcessorOptions) -> Self {
        let needs_background = options.auto_adjust_terminal
            || matches!(options.theme, ThemeSelector::Pair { .. });
        let background = needs_background.then(detect_background);
        Self::build(options, background.as_ref())
    }

    /// Builds a processor against an explicit background. This is the
    /// deterministic path: no environment inspection happens.
    pub fn with_background(options: ProcessorOptions, background: &BackgroundInfo) -> Self {
        Self::build(options, Some(background))
    }

    fn build(options: ProcessorOptions, background: Option<&BackgroundInfo>) -> Self {
        let is_dark = background.map(BackgroundInfo::is_dark).unwrap_or(true);

        let theme = match options.theme {
            ThemeSelector::Name(name) => registry::builtin(&name)
                .unwrap_or_else(registry::default_theme)
                .clone(),
            ThemeSelector::Inline(theme) => theme,
            ThemeSelector::Pair { light, dark } => {
                if is_dark {
                    *dark
                } else {
                    *light
                }
            }
        };

        let theme = if options.auto_adjust_terminal {
            adjust_theme_for_terminal(&theme, is_dark)
        } else {
            theme
        };

        let render_options = RenderOptions::default()
            .format(options.format)
            .escape_html(options.escape_html)
            .white_space(theme.schema().white_space)
            .new_line(theme.schema().new_line);

        Self {
            theme,
            render_options,
        }
    }

    /// The resolved theme, after pair selection and adaptation.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Styles one chunk of input. Newlines are tokens like any other, so
    /// multi-line chunks work; "line" is the common case, not a limit.
    pub fn process_line(&self, line: &str) -> String {
        let tokens = apply_theme(tokenize(line), &self.theme);
        render(&tokens, &self.render_options)
    }
}
