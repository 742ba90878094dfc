//! Theme matching: pairing tokens with style descriptors.
//!
//! Matching is a pure function from a token stream and a theme schema to a
//! styled token stream. Content is never altered — concatenating the styled
//! tokens' content reproduces the input line exactly.
//!
//! Precedence per token, highest first:
//!
//! 1. word match — exact content lookup, case-insensitive,
//! 2. pattern match — the first declared rule whose regex matches,
//! 3. the schema's default style.
//!
//! Whitespace and newline tokens are structural: the default style never
//! paints the gaps between words. A rule that explicitly targets them (say
//! a `^\s+$` pattern) still applies.

use logsdx_tokenizer::{Token, TokenKind};

use crate::style::StyleDescriptor;
use crate::theme::Theme;

/// A token paired with the style the theme selected for it. `style` is
/// `None` for structural tokens no rule targets and for content the theme
/// says nothing about when no default style is set.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledToken {
    pub content: String,
    pub kind: TokenKind,
    pub style: Option<StyleDescriptor>,
}

impl StyledToken {
    /// Whether this token is whitespace or a newline.
    pub fn is_blank(&self) -> bool {
        self.kind.is_blank()
    }
}

/// Applies a theme's schema to a token stream.
pub fn apply_theme(tokens: Vec<Token>, theme: &Theme) -> Vec<StyledToken> {
    tokens
        .into_iter()
        .map(|token| {
            let style = select_style(&token.content, token.kind.is_blank(), theme);
            StyledToken {
                content: token.content,
                kind: token.kind,
                style,
            }
        })
        .collect()
}

/// Selects the style for one token's content, or `None` when the theme has
/// nothing to say about it. Blank tokens skip only the default-style step;
/// explicit word and pattern matches still apply to them.
fn select_style(content: &str, is_blank: bool, theme: &Theme) -> Option<StyleDescriptor> {
    let schema = theme.schema();

    if let Some(style) = schema.match_words.get(&content.to_lowercase()) {
        return Some(style.clone());
    }

    for rule in &schema.match_patterns {
        if rule.is_match(content) {
            return Some(rule.style().clone());
        }
    }

    if is_blank {
        None
    } else {
        schema.default_style.clone()
    }
}
