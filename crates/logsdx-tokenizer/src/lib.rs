//! Lossless classifying tokenizer for raw log lines.
//!
//! This crate segments a raw log line into an ordered sequence of classified
//! spans. It is the leaf of the logsdx styling pipeline: the schema matcher
//! and renderers consume its output shape but it depends on nothing.
//!
//! # Guarantees
//!
//! - **Lossless**: concatenating the `content` of every token reproduces the
//!   input byte for byte. No token is dropped, reordered, or mutated.
//! - **Total**: [`tokenize`] never panics and never fails, for any input
//!   string. An unmatched character is emitted as a single [`TokenKind::Char`]
//!   token, so scanning always terminates.
//! - **Deterministic**: rules are tried in a fixed priority order at each
//!   position and the first rule that matches wins, regardless of how long a
//!   lower-priority rule would have matched.
//!
//! # Example
//!
//! ```rust
//! use logsdx_tokenizer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("ERROR 42 occurred");
//! assert_eq!(tokens[0].kind, TokenKind::Level);
//! assert_eq!(tokens[0].content, "ERROR");
//!
//! // Lossless round trip:
//! let joined: String = tokens.iter().map(|t| t.content.as_str()).collect();
//! assert_eq!(joined, "ERROR 42 occurred");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Coarse lexical classification of a token.
///
/// `Word` and `Char` are fallback classifications for text no other rule
/// claimed. `Whitespace` and `Newline` are kept distinct from `Word` because
/// renderers treat them specially (`&nbsp;` expansion, `<br>` insertion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// ISO-style date-time or bare `HH:MM:SS` clock.
    Timestamp,
    /// Log level keyword (`TRACE` through `FATAL`), matched case-insensitively.
    Level,
    /// `key=value` pair, quoted or unquoted value.
    KeyValue,
    /// Brace-delimited JSON-like blob.
    Json,
    /// Bracket-delimited blob.
    Brackets,
    /// Quoted string (single or double quotes).
    Str,
    /// Bare decimal number, optionally signed and fractional.
    Number,
    /// Run of tabs, a run of two or more spaces, or a single space.
    Whitespace,
    /// Line break (`\n`, `\r`, or `\r\n` as one token).
    Newline,
    /// Run of word characters no earlier rule claimed.
    Word,
    /// Single-character catch-all.
    Char,
}

impl TokenKind {
    /// Stable lowercase name for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Timestamp => "timestamp",
            TokenKind::Level => "level",
            TokenKind::KeyValue => "key-value",
            TokenKind::Json => "json",
            TokenKind::Brackets => "brackets",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Word => "word",
            TokenKind::Char => "char",
        }
    }

    /// True for whitespace and newline tokens, which matchers and renderers
    /// special-case.
    pub fn is_blank(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

/// A classified, content-preserving span of a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Exact, non-empty substring of the original line.
    pub content: String,
    /// Lexical classification assigned by the rule that claimed the span.
    pub kind: TokenKind,
}

impl Token {
    /// Creates a token of the given kind.
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }
}

/// One classification rule: an anchored pattern tried at the current scan
/// position. Earlier rules in [`RULES`] win over later ones.
struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        // Patterns are compile-time constants; a failure here is a programming
        // error caught by the rule-table test below.
        Self {
            kind,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

/// The fixed, ordered rule table. Order is part of the output contract:
/// overlapping candidates at the same position are resolved by rule priority,
/// not match length.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            TokenKind::Timestamp,
            r"^(?:\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?(?:Z|[+-]\d{2}:?\d{2})?|\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?)",
        ),
        Rule::new(
            TokenKind::Level,
            r"^(?i:TRACE|DEBUG|INFO|WARNING|WARN|ERROR|FATAL|CRITICAL|PANIC)\b",
        ),
        Rule::new(
            TokenKind::KeyValue,
            r#"^[A-Za-z_][A-Za-z0-9_.-]*=(?:"[^"\n]*"|'[^'\n]*'|[^\s"']+)"#,
        ),
        Rule::new(TokenKind::Json, r"^\{(?:[^{}]|\{[^{}]*\})*\}"),
        Rule::new(TokenKind::Brackets, r"^\[(?:[^\[\]]|\[[^\[\]]*\])*\]"),
        Rule::new(TokenKind::Str, r#"^(?:"[^"\n]*"|'[^'\n]*')"#),
        Rule::new(TokenKind::Number, r"^-?\d+(?:\.\d+)?\b"),
        Rule::new(TokenKind::Whitespace, r"^\t+"),
        Rule::new(TokenKind::Whitespace, r"^ {2,}"),
        Rule::new(TokenKind::Whitespace, r"^ "),
        Rule::new(TokenKind::Newline, r"^(?:\r\n|\n|\r)"),
        Rule::new(TokenKind::Word, r"^\w+"),
    ]
});

/// Splits a line into an ordered, lossless sequence of classified tokens.
///
/// Scanning proceeds left to right over the unconsumed suffix. At each
/// position the rules in the fixed table are tried in priority order; the
/// first match wins and consumes its full length. When no rule matches, the
/// next character is emitted as a [`TokenKind::Char`] token, which guarantees
/// both termination and the lossless round trip.
///
/// The empty string yields an empty token list.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        let matched = RULES.iter().find_map(|rule| {
            rule.pattern
                .find(rest)
                .map(|m| Token::new(rule.kind, m.as_str()))
        });

        match matched {
            Some(token) => {
                pos += token.content.len();
                tokens.push(token);
            }
            None => {
                // Catch-all: one character, whatever it is. `rest` is
                // non-empty here, so `next()` always yields.
                let ch = rest.chars().next().unwrap_or('\u{fffd}');
                pos += ch.len_utf8();
                tokens.push(Token::new(TokenKind::Char, ch.to_string()));
            }
        }
    }

    tokens
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn round_trip_any_string(line in "\\PC*") {
            let joined: String = tokenize(&line)
                .iter()
                .map(|t| t.content.as_str())
                .collect();
            prop_assert_eq!(joined, line);
        }

        #[test]
        fn round_trip_with_whitespace(line in "[ \t\na-z0-9=\"\\[\\]{}:.-]{0,80}") {
            let joined: String = tokenize(&line)
                .iter()
                .map(|t| t.content.as_str())
                .collect();
            prop_assert_eq!(joined, line);
        }

        #[test]
        fn tokens_are_never_empty(line in "\\PC{0,60}") {
            for token in tokenize(&line) {
                prop_assert!(!token.content.is_empty());
            }
        }

        #[test]
        fn blank_tokens_hold_only_blank_content(line in "[ \t\nA-Za-z0-9]{0,60}") {
            for token in tokenize(&line) {
                if token.kind.is_blank() {
                    prop_assert!(token.content.chars().all(char::is_whitespace));
                }
            }
        }

        #[test]
        fn determinism(line in "\\PC{0,60}") {
            prop_assert_eq!(tokenize(&line), tokenize(&line));
        }
    }
}
