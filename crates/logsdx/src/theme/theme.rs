//! Theme struct: declarative styling rules for log lines.
//!
//! A theme is immutable configuration data: a default style, a map of exact
//! word matches, and an ordered list of pattern rules, plus metadata (mode,
//! whitespace handling). It is loaded once, validated fully before first use,
//! and never mutated by the pipeline.
//!
//! # Construction Methods
//!
//! ## Programmatic (Builder API)
//!
//! ```rust
//! use logsdx::theme::Theme;
//! use logsdx::style::StyleDescriptor;
//!
//! let theme = Theme::named("minimal")
//!     .default_style(StyleDescriptor::color("white").unwrap())
//!     .word("ERROR", StyleDescriptor::color("red").unwrap().bold())
//!     .pattern("digits", r"^\d+$", StyleDescriptor::color("blue").unwrap())
//!     .unwrap();
//! assert_eq!(theme.name(), "minimal");
//! ```
//!
//! ## From YAML or JSON
//!
//! ```rust
//! use logsdx::theme::Theme;
//!
//! let theme = Theme::from_yaml(r##"
//! name: custom-dark
//! mode: dark
//! schema:
//!   defaultStyle:
//!     color: "#f8f8f2"
//!   matchWords:
//!     ERROR:
//!       color: red
//!       styleCodes: [bold]
//!   matchPatterns:
//!     - name: number
//!       pattern: "^-?\\d+$"
//!       options:
//!         color: "#bd93f9"
//! "##).unwrap();
//! assert_eq!(theme.name(), "custom-dark");
//! ```
//!
//! Validation is strict: a malformed document is rejected with a
//! [`ThemeError`] before any line is processed, never partially applied.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde_yaml::Value;

use crate::error::ThemeError;
use crate::style::{ColorValue, StyleDescriptor, StyleFlag};

/// Declared light/dark disposition of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the detected background.
    Auto,
}

impl ThemeMode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "auto" => Some(ThemeMode::Auto),
            _ => None,
        }
    }
}

/// How whitespace or newline tokens are carried into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceMode {
    #[default]
    Preserve,
    Trim,
}

impl WhitespaceMode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "preserve" => Some(WhitespaceMode::Preserve),
            "trim" => Some(WhitespaceMode::Trim),
            _ => None,
        }
    }
}

/// One pattern rule: a named regular expression evaluated against token
/// content. Declaration order is part of the theme's contract — the first
/// matching rule wins.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    pattern: Regex,
    style: StyleDescriptor,
}

impl PatternRule {
    /// Compiles a pattern rule, rejecting invalid expressions.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        style: StyleDescriptor,
    ) -> Result<Self, ThemeError> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| ThemeError::InvalidPattern {
            name: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name,
            pattern,
            style,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pattern.as_str() == other.pattern.as_str()
            && self.style == other.style
    }
}

/// The styling rules of a theme.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// Style for tokens no word or pattern rule matched. Never applied to
    /// whitespace or newline tokens.
    pub default_style: Option<StyleDescriptor>,
    /// Exact word matches. Keys are stored lowercased; lookup is
    /// case-insensitive.
    pub match_words: HashMap<String, StyleDescriptor>,
    /// Ordered pattern rules; first match wins.
    pub match_patterns: Vec<PatternRule>,
    /// Whitespace token handling at render time.
    pub white_space: WhitespaceMode,
    /// Newline token handling at render time.
    pub new_line: WhitespaceMode,
    /// Presentation hint for hosts that draw line gutters.
    pub line_numbers: bool,
}

/// A named, immutable collection of styling rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    description: Option<String>,
    mode: Option<ThemeMode>,
    schema: Schema,
}

impl Theme {
    /// Creates an empty theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            mode: None,
            schema: Schema::default(),
        }
    }

    /// Sets the description, returning `self` for chaining.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the declared mode.
    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the default style for otherwise unmatched tokens.
    pub fn default_style(mut self, style: StyleDescriptor) -> Self {
        self.schema.default_style = Some(style);
        self
    }

    /// Adds an exact word match. Matching is case-insensitive.
    pub fn word(mut self, word: impl AsRef<str>, style: StyleDescriptor) -> Self {
        self.schema
            .match_words
            .insert(word.as_ref().to_lowercase(), style);
        self
    }

    /// Appends a pattern rule. Rules are evaluated in the order added.
    pub fn pattern(
        mut self,
        name: impl Into<String>,
        pattern: &str,
        style: StyleDescriptor,
    ) -> Result<Self, ThemeError> {
        self.schema
            .match_patterns
            .push(PatternRule::new(name, pattern, style)?);
        Ok(self)
    }

    /// Sets whitespace token handling.
    pub fn white_space(mut self, mode: WhitespaceMode) -> Self {
        self.schema.white_space = mode;
        self
    }

    /// Sets newline token handling.
    pub fn new_line(mut self, mode: WhitespaceMode) -> Self {
        self.schema.new_line = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The declared mode, if any.
    pub fn mode(&self) -> Option<ThemeMode> {
        self.mode
    }

    /// The declared mode, or the mode inferred from the theme name: a name
    /// containing "light" is treated as a light theme, anything else as dark.
    pub fn effective_mode(&self) -> ThemeMode {
        match self.mode {
            Some(ThemeMode::Light) => ThemeMode::Light,
            Some(ThemeMode::Dark) => ThemeMode::Dark,
            Some(ThemeMode::Auto) | None => {
                if self.name.to_lowercase().contains("light") {
                    ThemeMode::Light
                } else {
                    ThemeMode::Dark
                }
            }
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns a copy of this theme with every rule color passed through `f`.
    /// Colors for which `f` returns `None` are left untouched. This is the
    /// seam the terminal adapter uses to repair low-contrast colors without
    /// swapping the theme.
    pub fn map_colors(&self, f: impl Fn(&ColorValue) -> Option<ColorValue>) -> Theme {
        let recolor = |style: &StyleDescriptor| match f(style.color_value()) {
            Some(color) => style.recolor(color),
            None => style.clone(),
        };

        let mut theme = self.clone();
        theme.schema.default_style = self.schema.default_style.as_ref().map(&recolor);
        theme.schema.match_words = self
            .schema
            .match_words
            .iter()
            .map(|(word, style)| (word.clone(), recolor(style)))
            .collect();
        theme.schema.match_patterns = self
            .schema
            .match_patterns
            .iter()
            .map(|rule| PatternRule {
                name: rule.name.clone(),
                pattern: rule.pattern.clone(),
                style: recolor(&rule.style),
            })
            .collect();
        theme
    }

    /// Loads a theme from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Loads a theme from JSON content.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ThemeError::Parse(e.to_string()))?;
        let value: Value =
            serde_yaml::to_value(&value).map_err(|e| ThemeError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Loads a theme from a file. `.json` files are parsed as JSON, anything
    /// else as YAML. When the document carries no name, the file stem is used.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let mut theme = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        if theme.name == DEFAULT_THEME_NAME {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                theme.name = stem.to_string();
            }
        }
        Ok(theme)
    }

    /// Validates a raw document into a typed theme.
    ///
    /// Structural requirements: `matchWords` must be a mapping, `matchPatterns`
    /// a list, `defaultStyle` an object, `lineNumbers` a boolean; every color
    /// must parse. Any violation rejects the whole document.
    pub fn from_value(value: &Value) -> Result<Self, ThemeError> {
        let doc = value
            .as_mapping()
            .ok_or_else(|| ThemeError::Parse("theme document must be a mapping".into()))?;

        let name = match doc.get("name") {
            Some(v) => v
                .as_str()
                .ok_or(ThemeError::InvalidField {
                    field: "name",
                    expected: "a string",
                })?
                .to_string(),
            None => DEFAULT_THEME_NAME.to_string(),
        };

        let description = match doc.get("description") {
            Some(v) => Some(
                v.as_str()
                    .ok_or(ThemeError::InvalidField {
                        field: "description",
                        expected: "a string",
                    })?
                    .to_string(),
            ),
            None => None,
        };

        let mode = match doc.get("mode") {
            Some(v) => {
                let s = v.as_str().ok_or(ThemeError::InvalidField {
                    field: "mode",
                    expected: "light, dark, or auto",
                })?;
                Some(ThemeMode::parse(s).ok_or_else(|| ThemeError::UnknownMode(s.to_string()))?)
            }
            None => None,
        };

        let schema = match doc.get("schema") {
            Some(v) => parse_schema(v)?,
            None => Schema::default(),
        };

        Ok(Self {
            name,
            description,
            mode,
            schema,
        })
    }
}

/// Name given to documents that carry none; [`Theme::from_file`] replaces it
/// with the file stem.
const DEFAULT_THEME_NAME: &str = "custom";

fn parse_schema(value: &Value) -> Result<Schema, ThemeError> {
    let map = value.as_mapping().ok_or(ThemeError::InvalidField {
        field: "schema",
        expected: "a mapping",
    })?;

    let mut schema = Schema::default();

    if let Some(v) = map.get("defaultStyle") {
        if !v.is_mapping() && !v.is_string() {
            return Err(ThemeError::InvalidField {
                field: "defaultStyle",
                expected: "a style object",
            });
        }
        schema.default_style = Some(parse_style(v, "defaultStyle")?);
    }

    if let Some(v) = map.get("matchWords") {
        let words = v.as_mapping().ok_or(ThemeError::InvalidField {
            field: "matchWords",
            expected: "a mapping of word to style",
        })?;
        for (word, style) in words {
            let word = word.as_str().ok_or(ThemeError::InvalidField {
                field: "matchWords",
                expected: "string keys",
            })?;
            schema.match_words.insert(
                word.to_lowercase(),
                parse_style(style, &format!("matchWords.{}", word))?,
            );
        }
    }

    if let Some(v) = map.get("matchPatterns") {
        let patterns = v.as_sequence().ok_or(ThemeError::InvalidField {
            field: "matchPatterns",
            expected: "a list of pattern rules",
        })?;
        for (i, entry) in patterns.iter().enumerate() {
            let rule = entry.as_mapping().ok_or(ThemeError::InvalidField {
                field: "matchPatterns",
                expected: "a list of pattern rules",
            })?;
            let name = rule
                .get("name")
                .and_then(|n| n.as_str())
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("pattern-{}", i));
            let pattern = rule
                .get("pattern")
                .and_then(|p| p.as_str())
                .ok_or(ThemeError::InvalidField {
                    field: "matchPatterns",
                    expected: "rules with a string pattern",
                })?;
            let style = rule.get("options").ok_or(ThemeError::InvalidField {
                field: "matchPatterns",
                expected: "rules with style options",
            })?;
            schema.match_patterns.push(PatternRule::new(
                name.clone(),
                pattern,
                parse_style(style, &format!("matchPatterns.{}", name))?,
            )?);
        }
    }

    if let Some(v) = map.get("whiteSpace") {
        let s = v.as_str().ok_or(ThemeError::InvalidField {
            field: "whiteSpace",
            expected: "preserve or trim",
        })?;
        schema.white_space = WhitespaceMode::parse(s).ok_or(ThemeError::InvalidField {
            field: "whiteSpace",
            expected: "preserve or trim",
        })?;
    }

    if let Some(v) = map.get("newLine") {
        let s = v.as_str().ok_or(ThemeError::InvalidField {
            field: "newLine",
            expected: "preserve or trim",
        })?;
        schema.new_line = WhitespaceMode::parse(s).ok_or(ThemeError::InvalidField {
            field: "newLine",
            expected: "preserve or trim",
        })?;
    }

    if let Some(v) = map.get("lineNumbers") {
        schema.line_numbers = v.as_bool().ok_or(ThemeError::InvalidField {
            field: "lineNumbers",
            expected: "a boolean",
        })?;
    }

    Ok(schema)
}

/// Parses a style value: either `{color, styleCodes}` or a bare color string
/// shorthand.
fn parse_style(value: &Value, context: &str) -> Result<StyleDescriptor, ThemeError> {
    if let Some(color) = value.as_str() {
        let color = ColorValue::parse(color).map_err(|_| ThemeError::InvalidColor {
            context: context.to_string(),
            value: color.to_string(),
        })?;
        return Ok(StyleDescriptor::new(color));
    }

    let map = value.as_mapping().ok_or(ThemeError::InvalidField {
        field: "style",
        expected: "a style object or color string",
    })?;

    let color_str = map
        .get("color")
        .and_then(|c| c.as_str())
        .ok_or_else(|| ThemeError::InvalidColor {
            context: context.to_string(),
            value: "<missing>".to_string(),
        })?;
    let color = ColorValue::parse(color_str).map_err(|_| ThemeError::InvalidColor {
        context: context.to_string(),
        value: color_str.to_string(),
    })?;

    let mut style = StyleDescriptor::new(color);
    if let Some(codes) = map.get("styleCodes") {
        let codes = codes.as_sequence().ok_or(ThemeError::InvalidField {
            field: "styleCodes",
            expected: "a list of flag names",
        })?;
        for code in codes {
            let name = code.as_str().ok_or(ThemeError::InvalidField {
                field: "styleCodes",
                expected: "a list of flag names",
            })?;
            let flag =
                StyleFlag::parse(name).ok_or_else(|| ThemeError::UnknownFlag(name.to_string()))?;
            style = style.with_flag(flag);
        }
    }

    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> StyleDescriptor {
        StyleDescriptor::color("red").unwrap()
    }

    // ==================== Builder Tests ====================

    #[test]
    fn builder_round_trip() {
        let theme = Theme::named("test")
            .with_description("a test theme")
            .with_mode(ThemeMode::Dark)
            .default_style(StyleDescriptor::color("white").unwrap())
            .word("ERROR", red().bold())
            .pattern("number", r"^\d+$", StyleDescriptor::color("blue").unwrap())
            .unwrap();

        assert_eq!(theme.name(), "test");
        assert_eq!(theme.description(), Some("a test theme"));
        assert_eq!(theme.mode(), Some(ThemeMode::Dark));
        assert!(theme.schema().default_style.is_some());
        assert!(theme.schema().match_words.contains_key("error"));
        assert_eq!(theme.schema().match_patterns.len(), 1);
    }

    #[test]
    fn builder_rejects_bad_pattern() {
        let result = Theme::named("bad").pattern("broken", "(unclosed", red());
        assert!(matches!(result, Err(ThemeError::InvalidPattern { .. })));
    }

    #[test]
    fn words_are_stored_lowercased() {
        let theme = Theme::named("t").word("ERROR", red());
        assert!(theme.schema().match_words.contains_key("error"));
        assert!(!theme.schema().match_words.contains_key("ERROR"));
    }

    // ==================== Mode Inference ====================

    #[test]
    fn declared_mode_wins() {
        let theme = Theme::named("light-ish").with_mode(ThemeMode::Dark);
        assert_eq!(theme.effective_mode(), ThemeMode::Dark);
    }

    #[test]
    fn mode_inferred_from_name() {
        assert_eq!(
            Theme::named("github-light").effective_mode(),
            ThemeMode::Light
        );
        assert_eq!(Theme::named("dracula").effective_mode(), ThemeMode::Dark);
    }

    #[test]
    fn auto_mode_falls_back_to_name_inference() {
        let theme = Theme::named("solarized-light").with_mode(ThemeMode::Auto);
        assert_eq!(theme.effective_mode(), ThemeMode::Light);
    }

    // ==================== Document Loading ====================

    #[test]
    fn from_yaml_full_document() {
        let theme = Theme::from_yaml(
            r##"
name: sample
description: sample theme
mode: dark
schema:
  defaultStyle:
    color: "#f8f8f2"
  matchWords:
    ERROR:
      color: red
      styleCodes: [bold, underline]
  matchPatterns:
    - name: number
      pattern: "^-?\\d+$"
      options:
        color: blue
  whiteSpace: preserve
  newLine: trim
  lineNumbers: true
"##,
        )
        .unwrap();

        assert_eq!(theme.name(), "sample");
        assert_eq!(theme.mode(), Some(ThemeMode::Dark));
        let schema = theme.schema();
        assert_eq!(schema.new_line, WhitespaceMode::Trim);
        assert!(schema.line_numbers);
        let error = &schema.match_words["error"];
        assert_eq!(error.flags(), &[StyleFlag::Bold, StyleFlag::Underline]);
    }

    #[test]
    fn from_json_document() {
        let theme = Theme::from_json(
            r#"{
                "name": "j",
                "schema": {
                    "defaultStyle": {"color": "white"},
                    "matchWords": {"WARN": {"color": "yellow"}}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(theme.name(), "j");
        assert!(theme.schema().match_words.contains_key("warn"));
    }

    #[test]
    fn color_string_shorthand() {
        let theme = Theme::from_yaml(
            r#"
schema:
  matchWords:
    INFO: green
"#,
        )
        .unwrap();
        assert!(theme.schema().match_words.contains_key("info"));
    }

    // ==================== Validation Rejection ====================

    #[test]
    fn rejects_non_mapping_document() {
        assert!(matches!(
            Theme::from_yaml("- just\n- a\n- list\n"),
            Err(ThemeError::Parse(_))
        ));
    }

    #[test]
    fn rejects_match_words_list() {
        let err = Theme::from_yaml("schema:\n  matchWords: [a, b]\n").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidField {
                field: "matchWords",
                ..
            }
        ));
    }

    #[test]
    fn rejects_match_patterns_mapping() {
        let err = Theme::from_yaml("schema:\n  matchPatterns:\n    x: y\n").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidField {
                field: "matchPatterns",
                ..
            }
        ));
    }

    #[test]
    fn rejects_invalid_color() {
        let err = Theme::from_yaml(
            r#"
schema:
  defaultStyle:
    color: "not-a-color"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
    }

    #[test]
    fn rejects_multibyte_hex_color() {
        // Untrusted documents must get a typed rejection, never a panic,
        // even when a hex literal contains non-ASCII bytes.
        let err = Theme::from_yaml(
            r##"
schema:
  defaultStyle:
    color: "#é0"
"##,
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = Theme::from_yaml(
            r#"
schema:
  defaultStyle:
    color: red
    styleCodes: [sparkle]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::UnknownFlag(_)));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Theme::from_yaml("mode: dusk\n").unwrap_err();
        assert!(matches!(err, ThemeError::UnknownMode(_)));
    }

    #[test]
    fn rejects_non_bool_line_numbers() {
        let err = Theme::from_yaml("schema:\n  lineNumbers: yes please\n").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidField {
                field: "lineNumbers",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_pattern_in_document() {
        let err = Theme::from_yaml(
            r#"
schema:
  matchPatterns:
    - name: broken
      pattern: "(unclosed"
      options:
        color: red
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidPattern { .. }));
    }

    // ==================== map_colors ====================

    #[test]
    fn map_colors_touches_every_rule() {
        let theme = Theme::named("t")
            .default_style(StyleDescriptor::color("black").unwrap())
            .word("ERROR", StyleDescriptor::color("black").unwrap().bold())
            .pattern(
                "number",
                r"^\d+$",
                StyleDescriptor::color("black").unwrap(),
            )
            .unwrap();

        let white = ColorValue::parse("white").unwrap();
        let repaired = theme.map_colors(|_| Some(white.clone()));

        assert_eq!(
            repaired.schema().default_style.as_ref().unwrap().color_value(),
            &white
        );
        assert_eq!(
            repaired.schema().match_words["error"].color_value(),
            &white
        );
        assert_eq!(
            repaired.schema().match_patterns[0].style().color_value(),
            &white
        );
        // Flags survive recoloring.
        assert_eq!(
            repaired.schema().match_words["error"].flags(),
            &[StyleFlag::Bold]
        );
    }

    #[test]
    fn map_colors_none_is_identity() {
        let theme = Theme::named("t")
            .default_style(StyleDescriptor::color("white").unwrap())
            .word("ERROR", red());
        assert_eq!(theme.map_colors(|_| None), theme);
    }
}
