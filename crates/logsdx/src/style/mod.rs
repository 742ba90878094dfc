//! Style primitives: text-decoration flags and style descriptors.
//!
//! A [`StyleDescriptor`] is a color plus an ordered set of [`StyleFlag`]s,
//! encoding-agnostic until rendered. Every flag maps through a single table
//! to its ANSI SGR code, CSS declaration, and class-name suffix, so the three
//! output encodings can never drift apart.

mod color;

pub use color::ColorValue;

/// A text-decoration flag a theme can attach to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Strikethrough,
}

/// One row of the flag mapping table.
struct FlagMapping {
    flag: StyleFlag,
    name: &'static str,
    ansi: &'static str,
    css: &'static str,
    class_suffix: &'static str,
}

/// The single source of truth for flag serialization. ANSI codes are SGR
/// parameters; CSS declarations carry no trailing semicolon. The `dim` and
/// `reverse` CSS mappings are implementation-defined approximations.
const FLAG_TABLE: &[FlagMapping] = &[
    FlagMapping {
        flag: StyleFlag::Bold,
        name: "bold",
        ansi: "1",
        css: "font-weight:bold",
        class_suffix: "bold",
    },
    FlagMapping {
        flag: StyleFlag::Dim,
        name: "dim",
        ansi: "2",
        css: "opacity:0.7",
        class_suffix: "dim",
    },
    FlagMapping {
        flag: StyleFlag::Italic,
        name: "italic",
        ansi: "3",
        css: "font-style:italic",
        class_suffix: "italic",
    },
    FlagMapping {
        flag: StyleFlag::Underline,
        name: "underline",
        ansi: "4",
        css: "text-decoration:underline",
        class_suffix: "underline",
    },
    FlagMapping {
        flag: StyleFlag::Blink,
        name: "blink",
        ansi: "5",
        css: "text-decoration:blink",
        class_suffix: "blink",
    },
    FlagMapping {
        flag: StyleFlag::Reverse,
        name: "reverse",
        ansi: "7",
        css: "filter:invert(100%)",
        class_suffix: "reverse",
    },
    FlagMapping {
        flag: StyleFlag::Strikethrough,
        name: "strikethrough",
        ansi: "9",
        css: "text-decoration:line-through",
        class_suffix: "strikethrough",
    },
];

impl StyleFlag {
    fn mapping(&self) -> &'static FlagMapping {
        // The table covers every variant; the row is always present.
        FLAG_TABLE
            .iter()
            .find(|m| m.flag == *self)
            .unwrap_or(&FLAG_TABLE[0])
    }

    /// Parses a flag from its lowercase name (theme data format).
    pub fn parse(name: &str) -> Option<Self> {
        FLAG_TABLE
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.flag)
    }

    /// Lowercase flag name as it appears in theme documents.
    pub fn name(&self) -> &'static str {
        self.mapping().name
    }

    /// ANSI SGR parameter for this flag.
    pub fn ansi_code(&self) -> &'static str {
        self.mapping().ansi
    }

    /// CSS declaration for this flag (no trailing semicolon).
    pub fn css(&self) -> &'static str {
        self.mapping().css
    }

    /// Class-name suffix for this flag.
    pub fn class_suffix(&self) -> &'static str {
        self.mapping().class_suffix
    }
}

/// A color plus an ordered set of text-decoration flags.
///
/// Constructed with a fluent builder mirroring the flag names:
///
/// ```rust
/// use logsdx::style::{ColorValue, StyleDescriptor};
///
/// let style = StyleDescriptor::color("red").unwrap().bold().underline();
/// assert_eq!(style.flags().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    color: ColorValue,
    flags: Vec<StyleFlag>,
}

impl StyleDescriptor {
    /// Creates a descriptor from a parsed color and no flags.
    pub fn new(color: ColorValue) -> Self {
        Self {
            color,
            flags: Vec::new(),
        }
    }

    /// Creates a descriptor by parsing a color literal.
    pub fn color(color: &str) -> Result<Self, String> {
        Ok(Self::new(ColorValue::parse(color)?))
    }

    /// Adds a flag, preserving first-insertion order and ignoring duplicates.
    pub fn with_flag(mut self, flag: StyleFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn bold(self) -> Self {
        self.with_flag(StyleFlag::Bold)
    }

    pub fn dim(self) -> Self {
        self.with_flag(StyleFlag::Dim)
    }

    pub fn italic(self) -> Self {
        self.with_flag(StyleFlag::Italic)
    }

    pub fn underline(self) -> Self {
        self.with_flag(StyleFlag::Underline)
    }

    /// The descriptor's color.
    pub fn color_value(&self) -> &ColorValue {
        &self.color
    }

    /// Replaces the color, keeping all flags. Used by theme adaptation.
    pub fn recolor(&self, color: ColorValue) -> Self {
        Self {
            color,
            flags: self.flags.clone(),
        }
    }

    /// The ordered flag set.
    pub fn flags(&self) -> &[StyleFlag] {
        &self.flags
    }
}
