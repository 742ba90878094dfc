//! Built-in theme registry.
//!
//! Built-in themes are trusted: they are constructed programmatically from
//! known-good literals and skip document validation. Lookups that miss fall
//! back to [`default_theme`] at the processor level — styling is a
//! presentation concern and must never block log output.

use once_cell::sync::Lazy;

use super::{Theme, ThemeMode};
use crate::style::StyleDescriptor;

/// Token-content patterns shared by every built-in schema. Order matters:
/// rules are evaluated first to last.
const TIMESTAMP: &str = r"^\d{4}-\d{2}-\d{2}[T ]|^\d{2}:\d{2}:\d{2}";
const NUMBER: &str = r"^-?\d+(?:\.\d+)?$";
const QUOTED: &str = r#"^".*"$|^'.*'$"#;
const KEY_VALUE: &str = r"^[A-Za-z_][A-Za-z0-9_.-]*=";
const BRACKETS: &str = r"^\[.*\]$";
const JSON: &str = r"^\{.*\}$";

static REGISTRY: Lazy<Vec<Theme>> = Lazy::new(|| {
    vec![
        default_dark(),
        default_light(),
        dracula(),
        github_light(),
        nord(),
        solarized_light(),
    ]
});

/// Looks up a built-in theme by name.
pub fn builtin(name: &str) -> Option<&'static Theme> {
    REGISTRY.iter().find(|t| t.name() == name)
}

/// Names of all built-in themes, in registration order.
pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|t| t.name()).collect()
}

/// The fallback theme used when a requested name cannot be resolved.
pub fn default_theme() -> &'static Theme {
    &REGISTRY[0]
}

/// Color literals are compile-time constants; failures are caught by the
/// `all_builtins_construct` test.
fn style(color: &str) -> StyleDescriptor {
    StyleDescriptor::color(color).expect("built-in theme color")
}

/// Shared schema shape: level words plus the common content patterns, with
/// per-theme colors.
struct Palette {
    error: &'static str,
    warn: &'static str,
    info: &'static str,
    debug: &'static str,
    timestamp: &'static str,
    number: &'static str,
    string: &'static str,
    structure: &'static str,
    default_fg: &'static str,
}

fn from_palette(name: &str, mode: ThemeMode, description: &str, p: Palette) -> Theme {
    Theme::named(name)
        .with_description(description)
        .with_mode(mode)
        .default_style(style(p.default_fg))
        .word("ERROR", style(p.error).bold())
        .word("FATAL", style(p.error).bold().underline())
        .word("CRITICAL", style(p.error).bold().underline())
        .word("PANIC", style(p.error).bold())
        .word("WARN", style(p.warn).bold())
        .word("WARNING", style(p.warn).bold())
        .word("INFO", style(p.info))
        .word("NOTICE", style(p.info))
        .word("DEBUG", style(p.debug).dim())
        .word("TRACE", style(p.debug).dim())
        .pattern("timestamp", TIMESTAMP, style(p.timestamp).dim())
        .and_then(|t| t.pattern("key-value", KEY_VALUE, style(p.structure)))
        .and_then(|t| t.pattern("json", JSON, style(p.structure)))
        .and_then(|t| t.pattern("brackets", BRACKETS, style(p.structure)))
        .and_then(|t| t.pattern("string", QUOTED, style(p.string)))
        .and_then(|t| t.pattern("number", NUMBER, style(p.number)))
        .expect("built-in theme pattern")
}

fn default_dark() -> Theme {
    from_palette(
        "default-dark",
        ThemeMode::Dark,
        "Named ANSI colors on a dark background",
        Palette {
            error: "red",
            warn: "yellow",
            info: "green",
            debug: "bright_black",
            timestamp: "cyan",
            number: "bright_yellow",
            string: "bright_green",
            structure: "bright_blue",
            default_fg: "white",
        },
    )
}

fn default_light() -> Theme {
    from_palette(
        "default-light",
        ThemeMode::Light,
        "Named ANSI colors on a light background",
        Palette {
            error: "red",
            warn: "yellow",
            info: "green",
            debug: "gray",
            timestamp: "blue",
            number: "magenta",
            string: "green",
            structure: "blue",
            default_fg: "black",
        },
    )
}

fn dracula() -> Theme {
    from_palette(
        "dracula",
        ThemeMode::Dark,
        "Dracula palette",
        Palette {
            error: "#ff5555",
            warn: "#f1fa8c",
            info: "#50fa7b",
            debug: "#6272a4",
            timestamp: "#8be9fd",
            number: "#bd93f9",
            string: "#f1fa8c",
            structure: "#ff79c6",
            default_fg: "#f8f8f2",
        },
    )
}

fn github_light() -> Theme {
    from_palette(
        "github-light",
        ThemeMode::Light,
        "GitHub light palette",
        Palette {
            error: "#cf222e",
            warn: "#9a6700",
            info: "#1a7f37",
            debug: "#57606a",
            timestamp: "#0969da",
            number: "#0550ae",
            string: "#0a3069",
            structure: "#8250df",
            default_fg: "#1f2328",
        },
    )
}

fn nord() -> Theme {
    from_palette(
        "nord",
        ThemeMode::Dark,
        "Nord palette",
        Palette {
            error: "#bf616a",
            warn: "#ebcb8b",
            info: "#a3be8c",
            debug: "#4c566a",
            timestamp: "#88c0d0",
            number: "#b48ead",
            string: "#a3be8c",
            structure: "#81a1c1",
            default_fg: "#d8dee9",
        },
    )
}

fn solarized_light() -> Theme {
    from_palette(
        "solarized-light",
        ThemeMode::Light,
        "Solarized light palette",
        Palette {
            error: "#dc322f",
            warn: "#b58900",
            info: "#859900",
            debug: "#93a1a1",
            timestamp: "#268bd2",
            number: "#6c71c4",
            string: "#2aa198",
            structure: "#268bd2",
            default_fg: "#657b83",
        },
    )
}
