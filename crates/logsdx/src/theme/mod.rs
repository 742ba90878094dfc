//! Themes: declarative styling rules with light/dark awareness.
//!
//! A theme pairs a schema (word matches, ordered pattern rules, default
//! style) with metadata (name, mode, whitespace handling). Themes come from
//! three places:
//!
//! - the built-in [`registry`] (trusted, constructed programmatically),
//! - YAML/JSON documents ([`Theme::from_yaml`], [`Theme::from_json`],
//!   [`Theme::from_file`]) — validated structurally before first use,
//! - the builder API for host applications.
//!
//! The [`adaptive`] submodule detects the terminal/OS background and repairs
//! themes whose mode disagrees with it, so a light theme stays legible on a
//! dark terminal and vice versa.

pub mod adaptive;
pub mod registry;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{
    adjust_theme_for_terminal, detect_background, BackgroundInfo, BackgroundScheme,
    BackgroundSource, Confidence,
};
pub use theme::{PatternRule, Schema, Theme, ThemeMode, WhitespaceMode};
