//! Background detection and theme-mode adaptation.
//!
//! Detection is a confidence-ranked fusion of independent environment
//! signals: the `COLORFGBG` variable, known terminal-program identities,
//! the VS Code integrated-terminal heuristic, and OS-level color-scheme
//! signals. The first high-confidence signal wins; otherwise medium beats
//! low; with no signals at all the documented default is a dark background
//! at low confidence. Detection never fails.
//!
//! The result is cached for the process lifetime because environment
//! inspection is expensive relative to per-line processing. The cache is
//! invalidated explicitly via [`invalidate_background_cache`], and the
//! detector itself can be overridden for testing:
//!
//! ```rust
//! use logsdx::theme::adaptive::{self, BackgroundInfo, BackgroundScheme};
//!
//! adaptive::set_background_detector(|| BackgroundInfo::default_dark());
//! assert_eq!(adaptive::detect_background().scheme, BackgroundScheme::Dark);
//! ```
//!
//! [`adjust_theme_for_terminal`] is the companion repair step: when a
//! theme's mode disagrees with the detected background it rewrites only the
//! colors that would be illegible, preserving all other styling. The repair
//! is idempotent.

use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::{Theme, ThemeMode};
use crate::style::ColorValue;

/// Detected background scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundScheme {
    Light,
    Dark,
    /// The signal existed but did not commit to either side.
    Auto,
}

/// How trustworthy a detection result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Which class of signal produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    /// Terminal-specific signals: `COLORFGBG`, `TERM_PROGRAM`.
    Terminal,
    /// OS-level color-scheme signals.
    System,
    /// No signal at all; the hard-coded dark default.
    Default,
}

/// The result of one detection pass. Not persisted; recomputed on demand and
/// cached process-wide until explicitly invalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundInfo {
    pub scheme: BackgroundScheme,
    pub confidence: Confidence,
    pub source: BackgroundSource,
    /// The raw signal that decided the result, when there was one.
    pub details: Option<String>,
}

impl BackgroundInfo {
    fn new(scheme: BackgroundScheme, confidence: Confidence, source: BackgroundSource) -> Self {
        Self {
            scheme,
            confidence,
            source,
            details: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The documented fallback: dark, low confidence, no source.
    pub fn default_dark() -> Self {
        Self::new(
            BackgroundScheme::Dark,
            Confidence::Low,
            BackgroundSource::Default,
        )
    }

    /// Whether themes should treat this background as dark. `Auto` resolves
    /// to dark, matching the detection default.
    pub fn is_dark(&self) -> bool {
        !matches!(self.scheme, BackgroundScheme::Light)
    }
}

/// Terminal programs that default to a dark background.
const DARK_TERMINALS: &[&str] = &["iTerm.app", "Hyper", "WezTerm", "Alacritty", "kitty", "ghostty"];

/// Terminal programs that default to a light background.
const LIGHT_TERMINALS: &[&str] = &["Apple_Terminal"];

/// Runs one detection pass over an environment lookup. Pure: all signals are
/// read through `env`, so tests can supply a fixed environment without
/// touching process state.
pub fn detect_from_env<F>(env: F) -> BackgroundInfo
where
    F: Fn(&str) -> Option<String>,
{
    fuse(signals(&env, None))
}

/// Detects the current background, caching the result process-wide.
///
/// The first call runs the configured detector; later calls return the
/// cached value until [`invalidate_background_cache`] is called. Concurrent
/// first access has compute-once semantics: the first stored value wins.
pub fn detect_background() -> BackgroundInfo {
    {
        let cache = CACHE.lock().unwrap();
        if let Some(info) = cache.as_ref() {
            return info.clone();
        }
    }

    // Copy the detector out so no two locks are ever held together.
    let detector = *DETECTOR.lock().unwrap();
    let info = detector();

    let mut cache = CACHE.lock().unwrap();
    cache.get_or_insert(info).clone()
}

/// Overrides the background detector. Useful for tests and for hosts with
/// their own environment knowledge. Clears the cache, so the next
/// [`detect_background`] call consults the new detector. Safe to call
/// redundantly.
pub fn set_background_detector(detector: BackgroundDetector) {
    *DETECTOR.lock().unwrap() = detector;
    invalidate_background_cache();
}

/// Restores the environment-based detector. Safe to call redundantly.
pub fn reset_background_detector() {
    set_background_detector(environment_detector);
}

/// Drops the cached detection result. The host calls this on an
/// "environment changed" event; safe to call redundantly.
pub fn invalidate_background_cache() {
    *CACHE.lock().unwrap() = None;
}

type BackgroundDetector = fn() -> BackgroundInfo;

static DETECTOR: Lazy<Mutex<BackgroundDetector>> = Lazy::new(|| Mutex::new(environment_detector));
static CACHE: Lazy<Mutex<Option<BackgroundInfo>>> = Lazy::new(|| Mutex::new(None));

fn environment_detector() -> BackgroundInfo {
    fuse(signals(&|key: &str| std::env::var(key).ok(), os_probe()))
}

/// Collects candidate signals in priority order.
fn signals<F>(env: &F, os_probe: Option<BackgroundInfo>) -> Vec<BackgroundInfo>
where
    F: Fn(&str) -> Option<String>,
{
    let mut candidates = Vec::new();
    candidates.extend(colorfgbg_signal(env));
    candidates.extend(term_program_signal(env));
    candidates.extend(vscode_signal(env));
    candidates.extend(os_env_signal(env));
    candidates.extend(os_probe);
    candidates
}

/// Picks the winner: the first high-confidence candidate, else the first
/// medium, else the first low, else the dark default.
fn fuse(candidates: Vec<BackgroundInfo>) -> BackgroundInfo {
    for confidence in [Confidence::High, Confidence::Medium, Confidence::Low] {
        if let Some(info) = candidates.iter().find(|c| c.confidence == confidence) {
            return info.clone();
        }
    }
    BackgroundInfo::default_dark().with_details("no environment signals")
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background palette
/// index 7 or 15 means a light background. High confidence when parseable.
fn colorfgbg_signal<F>(env: &F) -> Option<BackgroundInfo>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env("COLORFGBG")?;
    let bg = raw.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    let scheme = if bg == 7 || bg == 15 {
        BackgroundScheme::Light
    } else {
        BackgroundScheme::Dark
    };
    Some(
        BackgroundInfo::new(scheme, Confidence::High, BackgroundSource::Terminal)
            .with_details(format!("COLORFGBG={}", raw)),
    )
}

/// Known terminal identities carry a medium-confidence default background.
fn term_program_signal<F>(env: &F) -> Option<BackgroundInfo>
where
    F: Fn(&str) -> Option<String>,
{
    let program = env("TERM_PROGRAM")?;
    let scheme = if DARK_TERMINALS.iter().any(|t| *t == program) {
        BackgroundScheme::Dark
    } else if LIGHT_TERMINALS.iter().any(|t| *t == program) {
        BackgroundScheme::Light
    } else {
        return None;
    };
    Some(
        BackgroundInfo::new(scheme, Confidence::Medium, BackgroundSource::Terminal)
            .with_details(format!("TERM_PROGRAM={}", program)),
    )
}

/// The VS Code integrated terminal inherits the editor theme, which we
/// cannot see from the environment. Low confidence, scheme undecided.
fn vscode_signal<F>(env: &F) -> Option<BackgroundInfo>
where
    F: Fn(&str) -> Option<String>,
{
    let program = env("TERM_PROGRAM")?;
    if program != "vscode" {
        return None;
    }
    Some(
        BackgroundInfo::new(
            BackgroundScheme::Auto,
            Confidence::Low,
            BackgroundSource::Terminal,
        )
        .with_details("TERM_PROGRAM=vscode"),
    )
}

/// OS-level environment signals: `APPLE_INTERFACE_STYLE` on macOS (high),
/// desktop-session variables on Linux (medium), Windows (low, undecided).
fn os_env_signal<F>(env: &F) -> Option<BackgroundInfo>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(style) = env("APPLE_INTERFACE_STYLE") {
        let scheme = if style.eq_ignore_ascii_case("dark") {
            BackgroundScheme::Dark
        } else {
            BackgroundScheme::Light
        };
        return Some(
            BackgroundInfo::new(scheme, Confidence::High, BackgroundSource::System)
                .with_details(format!("APPLE_INTERFACE_STYLE={}", style)),
        );
    }

    if let Some(gtk) = env("GTK_THEME") {
        let scheme = if gtk.to_lowercase().contains("dark") {
            BackgroundScheme::Dark
        } else {
            BackgroundScheme::Light
        };
        return Some(
            BackgroundInfo::new(scheme, Confidence::Medium, BackgroundSource::System)
                .with_details(format!("GTK_THEME={}", gtk)),
        );
    }

    if env("OS").is_some_and(|os| os == "Windows_NT") {
        return Some(
            BackgroundInfo::new(
                BackgroundScheme::Auto,
                Confidence::Low,
                BackgroundSource::System,
            )
            .with_details("OS=Windows_NT"),
        );
    }

    None
}

/// OS color-scheme probe via `dark-light`. Unspecified or failed probes
/// contribute no signal.
fn os_probe() -> Option<BackgroundInfo> {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => Some(
            BackgroundInfo::new(
                BackgroundScheme::Dark,
                Confidence::Medium,
                BackgroundSource::System,
            )
            .with_details("os color scheme"),
        ),
        Ok(dark_light::Mode::Light) => Some(
            BackgroundInfo::new(
                BackgroundScheme::Light,
                Confidence::Medium,
                BackgroundSource::System,
            )
            .with_details("os color scheme"),
        ),
        _ => None,
    }
}

/// Colors darker than this vanish on a dark background.
const DARK_FLOOR: f64 = 0.25;

/// Colors lighter than this vanish on a light background.
const LIGHT_CEILING: f64 = 0.75;

/// Repairs a theme whose mode disagrees with the detected background.
///
/// When the theme already matches the background it is returned unchanged.
/// Otherwise only the colors that would be illegible are rewritten to a
/// visibility-safe replacement; every other style survives. Re-adapting an
/// already-adapted theme is a no-op: the replacement colors sit inside the
/// legible range.
pub fn adjust_theme_for_terminal(theme: &Theme, terminal_is_dark: bool) -> Theme {
    let conflicts = match theme.effective_mode() {
        ThemeMode::Light => terminal_is_dark,
        ThemeMode::Dark => !terminal_is_dark,
        // effective_mode resolves Auto through name inference.
        ThemeMode::Auto => false,
    };
    if !conflicts {
        return theme.clone();
    }

    if terminal_is_dark {
        theme.map_colors(|color| {
            (color.luminance() < DARK_FLOOR).then_some(ColorValue::Rgb(229, 229, 229))
        })
    } else {
        theme.map_colors(|color| {
            (color.luminance() > LIGHT_CEILING).then_some(ColorValue::Rgb(28, 28, 28))
        })
    }
}
