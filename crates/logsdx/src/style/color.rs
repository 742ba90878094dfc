//! Color value parsing and per-encoding normalization.
//!
//! Supports the color formats a theme may carry:
//!
//! - Named ANSI colors: `red`, `green`, `blue`, etc. (16 colors)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - RGB hex: `#ff6b35` or `#fff` (3 or 6 digit)
//! - Function literals: `rgb(255, 107, 53)`, `rgba(255, 107, 53, 0.5)`,
//!   `hsl(16, 100%, 60%)`, `hsla(16, 100%, 60%, 0.5)`
//!
//! A parsed [`ColorValue`] is encoding-agnostic: [`ColorValue::fg_code`] and
//! [`ColorValue::bg_code`] produce ANSI SGR parameter strings, while
//! [`ColorValue::css`] produces a CSS color literal.
//!
//! # Example
//!
//! ```rust
//! use logsdx::style::ColorValue;
//!
//! let red = ColorValue::parse("red").unwrap();
//! assert_eq!(red.fg_code(), "31");
//! assert_eq!(red.css(), "red");
//!
//! let hex = ColorValue::parse("#ff6b35").unwrap();
//! assert_eq!(hex.fg_code(), "38;2;255;107;53");
//! assert_eq!(hex.css(), "#ff6b35");
//! ```

use console::Color;

/// Parsed color value from a theme.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// Named ANSI color (one of the base 8).
    Named(Color),
    /// 256-color palette index (bright variants land here as indices 8-15).
    Color256(u8),
    /// True color RGB.
    Rgb(u8, u8, u8),
    /// True color RGB with an alpha channel. Alpha only survives into CSS
    /// output; ANSI rendering ignores it.
    Rgba(u8, u8, u8, f32),
}

impl ColorValue {
    /// Parses a color from a string value.
    ///
    /// Accepts named colors, `bright_` variants, hex codes, and the
    /// `rgb()/rgba()/hsl()/hsla()` function forms.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = s.to_lowercase();
        if lower.starts_with("rgba(") && lower.ends_with(')') {
            return Self::parse_rgb_fn(&lower[5..lower.len() - 1], true);
        }
        if lower.starts_with("rgb(") && lower.ends_with(')') {
            return Self::parse_rgb_fn(&lower[4..lower.len() - 1], false);
        }
        if lower.starts_with("hsla(") && lower.ends_with(')') {
            return Self::parse_hsl_fn(&lower[5..lower.len() - 1], true);
        }
        if lower.starts_with("hsl(") && lower.ends_with(')') {
            return Self::parse_hsl_fn(&lower[4..lower.len() - 1], false);
        }

        Self::parse_named(&lower)
    }

    /// Parses a hex color code (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, String> {
        // The length checks below count bytes, so non-ASCII input must be
        // rejected before any slicing.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex: #{}", hex));
        }
        match hex.len() {
            // 3-digit hex: #rgb -> #rrggbb
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?
                    * 17;
                let g = u8::from_str_radix(&hex[1..2], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?
                    * 17;
                let b = u8::from_str_radix(&hex[2..3], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?
                    * 17;
                Ok(ColorValue::Rgb(r, g, b))
            }
            // 6-digit hex: #rrggbb
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|_| format!("Invalid hex: #{}", hex))?;
                Ok(ColorValue::Rgb(r, g, b))
            }
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    /// Parses the inside of an `rgb(...)` / `rgba(...)` literal.
    fn parse_rgb_fn(inner: &str, with_alpha: bool) -> Result<Self, String> {
        let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!(
                "rgb color requires {} components, got {}",
                expected,
                parts.len()
            ));
        }

        let mut channels = [0u8; 3];
        for (i, part) in parts.iter().take(3).enumerate() {
            channels[i] = part
                .parse::<u8>()
                .map_err(|_| format!("Invalid rgb component '{}'", part))?;
        }

        if with_alpha {
            let alpha = parse_alpha(parts[3])?;
            Ok(ColorValue::Rgba(channels[0], channels[1], channels[2], alpha))
        } else {
            Ok(ColorValue::Rgb(channels[0], channels[1], channels[2]))
        }
    }

    /// Parses the inside of an `hsl(...)` / `hsla(...)` literal. Hue is in
    /// degrees; saturation and lightness are percentages (the `%` suffix is
    /// optional).
    fn parse_hsl_fn(inner: &str, with_alpha: bool) -> Result<Self, String> {
        let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!(
                "hsl color requires {} components, got {}",
                expected,
                parts.len()
            ));
        }

        let h = parts[0]
            .strip_suffix("deg")
            .unwrap_or(parts[0])
            .parse::<f64>()
            .map_err(|_| format!("Invalid hue '{}'", parts[0]))?;
        let mut sl = [0.0f64; 2];
        for (i, part) in parts[1..3].iter().enumerate() {
            let num = part.strip_suffix('%').unwrap_or(part);
            let value = num
                .parse::<f64>()
                .map_err(|_| format!("Invalid hsl component '{}'", part))?;
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("hsl component '{}' out of range (0-100%)", part));
            }
            sl[i] = value / 100.0;
        }

        let (r, g, b) = hsl_to_rgb(h, sl[0], sl[1]);
        if with_alpha {
            let alpha = parse_alpha(parts[3])?;
            Ok(ColorValue::Rgba(r, g, b, alpha))
        } else {
            Ok(ColorValue::Rgb(r, g, b))
        }
    }

    /// Parses a named color (including bright variants). Expects lowercase.
    fn parse_named(name: &str) -> Result<Self, String> {
        if let Some(base) = name.strip_prefix("bright_") {
            return Self::parse_bright(base);
        }

        let color = match name {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            // gray is the dim half of the bright pair
            "gray" | "grey" => return Ok(ColorValue::Color256(8)),
            _ => return Err(format!("Unknown color name: {}", name)),
        };

        Ok(ColorValue::Named(color))
    }

    /// Bright variants live in the 256-color palette at indices 8-15.
    fn parse_bright(base: &str) -> Result<Self, String> {
        let index = match base {
            "black" => 8,
            "red" => 9,
            "green" => 10,
            "yellow" => 11,
            "blue" => 12,
            "magenta" => 13,
            "cyan" => 14,
            "white" => 15,
            _ => return Err(format!("Unknown bright color: bright_{}", base)),
        };
        Ok(ColorValue::Color256(index))
    }

    /// ANSI SGR parameters selecting this color as the foreground.
    pub fn fg_code(&self) -> String {
        match self {
            ColorValue::Named(Color::TrueColor(r, g, b)) => format!("38;2;{};{};{}", r, g, b),
            ColorValue::Named(c) => named_sgr(*c, 30).to_string(),
            ColorValue::Color256(n) => format!("38;5;{}", n),
            ColorValue::Rgb(r, g, b) | ColorValue::Rgba(r, g, b, _) => {
                format!("38;2;{};{};{}", r, g, b)
            }
        }
    }

    /// ANSI SGR parameters selecting this color as the background.
    pub fn bg_code(&self) -> String {
        match self {
            ColorValue::Named(Color::TrueColor(r, g, b)) => format!("48;2;{};{};{}", r, g, b),
            ColorValue::Named(c) => named_sgr(*c, 40).to_string(),
            ColorValue::Color256(n) => format!("48;5;{}", n),
            ColorValue::Rgb(r, g, b) | ColorValue::Rgba(r, g, b, _) => {
                format!("48;2;{};{};{}", r, g, b)
            }
        }
    }

    /// CSS color literal for this value.
    pub fn css(&self) -> String {
        match self {
            ColorValue::Named(Color::TrueColor(r, g, b)) => {
                format!("#{:02x}{:02x}{:02x}", r, g, b)
            }
            ColorValue::Named(c) => named_css(*c).to_string(),
            ColorValue::Color256(n) => {
                let (r, g, b) = xterm_to_rgb(*n);
                format!("#{:02x}{:02x}{:02x}", r, g, b)
            }
            ColorValue::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            ColorValue::Rgba(r, g, b, a) => format!("rgba({}, {}, {}, {})", r, g, b, a),
        }
    }

    /// CSS class-name fragment, if this color maps onto the fixed named set.
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            ColorValue::Named(Color::TrueColor(..)) => None,
            ColorValue::Named(c) => Some(named_css(*c)),
            ColorValue::Color256(n @ 8..=15) => Some(match n {
                8 => "bright-black",
                9 => "bright-red",
                10 => "bright-green",
                11 => "bright-yellow",
                12 => "bright-blue",
                13 => "bright-magenta",
                14 => "bright-cyan",
                _ => "bright-white",
            }),
            _ => None,
        }
    }

    /// Resolves this color to concrete RGB channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorValue::Named(Color::TrueColor(r, g, b)) => (*r, *g, *b),
            ColorValue::Named(c) => xterm_to_rgb(named_index(*c)),
            ColorValue::Color256(n) => xterm_to_rgb(*n),
            ColorValue::Rgb(r, g, b) | ColorValue::Rgba(r, g, b, _) => (*r, *g, *b),
        }
    }

    /// Relative luminance (WCAG), 0.0 for black through 1.0 for white.
    pub fn luminance(&self) -> f64 {
        let (r, g, b) = self.to_rgb();
        let lin = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
    }
}

/// HSL to RGB conversion. Hue in degrees (wraps), saturation and lightness in
/// `0.0..=1.0`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

/// Alpha component: a bare fraction (`0.5`) or a percentage (`50%`).
fn parse_alpha(s: &str) -> Result<f32, String> {
    let value = match s.strip_suffix('%') {
        Some(num) => {
            num.parse::<f32>()
                .map_err(|_| format!("Invalid alpha '{}'", s))?
                / 100.0
        }
        None => s
            .parse::<f32>()
            .map_err(|_| format!("Invalid alpha '{}'", s))?,
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("Alpha '{}' out of range (0-1)", s));
    }
    Ok(value)
}

/// SGR code for a base named color: `base` 30 for foreground, 40 for
/// background.
fn named_sgr(color: Color, base: u8) -> u8 {
    base + named_index(color)
}

/// Callers resolve `TrueColor` before reaching here; any other future
/// `console::Color` variant degrades to the white slot.
fn named_index(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::Red => 1,
        Color::Green => 2,
        Color::Yellow => 3,
        Color::Blue => 4,
        Color::Magenta => 5,
        Color::Cyan => 6,
        Color::White => 7,
        Color::Color256(n) => n,
        _ => 7,
    }
}

fn named_css(color: Color) -> &'static str {
    match color {
        Color::Black => "black",
        Color::Red => "red",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Cyan => "cyan",
        _ => "white",
    }
}

/// Standard xterm 256-color palette resolution.
fn xterm_to_rgb(n: u8) -> (u8, u8, u8) {
    const BASE16: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
        (127, 127, 127),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (92, 92, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];

    match n {
        0..=15 => BASE16[n as usize],
        16..=231 => {
            let n = n - 16;
            let step = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (step(n / 36), step((n / 6) % 6), step(n % 6))
        }
        232..=255 => {
            let gray = 8 + (n - 232) * 10;
            (gray, gray, gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Named color tests
    // =========================================================================

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(
            ColorValue::parse("red").unwrap(),
            ColorValue::Named(Color::Red)
        );
        assert_eq!(
            ColorValue::parse("cyan").unwrap(),
            ColorValue::Named(Color::Cyan)
        );
        assert_eq!(
            ColorValue::parse("black").unwrap(),
            ColorValue::Named(Color::Black)
        );
    }

    #[test]
    fn test_parse_named_case_insensitive() {
        assert_eq!(
            ColorValue::parse("RED").unwrap(),
            ColorValue::Named(Color::Red)
        );
        assert_eq!(
            ColorValue::parse("Red").unwrap(),
            ColorValue::Named(Color::Red)
        );
    }

    #[test]
    fn test_parse_gray_aliases() {
        assert_eq!(ColorValue::parse("gray").unwrap(), ColorValue::Color256(8));
        assert_eq!(ColorValue::parse("grey").unwrap(), ColorValue::Color256(8));
    }

    #[test]
    fn test_parse_bright_colors() {
        assert_eq!(
            ColorValue::parse("bright_red").unwrap(),
            ColorValue::Color256(9)
        );
        assert_eq!(
            ColorValue::parse("bright_white").unwrap(),
            ColorValue::Color256(15)
        );
    }

    #[test]
    fn test_parse_unknown_color() {
        assert!(ColorValue::parse("purple").is_err());
        assert!(ColorValue::parse("bright_purple").is_err());
        assert!(ColorValue::parse("").is_err());
    }

    // =========================================================================
    // Hex tests
    // =========================================================================

    #[test]
    fn test_parse_hex_6_digit() {
        assert_eq!(
            ColorValue::parse("#ff6b35").unwrap(),
            ColorValue::Rgb(255, 107, 53)
        );
    }

    #[test]
    fn test_parse_hex_3_digit() {
        assert_eq!(
            ColorValue::parse("#f80").unwrap(),
            ColorValue::Rgb(255, 136, 0)
        );
        assert_eq!(ColorValue::parse("#fff").unwrap(), ColorValue::Rgb(255, 255, 255));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(ColorValue::parse("#ff").is_err());
        assert!(ColorValue::parse("#ffff").is_err());
        assert!(ColorValue::parse("#gggggg").is_err());
    }

    #[test]
    fn test_parse_hex_non_ascii() {
        // "é0" is three bytes; must reject, not slice mid-character.
        assert!(ColorValue::parse("#é0").is_err());
        assert!(ColorValue::parse("#ééé").is_err());
        assert!(ColorValue::parse("#ffé0ff").is_err());
    }

    #[test]
    fn test_named_true_color_variant() {
        // The Named wrapper accepts any console::Color a host constructs.
        let color = ColorValue::Named(Color::TrueColor(255, 107, 53));
        assert_eq!(color.fg_code(), "38;2;255;107;53");
        assert_eq!(color.bg_code(), "48;2;255;107;53");
        assert_eq!(color.css(), "#ff6b35");
        assert_eq!(color.class_name(), None);
        assert_eq!(color.to_rgb(), (255, 107, 53));
    }

    // =========================================================================
    // Function literal tests
    // =========================================================================

    #[test]
    fn test_parse_rgb_fn() {
        assert_eq!(
            ColorValue::parse("rgb(255, 107, 53)").unwrap(),
            ColorValue::Rgb(255, 107, 53)
        );
    }

    #[test]
    fn test_parse_rgba_fn() {
        assert_eq!(
            ColorValue::parse("rgba(255, 0, 0, 0.5)").unwrap(),
            ColorValue::Rgba(255, 0, 0, 0.5)
        );
    }

    #[test]
    fn test_parse_rgb_out_of_range() {
        assert!(ColorValue::parse("rgb(256, 0, 0)").is_err());
        assert!(ColorValue::parse("rgb(1, 2)").is_err());
        assert!(ColorValue::parse("rgba(1, 2, 3)").is_err());
    }

    #[test]
    fn test_parse_hsl_primaries() {
        assert_eq!(
            ColorValue::parse("hsl(0, 100%, 50%)").unwrap(),
            ColorValue::Rgb(255, 0, 0)
        );
        assert_eq!(
            ColorValue::parse("hsl(120, 100%, 50%)").unwrap(),
            ColorValue::Rgb(0, 255, 0)
        );
        assert_eq!(
            ColorValue::parse("hsl(240, 100%, 50%)").unwrap(),
            ColorValue::Rgb(0, 0, 255)
        );
    }

    #[test]
    fn test_parse_hsl_grays() {
        assert_eq!(
            ColorValue::parse("hsl(0, 0%, 100%)").unwrap(),
            ColorValue::Rgb(255, 255, 255)
        );
        assert_eq!(
            ColorValue::parse("hsl(0, 0%, 0%)").unwrap(),
            ColorValue::Rgb(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_hsla() {
        assert_eq!(
            ColorValue::parse("hsla(0, 100%, 50%, 0.25)").unwrap(),
            ColorValue::Rgba(255, 0, 0, 0.25)
        );
    }

    #[test]
    fn test_parse_hsl_invalid() {
        assert!(ColorValue::parse("hsl(0, 101%, 50%)").is_err());
        assert!(ColorValue::parse("hsl(x, 0%, 0%)").is_err());
    }

    // =========================================================================
    // Encoding tests
    // =========================================================================

    #[test]
    fn test_fg_codes() {
        assert_eq!(ColorValue::Named(Color::Red).fg_code(), "31");
        assert_eq!(ColorValue::Named(Color::White).fg_code(), "37");
        assert_eq!(ColorValue::Color256(9).fg_code(), "38;5;9");
        assert_eq!(ColorValue::Rgb(1, 2, 3).fg_code(), "38;2;1;2;3");
    }

    #[test]
    fn test_bg_codes() {
        assert_eq!(ColorValue::Named(Color::Blue).bg_code(), "44");
        assert_eq!(ColorValue::Rgb(10, 20, 30).bg_code(), "48;2;10;20;30");
    }

    #[test]
    fn test_css_output() {
        assert_eq!(ColorValue::Named(Color::Red).css(), "red");
        assert_eq!(ColorValue::Rgb(255, 107, 53).css(), "#ff6b35");
        assert_eq!(
            ColorValue::Rgba(255, 0, 0, 0.5).css(),
            "rgba(255, 0, 0, 0.5)"
        );
        // 256-palette indices resolve through the xterm palette.
        assert_eq!(ColorValue::Color256(15).css(), "#ffffff");
    }

    #[test]
    fn test_class_names() {
        assert_eq!(ColorValue::Named(Color::Red).class_name(), Some("red"));
        assert_eq!(ColorValue::Color256(9).class_name(), Some("bright-red"));
        assert_eq!(ColorValue::Rgb(1, 2, 3).class_name(), None);
    }

    // =========================================================================
    // Palette & luminance tests
    // =========================================================================

    #[test]
    fn test_xterm_cube() {
        assert_eq!(xterm_to_rgb(16), (0, 0, 0));
        assert_eq!(xterm_to_rgb(231), (255, 255, 255));
        assert_eq!(xterm_to_rgb(196), (255, 0, 0));
    }

    #[test]
    fn test_xterm_grayscale() {
        assert_eq!(xterm_to_rgb(232), (8, 8, 8));
        assert_eq!(xterm_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(ColorValue::Named(Color::Black).luminance() < 0.01);
        assert!(ColorValue::Rgb(255, 255, 255).luminance() > 0.99);
        let mid = ColorValue::Rgb(128, 128, 128).luminance();
        assert!(mid > 0.1 && mid < 0.5);
    }
}
