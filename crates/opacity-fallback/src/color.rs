//! Color literal parsing.
//!
//! Converts the color notations found in custom-property definitions into a
//! solid [`Rgb`] triplet. Alpha channels are accepted and dropped; the alpha a
//! utility class wants comes from its selector, not from the source color.
//!
//! Supported notations, chosen by a sniff of the trimmed literal:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb()` / `rgba()` with commas, spaces or a `/ alpha` tail
//! - `hsl()` / `hsla()` with the same separator styles
//!
//! Everything else (`transparent`, named colors, `oklch()`, `lab()`,
//! `color(display-p3 ...)`) is reported as unparseable by returning `None`.
//! Malformed input is expected here, so nothing in this module fails loudly.
//!
//! # Example
//!
//! ```rust
//! use opacity_fallback::color::{parse_color, Rgb};
//!
//! assert_eq!(parse_color("#3366ff"), Some(Rgb(51, 102, 255)));
//! assert_eq!(parse_color("rgb(255 0 0 / .5)"), Some(Rgb(255, 0, 0)));
//! assert_eq!(parse_color("hsl(120, 100%, 50%)"), Some(Rgb(0, 255, 0)));
//! assert_eq!(parse_color("oklch(0.7 0.1 200)"), None);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// A solid color as three 0–255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channels joined by `, `, the value stored in a triplet custom property.
    pub fn triplet(&self) -> String {
        format!("{}, {}, {}", self.0, self.1, self.2)
    }

    /// An `rgba()` literal with this color and the given alpha.
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

static RGB_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^rgba?\(").expect("rgb prefix pattern is valid"));
static RGB_FUNCTION_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rgba?\(").expect("rgb pattern is valid"));
static HSL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^hsla?\(\s*(.+?)\s*\)$").expect("hsl function pattern is valid")
});
static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]*\.?[0-9]+").expect("numeric token pattern is valid"));
static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading float pattern is valid")
});

/// Parses a color literal into a solid triplet.
///
/// `transparent` and the empty string are always `None`.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let v = value.trim();
    if v.is_empty() || v == "transparent" {
        return None;
    }

    if v.starts_with('#') {
        return parse_hex(v);
    }
    if RGB_FUNCTION.is_match(v) {
        return parse_rgb_function(v);
    }
    if HSL_FUNCTION.is_match(v) {
        return parse_hsl_function(v);
    }

    None
}

/// [`parse_color`], falling back to [`parse_loose_rgb`].
///
/// This is the entry point used when scanning custom-property definitions.
pub fn parse_color_lenient(value: &str) -> Option<Rgb> {
    parse_color(value).or_else(|| parse_loose_rgb(value))
}

/// Parses a 3, 4, 6 or 8 digit hex color, with or without the leading `#`.
///
/// Short forms are expanded by doubling each digit. A fourth or an
/// seventh/eighth digit is alpha and is ignored.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits[..3].chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits[..6].to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Parses `rgb(...)` / `rgba(...)`, taking the first three numbers inside the
/// parentheses as red, green and blue.
pub fn parse_rgb_function(value: &str) -> Option<Rgb> {
    let v = value.trim();
    if !RGB_FUNCTION.is_match(v) {
        return None;
    }
    channels_in_parens(v)
}

/// Looser sibling of [`parse_rgb_function`] for values that contain an
/// `rgb(`/`rgba(` call somewhere but do not start with one.
pub fn parse_loose_rgb(value: &str) -> Option<Rgb> {
    let v = value.trim();
    if !RGB_FUNCTION_ANYWHERE.is_match(v) {
        return None;
    }
    channels_in_parens(v)
}

/// Parses `hsl(...)` / `hsla(...)`.
///
/// The part before an optional `/ alpha` is split on commas when it has any,
/// otherwise on whitespace. Hue is in degrees and wraps; saturation and
/// lightness are percentages clamped to `[0, 100]`.
pub fn parse_hsl_function(value: &str) -> Option<Rgb> {
    let caps = HSL_FUNCTION.captures(value.trim())?;
    let inner = caps.get(1)?.as_str().trim();
    let left = inner.split('/').next().unwrap_or_default().trim();

    let parts: Vec<&str> = if left.contains(',') {
        left.split(',').map(str::trim).collect()
    } else {
        left.split_whitespace().collect()
    };
    if parts.len() < 3 {
        return None;
    }

    let h = leading_float(parts[0])?;
    let s = leading_float(&parts[1].replacen('%', "", 1))? / 100.0;
    let l = leading_float(&parts[2].replacen('%', "", 1))? / 100.0;

    Some(hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)))
}

/// Converts HSL to RGB with the standard six-sector algorithm.
///
/// `h` is in degrees (any real number), `s` and `l` in `[0, 1]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hh = ((h % 360.0) + 360.0) % 360.0;
    let x = c * (1.0 - ((hh / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if hh < 60.0 {
        (c, x, 0.0)
    } else if hh < 120.0 {
        (x, c, 0.0)
    } else if hh < 180.0 {
        (0.0, c, x)
    } else if hh < 240.0 {
        (0.0, x, c)
    } else if hh < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb(
        clamp_channel((r1 + m) * 255.0),
        clamp_channel((g1 + m) * 255.0),
        clamp_channel((b1 + m) * 255.0),
    )
}

/// Yields the numeric tokens of `s` in source order.
///
/// A token is an optional `-`, digits, and an optional fractional part
/// (`12`, `-3`, `.5`, `10.25`). Separators are irrelevant, so `1,2,3`,
/// `1 2 3 / .5` and `1, 2 3` all produce the same first three tokens.
pub fn numeric_tokens(s: &str) -> impl Iterator<Item = f64> + '_ {
    NUMERIC_TOKEN
        .find_iter(s)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
}

/// Shared body of the strict and loose rgb parsers: first three numbers
/// between the first `(` and the last `)`.
fn channels_in_parens(v: &str) -> Option<Rgb> {
    let open = v.find('(')?;
    let close = v.rfind(')')?;
    if close <= open {
        return None;
    }

    let mut nums = numeric_tokens(&v[open + 1..close]);
    let r = nums.next()?;
    let g = nums.next()?;
    let b = nums.next()?;
    Some(Rgb(clamp_channel(r), clamp_channel(g), clamp_channel(b)))
}

/// Parses the numeric prefix of `s`, ignoring anything after it (`120deg` -> 120).
fn leading_float(s: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(s)
        .and_then(|m| m.as_str().trim_start().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn clamp_channel(n: f64) -> u8 {
    n.round().clamp(0.0, 255.0) as u8
}
