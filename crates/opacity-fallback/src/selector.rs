//! Selector inspection: opacity suffixes and scope markers.
//!
//! Utility frameworks encode "this color at N% opacity" in the class name,
//! e.g. `.text-white\/60` or `.hover\:bg-primary\/10:hover`. The escaped
//! slash is how the `/` survives in a CSS class selector; some pipelines emit
//! it unescaped, so both forms are recognized.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens marking a block that defines global custom properties.
pub const ROOT_MARKERS: [&str; 2] = [":root", ":host"];

/// Token marking a dark color-scheme scope.
pub const DARK_MARKER: &str = ".dark";

static ESCAPED_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\/([0-9]+)").expect("escaped suffix pattern is valid"));
static BARE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([0-9]+)").expect("bare suffix pattern is valid"));

/// Longest digit run accepted as an opacity percentage.
const MAX_SUFFIX_DIGITS: usize = 3;

/// Extracts the alpha encoded as a `/NN` suffix in `selector`.
///
/// Escaped (`\/NN`) matches are collected first, then bare (`/NN`) matches;
/// the last entry of that pooled list wins. A slash followed by more than
/// three digits is not a suffix. The percentage is clamped to `[0, 100]`.
///
/// ```rust
/// use opacity_fallback::selector::extract_opacity;
///
/// assert_eq!(extract_opacity(r".hover\:bg-primary\/10:hover"), Some(0.1));
/// assert_eq!(extract_opacity(".bg-primary"), None);
/// ```
pub fn extract_opacity(selector: &str) -> Option<f64> {
    let raw = ESCAPED_SUFFIX
        .captures_iter(selector)
        .chain(BARE_SUFFIX.captures_iter(selector))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|digits| digits.len() <= MAX_SUFFIX_DIGITS)
        .last()?;

    let pct: u32 = raw.parse().ok()?;
    Some(f64::from(pct.min(100)) / 100.0)
}

/// True when the selector targets `:root` or `:host`.
pub fn is_root_like(selector: &str) -> bool {
    ROOT_MARKERS.iter().any(|marker| selector.contains(*marker))
}

/// True when the selector is gated on the dark marker.
pub fn is_dark_scoped(selector: &str) -> bool {
    selector.contains(DARK_MARKER)
}

/// Builds the dark-scoped variant of a selector list.
///
/// Each top-level selector gets a `.dark ` ancestor prefix unless it already
/// mentions the marker. Returns `None` for an empty selector list.
///
/// ```rust
/// use opacity_fallback::selector::dark_variant;
///
/// assert_eq!(
///     dark_variant(".a, .dark .b").as_deref(),
///     Some(".dark .a, .dark .b"),
/// );
/// ```
pub fn dark_variant(selector: &str) -> Option<String> {
    let segments: Vec<String> = split_selector_list(selector)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if is_dark_scoped(s) {
                s.to_string()
            } else {
                format!("{} {}", DARK_MARKER, s)
            }
        })
        .collect();

    if segments.is_empty() {
        return None;
    }
    Some(segments.join(", "))
}

/// Splits a selector list on commas outside of `()` and `[]`.
///
/// Escaped characters are skipped, so `\,` never splits.
fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in selector.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);
    parts
}
