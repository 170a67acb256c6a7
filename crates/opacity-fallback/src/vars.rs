//! Custom-property naming conventions.
//!
//! A custom property `--brand` has the *property name* `brand`. Its triplet
//! companion is named `brand-rgb` and declared as `--brand-rgb`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix carried by every custom property.
pub const CUSTOM_PROPERTY_PREFIX: &str = "--";

/// Suffix appended to a property name to form its triplet companion.
pub const TRIPLET_SUFFIX: &str = "-rgb";

static VAR_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^var\(--([a-zA-Z0-9_-]+)\)$").expect("var reference pattern is valid")
});

/// Returns the property name of a custom property declaration, or `None`
/// for ordinary properties.
pub fn custom_property_name(property: &str) -> Option<&str> {
    property.strip_prefix(CUSTOM_PROPERTY_PREFIX)
}

/// True when the property name already names a triplet companion.
pub fn is_triplet_name(name: &str) -> bool {
    name.ends_with(TRIPLET_SUFFIX)
}

/// `brand` -> `brand-rgb`.
pub fn triplet_name(name: &str) -> String {
    format!("{}{}", name, TRIPLET_SUFFIX)
}

/// `brand-rgb` -> `--brand-rgb`.
pub fn declared_property(name: &str) -> String {
    format!("{}{}", CUSTOM_PROPERTY_PREFIX, name)
}

/// `brand-rgb` -> `var(--brand-rgb)`.
pub fn reference(name: &str) -> String {
    format!("var({}{})", CUSTOM_PROPERTY_PREFIX, name)
}

/// Reads the property name out of a value that is exactly `var(--name)`.
///
/// Fallback arguments, surrounding tokens or nested functions all disqualify
/// the value.
pub fn read_reference(value: &str) -> Option<&str> {
    VAR_REFERENCE
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
