//! Transform options.
//!
//! Options can be built in code or loaded from YAML/JSON:
//!
//! ```yaml
//! properties:
//!   - color
//!   - background-color
//! include_framework_custom_props: false
//! ```
//!
//! Omitted fields keep their defaults. A `properties` list replaces the
//! default list rather than extending it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Properties rewritten when no explicit list is configured.
pub const DEFAULT_PROPERTIES: [&str; 13] = [
    "background-color",
    "color",
    "border-color",
    "outline-color",
    "fill",
    "stroke",
    "caret-color",
    "text-decoration-color",
    "column-rule-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
];

/// Custom properties through which utility frameworks route ring, shadow and
/// gradient colors.
pub const FRAMEWORK_CUSTOM_PROPERTIES: [&str; 10] = [
    "--tw-ring-color",
    "--tw-border-color",
    "--tw-outline-color",
    "--tw-inset-ring-color",
    "--tw-shadow-color",
    "--tw-inset-shadow-color",
    "--tw-drop-shadow-color",
    "--tw-gradient-from",
    "--tw-gradient-via",
    "--tw-gradient-to",
];

/// User-facing transform configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Properties eligible for rewriting.
    pub properties: Vec<String>,
    /// Also rewrite the framework's internal color custom properties.
    pub include_framework_custom_props: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            properties: DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            include_framework_custom_props: true,
        }
    }
}

impl Options {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the property list.
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables the framework custom properties.
    pub fn include_framework_custom_props(mut self, include: bool) -> Self {
        self.include_framework_custom_props = include;
        self
    }

    /// Resolves the set of properties that participate in rewriting.
    pub fn property_set(&self) -> PropertySet {
        let framework: &[&str] = if self.include_framework_custom_props {
            &FRAMEWORK_CUSTOM_PROPERTIES
        } else {
            &[]
        };

        PropertySet::from_iter(
            self.properties
                .iter()
                .map(String::as_str)
                .chain(framework.iter().copied()),
        )
    }

    /// Parses options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content(path)?),
            Some("json") => Self::from_json(&content(path)?),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Ordered, de-duplicated set of participating property names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    names: Vec<String>,
}

impl PropertySet {
    /// True when `property` participates in rewriting.
    pub fn contains(&self, property: &str) -> bool {
        self.names.iter().any(|name| name == property)
    }

    /// Names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PropertySet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Self { names }
    }
}
