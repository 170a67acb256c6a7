//! Per-run index of triplet companions and known dark-mode colors.

use std::collections::{HashMap, HashSet};

use crate::color::Rgb;

/// State shared between the passes of one transform run.
///
/// Built during the scan of root-like and dark-scoped blocks, then only read
/// while rewriting. A fresh registry is created for every run.
#[derive(Debug, Clone, Default)]
pub struct RgbRegistry {
    available: HashSet<String>,
    dark_colors: HashMap<String, Rgb>,
}

impl RgbRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a triplet name (e.g. `brand-rgb`) as declared somewhere.
    pub fn register_available(&mut self, triplet: impl Into<String>) {
        self.available.insert(triplet.into());
    }

    /// True when a triplet companion with this name exists.
    pub fn is_available(&self, triplet: &str) -> bool {
        self.available.contains(triplet)
    }

    /// Records the dark-mode color of a property, replacing any earlier entry.
    pub fn record_dark_color(&mut self, name: impl Into<String>, color: Rgb) {
        self.dark_colors.insert(name.into(), color);
    }

    /// The dark-mode color last recorded for a property.
    pub fn dark_color_of(&self, name: &str) -> Option<Rgb> {
        self.dark_colors.get(name).copied()
    }

    /// Number of available triplets.
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Number of properties with a known dark color.
    pub fn dark_len(&self) -> usize {
        self.dark_colors.len()
    }
}
