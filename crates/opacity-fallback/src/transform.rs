//! The opacity fallback rewrite.
//!
//! # Passes
//!
//! 1. **Scan** root-like (`:root`, `:host`) and dark-scoped (`.dark`) blocks.
//!    Every custom property holding a parseable color gets a triplet
//!    companion (`--brand-rgb: 51, 102, 255`) declared right after it, unless
//!    the block already declares one. Dark-scoped blocks additionally record
//!    the property's dark color.
//! 2. **Rewrite** every block whose selector carries an opacity suffix.
//!    Participating declarations whose value is exactly `var(--brand)` become
//!    `rgba(var(--brand-rgb), 0.5)` when the triplet exists.
//! 3. **Synthesize** a `.dark`-prefixed copy of each rewritten block when the
//!    dark colors of the referenced properties are known, with the colors
//!    resolved to literals. The copy is inserted right after the block.
//!
//! A block's declarations include those of its nested rules and at-rule
//! blocks, so a nested variant such as `&:hover { @media ... { ... } }` is
//! rewritten under its parent's suffix. The dark copy is cloned after the
//! whole block has been rewritten.
//!
//! The registry built in the scan is the only shared state and is read-only
//! once rewriting starts. Every call to [`apply`] starts from an empty one.
//!
//! # Example
//!
//! ```rust
//! use opacity_fallback::{apply, Options, Stylesheet};
//!
//! let mut sheet = Stylesheet::parse(r#"
//!     :root { --brand: #3366ff; }
//!     .dark { --brand: #112244; }
//!     .text-brand\/50 { color: var(--brand); }
//! "#).unwrap();
//!
//! let report = apply(&mut sheet, &Options::default());
//! assert_eq!(report.declarations_rewritten, 1);
//! assert_eq!(report.dark_overrides, 1);
//! assert!(sheet.to_css().contains("color: rgba(var(--brand-rgb), 0.5);"));
//! assert!(sheet.to_css().contains(".dark .text-brand\\/50 {\n  color: rgba(17, 34, 68, 0.5);"));
//! ```

use std::collections::HashSet;

use crate::color::{parse_color_lenient, Rgb};
use crate::options::{Options, PropertySet};
use crate::registry::RgbRegistry;
use crate::selector::{dark_variant, extract_opacity, is_dark_scoped, is_root_like};
use crate::stylesheet::{Declaration, Rule, Stylesheet};
use crate::vars::{
    custom_property_name, declared_property, is_triplet_name, read_reference, reference,
    triplet_name,
};

/// Counts describing what a run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Triplet declarations inserted.
    pub triplets_generated: usize,
    /// Colors whose triplet was already declared by the source.
    pub triplets_existing: usize,
    /// Distinct properties with a known dark color.
    pub dark_colors_recorded: usize,
    /// Declarations rewritten to `rgba(var(--x-rgb), alpha)`.
    pub declarations_rewritten: usize,
    /// Dark override rules inserted.
    pub dark_overrides: usize,
}

impl TransformReport {
    /// True when the run left the stylesheet untouched.
    pub fn is_noop(&self) -> bool {
        self.triplets_generated == 0 && self.declarations_rewritten == 0 && self.dark_overrides == 0
    }
}

/// Runs the full transform over `sheet` in place.
pub fn apply(sheet: &mut Stylesheet, options: &Options) -> TransformReport {
    let properties = options.property_set();
    let mut run = Run::new(&properties);
    run.scan(sheet);
    run.rewrite(sheet);
    run.report.dark_colors_recorded = run.registry.dark_len();

    tracing::debug!(
        triplets_generated = run.report.triplets_generated,
        triplets_existing = run.report.triplets_existing,
        dark_colors = run.report.dark_colors_recorded,
        rewritten = run.report.declarations_rewritten,
        dark_overrides = run.report.dark_overrides,
        "opacity fallback applied"
    );
    run.report
}

/// One transform invocation: participating properties plus the registry it
/// builds.
struct Run<'a> {
    properties: &'a PropertySet,
    registry: RgbRegistry,
    report: TransformReport,
}

/// A declaration rewritten in the current block.
struct Touched {
    property: String,
    source: String,
}

impl<'a> Run<'a> {
    fn new(properties: &'a PropertySet) -> Self {
        Self {
            properties,
            registry: RgbRegistry::new(),
            report: TransformReport::default(),
        }
    }

    /// Triplet generation and dark color recording, one traversal.
    fn scan(&mut self, sheet: &mut Stylesheet) {
        sheet.walk_rules_mut(|rule| {
            let dark = is_dark_scoped(&rule.selector);
            if !(dark || is_root_like(&rule.selector)) {
                return;
            }
            self.generate_triplets(rule);
            if dark {
                self.record_dark_colors(rule);
            }
        });
    }

    fn generate_triplets(&mut self, rule: &mut Rule) {
        let mut preexisting = HashSet::new();
        rule.walk_declarations(|d| {
            preexisting.insert(d.property.clone());
        });
        let mut declared = preexisting.clone();
        let selector = rule.selector.clone();

        rule.walk_declarations_inserting(|decl| {
            let (name, rgb) = color_definition(decl)?;
            let triplet = triplet_name(name);
            let triplet_property = declared_property(&triplet);
            self.registry.register_available(triplet);

            if declared.contains(&triplet_property) {
                if preexisting.contains(&triplet_property) {
                    self.report.triplets_existing += 1;
                }
                return None;
            }

            tracing::debug!(
                selector = %selector,
                property = %triplet_property,
                value = %rgb.triplet(),
                "generating triplet"
            );
            declared.insert(triplet_property.clone());
            self.report.triplets_generated += 1;
            Some(Declaration::new(triplet_property, rgb.triplet()))
        });
    }

    fn record_dark_colors(&mut self, rule: &Rule) {
        rule.walk_declarations(|decl| {
            if let Some((name, rgb)) = color_definition(decl) {
                tracing::debug!(property = name, ?rgb, "recording dark color");
                self.registry.record_dark_color(name, rgb);
            }
        });
    }

    /// Rewrites suffixed blocks and inserts their dark overrides.
    fn rewrite(&mut self, sheet: &mut Stylesheet) {
        sheet.walk_rules_inserting(|rule| self.rewrite_rule(rule));
    }

    fn rewrite_rule(&mut self, rule: &mut Rule) -> Option<Rule> {
        let alpha = extract_opacity(&rule.selector)?;

        let mut touched = Vec::new();
        let properties = self.properties;
        let registry = &self.registry;
        rule.walk_declarations_mut(|decl| {
            if !properties.contains(&decl.property) {
                return;
            }
            let Some(source) = read_reference(&decl.value) else {
                return;
            };
            let triplet = triplet_name(source);
            if !registry.is_available(&triplet) {
                tracing::trace!(property = %decl.property, source, "no triplet available");
                return;
            }

            let source = source.to_string();
            decl.value = format!("rgba({}, {})", reference(&triplet), alpha);
            touched.push(Touched {
                property: decl.property.clone(),
                source,
            });
        });

        if touched.is_empty() {
            return None;
        }
        self.report.declarations_rewritten += touched.len();
        tracing::debug!(
            selector = %rule.selector,
            alpha,
            count = touched.len(),
            "rewrote declarations"
        );

        if is_dark_scoped(&rule.selector) {
            return None;
        }
        self.dark_override(rule, &touched, alpha)
    }

    fn dark_override(&mut self, rule: &Rule, touched: &[Touched], alpha: f64) -> Option<Rule> {
        let resolved: Vec<(&str, Rgb)> = touched
            .iter()
            .filter_map(|t| {
                self.registry
                    .dark_color_of(&t.source)
                    .map(|rgb| (t.property.as_str(), rgb))
            })
            .collect();
        if resolved.is_empty() {
            return None;
        }

        let selector = dark_variant(&rule.selector)?;
        let mut dark_rule = rule.clone_with_selector(selector);
        dark_rule.walk_declarations_mut(|decl| {
            for (property, rgb) in &resolved {
                if decl.property == *property {
                    decl.value = rgb.to_rgba(alpha);
                }
            }
        });

        tracing::debug!(selector = %dark_rule.selector, "synthesized dark override");
        self.report.dark_overrides += 1;
        Some(dark_rule)
    }
}

/// A custom property (not itself a triplet) whose value parses as a color.
fn color_definition(decl: &Declaration) -> Option<(&str, Rgb)> {
    let name = custom_property_name(&decl.property)?;
    if is_triplet_name(name) {
        return None;
    }
    parse_color_lenient(&decl.value).map(|rgb| (name, rgb))
}
