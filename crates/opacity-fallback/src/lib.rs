//! # Opacity Fallback - Alpha-aware colors for custom-property utilities
//!
//! Utility CSS frameworks generate classes like `.text-brand\/50` ("brand
//! color at 50% opacity"). When the brand color lives in a custom property,
//! the generated rule often reads `color: var(--brand)`, and the opacity
//! suffix is lost because a custom property holding `#3366ff` cannot be given
//! an alpha channel after the fact.
//!
//! `opacity-fallback` repairs such stylesheets:
//!
//! - next to every color custom property in `:root`, `:host` and `.dark`
//!   blocks it declares a numeric triplet (`--brand-rgb: 51, 102, 255`)
//! - declarations in suffixed rules are rewritten to
//!   `rgba(var(--brand-rgb), 0.5)`
//! - when the dark-mode value of the property is known, a `.dark` copy of the
//!   rule with the color resolved to a literal is inserted after it
//!
//! Colors it cannot parse (named colors, `oklch()`, `color()`, ...) are left
//! alone, and so is every rule that refers to them.
//!
//! ## Quick Start
//!
//! ```rust
//! use opacity_fallback::{process_css, Options};
//!
//! let css = r#"
//! :root { --brand: #3366ff; }
//! .dark { --brand: #112244; }
//! .text-brand\/50 { color: var(--brand); }
//! "#;
//!
//! let out = process_css(css, &Options::default()).unwrap();
//! assert_eq!(out, r#":root {
//!   --brand: #3366ff;
//!   --brand-rgb: 51, 102, 255;
//! }
//! .dark {
//!   --brand: #112244;
//!   --brand-rgb: 17, 34, 68;
//! }
//! .text-brand\/50 {
//!   color: rgba(var(--brand-rgb), 0.5);
//! }
//! .dark .text-brand\/50 {
//!   color: rgba(17, 34, 68, 0.5);
//! }
//! "#);
//! ```
//!
//! ## Working on a Tree
//!
//! [`apply`] runs on an already parsed [`Stylesheet`] and reports what it
//! changed:
//!
//! ```rust
//! use opacity_fallback::{apply, Options, Rule, Stylesheet};
//!
//! let mut sheet = Stylesheet::new()
//!     .with(Rule::new(":root").declare("--accent", "rgb(255 0 0)"))
//!     .with(Rule::new(".bg-accent/20").declare("background-color", "var(--accent)"));
//!
//! let report = apply(&mut sheet, &Options::default());
//! assert_eq!(report.triplets_generated, 1);
//! assert_eq!(report.declarations_rewritten, 1);
//! ```
//!
//! ## Options
//!
//! [`Options`] selects the properties that take part in rewriting. They can
//! be loaded from YAML or JSON with [`Options::from_path`].

pub mod color;
mod error;
pub mod options;
pub mod registry;
pub mod selector;
pub mod stylesheet;
pub mod transform;
pub mod vars;

pub use color::Rgb;
pub use error::{Error, Result};
pub use options::{Options, PropertySet, DEFAULT_PROPERTIES, FRAMEWORK_CUSTOM_PROPERTIES};
pub use registry::RgbRegistry;
pub use stylesheet::{AtRule, Declaration, Node, Rule, Stylesheet};
pub use transform::{apply, TransformReport};

/// Parses `css`, applies the transform and serializes the result.
pub fn process_css(css: &str, options: &Options) -> Result<String> {
    let mut sheet = Stylesheet::parse(css)?;
    apply(&mut sheet, options);
    Ok(sheet.to_css())
}
