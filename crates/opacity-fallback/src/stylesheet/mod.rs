//! Minimal stylesheet tree used by the transform.
//!
//! The transform only needs a small slice of a CSS object model: rules with a
//! selector and ordered declarations, depth-first traversal, insertion of a
//! declaration after another one, cloning a rule under a new selector, and
//! inserting a rule after a sibling. This module provides exactly that, plus
//! a parser and serializer so whole files can be processed.
//!
//! # Module Structure
//!
//! - [`tree`]: node types and traversal
//! - [`parser`]: text to tree, built on `cssparser`
//! - `serialize`: tree to text via `Display`
//!
//! # Example
//!
//! ```rust
//! use opacity_fallback::stylesheet::Stylesheet;
//!
//! let sheet = Stylesheet::parse(":root { --brand: #3366ff; }").unwrap();
//! let mut selectors = Vec::new();
//! sheet.walk_rules(|rule| selectors.push(rule.selector.clone()));
//! assert_eq!(selectors, vec![":root"]);
//! ```

pub mod parser;
mod serialize;
pub mod tree;

pub use parser::parse;
pub use tree::{AtRule, Declaration, Node, Rule, Stylesheet};
