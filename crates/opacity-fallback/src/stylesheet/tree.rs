//! Stylesheet tree and traversal.

use crate::error::Result;

/// A parsed stylesheet: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// A node in a stylesheet or block body.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    /// A preserved `/*! ... */` comment, delimiters included.
    Comment(String),
}

/// A qualified rule: `selector { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Selector text as written, escapes included.
    pub selector: String,
    /// Declarations and nested rules, in source order.
    pub nodes: Vec<Node>,
}

/// An at-rule, with or without a block (`@media ... { }`, `@import ...;`).
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    /// Prelude text between the name and the block or semicolon.
    pub params: String,
    /// Block contents; `None` for statement at-rules.
    pub nodes: Option<Vec<Node>>,
}

/// A `property: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Value text without any `!important` flag.
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }
}

impl Rule {
    /// Creates an empty rule.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
        }
    }

    /// Appends a declaration, builder style.
    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.nodes
            .push(Node::Declaration(Declaration::new(property, value)));
        self
    }

    /// Direct declarations of this rule, in order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Mutable access to the direct declarations of this rule.
    pub fn declarations_mut(&mut self) -> impl Iterator<Item = &mut Declaration> {
        self.nodes.iter_mut().filter_map(|node| match node {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Appends a nested rule or at-rule, builder style.
    pub fn with_child(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// True when a direct declaration with this exact property exists.
    pub fn has_declaration(&self, property: &str) -> bool {
        self.declarations().any(|decl| decl.property == property)
    }

    /// Visits every declaration in this rule's body depth-first, descending
    /// into nested rules and at-rule blocks.
    pub fn walk_declarations<F>(&self, mut visit: F)
    where
        F: FnMut(&Declaration),
    {
        walk_decls(&self.nodes, &mut visit);
    }

    /// Mutable variant of [`walk_declarations`](Self::walk_declarations).
    pub fn walk_declarations_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Declaration),
    {
        walk_decls_inserting(&mut self.nodes, &mut |decl: &mut Declaration| {
            visit(decl);
            None
        });
    }

    /// Deep declaration walk that inserts the declaration returned by `visit`
    /// immediately after the visited one, in the same block.
    ///
    /// Inserted declarations are not visited.
    pub fn walk_declarations_inserting<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Declaration) -> Option<Declaration>,
    {
        walk_decls_inserting(&mut self.nodes, &mut visit);
    }

    /// Deep copy of this rule under a different selector.
    pub fn clone_with_selector(&self, selector: impl Into<String>) -> Rule {
        Rule {
            selector: selector.into(),
            nodes: self.nodes.clone(),
        }
    }
}

impl AtRule {
    /// Creates an at-rule with an empty block.
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: Some(Vec::new()),
        }
    }

    /// Appends a child node, builder style.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.nodes.get_or_insert_with(Vec::new).push(node.into());
        self
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<AtRule> for Node {
    fn from(at_rule: AtRule) -> Self {
        Node::AtRule(at_rule)
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Declaration(decl)
    }
}

impl Stylesheet {
    /// Creates an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses stylesheet text.
    pub fn parse(css: &str) -> Result<Self> {
        super::parser::parse(css)
    }

    /// Appends a top-level node, builder style.
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Serializes the stylesheet.
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    /// Visits every rule depth-first, parents before their nested rules.
    pub fn walk_rules<F>(&self, mut visit: F)
    where
        F: FnMut(&Rule),
    {
        walk(&self.nodes, &mut visit);
    }

    /// Mutable variant of [`walk_rules`](Self::walk_rules).
    pub fn walk_rules_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Rule),
    {
        walk_inserting(&mut self.nodes, &mut |rule: &mut Rule| {
            visit(rule);
            None
        });
    }

    /// Visits every rule and inserts the rule returned by `visit`, if any,
    /// immediately after the visited one.
    ///
    /// Inserted rules are not visited by the same walk, so a visitor that
    /// always returns a rule still terminates.
    pub fn walk_rules_inserting<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Rule) -> Option<Rule>,
    {
        walk_inserting(&mut self.nodes, &mut visit);
    }
}

fn walk<F>(nodes: &[Node], visit: &mut F)
where
    F: FnMut(&Rule),
{
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                visit(rule);
                walk(&rule.nodes, visit);
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = &at_rule.nodes {
                    walk(children, visit);
                }
            }
            Node::Declaration(_) | Node::Comment(_) => {}
        }
    }
}

fn walk_inserting<F>(nodes: &mut Vec<Node>, visit: &mut F)
where
    F: FnMut(&mut Rule) -> Option<Rule>,
{
    let mut i = 0;
    while i < nodes.len() {
        let inserted = match &mut nodes[i] {
            Node::Rule(rule) => {
                let inserted = visit(rule);
                walk_inserting(&mut rule.nodes, visit);
                inserted
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    walk_inserting(children, visit);
                }
                None
            }
            Node::Declaration(_) | Node::Comment(_) => None,
        };

        i += 1;
        if let Some(rule) = inserted {
            nodes.insert(i, Node::Rule(rule));
            i += 1;
        }
    }
}

fn walk_decls<F>(nodes: &[Node], visit: &mut F)
where
    F: FnMut(&Declaration),
{
    for node in nodes {
        match node {
            Node::Declaration(decl) => visit(decl),
            Node::Rule(rule) => walk_decls(&rule.nodes, visit),
            Node::AtRule(at_rule) => {
                if let Some(children) = &at_rule.nodes {
                    walk_decls(children, visit);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

fn walk_decls_inserting<F>(nodes: &mut Vec<Node>, visit: &mut F)
where
    F: FnMut(&mut Declaration) -> Option<Declaration>,
{
    let mut i = 0;
    while i < nodes.len() {
        let inserted = match &mut nodes[i] {
            Node::Declaration(decl) => visit(decl),
            Node::Rule(rule) => {
                walk_decls_inserting(&mut rule.nodes, visit);
                None
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    walk_decls_inserting(children, visit);
                }
                None
            }
            Node::Comment(_) => None,
        };

        i += 1;
        if let Some(decl) = inserted {
            nodes.insert(i, Node::Declaration(decl));
            i += 1;
        }
    }
}
