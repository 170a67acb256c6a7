//! [`Stylesheet`] tree back to text.
//!
//! Output is two-space indented with one declaration per line. Selector,
//! prelude and value text is written exactly as stored.

use std::fmt::{self, Display, Write};

use super::tree::{AtRule, Declaration, Node, Rule, Stylesheet};

const INDENT: &str = "  ";

impl Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, 0)
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}: ", self.property)?;
        } else {
            write!(f, "{}: {}", self.property, self.value)?;
        }
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rule(f, self, 0)
    }
}

impl Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_at_rule(f, self, 0)
    }
}

fn write_nodes<W: Write>(out: &mut W, nodes: &[Node], depth: usize) -> fmt::Result {
    for node in nodes {
        match node {
            Node::Rule(rule) => write_rule(out, rule, depth)?,
            Node::AtRule(at_rule) => write_at_rule(out, at_rule, depth)?,
            Node::Declaration(decl) => {
                indent(out, depth)?;
                writeln!(out, "{};", decl)?;
            }
            Node::Comment(text) => {
                indent(out, depth)?;
                writeln!(out, "{}", text)?;
            }
        }
    }
    Ok(())
}

fn write_rule<W: Write>(out: &mut W, rule: &Rule, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    writeln!(out, "{} {{", rule.selector)?;
    write_nodes(out, &rule.nodes, depth + 1)?;
    indent(out, depth)?;
    out.write_str("}\n")
}

fn write_at_rule<W: Write>(out: &mut W, at_rule: &AtRule, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    write!(out, "@{}", at_rule.name)?;
    if !at_rule.params.is_empty() {
        write!(out, " {}", at_rule.params)?;
    }

    match &at_rule.nodes {
        None => out.write_str(";\n"),
        Some(children) => {
            out.write_str(" {\n")?;
            write_nodes(out, children, depth + 1)?;
            indent(out, depth)?;
            out.write_str("}\n")
        }
    }
}

fn indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}
