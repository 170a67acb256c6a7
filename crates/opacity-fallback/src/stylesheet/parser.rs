//! Stylesheet text to [`Stylesheet`] tree.
//!
//! Built on `cssparser` for tokenization, comments and escapes. Selectors,
//! at-rule preludes and declaration values are not interpreted: the raw source
//! slice is kept, so escapes like `\/` and `\:` in utility class names survive
//! unchanged through a parse/serialize round trip.
//!
//! Comments between items are dropped, except `/*! ... */` comments, which
//! are kept as [`Node::Comment`] the way CSS minifiers keep license banners.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use super::tree::{AtRule, Declaration, Node, Rule, Stylesheet};
use crate::error::{Error, Result};

/// Parses stylesheet text.
///
/// Invalid items inside a block are dropped; a malformed top-level rule is an
/// [`Error::Parse`].
pub fn parse(css: &str) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut tree_parser = TreeParser;

    let mut items = cssparser::StyleSheetParser::new(&mut parser, &mut tree_parser);

    let mut nodes = Vec::new();
    loop {
        let before = items.input.position();
        let next = items.next();
        nodes.extend(preserved_comments(items.input.slice_from(before)));

        match next {
            None => break,
            Some(Ok(node)) => nodes.push(node),
            Some(Err((e, _))) => {
                return Err(Error::Parse {
                    line: e.location.line + 1,
                    column: e.location.column,
                    message: format!("{:?}", e.kind),
                });
            }
        }
    }

    Ok(Stylesheet { nodes })
}

struct TreeParser;

impl TreeParser {
    fn parse_body<'i, 't>(&mut self, input: &mut Parser<'i, 't>) -> Vec<Node> {
        let mut items = RuleBodyParser::new(input, self);
        let mut nodes = Vec::new();
        loop {
            let before = items.input.position();
            let next = items.next();
            nodes.extend(preserved_comments(items.input.slice_from(before)));

            match next {
                None => break,
                Some(Ok(node)) => nodes.push(node),
                Some(Err((e, source))) => {
                    tracing::debug!(
                        line = e.location.line + 1,
                        column = e.location.column,
                        source,
                        "dropping invalid block item"
                    );
                }
            }
        }
        nodes
    }
}

/// Consumes the rest of `input` and returns its trimmed source text.
fn consume_raw<'i, 't>(input: &mut Parser<'i, 't>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_string()
}

/// `/*! ... */` comments at the start of `consumed`, the text a parser
/// iterator skipped over before (and including) its next item.
fn preserved_comments(consumed: &str) -> Vec<Node> {
    let mut comments = Vec::new();
    let mut rest = consumed;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ';');
        let Some(body) = rest.strip_prefix("/*") else {
            break;
        };
        let Some(end) = body.find("*/") else {
            break;
        };
        let comment = &rest[..end + 4];
        if comment.starts_with("/*!") {
            comments.push(Node::Comment(comment.to_string()));
        }
        rest = &body[end + 2..];
    }
    comments
}

/// Splits a trailing `!important` off a declaration value.
fn split_important(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    if let Some(bang) = trimmed.rfind('!') {
        if trimmed[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (trimmed[..bang].trim_end().to_string(), true);
        }
    }
    (trimmed.to_string(), false)
}

impl<'i> QualifiedRuleParser<'i> for TreeParser {
    type Prelude = String;
    type QualifiedRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(consume_raw(input))
    }

    fn parse_block<'t>(
        &mut self,
        selector: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let nodes = self.parse_body(input);
        Ok(Node::Rule(Rule { selector, nodes }))
    }
}

impl<'i> AtRuleParser<'i> for TreeParser {
    type Prelude = (String, String);
    type AtRule = Node;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok((name.as_ref().to_string(), consume_raw(input)))
    }

    fn rule_without_block(
        &mut self,
        (name, params): Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(Node::AtRule(AtRule {
            name,
            params,
            nodes: None,
        }))
    }

    fn parse_block<'t>(
        &mut self,
        (name, params): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let nodes = self.parse_body(input);
        Ok(Node::AtRule(AtRule {
            name,
            params,
            nodes: Some(nodes),
        }))
    }
}

impl<'i> DeclarationParser<'i> for TreeParser {
    type Declaration = Node;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        loop {
            match input.next_including_whitespace_and_comments() {
                // `a:hover { ... }` inside a block is a nested rule, not a declaration.
                Ok(Token::CurlyBracketBlock) => {
                    return Err(input.new_custom_error::<(), ()>(()));
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }

        let (value, important) = split_important(input.slice_from(start));
        Ok(Node::Declaration(Declaration {
            property: name.as_ref().to_string(),
            value,
            important,
        }))
    }
}

impl<'i> RuleBodyItemParser<'i, Node, ()> for TreeParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_rule(sheet: &Stylesheet) -> &Rule {
        match sheet.nodes.as_slice() {
            [Node::Rule(rule)] => rule,
            other => panic!("Expected a single rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_rule() {
        let sheet = parse(":root { --brand: #3366ff; color: red }").unwrap();
        let rule = only_rule(&sheet);
        assert_eq!(rule.selector, ":root");

        let decls: Vec<_> = rule
            .declarations()
            .map(|d| (d.property.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(decls, vec![("--brand", "#3366ff"), ("color", "red")]);
    }

    #[test]
    fn test_parse_keeps_escaped_selector() {
        let sheet = parse(r".hover\:bg-primary\/10:hover { color: var(--primary); }").unwrap();
        assert_eq!(only_rule(&sheet).selector, r".hover\:bg-primary\/10:hover");
    }

    #[test]
    fn test_parse_keeps_raw_values() {
        let sheet = parse(".a { background-color: rgb(255 0 0 / .5); --x: 1px  2px; }").unwrap();
        let values: Vec<_> = only_rule(&sheet)
            .declarations()
            .map(|d| d.value.clone())
            .collect();
        assert_eq!(values, vec!["rgb(255 0 0 / .5)", "1px  2px"]);
    }

    #[test]
    fn test_parse_important() {
        let sheet = parse(".a { color: var(--brand) !important; fill: red ! IMPORTANT }").unwrap();
        let decls: Vec<_> = only_rule(&sheet).declarations().cloned().collect();
        assert_eq!(decls[0].value, "var(--brand)");
        assert!(decls[0].important);
        assert_eq!(decls[1].value, "red");
        assert!(decls[1].important);
    }

    #[test]
    fn test_parse_at_rules() {
        let css = "@import url(base.css);\n@media (min-width: 640px) { .a { color: red; } }";
        let sheet = parse(css).unwrap();
        assert_eq!(sheet.nodes.len(), 2);

        match &sheet.nodes[0] {
            Node::AtRule(at) => {
                assert_eq!(at.name, "import");
                assert_eq!(at.params, "url(base.css)");
                assert!(at.nodes.is_none());
            }
            other => panic!("Expected @import, got {:?}", other),
        }
        match &sheet.nodes[1] {
            Node::AtRule(at) => {
                assert_eq!(at.name, "media");
                assert_eq!(at.params, "(min-width: 640px)");
                assert_eq!(at.nodes.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("Expected @media, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_declaration_block_at_rule() {
        let sheet = parse("@font-face { font-family: Inter; src: url(inter.woff2); }").unwrap();
        match &sheet.nodes[0] {
            Node::AtRule(at) => {
                let children = at.nodes.as_ref().unwrap();
                assert!(matches!(&children[0], Node::Declaration(d) if d.property == "font-family"));
                assert!(matches!(&children[1], Node::Declaration(d) if d.value == "url(inter.woff2)"));
            }
            other => panic!("Expected @font-face, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_rules() {
        let sheet = parse(".card { color: red; &:hover { color: blue; } }").unwrap();
        let rule = only_rule(&sheet);
        assert_eq!(rule.nodes.len(), 2);
        assert!(matches!(&rule.nodes[1], Node::Rule(r) if r.selector == "&:hover"));
    }

    #[test]
    fn test_parse_drops_comments() {
        let sheet = parse("/* header */ .a { /* inline */ color: red; }").unwrap();
        assert_eq!(only_rule(&sheet).declarations().count(), 1);
    }

    #[test]
    fn test_parse_keeps_preserved_comments() {
        let css = "/*! license v1 */\n/* dropped */\n.a {\n  /*! keep */\n  color: red; /* gone */\n}\n/*! tail */";
        let sheet = parse(css).unwrap();

        assert_eq!(sheet.nodes.len(), 3);
        assert_eq!(sheet.nodes[0], Node::Comment("/*! license v1 */".into()));
        assert_eq!(sheet.nodes[2], Node::Comment("/*! tail */".into()));
        match &sheet.nodes[1] {
            Node::Rule(rule) => {
                assert_eq!(rule.nodes[0], Node::Comment("/*! keep */".into()));
                assert_eq!(rule.declarations().count(), 1);
            }
            other => panic!("Expected rule, got {:?}", other),
        }
    }

    #[test]
    fn test_preserved_comments_only_leading() {
        assert_eq!(
            preserved_comments(" ;/*! a */ /* b */ /*! c */ .x { /*! inner */ }"),
            vec![
                Node::Comment("/*! a */".into()),
                Node::Comment("/*! c */".into()),
            ]
        );
        assert!(preserved_comments("/*! unterminated").is_empty());
    }

    #[test]
    fn test_parse_empty_custom_property() {
        let sheet = parse(":root { --tw-ring-inset: ; }").unwrap();
        let decl = only_rule(&sheet).declarations().next().unwrap();
        assert_eq!(decl.property, "--tw-ring-inset");
        assert_eq!(decl.value, "");
    }

    #[test]
    fn test_parse_error_reports_location() {
        let err = parse(".a { color: red; }\n.b").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_important() {
        assert_eq!(split_important("red"), ("red".to_string(), false));
        assert_eq!(split_important("red !important"), ("red".to_string(), true));
        assert_eq!(split_important("a!b"), ("a!b".to_string(), false));
    }
}
