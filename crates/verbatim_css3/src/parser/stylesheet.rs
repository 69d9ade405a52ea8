use crate::node::{Block, Node, NodeType};
use crate::parser::rule::SpanEnd;
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::{Css3, Scope};
use std::mem;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses the complete input as a stylesheet
    pub fn parse_stylesheet(&mut self) -> CssResult<Node> {
        log::trace!("parse_stylesheet");

        let loc = self.tokens.current_location();
        let block = self.parse_rule_list(false)?;

        Ok(Node::new(NodeType::StyleSheet { block }, loc))
    }

    /// Parses a list of rules, at-rules, declarations and comments. A nested list ends at the
    /// closing `}` of its block, which is left for the caller. The top-level list runs until the
    /// end of the input.
    pub(crate) fn parse_rule_list(&mut self, nested: bool) -> CssResult<Block> {
        log::trace!("parse_rule_list");

        match self.scope {
            Scope::Stylesheet => {}
            Scope::Fragment => {
                return Err(self.error(CssErrorKind::Unimplemented, "rule lists are not available in a fragment"));
            }
        }

        let mut children = Vec::new();
        let mut before = String::new();

        loop {
            let node = match self.current().token_type {
                TokenType::Eof => break,
                TokenType::RCurly if nested => break,
                TokenType::Whitespace | TokenType::Cdo | TokenType::Cdc => {
                    before.push_str(&self.consume_any().raw);
                    continue;
                }
                TokenType::Comment(_) => {
                    let t = self.consume_any();
                    Node::new(NodeType::Comment { value: t.raw }, t.location)
                }
                TokenType::AtKeyword(_) => self.parse_at_rule()?,
                _ => self.parse_rule_or_declaration()?,
            };

            children.push(node.with_before(mem::take(&mut before)));
        }

        Ok(Block { children, after: before })
    }

    /// Parses the input as a single item with `parse_item`. The item is returned as the only
    /// child of a stylesheet node, which keeps the formatting around it. Anything but filler
    /// after the item fails with an error of the given kind.
    pub(crate) fn parse_single(
        &mut self,
        parse_item: fn(&mut Self) -> CssResult<Node>,
        kind: CssErrorKind,
    ) -> CssResult<Node> {
        log::trace!("parse_single");

        let loc = self.tokens.current_location();
        let before = self.consume_filler();
        let item = parse_item(self)?;

        let after = self.consume_filler();
        if !self.current().is_eof() {
            return Err(self.error(kind, "expected the end of the input"));
        }

        Ok(Node::new(
            NodeType::StyleSheet {
                block: Block {
                    children: vec![item.with_before(before)],
                    after,
                },
            },
            loc,
        ))
    }

    pub(crate) fn parse_single_rule(&mut self) -> CssResult<Node> {
        log::trace!("parse_single_rule");

        if matches!(self.current().token_type, TokenType::AtKeyword(_)) {
            return Err(self.error(CssErrorKind::UnexpectedAtRule, "expected a qualified rule"));
        }

        let loc = self.tokens.current_location();
        let (tokens, end) = self.consume_ambiguous_span()?;
        match end {
            SpanEnd::Block => self.parse_rule_block(&tokens, loc),
            SpanEnd::Declaration => Err(self.error(CssErrorKind::UnclosedBlock, "expected a rule block")),
        }
    }

    pub(crate) fn parse_single_at_rule(&mut self) -> CssResult<Node> {
        log::trace!("parse_single_at_rule");

        if !matches!(self.current().token_type, TokenType::AtKeyword(_)) {
            return Err(self.error(CssErrorKind::UnexpectedAtRule, "expected an at-rule"));
        }

        self.parse_at_rule()
    }

    pub(crate) fn parse_single_declaration(&mut self) -> CssResult<Node> {
        log::trace!("parse_single_declaration");

        let (tokens, end) = self.consume_ambiguous_span()?;
        match end {
            SpanEnd::Declaration => {
                Css3::new_fragment(&tokens, self.tokens.current_location()).parse_declaration()
            }
            SpanEnd::Block => Err(self.error(CssErrorKind::InvalidDeclaration, "unexpected block in a declaration")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::NodeType;
    use crate::parser_config::ParserConfig;
    use crate::stringify::stringify;
    use crate::walker::Walker;
    use crate::Css3;
    use verbatim_shared::errors::CssErrorKind;

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let result = Css3::parse_str($input, ParserConfig::default()).unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
            assert_eq!(stringify(&result), $input);
        };
    }

    #[test]
    fn empty() {
        test!("", "[StyleSheet (0)]\n");
        test!(" \n\t ", "[StyleSheet (0)]\n");

        let node = Css3::parse_str(" \n ", ParserConfig::default()).unwrap();
        assert_eq!(node.block().unwrap().after, " \n ");
    }

    #[test]
    fn comments_become_nodes() {
        test!(
            "/* a */ b {} /* c */",
            "[StyleSheet (3)]\n  [Comment] /* a */\n  [Rule (1)] b\n  [Comment] /* c */\n"
        );
        test!(
            "a { /* x */ color: red; /* y */ }",
            "[StyleSheet (1)]\n  [Rule (1)] a\n    [Comment] /* x */\n    [Declaration] property: color important: false\n      [Value] red\n    [Comment] /* y */\n"
        );
    }

    #[test]
    fn cdo_and_cdc_are_kept_as_filler() {
        test!("<!-- a {} -->", "[StyleSheet (1)]\n  [Rule (1)] a\n");

        let node = Css3::parse_str("<!-- a {} -->\n", ParserConfig::default()).unwrap();
        let block = node.block().unwrap();
        assert_eq!(block.children[0].before, "<!-- ");
        assert_eq!(block.after, " -->\n");

        test!("a { <!-- b: c --> }", "[StyleSheet (1)]\n  [Rule (1)] a\n    [Declaration] property: b important: false\n      [Value] c\n      [Value] -->\n");
    }

    #[test]
    fn leading_formatting() {
        let css = "\n\na {\n  color: red;\n\n  margin: 0\n}\n";
        let node = Css3::parse_str(css, ParserConfig::default()).unwrap();

        let stylesheet = node.block().unwrap();
        let rule = &stylesheet.children[0];
        assert_eq!(rule.before, "\n\n");
        assert_eq!(stylesheet.after, "\n");

        let block = rule.block().unwrap();
        assert_eq!(block.children[0].before, "\n  ");
        assert_eq!(block.children[1].before, "\n\n  ");
        assert_eq!(block.after, "");
        assert!(matches!(*block.children[1].node_type, NodeType::Declaration { .. }));

        assert_eq!(stringify(&node), css);
    }

    #[test]
    fn top_level_stray_curly() {
        let err = Css3::parse_str("}", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnexpectedRightCurlyBracket);
        assert_eq!(err.offset(), 0);
    }
}
