use crate::node::{Node, NodeType};
use crate::token_source::TokenSource;
use crate::tokenizer::{Token, TokenType};
use crate::Css3;
use verbatim_shared::byte_stream::Location;
use verbatim_shared::errors::{CssErrorKind, CssResult};

/// How an ambiguous run of tokens was ended
pub(crate) enum SpanEnd {
    /// By `;`, `}` or the end of the input: the tokens form a declaration
    Declaration,
    /// By `{` (which has been consumed): the tokens form the prelude of a rule
    Block,
}

impl<S: TokenSource> Css3<S> {
    /// Parses either a declaration or a qualified rule. Which one it is only becomes clear at
    /// the token that ends the run: `{` starts a rule block, `;`, `}` and the end of the input
    /// end a declaration.
    pub(crate) fn parse_rule_or_declaration(&mut self) -> CssResult<Node> {
        log::trace!("parse_rule_or_declaration");

        let loc = self.tokens.current_location();

        let (tokens, end) = self.consume_ambiguous_span()?;
        match end {
            SpanEnd::Declaration => {
                Css3::new_fragment(&tokens, self.tokens.current_location()).parse_declaration()
            }
            SpanEnd::Block => self.parse_rule_block(&tokens, loc),
        }
    }

    /// Collects tokens up to the first `;` (included), `{` (consumed but not returned), `}` or
    /// end of the input.
    pub(crate) fn consume_ambiguous_span(&mut self) -> CssResult<(Vec<Token>, SpanEnd)> {
        log::trace!("consume_ambiguous_span");

        let mut tokens = Vec::new();

        loop {
            match self.current().token_type {
                TokenType::Semicolon => {
                    tokens.push(self.consume_any());
                    return Ok((tokens, SpanEnd::Declaration));
                }
                TokenType::Eof => return Ok((tokens, SpanEnd::Declaration)),
                TokenType::RCurly => {
                    if tokens.is_empty() {
                        let kind = CssErrorKind::UnexpectedRightCurlyBracket;
                        return Err(self.error(kind, "expected a rule or declaration"));
                    }
                    // a stray `}` ends the declaration without a semicolon
                    return Ok((tokens, SpanEnd::Declaration));
                }
                TokenType::LCurly => {
                    self.advance();
                    return Ok((tokens, SpanEnd::Block));
                }
                _ => tokens.push(self.consume_any()),
            }
        }
    }

    /// Parses the block of a qualified rule. The opening `{` has been consumed already, the
    /// prelude holds everything before it.
    pub(crate) fn parse_rule_block(&mut self, prelude: &[Token], loc: Location) -> CssResult<Node> {
        log::trace!("parse_rule_block");

        let prelude = Css3::new_fragment(prelude, loc).parse_selector_list()?;
        let block = self.parse_rule_list(true)?;

        if self.current().token_type != TokenType::RCurly {
            return Err(self.error(CssErrorKind::UnclosedBlock, "when consuming a rule"));
        }
        self.advance();

        Ok(Node::new(NodeType::Rule { prelude, block }, loc))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser_config::ParserConfig;
    use crate::walker::Walker;
    use crate::Css3;
    use verbatim_shared::errors::CssErrorKind;

    macro_rules! test {
        ($input:expr, $expected:expr) => {
            let result = Css3::parse_str($input, ParserConfig::default()).unwrap();

            let w = Walker::new(&result);
            assert_eq!(w.walk_to_string(), $expected);
        };
    }

    #[test]
    fn parse_rule() {
        test!(
            "body { color: red }",
            "[StyleSheet (1)]\n  [Rule (1)] body\n    [Declaration] property: color important: false\n      [Value] red\n"
        );
        test!("body { }", "[StyleSheet (1)]\n  [Rule (1)] body\n");
        test!(
            "a, b > c { x: 1; y: 2 }",
            "[StyleSheet (1)]\n  [Rule (2)] a, b > c\n    [Declaration] property: x important: false\n      [Value] 1\n    [Declaration] property: y important: false\n      [Value] 2\n"
        );
        test!("{}", "[StyleSheet (1)]\n  [Rule (0)] \n");
    }

    #[test]
    fn nested_rules() {
        test!(
            "a { b { c: d } }",
            "[StyleSheet (1)]\n  [Rule (1)] a\n    [Rule (1)] b\n      [Declaration] property: c important: false\n        [Value] d\n"
        );
    }

    #[test]
    fn stray_curly_ends_declaration() {
        test!(
            "a { color: red }",
            "[StyleSheet (1)]\n  [Rule (1)] a\n    [Declaration] property: color important: false\n      [Value] red\n"
        );
        test!(
            "color: red",
            "[StyleSheet (1)]\n  [Declaration] property: color important: false\n    [Value] red\n"
        );
    }

    #[test]
    fn unexpected_curly() {
        let err = Css3::parse_str("a { } }", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnexpectedRightCurlyBracket);
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn unclosed_rule() {
        let err = Css3::parse_str("a { color: red", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnclosedBlock);
        assert_eq!(err.offset(), 14);

        let err = Css3::parse_str("a { b { }", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnclosedBlock);
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn declaration_errors_point_at_token() {
        let err = Css3::parse_str("a { color red; }", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::InvalidDeclaration);
        assert_eq!(err.offset(), 13);

        let err = Css3::parse_str("a { 12: red; }", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::InvalidDeclaration);
        assert_eq!(err.offset(), 4);
    }
}
