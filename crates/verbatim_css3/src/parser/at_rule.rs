mod charset;
mod import;
mod namespace;
mod nested;

use crate::node::{push_filler, AtRuleName, Node, NodeType, NonNestedAtRuleName, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses an at-rule, starting at its at-keyword. The name is matched on the source text of
    /// the keyword, so escaped or differently cased names are not recognized.
    pub(crate) fn parse_at_rule(&mut self) -> CssResult<Node> {
        log::trace!("parse_at_rule");

        let keyword = self.current().raw.strip_prefix('@').unwrap_or_default();
        let Some(name) = AtRuleName::from_keyword(keyword) else {
            let message = format!("unknown at-rule {}", self.current().raw);
            return Err(self.error(CssErrorKind::UnexpectedAtRule, &message));
        };

        let loc = self.tokens.current_location();
        self.advance();

        match name {
            AtRuleName::NonNested(name) => {
                let value = match name {
                    NonNestedAtRuleName::Charset => self.parse_at_rule_charset()?,
                    NonNestedAtRuleName::Import => self.parse_at_rule_import()?,
                    NonNestedAtRuleName::Namespace => self.parse_at_rule_namespace()?,
                };
                Ok(Node::new(NodeType::NonNestedAtRule { name, value }, loc))
            }
            AtRuleName::Nested(name) => {
                let (params, block) = self.parse_nested_at_rule()?;
                Ok(Node::new(NodeType::NestedAtRule { name, params, block }, loc))
            }
        }
    }

    /// Consumes the url of an `@import` or `@namespace` rule: a url token, a string or a `url(`
    /// function.
    fn consume_at_rule_url(&mut self, kind: CssErrorKind) -> CssResult<Piece> {
        match &self.current().token_type {
            TokenType::Url(_) | TokenType::QuotedString(_) => Ok(Piece::Value(self.consume_any().raw)),
            TokenType::Function(name) if name.eq_ignore_ascii_case("url") => {
                Ok(Piece::Function(self.consume_function_span()?))
            }
            _ => Err(self.error(kind, "expected a string or url")),
        }
    }

    /// Consumes the end of a non-nested at-rule: filler followed by `;`, `}` or the end of the
    /// input. The semicolon is kept as filler, a `}` is left for the enclosing block.
    fn consume_at_rule_end(&mut self, pieces: &mut Vec<Piece>, kind: CssErrorKind) -> CssResult<()> {
        let filler = self.consume_filler();
        push_filler(pieces, &filler);

        match self.current().token_type {
            TokenType::Semicolon => {
                push_filler(pieces, &self.consume_any().raw);
                Ok(())
            }
            TokenType::Eof | TokenType::RCurly => Ok(()),
            _ => Err(self.error(kind, "expected a semicolon")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser_config::ParserConfig;
    use crate::stringify::stringify;
    use crate::walker::Walker;
    use crate::Css3;
    use verbatim_shared::errors::CssErrorKind;

    #[test]
    fn unknown_at_rule() {
        let err = Css3::parse_str("a {}\n@layer base;", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnexpectedAtRule);
        assert_eq!(err.offset(), 5);
        assert_eq!(err.message, "unknown at-rule @layer");
    }

    #[test]
    fn names_are_case_sensitive() {
        let err = Css3::parse_str("@MEDIA screen {}", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnexpectedAtRule);

        let err = Css3::parse_str("@\\69mport 'x';", ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnexpectedAtRule);
    }

    #[test]
    fn at_rules_in_blocks() {
        let css = "@media print { @import 'x.css' }";
        let node = Css3::parse_str(css, ParserConfig::default()).unwrap();
        assert_eq!(
            Walker::new(&node).walk_to_string(),
            "[StyleSheet (1)]\n  [NestedAtRule] @media print\n    [NonNestedAtRule] @import 'x.css'\n"
        );
        assert_eq!(stringify(&node), css);
    }
}
