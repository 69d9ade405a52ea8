use crate::node::{Block, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses the parameters and block of an at-rule like `@media` or `@font-face`. The
    /// parameters are kept as a raw fragment up to the opening `{`, so a `;` or `}` before it
    /// is part of the parameters. The block holds a regular rule list.
    pub(crate) fn parse_nested_at_rule(&mut self) -> CssResult<(Vec<Piece>, Block)> {
        log::trace!("parse_nested_at_rule");

        let params = self.consume_fragment(|t| t.token_type == TokenType::LCurly)?;

        if self.current().token_type != TokenType::LCurly {
            return Err(self.error(CssErrorKind::InvalidMediaAtRule, "expected a block"));
        }
        self.advance();

        let block = self.parse_rule_list(true)?;

        if self.current().token_type != TokenType::RCurly {
            return Err(self.error(CssErrorKind::UnclosedBlock, "when consuming an at-rule"));
        }
        self.advance();

        Ok((params, block))
    }
}
