use crate::node::{push_filler, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses the value of `@charset "<encoding>";`. Only a single double quoted string is
    /// allowed.
    pub(crate) fn parse_at_rule_charset(&mut self) -> CssResult<Vec<Piece>> {
        log::trace!("parse_at_rule_charset");

        let mut value = Vec::new();
        let filler = self.consume_filler();
        push_filler(&mut value, &filler);

        let t = self.current();
        if !matches!(t.token_type, TokenType::QuotedString(_)) || !t.raw.starts_with('"') {
            return Err(self.error(CssErrorKind::InvalidCharsetAtRule, "expected a double quoted string"));
        }
        value.push(Piece::Value(self.consume_any().raw));

        self.consume_at_rule_end(&mut value, CssErrorKind::InvalidCharsetAtRule)?;

        Ok(value)
    }
}
