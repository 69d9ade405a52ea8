use crate::node::{push_filler, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::{Token, TokenType};
use crate::Css3;
use verbatim_shared::errors::CssResult;

mod at_rule;
mod bracket;
mod declaration;
mod function;
mod rule;
mod selector_list;
mod stylesheet;

pub use bracket::BracketKind;

impl<S: TokenSource> Css3<S> {
    /// Returns the current token without consuming it
    pub(crate) fn current(&self) -> &Token {
        self.tokens.current()
    }

    /// Consumes any token
    pub(crate) fn consume_any(&mut self) -> Token {
        self.tokens.take_and_advance()
    }

    /// Skips the current token
    pub(crate) fn advance(&mut self) {
        self.tokens.advance();
    }

    /// Consumes whitespace and comments and returns their raw text
    pub(crate) fn consume_filler(&mut self) -> String {
        let mut filler = String::new();

        while self.current().is_filler() {
            filler.push_str(&self.consume_any().raw);
        }

        filler
    }

    /// Consumes a raw fragment up to (but not including) the first token for which `is_end`
    /// returns true, or the end of the input. Functions and brackets are consumed as a whole, so
    /// their contents never end the fragment.
    ///
    /// Returns the leading filler, the fragment itself and the trailing filler as separate
    /// pieces. Empty pieces are left out.
    pub(crate) fn consume_fragment<F>(&mut self, is_end: F) -> CssResult<Vec<Piece>>
    where
        F: Fn(&Token) -> bool,
    {
        log::trace!("consume_fragment");

        let mut pieces = Vec::new();
        push_filler(&mut pieces, &self.consume_filler());

        let mut fragment = String::new();
        let mut trailing = String::new();

        loop {
            let t = self.current();
            if t.is_eof() || is_end(t) {
                break;
            }

            if t.is_filler() {
                trailing.push_str(&self.consume_any().raw);
                continue;
            }

            fragment.push_str(&trailing);
            trailing.clear();

            let raw = match self.current().token_type {
                TokenType::Function(_) => self.consume_function_span()?,
                TokenType::LBracket => self.consume_bracket_span(BracketKind::Square)?,
                TokenType::LParen => self.consume_bracket_span(BracketKind::Paren)?,
                _ => self.consume_any().raw,
            };
            fragment.push_str(&raw);
        }

        if !fragment.is_empty() {
            pieces.push(Piece::Value(fragment));
        }
        push_filler(&mut pieces, &trailing);

        Ok(pieces)
    }
}
