use crate::node::Piece;
use crate::parser::BracketKind;
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use std::mem;
use verbatim_shared::errors::CssResult;

impl<S: TokenSource> Css3<S> {
    /// Parses the prelude of a qualified rule into selectors, split on top-level commas.
    ///
    /// The result alternates filler and selectors and always starts and ends with filler. Filler
    /// in front of a comma, the comma and the filler after it are placed in the slot before the
    /// next selector. Filler inside a selector stays part of the selector.
    pub(crate) fn parse_selector_list(&mut self) -> CssResult<Vec<Piece>> {
        log::trace!("parse_selector_list");

        let mut prelude = Vec::new();
        // filler in front of the current selector
        let mut slot = String::new();
        let mut selector = String::new();
        // filler after the last structural token of the current selector
        let mut pending = String::new();

        loop {
            let raw = match self.current().token_type {
                TokenType::Eof => break,
                TokenType::Comma => {
                    prelude.push(Piece::Filler(mem::take(&mut slot)));
                    prelude.push(Piece::Value(mem::take(&mut selector)));

                    slot = mem::take(&mut pending);
                    slot.push_str(&self.consume_any().raw);
                    continue;
                }
                TokenType::Whitespace | TokenType::Comment(_) => {
                    let raw = self.consume_any().raw;
                    if selector.is_empty() {
                        slot.push_str(&raw);
                    } else {
                        pending.push_str(&raw);
                    }
                    continue;
                }
                TokenType::Function(_) => self.consume_function_span()?,
                TokenType::LBracket => self.consume_bracket_span(BracketKind::Square)?,
                TokenType::LParen => self.consume_bracket_span(BracketKind::Paren)?,
                _ => self.consume_any().raw,
            };

            selector.push_str(&mem::take(&mut pending));
            selector.push_str(&raw);
        }

        if prelude.is_empty() && selector.is_empty() {
            slot.push_str(&pending);
            prelude.push(Piece::Filler(slot));
            return Ok(prelude);
        }

        prelude.push(Piece::Filler(slot));
        prelude.push(Piece::Value(selector));
        prelude.push(Piece::Filler(pending));

        Ok(prelude)
    }
}
