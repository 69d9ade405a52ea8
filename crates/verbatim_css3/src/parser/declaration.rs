use crate::node::{push_filler, Node, NodeType, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses a declaration from an isolated run of tokens, like `color : red !important;`.
    pub(crate) fn parse_declaration(&mut self) -> CssResult<Node> {
        log::trace!("parse_declaration");

        let loc = self.tokens.current_location();

        if !self.current().is_ident() {
            return Err(self.error(CssErrorKind::InvalidDeclaration, "expected a property name"));
        }
        let property = self.consume_any().raw;

        let mut before_colon = String::new();
        loop {
            match self.current().token_type {
                TokenType::Colon => {
                    self.advance();
                    break;
                }
                TokenType::Eof | TokenType::Semicolon => {
                    return Err(self.error(CssErrorKind::InvalidDeclaration, "expected a colon"));
                }
                _ => before_colon.push_str(&self.consume_any().raw),
            }
        }

        let mut value = Vec::new();
        loop {
            match self.current().token_type {
                TokenType::Eof => break,
                TokenType::Whitespace | TokenType::Comment(_) | TokenType::Semicolon => {
                    push_filler(&mut value, &self.consume_any().raw);
                }
                TokenType::Function(_) => {
                    let function = self.consume_function_span()?;
                    value.push(Piece::Function(function));
                }
                _ => value.push(Piece::Value(self.consume_any().raw)),
            }
        }

        let important = fold_important(&mut value);

        Ok(Node::new(
            NodeType::Declaration {
                property,
                before_colon,
                value,
                important,
            },
            loc,
        ))
    }
}

/// Folds trailing `!` `important` pairs into filler. The filler in front of the `!`, the `!`,
/// anything between, the `important` and all filler after it become one filler piece. This
/// repeats until the values no longer end in such a pair.
///
/// Returns true when at least one pair was found.
fn fold_important(pieces: &mut Vec<Piece>) -> bool {
    let mut important = false;
    while fold_last_important(pieces) {
        important = true;
    }

    important
}

fn fold_last_important(pieces: &mut Vec<Piece>) -> bool {
    let values: Vec<usize> = pieces
        .iter()
        .enumerate()
        .filter(|(_, piece)| !piece.is_filler())
        .map(|(idx, _)| idx)
        .collect();

    let [.., bang, important] = values[..] else {
        return false;
    };

    let is_bang = matches!(&pieces[bang], Piece::Value(v) if v == "!");
    let is_important = matches!(&pieces[important], Piece::Value(v) if v.eq_ignore_ascii_case("important"));
    if !is_bang || !is_important {
        return false;
    }

    let start = if bang > 0 && pieces[bang - 1].is_filler() {
        bang - 1
    } else {
        bang
    };

    let folded: String = pieces[start..].iter().map(Piece::text).collect();
    pieces.truncate(start);
    pieces.push(Piece::Filler(folded));

    true
}
