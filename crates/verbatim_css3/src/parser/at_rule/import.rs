use crate::node::{push_filler, Piece};
use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses the value of `@import <url> [media queries];`. The media queries are kept as a
    /// single raw fragment.
    pub(crate) fn parse_at_rule_import(&mut self) -> CssResult<Vec<Piece>> {
        log::trace!("parse_at_rule_import");

        let mut value = Vec::new();
        let filler = self.consume_filler();
        push_filler(&mut value, &filler);

        value.push(self.consume_at_rule_url(CssErrorKind::InvalidImportAtRule)?);

        let media = self.consume_fragment(|t| {
            matches!(t.token_type, TokenType::Semicolon | TokenType::LCurly | TokenType::RCurly)
        })?;
        for piece in media {
            match piece {
                Piece::Filler(filler) => push_filler(&mut value, &filler),
                piece => value.push(piece),
            }
        }

        self.consume_at_rule_end(&mut value, CssErrorKind::InvalidImportAtRule)?;

        Ok(value)
    }
}
