use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

/// Brackets that are balanced while consuming raw spans. Curly braces are never balanced here,
/// they always belong to the rule grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    /// `[` .. `]`
    Square,
    /// `(` .. `)`
    Paren,
}

impl BracketKind {
    fn closer(&self) -> TokenType {
        match self {
            BracketKind::Square => TokenType::RBracket,
            BracketKind::Paren => TokenType::RParen,
        }
    }
}

impl<S: TokenSource> Css3<S> {
    /// Consumes a bracketed span, starting at the opening bracket, up to and including the
    /// matching closing bracket. Returns the raw text of the span.
    pub(crate) fn consume_bracket_span(&mut self, kind: BracketKind) -> CssResult<String> {
        log::trace!("consume_bracket_span");

        let mut raw = self.consume_any().raw;
        raw.push_str(&self.consume_span_until(kind.closer())?);

        Ok(raw)
    }

    /// Consumes raw text up to and including `closer`. Nested brackets and functions are consumed
    /// as a whole, so a closer inside them does not end the span.
    pub(crate) fn consume_span_until(&mut self, closer: TokenType) -> CssResult<String> {
        let mut raw = String::new();

        loop {
            if self.current().token_type == closer {
                raw.push_str(&self.consume_any().raw);
                return Ok(raw);
            }

            let part = match self.current().token_type {
                TokenType::Eof => {
                    return Err(self.error(CssErrorKind::UnclosedBlock, "expected a closing bracket"));
                }
                TokenType::Function(_) => self.consume_function_span()?,
                TokenType::LBracket => self.consume_bracket_span(BracketKind::Square)?,
                TokenType::LParen => self.consume_bracket_span(BracketKind::Paren)?,
                _ => self.consume_any().raw,
            };
            raw.push_str(&part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BracketKind;
    use crate::tokenizer::{Token, Tokenizer};
    use crate::Css3;
    use test_case::test_case;
    use verbatim_shared::byte_stream::{ByteStream, Location, Stream};
    use verbatim_shared::errors::CssErrorKind;

    fn tokens(data: &str) -> Vec<Token> {
        let mut stream = ByteStream::new();
        stream.read_from_str(data);
        stream.close();

        Tokenizer::new(&stream, Location::default()).tokenize()
    }

    #[test_case("[href]", BracketKind::Square, "[href]" ; "attribute")]
    #[test_case("[a=\"]\"] x", BracketKind::Square, "[a=\"]\"]" ; "closer in string")]
    #[test_case("[a=b i ] c", BracketKind::Square, "[a=b i ]" ; "inner whitespace")]
    #[test_case("[x[y]z]", BracketKind::Square, "[x[y]z]" ; "nested square")]
    #[test_case("[x(])]", BracketKind::Square, "[x(])]" ; "closer in paren")]
    #[test_case("( a , calc(1 + (2)) )", BracketKind::Paren, "( a , calc(1 + (2)) )" ; "function in paren")]
    #[test_case("(a] b)", BracketKind::Paren, "(a] b)" ; "other closer is plain text")]
    fn balanced(input: &str, kind: BracketKind, expected: &str) {
        let list = tokens(input);
        let mut parser = Css3::new_fragment(&list, Location::default());

        assert_eq!(parser.consume_bracket_span(kind).unwrap(), expected);
    }

    #[test_case("[a", BracketKind::Square, 2 ; "square")]
    #[test_case("(a (b)", BracketKind::Paren, 6 ; "paren")]
    #[test_case("[f(x]", BracketKind::Square, 5 ; "function")]
    fn unclosed(input: &str, kind: BracketKind, offset: usize) {
        let list = tokens(input);
        let mut parser = Css3::new_fragment(&list, Location::default());

        let err = parser.consume_bracket_span(kind).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnclosedBlock);
        assert_eq!(err.offset(), offset);
    }
}
