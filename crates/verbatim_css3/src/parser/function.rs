use crate::token_source::TokenSource;
use crate::tokenizer::TokenType;
use crate::Css3;
use verbatim_shared::errors::CssResult;

impl<S: TokenSource> Css3<S> {
    /// Consumes a function call from its name up to and including the matching `)`. The
    /// arguments are not parsed, the raw text of the whole call is returned.
    pub(crate) fn consume_function_span(&mut self) -> CssResult<String> {
        log::trace!("consume_function_span");

        let mut raw = self.consume_any().raw;
        raw.push_str(&self.consume_span_until(TokenType::RParen)?);

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::tokenizer::{Token, Tokenizer};
    use crate::Css3;
    use verbatim_shared::byte_stream::{ByteStream, Location, Stream};
    use verbatim_shared::errors::CssErrorKind;

    fn tokens(data: &str) -> Vec<Token> {
        let mut stream = ByteStream::new();
        stream.read_from_str(data);
        stream.close();

        Tokenizer::new(&stream, Location::default()).tokenize()
    }

    #[test]
    fn function_span() {
        let list = tokens("rgba( 0, 0 , 0 /* black */, .5 ) red");
        let mut parser = Css3::new_fragment(&list, Location::default());

        assert_eq!(
            parser.consume_function_span().unwrap(),
            "rgba( 0, 0 , 0 /* black */, .5 )"
        );
        assert!(parser.current().is_whitespace());
    }

    #[test]
    fn nested_functions() {
        let list = tokens("calc(var(--x, [a]) * (2 + min(1px, 2px)))");
        let mut parser = Css3::new_fragment(&list, Location::default());

        assert_eq!(
            parser.consume_function_span().unwrap(),
            "calc(var(--x, [a]) * (2 + min(1px, 2px)))"
        );
        assert!(parser.current().is_eof());
    }

    #[test]
    fn quoted_url_is_a_function() {
        let list = tokens("url( \"a b.png\" )");
        let mut parser = Css3::new_fragment(&list, Location::default());

        assert_eq!(parser.consume_function_span().unwrap(), "url( \"a b.png\" )");
    }

    #[test]
    fn unclosed_function() {
        let list = tokens("a(b, c(d)");
        let mut parser = Css3::new_fragment(&list, Location::default());

        let err = parser.consume_function_span().unwrap_err();
        assert_eq!(err.kind, CssErrorKind::UnclosedBlock);
        assert_eq!(err.offset(), 9);
    }
}
