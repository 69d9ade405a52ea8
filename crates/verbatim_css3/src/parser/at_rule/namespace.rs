use crate::node::{push_filler, Piece};
use crate::token_source::TokenSource;
use crate::Css3;
use verbatim_shared::errors::{CssErrorKind, CssResult};

impl<S: TokenSource> Css3<S> {
    /// Parses the value of `@namespace [prefix] <url>;`
    pub(crate) fn parse_at_rule_namespace(&mut self) -> CssResult<Vec<Piece>> {
        log::trace!("parse_at_rule_namespace");

        let mut value = Vec::new();
        let filler = self.consume_filler();
        push_filler(&mut value, &filler);

        if self.current().is_ident() {
            value.push(Piece::Value(self.consume_any().raw));

            let filler = self.consume_filler();
            push_filler(&mut value, &filler);
        }

        value.push(self.consume_at_rule_url(CssErrorKind::InvalidNamespaceAtRule)?);
        self.consume_at_rule_end(&mut value, CssErrorKind::InvalidNamespaceAtRule)?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Piece;
    use crate::parser_config::ParserConfig;
    use crate::stringify::stringify;
    use crate::Css3;
    use test_case::test_case;
    use verbatim_shared::errors::CssErrorKind;

    #[test_case("@namespace url(http://www.w3.org/1999/xhtml);", &["url(http://www.w3.org/1999/xhtml)"] ; "default url")]
    #[test_case("@namespace svg \"http://www.w3.org/2000/svg\";", &["svg", "\"http://www.w3.org/2000/svg\""] ; "prefix and string")]
    #[test_case("@namespace /* c */ x url( 'y' ) ;", &["x", "url( 'y' )"] ; "url function")]
    fn namespace(css: &str, values: &[&str]) {
        let node = Css3::parse_str(css, ParserConfig::default()).unwrap();
        assert_eq!(node.block().unwrap().children[0].values(), values);
        assert_eq!(stringify(&node), css);
    }

    #[test]
    fn url_function_piece() {
        let node = Css3::parse_str("@namespace url(\"x\")", ParserConfig::default()).unwrap();
        let child = &node.block().unwrap().children[0];
        match &*child.node_type {
            crate::node::NodeType::NonNestedAtRule { value, .. } => {
                assert_eq!(
                    value,
                    &vec![Piece::Filler(" ".into()), Piece::Function("url(\"x\")".into())]
                );
            }
            _ => unreachable!(),
        }
    }

    #[test_case("@namespace a b url(x);", 13 ; "two prefixes")]
    #[test_case("@namespace svg;", 14 ; "missing url")]
    #[test_case("@namespace", 10 ; "empty")]
    #[test_case("@namespace url(x) y;", 18 ; "content after url")]
    #[test_case("@namespace svg url(x) {}", 22 ; "block")]
    #[test_case("@namespace src(x);", 11 ; "other function")]
    fn invalid(css: &str, offset: usize) {
        let err = Css3::parse_str(css, ParserConfig::default()).unwrap_err();
        assert_eq!(err.kind, CssErrorKind::InvalidNamespaceAtRule);
        assert_eq!(err.offset(), offset);
    }
}
