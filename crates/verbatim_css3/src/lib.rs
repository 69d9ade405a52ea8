//! Lossless CSS3 syntax tree builder.
//!
//! The parser turns CSS source into a tree of rules, declarations, comments and at-rules. Every
//! byte of the source is kept in the tree: whitespace, comments and other formatting end up in
//! filler strings next to the structural values, so [`stringify::stringify`] gives back the
//! original input and edited trees can be written out with their formatting intact.
use crate::node::Node;
use crate::parser_config::{Context, ParserConfig};
use crate::token_source::{TokenList, TokenSlice, TokenSource, TokenizerSource};
use crate::tokenizer::{Token, Tokenizer};
use verbatim_shared::byte_stream::{ByteStream, Location, Stream};
use verbatim_shared::errors::{CssError, CssErrorKind, CssResult};

pub mod node;
pub mod parser;
pub mod parser_config;
pub mod stringify;
pub mod token_source;
pub mod tokenizer;
pub mod walker;

/// The grammar that a parser instance provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The complete grammar, starting with rule lists
    Stylesheet,
    /// A parser over an isolated run of tokens (a selector prelude or a declaration). Only the
    /// grammar for that run is available.
    Fragment,
}

pub struct Css3<S: TokenSource> {
    /// Tokens to parse, read through a cursor
    tokens: S,
    scope: Scope,
}

impl<S: TokenSource> Css3<S> {
    /// Creates a new parser with the full stylesheet grammar over the given tokens
    pub fn new(tokens: S) -> Self {
        Self {
            tokens,
            scope: Scope::Stylesheet,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Parses the tokens as the given context
    pub fn parse(&mut self, context: Context) -> CssResult<Node> {
        match context {
            Context::Stylesheet => self.parse_stylesheet(),
            Context::Rule => self.parse_single(Self::parse_single_rule, CssErrorKind::UnclosedBlock),
            Context::AtRule => self.parse_single(Self::parse_single_at_rule, CssErrorKind::UnexpectedAtRule),
            Context::Declaration => self.parse_single(Self::parse_single_declaration, CssErrorKind::InvalidDeclaration),
        }
    }

    /// Returns an error of the given kind, located at the current token
    pub(crate) fn error(&self, kind: CssErrorKind, message: &str) -> CssError {
        CssError::new(kind, message, self.tokens.current_location())
    }
}

impl<'a> Css3<TokenSlice<'a>> {
    /// Creates a parser over an isolated run of tokens. When the tokens are empty, the end of the
    /// input is located on `fallback`.
    pub(crate) fn new_fragment(tokens: &'a [Token], fallback: Location) -> Self {
        Self {
            tokens: TokenSlice::new(tokens, fallback),
            scope: Scope::Fragment,
        }
    }
}

impl Css3<TokenizerSource<'_>> {
    /// Parses a string. The parser pulls tokens from the tokenizer while it goes.
    pub fn parse_str(data: &str, config: ParserConfig) -> CssResult<Node> {
        log::debug!("parsing {} as {:?}", config.source_name(), config.context);

        let mut stream = ByteStream::new();
        stream.read_from_str(data);
        stream.close();

        let tokenizer = Tokenizer::new(&stream, config.location);
        let mut parser = Css3::new(TokenizerSource::new(tokenizer));
        parser.parse(config.context)
    }
}

impl Css3<TokenList> {
    /// Parses tokens that have been collected before
    pub fn parse_tokens(tokens: Vec<Token>, config: ParserConfig) -> CssResult<Node> {
        log::debug!(
            "parsing {} tokens from {} as {:?}",
            tokens.len(),
            config.source_name(),
            config.context
        );

        Css3::new(TokenList::new(tokens)).parse(config.context)
    }
}
