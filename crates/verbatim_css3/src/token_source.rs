//! Cursor based access to a stream of tokens.
//!
//! The grammar only ever looks at the current token and moves forward one token at a time, so
//! tokens can come from an in-memory list, a slice of an already collected buffer or directly from
//! the tokenizer.
use crate::tokenizer::{Token, Tokenizer};
use std::mem;
use verbatim_shared::byte_stream::Location;

pub trait TokenSource {
    /// Returns the token at the cursor without consuming it
    fn current(&self) -> &Token;
    /// Moves the cursor one token forward. Advancing past the end keeps the cursor on the
    /// end-of-input token.
    fn advance(&mut self);
    /// Returns the current token and moves the cursor forward
    fn take_and_advance(&mut self) -> Token;

    /// Location of the current token
    fn current_location(&self) -> Location {
        self.current().location
    }
}

/// An owned, finite list of tokens
pub struct TokenList {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenList {
    /// Creates a new list. When the tokens do not end with an end-of-input token, one is appended
    /// directly after the last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let location = tokens.last().map(Token::end_location).unwrap_or_default();
            tokens.push(Token::new_eof(location));
        }

        Self { tokens, position: 0 }
    }

    /// True when the cursor sits on an end-of-input token
    fn at_end(&self) -> bool {
        self.position + 1 >= self.tokens.len() || self.tokens[self.position].is_eof()
    }
}

impl TokenSource for TokenList {
    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.position += 1;
        }
    }

    fn take_and_advance(&mut self) -> Token {
        if self.at_end() {
            return self.current().clone();
        }

        let token = mem::take(&mut self.tokens[self.position]);
        self.position += 1;
        token
    }
}

/// A read-only view over tokens that are owned by someone else, followed by a synthetic
/// end-of-input token. Used when a sub-grammar runs over an isolated part of the input.
pub struct TokenSlice<'a> {
    tokens: &'a [Token],
    position: usize,
    eof: Token,
}

impl<'a> TokenSlice<'a> {
    /// Creates a view over the given tokens. The end-of-input token is placed directly after the
    /// last token, or on `fallback` when there are no tokens.
    pub fn new(tokens: &'a [Token], fallback: Location) -> Self {
        let location = tokens.last().map_or(fallback, Token::end_location);

        Self {
            tokens,
            position: 0,
            eof: Token::new_eof(location),
        }
    }
}

impl TokenSource for TokenSlice<'_> {
    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn take_and_advance(&mut self) -> Token {
        let token = self.current().clone();
        self.advance();
        token
    }
}

/// Pulls tokens from the tokenizer on demand. The current token is always read ahead.
pub struct TokenizerSource<'stream> {
    tokenizer: Tokenizer<'stream>,
    current: Token,
}

impl<'stream> TokenizerSource<'stream> {
    pub fn new(mut tokenizer: Tokenizer<'stream>) -> Self {
        let current = tokenizer.next_token();
        Self { tokenizer, current }
    }
}

impl TokenSource for TokenizerSource<'_> {
    fn current(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) {
        self.current = self.tokenizer.next_token();
    }

    fn take_and_advance(&mut self) -> Token {
        let next = self.tokenizer.next_token();
        mem::replace(&mut self.current, next)
    }
}
