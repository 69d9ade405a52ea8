use std::char::REPLACEMENT_CHARACTER;
use std::fmt;
use verbatim_shared::byte_stream::Character::Ch;
use verbatim_shared::byte_stream::{ByteStream, Character, Location, Stream};

pub type Number = f32;

/// Highest valid code point; escapes above it produce the replacement character
const MAX_ALLOWED_CHAR: u32 = 0x10FFFF;

#[derive(Debug, PartialEq, Clone, Default)]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// The value does not include the opening parenthesis
    Function(String),
    Url(String),
    BadUrl(String),
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`
    BadString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram)
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    /// A `<!--` `<CDO-token>`
    Cdo,
    /// A `-->` `<CDC-token>`
    Cdc,
    /// A `<EOF-token>`. Requesting tokens after the end keeps returning it.
    #[default]
    Eof,
    /// A comment, the value does not include the `/*` and `*/` markers
    Comment(String),
}

/// A single token. `raw` holds the exact source text of the token, so concatenating the raw text
/// of all tokens of a stream gives back the original source.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Source text of the token, byte for byte
    pub raw: String,
    /// Location of the first character of the token
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    pub fn new(token_type: TokenType, raw: &str, location: Location) -> Token {
        Token {
            token_type,
            raw: raw.to_string(),
            location,
        }
    }

    /// Returns an end-of-input token on the given location
    pub fn new_eof(location: Location) -> Token {
        Token::new(TokenType::Eof, "", location)
    }

    /// Location directly after the last character of this token
    pub fn end_location(&self) -> Location {
        self.location.advanced_by(&self.raw)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.token_type, TokenType::Comment(_))
    }

    /// Whitespace and comments carry no grammar and are kept as formatting
    pub fn is_filler(&self) -> bool {
        self.is_whitespace() || self.is_comment()
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// CSS Tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization).
///
/// Next to the regular token values, every token carries its raw source text. Comments and
/// whitespace are returned as tokens instead of being dropped.
pub struct Tokenizer<'stream> {
    stream: &'stream ByteStream,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Current position of the stream, relative to the start location
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer with the given stream that starts on the given location. This does
    /// not have to be 1/1, but can be any location.
    pub fn new(stream: &'stream ByteStream, location: Location) -> Self {
        Self {
            stream,
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the current location and takes the start location into account
    pub fn current_location(&self) -> Location {
        let column = if self.cur_location.line == 1 {
            self.start_location.column + self.cur_location.column - 1
        } else {
            self.cur_location.column
        };

        Location::new(
            self.start_location.line + self.cur_location.line - 1,
            column,
            self.start_location.offset + self.cur_location.offset,
        )
    }

    /// Returns true when there is nothing left to tokenize
    pub fn eof(&self) -> bool {
        self.stream.eof()
    }

    /// Consumes the next token and returns it. Once the stream is exhausted, an Eof token is
    /// returned for every call.
    pub fn next_token(&mut self) -> Token {
        let start = self.stream.tell_bytes();
        let location = self.current_location();

        let token_type = self.consume_token();
        let raw = self.stream.get_slice(start, self.stream.tell_bytes());

        let token = Token::new(token_type, raw, location);
        log::trace!("{:?}", token);

        token
    }

    /// Tokenizes the rest of the stream. The returned list always ends with a single Eof token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> TokenType {
        if self.look_ahead_slice(2) == "/*" {
            return TokenType::Comment(self.consume_comment());
        }

        match self.current_char() {
            Character::StreamEnd | Character::StreamEmpty => TokenType::Eof,
            Ch(c) if c.is_whitespace() => {
                self.consume_whitespace();
                TokenType::Whitespace
            }
            Ch('"' | '\'') => self.consume_string_token(),
            Ch(c @ '#') => {
                // consume '#'
                self.next_char();

                if self.is_ident_char(self.current_char().into()) || self.is_start_of_escape(0) {
                    return TokenType::Hash(self.consume_ident());
                }

                TokenType::Delim(c)
            }
            Ch(')') => {
                self.next_char();
                TokenType::RParen
            }
            Ch('(') => {
                self.next_char();
                TokenType::LParen
            }
            Ch('[') => {
                self.next_char();
                TokenType::LBracket
            }
            Ch(']') => {
                self.next_char();
                TokenType::RBracket
            }
            Ch('{') => {
                self.next_char();
                TokenType::LCurly
            }
            Ch('}') => {
                self.next_char();
                TokenType::RCurly
            }
            Ch(',') => {
                self.next_char();
                TokenType::Comma
            }
            Ch(':') => {
                self.next_char();
                TokenType::Colon
            }
            Ch(';') => {
                self.next_char();
                TokenType::Semicolon
            }
            Ch(c @ '+') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                self.next_char();
                TokenType::Delim(c)
            }
            Ch(c @ '.') => {
                if self.stream.look_ahead(1).is_numeric() {
                    return self.consume_numeric_token();
                }

                self.next_char();
                TokenType::Delim(c)
            }
            Ch(c @ '-') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                let cdc_token = "-->";
                if self.look_ahead_slice(cdc_token.len()) == cdc_token {
                    self.consume_chars(cdc_token.len());
                    return TokenType::Cdc;
                }

                if self.is_next_3_points_starts_ident_seq(0) {
                    return self.consume_ident_like_seq();
                }

                self.next_char();
                TokenType::Delim(c)
            }
            Ch(c @ '<') => {
                let cdo_token = "<!--";
                if self.look_ahead_slice(cdo_token.len()) == cdo_token {
                    self.consume_chars(cdo_token.len());
                    return TokenType::Cdo;
                }

                self.next_char();
                TokenType::Delim(c)
            }
            Ch(c @ '@') => {
                // consume '@'
                self.next_char();

                if self.is_next_3_points_starts_ident_seq(0) {
                    return TokenType::AtKeyword(self.consume_ident());
                }

                TokenType::Delim(c)
            }
            Ch(c @ '\\') => {
                if self.is_start_of_escape(0) {
                    return self.consume_ident_like_seq();
                }

                // parse error
                self.next_char();
                TokenType::Delim(c)
            }
            Ch(c) if c.is_ascii_digit() => self.consume_numeric_token(),
            Ch(c) if self.is_ident_start(c) => self.consume_ident_like_seq(),
            Ch(c) => {
                self.next_char();
                TokenType::Delim(c)
            }
        }
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// An unterminated comment runs until the end of the stream.
    fn consume_comment(&mut self) -> String {
        let mut comment = String::new();

        // consume '/*'
        self.consume_chars(2);

        loop {
            if self.look_ahead_slice(2) == "*/" {
                self.consume_chars(2);
                break;
            }
            match self.next_char() {
                Ch(c) => comment.push(c),
                _ => break,
            }
        }

        comment
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self) -> TokenType {
        let value = self.consume_number();

        if self.is_next_3_points_starts_ident_seq(0) {
            let unit = self.consume_ident();
            return TokenType::Dimension { value, unit };
        }

        if self.current_char() == Ch('%') {
            self.next_char();
            return TokenType::Percentage(value);
        }

        TokenType::Number(value)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self) -> TokenType {
        // consume string starting: (') or (") ...
        let ending = self.next_char();
        let mut value = String::new();

        loop {
            // eof is a parse error, but we return the string as-is
            if self.stream.eof() {
                return TokenType::QuotedString(value);
            }

            if self.current_char() == ending {
                self.next_char();
                return TokenType::QuotedString(value);
            }

            // newline: parser error, the newline is not part of the string
            if self.current_char() == Ch('\n') {
                return TokenType::BadString(value);
            }

            if self.current_char() == Ch('\\') && self.stream.look_ahead(1) == Ch('\n') {
                // escaped newline, consume and ignore
                self.consume_chars(2);
                continue;
            }

            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            value.push(self.next_char().into());
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut value = String::new();

        if matches!(self.current_char(), Ch('+' | '-')) {
            value.push(self.next_char().into());
        }

        value.push_str(&self.consume_digits());

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            value.push_str(&self.consume_chars(2));
            value.push_str(&self.consume_digits());
        }

        let c1 = self.stream.look_ahead(0);
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('e' | 'E'))
            && ((matches!(c2, Ch('-' | '+')) && c3.is_numeric()) || c2.is_numeric())
        {
            value.push_str(&self.consume_chars(2));
            value.push_str(&self.consume_digits());
        }

        value.parse().unwrap_or_default()
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns: `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like_seq(&mut self) -> TokenType {
        let value = self.consume_ident();

        if self.current_char() != Ch('(') {
            return TokenType::Ident(value);
        }

        if value.eq_ignore_ascii_case("url") {
            // A quoted url is a regular function. The whitespace in front of the quote is left
            // in the stream so it becomes its own token.
            let mut offset = 1;
            while self.stream.look_ahead(offset).is_whitespace() {
                offset += 1;
            }
            if matches!(self.stream.look_ahead(offset), Ch('"' | '\'')) {
                self.next_char();
                return TokenType::Function(value);
            }

            // consume '('
            self.next_char();
            return self.consume_url();
        }

        // consume '('
        self.next_char();
        TokenType::Function(value)
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or a `<bad-url-token>`
    fn consume_url(&mut self) -> TokenType {
        let mut url = String::new();

        self.consume_whitespace();

        loop {
            if self.current_char() == Ch(')') {
                self.next_char();
                return TokenType::Url(url);
            }

            if self.stream.eof() {
                // parse error
                return TokenType::Url(url);
            }

            if self.current_char().is_whitespace() {
                self.consume_whitespace();
                if self.current_char() == Ch(')') || self.stream.eof() {
                    continue;
                }
                self.consume_remnants_of_bad_url();
                return TokenType::BadUrl(url);
            }

            if matches!(self.current_char(), Ch('"' | '\'' | '(')) || self.is_non_printable_char() {
                self.consume_remnants_of_bad_url();
                return TokenType::BadUrl(url);
            }

            if self.current_char() == Ch('\\') {
                if self.is_start_of_escape(0) {
                    url.push(self.consume_escaped_token());
                    continue;
                }
                self.consume_remnants_of_bad_url();
                return TokenType::BadUrl(url);
            }

            url.push(self.next_char().into());
        }
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough of the input stream to reach a recovery point where normal tokenizing can
    /// resume. The closing parenthesis belongs to the bad url.
    fn consume_remnants_of_bad_url(&mut self) {
        loop {
            if self.stream.eof() {
                return;
            }

            if self.current_char() == Ch(')') {
                self.next_char();
                return;
            }

            if self.is_start_of_escape(0) {
                self.consume_escaped_token();
                continue;
            }

            self.next_char();
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    fn consume_escaped_token(&mut self) -> char {
        // consume '\'
        self.next_char();

        // eof: parser error
        if self.stream.eof() {
            return REPLACEMENT_CHARACTER;
        }

        let mut value = String::new();
        while matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) && value.len() < 6 {
            value.push(self.next_char().into());
        }

        if value.is_empty() {
            // not a hex escape, the escaped character is taken literally
            return self.next_char().into();
        }

        if self.current_char().is_whitespace() {
            self.next_char();
        }

        match u32::from_str_radix(&value, 16) {
            Ok(0) => REPLACEMENT_CHARACTER,
            Ok(cp) if cp > MAX_ALLOWED_CHAR => REPLACEMENT_CHARACTER,
            Ok(cp) => char::from_u32(cp).unwrap_or(REPLACEMENT_CHARACTER),
            Err(_) => REPLACEMENT_CHARACTER,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Caller should ensure that the stream starts with an ident sequence before calling this.
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            if !self.is_ident_char(self.current_char().into()) {
                break;
            }

            value.push(self.next_char().into());
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while self.current_char().is_numeric() {
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_chars(&mut self, len: usize) -> String {
        let mut value = String::new();

        for _ in 0..len {
            match self.next_char() {
                Ch(c) => value.push(c),
                _ => break,
            }
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
    fn is_ident_start(&self, char: char) -> bool {
        char.is_alphabetic() || (!char.is_ascii() && char != '\0') || char == '_'
    }

    /// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
    fn is_ident_char(&self, char: char) -> bool {
        self.is_ident_start(char) || char.is_ascii_digit() || char == '-'
    }

    /// def: [non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
    fn is_non_printable_char(&self) -> bool {
        matches!(
            self.current_char(),
            Ch('\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000E}'..='\u{001F}' | '\u{007F}')
        )
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_start_of_escape(&self, start: usize) -> bool {
        let current_char = self.stream.look_ahead(start);
        let next_char = self.stream.look_ahead(start + 1);

        current_char == Ch('\\') && matches!(next_char, Ch(c) if c != '\n')
    }

    /// [4.3.9. Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn is_next_3_points_starts_ident_seq(&self, start: usize) -> bool {
        let first = self.stream.look_ahead(start);
        let second = self.stream.look_ahead(start + 1);

        if first == Ch('-') {
            return self.is_ident_start(second.into())
                || second == Ch('-')
                || self.is_start_of_escape(start + 1);
        }

        if first == Ch('\\') {
            return self.is_start_of_escape(start);
        }

        self.is_ident_start(first.into())
    }

    fn is_signed_decimal(&self, start: usize) -> bool {
        let current = self.stream.look_ahead(start);
        let next = self.stream.look_ahead(start + 1);
        let last = self.stream.look_ahead(start + 2);

        // e.g. +1, -1, +.1, -0.01
        matches!(current, Ch('+' | '-'))
            && ((next == Ch('.') && last.is_numeric()) || next.is_numeric())
    }

    fn current_char(&self) -> Character {
        self.stream.look_ahead(0)
    }

    fn next_char(&mut self) -> Character {
        let c = self.stream.read_and_next();
        self.cur_location.inc(c);

        c
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                _ => break,
            }
        }

        s
    }
}
