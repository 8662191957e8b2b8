use std::{iter::Peekable, str::CharIndices};

use super::token::{Operator, Pos, Token, TokenKind};

/// Tokenizes one embedded expression. Tokens borrow from the source text;
/// the cursor only ever moves forward.
pub struct Lexer<'src> {
    src: &'src str,
    chars: Peekable<CharIndices<'src>>,
    line: u32,
    offset: u32,
    peeked: Option<Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::with_position(src, 1, 1)
    }

    /// Starts position tracking at `line`/`offset`, for expressions
    /// embedded partway through a host document.
    pub fn with_position(src: &'src str, line: u32, offset: u32) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line,
            offset,
            peeked: None,
        }
    }

    pub fn peek(&mut self) -> Option<&Token<'src>> {
        if self.peeked.is_none() {
            self.peeked = self.scan_token();
        }
        self.peeked.as_ref()
    }

    pub fn next_token(&mut self) -> Option<Token<'src>> {
        match self.peeked.take() {
            Some(tok) => Some(tok),
            None => self.scan_token(),
        }
    }

    pub fn done(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Position of the scan cursor. Only meaningful for diagnostics when
    /// no token is buffered, i.e. at end of input.
    pub fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            offset: self.offset,
        }
    }

    pub(crate) fn bump(&mut self) {
        let _ = self.next_token();
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next()?;
        if next.1 == '\n' {
            self.line += 1;
            self.offset = 1;
        } else {
            self.offset += 1;
        }
        Some(next)
    }

    fn current_offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(off, _)| off)
    }

    fn take_while<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        while let Some(&(_, c)) = self.chars.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
        self.current_offset()
    }

    fn eat(&mut self, expected: char) -> bool {
        match self.chars.peek() {
            Some(&(_, c)) if c == expected => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn scan_token(&mut self) -> Option<Token<'src>> {
        self.take_while(|c| c.is_whitespace());

        let pos = self.pos();
        let (off, c) = self.advance()?;

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,

            '+' => TokenKind::Op(Operator::Plus),
            '-' => TokenKind::Op(Operator::Minus),
            '*' => TokenKind::Op(Operator::Times),
            '/' => TokenKind::Op(Operator::Div),
            '%' => TokenKind::Op(Operator::Mod),

            '=' if self.eat('=') => TokenKind::Op(Operator::Eq),
            '!' if self.eat('=') => TokenKind::Op(Operator::Neq),
            '>' if self.eat('=') => TokenKind::Op(Operator::Gte),
            '>' => TokenKind::Op(Operator::Gt),
            '<' if self.eat('=') => TokenKind::Op(Operator::Lte),
            '<' => TokenKind::Op(Operator::Lt),

            '"' | '\'' => self.read_string(c),
            '#' => self.read_color(off),
            '$' => self.read_variable(off),

            c if c.is_ascii_digit() => self.read_number(off),
            '.' if self.src[off + 1..].starts_with(|c: char| c.is_ascii_digit()) => {
                self.read_number(off)
            }

            c if Self::is_ident_start(c) => self.read_ident(off),

            other => TokenKind::Unknown(other),
        };

        Some(Token { kind, pos })
    }

    fn read_string(&mut self, quote: char) -> TokenKind<'src> {
        let from = self.current_offset();
        let to = self.take_while(|c| c != quote);
        // An unterminated string runs to end of input.
        self.eat(quote);
        TokenKind::Str(&self.src[from..to])
    }

    fn read_color(&mut self, from: usize) -> TokenKind<'src> {
        let to = self.take_while(|c| c.is_ascii_hexdigit());
        if to == from + 1 {
            return TokenKind::Unknown('#');
        }
        TokenKind::Color(&self.src[from..to])
    }

    fn read_variable(&mut self, from: usize) -> TokenKind<'src> {
        let to = self.take_while(Self::is_ident_part);
        if to == from + 1 {
            return TokenKind::Unknown('$');
        }
        TokenKind::Var(&self.src[from + 1..to])
    }

    fn read_number(&mut self, from: usize) -> TokenKind<'src> {
        self.take_while(|c| c.is_ascii_digit());
        // At most one decimal point; entry via a leading `.` already
        // consumed it.
        if !self.src[from..].starts_with('.') {
            if let Some(&(off, '.')) = self.chars.peek() {
                if self.src[off + 1..].starts_with(|c: char| c.is_ascii_digit()) {
                    self.advance();
                    self.take_while(|c| c.is_ascii_digit());
                }
            }
        }
        let to = self.current_offset();
        let value = self.src[from..to]
            .parse()
            .expect("digit scan produced an unparsable number");
        TokenKind::Number(value)
    }

    fn read_ident(&mut self, from: usize) -> TokenKind<'src> {
        let to = self.take_while(Self::is_ident_part);
        match &self.src[from..to] {
            "or" => TokenKind::Op(Operator::Or),
            "and" => TokenKind::Op(Operator::And),
            "not" => TokenKind::Not,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            name => TokenKind::Ident(name),
        }
    }

    fn is_ident_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_ident_part(c: char) -> bool {
        Self::is_ident_start(c) || c.is_ascii_digit() || c == '-'
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod test {
    use super::{
        super::token::{Operator, Pos, TokenKind},
        Lexer,
    };

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).map(|tok| tok.kind).collect()
    }

    #[test]
    fn read_operators_and_structure() {
        let tokens = kinds("(1 + 2.5) * $x, >=");
        let expected = &[
            TokenKind::LParen,
            TokenKind::Number(1.0),
            TokenKind::Op(Operator::Plus),
            TokenKind::Number(2.5),
            TokenKind::RParen,
            TokenKind::Op(Operator::Times),
            TokenKind::Var("x"),
            TokenKind::Comma,
            TokenKind::Op(Operator::Gte),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn read_words() {
        let tokens = kinds("foo and not true bar-baz");
        let expected = &[
            TokenKind::Ident("foo"),
            TokenKind::Op(Operator::And),
            TokenKind::Not,
            TokenKind::Bool(true),
            TokenKind::Ident("bar-baz"),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn read_strings_and_colors() {
        let tokens = kinds("\"a b\" 'c' #fff #a1b2c3");
        let expected = &[
            TokenKind::Str("a b"),
            TokenKind::Str("c"),
            TokenKind::Color("#fff"),
            TokenKind::Color("#a1b2c3"),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn read_leading_dot_number() {
        assert_eq!(kinds(".5"), &[TokenKind::Number(0.5)]);
    }

    #[test]
    fn invalid_chars_become_unknown_tokens() {
        let tokens = kinds("1 ^ @");
        let expected = &[
            TokenKind::Number(1.0),
            TokenKind::Unknown('^'),
            TokenKind::Unknown('@'),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn token_positions() {
        let positions: Vec<Pos> = Lexer::new("1 +\n22 b").map(|tok| tok.pos).collect();
        let expected = &[
            Pos { line: 1, offset: 1 },
            Pos { line: 1, offset: 3 },
            Pos { line: 2, offset: 1 },
            Pos { line: 2, offset: 4 },
        ];
        assert_eq!(positions, expected);
    }

    #[test]
    fn with_position_offsets_the_first_line() {
        let positions: Vec<Pos> = Lexer::with_position("a\nb", 7, 12)
            .map(|tok| tok.pos)
            .collect();
        let expected = &[
            Pos {
                line: 7,
                offset: 12,
            },
            Pos { line: 8, offset: 1 },
        ];
        assert_eq!(positions, expected);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("42");
        assert_eq!(lexer.peek().map(|t| t.kind), Some(TokenKind::Number(42.0)));
        assert!(!lexer.done());
        assert_eq!(
            lexer.next_token().map(|t| t.kind),
            Some(TokenKind::Number(42.0))
        );
        assert!(lexer.done());
    }
}
