// ABOUTME: Lexer that converts a source string into a lazy stream of tokens

use crate::token::{lookup_ident, Token, TokenKind};

/// A single-lookahead byte scanner. Pure and restartable: it holds no state
/// shared with the parser, and a fresh `Lexer::new` is all a caller needs.
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    read_position: usize,
    ch: u8,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer {
            input: input.as_bytes().to_vec(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    /// Reads a `"`-delimited string. Returns the content and whether it was
    /// properly closed. An unterminated string reaches EOF and the caller
    /// emits `ILLEGAL` for it rather than silently accepting partial content.
    fn read_string(&mut self) -> (String, bool) {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.ch == 0 {
                break;
            }
        }
        let terminated = self.ch == b'"';
        let content = String::from_utf8_lossy(&self.input[start..self.position]).into_owned();
        (content, terminated)
    }

    /// Produces the next token, advancing past it. Terminates with `EOF`
    /// when the input is exhausted; callers may keep calling past `EOF`
    /// and will keep receiving `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'*' => Token::new(TokenKind::Asterisk, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b'<' => Token::new(TokenKind::Lt, "<"),
            b'>' => Token::new(TokenKind::Gt, ">"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'(' => Token::new(TokenKind::Lparen, "("),
            b')' => Token::new(TokenKind::Rparen, ")"),
            b'{' => Token::new(TokenKind::Lbrace, "{"),
            b'}' => Token::new(TokenKind::Rbrace, "}"),
            b'[' => Token::new(TokenKind::Lbracket, "["),
            b']' => Token::new(TokenKind::Rbracket, "]"),
            b'"' => {
                let (content, terminated) = self.read_string();
                if terminated {
                    Token::new(TokenKind::Str, content)
                } else {
                    Token::new(TokenKind::Illegal, content)
                }
            }
            0 => Token::new(TokenKind::Eof, ""),
            ch => {
                if is_letter(ch) {
                    let literal = self.read_identifier();
                    let kind = lookup_ident(&literal);
                    return Token::new(kind, literal);
                } else if ch.is_ascii_digit() {
                    let literal = self.read_number();
                    return Token::new(TokenKind::Int, literal);
                } else {
                    Token::new(TokenKind::Illegal, (ch as char).to_string())
                }
            }
        };

        self.read_char();
        tok
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}
