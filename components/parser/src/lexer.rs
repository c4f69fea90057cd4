//! Sapphire Lexer - tokenizes source code into tokens
//!
//! The lexer is total: any byte sequence produces a finite token stream
//! terminated by an EOF token, with unrecognized input reported as
//! `Illegal` tokens rather than errors. Deciding what an illegal token
//! means is the parser's job.

use std::fmt;

/// Sapphire keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// class keyword
    Class,
    /// module keyword
    Module,
    /// def keyword
    Def,
    /// self keyword
    SelfKw,
    /// end keyword
    End,
    /// do keyword
    Do,
    /// yield keyword
    Yield,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// true keyword
    True,
    /// false keyword
    False,
    /// nil keyword
    Nil,
    /// get_block keyword (reifies the current method's block)
    GetBlock,
}

impl Keyword {
    /// Look up a keyword from an identifier spelling
    fn lookup(word: &str) -> Option<Keyword> {
        match word {
            "class" => Some(Keyword::Class),
            "module" => Some(Keyword::Module),
            "def" => Some(Keyword::Def),
            "self" => Some(Keyword::SelfKw),
            "end" => Some(Keyword::End),
            "do" => Some(Keyword::Do),
            "yield" => Some(Keyword::Yield),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "true" => Some(Keyword::True),
            "false" => Some(Keyword::False),
            "nil" => Some(Keyword::Nil),
            "get_block" => Some(Keyword::GetBlock),
            _ => None,
        }
    }

    /// Stable wire name for this keyword's token kind
    pub fn wire_name(self) -> &'static str {
        match self {
            Keyword::Class => "on_class",
            Keyword::Module => "on_module",
            Keyword::Def => "on_def",
            Keyword::SelfKw => "on_self",
            Keyword::End => "on_end",
            Keyword::Do => "on_do",
            Keyword::Yield => "on_yield",
            Keyword::If => "on_if",
            Keyword::Else => "on_else",
            Keyword::While => "on_while",
            Keyword::True => "on_true",
            Keyword::False => "on_false",
            Keyword::Nil => "on_nil",
            Keyword::GetBlock => "on_get_block",
        }
    }
}

/// Sapphire punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuator {
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Asterisk,
    /// Divide
    Slash,
    /// Modulo
    Modulo,
    /// Exponentiation
    Pow,
    /// Method call dot
    Dot,
    /// Scope resolution operator
    ResolutionOperator,
    /// Assignment
    Assign,
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Logical NOT
    Bang,
    /// Block parameter delimiter
    Bar,
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Comma
    Comma,
    /// Semicolon
    Semicolon,
    /// Colon
    Colon,
}

impl Punctuator {
    /// Stable wire name for this punctuator's token kind
    pub fn wire_name(self) -> &'static str {
        match self {
            Punctuator::Plus => "on_plus",
            Punctuator::Minus => "on_minus",
            Punctuator::Asterisk => "on_asterisk",
            Punctuator::Slash => "on_slash",
            Punctuator::Modulo => "on_modulo",
            Punctuator::Pow => "on_pow",
            Punctuator::Dot => "on_dot",
            Punctuator::ResolutionOperator => "on_resolutionoperator",
            Punctuator::Assign => "on_assign",
            Punctuator::Eq => "on_eq",
            Punctuator::NotEq => "on_noteq",
            Punctuator::Lt => "on_lt",
            Punctuator::Lte => "on_lte",
            Punctuator::Gt => "on_gt",
            Punctuator::Gte => "on_gte",
            Punctuator::And => "on_and",
            Punctuator::Or => "on_or",
            Punctuator::Bang => "on_bang",
            Punctuator::Bar => "on_bar",
            Punctuator::LParen => "on_lparen",
            Punctuator::RParen => "on_rparen",
            Punctuator::LBrace => "on_lbrace",
            Punctuator::RBrace => "on_rbrace",
            Punctuator::LBracket => "on_lbracket",
            Punctuator::RBracket => "on_rbracket",
            Punctuator::Comma => "on_comma",
            Punctuator::Semicolon => "on_semicolon",
            Punctuator::Colon => "on_colon",
        }
    }
}

/// Kind of a token produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier (method or local variable name)
    Ident,
    /// Constant name (capitalized)
    Constant,
    /// Instance variable (`@name`)
    InstanceVariable,
    /// Integer literal
    Int,
    /// Float literal
    Float,
    /// String literal
    Str,
    /// Keyword
    Keyword(Keyword),
    /// Punctuator/operator
    Punctuator(Punctuator),
    /// Unrecognized input
    Illegal,
    /// End of file
    Eof,
}

impl TokenKind {
    /// Stable wire name of this kind, used by all token-kind-name outputs.
    ///
    /// External tools key off these strings; the mapping must never change
    /// for an existing kind.
    pub fn wire_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "on_ident",
            TokenKind::Constant => "on_constant",
            TokenKind::InstanceVariable => "on_instance_variable",
            TokenKind::Int => "on_int",
            TokenKind::Float => "on_float",
            TokenKind::Str => "on_string",
            TokenKind::Keyword(k) => k.wire_name(),
            TokenKind::Punctuator(p) => p.wire_name(),
            TokenKind::Illegal => "on_illegal",
            TokenKind::Eof => "on_eof",
        }
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Kind of the token
    pub kind: TokenKind,
    /// Source text of the token
    pub literal: String,
    /// 1-based source line the token started on; the EOF token carries the
    /// line following the last content line
    pub line: u32,
}

impl Token {
    fn new(kind: TokenKind, literal: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
        }
    }

    /// Human-readable form for diagnostics
    pub fn describe(&self) -> &str {
        if self.kind == TokenKind::Eof {
            "EOF"
        } else {
            &self.literal
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Lexer for Sapphire source code
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    /// Get the next token from the source.
    ///
    /// Callable repeatedly; once EOF has been reached every further call
    /// returns an EOF token again.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, "", self.eof_line());
        }

        let line = self.line;
        let c = self.advance();
        match c {
            '=' => {
                if self.matches('=') {
                    Token::new(TokenKind::Punctuator(Punctuator::Eq), "==", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Assign), "=", line)
                }
            }
            '!' => {
                if self.matches('=') {
                    Token::new(TokenKind::Punctuator(Punctuator::NotEq), "!=", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Bang), "!", line)
                }
            }
            '<' => {
                if self.matches('=') {
                    Token::new(TokenKind::Punctuator(Punctuator::Lte), "<=", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Lt), "<", line)
                }
            }
            '>' => {
                if self.matches('=') {
                    Token::new(TokenKind::Punctuator(Punctuator::Gte), ">=", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Gt), ">", line)
                }
            }
            '*' => {
                if self.matches('*') {
                    Token::new(TokenKind::Punctuator(Punctuator::Pow), "**", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Asterisk), "*", line)
                }
            }
            ':' => {
                if self.matches(':') {
                    Token::new(
                        TokenKind::Punctuator(Punctuator::ResolutionOperator),
                        "::",
                        line,
                    )
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Colon), ":", line)
                }
            }
            '&' => {
                if self.matches('&') {
                    Token::new(TokenKind::Punctuator(Punctuator::And), "&&", line)
                } else {
                    Token::new(TokenKind::Illegal, "&", line)
                }
            }
            '|' => {
                if self.matches('|') {
                    Token::new(TokenKind::Punctuator(Punctuator::Or), "||", line)
                } else {
                    Token::new(TokenKind::Punctuator(Punctuator::Bar), "|", line)
                }
            }
            '+' => Token::new(TokenKind::Punctuator(Punctuator::Plus), "+", line),
            '-' => Token::new(TokenKind::Punctuator(Punctuator::Minus), "-", line),
            '/' => Token::new(TokenKind::Punctuator(Punctuator::Slash), "/", line),
            '%' => Token::new(TokenKind::Punctuator(Punctuator::Modulo), "%", line),
            '.' => Token::new(TokenKind::Punctuator(Punctuator::Dot), ".", line),
            ',' => Token::new(TokenKind::Punctuator(Punctuator::Comma), ",", line),
            ';' => Token::new(TokenKind::Punctuator(Punctuator::Semicolon), ";", line),
            '(' => Token::new(TokenKind::Punctuator(Punctuator::LParen), "(", line),
            ')' => Token::new(TokenKind::Punctuator(Punctuator::RParen), ")", line),
            '{' => Token::new(TokenKind::Punctuator(Punctuator::LBrace), "{", line),
            '}' => Token::new(TokenKind::Punctuator(Punctuator::RBrace), "}", line),
            '[' => Token::new(TokenKind::Punctuator(Punctuator::LBracket), "[", line),
            ']' => Token::new(TokenKind::Punctuator(Punctuator::RBracket), "]", line),
            '"' | '\'' => self.read_string(c, line),
            '@' => {
                if self.peek().map(is_ident_start).unwrap_or(false) {
                    let name = self.read_ident_chars();
                    Token::new(TokenKind::InstanceVariable, format!("@{}", name), line)
                } else {
                    Token::new(TokenKind::Illegal, "@", line)
                }
            }
            _ if c.is_ascii_digit() => self.read_number(c, line),
            _ if is_ident_start(c) => {
                let mut word = String::new();
                word.push(c);
                word.push_str(&self.read_ident_chars());
                // method names may end in ? or !
                if matches!(self.peek(), Some('?')) {
                    self.advance();
                    word.push('?');
                } else if matches!(self.peek(), Some('!')) && self.peek_next() != Some('=') {
                    self.advance();
                    word.push('!');
                }

                if let Some(keyword) = Keyword::lookup(&word) {
                    Token::new(TokenKind::Keyword(keyword), word, line)
                } else if word.chars().next().map(|f| f.is_uppercase()).unwrap_or(false) {
                    Token::new(TokenKind::Constant, word, line)
                } else {
                    Token::new(TokenKind::Ident, word, line)
                }
            }
            _ => Token::new(TokenKind::Illegal, c.to_string(), line),
        }
    }

    /// Line the EOF token carries: the line following the last content line
    fn eof_line(&self) -> u32 {
        if self.chars.is_empty() {
            1
        } else if self.chars.last() == Some(&'\n') {
            self.line
        } else {
            self.line + 1
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                c if c.is_whitespace() => {
                    self.advance();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self, quote: char, line: u32) -> Token {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    // unterminated literal; reported as illegal so the
                    // parser can reject it with a position
                    return Token::new(TokenKind::Illegal, value, line);
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Token::new(TokenKind::Str, value, line);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => {
                            value.push('\n');
                            self.advance();
                        }
                        Some('t') => {
                            value.push('\t');
                            self.advance();
                        }
                        Some(c) => {
                            value.push(c);
                            if c == '\n' {
                                self.line += 1;
                            }
                            self.advance();
                        }
                        None => {}
                    }
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_number(&mut self, first: char, line: u32) -> Token {
        let mut literal = String::new();
        literal.push(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                literal.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // a dot only belongs to the number when a digit follows, so that
        // `10.times` lexes as an integer and a method call
        if self.peek() == Some('.') && self.peek_next().map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            literal.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    literal.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            Token::new(TokenKind::Float, literal, line)
        } else {
            Token::new(TokenKind::Int, literal, line)
        }
    }

    fn read_ident_chars(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.position];
        self.position += 1;
        c
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
