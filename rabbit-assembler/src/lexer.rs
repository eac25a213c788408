//! # Lexer for Rabbit Assembly Language
//!
//! The lexer runs over one source line at a time; line structure is handled
//! by the assembler driver.

use logos::Logos;

/// Tokens for Rabbit assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace
#[logos(skip r"[;#][^\n]*")] // Skip comments
pub enum Token {
    /// Identifier (instruction mnemonics and `rN` registers)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Immediate (`$42`, `$-1`), digits only
    #[regex(r"\$-?[0-9]+", |lex| lex.slice()[1..].to_string())]
    Immediate(String),

    /// Bif reference (`@hello`), name only
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_string())]
    BifRef(String),

    /// Bare number, never a valid operand on its own
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Comma
    #[token(",")]
    Comma,

    /// Left parenthesis
    #[token("(")]
    LParen,

    /// Right parenthesis
    #[token(")")]
    RParen,
}

impl Token {
    /// Source-like rendering for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(s) | Token::Number(s) => s.clone(),
            Token::Immediate(s) => format!("${}", s),
            Token::BifRef(s) => format!("@{}", s),
            Token::Comma => ",".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Split an identifier of the form `rN` into its register number text
pub fn register_digits(ident: &str) -> Option<&str> {
    let digits = ident.strip_prefix('r').or_else(|| ident.strip_prefix('R'))?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}
