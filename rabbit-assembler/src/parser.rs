//! Assembly parser
//!
//! Turns one line of tokens into a [`ParsedInstruction`]: a mnemonic followed
//! by exactly as many operands as the instruction table says, bound to the
//! A/B/C slots by position.

use std::ops::Range;

use logos::Logos;
use rabbit_spec::{Bif, Opcode, Word};

use crate::error::{AssemblerError, Result};
use crate::lexer::{register_digits, Token};

/// Value of a single operand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandValue {
    /// `rN`, already masked to 4 bits
    Register(u8),
    /// `$N`
    Immediate(Word),
    /// `@name`, encoded as an immediate bif id
    Bif(Bif),
}

/// One operand with its addressing mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operand {
    pub value: OperandValue,
    /// Wrapped in parentheses
    pub deref: bool,
}

impl Operand {
    /// Unused slot: register 0, direct
    pub const EMPTY: Operand = Operand {
        value: OperandValue::Register(0),
        deref: false,
    };

    pub const fn register(index: u8) -> Self {
        Operand {
            value: OperandValue::Register(index & 0xF),
            deref: false,
        }
    }

    pub const fn immediate(value: Word) -> Self {
        Operand {
            value: OperandValue::Immediate(value),
            deref: false,
        }
    }

    pub const fn deref(mut self) -> Self {
        self.deref = true;
        self
    }

    /// Whether the operand occupies a trailing immediate word
    pub const fn is_immediate(&self) -> bool {
        matches!(self.value, OperandValue::Immediate(_) | OperandValue::Bif(_))
    }
}

/// A fully parsed instruction, operands placed in their slots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedInstruction {
    pub opcode: Opcode,
    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
}

impl ParsedInstruction {
    pub const fn new(opcode: Opcode) -> Self {
        ParsedInstruction {
            opcode,
            a: Operand::EMPTY,
            b: Operand::EMPTY,
            c: Operand::EMPTY,
        }
    }
}

/// Parse a single instruction from assembly text
///
/// Errors report line 1; the assembler driver uses [`parse_line`] for real
/// line numbers.
pub fn parse_instruction(text: &str) -> Result<ParsedInstruction> {
    match parse_line(text, 1)? {
        Some(instr) => Ok(instr),
        None => Err(AssemblerError::UnexpectedEndOfLine {
            line: 1,
            mnemonic: String::new(),
            expected: 1,
            found: 0,
        }),
    }
}

/// Parse one source line; `Ok(None)` for blank and comment-only lines
pub fn parse_line(text: &str, line: usize) -> Result<Option<ParsedInstruction>> {
    let tokens = tokenize(text, line)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    LineParser { tokens, pos: 0, line }.parse().map(Some)
}

fn tokenize(text: &str, line: usize) -> Result<Vec<(Token, Range<usize>)>> {
    let mut lex = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(token) => tokens.push((token, lex.span())),
            Err(()) => {
                return Err(AssemblerError::InvalidToken {
                    line,
                    column: lex.span().start + 1,
                    text: lex.slice().to_string(),
                })
            }
        }
    }
    Ok(tokens)
}

struct LineParser {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    line: usize,
}

impl LineParser {
    fn parse(mut self) -> Result<ParsedInstruction> {
        let mnemonic = match self.next() {
            Some((Token::Identifier(name), _)) => name,
            Some((token, span)) => {
                return Err(AssemblerError::UnexpectedToken {
                    line: self.line,
                    column: span.start + 1,
                    found: token.describe(),
                })
            }
            None => unreachable!("parse_line skips empty lines"),
        };

        let opcode = Opcode::from_mnemonic(&mnemonic).ok_or_else(|| {
            AssemblerError::UnknownInstruction {
                line: self.line,
                mnemonic: mnemonic.clone(),
            }
        })?;

        let arity = opcode.arity() as usize;
        let mut operands = Vec::with_capacity(arity);
        for i in 0..arity {
            if i > 0 {
                self.skip_comma();
            }
            if self.peek().is_none() {
                return Err(AssemblerError::UnexpectedEndOfLine {
                    line: self.line,
                    mnemonic: opcode.mnemonic().to_string(),
                    expected: arity,
                    found: i,
                });
            }
            operands.push(self.parse_operand()?);
        }

        if let Some((token, span)) = self.next() {
            return Err(AssemblerError::UnexpectedToken {
                line: self.line,
                column: span.start + 1,
                found: token.describe(),
            });
        }

        let mut instr = ParsedInstruction::new(opcode);
        match operands.as_slice() {
            [] => {}
            [c] => instr.c = *c,
            [b, c] => {
                instr.b = *b;
                instr.c = *c;
            }
            [a, b, c] => {
                instr.a = *a;
                instr.b = *b;
                instr.c = *c;
            }
            _ => unreachable!("arity is at most 3"),
        }

        self.check_immediates(&instr)?;
        Ok(instr)
    }

    /// Immediates live in the trailing word, which only the C slot can name
    fn check_immediates(&self, instr: &ParsedInstruction) -> Result<()> {
        let misplaced = if instr.a.is_immediate() {
            Some('A')
        } else if instr.b.is_immediate() {
            Some('B')
        } else if instr.c.is_immediate() && !instr.opcode.accepts_immediate() {
            Some('C')
        } else {
            None
        };

        match misplaced {
            Some(slot) => Err(AssemblerError::ImmediateNotAllowed {
                line: self.line,
                mnemonic: instr.opcode.mnemonic().to_string(),
                slot,
            }),
            None => Ok(()),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let deref = matches!(self.peek(), Some((Token::LParen, _)));
        if deref {
            self.pos += 1;
        }

        let (token, span) = self.next().ok_or_else(|| AssemblerError::InvalidOperand {
            line: self.line,
            column: self.end_column(),
            found: "end of line".to_string(),
        })?;

        let value = match token {
            Token::Immediate(text) => OperandValue::Immediate(self.parse_word(&text)?),
            Token::BifRef(name) => {
                let bif = Bif::from_name(&name).ok_or(AssemblerError::UnknownBif {
                    line: self.line,
                    name,
                })?;
                OperandValue::Bif(bif)
            }
            Token::Identifier(ref ident) => match register_digits(ident) {
                Some(digits) => OperandValue::Register(self.parse_register(digits)?),
                None => return Err(self.invalid_operand(&token, &span)),
            },
            other => return Err(self.invalid_operand(&other, &span)),
        };

        if deref {
            match self.next() {
                Some((Token::RParen, _)) => {}
                Some((_, span)) => {
                    return Err(AssemblerError::MissingCloseParen {
                        line: self.line,
                        column: span.start + 1,
                    })
                }
                None => {
                    return Err(AssemblerError::MissingCloseParen {
                        line: self.line,
                        column: self.end_column(),
                    })
                }
            }
        }

        Ok(Operand { value, deref })
    }

    /// Decimal integer, negative values stored as two's complement
    fn parse_word(&self, text: &str) -> Result<Word> {
        let invalid = || AssemblerError::InvalidInteger {
            line: self.line,
            text: text.to_string(),
        };
        let value: i64 = text.parse().map_err(|_| invalid())?;
        if value < 0 {
            i32::try_from(value).map(|v| v as Word).map_err(|_| invalid())
        } else {
            Word::try_from(value).map_err(|_| invalid())
        }
    }

    /// Register numbers wrap to 4 bits like the codeword field
    fn parse_register(&self, digits: &str) -> Result<u8> {
        let index: u32 = digits.parse().map_err(|_| AssemblerError::InvalidInteger {
            line: self.line,
            text: digits.to_string(),
        })?;
        Ok((index & 0xF) as u8)
    }

    fn invalid_operand(&self, token: &Token, span: &Range<usize>) -> AssemblerError {
        AssemblerError::InvalidOperand {
            line: self.line,
            column: span.start + 1,
            found: token.describe(),
        }
    }

    fn skip_comma(&mut self) {
        if matches!(self.peek(), Some((Token::Comma, _))) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<&(Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<(Token, Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn end_column(&self) -> usize {
        self.tokens.last().map_or(1, |(_, span)| span.end + 1)
    }
}
