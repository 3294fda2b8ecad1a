use crate::error::{LexicalError, ParseError, SyntaxError, SyntaxErrorKind};
use crate::scanner::{unescape, Scanner, Token, TokenKind};
use crate::statement::{Argument, Constant, DataElement, Line, Statement};
use dcpu::{NonBasicOpcode, Opcode, Word};

fn is_integer_literal(kind: TokenKind) -> bool {
    match kind {
        TokenKind::Decimal | TokenKind::Hexadecimal | TokenKind::Octal | TokenKind::Binary => {
            true
        }
        _ => false,
    }
}

fn digit_value(c: u8) -> Word {
    match c {
        b'0'..=b'9' => Word::from(c - b'0'),
        b'a'..=b'f' => Word::from(c - b'a' + 10),
        b'A'..=b'F' => Word::from(c - b'A' + 10),
        _ => 0,
    }
}

/// Recursive-descent parser with a single token of lookahead.
///
/// `parse_line` yields one [`Line`](../statement/struct.Line.html) per
/// call; the line with neither label nor statement marks the end of
/// input. After an error the caller resynchronizes by skipping the rest
/// of the source line and clearing the lookahead cache.
pub struct Parser<'s> {
    scanner: Scanner<'s>,
    cached: Option<Token>,
}

impl<'s> Parser<'s> {
    pub fn new(scanner: Scanner<'s>) -> Parser<'s> {
        Parser {
            scanner,
            cached: None,
        }
    }

    /// The underlying scanner, exposed for line-skip error recovery.
    pub fn scanner_mut(&mut self) -> &mut Scanner<'s> {
        &mut self.scanner
    }

    /// Drops the cached lookahead token.
    pub fn reset_cache(&mut self) {
        self.cached = None;
    }

    fn peek(&mut self) -> Result<Token, LexicalError> {
        debug_assert!(self.cached.is_none());
        let token = self.scanner.next_token()?;
        self.cached = Some(token);
        Ok(token)
    }

    fn pop(&mut self) -> Result<Token, LexicalError> {
        match self.cached.take() {
            Some(token) => Ok(token),
            None => self.scanner.next_token(),
        }
    }

    fn text(&self, token: &Token) -> String {
        String::from_utf8_lossy(self.scanner.slice(token)).into_owned()
    }

    fn integer_value(&self, token: &Token) -> Word {
        let base = match token.kind {
            TokenKind::Decimal => 10,
            TokenKind::Hexadecimal => 16,
            TokenKind::Octal => 8,
            TokenKind::Binary => 2,
            _ => unreachable!(),
        };

        let mut value: Word = 0;
        for &c in self.scanner.slice(token) {
            value = value.wrapping_mul(base).wrapping_add(digit_value(c));
        }
        value
    }

    fn constant_from(&self, token: &Token) -> Constant {
        if token.kind == TokenKind::Identifier {
            Constant::Label {
                name: self.text(token),
                position: token.begin,
            }
        } else {
            Constant::Numeric(self.integer_value(token))
        }
    }

    pub fn parse_line(&mut self) -> Result<Line, ParseError> {
        let mut label = None;
        let mut first = self.pop()?;
        let line_begin = first.begin;

        if first.kind == TokenKind::Colon {
            let label_token = self.pop()?;
            if label_token.kind != TokenKind::Identifier {
                return Err(
                    SyntaxError::new(SyntaxErrorKind::LabelNameExpected, label_token.begin).into(),
                );
            }
            label = Some(self.text(&label_token));

            // A following colon starts the next label's line; this line
            // carries only the label.
            first = self.peek()?;
            if first.kind == TokenKind::Colon {
                return Ok(Line {
                    label,
                    statement: None,
                    position: line_begin,
                });
            }
            self.pop()?;
        } else if first.kind == TokenKind::EndOfFile {
            return Ok(Line {
                label: None,
                statement: None,
                position: line_begin,
            });
        }

        let statement = match first.kind {
            TokenKind::Operation(operation) => Some(self.parse_binary(operation)?),
            TokenKind::Jsr => Some(self.parse_unary(NonBasicOpcode::Jsr)?),
            TokenKind::Dat => Some(self.parse_data()?),
            TokenKind::Resv => Some(self.parse_reserve()?),
            TokenKind::EndOfFile => None,
            _ => {
                return Err(
                    SyntaxError::new(SyntaxErrorKind::KeywordExpected, first.begin).into(),
                );
            }
        };

        Ok(Line {
            label,
            statement,
            position: line_begin,
        })
    }

    fn parse_binary(&mut self, operation: Opcode) -> Result<Statement, ParseError> {
        let a = self.parse_argument()?;

        let comma = self.pop()?;
        if comma.kind != TokenKind::Comma {
            return Err(SyntaxError::new(SyntaxErrorKind::CommaExpected, comma.begin).into());
        }

        let b = self.parse_argument()?;

        Ok(Statement::Binary { operation, a, b })
    }

    fn parse_unary(&mut self, operation: NonBasicOpcode) -> Result<Statement, ParseError> {
        let argument = self.parse_argument()?;
        Ok(Statement::Unary {
            operation,
            argument,
        })
    }

    fn parse_data(&mut self) -> Result<Statement, ParseError> {
        let mut elements = Vec::new();

        loop {
            let current = self.pop()?;

            if current.kind == TokenKind::Str {
                let words = unescape(self.scanner.slice(&current))
                    .iter()
                    .map(|&c| Word::from(c))
                    .collect();
                elements.push(DataElement::Fixed(words));
            } else if is_integer_literal(current.kind) {
                elements.push(DataElement::Fixed(vec![self.integer_value(&current)]));
            } else if current.kind == TokenKind::Identifier {
                elements.push(DataElement::Symbol {
                    name: self.text(&current),
                    position: current.begin,
                });
            } else {
                return Err(
                    SyntaxError::new(SyntaxErrorKind::DataExpected, current.begin).into(),
                );
            }

            let comma = self.peek()?;
            if comma.kind == TokenKind::Comma {
                self.pop()?;
            } else {
                break;
            }
        }

        Ok(Statement::Data(elements))
    }

    fn parse_reserve(&mut self) -> Result<Statement, ParseError> {
        let size = self.pop()?;
        if !is_integer_literal(size.kind) {
            return Err(SyntaxError::new(SyntaxErrorKind::DataExpected, size.begin).into());
        }

        Ok(Statement::Reserve(self.integer_value(&size)))
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        let first = self.pop()?;
        match first.kind {
            TokenKind::LeftBracket => {
                let second = self.pop()?;
                if let TokenKind::Register(id) = second.kind {
                    self.expect_right_bracket()?;
                    return Ok(Argument::RegisterIndirect(id));
                }

                if second.kind == TokenKind::Identifier || is_integer_literal(second.kind) {
                    let constant = self.constant_from(&second);

                    let plus = self.peek()?;
                    if plus.kind == TokenKind::Plus {
                        self.pop()?;
                        let register = self.pop()?;
                        if let TokenKind::Register(id) = register.kind {
                            self.expect_right_bracket()?;
                            return Ok(Argument::RegisterPlusWord(id, constant));
                        }
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::UniversalRegisterExpected,
                            register.begin,
                        )
                        .into());
                    }

                    self.expect_right_bracket()?;
                    return Ok(Argument::WordIndirect(constant));
                }

                Err(SyntaxError::new(SyntaxErrorKind::ArgumentExpected, first.begin).into())
            }
            TokenKind::Identifier => Ok(Argument::WordImmediate(self.constant_from(&first))),
            TokenKind::Pop => Ok(Argument::Pop),
            TokenKind::Peek => Ok(Argument::Peek),
            TokenKind::Push => Ok(Argument::Push),
            TokenKind::Sp => Ok(Argument::Sp),
            TokenKind::Pc => Ok(Argument::Pc),
            TokenKind::O => Ok(Argument::O),
            TokenKind::Register(id) => Ok(Argument::Register(id)),
            kind if is_integer_literal(kind) => {
                Ok(Argument::WordImmediate(self.constant_from(&first)))
            }
            _ => Err(SyntaxError::new(SyntaxErrorKind::ArgumentExpected, first.begin).into()),
        }
    }

    fn expect_right_bracket(&mut self) -> Result<(), ParseError> {
        let bracket = self.pop()?;
        if bracket.kind != TokenKind::RightBracket {
            return Err(SyntaxError::new(
                SyntaxErrorKind::ClosingBracketExpected,
                bracket.begin,
            )
            .into());
        }
        Ok(())
    }
}
