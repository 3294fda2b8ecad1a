//! Error values raised by the assembler.
//!
//! Three families mirror the pipeline stages: lexical (scanner), syntax
//! (parser) and semantic (encoding). Every error carries the byte offset
//! it was raised at; hosts turn offsets into line/column with
//! [`line_col`](../source_map/fn.line_col.html). Redefinitions are not a
//! value type here — the assembler driver reports them straight through
//! its [`ErrorHandler`](../assembler/trait.ErrorHandler.html).

use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LexicalErrorKind {
    InvalidCharacter,
    IncompleteInteger,
    UnexpectedCharacter,
    IncompleteString,
    InvalidEscapeSequence,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub position: usize,
}

impl LexicalError {
    pub fn new(kind: LexicalErrorKind, position: usize) -> LexicalError {
        LexicalError { kind, position }
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self.kind {
            LexicalErrorKind::InvalidCharacter => "Invalid character",
            LexicalErrorKind::IncompleteInteger => "Incomplete integer literal",
            LexicalErrorKind::UnexpectedCharacter => "Unexpected character after literal",
            LexicalErrorKind::IncompleteString => "Unterminated string literal",
            LexicalErrorKind::InvalidEscapeSequence => "Invalid escape sequence",
        };
        write!(f, "{} at offset {}", message, self.position)
    }
}

impl StdError for LexicalError {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyntaxErrorKind {
    LabelNameExpected,
    ClosingBracketExpected,
    KeywordExpected,
    CommaExpected,
    ArgumentExpected,
    DataExpected,
    UniversalRegisterExpected,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: usize) -> SyntaxError {
        SyntaxError { kind, position }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self.kind {
            SyntaxErrorKind::LabelNameExpected => "Label name expected",
            SyntaxErrorKind::ClosingBracketExpected => "Closing bracket expected",
            SyntaxErrorKind::KeywordExpected => "Keyword expected",
            SyntaxErrorKind::CommaExpected => "Comma expected",
            SyntaxErrorKind::ArgumentExpected => "Argument expected",
            SyntaxErrorKind::DataExpected => "Data expected",
            SyntaxErrorKind::UniversalRegisterExpected => "Universal register expected",
        };
        write!(f, "{} at offset {}", message, self.position)
    }
}

impl StdError for SyntaxError {}

/// Unresolved identifier reported during phase-2 encoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SemanticError {
    pub name: String,
    pub position: usize,
}

impl SemanticError {
    pub fn new(name: String, position: usize) -> SemanticError {
        SemanticError { name, position }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unknown identifier \"{}\" at offset {}",
            self.name, self.position
        )
    }
}

impl StdError for SemanticError {}

/// Error returned by [`Parser::parse_line`](../parser/struct.Parser.html).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    Lexical(LexicalError),
    Syntax(SyntaxError),
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> ParseError {
        ParseError::Lexical(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> ParseError {
        ParseError::Syntax(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Lexical(err) => err.fmt(f),
            ParseError::Syntax(err) => err.fmt(f),
        }
    }
}

impl StdError for ParseError {}
