use crate::error::SemanticError;
use crate::labels::SymbolTable;
use dcpu::constants::SMALL_LITERAL_LIMIT;
use dcpu::{
    constants, make_instruction, make_non_basic_instruction, register_index, small_literal,
    NonBasicOpcode, Opcode, RegisterId, Word,
};

/// A constant operand value: either a number from the source text or a
/// label resolved against the symbol table during encoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Constant {
    Numeric(Word),
    Label { name: String, position: usize },
}

impl Constant {
    /// Resolves the constant to its word value.
    ///
    /// # Errors
    /// An unresolved label yields a
    /// [`SemanticError`](../error/struct.SemanticError.html) carrying the
    /// label's source position.
    pub fn value(&self, symbols: &SymbolTable) -> Result<Word, SemanticError> {
        match self {
            Constant::Numeric(value) => Ok(*value),
            Constant::Label { name, position } => symbols
                .resolve(name)
                .ok_or_else(|| SemanticError::new(name.clone(), *position)),
        }
    }

    /// Whether the value is known to be below `limit` at sizing time.
    ///
    /// Labels answer `false` — their value is unknown while addresses are
    /// being assigned, which pins them to the one-word encoding and keeps
    /// address assignment single-pass.
    pub fn below(&self, limit: Word) -> bool {
        match self {
            Constant::Numeric(value) => *value < limit,
            Constant::Label { .. } => false,
        }
    }
}

/// An instruction operand as written in the source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Argument {
    Register(RegisterId),
    RegisterIndirect(RegisterId),
    RegisterPlusWord(RegisterId, Constant),
    Pop,
    Peek,
    Push,
    Sp,
    Pc,
    O,
    WordIndirect(Constant),
    WordImmediate(Constant),
}

impl Argument {
    /// Number of extra words this operand appends to its instruction.
    pub fn extra_word_count(&self) -> Word {
        match self {
            Argument::Register(_)
            | Argument::RegisterIndirect(_)
            | Argument::Pop
            | Argument::Peek
            | Argument::Push
            | Argument::Sp
            | Argument::Pc
            | Argument::O => 0,
            Argument::RegisterPlusWord(..) | Argument::WordIndirect(_) => 1,
            Argument::WordImmediate(constant) => {
                if constant.below(SMALL_LITERAL_LIMIT) {
                    0
                } else {
                    1
                }
            }
        }
    }

    /// Encodes the operand as its 6-bit type code plus optional extra
    /// word.
    pub fn encode(&self, symbols: &SymbolTable) -> Result<(Word, Option<Word>), SemanticError> {
        Ok(match self {
            Argument::Register(id) => (register_index(*id) as Word, None),
            Argument::RegisterIndirect(id) => {
                (constants::ARG_REGISTER_PTR + register_index(*id) as Word, None)
            }
            Argument::RegisterPlusWord(id, constant) => (
                constants::ARG_REGISTER_WORD + register_index(*id) as Word,
                Some(constant.value(symbols)?),
            ),
            Argument::Pop => (constants::ARG_POP, None),
            Argument::Peek => (constants::ARG_PEEK, None),
            Argument::Push => (constants::ARG_PUSH, None),
            Argument::Sp => (constants::ARG_SP, None),
            Argument::Pc => (constants::ARG_PC, None),
            Argument::O => (constants::ARG_O, None),
            Argument::WordIndirect(constant) => {
                (constants::ARG_WORD_PTR, Some(constant.value(symbols)?))
            }
            Argument::WordImmediate(constant) => {
                let value = constant.value(symbols)?;
                if constant.below(SMALL_LITERAL_LIMIT) {
                    (small_literal(value), None)
                } else {
                    (constants::ARG_WORD, Some(value))
                }
            }
        })
    }
}

/// One element of a `DAT` statement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DataElement {
    /// Literal words, from numeric literals or from string characters
    /// (one word per character, the character in the low byte).
    Fixed(Vec<Word>),
    /// A symbol reference emitting the resolved address.
    Symbol { name: String, position: usize },
}

impl DataElement {
    pub fn size_in_memory(&self) -> Word {
        match self {
            DataElement::Fixed(words) => words.len() as Word,
            DataElement::Symbol { .. } => 1,
        }
    }

    fn encode(&self, code: &mut Vec<Word>, symbols: &SymbolTable) -> Result<(), SemanticError> {
        match self {
            DataElement::Fixed(words) => code.extend_from_slice(&words[..]),
            DataElement::Symbol { name, position } => {
                let value = symbols
                    .resolve(name)
                    .ok_or_else(|| SemanticError::new(name.clone(), *position))?;
                code.push(value);
            }
        }
        Ok(())
    }
}

/// A parsed statement, sized during phase 1 and encoded during phase 2.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement {
    Binary {
        operation: Opcode,
        a: Argument,
        b: Argument,
    },
    Unary {
        operation: NonBasicOpcode,
        argument: Argument,
    },
    Data(Vec<DataElement>),
    Reserve(Word),
}

impl Statement {
    /// Number of words the statement occupies in the output.
    pub fn size_in_memory(&self) -> Word {
        match self {
            Statement::Binary { a, b, .. } => {
                1u16.wrapping_add(a.extra_word_count())
                    .wrapping_add(b.extra_word_count())
            }
            Statement::Unary { argument, .. } => 1u16.wrapping_add(argument.extra_word_count()),
            Statement::Data(elements) => elements
                .iter()
                .fold(0u16, |size, element| {
                    size.wrapping_add(element.size_in_memory())
                }),
            Statement::Reserve(size) => *size,
        }
    }

    /// Appends the statement's words to `code`.
    ///
    /// # Errors
    /// Fails on the first unresolved label; words emitted before the
    /// failing element remain in `code`.
    pub fn encode(&self, code: &mut Vec<Word>, symbols: &SymbolTable) -> Result<(), SemanticError> {
        match self {
            Statement::Binary { operation, a, b } => {
                let (a_code, a_extra) = a.encode(symbols)?;
                let (b_code, b_extra) = b.encode(symbols)?;

                code.push(make_instruction(*operation, a_code, b_code));
                code.extend(a_extra);
                code.extend(b_extra);
            }
            Statement::Unary {
                operation,
                argument,
            } => {
                let (b_code, b_extra) = argument.encode(symbols)?;

                code.push(make_non_basic_instruction(*operation, b_code));
                code.extend(b_extra);
            }
            Statement::Data(elements) => {
                for element in elements {
                    element.encode(code, symbols)?;
                }
            }
            Statement::Reserve(size) => {
                let new_len = code.len() + *size as usize;
                code.resize(new_len, 0);
            }
        }
        Ok(())
    }
}

/// A source line: an optional label, an optional statement and the byte
/// offset the line started at. The line with neither label nor statement
/// marks the end of input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    pub label: Option<String>,
    pub statement: Option<Statement>,
    pub position: usize,
}

impl Line {
    pub fn size_in_memory(&self) -> Word {
        self.statement
            .as_ref()
            .map_or(0, Statement::size_in_memory)
    }
}
