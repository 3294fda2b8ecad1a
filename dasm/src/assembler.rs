use crate::error::{LexicalError, ParseError, SemanticError, SyntaxError};
use crate::labels::SymbolTable;
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::statement::Line;
use dcpu::Word;

/// Diagnostic collaborator supplied by the host.
///
/// The assembler reports every problem it finds through these entry
/// points and keeps going; it never writes to stdout or stderr itself.
/// Redefinitions carry the line-begin offsets of the previous and the
/// redefining line plus the offending name.
pub trait ErrorHandler {
    fn handle_lexical(&mut self, error: &LexicalError);
    fn handle_syntax(&mut self, error: &SyntaxError);
    fn handle_semantic(&mut self, error: &SemanticError);
    fn handle_redefinition(&mut self, previous: usize, redefined: usize, name: &str);
}

/// Result of an assembly run.
///
/// `code` is the emitted word vector, best-effort even when diagnostics
/// were raised. `lines` retains the parsed program in source order so a
/// host can produce a listing without re-parsing. `success` is true iff
/// no diagnostic of any kind was reported.
pub struct Assembly {
    pub code: Vec<Word>,
    pub lines: Vec<Line>,
    pub success: bool,
}

/// Assembles `source`, reporting problems to `handler`.
///
/// Phase 1 parses lines, assigns each label the running word address and
/// records parse order; scanner and parser failures skip to the next
/// source line and continue. Phase 2 encodes every statement against the
/// completed symbol table; an unresolved identifier fails only its own
/// statement.
pub fn assemble(source: &str, handler: &mut dyn ErrorHandler) -> Assembly {
    let mut parser = Parser::new(Scanner::new(source.as_bytes()));
    let mut symbols = SymbolTable::new();
    let mut lines: Vec<Line> = Vec::new();
    let mut address: Word = 0;
    let mut success = true;

    loop {
        match parser.parse_line() {
            Ok(line) => {
                if line.label.is_none() && line.statement.is_none() {
                    break;
                }

                if let Some(name) = &line.label {
                    if let Err(previous) = symbols.insert(name, address, lines.len()) {
                        success = false;
                        handler.handle_redefinition(
                            lines[previous.line].position,
                            line.position,
                            name,
                        );
                    }
                }

                address = address.wrapping_add(line.size_in_memory());
                lines.push(line);
            }
            Err(error) => {
                success = false;
                match error {
                    ParseError::Lexical(error) => handler.handle_lexical(&error),
                    ParseError::Syntax(error) => handler.handle_syntax(&error),
                }
                parser.scanner_mut().skip_line();
                parser.reset_cache();
            }
        }
    }

    let mut code = Vec::new();
    for line in &lines {
        if let Some(statement) = &line.statement {
            if let Err(error) = statement.encode(&mut code, &symbols) {
                success = false;
                handler.handle_semantic(&error);
            }
        }
    }

    Assembly {
        code,
        lines,
        success,
    }
}
