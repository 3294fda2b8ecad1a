use std::collections::HashMap;

use dcpu::Word;

/// A label definition: the address assigned during phase 1 and the index
/// of the defining line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Symbol {
    pub address: Word,
    pub line: usize,
}

/// Label table built during phase 1 and read-only during phase 2.
#[derive(Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    /// Defines `name` unless it is already present.
    ///
    /// # Errors
    /// Returns the existing definition on a duplicate; the first
    /// definition stays in force.
    pub fn insert(&mut self, name: &str, address: Word, line: usize) -> Result<(), Symbol> {
        match self.symbols.get(name) {
            Some(previous) => Err(*previous),
            None => {
                self.symbols
                    .insert(name.to_owned(), Symbol { address, line });
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Word> {
        self.symbols.get(name).map(|symbol| symbol.address)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
