use crate::ast::Type;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// The declared type, not the initializer's inferred type
    pub ty: Type,
    pub initialized: bool,
}

/// One flat, global scope. Blocks never push a new one.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Insert a freshly initialized variable. Returns `false`, leaving the
    /// table untouched, if the name is already taken.
    pub fn declare(&mut self, name: String, ty: Type) -> bool {
        if self.symbols.contains_key(&name) {
            return false;
        }
        self.symbols.insert(
            name,
            Symbol {
                ty,
                initialized: true,
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_type(&self, name: &str) -> Option<Type> {
        self.symbols.get(name).map(|s| s.ty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
