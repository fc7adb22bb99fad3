//! Operator precedence table

use std::collections::BTreeMap;

/// Binding power per binary operator symbol; higher binds tighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceTable {
    levels: BTreeMap<String, u8>,
}

impl PrecedenceTable {
    /// A table without operators: every expression is a single factor
    pub fn empty() -> Self {
        PrecedenceTable {
            levels: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, level: u8) {
        self.levels.insert(symbol.into(), level);
    }

    pub fn with(mut self, symbol: impl Into<String>, level: u8) -> Self {
        self.insert(symbol, level);
        self
    }

    /// Binding power of `symbol`, `None` if it is not a binary operator
    pub fn level(&self, symbol: &str) -> Option<u8> {
        self.levels.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        PrecedenceTable::empty()
            .with("*", 20)
            .with("/", 20)
            .with("+", 10)
            .with("-", 10)
    }
}
