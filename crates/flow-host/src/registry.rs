//! Registro explícito de símbolos del proceso.
//!
//! Un binario compilado no puede buscar símbolos por nombre en tiempo de
//! ejecución, así que el host expone un registro que el caller puebla al
//! arrancar (tipos, clases, funciones y métodos) y que después sólo se lee.
//! Los primitivos de `builtins` vienen pre-registrados.
use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::callable::{Callable, FunctionDef};
use crate::symbol::{builtin_types, Symbol, TypeRef};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistryError {
    #[error("identifier already bound to a different symbol: {0}")]
    Duplicate(String),
}

#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    symbols: HashMap<String, Symbol>,
}

impl SymbolRegistry {
    /// Registro con los primitivos de `builtins`.
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        for t in builtin_types() {
            symbols.insert(t.fqn(), Symbol::Type(t));
        }
        Self { symbols }
    }

    /// Registro vacío, sin primitivos.
    pub fn empty() -> Self {
        Self { symbols: HashMap::new() }
    }

    /// Registra un símbolo bajo su identificador. Volver a registrar el mismo
    /// símbolo no hace nada; otro símbolo con el mismo identificador es error.
    pub fn register(&mut self, symbol: impl Into<Symbol>) -> Result<(), RegistryError> {
        let symbol = symbol.into();
        let fqn = symbol.fqn();
        if let Some(existing) = self.symbols.get(&fqn) {
            if existing.same_as(&symbol) {
                return Ok(());
            }
            return Err(RegistryError::Duplicate(fqn));
        }
        debug!("registry:register {fqn}");
        self.symbols.insert(fqn, symbol);
        Ok(())
    }

    pub fn register_type(&mut self, t: &TypeRef) -> Result<(), RegistryError> {
        self.register(Symbol::Type(t.clone()))
    }

    pub fn register_function(&mut self, f: &Arc<FunctionDef>) -> Result<(), RegistryError> {
        self.register(Symbol::Callable(Callable::Function(f.clone())))
    }

    pub fn register_callable(&mut self, c: &Callable) -> Result<(), RegistryError> {
        self.register(Symbol::Callable(c.clone()))
    }

    pub fn lookup(&self, fqn: &str) -> Option<&Symbol> {
        self.symbols.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.symbols.contains_key(fqn)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Identificadores registrados, ordenados.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.symbols.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::{DeclaredParam, FunctionDef};
    use crate::symbol::{int_type, TypeDef};

    #[test]
    fn new_registry_knows_builtins() {
        let reg = SymbolRegistry::new();
        assert_eq!(reg.len(), 7);
        assert!(reg.lookup("builtins.int").is_some_and(|s| s.same_as(&Symbol::Type(int_type()))));
        assert!(SymbolRegistry::empty().is_empty());
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut reg = SymbolRegistry::new();
        let frame = TypeDef::new("pkg.models", "Frame");
        reg.register_type(&frame).unwrap();
        // mismo símbolo: idempotente
        reg.register_type(&frame).unwrap();

        let other = TypeDef::new("pkg.models", "Frame");
        assert_eq!(reg.register_type(&other), Err(RegistryError::Duplicate("pkg.models.Frame".into())));
    }

    #[test]
    fn functions_are_registered_under_qualname() {
        let mut reg = SymbolRegistry::new();
        let f = FunctionDef::new("pkg.nodes", "clean").param(DeclaredParam::positional("raw")).build();
        reg.register_function(&f).unwrap();
        assert!(reg.contains("pkg.nodes.clean"));
        assert!(reg.identifiers().contains(&"pkg.nodes.clean"));
    }
}
