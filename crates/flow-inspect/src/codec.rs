//! Codec de anotaciones: símbolo <-> identificador textual.
//!
//! `encode` nunca falla. `decode` resuelve contra el `SymbolRegistry` del
//! proceso y devuelve el mismo símbolo (misma identidad) que se registró.
use std::fmt;

use flow_host::{Callable, Symbol, SymbolRegistry};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{InspectError, Result};

/// Identificador `"<module>.<qualname>"` de un tipo, clase o función.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationRef(String);

impl AnnotationRef {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self(fqn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

pub fn encode(symbol: &Symbol) -> AnnotationRef {
    AnnotationRef(symbol.fqn())
}

pub fn encode_callable(callable: &Callable) -> AnnotationRef {
    AnnotationRef(callable.fqn())
}

pub fn decode(registry: &SymbolRegistry, reference: &AnnotationRef) -> Result<Symbol> {
    match registry.lookup(reference.as_str()) {
        Some(symbol) => Ok(symbol.clone()),
        None => {
            warn!("codec:decode unresolved identifier {reference}");
            Err(InspectError::Resolution(reference.0.clone()))
        }
    }
}

/// Resuelve un identificador que debe denotar algo invocable (función,
/// método, wrapper o clase con constructor).
pub fn decode_callable(registry: &SymbolRegistry, reference: &AnnotationRef) -> Result<Callable> {
    decode(registry, reference)?.to_callable()
                                .ok_or_else(|| InspectError::Resolution(format!("{reference} (not callable)")))
}
