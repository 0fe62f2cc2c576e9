//! Símbolos del host: tipos y callables identificables por nombre calificado.
//!
//! Un símbolo es la unidad que el `SymbolRegistry` resuelve a partir de un
//! identificador `"<module>.<qualname>"`. La identidad es por puntero (`Arc`),
//! no por valor: dos `TypeDef` con el mismo nombre creados por separado son
//! tipos distintos, igual que dos clases homónimas en módulos recargados.
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::callable::{Callable, DeclaredParam};

/// Namespace de los tipos primitivos.
pub const BUILTINS: &str = "builtins";

/// Descriptor de un tipo (o clase) del host.
#[derive(Debug)]
pub struct TypeDef {
    pub module: String,
    pub qualname: String,
    /// Parámetros del constructor, sin el receptor. `None` si el tipo no se
    /// puede usar como callable de un nodo.
    pub constructor: Option<Vec<DeclaredParam>>,
}

pub type TypeRef = Arc<TypeDef>;

impl TypeDef {
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> TypeRef {
        Arc::new(Self { module: module.into(),
                        qualname: qualname.into(),
                        constructor: None })
    }

    /// Clase instanciable: su constructor actúa como callable del nodo.
    pub fn with_constructor(module: impl Into<String>, qualname: impl Into<String>, params: Vec<DeclaredParam>) -> TypeRef {
        Arc::new(Self { module: module.into(),
                        qualname: qualname.into(),
                        constructor: Some(params) })
    }

    pub fn fqn(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }
}

static INT: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "int"));
static FLOAT: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "float"));
static STR: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "str"));
static BOOL: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "bool"));
static BYTES: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "bytes"));
static NONE: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "NoneType"));
static ANY: Lazy<TypeRef> = Lazy::new(|| TypeDef::new(BUILTINS, "Any"));

pub fn int_type() -> TypeRef {
    INT.clone()
}

pub fn float_type() -> TypeRef {
    FLOAT.clone()
}

pub fn str_type() -> TypeRef {
    STR.clone()
}

pub fn bool_type() -> TypeRef {
    BOOL.clone()
}

pub fn bytes_type() -> TypeRef {
    BYTES.clone()
}

/// Tipo de retorno de callables que no devuelven nada.
pub fn none_type() -> TypeRef {
    NONE.clone()
}

/// Centinela "tipo no especificado": se usa cuando un parámetro o retorno no
/// declara anotación.
pub fn any_type() -> TypeRef {
    ANY.clone()
}

/// Todos los primitivos, en orden estable. Son singletons del proceso.
pub fn builtin_types() -> [TypeRef; 7] {
    [int_type(), float_type(), str_type(), bool_type(), bytes_type(), none_type(), any_type()]
}

/// Un tipo, clase o función resoluble por nombre.
#[derive(Debug, Clone)]
pub enum Symbol {
    Type(TypeRef),
    Callable(Callable),
}

impl Symbol {
    /// Identificador global `"<module>.<qualname>"`.
    pub fn fqn(&self) -> String {
        match self {
            Symbol::Type(t) => t.fqn(),
            Symbol::Callable(c) => c.fqn(),
        }
    }

    /// Igualdad de identidad (no estructural).
    pub fn same_as(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Type(a), Symbol::Type(b)) => Arc::ptr_eq(a, b),
            (Symbol::Callable(a), Symbol::Callable(b)) => a.same_as(b),
            _ => false,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Symbol::Type(t) => Some(t),
            Symbol::Callable(_) => None,
        }
    }

    /// Vista del símbolo como callable de nodo. Las clases sólo lo son si
    /// declaran constructor.
    pub fn to_callable(&self) -> Option<Callable> {
        match self {
            Symbol::Type(t) if t.constructor.is_some() => Some(Callable::Class(t.clone())),
            Symbol::Type(_) => None,
            Symbol::Callable(c) => Some(c.clone()),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        self.same_as(&Symbol::Type(any_type()))
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Symbol {}

impl From<TypeRef> for Symbol {
    fn from(t: TypeRef) -> Self {
        Symbol::Type(t)
    }
}

impl From<Callable> for Symbol {
    fn from(c: Callable) -> Self {
        Symbol::Callable(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_process_singletons() {
        assert!(Arc::ptr_eq(&int_type(), &int_type()));
        assert_eq!(int_type().fqn(), "builtins.int");
        assert_eq!(none_type().fqn(), "builtins.NoneType");
        assert!(Symbol::from(any_type()).is_unspecified());
    }

    #[test]
    fn homonymous_types_are_distinct() {
        let a = TypeDef::new("pkg.models", "Frame");
        let b = TypeDef::new("pkg.models", "Frame");
        assert_eq!(a.fqn(), b.fqn());
        assert_ne!(Symbol::from(a), Symbol::from(b));
    }

    #[test]
    fn plain_types_are_not_callables() {
        assert!(Symbol::from(int_type()).to_callable().is_none());
        let class = TypeDef::with_constructor("pkg.models", "Frame", vec![]);
        assert!(matches!(Symbol::from(class).to_callable(), Some(Callable::Class(_))));
    }
}
