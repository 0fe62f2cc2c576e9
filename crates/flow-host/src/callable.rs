//! Callables del host y sus parámetros declarados.
//!
//! Un `Callable` es lo que un `Node` ejecutaría: una función libre, un método
//! (ligado o referenciado desde la clase), el constructor de una clase o un
//! wrapper (decorador) alrededor de cualquiera de ellos. Aquí sólo se describe
//! su firma declarada; la ejecución pertenece al motor.
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::symbol::{Symbol, TypeRef};

/// Categorías de binding de argumentos. Conjunto cerrado.
///
/// El orden de las variantes es el orden en que pueden declararse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

impl ParamKind {
    pub const ALL: [ParamKind; 5] = [ParamKind::PositionalOnly,
                                     ParamKind::PositionalOrKeyword,
                                     ParamKind::VarPositional,
                                     ParamKind::KeywordOnly,
                                     ParamKind::VarKeyword];

    /// Nombre canónico usado en documentos serializados.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PositionalOnly => "POSITIONAL_ONLY",
            Self::PositionalOrKeyword => "POSITIONAL_OR_KEYWORD",
            Self::VarPositional => "VAR_POSITIONAL",
            Self::KeywordOnly => "KEYWORD_ONLY",
            Self::VarKeyword => "VAR_KEYWORD",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parámetro tal como lo declara el callable.
#[derive(Debug, Clone)]
pub struct DeclaredParam {
    pub name: String,
    pub kind: ParamKind,
    pub annotation: Option<Symbol>,
    pub has_default: bool,
}

impl DeclaredParam {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self { name: name.into(),
               kind,
               annotation: None,
               has_default: false }
    }

    /// Atajo para el caso más común (`POSITIONAL_OR_KEYWORD`).
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword)
    }

    pub fn typed(mut self, annotation: impl Into<Symbol>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Forma en que una función está definida respecto a su clase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Función a nivel de módulo.
    Free,
    /// Método de instancia: el primer parámetro declarado es el receptor.
    Instance,
    /// Método de clase: el primer parámetro declarado es la clase, que el
    /// host liga siempre de forma implícita.
    Class,
    /// Método estático: sin receptor.
    Static,
}

/// Definición de una función o método.
#[derive(Debug)]
pub struct FunctionDef {
    pub module: String,
    pub qualname: String,
    pub params: Vec<DeclaredParam>,
    pub returns: Option<Symbol>,
    pub method: MethodKind,
}

impl FunctionDef {
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        Self { module: module.into(),
               qualname: qualname.into(),
               params: vec![],
               returns: None,
               method: MethodKind::Free }
    }

    pub fn param(mut self, param: DeclaredParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn returning(mut self, annotation: impl Into<Symbol>) -> Self {
        self.returns = Some(annotation.into());
        self
    }

    pub fn method(mut self, kind: MethodKind) -> Self {
        self.method = kind;
        self
    }

    pub fn build(self) -> Arc<FunctionDef> {
        Arc::new(self)
    }

    pub fn fqn(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }

    /// Nombre corto (último segmento del qualname).
    pub fn short_name(&self) -> &str {
        self.qualname.rsplit('.').next().unwrap_or(&self.qualname)
    }
}

/// Instancia viva usada como receptor de un método ligado.
#[derive(Debug)]
pub struct Instance {
    pub class: TypeRef,
    pub label: String,
}

impl Instance {
    pub fn new(class: TypeRef, label: impl Into<String>) -> Arc<Instance> {
        Arc::new(Self { class, label: label.into() })
    }
}

/// Capa de decorador. Conserva el identificador del callable envuelto.
#[derive(Debug)]
pub struct Wrapper {
    pub decorator: String,
    pub inner: Callable,
}

/// Referencia a algo invocable por un nodo.
#[derive(Debug, Clone)]
pub enum Callable {
    /// Función libre, método estático, método de clase o método de instancia
    /// referenciado desde la clase (receptor explícito).
    Function(Arc<FunctionDef>),
    /// Constructor de una clase.
    Class(TypeRef),
    /// Método de instancia ligado a un receptor concreto.
    Bound {
        method: Arc<FunctionDef>,
        receiver: Arc<Instance>,
    },
    Wrapped(Arc<Wrapper>),
}

impl Callable {
    pub fn function(def: Arc<FunctionDef>) -> Self {
        Callable::Function(def)
    }

    pub fn bind(method: Arc<FunctionDef>, receiver: Arc<Instance>) -> Self {
        Callable::Bound { method, receiver }
    }

    pub fn wrap(decorator: impl Into<String>, inner: Callable) -> Self {
        Callable::Wrapped(Arc::new(Wrapper { decorator: decorator.into(),
                                             inner }))
    }

    /// Identificador global. Los wrappers exponen el del callable envuelto.
    pub fn fqn(&self) -> String {
        match self {
            Callable::Function(f) => f.fqn(),
            Callable::Class(t) => t.fqn(),
            Callable::Bound { method, .. } => method.fqn(),
            Callable::Wrapped(w) => w.inner.fqn(),
        }
    }

    /// Nombre corto, usado para nombres derivados de nodos.
    pub fn short_name(&self) -> String {
        match self {
            Callable::Function(f) | Callable::Bound { method: f, .. } => f.short_name().to_string(),
            Callable::Class(t) => t.qualname.rsplit('.').next().unwrap_or(&t.qualname).to_string(),
            Callable::Wrapped(w) => w.inner.short_name(),
        }
    }

    /// Callable declarado más interno, sin capas de decorador.
    pub fn innermost(&self) -> &Callable {
        let mut current = self;
        while let Callable::Wrapped(w) = current {
            current = &w.inner;
        }
        current
    }

    /// Igualdad de identidad, como la del motor de ejecución.
    pub fn same_as(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Arc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Arc::ptr_eq(a, b),
            (Callable::Bound { method: ma, receiver: ra }, Callable::Bound { method: mb, receiver: rb }) => {
                Arc::ptr_eq(ma, mb) && Arc::ptr_eq(ra, rb)
            }
            (Callable::Wrapped(a), Callable::Wrapped(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Callable {}
