//! Modelo de firma de un callable.
//!
//! `CallableSignature::capture` refleja la firma declarada (parámetros en
//! orden, con kind y anotación) y `to_data`/`from_data` la convierten a y
//! desde su documento plano. Reglas de reflexión:
//! - clases: se usan los parámetros del constructor y el retorno es la clase;
//! - métodos ligados y métodos de clase: el receptor no aparece;
//! - métodos de instancia referenciados desde la clase: el receptor aparece
//!   como parámetro explícito;
//! - decoradores: se refleja el callable más interno.
use std::collections::HashSet;

use flow_host::{any_type, Callable, DeclaredParam, MethodKind, ParamKind, Symbol, SymbolRegistry};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::codec::{self, AnnotationRef};
use crate::errors::{InspectError, Result};

fn is_false(b: &bool) -> bool {
    !*b
}

/// Documento de un parámetro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub name: String,
    pub kind: ParamKind,
    pub type_hint: AnnotationRef,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_default: bool,
}

/// Documento de una firma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDoc {
    pub func: AnnotationRef,
    pub parameters: Vec<ParameterDoc>,
    pub return_value: AnnotationRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    /// Anotación declarada o el centinela `builtins.Any`.
    pub annotation: Symbol,
    pub has_default: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParamKind, annotation: impl Into<Symbol>) -> Self {
        Self { name: name.into(),
               kind,
               annotation: annotation.into(),
               has_default: false }
    }

    fn from_declared(p: &DeclaredParam) -> Self {
        Self { name: p.name.clone(),
               kind: p.kind,
               annotation: p.annotation.clone().unwrap_or_else(|| Symbol::Type(any_type())),
               has_default: p.has_default }
    }

    pub fn to_data(&self) -> ParameterDoc {
        ParameterDoc { name: self.name.clone(),
                       kind: self.kind,
                       type_hint: codec::encode(&self.annotation),
                       has_default: self.has_default }
    }

    pub fn from_data(doc: &ParameterDoc, registry: &SymbolRegistry) -> Result<Self> {
        Ok(Self { name: doc.name.clone(),
                  kind: doc.kind,
                  annotation: codec::decode(registry, &doc.type_hint)?,
                  has_default: doc.has_default })
    }
}

/// Firma reflejada de un callable. Inmutable tras construirse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSignature {
    pub target: Callable,
    pub parameters: Vec<Parameter>,
    pub return_annotation: Symbol,
}

impl CallableSignature {
    pub fn capture(callable: &Callable) -> Self {
        let (parameters, return_annotation) = reflect(callable.innermost());
        debug!("signature:capture {} params={}", callable.fqn(), parameters.len());
        Self { target: callable.clone(),
               parameters,
               return_annotation }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn to_data(&self) -> SignatureDoc {
        SignatureDoc { func: codec::encode_callable(&self.target),
                       parameters: self.parameters.iter().map(Parameter::to_data).collect(),
                       return_value: codec::encode(&self.return_annotation) }
    }

    /// Falla con `Resolution` si el target, algún tipo de parámetro o el tipo
    /// de retorno no existen en el registro, y con `MalformedDocument` si la
    /// lista de parámetros no la podría declarar ningún callable.
    pub fn from_data(doc: &SignatureDoc, registry: &SymbolRegistry) -> Result<Self> {
        check_declarable(&doc.parameters).map_err(|reason| {
                                             warn!("signature:from_data {} rechazada: {reason}", doc.func);
                                             InspectError::MalformedDocument(format!("{}: {reason}", doc.func))
                                         })?;
        let target = codec::decode_callable(registry, &doc.func)?;
        let parameters = doc.parameters
                            .iter()
                            .map(|p| Parameter::from_data(p, registry))
                            .collect::<Result<Vec<_>>>()?;
        let return_annotation = codec::decode(registry, &doc.return_value)?;
        debug!("signature:from_data {}", doc.func);
        Ok(Self { target,
                  parameters,
                  return_annotation })
    }
}

/// Nombres únicos, kinds en orden de declaración y como mucho un `*args` y
/// un `**kwargs`.
fn check_declarable(parameters: &[ParameterDoc]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    let mut previous: Option<ParamKind> = None;
    for p in parameters {
        if !seen.insert(p.name.as_str()) {
            return Err(format!("duplicate parameter '{}'", p.name));
        }
        if let Some(prev) = previous {
            if p.kind < prev {
                return Err(format!("parameter '{}' ({}) declared after {}", p.name, p.kind, prev));
            }
            if p.kind == prev && p.kind.is_variadic() {
                return Err(format!("more than one {} parameter", p.kind));
            }
        }
        previous = Some(p.kind);
    }
    Ok(())
}

fn unspecified_or(symbol: &Option<Symbol>) -> Symbol {
    symbol.clone().unwrap_or_else(|| Symbol::Type(any_type()))
}

fn reflect(callable: &Callable) -> (Vec<Parameter>, Symbol) {
    match callable {
        Callable::Function(f) => {
            // cls siempre lo liga el host
            let skip = usize::from(f.method == MethodKind::Class);
            (f.params.iter().skip(skip).map(Parameter::from_declared).collect(), unspecified_or(&f.returns))
        }
        Callable::Bound { method, .. } => {
            let skip = usize::from(matches!(method.method, MethodKind::Instance | MethodKind::Class));
            (method.params.iter().skip(skip).map(Parameter::from_declared).collect(), unspecified_or(&method.returns))
        }
        Callable::Class(t) => {
            let params = t.constructor
                          .as_deref()
                          .unwrap_or_default()
                          .iter()
                          .map(Parameter::from_declared)
                          .collect();
            (params, Symbol::Type(t.clone()))
        }
        Callable::Wrapped(w) => reflect(&w.inner),
    }
}
