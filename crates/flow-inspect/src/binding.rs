//! Derivación `parámetro -> datasets`.
//!
//! Los inputs declarados de un nodo se ligan contra la firma capturada con
//! las reglas estándar de llamada:
//! - inputs con forma de mapa se ligan por nombre (keyword);
//! - inputs string / lista / ausentes se ligan posicionalmente.
//!
//! El resultado sin agrupar (`BoundValue`) distingue un dataset suelto del
//! sobrante de `*args` o `**kwargs`; `param_to_inputs` lo normaliza a listas.
use flow_host::{DatasetBinding, ParamKind};
use indexmap::IndexMap;

use crate::errors::BindingError;
use crate::signature::Parameter;

/// Mapa derivado: nombre de parámetro -> datasets ligados, en orden de
/// parámetros declarados.
pub type ParamToInputs = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Single(String),
    /// Sobrante posicional capturado por `VAR_POSITIONAL`.
    Positional(Vec<String>),
    /// Sobrante por nombre capturado por `VAR_KEYWORD`.
    Keyword(IndexMap<String, String>),
}

impl BoundValue {
    pub fn into_datasets(self) -> Vec<String> {
        match self {
            BoundValue::Single(s) => vec![s],
            BoundValue::Positional(v) => v,
            BoundValue::Keyword(m) => m.into_values().collect(),
        }
    }
}

/// Liga los inputs contra los parámetros. Los parámetros que quedan sin
/// valor (con default, o variádicos sin sobrante) no aparecen.
pub fn bind(parameters: &[Parameter], inputs: Option<&DatasetBinding>) -> Result<IndexMap<String, BoundValue>, BindingError> {
    match inputs {
        Some(DatasetBinding::Mapping(kwargs)) => bind_keyword(parameters, kwargs),
        Some(DatasetBinding::Sequence(args)) => bind_positional(parameters, args),
        Some(DatasetBinding::Single(arg)) => bind_positional(parameters, std::slice::from_ref(arg)),
        None => bind_positional(parameters, &[]),
    }
}

pub fn param_to_inputs(parameters: &[Parameter], inputs: Option<&DatasetBinding>) -> Result<ParamToInputs, BindingError> {
    Ok(bind(parameters, inputs)?.into_iter()
                                .map(|(param, value)| (param, value.into_datasets()))
                                .collect())
}

fn bind_positional(parameters: &[Parameter], args: &[String]) -> Result<IndexMap<String, BoundValue>, BindingError> {
    let mut bound = IndexMap::new();
    let mut next = 0;
    for p in parameters {
        match p.kind {
            ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                if let Some(arg) = args.get(next) {
                    bound.insert(p.name.clone(), BoundValue::Single(arg.clone()));
                    next += 1;
                } else if !p.has_default {
                    return Err(BindingError::MissingArgument(p.name.clone()));
                }
            }
            ParamKind::VarPositional => {
                if next < args.len() {
                    bound.insert(p.name.clone(), BoundValue::Positional(args[next..].to_vec()));
                    next = args.len();
                }
            }
            ParamKind::KeywordOnly => {
                if next < args.len() {
                    return Err(BindingError::TooManyPositional { given: args.len(),
                                                                 accepted: next });
                }
                if !p.has_default {
                    return Err(BindingError::MissingArgument(p.name.clone()));
                }
            }
            ParamKind::VarKeyword => {}
        }
    }
    if next < args.len() {
        return Err(BindingError::TooManyPositional { given: args.len(),
                                                     accepted: next });
    }
    Ok(bound)
}

fn bind_keyword(parameters: &[Parameter], kwargs: &IndexMap<String, String>) -> Result<IndexMap<String, BoundValue>, BindingError> {
    let mut bound = IndexMap::new();
    let mut leftover = kwargs.clone();
    let sink = parameters.iter().find(|p| p.kind == ParamKind::VarKeyword);
    for p in parameters {
        match p.kind {
            ParamKind::VarPositional | ParamKind::VarKeyword => {}
            ParamKind::PositionalOnly => {
                // con **kwargs el nombre queda en el sobrante
                if kwargs.contains_key(&p.name) && sink.is_none() {
                    return Err(BindingError::PositionalOnlyAsKeyword(p.name.clone()));
                }
                if !p.has_default {
                    return Err(BindingError::MissingArgument(p.name.clone()));
                }
            }
            ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly => match leftover.shift_remove(&p.name) {
                Some(dataset) => {
                    bound.insert(p.name.clone(), BoundValue::Single(dataset));
                }
                None if p.has_default => {}
                None => return Err(BindingError::MissingArgument(p.name.clone())),
            },
        }
    }
    if !leftover.is_empty() {
        match sink {
            Some(sink) => {
                bound.insert(sink.name.clone(), BoundValue::Keyword(leftover));
            }
            None => {
                let first = leftover.keys().next().cloned().unwrap_or_default();
                return Err(BindingError::UnexpectedKeyword(first));
            }
        }
    }
    Ok(bound)
}
