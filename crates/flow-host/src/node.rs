//! Nodo vivo del pipeline: callable + bindings de datasets + metadata.
use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::callable::Callable;

/// Forma de los inputs/outputs declarados por un nodo.
///
/// En JSON: string, lista de strings u objeto `param -> dataset`. La ausencia
/// de binding se representa fuera de este tipo (`Option::None` / `null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetBinding {
    Single(String),
    Sequence(Vec<String>),
    Mapping(IndexMap<String, String>),
}

impl DatasetBinding {
    /// Nombres de datasets en orden declarado.
    pub fn dataset_names(&self) -> Vec<String> {
        match self {
            DatasetBinding::Single(s) => vec![s.clone()],
            DatasetBinding::Sequence(v) => v.clone(),
            DatasetBinding::Mapping(m) => m.values().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DatasetBinding::Single(_) => 1,
            DatasetBinding::Sequence(v) => v.len(),
            DatasetBinding::Mapping(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for DatasetBinding {
    fn from(s: &str) -> Self {
        DatasetBinding::Single(s.to_string())
    }
}

impl From<String> for DatasetBinding {
    fn from(s: String) -> Self {
        DatasetBinding::Single(s)
    }
}

impl From<Vec<String>> for DatasetBinding {
    fn from(v: Vec<String>) -> Self {
        DatasetBinding::Sequence(v)
    }
}

impl From<Vec<&str>> for DatasetBinding {
    fn from(v: Vec<&str>) -> Self {
        DatasetBinding::Sequence(v.into_iter().map(String::from).collect())
    }
}

impl From<IndexMap<String, String>> for DatasetBinding {
    fn from(m: IndexMap<String, String>) -> Self {
        DatasetBinding::Mapping(m)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for DatasetBinding {
    fn from(pairs: [(&str, &str); N]) -> Self {
        DatasetBinding::Mapping(pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }
}

/// Paso del pipeline tal como lo consume el motor de ejecución.
#[derive(Debug, Clone)]
pub struct Node {
    pub func: Callable,
    pub inputs: Option<DatasetBinding>,
    pub outputs: Option<DatasetBinding>,
    pub name: Option<String>,
    pub tags: BTreeSet<String>,
    pub confirms: Vec<String>,
    pub namespace: Option<String>,
}

impl Node {
    pub fn new(func: Callable, inputs: Option<DatasetBinding>, outputs: Option<DatasetBinding>) -> Self {
        Self { func,
               inputs,
               outputs,
               name: None,
               tags: BTreeSet::new(),
               confirms: vec![],
               namespace: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_confirms<I, S>(mut self, confirms: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.confirms.extend(confirms.into_iter().map(Into::into));
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Datasets de entrada en orden declarado (vacío si no hay binding).
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.as_ref().map(DatasetBinding::dataset_names).unwrap_or_default()
    }

    pub fn output_names(&self) -> Vec<String> {
        self.outputs.as_ref().map(DatasetBinding::dataset_names).unwrap_or_default()
    }

    /// Nombre visible: el explícito o uno derivado de la función y sus
    /// datasets, prefijado por el namespace.
    pub fn display_name(&self) -> String {
        let base = match &self.name {
            Some(n) => n.clone(),
            None => format!("{}([{}]) -> [{}]",
                            self.func.short_name(),
                            self.input_names().join(";"),
                            self.output_names().join(";")),
        };
        match &self.namespace {
            Some(ns) => format!("{ns}.{base}"),
            None => base,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.func.same_as(&other.func)
        && self.inputs == other.inputs
        && self.outputs == other.outputs
        && self.name == other.name
        && self.tags == other.tags
        && self.confirms == other.confirms
        && self.namespace == other.namespace
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
