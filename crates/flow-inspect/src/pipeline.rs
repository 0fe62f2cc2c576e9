//! Snapshot de un pipeline completo: secuencia ordenada de `NodeSnapshot`.
//!
//! No valida orden topológico ni ciclos; el orden es el del pipeline de
//! origen y se conserva en ambos sentidos.
use flow_host::{Pipeline, SymbolRegistry};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::errors::{InspectError, Result};
use crate::hashing::hash_value;
use crate::node::{NodeDoc, NodeSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDoc {
    pub nodes: Vec<NodeDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl PipelineSnapshot {
    pub fn new(nodes: Vec<NodeSnapshot>) -> Self {
        Self { nodes }
    }

    /// Captura todos los nodos en orden. El primer nodo que no liga aborta
    /// la captura completa.
    pub fn capture(pipeline: &Pipeline) -> Result<Self> {
        let nodes = pipeline.iter().map(NodeSnapshot::capture).collect::<Result<Vec<_>>>()?;
        debug!("pipeline:capture nodes={}", nodes.len());
        Ok(Self { nodes })
    }

    pub fn to_pipeline(&self) -> Pipeline {
        Pipeline::new(self.nodes.iter().map(NodeSnapshot::to_node).collect())
    }

    pub fn to_data(&self) -> PipelineDoc {
        PipelineDoc { nodes: self.nodes.iter().map(NodeSnapshot::to_data).collect() }
    }

    pub fn from_data(doc: &PipelineDoc, registry: &SymbolRegistry) -> Result<Self> {
        let nodes = doc.nodes
                       .iter()
                       .map(|n| NodeSnapshot::from_data(n, registry))
                       .collect::<Result<Vec<_>>>()?;
        debug!("pipeline:from_data nodes={}", nodes.len());
        Ok(Self { nodes })
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_data())?)
    }

    pub fn from_value(value: Value, registry: &SymbolRegistry) -> Result<Self> {
        let doc: PipelineDoc = serde_json::from_value(value)?;
        Self::from_data(&doc, registry)
    }

    /// Documento JSON. `indent = None` produce la forma compacta; con
    /// `Some(n)` cada nivel se indenta `n` espacios.
    pub fn to_json(&self, indent: Option<usize>) -> Result<String> {
        let doc = self.to_data();
        let Some(width) = indent else {
            return Ok(serde_json::to_string(&doc)?);
        };
        let pad = vec![b' '; width];
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
        doc.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| InspectError::MalformedDocument(e.to_string()))
    }

    pub fn from_json(json: &str, registry: &SymbolRegistry) -> Result<Self> {
        let doc: PipelineDoc = serde_json::from_str(json)?;
        Self::from_data(&doc, registry)
    }

    /// Huella blake3 del documento canónico.
    pub fn fingerprint(&self) -> Result<String> {
        Ok(hash_value(&self.to_value()?))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
