//! Snapshot de un nodo del pipeline.
//!
//! Copia los campos de identidad del nodo vivo, sus bindings (clonados, el
//! pipeline de origen puede seguir mutando), la firma de su callable y el
//! mapa derivado `param_to_inputs`. Ese mapa no es configurable: siempre es
//! el resultado de ligar `inputs` contra `signature.parameters`.
use std::collections::BTreeSet;

use flow_host::{DatasetBinding, Node, SymbolRegistry};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::{self, ParamToInputs};
use crate::errors::{InspectError, Result};
use crate::signature::{CallableSignature, SignatureDoc};

/// Documento de un nodo. Todas las claves son obligatorias; `null` marca
/// los opcionales ausentes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDoc {
    #[serde(deserialize_with = "Option::deserialize")]
    pub name: Option<String>,
    pub tags: Vec<String>,
    pub confirms: Vec<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub namespace: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub inputs: Option<DatasetBinding>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub outputs: Option<DatasetBinding>,
    pub function: SignatureDoc,
    pub param_to_input: ParamToInputs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    name: Option<String>,
    tags: BTreeSet<String>,
    confirms: Vec<String>,
    namespace: Option<String>,
    inputs: Option<DatasetBinding>,
    outputs: Option<DatasetBinding>,
    signature: CallableSignature,
    param_to_inputs: ParamToInputs,
}

impl NodeSnapshot {
    /// Captura un nodo vivo. Falla con `Binding` si sus inputs no encajan en
    /// la firma del callable.
    pub fn capture(node: &Node) -> Result<Self> {
        let signature = CallableSignature::capture(&node.func);
        let param_to_inputs = derive(&signature, node.inputs.as_ref(), &node.display_name())?;
        debug!("node:capture {} params={}", node.display_name(), param_to_inputs.len());
        Ok(Self { name: node.name.clone(),
                  tags: node.tags.clone(),
                  confirms: node.confirms.clone(),
                  namespace: node.namespace.clone(),
                  inputs: node.inputs.clone(),
                  outputs: node.outputs.clone(),
                  signature,
                  param_to_inputs })
    }

    /// Reconstruye el nodo vivo. `param_to_inputs` no participa.
    pub fn to_node(&self) -> Node {
        Node { func: self.signature.target.clone(),
               inputs: self.inputs.clone(),
               outputs: self.outputs.clone(),
               name: self.name.clone(),
               tags: self.tags.clone(),
               confirms: self.confirms.clone(),
               namespace: self.namespace.clone() }
    }

    pub fn to_data(&self) -> NodeDoc {
        NodeDoc { name: self.name.clone(),
                  // BTreeSet: orden ascendente determinista
                  tags: self.tags.iter().cloned().collect(),
                  confirms: self.confirms.clone(),
                  namespace: self.namespace.clone(),
                  inputs: self.inputs.clone(),
                  outputs: self.outputs.clone(),
                  function: self.signature.to_data(),
                  param_to_input: self.param_to_inputs.clone() }
    }

    /// Decodifica un documento. El `param_to_input` guardado debe coincidir
    /// con el que se deriva de `inputs` y `function.parameters`.
    pub fn from_data(doc: &NodeDoc, registry: &SymbolRegistry) -> Result<Self> {
        let signature = CallableSignature::from_data(&doc.function, registry)?;
        let label = doc.name.clone().unwrap_or_else(|| doc.function.func.to_string());
        let param_to_inputs = derive(&signature, doc.inputs.as_ref(), &label)?;
        if param_to_inputs != doc.param_to_input {
            return Err(InspectError::MalformedDocument(format!("param_to_input of node '{label}' does not match its inputs")));
        }
        Ok(Self { name: doc.name.clone(),
                  tags: doc.tags.iter().cloned().collect(),
                  confirms: doc.confirms.clone(),
                  namespace: doc.namespace.clone(),
                  inputs: doc.inputs.clone(),
                  outputs: doc.outputs.clone(),
                  signature,
                  param_to_inputs })
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_data())?)
    }

    pub fn from_value(value: Value, registry: &SymbolRegistry) -> Result<Self> {
        let doc: NodeDoc = serde_json::from_value(value)?;
        Self::from_data(&doc, registry)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn confirms(&self) -> &[String] {
        &self.confirms
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn inputs(&self) -> Option<&DatasetBinding> {
        self.inputs.as_ref()
    }

    pub fn outputs(&self) -> Option<&DatasetBinding> {
        self.outputs.as_ref()
    }

    pub fn signature(&self) -> &CallableSignature {
        &self.signature
    }

    pub fn param_to_inputs(&self) -> &ParamToInputs {
        &self.param_to_inputs
    }
}

fn derive(signature: &CallableSignature, inputs: Option<&DatasetBinding>, label: &str) -> Result<ParamToInputs> {
    binding::param_to_inputs(&signature.parameters, inputs).map_err(|e| {
                                                              warn!("node:bind {label}: {e}");
                                                              InspectError::Binding(e)
                                                          })
}
