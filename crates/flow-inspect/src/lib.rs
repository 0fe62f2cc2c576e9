//! flow-inspect: modelo serializable y reconstruible de un pipeline.
//!
//! Capas, cada una depende sólo de la anterior:
//! - `codec`: símbolo <-> identificador textual (`AnnotationRef`).
//! - `signature`: firma reflejada de un callable.
//! - `binding` + `node`: snapshot de un nodo y su mapa `param_to_inputs`.
//! - `pipeline`: secuencia ordenada de nodos, JSON y huella.
//!
//! Nada aquí ejecuta pasos; todo son transformaciones puras en memoria salvo
//! la lectura del `SymbolRegistry` al decodificar.
pub mod binding;
pub mod codec;
pub mod errors;
pub mod hashing;
pub mod node;
pub mod pipeline;
pub mod signature;

pub use binding::{param_to_inputs, BoundValue, ParamToInputs};
pub use codec::AnnotationRef;
pub use errors::{BindingError, InspectError};
pub use node::{NodeDoc, NodeSnapshot};
pub use pipeline::{PipelineDoc, PipelineSnapshot};
pub use signature::{CallableSignature, Parameter, ParameterDoc, SignatureDoc};
