//! flow-host: colaboradores del framework anfitrión.
//!
//! - `symbol`: tipos y símbolos con identidad de proceso.
//! - `callable`: firmas declaradas de funciones, métodos y constructores.
//! - `registry`: registro explícito identificador -> símbolo.
//! - `node` / `pipeline`: el grafo vivo que consume el motor de ejecución.
pub mod callable;
pub mod node;
pub mod pipeline;
pub mod registry;
pub mod symbol;

pub use callable::{Callable, DeclaredParam, FunctionDef, Instance, MethodKind, ParamKind, Wrapper};
pub use node::{DatasetBinding, Node};
pub use pipeline::Pipeline;
pub use registry::{RegistryError, SymbolRegistry};
pub use symbol::{any_type, bool_type, builtin_types, bytes_type, float_type, int_type, none_type, str_type, Symbol, TypeDef,
                 TypeRef, BUILTINS};
