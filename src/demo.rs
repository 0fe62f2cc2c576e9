//! Proyecto de demostración: registro de símbolos + pipeline lineal
//! `clean -> summarise`.
//!
//! El registro se puebla una sola vez al arrancar, igual que haría un
//! proyecto real con sus módulos de nodos.
use flow_host::{bool_type, float_type, str_type, Callable, DeclaredParam, FunctionDef, Node, ParamKind, Pipeline,
                SymbolRegistry, TypeDef};

use crate::errors::CoreError;

pub const NODES_MODULE: &str = "demo.nodes";
pub const TYPES_MODULE: &str = "demo.types";

pub struct DemoProject {
    pub registry: SymbolRegistry,
    pub pipeline: Pipeline,
}

pub fn build_project() -> Result<DemoProject, CoreError> {
    let table = TypeDef::new(TYPES_MODULE, "Table");

    // clean(raw: Table, *, drop_nulls: bool = True) -> Table
    let clean = FunctionDef::new(NODES_MODULE, "clean").param(DeclaredParam::positional("raw").typed(table.clone()))
                                                       .param(DeclaredParam::new("drop_nulls", ParamKind::KeywordOnly).typed(bool_type())
                                                                                                                     .with_default())
                                                       .returning(table.clone())
                                                       .build();
    // summarise(table: Table, **extras: str) -> float
    let summarise = FunctionDef::new(NODES_MODULE, "summarise").param(DeclaredParam::positional("table").typed(table.clone()))
                                                               .param(DeclaredParam::new("extras", ParamKind::VarKeyword).typed(str_type()))
                                                               .returning(float_type())
                                                               .build();

    let mut registry = SymbolRegistry::new();
    registry.register_type(&table)?;
    registry.register_function(&clean)?;
    registry.register_function(&summarise)?;

    let pipeline = Pipeline::new(vec![Node::new(Callable::Function(clean), Some("raw_sales".into()), Some("clean_sales".into()))
                                          .with_name("clean_sales_node")
                                          .with_tags(["preprocessing"]),
                                      Node::new(Callable::Function(summarise),
                                                Some([("table", "clean_sales"), ("region", "params:region")].into()),
                                                Some(vec!["sales_summary"].into()))
                                          .with_tags(["reporting", "daily"])
                                          .with_namespace("reports"),]);
    Ok(DemoProject { registry, pipeline })
}
