//! FlowInspect Rust Library
//!
//! Capa de aplicación sobre `flow-inspect`:
//! - `config`: configuración desde entorno (.env).
//! - `errors`: error de aplicación que agrupa los de los crates.
//! - `logging`: inicialización del subscriber.
//! - `demo`: registro y pipeline de ejemplo usados por `main-inspect`.

pub mod config;
pub mod demo;
pub mod errors;
pub mod logging;

pub use flow_host;
pub use flow_inspect;

#[cfg(test)]
mod tests {
    use super::demo::build_project;
    use flow_inspect::PipelineSnapshot;

    #[test]
    fn demo_project_captures() {
        let project = build_project().expect("demo project");
        let snapshot = PipelineSnapshot::capture(&project.pipeline).expect("capture");
        assert_eq!(snapshot.len(), 2);
        let summary = &snapshot.nodes[1];
        assert_eq!(summary.param_to_inputs()["table"], vec!["clean_sales".to_string()]);
        assert_eq!(summary.param_to_inputs()["extras"], vec!["params:region".to_string()]);
    }
}
