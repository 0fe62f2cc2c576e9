use std::fs;

use flowinspect_rust::config::CONFIG;
use flowinspect_rust::demo::build_project;
use flowinspect_rust::errors::CoreError;
use flowinspect_rust::logging;
use flow_inspect::PipelineSnapshot;
use log::{debug, info};

fn main() {
    if let Err(e) = run() {
        eprintln!("main-inspect: {e}");
        std::process::exit(1);
    }
}

/// Captura el pipeline de demostración, lo serializa, lo vuelve a cargar
/// desde el JSON y comprueba que el resultado es equivalente.
fn run() -> Result<(), CoreError> {
    let cfg = &*CONFIG;
    logging::init(&cfg.log_level);
    debug!("config: {cfg:?}");

    let project = build_project()?;
    info!("registro con {} símbolos, pipeline con {} nodos",
          project.registry.len(),
          project.pipeline.len());

    let snapshot = PipelineSnapshot::capture(&project.pipeline)?;
    let json = snapshot.to_json(cfg.indent)?;

    match &cfg.output {
        Some(path) => {
            if path.exists() {
                return Err(CoreError::Config(format!("el fichero de salida ya existe: {}", path.display())));
            }
            fs::write(path, &json)?;
            info!("documento escrito en {}", path.display());
        }
        None => println!("{json}"),
    }

    let restored = PipelineSnapshot::from_json(&json, &project.registry)?;
    if restored != snapshot {
        return Err(CoreError::Internal("el documento recargado no coincide con la captura".into()));
    }
    if restored.to_pipeline() != project.pipeline {
        return Err(CoreError::Internal("el pipeline reconstruido no coincide con el original".into()));
    }
    let fingerprint = restored.fingerprint()?;
    if fingerprint != snapshot.fingerprint()? {
        return Err(CoreError::Internal("la huella cambió tras el round-trip".into()));
    }
    info!("round-trip ok, fingerprint={fingerprint}");
    Ok(())
}
