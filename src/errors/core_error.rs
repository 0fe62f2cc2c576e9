use flow_host::RegistryError;
use flow_inspect::InspectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de inspección: {0}")]
    Inspect(#[from] InspectError),
    #[error("Error de registro: {0}")]
    Registry(#[from] RegistryError),
}
