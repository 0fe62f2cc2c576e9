//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//!
//! Variables:
//! - `FLOWINSPECT_INDENT`: indentación del JSON (sin definir = compacto).
//! - `FLOWINSPECT_LOG`: nivel de log por defecto si `RUST_LOG` no está definido.
//! - `FLOWINSPECT_OUTPUT`: fichero de salida; sin definir se imprime por stdout.
use std::env;
use std::path::PathBuf;

use log::warn;
use once_cell::sync::Lazy;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub indent: Option<usize>,
    pub log_level: String,
    pub output: Option<PathBuf>,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignora error si no existe .env
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de un lookup de variables. Valores
    /// inválidos caen al default.
    pub fn from_vars<F>(get: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let indent = get("FLOWINSPECT_INDENT").and_then(|raw| match raw.trim().parse::<usize>() {
                                                  Ok(n) => Some(n),
                                                  Err(_) => {
                                                      warn!("FLOWINSPECT_INDENT inválido ({raw}), se usa salida compacta");
                                                      None
                                                  }
                                              });
        let log_level = get("FLOWINSPECT_LOG").filter(|v| !v.trim().is_empty())
                                              .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let output = get("FLOWINSPECT_OUTPUT").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self { indent, log_level, output }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
