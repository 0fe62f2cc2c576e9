use tracing_subscriber::EnvFilter;

/// Inicializa el subscriber de logs (también recoge los registros de `log`).
///
/// `RUST_LOG` tiene prioridad; si no está definido se usa `level`.
pub fn init(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init: no falla si ya hay un subscriber global (tests, embebido)
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter)
                                     .with_target(false)
                                     .with_writer(std::io::stderr)
                                     .try_init();
}
