//! Errores del núcleo de inspección.
//!
//! Todos son terminales para la operación que los produce: no hay reintentos
//! ni resultados parciales.

use thiserror::Error;

/// Los inputs declarados no encajan en la firma del callable.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BindingError {
    #[error("too many positional arguments: {given} given, {accepted} accepted")]
    TooManyPositional { given: usize, accepted: usize },
    #[error("missing a required argument: '{0}'")]
    MissingArgument(String),
    #[error("got an unexpected keyword argument: '{0}'")]
    UnexpectedKeyword(String),
    #[error("'{0}' parameter is positional only, but was passed as a keyword")]
    PositionalOnlyAsKeyword(String),
}

#[derive(Debug, Error)]
pub enum InspectError {
    /// El identificador no existe en el registro del proceso actual.
    #[error("could not locate object: {0}")]
    Resolution(String),
    #[error("binding failed: {0}")]
    Binding(#[from] BindingError),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl From<serde_json::Error> for InspectError {
    fn from(e: serde_json::Error) -> Self {
        InspectError::MalformedDocument(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = InspectError::Resolution("pkg.nodes.gone".into());
        assert_eq!(e.to_string(), "could not locate object: pkg.nodes.gone");
        let e: InspectError = BindingError::MissingArgument("x".into()).into();
        assert_eq!(e.to_string(), "binding failed: missing a required argument: 'x'");
    }

    #[test]
    fn json_errors_become_malformed_documents() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(InspectError::from(err), InspectError::MalformedDocument(_)));
    }
}
