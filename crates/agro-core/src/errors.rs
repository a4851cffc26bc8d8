//! Errores del framework (taxonomía cerrada).
//!
//! Ninguna de estas variantes se captura dentro del framework: se propagan
//! síncronamente hasta la cima del árbol de invocación y abortan el
//! deliverable completo. Presentarlas al caller es responsabilidad del
//! front-end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ModelError {
    #[error("missing input with no default value: {0}")] MissingInput(String),
    #[error("unexpected field: {0}")] UnknownField(String),
    #[error("no elements found for inputs: {0}")] LookupNotFound(String),
    #[error("invalid value for field '{field}': {detail}")] InvalidValue { field: String, detail: String },
    #[error("storage: {0}")] Storage(String),
}

/// Errores del colaborador de almacenamiento (row store).
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StoreError {
    #[error("transient io / connection pool error: {0}")] TransientIo(String),
    #[error("query failed: {0}")] Query(String),
    #[error("row decode: {0}")] Decode(String),
}

impl From<StoreError> for ModelError {
    fn from(err: StoreError) -> Self {
        ModelError::Storage(err.to_string())
    }
}
