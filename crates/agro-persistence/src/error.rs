//! Clasificación de errores de `postgres` hacia las variantes semánticas del
//! `StoreError` del core.

use agro_core::StoreError;

pub fn classify(err: &postgres::Error) -> StoreError {
    if err.is_closed() {
        return StoreError::TransientIo(err.to_string());
    }
    match err.as_db_error() {
        Some(db_err) => StoreError::Query(db_err.message().to_string()),
        None => StoreError::Query(err.to_string()),
    }
}
