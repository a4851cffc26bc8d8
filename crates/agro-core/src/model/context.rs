//! Runtime inyectado del árbol de invocación.
//!
//! Estado compartido a nivel proceso (row store + caches) como singleton
//! explícito construido por el host y pasado por referencia, con init y
//! teardown definidos (crear / soltar el contexto). No hay globals de módulo.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::MemoCache;
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_COMPUTE_TTL};
use crate::errors::ModelError;
use crate::hashing;
use crate::model::Model;
use crate::store::{Row, RowStore};
use crate::value::ValueMap;

pub struct RuntimeContext {
    store: Arc<dyn RowStore>,
    compute_cache: MemoCache<ValueMap>,
    values_cache: MemoCache<Vec<Row>>,
}

impl RuntimeContext {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store,
               compute_cache: MemoCache::new(Some(DEFAULT_COMPUTE_TTL), Some(DEFAULT_CACHE_CAPACITY)),
               values_cache: MemoCache::unbounded() }
    }

    /// Reemplaza el TTL de la cache de compute (None la vuelve pura).
    pub fn with_compute_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.compute_cache = MemoCache::new(ttl, Some(DEFAULT_CACHE_CAPACITY));
        self
    }

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    /// Invocación memoizada de un modelo.
    ///
    /// Clave: representación canónica de (nombre, args, quantize). Dos
    /// invocaciones con args estructuralmente iguales dentro de la ventana
    /// TTL ejecutan el cuerpo a lo sumo una vez bajo acceso no concurrente;
    /// los errores no se cachean.
    pub fn invoke(&self, model: &dyn Model, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let key = hashing::cache_key(model.info().name, args, quantize);
        if let Some(hit) = self.compute_cache.get(&key) {
            return Ok(hit);
        }
        let result = model.compute(self, args, quantize)?;
        self.compute_cache.put(key, result.clone());
        Ok(result)
    }

    /// Enumeración memoizada (cache pura, sin expiración) de valores legales.
    pub fn input_values(&self, model: &dyn Model, field: &str) -> Result<Vec<Row>, ModelError> {
        let key = format!("{}::{field}", model.info().name);
        if let Some(hit) = self.values_cache.get(&key) {
            return Ok(hit);
        }
        let rows = model.input_values(self, field)?;
        self.values_cache.put(key, rows.clone());
        Ok(rows)
    }
}
