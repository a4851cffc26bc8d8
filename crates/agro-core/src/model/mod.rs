//! Contrato de modelo.
//!
//! Un modelo es una unidad inmutable y auto-descriptiva: metadata estática,
//! esquema de entrada, esquema de salida, enumeración de valores legales para
//! campos `choice`, y un cuerpo `compute`. El cuerpo sigue siempre la misma
//! secuencia: `parse_inputs` → `preload_outputs` → lógica de negocio (cada
//! asignación vía `set_if_unset`) → `quantize_outputs` opcional.

mod context;

pub use context::RuntimeContext;

use crate::errors::ModelError;
use crate::schema::TypeSchema;
use crate::store::Row;
use crate::value::ValueMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl ModelInfo {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
        })
    }
}

pub trait Model: Send + Sync {
    fn info(&self) -> ModelInfo;

    fn input_type(&self) -> TypeSchema;

    fn output_type(&self) -> TypeSchema;

    /// Valores legales para un campo `choice`/`list` (`"campo"` o
    /// `"lista.campo"`). El default rechaza cualquier ruta: los modelos
    /// declaran explícitamente las que soportan.
    fn input_values(&self, _ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        Err(ModelError::UnknownField(field.to_string()))
    }

    /// Ejecuta el modelo sobre `args`. Con `quantize` el ResultMap vuelve
    /// proyectado y cuantizado sobre el esquema de salida; sin él vuelve el
    /// mapa de depuración completo (entradas, intermedios, contadores).
    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError>;
}
