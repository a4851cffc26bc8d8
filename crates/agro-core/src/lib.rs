//! agro-core: framework declarativo de cómputo para modelos tecno-económicos.
//!
//! Cada "modelo" (unidad de capex/opex/yield/financials) declara sus esquemas
//! de entrada y salida y un cuerpo `compute`; el framework aporta coerción de
//! entradas con defaults, preload/override de salidas, cuantización decimal
//! sobre el esquema declarado, y una capa de memoización con TTL para que la
//! invocación repetida de sub-modelos dentro de un pipeline sea barata.

pub mod cache;
pub mod constants;
pub mod decimal;
pub mod errors;
pub mod hashing;
pub mod inputs;
pub mod model;
pub mod outputs;
pub mod schema;
pub mod store;
pub mod value;

pub use cache::MemoCache;
pub use errors::{ModelError, StoreError};
pub use inputs::parse_inputs;
pub use model::{Model, ModelInfo, RuntimeContext};
pub use outputs::{add_elapsed, merge_sql_runtime, preload_outputs, quantize_outputs, set_if_unset};
pub use schema::{FieldKind, FieldSpec, TypeSchema};
pub use store::{row, Database, InMemoryRowStore, Row, RowStore};
pub use value::{RecordExt, Value, ValueMap};
