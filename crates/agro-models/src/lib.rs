//! agro-models: suite de modelos de dominio sobre `agro-core`.
//!
//! Cada modelo implementa el contrato `Model`; los deliverables encadenan
//! sub-modelos en secuencia topológica fija (el orden del fuente ES el orden
//! de dependencia y se conserva tal cual).

pub mod financials;
pub mod registry;
pub mod soil;
pub mod util;

pub use registry::ModelId;
