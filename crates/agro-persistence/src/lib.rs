//! agro-persistence
//!
//! Implementación Postgres del colaborador `RowStore` del core.
//!
//! Módulos:
//! - `pg`: `PgRowStore` con pools r2d2 por base lógica, checkout con alcance
//!   acotado y reintento con backoff ante errores transitorios.
//! - `config`: carga de configuración de conexión desde el entorno.
//! - `error`: clasificación de errores de `postgres` hacia `StoreError`.

pub mod config;
pub mod error;
pub mod pg;

pub use config::{init_dotenv, DbConfig};
pub use pg::{ConnectionProvider, LazyPoolProvider, PgPool, PgRowStore};
