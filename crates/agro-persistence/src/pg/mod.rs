//! Implementación Postgres del `RowStore`.
//!
//! - Pools r2d2 por base lógica, inicializados perezosamente en el primer
//!   acceso (un proceso que no toca la DB no abre conexiones).
//! - Checkout con alcance acotado: la conexión vuelve al pool en todos los
//!   caminos de salida, incluidos los de error (RAII del `PooledConnection`).
//! - Reintento acotado con backoff ante errores transitorios de conexión.
//! - Decodificación dinámica de filas: cada columna se mapea a `Value` según
//!   su tipo declarado; NUMERIC se decodifica exacto, los floats binarios
//!   pasan por el round-trip por string del core.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use agro_core::{decimal, Database, Row, RowStore, StoreError, Value, ValueMap};
use log::{debug, warn};
use postgres::types::{ToSql, Type};
use postgres::NoTls;
use r2d2_postgres::PostgresConnectionManager;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::DbConfig;
use crate::error::classify;

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
pub type PgPool = r2d2::Pool<PostgresConnectionManager<NoTls>>;

type PgConnection = r2d2::PooledConnection<PostgresConnectionManager<NoTls>>;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Proveedor abstracto de conexiones por base lógica.
///
/// Permite inyectar un pool real (producción / tests de integración) o
/// simular el checkout en tests unitarios sin acoplar a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self, db: Database) -> Result<PgConnection, StoreError>;
}

/// Provider respaldado por pools r2d2, uno por base lógica, construidos
/// desde el entorno en el primer uso.
#[derive(Default)]
pub struct LazyPoolProvider {
    pools: Mutex<HashMap<Database, PgPool>>,
}

impl LazyPoolProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn pool(&self, db: Database) -> Result<PgPool, StoreError> {
        let mut pools = self.pools.lock().expect("pool registry mutex");
        if let Some(pool) = pools.get(&db) {
            return Ok(pool.clone());
        }
        let config = DbConfig::from_env(db);
        debug!("initializing pool for '{}' ({}..{} connections)",
               db.as_str(),
               config.min_connections,
               config.max_connections);
        let pg_config = config.url
                              .parse::<postgres::Config>()
                              .map_err(|e| StoreError::TransientIo(format!("bad database url: {e}")))?;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = r2d2::Pool::builder()
            .min_idle(Some(config.min_connections))
            .max_size(config.max_connections)
            .build(manager)
            .map_err(|e| StoreError::TransientIo(format!("pool build error: {e}")))?;
        pools.insert(db, pool.clone());
        Ok(pool)
    }
}

impl ConnectionProvider for LazyPoolProvider {
    fn connection(&self, db: Database) -> Result<PgConnection, StoreError> {
        self.pool(db)?
            .get()
            .map_err(|e| StoreError::TransientIo(format!("pool error: {e}")))
    }
}

pub struct PgRowStore<P: ConnectionProvider = LazyPoolProvider> {
    provider: P,
}

impl PgRowStore<LazyPoolProvider> {
    pub fn from_env() -> Self {
        Self { provider: LazyPoolProvider::new() }
    }
}

impl<P: ConnectionProvider> PgRowStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn run<T>(&self, op: impl Fn() -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut attempt = 0;
        loop {
            match op() {
                Err(StoreError::TransientIo(detail)) if attempt + 1 < MAX_ATTEMPTS => {
                    attempt += 1;
                    warn!("transient store error (attempt {attempt}): {detail}");
                    thread::sleep(RETRY_BACKOFF * attempt);
                }
                other => return other,
            }
        }
    }

    fn query_rows(&self, db: Database, query: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        self.run(|| {
            let mut conn = self.provider.connection(db)?;
            let stmt = conn.prepare(query).map_err(|e| classify(&e))?;
            let bound = bind_params(params, stmt.params())?;
            let refs: Vec<&(dyn ToSql + Sync)> = bound.iter().map(|b| b.as_ref()).collect();
            let rows = conn.query(&stmt, &refs).map_err(|e| classify(&e))?;
            rows.iter().map(decode_row).collect()
        })
    }
}

impl<P: ConnectionProvider> RowStore for PgRowStore<P> {
    fn fetch_one(&self, db: Database, query: &str, params: &[Value]) -> Result<Option<Row>, StoreError> {
        Ok(self.query_rows(db, query, params)?.into_iter().next())
    }

    fn fetch_all(&self, db: Database, query: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        self.query_rows(db, query, params)
    }

    fn execute(&self, db: Database, query: &str, params: &[Value]) -> Result<(), StoreError> {
        self.run(|| {
            let mut conn = self.provider.connection(db)?;
            let stmt = conn.prepare(query).map_err(|e| classify(&e))?;
            let bound = bind_params(params, stmt.params())?;
            let refs: Vec<&(dyn ToSql + Sync)> = bound.iter().map(|b| b.as_ref()).collect();
            conn.execute(&stmt, &refs).map_err(|e| classify(&e))?;
            Ok(())
        })
    }
}

/// Convierte los params neutrales al tipo que el statement preparado espera.
fn bind_params(params: &[Value], expected: &[Type]) -> Result<Vec<Box<dyn ToSql + Sync>>, StoreError> {
    if params.len() != expected.len() {
        return Err(StoreError::Query(format!("expected {} parameters, got {}", expected.len(), params.len())));
    }
    params.iter().zip(expected.iter()).map(|(value, ty)| bind_param(value, ty)).collect()
}

fn bind_param(value: &Value, ty: &Type) -> Result<Box<dyn ToSql + Sync>, StoreError> {
    let mismatch = || StoreError::Query(format!("cannot bind {} as {}", value.type_name(), ty.name()));
    match ty.name() {
        "int2" => match value {
            Value::Null => Ok(Box::new(Option::<i16>::None)),
            _ => {
                let i = value.as_decimal().and_then(|d| d.trunc().to_i16()).ok_or_else(mismatch)?;
                Ok(Box::new(i))
            }
        },
        "int4" => match value {
            Value::Null => Ok(Box::new(Option::<i32>::None)),
            _ => {
                let i = value.as_decimal().and_then(|d| d.trunc().to_i32()).ok_or_else(mismatch)?;
                Ok(Box::new(i))
            }
        },
        "int8" => match value {
            Value::Null => Ok(Box::new(Option::<i64>::None)),
            _ => {
                let i = value.as_decimal().and_then(|d| d.trunc().to_i64()).ok_or_else(mismatch)?;
                Ok(Box::new(i))
            }
        },
        "float4" => match value {
            Value::Null => Ok(Box::new(Option::<f32>::None)),
            _ => {
                let f = value.as_decimal().and_then(|d| d.to_f32()).ok_or_else(mismatch)?;
                Ok(Box::new(f))
            }
        },
        "float8" => match value {
            Value::Null => Ok(Box::new(Option::<f64>::None)),
            _ => {
                let f = value.as_decimal().and_then(|d| d.to_f64()).ok_or_else(mismatch)?;
                Ok(Box::new(f))
            }
        },
        "numeric" => match value {
            Value::Null => Ok(Box::new(Option::<Decimal>::None)),
            _ => {
                let d = value.as_decimal().ok_or_else(mismatch)?;
                Ok(Box::new(d))
            }
        },
        "bool" => match value {
            Value::Null => Ok(Box::new(Option::<bool>::None)),
            Value::Bool(b) => Ok(Box::new(*b)),
            _ => Err(mismatch()),
        },
        "text" | "varchar" | "bpchar" | "name" => match value {
            Value::Null => Ok(Box::new(Option::<String>::None)),
            Value::Text(s) => Ok(Box::new(s.clone())),
            Value::Int(i) => Ok(Box::new(i.to_string())),
            Value::Decimal(d) => Ok(Box::new(d.to_string())),
            _ => Err(mismatch()),
        },
        other => Err(StoreError::Query(format!("unsupported parameter type: {other}"))),
    }
}

fn decode_row(row: &postgres::Row) -> Result<Row, StoreError> {
    let mut out = ValueMap::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, idx, column.type_())
            .map_err(|e| StoreError::Decode(format!("column '{}': {e}", column.name())))?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn decode_column(row: &postgres::Row, idx: usize, ty: &Type) -> Result<Value, postgres::Error> {
    let value = match ty.name() {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(|i| Value::Int(i64::from(i))),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(|i| Value::Int(i64::from(i))),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(Value::Int),
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|f| Value::Decimal(decimal::from_f64(f64::from(f)))),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(|f| Value::Decimal(decimal::from_f64(f))),
        "numeric" => row.try_get::<_, Option<Decimal>>(idx)?.map(Value::Decimal),
        _ => row.try_get::<_, Option<String>>(idx)?.map(Value::Text),
    };
    Ok(value.unwrap_or(Value::Null))
}
