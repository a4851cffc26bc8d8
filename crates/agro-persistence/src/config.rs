//! Carga de configuración de conexión desde variables de entorno.
//! Usa convención `DATABASE_URL` / `LOCATION_DATABASE_URL` y parámetros
//! opcionales de pool.

use std::env;

use agro_core::Database;
use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    /// Configuración para una base lógica. La base `location` puede apuntar a
    /// otro servidor vía `LOCATION_DATABASE_URL`; si no está definida cae en
    /// `DATABASE_URL`. El pool queda dimensionado a una única conexión salvo
    /// override explícito: los accesos concurrentes serializan en el checkout.
    pub fn from_env(db: Database) -> Self {
        Lazy::force(&DOTENV_LOADED);
        let url = match db {
            Database::Models => env::var("DATABASE_URL"),
            Database::Location => env::var("LOCATION_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")),
        }.expect("DATABASE_URL no definido");
        let min_connections = env::var("DATABASE_MIN_CONNECTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(1);
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(1);
        Self { url, min_connections, max_connections }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
