//! Constantes del framework.
//!
//! Los valores de cache participan del comportamiento observable (ventana de
//! frescura de los resultados frente a cambios en la base de datos), por eso
//! viven aquí y no dispersos en cada módulo.

use std::time::Duration;

/// TTL por defecto para entradas de `compute` en la cache de memoización.
/// Los datos subyacentes (filas de DB, tarifas por ubicación) pueden cambiar
/// bajo un proceso de vida larga; la obsolescencia queda acotada por tiempo.
pub const DEFAULT_COMPUTE_TTL: Duration = Duration::from_secs(600);

/// Cota de entradas para la cache de `compute` (desalojo LRU al superarla).
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Dígitos usados al renderizar decimales para display.
pub const DISPLAY_DIGITS: u32 = 8;
