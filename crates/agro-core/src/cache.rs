//! Cache de memoización acotada por TTL y capacidad.
//!
//! Dos políticas combinadas en un solo tipo:
//! - `ttl = None`: cache pura de duración ilimitada (llamadas de lookup sin
//!   efectos, p. ej. `input_values`).
//! - `ttl = Some(..)`: entradas de `compute`, cuyos datos subyacentes pueden
//!   cambiar bajo un proceso de vida larga.
//!
//! No hay negative caching ni single-flight: llamadas idénticas concurrentes
//! pueden fallar la cache ambas y computar dos veces; el trabajo duplicado se
//! tolera. Tampoco hay invalidación explícita: la obsolescencia queda acotada
//! sólo por el TTL (y por el desalojo LRU si hay cota de capacidad).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct MemoCache<T> {
    ttl: Option<Duration>,
    capacity: Option<usize>,
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    entries: HashMap<String, Entry<T>>,
    tick: u64,
}

struct Entry<T> {
    value: T,
    inserted: Instant,
    last_used: u64,
}

impl<T: Clone> MemoCache<T> {
    pub fn new(ttl: Option<Duration>, capacity: Option<usize>) -> Self {
        Self { ttl,
               capacity,
               inner: Mutex::new(Inner { entries: HashMap::new(), tick: 0 }) }
    }

    /// Cache pura sin expiración ni cota.
    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let mut inner = self.inner.lock().expect("cache mutex");
        let expired = match inner.entries.get(key) {
            Some(entry) => self.ttl.is_some_and(|ttl| entry.inserted.elapsed() >= ttl),
            None => return None,
        };
        if expired {
            inner.entries.remove(key);
            return None;
        }
        inner.tick += 1;
        let tick = inner.tick;
        let entry = inner.entries.get_mut(key).expect("entry checked above");
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    pub fn put(&self, key: String, value: T) {
        let mut inner = self.inner.lock().expect("cache mutex");
        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.insert(key, Entry { value, inserted: Instant::now(), last_used: tick });

        if let Some(capacity) = self.capacity {
            if inner.entries.len() > capacity {
                if let Some(ttl) = self.ttl {
                    inner.entries.retain(|_, entry| entry.inserted.elapsed() < ttl);
                }
                while inner.entries.len() > capacity {
                    let stalest = inner.entries
                                       .iter()
                                       .min_by_key(|(_, entry)| entry.last_used)
                                       .map(|(k, _)| k.clone());
                    match stalest {
                        Some(k) => inner.entries.remove(&k),
                        None => break,
                    };
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_returns_clone_and_miss_returns_none() {
        let cache: MemoCache<i64> = MemoCache::unbounded();
        assert_eq!(cache.get("k"), None);
        cache.put("k".into(), 7);
        assert_eq!(cache.get("k"), Some(7));
    }

    #[test]
    fn ttl_zero_expires_immediately() {
        let cache: MemoCache<i64> = MemoCache::new(Some(Duration::from_secs(0)), None);
        cache.put("k".into(), 7);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_bound_evicts_least_recently_used() {
        let cache: MemoCache<i64> = MemoCache::new(None, Some(2));
        cache.put("a".into(), 1);
        cache.put("b".into(), 2);
        assert_eq!(cache.get("a"), Some(1)); // refresca "a"
        cache.put("c".into(), 3);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
    }
}
