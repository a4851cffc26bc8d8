//! Colaborador de almacenamiento: filas string-keyed sobre SQL crudo.
//!
//! El trait vive en el core (los modelos lo consumen vía `RuntimeContext`);
//! la implementación Postgres vive en `agro-persistence`, igual que el par
//! trait-en-core / impl-en-persistencia del resto del sistema. Para tests y
//! demos hay una implementación en memoria con fixtures por consulta.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StoreError;
use crate::hashing::to_canonical;
use crate::value::{Value, ValueMap};

/// Base de datos lógica sobre la que se resuelve la conexión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Models,
    Location,
}

impl Database {
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Models => "models",
            Database::Location => "location",
        }
    }
}

/// Una fila es un mapa string → valor, en orden de columnas.
pub type Row = ValueMap;

pub trait RowStore: Send + Sync {
    /// Primera fila del resultado, o `None` si la consulta no produjo filas.
    fn fetch_one(&self, db: Database, query: &str, params: &[Value]) -> Result<Option<Row>, StoreError>;

    fn fetch_all(&self, db: Database, query: &str, params: &[Value]) -> Result<Vec<Row>, StoreError>;

    fn execute(&self, db: Database, query: &str, params: &[Value]) -> Result<(), StoreError>;
}

/// Store en memoria: responde consultas registradas de antemano.
///
/// La clave de despacho es (db, SQL normalizado por whitespace, params
/// canonicalizados); una consulta no registrada devuelve cero filas, lo que
/// permite ejercitar los caminos `LookupNotFound` de los modelos.
#[derive(Default)]
pub struct InMemoryRowStore {
    responses: Mutex<HashMap<String, Vec<Row>>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(db: Database, query: &str, params: &[Value]) -> String {
        let canon_params: Vec<String> = params.iter().map(to_canonical).collect();
        format!("{}|{}|{}", db.as_str(), normalize_sql(query), canon_params.join(","))
    }

    /// Registra las filas que responderá (db, query, params). Builder.
    pub fn with_rows(self, db: Database, query: &str, params: &[Value], rows: Vec<Row>) -> Self {
        self.insert_rows(db, query, params, rows);
        self
    }

    pub fn insert_rows(&self, db: Database, query: &str, params: &[Value], rows: Vec<Row>) {
        let mut responses = self.responses.lock().expect("store mutex");
        responses.insert(Self::key(db, query, params), rows);
    }
}

impl RowStore for InMemoryRowStore {
    fn fetch_one(&self, db: Database, query: &str, params: &[Value]) -> Result<Option<Row>, StoreError> {
        Ok(self.fetch_all(db, query, params)?.into_iter().next())
    }

    fn fetch_all(&self, db: Database, query: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        let responses = self.responses.lock().expect("store mutex");
        Ok(responses.get(&Self::key(db, query, params)).cloned().unwrap_or_default())
    }

    fn execute(&self, _db: Database, _query: &str, _params: &[Value]) -> Result<(), StoreError> {
        Ok(())
    }
}

fn normalize_sql(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Constructor de filas para fixtures y tests.
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_differences_do_not_split_fixtures() {
        let store = InMemoryRowStore::new().with_rows(Database::Models,
                                                      "SELECT id  FROM crops\n WHERE id=$1",
                                                      &[Value::Int(1)],
                                                      vec![row(&[("id", Value::Int(1))])]);
        let hit = store.fetch_one(Database::Models, "SELECT id FROM crops WHERE id=$1", &[Value::Int(1)]).unwrap();
        assert_eq!(hit.unwrap().get("id"), Some(&Value::Int(1)));
    }

    #[test]
    fn unregistered_queries_return_no_rows() {
        let store = InMemoryRowStore::new();
        assert!(store.fetch_one(Database::Location, "SELECT 1", &[]).unwrap().is_none());
        assert!(store.fetch_all(Database::Models, "SELECT 1", &[]).unwrap().is_empty());
    }

    #[test]
    fn params_distinguish_fixtures() {
        let store = InMemoryRowStore::new()
            .with_rows(Database::Models, "Q", &[Value::Int(1)], vec![row(&[("v", Value::Int(10))])])
            .with_rows(Database::Models, "Q", &[Value::Int(2)], vec![row(&[("v", Value::Int(20))])]);
        let one = store.fetch_one(Database::Models, "Q", &[Value::Int(1)]).unwrap().unwrap();
        let two = store.fetch_one(Database::Models, "Q", &[Value::Int(2)]).unwrap().unwrap();
        assert_eq!(one.get("v"), Some(&Value::Int(10)));
        assert_eq!(two.get("v"), Some(&Value::Int(20)));
    }
}
