//! Forma canónica de un árbol de valores (claves de record ordenadas,
//! decimales normalizados) para derivar claves de cache estables.

use std::collections::BTreeMap;

use crate::value::Value;

pub fn to_canonical(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        // normalize: 3.00 y 3.0 deben producir la misma clave
        Value::Decimal(d) => d.normalize().to_string(),
        Value::Text(s) => serde_json::to_string(s).unwrap(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(to_canonical).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Record(map) => {
            let mut tree = BTreeMap::new();
            for (k, v) in map {
                tree.insert(k, to_canonical(v));
            }
            let parts: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", serde_json::to_string(&k).unwrap(), v))
                                         .collect();
            format!("{{{}}}", parts.join(","))
        }
    }
}
