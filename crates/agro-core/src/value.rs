//! Valor de runtime neutral del framework.
//!
//! Todo lo que fluye entre modelos (argumentos, ResultMaps, filas de DB) es un
//! árbol de `Value`. Las cantidades numéricas usan `rust_decimal::Decimal`,
//! nunca `f64`: los floats binarios se convierten en el borde (JSON, filas,
//! contadores) vía round-trip exacto por string (ver `decimal`).

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::decimal;

/// Mapa ordenado por inserción; es el ResultMap de un `compute()` y también
/// la forma de las filas del row store.
pub type ValueMap = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    List(Vec<Value>),
    Record(ValueMap),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Vista numérica: los enteros se promueven a decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ValueMap> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Conversión desde JSON. Números enteros → `Int`; el resto de números se
    /// parsea por string (con `arbitrary_precision` el literal sobrevive
    /// exacto, sin pasar por la representación binaria).
    pub fn from_json(v: &serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Decimal(decimal::parse_number(&n.to_string()))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            serde_json::Value::Object(map) => {
                let mut out = ValueMap::new();
                for (k, v) in map {
                    out.insert(k.clone(), Value::from_json(v));
                }
                Value::Record(out)
            }
        }
    }

    /// Conversión a JSON. Los decimales se emiten como números (la feature
    /// `arbitrary_precision` conserva los dígitos de la cuantización).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Decimal(d) => {
                let n: serde_json::Number =
                    serde_json::from_str(&d.to_string()).expect("decimal renders as a valid JSON number");
                serde_json::Value::Number(n)
            }
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Record(map) => {
                let mut out = serde_json::Map::new();
                for (k, v) in map {
                    out.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

impl std::fmt::Display for Value {
    /// Render para humanos: los decimales salen redondeados a 8 dígitos y
    /// normalizados; listas y records en su forma JSON.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{}", decimal::display(d)),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(_) | Value::Record(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// Acceso a campos de un record ya coercido contra un esquema.
///
/// Estos helpers asumen el invariante "el campo existe y tiene el kind
/// declarado" que `parse_inputs` garantiza; violarlo es error de programación
/// del modelo, no una condición de runtime.
pub trait RecordExt {
    fn dec(&self, key: &str) -> Decimal;
    fn int(&self, key: &str) -> i64;
    fn flag(&self, key: &str) -> bool;
    fn text(&self, key: &str) -> &str;
    fn list(&self, key: &str) -> &[Value];
    fn record(&self, key: &str) -> &ValueMap;
}

impl RecordExt for ValueMap {
    fn dec(&self, key: &str) -> Decimal {
        self.get(key)
            .and_then(Value::as_decimal)
            .unwrap_or_else(|| panic!("field '{key}' missing or not numeric"))
    }

    fn int(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(Value::as_int)
            .unwrap_or_else(|| panic!("field '{key}' missing or not an integer"))
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .and_then(Value::as_bool)
            .unwrap_or_else(|| panic!("field '{key}' missing or not a bool"))
    }

    fn text(&self, key: &str) -> &str {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("field '{key}' missing or not text"))
    }

    fn list(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_list)
            .unwrap_or_else(|| panic!("field '{key}' missing or not a list"))
    }

    fn record(&self, key: &str) -> &ValueMap {
        self.get(key)
            .and_then(Value::as_record)
            .unwrap_or_else(|| panic!("field '{key}' missing or not a record"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_number_round_trips_exactly() {
        let v: serde_json::Value = serde_json::from_str(r#"{"x": 3.005}"#).unwrap();
        let parsed = Value::from_json(&v);
        let rec = parsed.as_record().unwrap();
        assert_eq!(rec.dec("x"), decimal::lit("3.005"));
    }

    #[test]
    fn int_promotes_to_decimal() {
        assert_eq!(Value::Int(7).as_decimal(), Some(Decimal::from(7)));
        assert_eq!(Value::Text("7".into()).as_decimal(), None);
    }

    #[test]
    fn to_json_preserves_quantized_digits() {
        let d = decimal::quantize(decimal::lit("6"), 2);
        let json = Value::Decimal(d).to_json();
        assert_eq!(json.to_string(), "6.00");
    }

    #[test]
    fn display_normalizes_decimals() {
        let v = Value::Decimal(decimal::lit("2.5000000000"));
        assert_eq!(v.to_string(), "2.5");
    }
}
