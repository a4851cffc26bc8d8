//! Hashing de argumentos para la cache de memoización.

mod canonical;

pub use canonical::to_canonical;

use sha2::{Digest, Sha256};

use crate::value::{Value, ValueMap};

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash canónico de un valor.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical(value))
}

/// Clave de cache de una invocación: nombre del modelo + argumentos
/// canonicalizados + flag de cuantización. Argumentos estructuralmente
/// iguales producen la misma clave sin importar el orden de inserción.
pub fn cache_key(model: &str, args: &ValueMap, quantize: bool) -> String {
    let canon = format!("{model}|{}|{quantize}", to_canonical(&Value::Record(args.clone())));
    hash_str(&canon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal;

    #[test]
    fn record_key_order_does_not_matter() {
        let mut a = ValueMap::new();
        a.insert("x".into(), Value::Int(1));
        a.insert("y".into(), Value::Int(2));
        let mut b = ValueMap::new();
        b.insert("y".into(), Value::Int(2));
        b.insert("x".into(), Value::Int(1));
        assert_eq!(cache_key("m", &a, true), cache_key("m", &b, true));
    }

    #[test]
    fn quantize_flag_separates_keys() {
        let args = ValueMap::new();
        assert_ne!(cache_key("m", &args, true), cache_key("m", &args, false));
    }

    #[test]
    fn equal_decimals_with_distinct_scale_share_a_key() {
        let mut a = ValueMap::new();
        a.insert("d".into(), Value::Decimal(decimal::lit("3.0")));
        let mut b = ValueMap::new();
        b.insert("d".into(), Value::Decimal(decimal::lit("3.00")));
        assert_eq!(cache_key("m", &a, false), cache_key("m", &b, false));
    }
}
