//! Coerción de argumentos contra el esquema de entrada de un modelo.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::decimal;
use crate::errors::ModelError;
use crate::schema::{FieldKind, FieldSpec, TypeSchema};
use crate::value::{Value, ValueMap};

/// Devuelve un mapa nuevo con las entradas coercidas.
///
/// Para cada campo del esquema, en orden de declaración: si está en `args` se
/// coerce; si no, se usa el default; si tampoco hay default, falla con
/// `MissingInput`. La coerción es total sobre el esquema: claves de `args`
/// ausentes del esquema se ignoran.
pub fn parse_inputs(input_type: &TypeSchema, args: &ValueMap) -> Result<ValueMap, ModelError> {
    let mut result = ValueMap::new();
    for (key, spec) in input_type.iter() {
        let raw = match args.get(key) {
            Some(value) => value.clone(),
            None => match &spec.default {
                Some(default) => default.clone(),
                None => return Err(ModelError::MissingInput(key.clone())),
            },
        };
        result.insert(key.clone(), coerce_field(key, spec, raw)?);
    }
    Ok(result)
}

fn coerce_field(key: &str, spec: &FieldSpec, raw: Value) -> Result<Value, ModelError> {
    match spec.kind {
        FieldKind::Choice | FieldKind::Integer => Ok(Value::Int(coerce_int(key, &raw)?)),
        FieldKind::Decimal => Ok(Value::Decimal(coerce_decimal(key, &raw)?)),
        FieldKind::List => {
            let element_type = spec.element_type
                                   .as_ref()
                                   .unwrap_or_else(|| panic!("list field '{key}' declares no element type"));
            let items = raw.as_list().ok_or_else(|| invalid(key, &raw, "list"))?;
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let element = item.as_record().ok_or_else(|| invalid(key, item, "record element"))?;
                out.push(Value::Record(parse_inputs(element_type, element)?));
            }
            Ok(Value::List(out))
        }
        // text / bool / any pasan sin tocar
        _ => Ok(raw),
    }
}

pub(crate) fn coerce_int(key: &str, value: &Value) -> Result<i64, ModelError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Decimal(d) => d.trunc().to_i64().ok_or_else(|| invalid(key, value, "integer")),
        Value::Text(s) => {
            if let Ok(i) = s.trim().parse::<i64>() {
                return Ok(i);
            }
            decimal::parse_str(key, s)?.trunc().to_i64().ok_or_else(|| invalid(key, value, "integer"))
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(invalid(key, value, "integer")),
    }
}

pub(crate) fn coerce_decimal(key: &str, value: &Value) -> Result<Decimal, ModelError> {
    match value {
        Value::Decimal(d) => Ok(*d),
        Value::Int(i) => Ok(Decimal::from(*i)),
        Value::Text(s) => decimal::parse_str(key, s),
        Value::Bool(b) => Ok(Decimal::from(i64::from(*b))),
        _ => Err(invalid(key, value, "decimal")),
    }
}

fn invalid(key: &str, value: &Value, expected: &str) -> ModelError {
    ModelError::InvalidValue { field: key.to_string(),
                               detail: format!("expected {expected}, got {}", value.type_name()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use crate::value::RecordExt;

    fn args(pairs: &[(&str, Value)]) -> ValueMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn missing_input_without_default_fails() {
        let schema = TypeSchema::new().field("b", FieldSpec::decimal("b"));
        let err = parse_inputs(&schema, &ValueMap::new()).unwrap_err();
        assert_eq!(err, ModelError::MissingInput("b".into()));
    }

    #[test]
    fn default_applies_in_schema_order() {
        let schema = TypeSchema::new().field("a", FieldSpec::decimal("a").default_int(2))
                                      .field("b", FieldSpec::decimal("b"));
        let parsed = parse_inputs(&schema, &args(&[("b", Value::Text("3.005".into()))])).unwrap();
        let keys: Vec<&String> = parsed.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(parsed.dec("a"), Decimal::from(2));
        assert_eq!(parsed.dec("b"), decimal::lit("3.005"));
    }

    #[test]
    fn non_schema_args_are_ignored() {
        let schema = TypeSchema::new().field("a", FieldSpec::integer("a"));
        let parsed = parse_inputs(&schema, &args(&[("a", Value::Int(1)), ("junk", Value::Int(9))])).unwrap();
        assert!(parsed.get("junk").is_none());
    }

    #[test]
    fn choice_coerces_from_text_and_decimal() {
        let schema = TypeSchema::new().field("c", FieldSpec::choice("c"));
        let parsed = parse_inputs(&schema, &args(&[("c", Value::Text("4".into()))])).unwrap();
        assert_eq!(parsed.int("c"), 4);
        let parsed = parse_inputs(&schema, &args(&[("c", Value::Decimal(decimal::lit("4.9")))])).unwrap();
        assert_eq!(parsed.int("c"), 4);
    }

    #[test]
    fn list_elements_recurse_against_element_schema() {
        let element = TypeSchema::new().field("id", FieldSpec::choice("id").primary_key())
                                       .field("fraction", FieldSpec::decimal("f").default_dec("0.5"));
        let schema = TypeSchema::new().field("crops", FieldSpec::list("crops", element));
        let one = args(&[("id", Value::Text("2".into()))]);
        let parsed = parse_inputs(&schema, &args(&[("crops", Value::List(vec![Value::Record(one)]))])).unwrap();
        let first = parsed.list("crops")[0].as_record().unwrap();
        assert_eq!(first.int("id"), 2);
        assert_eq!(first.dec("fraction"), decimal::lit("0.5"));
    }

    #[test]
    fn garbage_decimal_is_invalid_value() {
        let schema = TypeSchema::new().field("x", FieldSpec::decimal("x"));
        let err = parse_inputs(&schema, &args(&[("x", Value::Text("abc".into()))])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidValue { .. }));
    }
}
