//! Preload, override y cuantización del ResultMap.
//!
//! El contrato de escritura de un modelo es: el ResultMap se siembra con
//! `preload_outputs` ANTES de la lógica de negocio, y cada asignación de la
//! lógica de negocio pasa por `set_if_unset` (gana el primer escritor). Eso da
//! al caller un mecanismo uniforme de override: proveer un campo de salida
//! como entrada cortocircuita su cómputo sin que `compute()` tenga que
//! ramificar.

use rust_decimal::Decimal;

use crate::decimal;
use crate::inputs::{coerce_decimal, coerce_int};
use crate::schema::{FieldKind, FieldSpec, TypeSchema};
use crate::value::{Value, ValueMap};

/// Siembra un ResultMap nuevo antes de la lógica de negocio.
///
/// Recorre primero las entradas ya coercidas: claves presentes en el esquema
/// de salida se coercen a su kind de salida; claves ausentes del esquema
/// pasan sin tocar (así sobreviven entradas y campos de contabilidad que no
/// pertenecen al contrato de salida). Después recorre los `args` crudos del
/// caller: una clave del esquema de salida que no sea entrada del modelo se
/// coerce y se siembra igual, de modo que proveer cualquier campo de salida
/// como argumento cortocircuita su cómputo.
pub fn preload_outputs(output_type: &TypeSchema, inputs: &ValueMap, args: &ValueMap) -> ValueMap {
    let mut result = ValueMap::new();
    for (key, value) in inputs {
        let loaded = match output_type.get(key) {
            Some(spec) => preload_field(key, spec, value),
            None => value.clone(),
        };
        result.insert(key.clone(), loaded);
    }
    for (key, value) in args {
        if result.contains_key(key) {
            continue;
        }
        if let Some(spec) = output_type.get(key) {
            result.insert(key.clone(), preload_field(key, spec, value));
        }
    }
    result
}

fn preload_field(key: &str, spec: &FieldSpec, value: &Value) -> Value {
    match spec.kind {
        FieldKind::Integer => coerce_int(key, value).map(Value::Int).unwrap_or_else(|_| value.clone()),
        FieldKind::Decimal => coerce_decimal(key, value).map(Value::Decimal).unwrap_or_else(|_| value.clone()),
        FieldKind::List => match (spec.element_type.as_ref(), value) {
            (Some(element_type), Value::List(items)) => {
                let empty = ValueMap::new();
                let out = items.iter()
                               .map(|item| match item.as_record() {
                                   Some(rec) => Value::Record(preload_outputs(element_type, rec, &empty)),
                                   None => item.clone(),
                               })
                               .collect();
                Value::List(out)
            }
            _ => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Escribe `value` sólo si `key` no está ya presente.
pub fn set_if_unset(result: &mut ValueMap, key: &str, value: Value) {
    if result.contains_key(key) {
        return;
    }
    result.insert(key.to_string(), value);
}

/// Cuantiza el ResultMap in-place y lo proyecta sobre el esquema de salida:
/// claves fuera del esquema se eliminan; decimales con `digits` se cuantizan
/// (half-to-even) saltando nulls; enteros se coercen; las listas recursan
/// elemento a elemento contra su `element type`. Un campo del esquema ausente
/// del resultado se deja ausente (comportamiento dado, no se valida aquí).
pub fn quantize_outputs(output_type: &TypeSchema, result: &mut ValueMap) {
    result.retain(|key, _| output_type.contains(key));
    for (key, value) in result.iter_mut() {
        if let Some(spec) = output_type.get(key) {
            quantize_field(spec, value);
        }
    }
}

fn quantize_field(spec: &FieldSpec, value: &mut Value) {
    match spec.kind {
        FieldKind::Decimal => {
            if let Some(digits) = spec.digits {
                if let Some(d) = value.as_decimal() {
                    *value = Value::Decimal(decimal::quantize(d, digits));
                }
            }
        }
        FieldKind::Integer => {
            if let Ok(i) = coerce_int("", value) {
                *value = Value::Int(i);
            }
        }
        FieldKind::List => {
            if let (Some(element_type), Value::List(items)) = (spec.element_type.as_ref(), value) {
                for item in items.iter_mut() {
                    if let Value::Record(rec) = item {
                        quantize_outputs(element_type, rec);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Acumula en `result[key]` los segundos transcurridos desde `start`.
pub fn add_elapsed(result: &mut ValueMap, key: &str, start: std::time::Instant) {
    let current = result.get(key).and_then(Value::as_decimal).unwrap_or(Decimal::ZERO);
    result.insert(key.to_string(), Value::Decimal(current + decimal::elapsed_secs(start)));
}

/// Suma al total propio el `sql_runtime` reportado por un hijo, si lo reporta.
pub fn merge_sql_runtime(result: &mut ValueMap, child: &ValueMap) {
    if let Some(child_runtime) = child.get("sql_runtime").and_then(Value::as_decimal) {
        let current = result.get("sql_runtime").and_then(Value::as_decimal).unwrap_or(Decimal::ZERO);
        result.insert("sql_runtime".to_string(), Value::Decimal(current + child_runtime));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use crate::value::RecordExt;

    fn map(pairs: &[(&str, Value)]) -> ValueMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn out_schema() -> TypeSchema {
        let element = TypeSchema::new().field("id", FieldSpec::integer("id").primary_key())
                                       .field("cost", FieldSpec::decimal("cost").digits(2));
        TypeSchema::new().field("total", FieldSpec::decimal("total").digits(2))
                         .field("count", FieldSpec::integer("count"))
                         .field("lines", FieldSpec::list("lines", element))
    }

    #[test]
    fn preload_coerces_schema_keys_and_passes_through_the_rest() {
        let seeded = preload_outputs(&out_schema(),
                                     &map(&[("total", Value::Text("1.5".into())),
                                            ("sql_runtime", Value::Int(0)),
                                            ("junk", Value::Text("keep".into()))]),
                                     &ValueMap::new());
        assert_eq!(seeded.dec("total"), decimal::lit("1.5"));
        assert_eq!(seeded.text("junk"), "keep");
    }

    #[test]
    fn preload_seeds_output_overrides_from_raw_args() {
        let inputs = map(&[("junk", Value::Int(1))]);
        let raw = map(&[("junk", Value::Int(1)),
                        ("count", Value::Text("7".into())),
                        ("other junk", Value::Int(2))]);
        let seeded = preload_outputs(&out_schema(), &inputs, &raw);
        assert_eq!(seeded.int("count"), 7);
        // claves crudas fuera de ambos esquemas no se siembran
        assert!(seeded.get("other junk").is_none());
    }

    #[test]
    fn first_writer_wins() {
        let mut result = map(&[("total", Value::Int(9))]);
        set_if_unset(&mut result, "total", Value::Int(1));
        set_if_unset(&mut result, "count", Value::Int(3));
        assert_eq!(result.int("total"), 9);
        assert_eq!(result.int("count"), 3);
    }

    #[test]
    fn quantize_projects_onto_schema_keys() {
        let schema = out_schema();
        let mut result = map(&[("total", Value::Decimal(decimal::lit("6.005"))),
                               ("count", Value::Decimal(decimal::lit("3.9"))),
                               ("scratch", Value::Int(1))]);
        quantize_outputs(&schema, &mut result);
        let mut keys: Vec<&String> = result.keys().collect();
        keys.sort();
        assert_eq!(keys, ["count", "total"]);
        assert_eq!(result.dec("total").to_string(), "6.00");
        assert_eq!(result.int("count"), 3);
    }

    #[test]
    fn quantize_recurses_into_list_elements() {
        let schema = out_schema();
        let line = map(&[("id", Value::Int(1)),
                         ("cost", Value::Decimal(decimal::lit("2.345"))),
                         ("scratch", Value::Bool(true))]);
        let mut result = map(&[("lines", Value::List(vec![Value::Record(line)]))]);
        quantize_outputs(&schema, &mut result);
        let first = result.list("lines")[0].as_record().unwrap();
        assert_eq!(first.dec("cost").to_string(), "2.34");
        assert!(first.get("scratch").is_none());
        assert_eq!(first.int("id"), 1);
    }

    #[test]
    fn quantize_skips_null_decimals() {
        let schema = TypeSchema::new().field("payback", FieldSpec::decimal("p").digits(2));
        let mut result = map(&[("payback", Value::Null)]);
        quantize_outputs(&schema, &mut result);
        assert!(result.get("payback").unwrap().is_null());
    }

    #[test]
    fn missing_schema_field_stays_missing() {
        let schema = out_schema();
        let mut result = ValueMap::new();
        quantize_outputs(&schema, &mut result);
        assert!(result.is_empty());
    }

    #[test]
    fn merge_sql_runtime_accumulates() {
        let mut result = map(&[("sql_runtime", Value::Decimal(decimal::lit("0.5")))]);
        let child = map(&[("sql_runtime", Value::Decimal(decimal::lit("0.25")))]);
        merge_sql_runtime(&mut result, &child);
        assert_eq!(result.dec("sql_runtime"), decimal::lit("0.75"));
        // hijos sin contador no aportan
        merge_sql_runtime(&mut result, &ValueMap::new());
        assert_eq!(result.dec("sql_runtime"), decimal::lit("0.75"));
    }
}
