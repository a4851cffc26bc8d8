//! Propiedades del framework ejercitadas con un modelo de juguete.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agro_core::decimal;
use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, InMemoryRowStore, Model,
                ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

/// Modelo mínimo: c = a * b, con `a` con default y `c` cuantizado a 2.
#[derive(Debug, Default)]
struct Product {
    runs: AtomicUsize,
}

impl Model for Product {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "product", description: "toy product model" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new().field("a", FieldSpec::decimal("first factor").default_int(2))
                         .field("b", FieldSpec::decimal("second factor"))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new().field("c", FieldSpec::decimal("product").digits(2))
    }

    fn input_values(&self, _ctx: &RuntimeContext, field: &str) -> Result<Vec<agro_core::Row>, ModelError> {
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        set_if_unset(&mut result, "c", Value::Decimal(inputs.dec("a") * inputs.dec("b")));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}

fn ctx() -> RuntimeContext {
    RuntimeContext::new(Arc::new(InMemoryRowStore::new()))
}

fn args(pairs: &[(&str, Value)]) -> ValueMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn end_to_end_default_and_product() {
    let model = Product::default();
    let result = model.compute(&ctx(), &args(&[("b", Value::Text("3.005".into()))]), false).unwrap();
    assert_eq!(result.dec("a"), Decimal::from(2));
    assert_eq!(result.dec("b"), decimal::lit("3.005"));
    assert_eq!(result.dec("c"), decimal::lit("6.010"));
}

#[test]
fn end_to_end_missing_input() {
    let model = Product::default();
    let err = model.compute(&ctx(), &ValueMap::new(), false).unwrap_err();
    assert_eq!(err, ModelError::MissingInput("b".into()));
}

#[test]
fn quantized_result_projects_onto_output_schema() {
    let model = Product::default();
    let result = model.compute(&ctx(), &args(&[("b", Value::Text("3.005".into()))]), true).unwrap();
    let keys: Vec<&String> = result.keys().collect();
    assert_eq!(keys, ["c"]);
    assert_eq!(result.dec("c").to_string(), "6.01");
}

#[test]
fn override_wins_over_business_logic() {
    let model = Product::default();
    let supplied = args(&[("b", Value::Int(3)), ("c", Value::Text("99.129".into()))]);
    let result = model.compute(&ctx(), &supplied, true).unwrap();
    assert_eq!(result.dec("c").to_string(), "99.13");
}

#[test]
fn unknown_input_values_field_is_rejected() {
    let model = Product::default();
    let err = model.input_values(&ctx(), "nonexistent").unwrap_err();
    assert_eq!(err, ModelError::UnknownField("nonexistent".into()));
}

#[test]
fn invoke_memoizes_structurally_equal_args() {
    let model = Product::default();
    let ctx = ctx();
    let a = args(&[("b", Value::Text("3.005".into()))]);
    // mismos args, otro orden de inserción
    let b = args(&[("b", Value::Text("3.005".into()))]);

    let first = ctx.invoke(&model, &a, true).unwrap();
    let second = ctx.invoke(&model, &b, true).unwrap();
    assert_eq!(first, second);
    assert_eq!(model.runs.load(Ordering::SeqCst), 1);
}

#[test]
fn invoke_does_not_cache_errors() {
    let model = Product::default();
    let ctx = ctx();
    assert!(ctx.invoke(&model, &ValueMap::new(), true).is_err());
    assert!(ctx.invoke(&model, &ValueMap::new(), true).is_err());
    // sin negative caching: el cuerpo corre cada vez
    assert_eq!(model.runs.load(Ordering::SeqCst), 2);
}

#[test]
fn expired_ttl_recomputes() {
    let model = Product::default();
    let ctx = RuntimeContext::new(Arc::new(InMemoryRowStore::new())).with_compute_ttl(Some(Duration::from_secs(0)));
    let a = args(&[("b", Value::Int(3))]);
    ctx.invoke(&model, &a, true).unwrap();
    ctx.invoke(&model, &a, true).unwrap();
    assert_eq!(model.runs.load(Ordering::SeqCst), 2);
}

#[test]
fn input_values_cache_is_pure_and_unbounded() {
    #[derive(Debug, Default)]
    struct Choices {
        lookups: AtomicUsize,
    }
    impl Model for Choices {
        fn info(&self) -> ModelInfo {
            ModelInfo { name: "choices", description: "choice enumeration" }
        }
        fn input_type(&self) -> TypeSchema {
            TypeSchema::new().field("kind", FieldSpec::choice("kind"))
        }
        fn output_type(&self) -> TypeSchema {
            TypeSchema::new()
        }
        fn input_values(&self, _ctx: &RuntimeContext, field: &str) -> Result<Vec<agro_core::Row>, ModelError> {
            if field == "kind" {
                self.lookups.fetch_add(1, Ordering::SeqCst);
                return Ok(vec![agro_core::row(&[("id", Value::Int(1)), ("description", Value::Text("only".into()))])]);
            }
            Err(ModelError::UnknownField(field.to_string()))
        }
        fn compute(&self, _ctx: &RuntimeContext, _args: &ValueMap, _quantize: bool) -> Result<ValueMap, ModelError> {
            Ok(ValueMap::new())
        }
    }

    let model = Choices::default();
    let ctx = ctx();
    let first = ctx.input_values(&model, "kind").unwrap();
    let second = ctx.input_values(&model, "kind").unwrap();
    assert_eq!(first, second);
    assert_eq!(model.lookups.load(Ordering::SeqCst), 1);
    assert!(ctx.input_values(&model, "other").is_err());
}
