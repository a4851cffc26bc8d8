use std::cmp;
use std::time::Instant;

use agro_core::{add_elapsed, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct FinancialsEmployees;

impl Model for FinancialsEmployees {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "financials_employees", description: "Employee number estimation" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new().field("total staff", FieldSpec::decimal("Total staff on labor requirements"))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("number of people employed", FieldSpec::text("Estimated number of people employed"))
            .field("runtime", FieldSpec::decimal("Time taken for this module run").digits(4).default_int(0))
            .field("sql_runtime",
                   FieldSpec::decimal("Time taken for sql interaction in this module").digits(4).default_int(0))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let start = Instant::now();
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);
        result.insert("sql_runtime".into(), Value::Decimal(Decimal::ZERO));

        let staff = inputs.dec("total staff");
        let num_employees = cmp::max(2, staff.trunc().to_i64().unwrap_or(0));
        let lower = cmp::min(num_employees - 1,
                             (Decimal::from(num_employees) * agro_core::decimal::lit("0.9")).floor()
                                                                                           .to_i64()
                                                                                           .unwrap_or(0));
        let higher = cmp::max(num_employees + 1,
                              (Decimal::from(num_employees) * agro_core::decimal::lit("1.1")).ceil()
                                                                                            .to_i64()
                                                                                            .unwrap_or(0));
        set_if_unset(&mut result, "number of people employed", Value::Text(format!("{lower} - {higher}")));

        add_elapsed(&mut result, "runtime", start);
        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::InMemoryRowStore;
    use std::sync::Arc;

    #[test]
    fn band_has_a_minimum_of_two() {
        let ctx = RuntimeContext::new(Arc::new(InMemoryRowStore::new()));
        let mut args = ValueMap::new();
        args.insert("total staff".into(), Value::Int(1));
        let result = FinancialsEmployees.compute(&ctx, &args, true).unwrap();
        assert_eq!(result.text("number of people employed"), "1 - 3");
    }
}
