use std::time::Instant;

use agro_core::{add_elapsed, decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec,
                Model, ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

/// Consumo anual de referencia por persona (lbs).
const LBS_PER_PERSON_PER_YEAR: &str = "161.7422706";

#[derive(Debug, Default)]
pub struct FinancialsPopulationFed;

impl Model for FinancialsPopulationFed {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "financials_population_fed", description: "Population fed estimation" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new().field("total yield", FieldSpec::decimal("Total estimated yield (lbs)"))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("potential population fed", FieldSpec::decimal("Estimated number of people fed").digits(0))
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

        set_if_unset(&mut result,
                     "potential population fed",
                     Value::Decimal(inputs.dec("total yield") / decimal::lit(LBS_PER_PERSON_PER_YEAR)));

        add_elapsed(&mut result, "runtime", start);
        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
