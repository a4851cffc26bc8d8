use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};

#[derive(Debug, Default)]
pub struct SoilWater;

impl Model for SoilWater {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_water", description: "Water model for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("water used", FieldSpec::decimal("Amount of water used yearly (gallons / y)"))
            .field("water cost", FieldSpec::decimal("Cost of water ($ / gallon)").default_dec("0.002"))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new().field("total cost", FieldSpec::decimal("Total water cost ($ / y)").digits(2))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        set_if_unset(&mut result,
                     "total cost",
                     Value::Decimal(inputs.dec("water used") * inputs.dec("water cost")));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{decimal, InMemoryRowStore};
    use std::sync::Arc;

    #[test]
    fn cost_is_volume_times_rate() {
        let ctx = RuntimeContext::new(Arc::new(InMemoryRowStore::new()));
        let mut args = ValueMap::new();
        args.insert("water used".into(), Value::Int(1000));
        let result = SoilWater.compute(&ctx, &args, true).unwrap();
        assert_eq!(result.dec("total cost"), decimal::lit("2.00"));
    }
}
