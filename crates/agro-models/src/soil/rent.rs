use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};

#[derive(Debug, Default)]
pub struct SoilRent;

impl Model for SoilRent {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_rent", description: "Rent sizing for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("rent area", FieldSpec::decimal("Total area to be rented (sqft)"))
            .field("rent cost", FieldSpec::decimal("Rental cost per area ($ / sqft)"))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new().field("total rent", FieldSpec::decimal("Total rent costs ($)").digits(2))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        set_if_unset(&mut result,
                     "total rent",
                     Value::Decimal(inputs.dec("rent area") * inputs.dec("rent cost")));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
