use agro_core::{decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};

#[derive(Debug, Default)]
pub struct SoilSizingArea;

impl Model for SoilSizingArea {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_sizing_area", description: "Area allocation for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new().field("area", FieldSpec::decimal("Total area to be allocated (sqft)"))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("description", FieldSpec::text("Item description"))
            .field("percentage", FieldSpec::decimal("Fraction of area allocated (%)").digits(4))
            .field("area", FieldSpec::decimal("Area allocated (sqft)").digits(0));
        TypeSchema::new()
            .field("overall", FieldSpec::list("Overall area allocation", element))
            .field("main bedspace", FieldSpec::decimal("Available bedspace (sqft)").digits(0))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let area = inputs.dec("area");
        let allocation = [("Cultivation", "0.56"),
                          ("Row aisles", "0.24"),
                          ("Processing", "0.05"),
                          ("Nursery", "0.05"),
                          ("Storage", "0.1"),
                          ("Total", "1")];
        let overall: Vec<Value> = allocation.iter()
                                            .map(|(description, percentage)| {
                                                let percentage = decimal::lit(percentage);
                                                let mut line = ValueMap::new();
                                                line.insert("description".into(), Value::Text(description.to_string()));
                                                line.insert("percentage".into(), Value::Decimal(percentage));
                                                line.insert("area".into(), Value::Decimal(area * percentage));
                                                Value::Record(line)
                                            })
                                            .collect();
        let main_bedspace = overall[0].as_record().map(|line| line.dec("area")).unwrap_or_default();
        result.insert("overall".into(), Value::List(overall));
        set_if_unset(&mut result, "main bedspace", Value::Decimal(main_bedspace));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
