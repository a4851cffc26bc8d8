use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct SoilEnergy;

impl Model for SoilEnergy {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_energy", description: "Energy model for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("cold storage capex", FieldSpec::decimal("Capex for Cold Storage ($)"))
            .field("tools capex", FieldSpec::decimal("Capex for Tools ($)"))
            .field("transportation capex", FieldSpec::decimal("Capex for Transportation ($)"))
            .field("harvest capex", FieldSpec::decimal("Capex for Harvesting, washing and packaging ($)"))
            .field("opex fraction", FieldSpec::decimal("Estimated fraction of Capex as Opex (%)").default_dec("0.02"))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("description", FieldSpec::text("Line item description"))
            .field("cost", FieldSpec::decimal("Line item expenses cost ($ / y)").digits(2));
        TypeSchema::new()
            .field("line items", FieldSpec::list("List of energy opex", element))
            .field("total cost", FieldSpec::decimal("Total energy opex ($ / y)").digits(2))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let fraction = inputs.dec("opex fraction");
        let lines = [("Cold Storage", "cold storage capex"),
                     ("Tools", "tools capex"),
                     ("Transportation", "transportation capex"),
                     ("Harvesting, washing & packaging equipment", "harvest capex")];
        let line_items: Vec<Value> = lines.iter()
                                          .map(|(description, input_key)| {
                                              let mut line = ValueMap::new();
                                              line.insert("description".into(), Value::Text(description.to_string()));
                                              line.insert("cost".into(), Value::Decimal(inputs.dec(input_key) * fraction));
                                              Value::Record(line)
                                          })
                                          .collect();

        let total = line_items.iter()
                              .filter_map(|line| line.as_record())
                              .fold(Decimal::ZERO, |acc, line| acc + line.dec("cost"));
        result.insert("line items".into(), Value::List(line_items));
        set_if_unset(&mut result, "total cost", Value::Decimal(total));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
