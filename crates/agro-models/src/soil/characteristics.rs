use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

const SQL_CROP: &str = "SELECT * FROM crops WHERE id=$1";
const SQL_CROP_CHOICES: &str = "SELECT id, crop_type FROM crops ORDER BY id";

#[derive(Debug, Default)]
pub struct SoilCropCharacteristics;

impl Model for SoilCropCharacteristics {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_crop_characteristics", description: "Crop characteristics matrix selector for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("id", FieldSpec::choice("Selected crop item").primary_key())
            .field("system fraction", FieldSpec::decimal("Fraction of bedspace allocated to crop"));
        TypeSchema::new().field("crops", FieldSpec::list("Selection of crops to compute", element))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "crops.id" {
            return Ok(ctx.store().fetch_all(Database::Models, SQL_CROP_CHOICES, &[])?);
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("id", FieldSpec::integer("Crop index").primary_key())
            .field("optimal crop cycle", FieldSpec::decimal("Optimal crop cycle duration (d)").digits(1))
            .field("cycles per year", FieldSpec::decimal("Number of cycles per year").digits(1))
            .field("crop difficulty", FieldSpec::decimal("Projected crop difficulty").digits(0))
            .field("absolute min temp", FieldSpec::decimal("Absolute min temperature for crop (C)").digits(1))
            .field("optimal min temp", FieldSpec::decimal("Optimal min temperature for crop (C)").digits(1))
            .field("optimal max temp", FieldSpec::decimal("Optimal max temperature for crop (C)").digits(1))
            .field("absolute max temp", FieldSpec::decimal("Absolute max temperature for crop (C)").digits(1));
        TypeSchema::new()
            .field("crops", FieldSpec::list("Crop matrix results", element))
            .field("combined difficulty factor", FieldSpec::decimal("Combined crop difficulty factor").digits(0))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let mut crops: Vec<Value> = Vec::new();
        for input_row in inputs.list("crops") {
            let input_row = input_row.as_record().expect("coerced crop element");
            let crop_id = input_row.int("id");
            let row = ctx.store()
                         .fetch_one(Database::Models, SQL_CROP, &[Value::Int(crop_id)])?
                         .ok_or_else(|| ModelError::LookupNotFound(format!("crop id={crop_id}")))?;
            let mut line = ValueMap::new();
            line.insert("id".into(), Value::Int(crop_id));
            line.insert("system fraction".into(), Value::Decimal(input_row.dec("system fraction")));
            line.insert("optimal crop cycle".into(), Value::Decimal(row.dec("optimal_crop_cycle")));
            line.insert("cycles per year".into(),
                        Value::Decimal(Decimal::from(365) / row.dec("optimal_crop_cycle")));
            line.insert("crop difficulty".into(), Value::Decimal(row.dec("difficulty_soil")));
            line.insert("absolute min temp".into(), Value::Decimal(row.dec("temp_absolute_min")));
            line.insert("optimal min temp".into(), Value::Decimal(row.dec("temp_optimal_min")));
            line.insert("optimal max temp".into(), Value::Decimal(row.dec("temp_optimal_max")));
            line.insert("absolute max temp".into(), Value::Decimal(row.dec("temp_absolute_max")));
            crops.push(Value::Record(line));
        }

        let weighted: Decimal = crops.iter()
                                     .filter_map(|line| line.as_record())
                                     .fold(Decimal::ZERO,
                                           |acc, line| acc + line.dec("crop difficulty") * line.dec("system fraction"));
        let fractions: Decimal = crops.iter()
                                      .filter_map(|line| line.as_record())
                                      .fold(Decimal::ZERO, |acc, line| acc + line.dec("system fraction"));
        result.insert("crops".into(), Value::List(crops));
        set_if_unset(&mut result,
                     "combined difficulty factor",
                     Value::Decimal(Decimal::from(2) * weighted / fractions));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
