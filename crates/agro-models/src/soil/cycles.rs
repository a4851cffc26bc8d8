use agro_core::{parse_inputs, preload_outputs, quantize_outputs, Database, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};

/// La ponderación de estaciones meteorológicas vecinas vive del lado de la
/// base `location`; este modelo sólo parametriza la ventana térmica del
/// cultivo y el factor de estiramiento suboptimal.
const SQL_CYCLES: &str = "
    select num_cycles, num_complementary_cycles
    from soil_cycles($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
";

#[derive(Debug, Default)]
pub struct SoilCropCycles;

impl Model for SoilCropCycles {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_crop_cycles", description: "Counts effective number of crop cycles for soil" }
    }

    fn input_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("id", FieldSpec::text("Crop identifier").primary_key())
            .field("absolute min temp", FieldSpec::decimal("Absolute min temperature for crop (C)"))
            .field("optimal min temp", FieldSpec::decimal("Optimal min temperature for crop (C)"))
            .field("optimal max temp", FieldSpec::decimal("Optimal max temperature for crop (C)"))
            .field("absolute max temp", FieldSpec::decimal("Absolute max temperature for crop (C)"))
            .field("optimal crop cycle",
                   FieldSpec::decimal("Duration of crop cycle in optimal temperature (days)"));
        TypeSchema::new()
            .field("latitude", FieldSpec::decimal("Geographical latitude"))
            .field("longitude", FieldSpec::decimal("Geographical longitude"))
            .field("crops", FieldSpec::list("Selection of crops to compute", element))
            .field("complementary crop absolute min temp",
                   FieldSpec::decimal("Absolute min temperature for complementary crop (C)"))
            .field("complementary crop optimal min temp",
                   FieldSpec::decimal("Optimal min temperature for complementary crop (C)"))
            .field("complementary crop optimal max temp",
                   FieldSpec::decimal("Optimal max temperature for complementary crop (C)"))
            .field("complementary crop absolute max temp",
                   FieldSpec::decimal("Absolute max temperature for complementary crop (C)"))
            .field("complementary crop optimal crop cycle",
                   FieldSpec::decimal("Duration of crop cycle in optimal temperature for complementary crop (days)"))
            .field("suboptimal stretch factor",
                   FieldSpec::decimal("Time dilatation factor for crop growth in suboptimal temperature (%)")
                       .default_dec("0.7"))
            .field("cycle exchange period",
                   FieldSpec::decimal("Number of optimal days used when switching between crop cycles (days)")
                       .default_int(3))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("id", FieldSpec::text("Crop identifier").primary_key())
            .field("main crop cycles", FieldSpec::integer("Effective number of cycles on main crop"))
            .field("complementary crop cycles",
                   FieldSpec::integer("Effective number of cycles on complementary crop"));
        TypeSchema::new().field("crops", FieldSpec::list("Cycle data information calculated per crop", element))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let mut crops: Vec<Value> = Vec::new();
        for crop in inputs.list("crops") {
            let crop = crop.as_record().expect("coerced crop element");
            let params = [Value::Decimal(inputs.dec("latitude")),
                          Value::Decimal(inputs.dec("longitude")),
                          Value::Decimal(crop.dec("absolute min temp")),
                          Value::Decimal(crop.dec("optimal min temp")),
                          Value::Decimal(crop.dec("optimal max temp")),
                          Value::Decimal(crop.dec("absolute max temp")),
                          Value::Decimal(crop.dec("optimal crop cycle")),
                          Value::Decimal(inputs.dec("complementary crop absolute min temp")),
                          Value::Decimal(inputs.dec("complementary crop optimal min temp")),
                          Value::Decimal(inputs.dec("complementary crop optimal max temp")),
                          Value::Decimal(inputs.dec("complementary crop absolute max temp")),
                          Value::Decimal(inputs.dec("complementary crop optimal crop cycle")),
                          Value::Decimal(inputs.dec("suboptimal stretch factor")),
                          Value::Decimal(inputs.dec("cycle exchange period"))];
            let row = ctx.store()
                         .fetch_one(Database::Location, SQL_CYCLES, &params)?
                         .ok_or_else(|| {
                             ModelError::LookupNotFound(format!("soil cycles for crop {}", crop.text("id")))
                         })?;
            let mut line = ValueMap::new();
            line.insert("id".into(), Value::Text(crop.text("id").to_string()));
            line.insert("main crop cycles".into(), Value::Int(row.int("num_cycles")));
            line.insert("complementary crop cycles".into(), Value::Int(row.int("num_complementary_cycles")));
            crops.push(Value::Record(line));
        }
        result.insert("crops".into(), Value::List(crops));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
