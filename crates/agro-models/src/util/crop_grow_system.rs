use agro_core::{parse_inputs, preload_outputs, quantize_outputs, Database, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};

const SQL_CROP_CHOICES: &str = "SELECT id, crop_type FROM crops ORDER BY id";
const SQL_GROW_SYSTEMS: &str = "
    with crop_data as (
            select nft, ebb_flow, deep_water_culture, bucket, slab, soil, aeroponic from crops where id = $1
    )
    select g.id, g.description from (
            select (case when count(*) = 0 then null else 1 end) id from crop_data where nft = 1
            union all
            select (case when count(*) = 0 then null else 2 end) id from crop_data where ebb_flow = 1
            union all
            select (case when count(*) = 0 then null else 3 end) id from crop_data where deep_water_culture = 1
            union all
            select (case when count(*) = 0 then null else 4 end) id from crop_data where bucket = 1
            union all
            select (case when count(*) = 0 then null else 5 end) id from crop_data where slab = 1
            union all
            select (case when count(*) = 0 then null else 6 end) id from crop_data where soil = 1
            union all
            select (case when count(*) = 0 then null else 7 end) id from crop_data where aeroponic = 1
    ) k
    join grow_system_yield g on k.id = g.id
    where k.id is not null
";
const SQL_OPERATION_TYPE: &str = "select * from operation_types where name=$1";

/// Columna de operation_types que habilita cada sistema de cultivo.
const SYSTEM_COLUMNS: [(&str, &str); 7] = [("NFT", "nft"),
                                           ("Ebb/Flow", "Ebb & Flow"),
                                           ("Deep Water Culture", "dwc"),
                                           ("Bucket", "bucket"),
                                           ("Slab", "slab"),
                                           ("Aeroponic", "aeroponics"),
                                           ("Soil", "soil")];

#[derive(Debug, Default)]
pub struct CropGrowSystem;

impl Model for CropGrowSystem {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "crop_grow_system", description: "Gets list of valid grow system types for a given crop" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("crop id", FieldSpec::choice("Selected crop item"))
            .field("operation_type",
                   FieldSpec::text("Operation type to filter by").default(Value::Text("Greenhouse".into())))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "crop id" {
            return Ok(ctx.store().fetch_all(Database::Models, SQL_CROP_CHOICES, &[])?);
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("id", FieldSpec::integer("Grow system ID").primary_key())
            .field("description", FieldSpec::text("Grow system description"));
        TypeSchema::new().field("grow systems", FieldSpec::list("Grow systems available for the crop", element))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let crop_id = inputs.int("crop id");
        let rows = ctx.store().fetch_all(Database::Models, SQL_GROW_SYSTEMS, &[Value::Int(crop_id)])?;

        let operation_type = inputs.text("operation_type");
        let available = ctx.store()
                           .fetch_one(Database::Models, SQL_OPERATION_TYPE, &[Value::Text(operation_type.into())])?
                           .ok_or_else(|| ModelError::LookupNotFound(format!("operation_type '{operation_type}'")))?;

        // Filtra los sistemas no habilitados para el tipo de operación
        let grow_systems: Vec<Value> =
            rows.into_iter()
                .filter(|row| {
                    let description = row.get("description").and_then(Value::as_str).unwrap_or_default();
                    SYSTEM_COLUMNS.iter()
                                  .find(|(name, _)| *name == description)
                                  .map(|(_, column)| {
                                      available.get(*column).and_then(Value::as_int).unwrap_or(0) == 1
                                  })
                                  .unwrap_or(false)
                })
                .map(|row| {
                    let mut line = ValueMap::new();
                    line.insert("id".into(), row["id"].clone());
                    line.insert("description".into(), row["description"].clone());
                    Value::Record(line)
                })
                .collect();
        result.insert("grow systems".into(), Value::List(grow_systems));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{row, InMemoryRowStore};
    use std::sync::Arc;

    #[test]
    fn filters_systems_by_operation_type() {
        let store = InMemoryRowStore::new()
            .with_rows(Database::Models,
                       SQL_GROW_SYSTEMS,
                       &[Value::Int(3)],
                       vec![row(&[("id", Value::Int(1)), ("description", Value::Text("NFT".into()))]),
                            row(&[("id", Value::Int(6)), ("description", Value::Text("Soil".into()))])])
            .with_rows(Database::Models,
                       SQL_OPERATION_TYPE,
                       &[Value::Text("Greenhouse".into())],
                       vec![row(&[("nft", Value::Int(1)), ("soil", Value::Int(0))])]);
        let ctx = RuntimeContext::new(Arc::new(store));
        let mut args = ValueMap::new();
        args.insert("crop id".into(), Value::Int(3));
        let result = CropGrowSystem.compute(&ctx, &args, true).unwrap();
        let systems = result.list("grow systems");
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].as_record().unwrap().text("description"), "NFT");
    }
}
