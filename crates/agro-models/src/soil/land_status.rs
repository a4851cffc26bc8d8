use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};

const SQL_LAND_STATUS: &str = "SELECT is_rent, is_buy FROM land_status WHERE id=$1";
const SQL_LAND_STATUS_CHOICES: &str = "SELECT id, description FROM land_status";

#[derive(Debug, Default)]
pub struct SoilLandStatus;

impl Model for SoilLandStatus {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_input_land_status", description: "Input translator for Soil land status" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new().field("land status", FieldSpec::choice("Selection land status").default_int(1))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "land status" {
            return Ok(ctx.store().fetch_all(Database::Models, SQL_LAND_STATUS_CHOICES, &[])?);
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("is rent", FieldSpec::boolean("Whether the land is rented"))
            .field("is buy", FieldSpec::boolean("Whether the land is being bought"))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let element_id = inputs.int("land status");
        let land_status_row = ctx.store()
                                 .fetch_one(Database::Models, SQL_LAND_STATUS, &[Value::Int(element_id)])?
                                 .ok_or_else(|| ModelError::LookupNotFound(format!("land_status id={element_id}")))?;

        set_if_unset(&mut result, "is rent", Value::Bool(land_status_row.int("is_rent") != 0));
        set_if_unset(&mut result, "is buy", Value::Bool(land_status_row.int("is_buy") != 0));

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
    fn missing_row_is_lookup_not_found() {
        let ctx = RuntimeContext::new(Arc::new(InMemoryRowStore::new()));
        let err = SoilLandStatus.compute(&ctx, &ValueMap::new(), true).unwrap_err();
        assert!(matches!(err, ModelError::LookupNotFound(_)));
    }

    #[test]
    fn flags_come_from_the_row() {
        let store = InMemoryRowStore::new().with_rows(Database::Models,
                                                      SQL_LAND_STATUS,
                                                      &[Value::Int(1)],
                                                      vec![row(&[("is_rent", Value::Int(1)),
                                                                 ("is_buy", Value::Int(0))])]);
        let ctx = RuntimeContext::new(Arc::new(store));
        let result = SoilLandStatus.compute(&ctx, &ValueMap::new(), true).unwrap();
        assert_eq!(result.flag("is rent"), true);
        assert_eq!(result.flag("is buy"), false);
    }
}
