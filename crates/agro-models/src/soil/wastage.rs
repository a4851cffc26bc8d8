use std::time::Instant;

use agro_core::{add_elapsed, decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database,
                FieldSpec, Model, ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value,
                ValueMap};
use rust_decimal::Decimal;

const SQL_GROWER_EXPERIENCE: &str = "SELECT base_wastage w FROM soil_grower_experience WHERE id=$1";
const SQL_GROWER_EXPERIENCE_CHOICES: &str = "SELECT id, description FROM soil_grower_experience";

#[derive(Debug, Default)]
pub struct SoilWastage;

fn difficulty_from_crop_number(num_crops: Decimal) -> Decimal {
    if num_crops < Decimal::from(2) {
        return num_crops;
    }
    Decimal::from(2) + (num_crops - Decimal::from(2)) / Decimal::from(4)
}

fn wastage_reduction_by_year(year: i64) -> Decimal {
    if year <= 3 {
        return decimal::lit("0.1");
    }
    if year <= 7 {
        return decimal::lit("0.08");
    }
    decimal::lit("0.06")
}

impl Model for SoilWastage {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_wastage", description: "Wastage model for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("grower experience", FieldSpec::choice("Selection for grower experience").default_int(1))
            .field("base wastage", FieldSpec::decimal("Base wastage constant for calculation").default_dec("0.1"))
            .field("organic production",
                   FieldSpec::boolean("Whether the system will use organic production").default_bool(false))
            .field("crop base difficulty",
                   FieldSpec::decimal("Base difficulty for crop combination").default_int(2))
            .field("number of crops", FieldSpec::decimal("Number of crops being grown").default_int(3))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "grower experience" {
            return Ok(ctx.store().fetch_all(Database::Models, SQL_GROWER_EXPERIENCE_CHOICES, &[])?);
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year for projection"))
            .field("wastage", FieldSpec::decimal("Projected wastage for this year").digits(4));
        TypeSchema::new()
            .field("wastage schedule", FieldSpec::list("Projected wastage for each year", element))
            .field("initial wastage",
                   FieldSpec::decimal("Projected value for wastage on first year").digits(4))
            .field("runtime", FieldSpec::decimal("Time taken for this module run").digits(4).default_int(0))
            .field("sql_runtime",
                   FieldSpec::decimal("Time taken for sql interaction in this module").digits(4).default_int(0))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let start = Instant::now();
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);
        result.insert("sql_runtime".into(), Value::Decimal(Decimal::ZERO));

        let element_id = inputs.int("grower experience");
        let sql_start = Instant::now();
        let grower_experience_row =
            ctx.store()
               .fetch_one(Database::Models, SQL_GROWER_EXPERIENCE, &[Value::Int(element_id)])?
               .ok_or_else(|| ModelError::LookupNotFound(format!("soil_grower_experience id={element_id}")))?;
        add_elapsed(&mut result, "sql_runtime", sql_start);

        let crop_base_difficulty = inputs.dec("crop base difficulty") / Decimal::from(100);
        let organic_factor_difficulty = if inputs.flag("organic production") {
            decimal::lit("1.5")
        } else {
            Decimal::ONE
        };
        let number_of_crops_difficulty = difficulty_from_crop_number(inputs.dec("number of crops"));
        let crop_difficulty_w_factors =
            crop_base_difficulty * organic_factor_difficulty * number_of_crops_difficulty;
        let initial_wastage = (inputs.dec("base wastage") + grower_experience_row.dec("w"))
                              * (Decimal::ONE + crop_difficulty_w_factors);
        set_if_unset(&mut result, "initial wastage", Value::Decimal(initial_wastage));

        let mut wastage_schedule: Vec<Value> = Vec::with_capacity(15);
        let mut current_wastage = initial_wastage;
        for year in 1..=15 {
            let mut line = ValueMap::new();
            line.insert("year".into(), Value::Int(year));
            line.insert("wastage".into(), Value::Decimal(current_wastage));
            wastage_schedule.push(Value::Record(line));
            current_wastage *= Decimal::ONE - wastage_reduction_by_year(year + 1);
        }
        result.insert("wastage schedule".into(), Value::List(wastage_schedule));

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
    use agro_core::{row, InMemoryRowStore};
    use std::sync::Arc;

    #[test]
    fn wastage_declines_year_over_year() {
        let store = InMemoryRowStore::new().with_rows(Database::Models,
                                                      SQL_GROWER_EXPERIENCE,
                                                      &[Value::Int(1)],
                                                      vec![row(&[("w", Value::Decimal(decimal::lit("0.05")))])]);
        let ctx = RuntimeContext::new(Arc::new(store));
        let result = SoilWastage.compute(&ctx, &ValueMap::new(), false).unwrap();
        // (0.1 + 0.05) * (1 + 0.02 * 1 * 2.25) = 0.15675
        assert_eq!(result.dec("initial wastage"), decimal::lit("0.156750"));
        let schedule = result.list("wastage schedule");
        assert_eq!(schedule.len(), 15);
        let first = schedule[0].as_record().unwrap().dec("wastage");
        let last = schedule[14].as_record().unwrap().dec("wastage");
        assert_eq!(first, result.dec("initial wastage"));
        assert!(last < first);
    }
}
