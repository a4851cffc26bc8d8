use std::collections::HashMap;

use agro_core::{decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database, FieldSpec,
                Model, ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

use crate::soil::SoilCropCycles;

const SQL_CROP_PARAMS: &str = "
    SELECT temp_absolute_min, temp_optimal_min, temp_optimal_max, temp_absolute_max, optimal_crop_cycle
    FROM crops WHERE id=$1
";
const SQL_CROP: &str = "SELECT * FROM crops WHERE id=$1";
const SQL_SALE_UNITS: &str = "SELECT id, description, multiplier FROM sale_units";
const SQL_CROP_CHOICES: &str = "SELECT id, crop_type FROM crops ORDER BY id";
const SQL_SALE_UNIT_CHOICES: &str = "SELECT id, description FROM sale_units ORDER BY id";
const SQL_DEFAULT_PRICE: &str = "
    select
        case
            when u.multiplier is null then default_price_per_each_market
            else default_price_per_lb_market * u.multiplier
        end price_per_unit
    from
        crops c
        cross join sale_units u
    where
        c.id = $1 and u.id = $2
";

#[derive(Debug, Default)]
pub struct SoilCrop;

fn crops_input_element() -> TypeSchema {
    TypeSchema::new()
        .field("id", FieldSpec::choice("Selected crop item").primary_key())
        .field("system fraction", FieldSpec::decimal("Fraction of bedspace allocated to crop"))
        .field("sale unit id", FieldSpec::choice("Selected sale unit for crop item"))
        .field("price per unit", FieldSpec::decimal("Sale price for crop per selected unit"))
}

impl Model for SoilCrop {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_crop", description: "Crop matrix selector for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("latitude", FieldSpec::decimal("Geographical latitude"))
            .field("longitude", FieldSpec::decimal("Geographical longitude"))
            .field("bedspace", FieldSpec::decimal("Bedspace area to be allocated to crops (sqft)"))
            .field("crops", FieldSpec::list("Selection of crops to compute", crops_input_element()))
            .field("complementary crop id",
                   FieldSpec::choice("Selected crop as complementary crop").default_int(1))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        match field {
            "crops.id" | "complementary crop id" => {
                Ok(ctx.store().fetch_all(Database::Models, SQL_CROP_CHOICES, &[])?)
            }
            "crops.sale unit id" => Ok(ctx.store().fetch_all(Database::Models, SQL_SALE_UNIT_CHOICES, &[])?),
            _ => Err(ModelError::UnknownField(field.to_string())),
        }
    }

    fn output_type(&self) -> TypeSchema {
        let lost_element = TypeSchema::new().field("lost", FieldSpec::decimal("Lost factor").digits(2));
        let element = TypeSchema::new()
            .field("id", FieldSpec::integer("Crop index").primary_key())
            .field("crop type", FieldSpec::text("Name of the crop"))
            .field("area", FieldSpec::decimal("Area covered by crop (sqft)").digits(0))
            .field("cycles", FieldSpec::decimal("Number of cycles per year (1 / y)").digits(0))
            .field("plant sites", FieldSpec::decimal("Number of plant sites per year (1 / y)").digits(0))
            .field("yield", FieldSpec::decimal("Yield (lb / y)").digits(0))
            .field("lost factors",
                   FieldSpec::list("Factors presenting lost due to first year harvest", lost_element))
            .field("water use", FieldSpec::decimal("Water use per year (gallons / y)").digits(0))
            .field("sale unit type", FieldSpec::text("Type of sale unit"))
            .field("sale units", FieldSpec::decimal("Number of sale units per year (1 / y)").digits(0))
            .field("price per unit", FieldSpec::decimal("Price obtained per unit ($ / unit)").digits(2))
            .field("revenue", FieldSpec::decimal("Revenue collected per year ($ / y)").digits(2))
            .field("system fraction", FieldSpec::decimal("Fraction of bedspace allocated to crop"))
            .field("sale unit id", FieldSpec::integer("Selected sale unit for crop item"));
        TypeSchema::new()
            .field("crops", FieldSpec::list("Crop matrix results", element))
            .field("total plant sites",
                   FieldSpec::decimal("Total number of plant sites per year (1 / y)").digits(0))
            .field("total yield", FieldSpec::decimal("Total yield per year (lb / y)").digits(0))
            .field("total water use", FieldSpec::decimal("Total water use per year (gallons / y)").digits(0))
            .field("total sale units", FieldSpec::decimal("Total sale units per year (1 / y)").digits(0))
            .field("total revenue", FieldSpec::decimal("Total revenue per year ($ / y)").digits(2))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let complementary_id = inputs.int("complementary crop id");
        let complementary_params =
            ctx.store()
               .fetch_one(Database::Models, SQL_CROP_PARAMS, &[Value::Int(complementary_id)])?
               .ok_or_else(|| ModelError::LookupNotFound(format!("complementary crop id={complementary_id}")))?;

        let mut crop_cycle_crops: Vec<Value> = Vec::new();
        for input_row in inputs.list("crops") {
            let input_row = input_row.as_record().expect("coerced crop element");
            let crop_id = input_row.int("id");
            let crop_params = ctx.store()
                                 .fetch_one(Database::Models, SQL_CROP_PARAMS, &[Value::Int(crop_id)])?
                                 .ok_or_else(|| ModelError::LookupNotFound(format!("crop id={crop_id}")))?;
            let mut line = ValueMap::new();
            line.insert("id".into(), Value::Text(crop_id.to_string()));
            line.insert("absolute min temp".into(), Value::Decimal(crop_params.dec("temp_absolute_min")));
            line.insert("optimal min temp".into(), Value::Decimal(crop_params.dec("temp_optimal_min")));
            line.insert("optimal max temp".into(), Value::Decimal(crop_params.dec("temp_optimal_max")));
            line.insert("absolute max temp".into(), Value::Decimal(crop_params.dec("temp_absolute_max")));
            line.insert("optimal crop cycle".into(), Value::Decimal(crop_params.dec("optimal_crop_cycle")));
            crop_cycle_crops.push(Value::Record(line));
        }

        let mut args_cycles = ValueMap::new();
        args_cycles.insert("latitude".into(), inputs["latitude"].clone());
        args_cycles.insert("longitude".into(), inputs["longitude"].clone());
        args_cycles.insert("crops".into(), Value::List(crop_cycle_crops));
        args_cycles.insert("complementary crop absolute min temp".into(),
                           Value::Decimal(complementary_params.dec("temp_absolute_min")));
        args_cycles.insert("complementary crop optimal min temp".into(),
                           Value::Decimal(complementary_params.dec("temp_optimal_min")));
        args_cycles.insert("complementary crop optimal max temp".into(),
                           Value::Decimal(complementary_params.dec("temp_optimal_max")));
        args_cycles.insert("complementary crop absolute max temp".into(),
                           Value::Decimal(complementary_params.dec("temp_absolute_max")));
        args_cycles.insert("complementary crop optimal crop cycle".into(),
                           Value::Decimal(complementary_params.dec("optimal_crop_cycle")));
        let cycles = ctx.invoke(&SoilCropCycles, &args_cycles, true)?;
        result.insert("soil_crop_cycles".into(), Value::Record(cycles.clone()));

        let cycle_info_for = |crop_id: i64| -> Option<(i64, i64)> {
            cycles.list("crops")
                  .iter()
                  .filter_map(Value::as_record)
                  .find(|line| line.text("id") == crop_id.to_string())
                  .map(|line| (line.int("main crop cycles"), line.int("complementary crop cycles")))
        };

        let sale_unit_rows = ctx.store().fetch_all(Database::Models, SQL_SALE_UNITS, &[])?;
        let sale_unit_lookup: HashMap<i64, (String, Option<Decimal>)> =
            sale_unit_rows.iter()
                          .filter_map(|row| {
                              let id = row.get("id").and_then(Value::as_int)?;
                              let description =
                                  row.get("description").and_then(Value::as_str).unwrap_or_default().to_string();
                              let multiplier = row.get("multiplier").and_then(Value::as_decimal);
                              Some((id, (description, multiplier)))
                          })
                          .collect();
        let lb_unit_id = sale_unit_rows.iter()
                                       .find(|row| row.get("description").and_then(Value::as_str) == Some("1 lb"))
                                       .and_then(|row| row.get("id").and_then(Value::as_int))
                                       .unwrap_or(1);
        let bedspace = inputs.dec("bedspace");
        let mut result_crops: Vec<ValueMap> = Vec::new();
        let mut substrate_req = Decimal::ZERO;
        for input_row in inputs.list("crops") {
            let input_row = input_row.as_record().expect("coerced crop element");
            let crop_id = input_row.int("id");
            let row = ctx.store()
                         .fetch_one(Database::Models, SQL_CROP, &[Value::Int(crop_id)])?
                         .ok_or_else(|| ModelError::LookupNotFound(format!("crop id={crop_id}")))?;
            let (description, multiplier) = sale_unit_lookup.get(&input_row.int("sale unit id"))
                                                            .cloned()
                                                            .unwrap_or_else(|| (String::new(), None));
            let (main_cycles, complementary_cycles) = cycle_info_for(crop_id)
                .ok_or_else(|| ModelError::LookupNotFound(format!("cycle data for crop id={crop_id}")))?;

            let mut line = ValueMap::new();
            line.insert("id".into(), Value::Int(row.int("id")));
            line.insert("crop type".into(), Value::Text(row.text("crop_type").to_string()));
            line.insert("system fraction".into(), Value::Decimal(input_row.dec("system fraction")));
            let area = input_row.dec("system fraction") * bedspace;
            line.insert("area".into(), Value::Decimal(area));
            let cycles_per_year = Decimal::from(main_cycles);
            line.insert("cycles".into(), Value::Decimal(cycles_per_year));
            line.insert("complementary cycles".into(), Value::Int(complementary_cycles));
            let plant_sites = row.dec("plants_per_sqft") * area * cycles_per_year;
            line.insert("plant sites".into(), Value::Decimal(plant_sites));
            substrate_req = row.dec("substrate_requirement") * area * cycles_per_year;
            let crop_yield = row.dec("lbs_per_plant_per_cycle") * (plant_sites + substrate_req);
            line.insert("yield".into(), Value::Decimal(crop_yield));
            line.insert("water use".into(),
                        Value::Decimal(crop_yield * Decimal::from(20) / decimal::lit("8.34")));
            line.insert("sale unit id".into(), Value::Int(input_row.int("sale unit id")));
            line.insert("sale unit type".into(), Value::Text(description));
            let sale_units = match multiplier {
                Some(multiplier) => crop_yield * multiplier,
                None => plant_sites,
            };
            line.insert("sale units".into(), Value::Decimal(sale_units));
            line.insert("price per unit".into(), Value::Decimal(input_row.dec("price per unit")));
            line.insert("revenue".into(), Value::Decimal(sale_units * input_row.dec("price per unit")));
            let mut lost_factors: Vec<Value> = Vec::with_capacity(15);
            for year in 1..=15 {
                let mut lost = ValueMap::new();
                lost.insert("lost".into(), row[format!("yr{year}").as_str()].clone());
                lost_factors.push(Value::Record(lost));
            }
            line.insert("lost factors".into(), Value::List(lost_factors));
            result_crops.push(line);
        }

        // Ajuste de precio de mercado para el cultivo complementario
        let mut default_revenue = Decimal::ZERO;
        for line in &result_crops {
            let crop_id = line.int("id");
            let sale_unit_id = line.int("sale unit id");
            let price_row =
                ctx.store()
                   .fetch_one(Database::Models,
                              SQL_DEFAULT_PRICE,
                              &[Value::Int(crop_id), Value::Int(sale_unit_id)])?
                   .ok_or_else(|| {
                       ModelError::LookupNotFound(format!("default price crop={crop_id} unit={sale_unit_id}"))
                   })?;
            default_revenue += price_row.dec("price_per_unit") * line.dec("sale units");
        }
        let total_main_revenue = result_crops.iter().fold(Decimal::ZERO, |acc, line| acc + line.dec("revenue"));
        let price_factor = total_main_revenue / default_revenue;

        // Fila del cultivo complementario
        let row = ctx.store()
                     .fetch_one(Database::Models, SQL_CROP, &[Value::Int(complementary_id)])?
                     .ok_or_else(|| ModelError::LookupNotFound(format!("complementary crop id={complementary_id}")))?;
        let mut line = ValueMap::new();
        line.insert("id".into(), Value::Int(complementary_id));
        line.insert("crop type".into(), Value::Text(row.text("crop_type").to_string()));
        line.insert("system fraction".into(), Value::Decimal(Decimal::ONE));
        let area = result_crops.iter().fold(Decimal::ZERO, |acc, line| acc + line.dec("area"));
        line.insert("area".into(), Value::Decimal(area));
        let complementary_cycles =
            result_crops.iter().fold(Decimal::ZERO, |acc, line| {
                            acc + line.dec("system fraction") * line.dec("complementary cycles")
                        });
        line.insert("cycles".into(), Value::Decimal(complementary_cycles));
        let plant_sites = row.dec("plants_per_sqft") * area * complementary_cycles;
        line.insert("plant sites".into(), Value::Decimal(plant_sites));
        let crop_yield = row.dec("lbs_per_plant_per_cycle") * (plant_sites + substrate_req);
        line.insert("yield".into(), Value::Decimal(crop_yield));
        line.insert("water use".into(), Value::Decimal(crop_yield * Decimal::from(20) / decimal::lit("8.34")));
        line.insert("sale unit id".into(), Value::Int(lb_unit_id));
        line.insert("sale unit type".into(), Value::Text("1 lb".to_string()));
        line.insert("sale units".into(), Value::Decimal(crop_yield));
        line.insert("price per unit".into(),
                    Value::Decimal(row.dec("default_price_per_lb_market") * price_factor));
        line.insert("revenue".into(), Value::Decimal(crop_yield * line.dec("price per unit")));
        let neutral_lost: Vec<Value> = (0..15).map(|_| {
                                                  let mut lost = ValueMap::new();
                                                  lost.insert("lost".into(), Value::Int(1));
                                                  Value::Record(lost)
                                              })
                                              .collect();
        line.insert("lost factors".into(), Value::List(neutral_lost));
        result_crops.push(line);

        let sum_of = |key: &str| -> Decimal {
            result_crops.iter().fold(Decimal::ZERO, |acc, line| acc + line.dec(key))
        };
        let total_plant_sites = sum_of("plant sites");
        let total_yield = sum_of("yield");
        let total_water_use = sum_of("water use");
        let total_sale_units = sum_of("sale units");
        let total_revenue = sum_of("revenue");
        result.insert("crops".into(), Value::List(result_crops.into_iter().map(Value::Record).collect()));
        set_if_unset(&mut result, "total plant sites", Value::Decimal(total_plant_sites));
        set_if_unset(&mut result, "total yield", Value::Decimal(total_yield));
        set_if_unset(&mut result, "total water use", Value::Decimal(total_water_use));
        set_if_unset(&mut result, "total sale units", Value::Decimal(total_sale_units));
        set_if_unset(&mut result, "total revenue", Value::Decimal(total_revenue));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
